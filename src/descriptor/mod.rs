//! Dynamic property descriptions for the property grid.
//!
//! Plain data objects (series, colors, column mappings, export settings) present
//! a runtime-customizable set of properties through this layer:
//!
//! - [`PropertyDescriptor`]: typed accessors plus mutable metadata for one property
//! - [`ValueConverter`]: text/dropdown/expandable presentation of a value
//! - [`TypeDescriptor`]: the ordered, filterable property set of one type
//! - [`DescriptorRegistry`]: per-type cache and per-instance overrides
//!
//! Types declare their fields statically through [`Describe`]; nothing is
//! discovered at runtime.

pub mod converter;
pub mod error;
pub mod filter;
pub mod property;
pub mod registry;
pub mod type_descriptor;
pub mod value;

pub use converter::{ConverterContext, DropDownConverter, ParseConverter, ValueConverter};
pub use error::{ConversionError, DescriptorError};
pub use filter::{PropertyFilter, Tag, apply_filters};
pub use property::{DEFAULT_CATEGORY, PropertyDescriptor};
pub use registry::DescriptorRegistry;
pub use type_descriptor::{Describe, TypeDescriptor};
pub use value::{Value, ValueKind};
