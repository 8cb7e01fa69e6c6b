//! chartgrid
//!
//! Load tabular data from CSV, map its columns onto chart series through a
//! dynamic property grid, and export the chart as PNG or SVG. Pairs with the
//! `chartgrid` CLI and the `chartgrid-gui` desktop tool.
//!
//! ### Features
//! - Runtime-customizable property descriptions ([`descriptor`]): per-type cache,
//!   per-instance overrides, mutable metadata, pluggable value converters
//! - Six series variants with their own editable settings
//! - Column mapping per series with a live dropdown of table columns
//! - Headless property grid model ([`grid`]) shared by both front-ends
//! - SVG/PNG chart export
//!
//! ### Example
//! ```no_run
//! use chartgrid::Workspace;
//!
//! let mut ws = Workspace::new();
//! ws.load_csv("prices.csv")?;
//! ws.edit_property("SelectedSeries/Series", "Line")?;
//! ws.grid_mut().expand("SelectedSeries/Columns");
//! ws.edit_property("SelectedSeries/Columns/X", "Price")?;
//! let options = ws.export_options("chart.svg")?;
//! ws.export("chart.svg", &options)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod app;
pub mod color;
pub mod descriptor;
pub mod export;
pub mod grid;
pub mod mapping;
pub mod rows;
pub mod series;
pub mod table;
pub mod viz;

pub use app::{Notice, Workspace, checked};
pub use color::Color;
pub use descriptor::{DescriptorRegistry, PropertyDescriptor, TypeDescriptor, Value, ValueKind};
pub use export::{ExportFormat, ExportOptions};
pub use grid::{GridEdit, GridRow, PropertyGrid};
pub use rows::{SeriesList, SeriesRow};
pub use series::{Series, SeriesKind};
pub use table::DataTable;
