use crate::descriptor::converter::ValueConverter;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::filter::{PropertyFilter, apply_filters};
use crate::descriptor::property::PropertyDescriptor;
use crate::descriptor::value::ValueKind;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// A type with a statically declared field table.
///
/// `describe_fields` is called once per registry when the type is installed; the
/// order of the returned table is the order the grid shows.
pub trait Describe: Any {
    /// Links the type to a value kind, so that a converter set on this type's
    /// descriptor applies to every property of that kind.
    const VALUE_KIND: Option<ValueKind> = None;

    fn describe_fields() -> Vec<PropertyDescriptor>;
}

/// The ordered set of property descriptors for one type.
///
/// Membership is fixed at construction; only per-descriptor metadata changes afterwards.
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    properties: Vec<Arc<PropertyDescriptor>>,
    converter: RwLock<Option<Arc<dyn ValueConverter>>>,
}

impl TypeDescriptor {
    pub fn of<T: Describe>() -> Self {
        Self::from_properties::<T>(T::describe_fields())
    }

    /// Build a descriptor from an explicit table, e.g. for a per-instance override.
    pub fn from_properties<T: Any>(properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            properties: properties.into_iter().map(Arc::new).collect(),
            converter: RwLock::new(None),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn properties(&self) -> &[Arc<PropertyDescriptor>] {
        &self.properties
    }

    pub fn filtered(&self, filters: &[PropertyFilter]) -> Vec<Arc<PropertyDescriptor>> {
        apply_filters(&self.properties, filters)
    }

    pub fn property(&self, name: &str) -> Option<&Arc<PropertyDescriptor>> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn try_property(&self, name: &str) -> Result<&Arc<PropertyDescriptor>, DescriptorError> {
        self.property(name)
            .ok_or_else(|| DescriptorError::UnknownProperty(name.to_string()))
    }

    pub fn converter(&self) -> Option<Arc<dyn ValueConverter>> {
        self.converter.read().clone()
    }

    pub fn set_converter(&self, converter: Option<Arc<dyn ValueConverter>>) {
        *self.converter.write() = converter;
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type", &self.type_name)
            .field(
                "properties",
                &self.properties.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
