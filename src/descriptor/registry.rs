//! The descriptor registry: the single place hosts ask "describe this object".
//!
//! Lookups resolve a per-instance override first, then the cached type-level
//! descriptor, creating it from the type's field table on first use. Several
//! independent callers can install and tweak descriptors without touching the
//! described types.
//!
//! Per-instance overrides hold only a weak reference to their instance. An entry
//! stops matching as soon as the instance is dropped and is pruned on the next
//! insertion (or explicitly via [`DescriptorRegistry::prune`]).

use crate::descriptor::converter::{DropDownConverter, ParseConverter, ValueConverter};
use crate::descriptor::property::PropertyDescriptor;
use crate::descriptor::type_descriptor::{Describe, TypeDescriptor};
use crate::descriptor::value::ValueKind;
use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use std::any::{Any, TypeId, type_name};
use std::sync::{Arc, Weak};

struct InstanceOverride {
    target: Weak<dyn Any + Send + Sync>,
    type_id: TypeId,
    descriptor: Arc<TypeDescriptor>,
}

impl InstanceOverride {
    fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }

    fn matches(&self, address: *const (), type_id: TypeId) -> bool {
        self.is_alive() && self.type_id == type_id && self.target.as_ptr() as *const () == address
    }
}

fn address_of(instance: &dyn Any) -> *const () {
    instance as *const dyn Any as *const ()
}

#[derive(Default)]
pub struct DescriptorRegistry {
    types: RwLock<AHashMap<TypeId, Arc<TypeDescriptor>>>,
    kind_types: RwLock<AHashMap<ValueKind, TypeId>>,
    kind_converters: RwLock<AHashMap<ValueKind, Arc<dyn ValueConverter>>>,
    instances: Mutex<Vec<InstanceOverride>>,
}

impl DescriptorRegistry {
    /// An empty registry: no types, no default converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the stock converters for bool, integer, float and text.
    pub fn with_default_converters() -> Self {
        let registry = Self::new();
        registry.register_converter(ValueKind::Bool, Arc::new(DropDownConverter::bools()));
        registry.register_converter(ValueKind::Int, Arc::new(ParseConverter::int()));
        registry.register_converter(ValueKind::Float, Arc::new(ParseConverter::float()));
        registry.register_converter(ValueKind::Text, Arc::new(ParseConverter::text()));
        registry
    }

    /// Fetch-or-create the descriptor for `T`. Every call for the same type returns
    /// the same `Arc`.
    pub fn install<T: Describe>(&self) -> Arc<TypeDescriptor> {
        let id = TypeId::of::<T>();
        if let Some(found) = self.types.read().get(&id) {
            return Arc::clone(found);
        }
        let descriptor = {
            let mut types = self.types.write();
            Arc::clone(types.entry(id).or_insert_with(|| {
                log::debug!("installing type descriptor for {}", type_name::<T>());
                Arc::new(TypeDescriptor::of::<T>())
            }))
        };
        if let Some(kind) = T::VALUE_KIND {
            self.kind_types.write().entry(kind).or_insert(id);
        }
        descriptor
    }

    pub fn installed(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.types.read().get(&type_id).cloned()
    }

    pub fn is_installed<T: Any>(&self) -> bool {
        self.types.read().contains_key(&TypeId::of::<T>())
    }

    /// Substitute `descriptor` for this one instance. Replaces any earlier override
    /// for the same instance.
    pub fn install_instance_override<T>(&self, instance: &Arc<T>, descriptor: Arc<TypeDescriptor>)
    where
        T: Any + Send + Sync,
    {
        let target: Weak<dyn Any + Send + Sync> = Arc::downgrade(instance) as Weak<T>;
        let address = address_of(&**instance);
        let type_id = TypeId::of::<T>();
        let mut instances = self.instances.lock();
        instances.retain(|o| o.is_alive() && !o.matches(address, type_id));
        instances.push(InstanceOverride {
            target,
            type_id,
            descriptor,
        });
    }

    pub fn remove_instance_override(&self, instance: &dyn Any) -> bool {
        let address = address_of(instance);
        let type_id = instance.type_id();
        let mut instances = self.instances.lock();
        let before = instances.len();
        instances.retain(|o| !o.matches(address, type_id));
        instances.len() != before
    }

    pub fn instance_override(&self, instance: &dyn Any) -> Option<Arc<TypeDescriptor>> {
        let address = address_of(instance);
        let type_id = instance.type_id();
        self.instances
            .lock()
            .iter()
            .find(|o| o.matches(address, type_id))
            .map(|o| Arc::clone(&o.descriptor))
    }

    /// Drop overrides whose instance is gone. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut instances = self.instances.lock();
        let before = instances.len();
        instances.retain(InstanceOverride::is_alive);
        before - instances.len()
    }

    pub fn override_count(&self) -> usize {
        self.instances.lock().iter().filter(|o| o.is_alive()).count()
    }

    /// Describe an instance of a known type, installing the type on first use.
    /// `None` describes the type itself.
    pub fn describe<T: Describe>(&self, instance: Option<&T>) -> Arc<TypeDescriptor> {
        instance
            .and_then(|i| self.instance_override(i))
            .unwrap_or_else(|| self.install::<T>())
    }

    /// Describe an erased instance. Only already-installed types can be described.
    pub fn describe_dyn(&self, instance: &dyn Any) -> Option<Arc<TypeDescriptor>> {
        self.instance_override(instance)
            .or_else(|| self.installed(instance.type_id()))
    }

    pub fn register_converter(&self, kind: ValueKind, converter: Arc<dyn ValueConverter>) {
        self.kind_converters.write().insert(kind, converter);
    }

    pub fn kind_converter(&self, kind: ValueKind) -> Option<Arc<dyn ValueConverter>> {
        self.kind_converters.read().get(&kind).cloned()
    }

    /// Property override, then the converter set on the descriptor of the type
    /// linked to the property's kind, then the ambient default for the kind.
    pub fn converter_for(&self, prop: &PropertyDescriptor) -> Option<Arc<dyn ValueConverter>> {
        prop.converter()
            .or_else(|| {
                let type_id = *self.kind_types.read().get(&prop.kind())?;
                self.installed(type_id)?.converter()
            })
            .or_else(|| self.kind_converter(prop.kind()))
    }
}
