//! Property descriptors: one editable attribute of one type.
//!
//! A descriptor pairs typed accessors (erased behind `dyn Any`) with metadata that any
//! caller may change after installation: read-only and browsable flags, display name,
//! description, category, converter and tag set. Metadata lives behind a lock so a
//! descriptor can be shared from the registry cache and mutated in place.

use crate::descriptor::converter::ValueConverter;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::filter::Tag;
use crate::descriptor::value::{Value, ValueKind};
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// Category used when a field table does not name one.
pub const DEFAULT_CATEGORY: &str = "Misc";

type Getter = Arc<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;
type Setter = Arc<dyn Fn(&mut dyn Any, Value) -> Option<Result<(), DescriptorError>> + Send + Sync>;
type ChildRef = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync>;
type ChildMut = Arc<dyn for<'a> Fn(&'a mut dyn Any) -> Option<&'a mut dyn Any> + Send + Sync>;

fn child_ref_fn<F>(f: F) -> F
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any>,
{
    f
}

fn child_mut_fn<F>(f: F) -> F
where
    F: for<'a> Fn(&'a mut dyn Any) -> Option<&'a mut dyn Any>,
{
    f
}

struct Meta {
    read_only: bool,
    browsable: bool,
    display_name: String,
    description: String,
    category: String,
    converter: Option<Arc<dyn ValueConverter>>,
    tags: Vec<Tag>,
    // Captured from the first instance passed to `can_reset`, not a true static default.
    default: Option<Value>,
}

pub struct PropertyDescriptor {
    name: String,
    owner: TypeId,
    owner_name: &'static str,
    kind: ValueKind,
    getter: Getter,
    setter: Option<Setter>,
    child: Option<(ChildRef, ChildMut)>,
    meta: RwLock<Meta>,
}

impl PropertyDescriptor {
    /// A property with a getter only. It starts out read-only and stays so.
    pub fn read_only<T, G>(name: &str, kind: ValueKind, get: G) -> Self
    where
        T: Any,
        G: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let getter: Getter = Arc::new(move |any: &dyn Any| any.downcast_ref::<T>().map(&get));
        Self {
            name: name.to_string(),
            owner: TypeId::of::<T>(),
            owner_name: type_name::<T>(),
            kind,
            getter,
            setter: None,
            child: None,
            meta: RwLock::new(Meta {
                read_only: true,
                browsable: true,
                display_name: name.to_string(),
                description: String::new(),
                category: DEFAULT_CATEGORY.to_string(),
                converter: None,
                tags: Vec::new(),
                default: None,
            }),
        }
    }

    /// A property with both accessors. The setter receives the raw value and is
    /// responsible for checking its kind.
    pub fn read_write<T, G, S>(name: &str, kind: ValueKind, get: G, set: S) -> Self
    where
        T: Any,
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<(), DescriptorError> + Send + Sync + 'static,
    {
        let mut prop = Self::read_only(name, kind, get);
        let setter: Setter = Arc::new(move |any: &mut dyn Any, value: Value| {
            any.downcast_mut::<T>().map(|target| set(target, value))
        });
        prop.setter = Some(setter);
        prop.meta.get_mut().read_only = false;
        prop
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.meta.get_mut().display_name = display_name.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.meta.get_mut().description = description.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.meta.get_mut().category = category.to_string();
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn ValueConverter>) -> Self {
        self.meta.get_mut().converter = Some(converter);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        let tags = &mut self.meta.get_mut().tags;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta.get_mut().browsable = false;
        self
    }

    /// Expose a nested object so the grid can expand this property into the
    /// child's own properties.
    pub fn with_child<T: Any>(
        mut self,
        get: impl for<'a> Fn(&'a T) -> Option<&'a dyn Any> + Send + Sync + 'static,
        get_mut: impl for<'a> Fn(&'a mut T) -> Option<&'a mut dyn Any> + Send + Sync + 'static,
    ) -> Self {
        debug_assert_eq!(TypeId::of::<T>(), self.owner, "child accessor on foreign type");
        let child_ref: ChildRef =
            Arc::new(child_ref_fn(move |any| any.downcast_ref::<T>().and_then(|t| get(t))));
        let child_mut: ChildMut = Arc::new(child_mut_fn(move |any| {
            any.downcast_mut::<T>().and_then(|t| get_mut(t))
        }));
        self.child = Some((child_ref, child_mut));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn owner_type(&self) -> TypeId {
        self.owner
    }

    pub fn owner_type_name(&self) -> &'static str {
        self.owner_name
    }

    fn access_error(&self) -> DescriptorError {
        DescriptorError::Access {
            property: self.name.clone(),
            expected: self.owner_name,
        }
    }

    pub fn get(&self, instance: &dyn Any) -> Result<Value, DescriptorError> {
        (self.getter)(instance).ok_or_else(|| self.access_error())
    }

    /// Write `value`. Read-only properties are rejected before anything is touched.
    pub fn set(&self, instance: &mut dyn Any, value: Value) -> Result<(), DescriptorError> {
        if self.is_read_only() {
            return Err(DescriptorError::ReadOnly(self.name.clone()));
        }
        let setter = self
            .setter
            .as_ref()
            .ok_or_else(|| DescriptorError::ReadOnly(self.name.clone()))?;
        setter(instance, value).unwrap_or_else(|| Err(self.access_error()))
    }

    /// Captures the instance's current value as the default on first call.
    pub fn can_reset(&self, instance: &dyn Any) -> bool {
        if self.meta.read().default.is_some() {
            return true;
        }
        match self.get(instance) {
            Ok(current) => {
                self.meta.write().default.get_or_insert(current);
                true
            }
            Err(_) => false,
        }
    }

    pub fn reset(&self, instance: &mut dyn Any) -> Result<(), DescriptorError> {
        let default = self
            .meta
            .read()
            .default
            .clone()
            .ok_or_else(|| DescriptorError::NoDefaultCaptured(self.name.clone()))?;
        self.set(instance, default)
    }

    pub fn default_value(&self) -> Option<Value> {
        self.meta.read().default.clone()
    }

    pub fn is_expandable(&self) -> bool {
        self.child.is_some()
    }

    pub fn child<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
        let (child_ref, _) = self.child.as_ref()?;
        child_ref(instance)
    }

    pub fn child_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let (_, child_mut) = self.child.as_ref()?;
        child_mut(instance)
    }

    pub fn is_read_only(&self) -> bool {
        self.setter.is_none() || self.meta.read().read_only
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.meta.write().read_only = read_only;
    }

    pub fn is_browsable(&self) -> bool {
        self.meta.read().browsable
    }

    pub fn set_browsable(&self, browsable: bool) {
        self.meta.write().browsable = browsable;
    }

    pub fn display_name(&self) -> String {
        self.meta.read().display_name.clone()
    }

    pub fn set_display_name(&self, display_name: &str) {
        self.meta.write().display_name = display_name.to_string();
    }

    pub fn description(&self) -> String {
        self.meta.read().description.clone()
    }

    pub fn set_description(&self, description: &str) {
        self.meta.write().description = description.to_string();
    }

    pub fn category(&self) -> String {
        self.meta.read().category.clone()
    }

    pub fn set_category(&self, category: &str) {
        self.meta.write().category = category.to_string();
    }

    /// The explicit override only. Use `DescriptorRegistry::converter_for` for the
    /// resolved converter.
    pub fn converter(&self) -> Option<Arc<dyn ValueConverter>> {
        self.meta.read().converter.clone()
    }

    pub fn set_converter(&self, converter: Option<Arc<dyn ValueConverter>>) {
        self.meta.write().converter = converter;
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.meta.read().tags.clone()
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.meta.read().tags.contains(tag)
    }

    /// Returns false when the tag was already present.
    pub fn add_tag(&self, tag: Tag) -> bool {
        let mut meta = self.meta.write();
        if meta.tags.contains(&tag) {
            return false;
        }
        meta.tags.push(tag);
        true
    }

    /// Returns false when the tag was not present.
    pub fn remove_tag(&self, tag: &Tag) -> bool {
        let mut meta = self.meta.write();
        let before = meta.tags.len();
        meta.tags.retain(|t| t != tag);
        meta.tags.len() != before
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.meta.read();
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("owner", &self.owner_name)
            .field("kind", &self.kind)
            .field("read_only", &(self.setter.is_none() || meta.read_only))
            .field("browsable", &meta.browsable)
            .field("category", &meta.category)
            .field("tags", &meta.tags)
            .finish()
    }
}
