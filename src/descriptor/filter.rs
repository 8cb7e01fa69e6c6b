use crate::descriptor::property::PropertyDescriptor;
use std::sync::Arc;

/// Arbitrary marker attached to a property descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Editing this property changes which sibling properties exist; hosts rebuild the view.
    RefreshAll,
    Custom(String),
}

impl Tag {
    pub fn custom(name: impl Into<String>) -> Self {
        Tag::Custom(name.into())
    }
}

/// Predicate for `TypeDescriptor::filtered`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyFilter {
    Browsable,
    Category(String),
    HasTag(Tag),
}

impl PropertyFilter {
    pub fn matches(&self, prop: &PropertyDescriptor) -> bool {
        match self {
            PropertyFilter::Browsable => prop.is_browsable(),
            PropertyFilter::Category(category) => prop.category() == *category,
            PropertyFilter::HasTag(tag) => prop.has_tag(tag),
        }
    }
}

/// Conjunction of `filters`, order preserved. No filters keeps everything.
pub fn apply_filters(
    props: &[Arc<PropertyDescriptor>],
    filters: &[PropertyFilter],
) -> Vec<Arc<PropertyDescriptor>> {
    props
        .iter()
        .filter(|p| filters.iter().all(|f| f.matches(p)))
        .cloned()
        .collect()
}
