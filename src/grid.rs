//! Property grid model: flattens a described object into display rows and routes
//! text edits back through converters and setters.
//!
//! Rows are addressed by `/`-separated property names from the root object, e.g.
//! `SelectedSeries/Series/Color`. Expansion state is kept per path.

use crate::descriptor::{
    ConverterContext, DescriptorError, DescriptorRegistry, PropertyDescriptor, PropertyFilter,
    Tag, Value, apply_filters,
};
use ahash::AHashSet;
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;

pub const PATH_SEPARATOR: char = '/';

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub path: String,
    pub depth: usize,
    pub name: String,
    pub label: String,
    pub category: String,
    pub description: String,
    pub value: String,
    pub read_only: bool,
    /// Dropdown entries when the converter offers standard values.
    pub choices: Option<Vec<String>>,
    pub expandable: bool,
    pub expanded: bool,
    pub can_reset: bool,
}

/// Outcome of a successful edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridEdit {
    pub changed: bool,
    /// The property asked for a full refresh of dependent views.
    pub refresh: bool,
}

pub struct PropertyGrid {
    registry: Arc<DescriptorRegistry>,
    expanded: AHashSet<String>,
    filters: Vec<PropertyFilter>,
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{name}")
    }
}

impl PropertyGrid {
    /// A grid showing browsable properties only.
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self {
            registry,
            expanded: AHashSet::new(),
            filters: vec![PropertyFilter::Browsable],
        }
    }

    pub fn with_filters(mut self, filters: Vec<PropertyFilter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        &self.registry
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    pub fn expand(&mut self, path: &str) {
        self.expanded.insert(path.to_string());
    }

    pub fn collapse(&mut self, path: &str) {
        self.expanded.remove(path);
    }

    pub fn toggle(&mut self, path: &str) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
    }

    /// Flatten `root` into rows. `None` shows an empty grid.
    pub fn rows(&self, root: Option<&dyn Any>) -> Result<Vec<GridRow>, DescriptorError> {
        let Some(root) = root else {
            return Ok(Vec::new());
        };
        let descriptor = self
            .registry
            .describe_dyn(root)
            .ok_or(DescriptorError::NotDescribed)?;
        let mut out = Vec::new();
        self.collect(root, &descriptor.filtered(&self.filters), "", 0, &mut out)?;
        Ok(out)
    }

    fn collect(
        &self,
        owner: &dyn Any,
        props: &[Arc<PropertyDescriptor>],
        prefix: &str,
        depth: usize,
        out: &mut Vec<GridRow>,
    ) -> Result<(), DescriptorError> {
        for prop in props {
            let path = join(prefix, prop.name());
            let value = prop.get(owner)?;
            let ctx = ConverterContext::new(&self.registry)
                .with_instance(owner)
                .with_property(prop);
            let converter = self.registry.converter_for(prop);
            let text = match &converter {
                Some(c) => c.convert_to(&ctx, &value),
                None => value.to_string(),
            };
            let choices = converter
                .as_ref()
                .filter(|c| c.standard_values_supported(&ctx))
                .map(|c| {
                    c.standard_values(&ctx)
                        .iter()
                        .map(|v| c.convert_to(&ctx, v))
                        .collect()
                });
            let child = prop.child(owner);
            let expanded = child.is_some() && self.expanded.contains(&path);
            out.push(GridRow {
                path: path.clone(),
                depth,
                name: prop.name().to_string(),
                label: prop.display_name(),
                category: prop.category(),
                description: prop.description(),
                value: text,
                read_only: prop.is_read_only(),
                choices,
                expandable: child.is_some(),
                expanded,
                can_reset: prop.can_reset(owner),
            });
            if let Some(child) = child.filter(|_| expanded) {
                let nested = self.sub_properties(owner, prop, child);
                self.collect(child, &nested, &path, depth + 1, out)?;
            }
        }
        Ok(())
    }

    /// Children of an expandable property: the converter's synthetic set if it
    /// offers one, else the child object's own descriptor.
    fn sub_properties(
        &self,
        owner: &dyn Any,
        prop: &PropertyDescriptor,
        child: &dyn Any,
    ) -> Vec<Arc<PropertyDescriptor>> {
        let ctx = ConverterContext::new(&self.registry)
            .with_instance(owner)
            .with_property(prop);
        if let Some(props) = self
            .registry
            .converter_for(prop)
            .and_then(|c| c.properties(&ctx))
        {
            return apply_filters(&props, &self.filters);
        }
        self.registry
            .describe_dyn(child)
            .map(|d| d.filtered(&self.filters))
            .unwrap_or_default()
    }

    /// Walk `path` and return the owner of the last segment with its descriptor.
    fn locate<'a>(
        &self,
        root: &'a mut dyn Any,
        path: &str,
    ) -> Result<(&'a mut dyn Any, Arc<PropertyDescriptor>), DescriptorError> {
        let unknown = || DescriptorError::UnknownProperty(path.to_string());
        let descriptor = self
            .registry
            .describe_dyn(&*root)
            .ok_or(DescriptorError::NotDescribed)?;
        let mut props = descriptor.filtered(&self.filters);
        let mut owner = root;
        let mut segments = path.split(PATH_SEPARATOR).peekable();
        loop {
            let segment = segments.next().ok_or_else(unknown)?;
            let prop = props
                .iter()
                .find(|p| p.name() == segment)
                .cloned()
                .ok_or_else(unknown)?;
            if segments.peek().is_none() {
                return Ok((owner, prop));
            }
            let not_expandable = || DescriptorError::NotExpandable(prop.name().to_string());
            props = {
                let shared: &dyn Any = &*owner;
                let child = prop.child(shared).ok_or_else(not_expandable)?;
                self.sub_properties(shared, &prop, child)
            };
            owner = prop.child_mut(owner).ok_or_else(not_expandable)?;
        }
    }

    /// Apply user text to the property at `path` through its converter. Text that
    /// does not convert leaves the value unchanged and reports `changed: false`.
    pub fn set_text(
        &self,
        root: &mut dyn Any,
        path: &str,
        text: &str,
    ) -> Result<GridEdit, DescriptorError> {
        self.edit_text(root, path, text, false)
    }

    /// Like [`set_text`](Self::set_text), but text that does not convert is an error.
    pub fn try_set_text(
        &self,
        root: &mut dyn Any,
        path: &str,
        text: &str,
    ) -> Result<GridEdit, DescriptorError> {
        self.edit_text(root, path, text, true)
    }

    fn edit_text(
        &self,
        root: &mut dyn Any,
        path: &str,
        text: &str,
        strict: bool,
    ) -> Result<GridEdit, DescriptorError> {
        let (owner, prop) = self.locate(root, path)?;
        if prop.is_read_only() {
            return Err(DescriptorError::ReadOnly(prop.name().to_string()));
        }
        let previous = prop.get(&*owner)?;
        let next = {
            let shared: &dyn Any = &*owner;
            let ctx = ConverterContext::new(&self.registry)
                .with_instance(shared)
                .with_property(&prop);
            match self.registry.converter_for(&prop) {
                Some(converter) if strict => converter.try_convert_from(&ctx, text)?,
                Some(converter) => converter.convert_from(&ctx, text, &previous),
                None => Value::Text(text.to_string()),
            }
        };
        Self::apply(owner, &prop, previous, next)
    }

    /// Apply an already-typed value, e.g. from a checkbox.
    pub fn set_value(
        &self,
        root: &mut dyn Any,
        path: &str,
        value: Value,
    ) -> Result<GridEdit, DescriptorError> {
        let (owner, prop) = self.locate(root, path)?;
        let previous = prop.get(&*owner)?;
        Self::apply(owner, &prop, previous, value)
    }

    fn apply(
        owner: &mut dyn Any,
        prop: &PropertyDescriptor,
        previous: Value,
        next: Value,
    ) -> Result<GridEdit, DescriptorError> {
        if next == previous {
            return Ok(GridEdit::default());
        }
        prop.set(owner, next)?;
        log::debug!("property {} changed", prop.name());
        Ok(GridEdit {
            changed: true,
            refresh: prop.has_tag(&Tag::RefreshAll),
        })
    }

    /// Restore the default captured when the row was first shown.
    pub fn reset(&self, root: &mut dyn Any, path: &str) -> Result<GridEdit, DescriptorError> {
        let (owner, prop) = self.locate(root, path)?;
        let previous = prop.get(&*owner)?;
        let default = prop
            .default_value()
            .ok_or_else(|| DescriptorError::NoDefaultCaptured(prop.name().to_string()))?;
        Self::apply(owner, &prop, previous, default)
    }
}
