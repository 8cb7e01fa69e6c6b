//! Column mapping: which data-table column feeds which item field.
//!
//! The mapping is shown in the grid as an expandable property whose children are
//! synthesized per series variant, one per writable item field, each a dropdown over
//! the live column names of the loaded table.

use crate::descriptor::{
    ConversionError, ConverterContext, PropertyDescriptor, Value, ValueConverter, ValueKind,
};
use crate::rows::SeriesRow;
use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field name -> column name. Unmapped fields fall back to column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }

    /// Map `field` to `column`; an empty column name removes the entry.
    pub fn set(&mut self, field: &str, column: &str) {
        if column.is_empty() {
            self.columns.remove(field);
        } else {
            self.columns.insert(field.to_string(), column.to_string());
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.columns.remove(field)
    }

    /// Keep only entries for `fields`.
    pub fn retain_fields(&mut self, fields: &[&str]) {
        self.columns.retain(|field, _| fields.contains(&field.as_str()));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }

    /// "X: Price, Y: Volume" in field order; "(by position)" when nothing is mapped.
    pub fn summary(&self, fields: &[&str]) -> String {
        let parts: Vec<String> = fields
            .iter()
            .filter_map(|f| self.get(f).map(|c| format!("{f}: {c}")))
            .collect();
        if parts.is_empty() {
            "(by position)".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Shared, live list of the loaded table's column names.
#[derive(Debug, Clone, Default)]
pub struct ColumnNames(Arc<RwLock<Vec<String>>>);

impl ColumnNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, names: Vec<String>) {
        *self.0.write() = names;
    }

    pub fn push(&self, name: &str) {
        self.0.write().push(name.to_string());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.read().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.read().iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

/// Dropdown over the current column names plus an empty entry for "unmapped".
pub struct ColumnNameConverter {
    names: ColumnNames,
}

impl ColumnNameConverter {
    pub fn new(names: ColumnNames) -> Self {
        Self { names }
    }
}

impl ValueConverter for ColumnNameConverter {
    fn try_convert_from(
        &self,
        _ctx: &ConverterContext<'_>,
        text: &str,
    ) -> Result<Value, ConversionError> {
        let wanted = text.trim();
        if wanted.is_empty() {
            return Ok(Value::Empty);
        }
        if self.names.contains(wanted) {
            Ok(Value::Text(wanted.to_string()))
        } else {
            Err(ConversionError::new(text, ValueKind::Text, "no such column"))
        }
    }

    fn standard_values_supported(&self, _ctx: &ConverterContext<'_>) -> bool {
        true
    }

    fn standard_values(&self, _ctx: &ConverterContext<'_>) -> Vec<Value> {
        std::iter::once(Value::Empty)
            .chain(self.names.snapshot().into_iter().map(Value::Text))
            .collect()
    }
}

/// Expandable converter for a row's "Columns" property.
///
/// The set of field properties is recomputed on every call, but each field's
/// descriptor is kept once created so its captured reset default survives between
/// grid refreshes and edits.
pub struct ColumnMappingConverter {
    names: ColumnNames,
    fields: Mutex<AHashMap<String, Arc<PropertyDescriptor>>>,
}

impl ColumnMappingConverter {
    pub fn new(names: ColumnNames) -> Self {
        Self {
            names,
            fields: Mutex::new(AHashMap::new()),
        }
    }

    fn field_property(&self, field: &str) -> Arc<PropertyDescriptor> {
        let mut fields = self.fields.lock();
        Arc::clone(
            fields
                .entry(field.to_string())
                .or_insert_with(|| Arc::new(column_property(field, self.names.clone()))),
        )
    }
}

impl ValueConverter for ColumnMappingConverter {
    fn try_convert_from(
        &self,
        _ctx: &ConverterContext<'_>,
        text: &str,
    ) -> Result<Value, ConversionError> {
        Err(ConversionError::new(
            text,
            ValueKind::Text,
            "edit the individual field columns instead",
        ))
    }

    /// One synthetic property per writable field of the row's item type. A row with
    /// no series selected has no sub-properties.
    fn properties(&self, ctx: &ConverterContext<'_>) -> Option<Vec<Arc<PropertyDescriptor>>> {
        let row = ctx.instance_as::<SeriesRow>()?;
        let fields = row
            .kind()
            .map(|k| k.item_kind().writable_fields(ctx.registry))
            .unwrap_or_default();
        Some(
            fields
                .iter()
                .map(|f| self.field_property(f))
                .collect(),
        )
    }
}

/// Synthetic descriptor reading/writing one mapping entry.
pub fn column_property(field: &str, names: ColumnNames) -> PropertyDescriptor {
    let read_key = field.to_string();
    let write_key = field.to_string();
    PropertyDescriptor::read_write(
        field,
        ValueKind::Text,
        move |m: &ColumnMapping| {
            m.get(&read_key)
                .map(|c| Value::Text(c.to_string()))
                .unwrap_or(Value::Empty)
        },
        move |m: &mut ColumnMapping, v| {
            match v {
                Value::Empty => {
                    m.remove(&write_key);
                }
                other => m.set(&write_key, &other.into_text()?),
            }
            Ok(())
        },
    )
    .with_category("Columns")
    .with_description(&format!("Column supplying the {field} field"))
    .with_converter(Arc::new(ColumnNameConverter::new(names)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorRegistry;

    #[test]
    fn summary_lists_mapped_fields_in_field_order() {
        let mut m = ColumnMapping::new();
        m.set("Y", "Volume");
        m.set("X", "Price");
        assert_eq!(m.summary(&["X", "Y"]), "X: Price, Y: Volume");
        m.set("X", "");
        assert_eq!(m.summary(&["X", "Y"]), "Y: Volume");
        assert_eq!(ColumnMapping::new().summary(&["X"]), "(by position)");
    }

    #[test]
    fn column_names_are_shared_between_clones() {
        let names = ColumnNames::new();
        let view = names.clone();
        names.replace(vec!["A".into()]);
        names.push("B");
        assert_eq!(view.snapshot(), vec!["A", "B"]);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let registry = DescriptorRegistry::new();
        let ctx = ConverterContext::new(&registry);
        let names = ColumnNames::new();
        names.replace(vec!["Price".into()]);
        let conv = ColumnNameConverter::new(names);
        assert_eq!(conv.try_convert_from(&ctx, " Price ").unwrap(), Value::Text("Price".into()));
        assert_eq!(conv.try_convert_from(&ctx, "").unwrap(), Value::Empty);
        assert!(conv.try_convert_from(&ctx, "Volume").is_err());
    }
}
