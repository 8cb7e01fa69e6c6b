//! The series list edited in the property grid: one row per chart series.

use crate::descriptor::{
    ConversionError, ConverterContext, Describe, DescriptorError, DescriptorRegistry,
    PropertyDescriptor, Tag, Value, ValueConverter, ValueKind,
};
use crate::mapping::ColumnMapping;
use crate::series::{Series, SeriesKind};
use crate::table::DataTable;
use std::any::Any;
use std::sync::Arc;

/// Upper bound for "Series count".
pub const MAX_SERIES: usize = 64;

/// One chart series plus the columns feeding it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesRow {
    series: Option<Series>,
    columns: ColumnMapping,
}

impl SeriesRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: SeriesKind) -> Self {
        Self {
            series: Some(Series::new(kind)),
            columns: ColumnMapping::new(),
        }
    }

    pub fn kind(&self) -> Option<SeriesKind> {
        self.series.as_ref().map(Series::kind)
    }

    /// Swap the series variant. Mapping entries for fields the new item type lacks
    /// are dropped; the rest carry over.
    pub fn set_kind(&mut self, kind: Option<SeriesKind>) {
        if kind == self.kind() {
            return;
        }
        match kind {
            Some(kind) => {
                self.columns.retain_fields(kind.item_kind().fields());
                self.series = Some(Series::new(kind));
            }
            None => {
                self.columns = ColumnMapping::new();
                self.series = None;
            }
        }
    }

    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn series_mut(&mut self) -> Option<&mut Series> {
        self.series.as_mut()
    }

    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnMapping {
        &mut self.columns
    }

    pub fn column_summary(&self) -> String {
        let fields = self.kind().map(|k| k.item_kind().fields()).unwrap_or(&[]);
        self.columns.summary(fields)
    }

    /// Rebuild the series items from every table row. Mapping entries for fields
    /// the registry currently reports as read-only are dropped first, so the
    /// mapping matches the column properties the grid shows.
    pub fn add_data_to_series(&mut self, registry: &DescriptorRegistry, table: &DataTable) {
        let Some(series) = self.series.as_mut() else {
            return;
        };
        let item_kind = series.kind().item_kind();
        let writable = item_kind.writable_fields(registry);
        let writable: Vec<&str> = writable.iter().map(String::as_str).collect();
        self.columns.retain_fields(&writable);
        let items = table
            .rows()
            .iter()
            .filter_map(|cells| item_kind.from_row(registry, &self.columns, table.columns(), cells))
            .collect::<Vec<_>>();
        log::debug!(
            "{} series: {} of {} rows became items",
            series.kind(),
            items.len(),
            table.row_count()
        );
        series.set_items(items);
    }
}

impl Describe for SeriesRow {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::read_write(
                "Series",
                ValueKind::Choice,
                |r: &SeriesRow| {
                    r.kind()
                        .map(|k| Value::Choice(k.display_name()))
                        .unwrap_or(Value::Empty)
                },
                |r: &mut SeriesRow, v| {
                    let kind = match v.into_choice()? {
                        Some(name) => Some(name.parse::<SeriesKind>()?),
                        None => None,
                    };
                    r.set_kind(kind);
                    Ok(())
                },
            )
            .with_display_name("Graph type")
            .with_category("Series")
            .with_description("Chart series variant drawn for this row")
            .with_converter(Arc::new(SeriesKind::converter()))
            .with_tag(Tag::RefreshAll)
            .with_child::<SeriesRow>(
                |r| r.series.as_ref().map(Series::as_any),
                |r| r.series.as_mut().map(Series::as_any_mut),
            ),
            PropertyDescriptor::read_only("Columns", ValueKind::Text, |r: &SeriesRow| {
                Value::Text(r.column_summary())
            })
            .with_category("Data")
            .with_description("Table columns feeding the series items")
            .with_child::<SeriesRow>(
                |r| Some(&r.columns as &dyn Any),
                |r| Some(&mut r.columns as &mut dyn Any),
            ),
        ]
    }
}

/// The editable list of series rows with one optionally selected row.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesList {
    rows: Vec<SeriesRow>,
    selected: Option<usize>,
}

impl Default for SeriesList {
    /// One empty row, selected.
    fn default() -> Self {
        Self {
            rows: vec![SeriesRow::new()],
            selected: Some(0),
        }
    }
}

impl SeriesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [SeriesRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Grow with empty rows or truncate. A selection past the end moves to the last
    /// remaining row.
    pub fn set_count(&mut self, count: usize) {
        let count = count.min(MAX_SERIES);
        self.rows.resize_with(count, SeriesRow::new);
        self.selected = match self.selected {
            _ if count == 0 => None,
            Some(i) if i >= count => Some(count - 1),
            None => Some(0),
            keep => keep,
        };
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) -> Result<(), DescriptorError> {
        if let Some(i) = index {
            if i >= self.rows.len() {
                return Err(DescriptorError::InvalidChoice(i.to_string()));
            }
        }
        self.selected = index;
        Ok(())
    }

    pub fn selected_row(&self) -> Option<&SeriesRow> {
        self.rows.get(self.selected?)
    }

    pub fn selected_row_mut(&mut self) -> Option<&mut SeriesRow> {
        self.rows.get_mut(self.selected?)
    }

    pub fn push(&mut self, row: SeriesRow) -> Result<(), DescriptorError> {
        if self.rows.len() >= MAX_SERIES {
            return Err(DescriptorError::InvalidChoice((MAX_SERIES + 1).to_string()));
        }
        self.rows.push(row);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
        Ok(())
    }

    /// Refill every row's series from `table`.
    pub fn add_data(&mut self, registry: &DescriptorRegistry, table: &DataTable) {
        for row in &mut self.rows {
            row.add_data_to_series(registry, table);
        }
    }

    pub fn series(&self) -> impl Iterator<Item = &Series> {
        self.rows.iter().filter_map(SeriesRow::series)
    }
}

impl Describe for SeriesList {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::read_write(
                "Count",
                ValueKind::Int,
                |l: &SeriesList| Value::Int(l.len() as i64),
                |l: &mut SeriesList, v| {
                    l.set_count(v.into_int()?.max(0) as usize);
                    Ok(())
                },
            )
            .with_display_name("Series count")
            .with_category("Series")
            .with_description("Number of series on the chart")
            .with_tag(Tag::RefreshAll),
            PropertyDescriptor::read_write(
                "SelectedSeries",
                ValueKind::Index,
                |l: &SeriesList| l.selected.map(Value::Index).unwrap_or(Value::Empty),
                |l: &mut SeriesList, v| l.select(v.into_index()?),
            )
            .with_display_name("Selected series")
            .with_category("Series")
            .with_description("Series shown below for editing")
            .with_converter(Arc::new(SelectedSeriesConverter))
            .with_child::<SeriesList>(
                |l| l.selected_row().map(|r| r as &dyn Any),
                |l| l.selected_row_mut().map(|r| r as &mut dyn Any),
            ),
        ]
    }
}

/// Renders the selected row as its index into the owning list.
pub struct SelectedSeriesConverter;

impl ValueConverter for SelectedSeriesConverter {
    fn try_convert_from(
        &self,
        ctx: &ConverterContext<'_>,
        text: &str,
    ) -> Result<Value, ConversionError> {
        let list = ctx
            .instance_as::<SeriesList>()
            .ok_or_else(|| ConversionError::new(text, ValueKind::Index, "no series list"))?;
        let wanted = text.trim();
        if wanted.is_empty() {
            return Ok(Value::Empty);
        }
        let index = wanted
            .parse::<usize>()
            .map_err(|e| ConversionError::new(text, ValueKind::Index, e.to_string()))?;
        if index < list.len() {
            Ok(Value::Index(index))
        } else {
            Err(ConversionError::new(text, ValueKind::Index, "index out of range"))
        }
    }

    fn convert_to(&self, _ctx: &ConverterContext<'_>, value: &Value) -> String {
        value.to_string()
    }

    fn standard_values_supported(&self, ctx: &ConverterContext<'_>) -> bool {
        ctx.instance_as::<SeriesList>().is_some()
    }

    fn standard_values(&self, ctx: &ConverterContext<'_>) -> Vec<Value> {
        ctx.instance_as::<SeriesList>()
            .map(|l| (0..l.len()).map(Value::Index).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_has_one_selected_row() {
        let list = SeriesList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.selected(), Some(0));
        assert!(list.selected_row().is_some_and(|r| r.kind().is_none()));
    }

    #[test]
    fn shrinking_moves_selection_to_last_row() {
        let mut list = SeriesList::new();
        list.set_count(4);
        list.select(Some(3)).unwrap();
        list.set_count(2);
        assert_eq!(list.selected(), Some(1));
        list.set_count(0);
        assert_eq!(list.selected(), None);
        list.set_count(1);
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn count_is_capped() {
        let mut list = SeriesList::new();
        list.set_count(10_000);
        assert_eq!(list.len(), MAX_SERIES);
    }

    #[test]
    fn switching_kind_keeps_shared_fields_only() {
        let mut row = SeriesRow::with_kind(SeriesKind::HighLow);
        row.columns_mut().set("X", "Date");
        row.columns_mut().set("High", "Max");
        row.set_kind(Some(SeriesKind::Line));
        assert_eq!(row.columns().get("X"), Some("Date"));
        assert_eq!(row.columns().get("High"), None);
    }
}
