//! The application workspace: registry wiring at startup, the loaded table, the
//! series list, and the user actions that tie them together.
//!
//! Front-ends (CLI and desktop) drive everything through [`Workspace`] and wrap
//! each action in [`checked`] so failures become a [`Notice`] instead of a crash.

use crate::color::Color;
use crate::descriptor::{DescriptorError, DescriptorRegistry, Value};
use crate::export::{ExportOptions, UnsupportedFormat, export_chart};
use crate::grid::{GridEdit, GridRow, PropertyGrid};
use crate::mapping::{ColumnMappingConverter, ColumnNames};
use crate::rows::{SeriesList, SeriesRow};
use crate::series::install_series_types;
use crate::table::{self, DataTable};
use crate::viz::{Chart, ChartError};
use anyhow::Result;
use std::any::Any;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Install every describable type and wire the converters that need shared state.
pub fn install_descriptors(registry: &DescriptorRegistry, names: &ColumnNames) {
    registry
        .install::<Color>()
        .set_converter(Some(Arc::new(Color::converter())));
    install_series_types(registry);
    registry.install::<SeriesList>();
    if let Some(columns) = registry.install::<SeriesRow>().property("Columns") {
        columns.set_converter(Some(Arc::new(ColumnMappingConverter::new(names.clone()))));
    }
    registry.install::<ExportOptions>();
}

pub struct Workspace {
    registry: Arc<DescriptorRegistry>,
    grid: PropertyGrid,
    names: ColumnNames,
    table: DataTable,
    series: SeriesList,
    title: String,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        let registry = Arc::new(DescriptorRegistry::with_default_converters());
        let names = ColumnNames::new();
        install_descriptors(&registry, &names);
        let mut grid = PropertyGrid::new(Arc::clone(&registry));
        grid.expand("SelectedSeries");
        Self {
            registry,
            grid,
            names,
            table: DataTable::default(),
            series: SeriesList::new(),
            title: String::new(),
        }
    }

    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        &self.registry
    }

    pub fn grid(&self) -> &PropertyGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PropertyGrid {
        &mut self.grid
    }

    pub fn column_names(&self) -> &ColumnNames {
        &self.names
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn series(&self) -> &SeriesList {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut SeriesList {
        &mut self.series
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Replace the table from a CSV file. A failed load leaves the current table.
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let table = table::load_csv(path)?;
        self.set_table(table);
        Ok(())
    }

    pub fn set_table(&mut self, table: DataTable) {
        self.names.replace(table.columns().to_vec());
        self.table = table;
        self.refresh_data();
    }

    pub fn edit_cell(&mut self, row: usize, column: usize, text: &str) -> Result<()> {
        self.table.set_cell(row, column, text)?;
        self.refresh_data();
        Ok(())
    }

    pub fn add_column(&mut self, name: &str) {
        let name = self.table.add_column(name).to_string();
        self.names.push(&name);
    }

    pub fn add_row(&mut self) {
        self.table.push_row(Vec::new());
    }

    /// Rebuild every series' items from the table.
    pub fn refresh_data(&mut self) {
        self.series.add_data(&self.registry, &self.table);
    }

    pub fn property_rows(&self) -> Result<Vec<GridRow>, DescriptorError> {
        self.grid.rows(Some(&self.series as &dyn Any))
    }

    /// Edit a series-list property by path; changed values re-apply the data.
    pub fn edit_property(&mut self, path: &str, text: &str) -> Result<GridEdit, DescriptorError> {
        let edit = self.grid.set_text(&mut self.series, path, text)?;
        if edit.changed {
            self.refresh_data();
        }
        Ok(edit)
    }

    /// Like [`edit_property`](Self::edit_property), but unconvertible text is an error.
    pub fn try_edit_property(
        &mut self,
        path: &str,
        text: &str,
    ) -> Result<GridEdit, DescriptorError> {
        let edit = self.grid.try_set_text(&mut self.series, path, text)?;
        if edit.changed {
            self.refresh_data();
        }
        Ok(edit)
    }

    pub fn set_property_value(
        &mut self,
        path: &str,
        value: Value,
    ) -> Result<GridEdit, DescriptorError> {
        let edit = self.grid.set_value(&mut self.series, path, value)?;
        if edit.changed {
            self.refresh_data();
        }
        Ok(edit)
    }

    pub fn reset_property(&mut self, path: &str) -> Result<GridEdit, DescriptorError> {
        let edit = self.grid.reset(&mut self.series, path)?;
        if edit.changed {
            self.refresh_data();
        }
        Ok(edit)
    }

    pub fn chart(&self) -> Chart {
        Chart::from_list(&self.series).with_title(&self.title)
    }

    pub fn export_options<P: AsRef<Path>>(&self, path: P) -> Result<ExportOptions> {
        ExportOptions::for_path(path.as_ref())
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, options: &ExportOptions) -> Result<()> {
        export_chart(&self.chart(), path.as_ref(), options)
    }
}

/// A failure reported to the user: a short category plus the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub category: String,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

impl Notice {
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            category: error_category(err).to_string(),
            message: format!("{err:#}"),
        }
    }
}

/// Category of the deepest recognised cause in the chain.
pub fn error_category(err: &anyhow::Error) -> &'static str {
    let mut category = "Error";
    for cause in err.chain() {
        if cause.downcast_ref::<csv::Error>().is_some() {
            return "CSV error";
        } else if cause.downcast_ref::<std::io::Error>().is_some() {
            category = "I/O error";
        } else if cause.downcast_ref::<DescriptorError>().is_some() {
            category = "Property error";
        } else if cause.downcast_ref::<UnsupportedFormat>().is_some() {
            category = "Export error";
        } else if cause.downcast_ref::<ChartError>().is_some() {
            category = "Chart error";
        }
    }
    category
}

/// Run a user action; any error becomes a logged [`Notice`].
pub fn checked<T>(action: impl FnOnce() -> Result<T>) -> Result<T, Notice> {
    action().map_err(|err| {
        let notice = Notice::from_error(&err);
        log::warn!("{notice}");
        notice
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn io_failures_are_categorised() {
        let err = std::fs::read("/definitely/not/here.csv")
            .context("loading table")
            .unwrap_err();
        assert_eq!(error_category(&err), "I/O error");
    }

    #[test]
    fn checked_passes_values_through() {
        assert_eq!(checked(|| Ok(3)).unwrap(), 3);
        let notice = checked::<()>(|| Err(anyhow::anyhow!("boom"))).unwrap_err();
        assert_eq!(notice.category, "Error");
        assert_eq!(notice.message, "boom");
    }
}
