//! The data table loaded from CSV: a header row of column names plus text cells.

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// First record is the header. Records longer than the header add columns named
    /// `Column{n}` (1-based); every row is padded to the final column count.
    pub fn from_records(records: Vec<Vec<String>>) -> Self {
        let mut records = records.into_iter();
        let mut table = Self::new(records.next().unwrap_or_default());
        for record in records {
            table.push_row(record);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    pub fn push_row(&mut self, mut cells: Vec<String>) {
        while self.columns.len() < cells.len() {
            self.push_column_named(format!("Column{}", self.columns.len() + 1));
        }
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Append a column. An empty or duplicate name gets a generated `Column{n}` one.
    pub fn add_column(&mut self, name: &str) -> &str {
        let name = name.trim();
        let name = if name.is_empty() || self.column_index(name).is_some() {
            format!("Column{}", self.columns.len() + 1)
        } else {
            name.to_string()
        };
        self.push_column_named(name);
        self.columns.last().map(String::as_str).unwrap_or_default()
    }

    fn push_column_named(&mut self, name: String) {
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    pub fn set_cell(&mut self, row: usize, column: usize, text: &str) -> Result<()> {
        let columns = self.columns.len();
        let Some(cells) = self.rows.get_mut(row) else {
            bail!("row {row} is out of range ({} rows)", self.rows.len());
        };
        let Some(cell) = cells.get_mut(column) else {
            bail!("column {column} is out of range ({columns} columns)");
        };
        *cell = text.trim().to_string();
        Ok(())
    }
}

/// Parse CSV text. Cells are trimmed, rows may differ in length, blank lines are skipped.
pub fn parse_csv<R: Read>(reader: R) -> Result<DataTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        records.push(rec.iter().map(str::to_string).collect::<Vec<_>>());
    }
    Ok(DataTable::from_records(records))
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<DataTable> {
    let path = path.as_ref();
    let file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table = parse_csv(file).with_context(|| format!("reading {}", path.display()))?;
    if table.column_count() == 0 {
        bail!("{} has no header row", path.display());
    }
    log::info!(
        "loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}
