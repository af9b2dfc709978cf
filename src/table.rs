//! In-memory table model and spreadsheet loading.
//!
//! Row 0 holds the header labels; rows 1.. hold data. Column alignment is
//! positional: a missing cell reads as an empty string and a missing header
//! is synthesized as `"Col {n+1}"`.
//!
//! Loading uses the calamine crate for XLSX/XLS/ODS workbooks and the csv
//! crate for CSV files; both feed the same string-cell representation.

use crate::error::{Error, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Parsed tabular data, replaced wholesale on each load and read-only
/// during a generation run.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table directly from rows. Row 0 is the header row.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Load a table from a file, dispatching on the extension.
    ///
    /// `.csv` goes through the csv crate; everything else is handed to
    /// calamine's auto-detecting workbook opener.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Self::from_csv_path(path),
            _ => Self::from_workbook_path(path),
        }
    }

    /// Load the first worksheet of a workbook file.
    pub fn from_workbook_path(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| Error::Table(format!("Failed to open workbook: {}", e)))?;
        Self::first_sheet(&mut workbook)
    }

    fn first_sheet<RS: std::io::Read + std::io::Seek>(
        workbook: &mut calamine::Sheets<RS>,
    ) -> Result<Self> {
        let sheet_names = workbook.sheet_names().to_vec();
        let first = sheet_names
            .first()
            .ok_or_else(|| Error::Table("No sheets found in workbook".to_string()))?;
        let range = workbook
            .worksheet_range(first)
            .map_err(|e| Error::Table(format!("Failed to read sheet '{}': {}", first, e)))?;
        Ok(Self::from_range(&range))
    }

    fn from_range(range: &Range<Data>) -> Self {
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        Self { rows }
    }

    /// Load a CSV file. All records are kept verbatim; the first becomes
    /// the header row.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| Error::Table(format!("Failed to open CSV: {}", e)))?;
        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::Table(format!("CSV parse error: {}", e)))?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        Ok(Self { rows })
    }

    /// Header labels (row 0), empty when no rows are loaded.
    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of data rows (rows beyond the header).
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// A full data row by 1-based index, empty when out of range.
    pub fn row(&self, row: usize) -> &[String] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Header label for a 0-based column, synthesizing `"Col {n+1}"` when
    /// the header row is shorter than the data row.
    pub fn label(&self, col: usize) -> String {
        match self.headers().get(col) {
            Some(h) => h.clone(),
            None => format!("Col {}", col + 1),
        }
    }

    /// Cell value at (1-based row, 0-based column); missing cells read as
    /// empty strings.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of columns a row render must cover: the longer of the header
    /// row and the data row.
    pub fn column_span(&self, row: usize) -> usize {
        self.headers().len().max(self.row(row).len())
    }

    /// First cell of a data row when present and non-empty.
    pub fn first_cell(&self, row: usize) -> Option<&str> {
        self.row(row).first().map(String::as_str).filter(|s| !s.is_empty())
    }
}

/// Convert a calamine cell value to a display string.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Trim trailing zeros from whole floats
            if f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                format!("{}", f)
            }
        },
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(vec![
            vec!["Name".to_string(), "Age".to_string()],
            vec!["Ana".to_string(), "30".to_string(), "extra".to_string()],
            vec!["Luis".to_string()],
        ])
    }

    #[test]
    fn test_data_row_count() {
        assert_eq!(sample().data_row_count(), 2);
        assert_eq!(Table::default().data_row_count(), 0);
        let header_only = Table::from_rows(vec![vec!["A".to_string()]]);
        assert_eq!(header_only.data_row_count(), 0);
    }

    #[test]
    fn test_label_synthesized_for_missing_header() {
        let table = sample();
        assert_eq!(table.label(0), "Name");
        assert_eq!(table.label(2), "Col 3");
    }

    #[test]
    fn test_value_missing_cell_is_empty() {
        let table = sample();
        assert_eq!(table.value(1, 1), "30");
        assert_eq!(table.value(2, 1), "");
        assert_eq!(table.value(99, 0), "");
    }

    #[test]
    fn test_column_span_covers_longer_side() {
        let table = sample();
        assert_eq!(table.column_span(1), 3); // data row longer than header
        assert_eq!(table.column_span(2), 2); // header longer than data row
    }

    #[test]
    fn test_first_cell_empty_is_none() {
        let table = Table::from_rows(vec![
            vec!["H".to_string()],
            vec!["".to_string(), "x".to_string()],
        ]);
        assert_eq!(table.first_cell(1), None);
        assert_eq!(sample().first_cell(1), Some("Ana"));
    }

    #[test]
    fn test_cell_to_string_variants() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Float(10.0)), "10");
        assert_eq!(cell_to_string(&Data::Float(1.25)), "1.25");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn test_csv_reader() {
        let data = "Name,Age\nAna,30\nLuis,41\n";
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());
        let table = Table::from_csv_reader(reader).unwrap();
        assert_eq!(table.headers(), ["Name".to_string(), "Age".to_string()]);
        assert_eq!(table.data_row_count(), 2);
        assert_eq!(table.value(2, 0), "Luis");
    }
}
