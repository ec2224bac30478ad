use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};

/// A single spreadsheet cell as delivered by the backend. Native number and
/// date cells survive as typed values; everything else arrives as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// The cell the way a spreadsheet UI would display it. Empty cells
    /// display as the empty string.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%d/%m/%Y").to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Row lookup that treats out-of-range columns as empty cells, so short rows
/// never panic the extractors.
pub fn cell_at(row: &[Cell], idx: usize) -> &Cell {
    static EMPTY: Cell = Cell::Empty;
    row.get(idx).unwrap_or(&EMPTY)
}

/// Read-only access to a tabular workbook.
///
/// Each call delivers one full-sheet snapshot; implementations must not cache
/// between calls, so every query sees the spreadsheet as it currently is.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Names of all sheets in the workbook, in workbook order.
    async fn sheet_names(&self) -> Result<Vec<String>>;

    /// All rows of the named sheet, row 0 = headers.
    /// Returns None when the sheet does not exist.
    async fn worksheet_rows(&self, name: &str) -> Result<Option<Vec<Vec<Cell>>>>;
}

/// Workbook-file backend. Holds only the path; the file is re-read in full on
/// every call.
pub struct XlsxSheetSource {
    path: PathBuf,
}

impl XlsxSheetSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn open(&self) -> Result<Xlsx<Cursor<Vec<u8>>>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Cannot read workbook: {}", self.path.display()))?;
        Xlsx::new(Cursor::new(bytes))
            .with_context(|| format!("Cannot open workbook: {}", self.path.display()))
    }
}

#[async_trait]
impl SheetSource for XlsxSheetSource {
    async fn sheet_names(&self) -> Result<Vec<String>> {
        let workbook = self.open().await?;
        Ok(workbook.sheet_names().to_vec())
    }

    async fn worksheet_rows(&self, name: &str) -> Result<Option<Vec<Vec<Cell>>>> {
        let mut workbook = self.open().await?;
        if !workbook.sheet_names().iter().any(|s| s == name) {
            return Ok(None);
        }
        let range = match workbook.worksheet_range(name) {
            Ok(r) => r,
            Err(_) => return Ok(None),
        };
        let rows = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();
        Ok(Some(rows))
    }
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(Cell::Date)
            .unwrap_or(Cell::Empty),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

/// Excel serial date conversion using the 1899-12-30 base (common convention).
fn excel_serial_to_date(v: f64) -> Option<NaiveDate> {
    if !v.is_finite() {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(v.floor() as i64))
}

/// In-memory backend holding literal rows per sheet. Used by tests and by
/// callers that already have the table in hand.
#[derive(Debug, Default)]
pub struct MemorySheetSource {
    sheets: Vec<(String, Vec<Vec<Cell>>)>,
}

impl MemorySheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        self.sheets.push((name.into(), rows));
        self
    }
}

#[async_trait]
impl SheetSource for MemorySheetSource {
    async fn sheet_names(&self) -> Result<Vec<String>> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn worksheet_rows(&self, name: &str) -> Result<Option<Vec<Vec<Cell>>>> {
        Ok(self
            .sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, rows)| rows.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excel_serial_covers_the_epoch_quirk() {
        // Serial 1 is 1899-12-31 under the 1899-12-30 base.
        assert_eq!(
            excel_serial_to_date(1.0),
            NaiveDate::from_ymd_opt(1899, 12, 31)
        );
        // A modern date, time-of-day fraction truncated.
        assert_eq!(
            excel_serial_to_date(45658.73),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn convert_cell_keeps_native_types() {
        assert_eq!(convert_cell(&Data::Float(150.5)), Cell::Number(150.5));
        assert_eq!(convert_cell(&Data::Int(50)), Cell::Number(50.0));
        assert_eq!(
            convert_cell(&Data::String("Ana".into())),
            Cell::Text("Ana".into())
        );
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn display_renders_like_a_spreadsheet() {
        assert_eq!(Cell::Number(12345678900.0).display(), "12345678900");
        assert_eq!(Cell::Number(150.5).display(), "150.5");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()).display(),
            "01/01/2020"
        );
        assert_eq!(Cell::Empty.display(), "");
    }

    #[test]
    fn cell_at_pads_short_rows() {
        let row = vec![Cell::Text("a".into())];
        assert_eq!(cell_at(&row, 0), &Cell::Text("a".into()));
        assert_eq!(cell_at(&row, 5), &Cell::Empty);
    }

    #[tokio::test]
    async fn memory_source_reports_missing_sheets_as_none() {
        let source = MemorySheetSource::new()
            .with_sheet("Ativos", vec![vec![Cell::Text("CPF".into())]]);

        assert_eq!(source.sheet_names().await.unwrap(), vec!["Ativos"]);
        assert!(source.worksheet_rows("Ativos").await.unwrap().is_some());
        assert!(source.worksheet_rows("Expirados").await.unwrap().is_none());
    }
}
