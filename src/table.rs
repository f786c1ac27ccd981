use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;

/// Marker shown wherever a value is absent.
pub const MISSING_MARKER: &str = "N/A";

/// A single typed spreadsheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Missing,
}

impl CellValue {
    /// Whether the value carries no content (absent, or only whitespace).
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Date(_) => false,
        }
    }

    pub fn as_date(&self) -> Option<&NaiveDateTime> {
        match self {
            CellValue::Date(timestamp) => Some(timestamp),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            // Whole numbers print without a trailing ".0".
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(timestamp) => write!(f, "{}", timestamp.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Missing => f.write_str(MISSING_MARKER),
        }
    }
}

/// One uploaded record: normalized column name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    /// Value of `column`, or `None` when the row has no such column.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Row {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Rows loaded from one uploaded file, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(-12.0).to_string(), "-12");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn dates_and_missing_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2024-01-02 09:05:00");
        assert_eq!(CellValue::Missing.to_string(), "N/A");
    }

    #[test]
    fn blank_text_counts_as_empty() {
        assert!(CellValue::Missing.is_empty());
        assert!(CellValue::Text("   ".into()).is_empty());
        assert!(!CellValue::Text("done".into()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn row_lookup_is_exact() {
        let row: Row = [("Name", CellValue::Text("Ann".into()))].into_iter().collect();
        assert!(row.has_column("Name"));
        assert!(row.get("name").is_none());
        assert_eq!(row.get("Name"), Some(&CellValue::Text("Ann".into())));
    }
}
