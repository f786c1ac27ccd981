use crate::dates::{ParsedTimestamp, parse_timestamp};
use crate::error::{Result, ViewerError};
use crate::table::{CellValue, Row, Table};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;

/// Column whose values are coerced to timestamps and used for ordering.
pub const DATE_COLUMN: &str = "Date";

/// Cell contents treated as absent, as spreadsheet exports write them.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load an uploaded file into a table
///
/// Checks that the upload carries a `.csv` name and is not empty, then parses
/// it with [`from_csv_bytes`].
///
/// # Arguments
/// * `file_name` - Name the browser sent for the upload, if any
/// * `bytes` - Raw file contents
///
/// # Returns
/// * `Result<Table>` - The loaded table or an upload error
pub fn load_upload(file_name: Option<&str>, bytes: &[u8]) -> Result<Table> {
    if let Some(name) = file_name {
        check_extension(name)?;
    }
    if bytes.is_empty() {
        return Err(ViewerError::EmptyUpload);
    }

    let table = from_csv_bytes(bytes)?;
    info!(
        "Loaded {} with {} rows and {} columns",
        file_name.unwrap_or("upload"),
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Reject uploads whose name does not end in `.csv` (any case).
pub fn check_extension(file_name: &str) -> Result<()> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => Ok(()),
        _ => Err(ViewerError::UnsupportedFile(file_name.to_string())),
    }
}

/// Parse comma-separated bytes into a table
///
/// Column names are trimmed, cells are coerced to typed values, and when a
/// `Date` column exists its cells become timestamps and the rows are sorted
/// ascending by them. Rows whose date is missing or unparseable sort first and
/// keep their file order; the sort is stable.
///
/// # Arguments
/// * `bytes` - Raw UTF-8 file contents, optionally with a byte-order mark
///
/// # Returns
/// * `Result<Table>` - The loaded table or a parse error
///
/// # Examples
/// ```
/// use notes_viewer::loader::from_csv_bytes;
///
/// let table = from_csv_bytes(b"Name,Date\nAnn,2024-01-02\nBo,2024-01-01\n").unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.row(0).unwrap().get("Name").unwrap().to_string(), "Bo");
/// ```
pub fn from_csv_bytes(bytes: &[u8]) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
        return Err(ViewerError::Parse("no columns to parse from file".to_string()));
    }
    let columns = normalize_headers(&headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_blank_line(&record) {
            continue;
        }
        if record.len() > columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ViewerError::Parse(format!(
                "expected {} fields in line {}, saw {}",
                columns.len(),
                line,
                record.len()
            )));
        }
        rows.push(build_row(&columns, &record));
    }

    if columns.iter().any(|c| c == DATE_COLUMN) {
        sort_by_date(&mut rows);
    } else {
        debug!("No {} column, keeping file order", DATE_COLUMN);
    }

    Ok(Table::new(columns, rows))
}

/// Trim header names and disambiguate duplicates with `.1`, `.2`, ...
fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());

    for header in headers.iter() {
        let base = header.trim().to_string();
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}

// A blank line is one without any delimiter whose text is only whitespace,
// whatever the column count. A line of bare delimiters is a row of missing
// values.
fn is_blank_line(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty()) && record.len() <= 1
}

fn build_row(columns: &[String], record: &StringRecord) -> Row {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let value = match record.get(i) {
                Some(raw) if column == DATE_COLUMN => coerce_date(raw),
                Some(raw) => coerce_cell(raw),
                None => CellValue::Missing,
            };
            (column.clone(), value)
        })
        .collect()
}

/// Coerce one raw cell into a typed value.
///
/// Null markers become `Missing`, finite numbers become `Number`, and
/// everything else is kept as text.
pub fn coerce_cell(raw: &str) -> CellValue {
    if NULL_MARKERS.contains(&raw.trim()) {
        return CellValue::Missing;
    }
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(raw.to_string()),
    }
}

/// Coerce a `Date` cell; unparseable values become `Missing`.
fn coerce_date(raw: &str) -> CellValue {
    if NULL_MARKERS.contains(&raw.trim()) {
        return CellValue::Missing;
    }
    match parse_timestamp(raw) {
        ParsedTimestamp::Parsed(timestamp) => CellValue::Date(timestamp),
        ParsedTimestamp::Unparsed(_) => {
            debug!("Unparseable {} value '{}'", DATE_COLUMN, raw);
            CellValue::Missing
        }
    }
}

// `None < Some(_)`, so rows without a date lead; sort_by_key is stable.
fn sort_by_date(rows: &mut [Row]) {
    rows.sort_by_key(|row| row.get(DATE_COLUMN).and_then(CellValue::as_date).copied());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(table: &Table) -> Vec<String> {
        table
            .rows()
            .iter()
            .map(|row| row.get("Name").unwrap().to_string())
            .collect()
    }

    #[test]
    fn sorts_rows_ascending_by_date() {
        let table = from_csv_bytes(b"Name,Date\nAnn,2024-01-02\nBo,2024-01-01\nCy,2024-01-03\n")
            .unwrap();
        assert_eq!(names(&table), ["Bo", "Ann", "Cy"]);
    }

    #[test]
    fn missing_dates_sort_first_in_file_order() {
        let csv = b"Name,Date\nAnn,2024-01-02\nBo,not a date\nCy,\nDee,2024-01-01\n";
        let table = from_csv_bytes(csv).unwrap();
        assert_eq!(names(&table), ["Bo", "Cy", "Dee", "Ann"]);
        assert_eq!(table.row(0).unwrap().get("Date"), Some(&CellValue::Missing));
    }

    #[test]
    fn equal_dates_keep_file_order() {
        let csv = b"Name,Date\nAnn,2024-01-01\nBo,2024-01-01\nCy,2023-12-31\n";
        let table = from_csv_bytes(csv).unwrap();
        assert_eq!(names(&table), ["Cy", "Ann", "Bo"]);
    }

    #[test]
    fn without_date_column_order_is_preserved() {
        let csv = b"Name,Timestamp\nAnn,2024-01-02\nBo,2024-01-01\n";
        let table = from_csv_bytes(csv).unwrap();
        assert_eq!(names(&table), ["Ann", "Bo"]);
        assert_eq!(
            table.row(0).unwrap().get("Timestamp"),
            Some(&CellValue::Text("2024-01-02".into()))
        );
    }

    #[test]
    fn date_column_match_is_case_sensitive() {
        let csv = b"Name,date\nAnn,2024-01-02\nBo,2024-01-01\n";
        let table = from_csv_bytes(csv).unwrap();
        assert_eq!(names(&table), ["Ann", "Bo"]);
    }

    #[test]
    fn header_names_are_trimmed() {
        let csv = b" Full name ,  Date\nAnn,2024-01-02\n";
        let table = from_csv_bytes(csv).unwrap();
        assert_eq!(table.columns(), ["Full name", "Date"]);
        assert!(table.row(0).unwrap().get("Date").unwrap().as_date().is_some());
    }

    #[test]
    fn duplicate_headers_are_suffixed() {
        let csv = b"Name,Name ,Name\nAnn,Bo,Cy\n";
        let table = from_csv_bytes(csv).unwrap();
        assert_eq!(table.columns(), ["Name", "Name.1", "Name.2"]);
        assert_eq!(table.row(0).unwrap().get("Name.1").unwrap().to_string(), "Bo");
    }

    #[test]
    fn cells_are_coerced() {
        assert_eq!(coerce_cell(""), CellValue::Missing);
        assert_eq!(coerce_cell("N/A"), CellValue::Missing);
        assert_eq!(coerce_cell("nan"), CellValue::Missing);
        assert_eq!(coerce_cell("42"), CellValue::Number(42.0));
        assert_eq!(coerce_cell("inf"), CellValue::Text("inf".into()));
        assert_eq!(
            coerce_cell(" shipped the thing "),
            CellValue::Text(" shipped the thing ".into())
        );
    }

    #[test]
    fn short_rows_are_padded_with_missing() {
        let table = from_csv_bytes(b"Name,Group,Blockers\nAnn,Alpha\n").unwrap();
        assert_eq!(table.row(0).unwrap().get("Blockers"), Some(&CellValue::Missing));
    }

    #[test]
    fn long_rows_are_a_parse_error() {
        let err = from_csv_bytes(b"Name,Group\nAnn,Alpha,extra\n").unwrap_err();
        assert!(matches!(err, ViewerError::Parse(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(from_csv_bytes(b""), Err(ViewerError::Parse(_))));
        assert!(matches!(from_csv_bytes(b"\n\n"), Err(ViewerError::Parse(_))));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let table = from_csv_bytes(b"Name,Date\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn non_utf8_input_is_rejected() {
        let err = from_csv_bytes(b"Name\n\xff\xfe\n").unwrap_err();
        assert!(matches!(err, ViewerError::Utf8(_)));
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let table = from_csv_bytes(b"\xEF\xBB\xBFName\nAnn\n").unwrap();
        assert_eq!(table.columns(), ["Name"]);
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let csv = b"Name,Blockers\nAnn,\"waiting on review, then deploy\nand docs\"\n";
        let table = from_csv_bytes(csv).unwrap();
        assert_eq!(
            table.row(0).unwrap().get("Blockers").unwrap().to_string(),
            "waiting on review, then deploy\nand docs"
        );
    }

    #[test]
    fn uploads_must_be_named_csv() {
        assert!(check_extension("notes.csv").is_ok());
        assert!(check_extension("NOTES.CSV").is_ok());
        assert!(matches!(
            check_extension("notes.xlsx"),
            Err(ViewerError::UnsupportedFile(_))
        ));
        assert!(matches!(check_extension("notes"), Err(ViewerError::UnsupportedFile(_))));
    }

    #[test]
    fn empty_upload_is_rejected() {
        assert!(matches!(
            load_upload(Some("notes.csv"), b""),
            Err(ViewerError::EmptyUpload)
        ));
    }

    #[test]
    fn whitespace_only_lines_are_skipped_for_any_width() {
        let one = from_csv_bytes(b"Name\nAnn\n   \nBo\n").unwrap();
        assert_eq!(one.len(), 2);

        let wide = from_csv_bytes(b"Name,Group\nAnn,A\n \t \nBo,B\n").unwrap();
        assert_eq!(wide.len(), 2);
    }

    #[test]
    fn delimiter_only_lines_are_rows() {
        let table = from_csv_bytes(b"Name,Group\nAnn,A\n,\nBo,B\n").unwrap();
        assert_eq!(table.len(), 3);
        let blank = table.row(1).unwrap();
        assert!(blank.get("Name").unwrap().is_empty());
        assert!(blank.get("Group").unwrap().is_empty());
    }
}
