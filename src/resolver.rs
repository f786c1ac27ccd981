use crate::table::{CellValue, MISSING_MARKER, Row};

/// Result of looking a field up through its synonym list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Present(&'a CellValue),
    Missing,
}

impl<'a> FieldValue<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    pub fn value(&self) -> Option<&'a CellValue> {
        match self {
            FieldValue::Present(value) => Some(value),
            FieldValue::Missing => None,
        }
    }

    /// Display text; `MISSING` shows as `N/A`.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Present(value) => value.to_string(),
            FieldValue::Missing => MISSING_MARKER.to_string(),
        }
    }
}

/// Resolve a field through an ordered list of acceptable column names.
///
/// The first synonym whose column exists in `row` and holds a non-empty value
/// wins. Columns that exist but are empty are skipped, so a later synonym can
/// still supply the value.
///
/// # Examples
/// ```
/// use notes_viewer::resolver::{resolve, FieldValue};
/// use notes_viewer::table::{CellValue, Row};
///
/// let row: Row = [
///     ("Blockers", CellValue::Missing),
///     ("Current blockers", CellValue::Text("CI is flaky".into())),
/// ]
/// .into_iter()
/// .collect();
///
/// let value = resolve(&row, &["What blockers are you currently encountering?", "Blockers", "Current blockers"]);
/// assert_eq!(value.display(), "CI is flaky");
/// assert!(resolve(&row, &["Shoutouts"]).is_missing());
/// ```
pub fn resolve<'a>(row: &'a Row, synonyms: &[&str]) -> FieldValue<'a> {
    synonyms
        .iter()
        .filter_map(|name| row.get(name))
        .find(|value| !value.is_empty())
        .map_or(FieldValue::Missing, FieldValue::Present)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells.iter().cloned().collect()
    }

    #[test]
    fn first_synonym_wins_when_several_match() {
        let row = row(&[
            ("Full name", CellValue::Text("Ann Lee".into())),
            ("Name", CellValue::Text("Ann".into())),
        ]);
        let value = resolve(&row, &["User full name", "Full name", "Name"]);
        assert_eq!(value, FieldValue::Present(&CellValue::Text("Ann Lee".into())));
    }

    #[test]
    fn synonym_order_not_column_order_decides() {
        let row = row(&[
            ("Group", CellValue::Text("Beta".into())),
            ("Groups", CellValue::Text("Alpha".into())),
        ]);
        assert_eq!(resolve(&row, &["Groups", "Group"]).display(), "Alpha");
    }

    #[test]
    fn empty_columns_fall_through_to_later_synonyms() {
        let row = row(&[
            ("Achievements", CellValue::Missing),
            ("Progress", CellValue::Text("  ".into())),
        ]);
        assert!(resolve(&row, &["Achievements"]).is_missing());
        assert!(resolve(&row, &["Achievements", "Progress"]).is_missing());

        let row = row_with_fallback();
        assert_eq!(resolve(&row, &["Shoutouts", "Shout-outs"]).display(), "Thanks Bo!");
    }

    fn row_with_fallback() -> Row {
        row(&[
            ("Shoutouts", CellValue::Missing),
            ("Shout-outs", CellValue::Text("Thanks Bo!".into())),
        ])
    }

    #[test]
    fn missing_when_no_synonym_exists() {
        let row = row(&[("Name", CellValue::Text("Ann".into()))]);
        let value = resolve(&row, &["Blockers", "Current blockers"]);
        assert!(value.is_missing());
        assert_eq!(value.display(), "N/A");
        assert_eq!(value.value(), None);
    }

    #[test]
    fn empty_synonym_list_is_missing() {
        let row = row(&[("Name", CellValue::Text("Ann".into()))]);
        assert!(resolve(&row, &[]).is_missing());
    }

    #[test]
    fn numbers_are_present_values() {
        let row = row(&[("Groups", CellValue::Number(7.0))]);
        assert_eq!(resolve(&row, &["Groups"]).display(), "7");
    }
}
