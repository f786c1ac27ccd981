//! View model produced for the currently selected record.
//!
//! Everything here is a pure function of the table, the pager and the mode's
//! [`ViewSpec`]; the web layer only turns these structs into HTML or JSON.

use crate::dates::{format_timestamp, parse_timestamp};
use crate::fields::{Layout, Tone, ViewMode, ViewSpec};
use crate::pager::Pager;
use crate::resolver::{FieldValue, resolve};
use crate::table::{CellValue, MISSING_MARKER, Table};
use serde::Serialize;

/// Content of one rendered section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SectionBody {
    Text { text: String },
    Fallback { tone: Tone, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub key: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub layout: Layout,
    pub body: SectionBody,
}

/// A fully resolved record ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub position: usize,
    pub total: usize,
    pub identity: String,
    pub header: String,
    pub group: String,
    pub date: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub sections: Vec<SectionView>,
}

/// What a view mode currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Screen {
    AwaitingUpload { message: String },
    Failed { message: String },
    NoEntries { message: String },
    Record(RecordView),
}

pub const NO_ENTRIES_MESSAGE: &str = "The uploaded file has no entries.";

/// Render the record the pager points at.
///
/// Returns `None` when the pager is empty or out of step with the table.
pub fn render_record(spec: &ViewSpec, table: &Table, pager: &Pager) -> Option<RecordView> {
    let index = pager.index()?;
    let row = table.row(index)?;
    let total = table.len();
    let position = index + 1;

    let identity = resolve(row, spec.identity).display();
    let sections = spec
        .sections
        .iter()
        .map(|field| {
            let body = match resolve(row, field.synonyms) {
                FieldValue::Present(value) => SectionBody::Text {
                    text: value.to_string(),
                },
                FieldValue::Missing => SectionBody::Fallback {
                    tone: field.fallback.tone,
                    message: field.fallback.message.to_string(),
                },
            };
            SectionView {
                key: field.key,
                icon: field.icon,
                title: field.title,
                layout: field.layout,
                body,
            }
        })
        .collect();

    Some(RecordView {
        position,
        total,
        header: header_line(position, total, &identity),
        identity,
        group: resolve(row, spec.group).display(),
        date: display_date(resolve(row, spec.timestamp)),
        has_previous: pager.has_previous(),
        has_next: pager.has_next(),
        sections,
    })
}

/// `Fellow {position} of {total}: {identity}`
pub fn header_line(position: usize, total: usize, identity: &str) -> String {
    format!("Fellow {} of {}: {}", position, total, identity)
}

/// Format the timestamp field: parsed dates get the long format, text goes
/// through the same parser and is shown raw when it does not parse.
pub fn display_date(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Missing => MISSING_MARKER.to_string(),
        FieldValue::Present(CellValue::Date(timestamp)) => format_timestamp(timestamp),
        FieldValue::Present(CellValue::Text(text)) => parse_timestamp(text).display(),
        FieldValue::Present(other) => other.to_string(),
    }
}

/// Build the screen for a mode from its current state.
pub fn screen(mode: ViewMode, table: Option<&Table>, pager: &Pager, error: Option<&str>) -> Screen {
    if let Some(message) = error {
        return Screen::Failed {
            message: message.to_string(),
        };
    }
    let Some(table) = table else {
        return Screen::AwaitingUpload {
            message: mode.upload_prompt().to_string(),
        };
    };
    match render_record(mode.spec(), table, pager) {
        Some(record) => Screen::Record(record),
        None => Screen::NoEntries {
            message: NO_ENTRIES_MESSAGE.to_string(),
        },
    }
}
