use crate::error::Result;
use crate::fields::{Layout, Tone, ViewMode};
use crate::markdown;
use crate::view::{RecordView, Screen, SectionBody};
use handlebars::Handlebars;
use serde::Serialize;

const VIEWER_TEMPLATE: &str = "viewer";

#[derive(Serialize)]
struct ModeLink {
    slug: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct Notice {
    tone: &'static str,
    message: String,
}

#[derive(Serialize)]
struct SectionContext {
    icon: &'static str,
    title: &'static str,
    half: bool,
    body_html: Option<String>,
    fallback: Option<Notice>,
}

#[derive(Serialize)]
struct RecordContext {
    header: String,
    group: String,
    date: String,
    has_previous: bool,
    has_next: bool,
    sections: Vec<SectionContext>,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'static str,
    mode: &'static str,
    upload_label: &'static str,
    modes: Vec<ModeLink>,
    file_name: Option<&'a str>,
    notice: Option<Notice>,
    record: Option<RecordContext>,
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "info",
        Tone::Success => "success",
        Tone::Warning => "warning",
    }
}

fn record_context(record: &RecordView) -> RecordContext {
    let sections = record
        .sections
        .iter()
        .map(|section| {
            let (body_html, fallback) = match &section.body {
                SectionBody::Text { text } => (Some(markdown::to_html(text)), None),
                SectionBody::Fallback { tone, message } => (
                    None,
                    Some(Notice {
                        tone: tone_class(*tone),
                        message: message.clone(),
                    }),
                ),
            };
            SectionContext {
                icon: section.icon,
                title: section.title,
                half: section.layout == Layout::Half,
                body_html,
                fallback,
            }
        })
        .collect();

    RecordContext {
        header: record.header.clone(),
        group: record.group.clone(),
        date: record.date.clone(),
        has_previous: record.has_previous,
        has_next: record.has_next,
        sections,
    }
}

/// HTML renderer for the viewer page.
pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string(VIEWER_TEMPLATE, include_str!("./static/viewer.hbs"))?;
        Ok(PageRenderer { registry })
    }

    /// Render the full page for `mode` showing `screen`.
    pub fn render(&self, mode: ViewMode, screen: &Screen, file_name: Option<&str>) -> Result<String> {
        let (notice, record) = match screen {
            Screen::AwaitingUpload { message } | Screen::NoEntries { message } => (
                Some(Notice {
                    tone: "info",
                    message: message.clone(),
                }),
                None,
            ),
            Screen::Failed { message } => (
                Some(Notice {
                    tone: "error",
                    message: message.clone(),
                }),
                None,
            ),
            Screen::Record(record) => (None, Some(record_context(record))),
        };

        let context = PageContext {
            title: mode.page_title(),
            mode: mode.slug(),
            upload_label: mode.upload_label(),
            modes: ViewMode::ALL
                .into_iter()
                .map(|m| ModeLink {
                    slug: m.slug(),
                    label: m.label(),
                    active: m == mode,
                })
                .collect(),
            file_name,
            notice,
            record,
        };

        Ok(self.registry.render(VIEWER_TEMPLATE, &context)?)
    }
}
