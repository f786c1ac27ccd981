use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render a free-text answer as HTML.
///
/// Answers are Markdown as typed into the form. Raw HTML in the answer is
/// shown as text, and single line breaks are kept so multi-line answers read
/// the way they were written. Links and images pointing anywhere but http,
/// https or mailto (or a relative path) are replaced by `#`.
pub fn to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::SoftBreak => Event::HardBreak,
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: checked_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: checked_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

fn checked_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

/// Whether `url` is relative or uses one of [`SAFE_SCHEMES`].
///
/// Browsers ignore whitespace and control characters inside a scheme, so
/// those are dropped before looking at it.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    match cleaned.find([':', '/', '?', '#']) {
        Some(end) if cleaned[end..].starts_with(':') => SAFE_SCHEMES
            .iter()
            .any(|scheme| cleaned[..end].eq_ignore_ascii_case(scheme)),
        _ => true,
    }
}
