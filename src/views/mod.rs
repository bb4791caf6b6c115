//! # Views
//!
//! Server-rendered HTML for the operator screens. Every dynamic value goes
//! through [`escape`].

pub mod auth;
pub mod delegates;
pub mod outreach;

use axum::http::StatusCode;
use axum::response::Html;

pub const APP_TITLE: &str = "GDS-Lucknow MUN 2025";

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; margin: 0; background: #F9FAFB; color: #1F2937; }
main { max-width: 1100px; margin: 0 auto; padding: 2rem; }
h1, h2, h3 { color: #1E3A8A; font-weight: 600; }
h1 { border-bottom: 2px solid #DBEAFE; padding-bottom: 0.5rem; margin-bottom: 1.5rem; }
a.button, button { display: inline-block; background-color: #2563EB; color: white; border-radius: 8px; border: none; padding: 0.6rem 1.2rem; font-weight: 500; min-width: 120px; text-decoration: none; cursor: pointer; font-size: 1rem; }
a.button:hover, button:hover { background-color: #1D4ED8; }
a.button.secondary, button.secondary { background-color: #F3F4F6; color: #374151; }
input, textarea, select { border-radius: 8px; border: 1px solid #D1D5DB; padding: 0.5rem 0.75rem; font-size: 1rem; box-sizing: border-box; }
input:focus, textarea:focus, select:focus { border-color: #2563EB; box-shadow: 0 0 0 2px #BFDBFE; outline: none; }
form.card, .card { border: 1px solid #E5E7EB; border-radius: 8px; padding: 1.5rem; background-color: #FFFFFF; margin-bottom: 1.5rem; }
label { display: block; font-weight: 500; color: #374151; margin: 0.75rem 0 0.25rem; }
label.inline { display: inline; }
.field { width: 100%; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
.highlight { padding: 1.5rem; border-radius: 8px; background-color: #EFF6FF; border-left: 5px solid #3B82F6; margin-bottom: 1.5rem; color: #1E3A8A; }
.styled-text-box { padding: 1.5rem; border: 1px solid #D1D5DB; border-radius: 8px; background-color: #F9FAFB; margin-bottom: 1.5rem; font-family: monospace; white-space: pre-wrap; line-height: 1.6; }
.notice { padding: 0.75rem 1rem; border-radius: 8px; margin-bottom: 1rem; }
.notice.success { background: #DCFCE7; color: #166534; }
.notice.warning { background: #FEF9C3; color: #854D0E; }
.notice.error { background: #FEE2E2; color: #991B1B; }
.notice.info { background: #DBEAFE; color: #1E40AF; }
table { width: 100%; border-collapse: collapse; background: #FFFFFF; }
th, td { border-bottom: 1px solid #E5E7EB; padding: 0.4rem; text-align: left; }
td input, td select { width: 100%; }
@media screen and (max-width: 768px) {
  main { padding: 1rem; }
  .columns { grid-template-columns: 1fr; }
  a.button, button { width: 100%; }
}
"#;

/// Escape text for HTML element content and quoted attributes
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One-off message shown above the page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
    Info(String),
}

impl Notice {
    pub fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Success(text) => ("success", text),
            Notice::Warning(text) => ("warning", text),
            Notice::Error(text) => ("error", text),
            Notice::Info(text) => ("info", text),
        };
        format!(r#"<div class="notice {class}">{}</div>"#, escape(text))
    }
}

pub(crate) fn render_notice(notice: Option<&Notice>) -> String {
    notice.map(Notice::render).unwrap_or_default()
}

/// Wrap page content in the shared document shell
pub fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {APP_TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    layout(
        "Error",
        &format!(
            r#"<h1>Something went wrong</h1>
{}
<p><a class="button secondary" href="/">Back to Home</a></p>"#,
            Notice::Error(format!("{message} ({status})")).render()
        ),
    )
}

/// `<option>` list with `selected` marking the current value
pub(crate) fn options<'a>(values: impl IntoIterator<Item = &'a str>, selected: &str) -> String {
    values
        .into_iter()
        .map(|value| {
            let marker = if value == selected { " selected" } else { "" };
            format!(
                r#"<option value="{v}"{marker}>{v}</option>"#,
                v = escape(value)
            )
        })
        .collect()
}
