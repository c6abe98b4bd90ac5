//! Dashboard module - server-rendered operator pages
//!
//! Every page is plain HTML with forms; there is no client-side script apart
//! from the restart confirmation alert.
//!
//! # Layout
//! - `css.rs`: shared stylesheet
//! - `steps.rs`: step ladder table, edit forms, step-count probe
//! - `positions.rs`: live stock positions with the sell action
//! - `login.rs`: credential entry

mod css;
pub mod login;
pub mod positions;
pub mod steps;

/// Wrap `body` in the common page shell.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape(title),
        css = css::STYLES,
        body = body
    )
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `"Last refreshed 12:00:03 UTC"` or a placeholder before the first fetch.
fn refreshed_label(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match at {
        Some(at) => format!("Last refreshed {}", at.format("%H:%M:%S UTC")),
        None => "Not fetched yet".to_string(),
    }
}
