//! Article text extraction from fetched HTML.
//!
//! Heuristic, not a readability engine: prefer a known content container,
//! fall back to paragraph text, and only then to the whole visible text.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Extracted text shorter than this is treated as no content.
const MIN_CONTENT_LEN: usize = 100;

/// Extracted text is truncated to this many characters.
const MAX_CONTENT_LEN: usize = 5000;

/// Content containers tried in priority order.
const CONTAINER_SELECTORS: [&str; 5] = [
    "main",
    "article",
    "div.content",
    "div.article-body",
    "div#article-body",
];

/// Extracts the article text from an HTML document.
///
/// Tries the first matching content container; when none matches, joins all
/// `<p>` text; when the result is still under [`MIN_CONTENT_LEN`] characters,
/// falls back to the whole visible text. Returns `None` when even that is too
/// short. Output is truncated to [`MAX_CONTENT_LEN`] characters on a char
/// boundary.
pub fn article_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let mut text = match first_container(&document) {
        Some(container) => visible_text(container),
        None => paragraph_text(&document),
    };

    if text.chars().count() < MIN_CONTENT_LEN {
        text = visible_text(document.root_element());
    }
    if text.chars().count() < MIN_CONTENT_LEN {
        return None;
    }

    Some(truncate(&text))
}

/// Reads the headline and description from an `application/ld+json` block.
///
/// Some sites (notably msn.com) render articles client-side but still embed
/// structured data the generic heuristic cannot see.
pub fn ld_json_summary(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    let raw = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();

    let mut data: Value = serde_json::from_str(raw.trim()).ok()?;
    if let Some(first) = data.as_array().and_then(|items| items.first()) {
        data = first.clone();
    }

    let headline = data.get("headline").and_then(Value::as_str).unwrap_or("");
    let description = data
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("");

    match (headline.is_empty(), description.is_empty()) {
        (true, true) => None,
        (false, true) => Some(headline.to_string()),
        (true, false) => Some(description.to_string()),
        (false, false) => Some(format!("{headline}\n\n{description}")),
    }
}

fn first_container(document: &Html) -> Option<ElementRef<'_>> {
    CONTAINER_SELECTORS.iter().find_map(|raw| {
        let selector = Selector::parse(raw).ok()?;
        document.select(&selector).next()
    })
}

fn paragraph_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    let paragraphs: Vec<String> = document
        .select(&selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    paragraphs.join("\n")
}

/// All text under `root`, one trimmed text node per line, skipping
/// script/style/noscript subtrees.
fn visible_text(root: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join("\n")
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_CONTENT_LEN) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
