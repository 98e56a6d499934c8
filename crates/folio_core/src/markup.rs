//! HTML output helpers and the markup-backed list view.
//!
//! # Responsibility
//! - Escape manifest-sourced text before it is embedded in markup.
//! - Render gallery cards into an in-memory page region.

use crate::gallery::{Card, ListView};

/// Escapes text for HTML text nodes and quoted attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes text placed between XML tags. Quotes are left as-is.
pub fn escape_xml_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Markup for a single gallery card.
pub fn card_html(card: &Card) -> String {
    format!(
        "<a class=\"card\" href=\"{href}\">\
<img class=\"thumb\" alt=\"{alt}\" src=\"{src}\">\
<div class=\"content\">\
<h3 class=\"title\">{title}</h3>\
<p class=\"desc\">{desc}</p>\
</div></a>",
        href = escape_html(&card.href),
        alt = escape_html(&format!("{} preview", card.title)),
        src = escape_html(&card.image),
        title = escape_html(&card.title),
        desc = escape_html(&card.description),
    )
}

/// In-memory stand-in for the page's count label and gallery region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlListView {
    count_text: String,
    items_html: String,
}

impl HtmlListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of the count label.
    pub fn count_text(&self) -> &str {
        &self.count_text
    }

    /// Current inner markup of the gallery region.
    pub fn items_html(&self) -> &str {
        &self.items_html
    }

    /// Number of cards currently in the gallery region.
    pub fn card_count(&self) -> usize {
        self.items_html.matches("<a class=\"card\"").count()
    }
}

impl ListView for HtmlListView {
    fn set_count(&mut self, count: usize) {
        self.count_text = count.to_string();
    }

    fn set_items(&mut self, cards: &[Card]) {
        self.items_html = cards.iter().map(card_html).collect();
    }

    fn set_error_message(&mut self, message: &str) {
        self.items_html = format!("<p>{}</p>", escape_html(message));
    }
}
