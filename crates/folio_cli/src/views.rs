//! Terminal rendering surfaces for the core components.

use folio_core::{Card, Field, FormView, ListView};
use std::collections::BTreeMap;

/// Plain-text gallery listing.
#[derive(Debug, Default)]
pub struct TextListView {
    pub count: usize,
    pub lines: Vec<String>,
    pub error: Option<String>,
}

impl TextListView {
    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("{error}\n");
        }
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("{} project(s)\n", self.count));
        out
    }
}

impl ListView for TextListView {
    fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    fn set_items(&mut self, cards: &[Card]) {
        self.error = None;
        self.lines = cards
            .iter()
            .map(|card| {
                if card.description.is_empty() {
                    format!("{}  ({})", card.title, card.href)
                } else {
                    format!("{}  ({})\n    {}", card.title, card.href, card.description)
                }
            })
            .collect();
    }

    fn set_error_message(&mut self, message: &str) {
        self.lines.clear();
        self.error = Some(message.to_string());
    }
}

/// Collects contact form feedback for printing after a submit.
#[derive(Debug, Default)]
pub struct TerminalForm {
    pub errors: BTreeMap<Field, String>,
    pub status: String,
    pub navigated: Option<String>,
    pub was_reset: bool,
}

impl TerminalForm {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (field, message) in &self.errors {
            out.push_str(&format!("{}: {message}\n", field.as_str()));
        }
        if let Some(uri) = &self.navigated {
            out.push_str(&format!("{uri}\n"));
        }
        if !self.status.is_empty() {
            out.push_str(&self.status);
            out.push('\n');
        }
        out
    }
}

impl FormView for TerminalForm {
    fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn set_error(&mut self, field: Field, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
    }

    fn reset(&mut self) {
        self.was_reset = true;
    }

    fn navigate(&mut self, uri: &str) {
        self.navigated = Some(uri.to_string());
    }
}
