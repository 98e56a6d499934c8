//! Searchable project gallery.
//!
//! # Responsibility
//! - Load the manifest once and keep it in date order.
//! - Filter by a free-text query and push the result to a `ListView`.
//!
//! # Invariants
//! - The view always shows exactly `render(filter(data, query))`.
//! - `data` is replaced wholesale, never mutated in place.
//! - Load failures leave the gallery empty with a fixed message; no retry.

pub mod source;
pub mod thumb;

use crate::model::project::ProjectRecord;
use log::{error, info};
use source::{LoadResult, ManifestSource};
use std::cmp::Ordering;

/// Message placed in the gallery region when loading fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Couldn\u{2019}t load projects.";

/// Rendering surface for the gallery: a count label plus a list region.
pub trait ListView {
    fn set_count(&mut self, count: usize);
    fn set_items(&mut self, cards: &[Card]);
    fn set_error_message(&mut self, message: &str);
}

/// View model for one gallery card. Text is raw; views escape it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub href: String,
    pub image: String,
    pub title: String,
    pub description: String,
}

impl Card {
    pub fn from_record(record: &ProjectRecord) -> Self {
        let image = match record.image.as_deref() {
            Some(image) if !image.is_empty() => image.to_string(),
            _ => thumb::generated_thumb(&record.title),
        };
        Self {
            href: record.page_href(),
            image,
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

/// Gallery data plus the current search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    pub data: Vec<ProjectRecord>,
    /// Raw search box value; trimming happens in [`filter`].
    pub query: String,
}

impl GalleryState {
    /// Builds state from an unsorted manifest, applying gallery order.
    pub fn from_manifest(mut data: Vec<ProjectRecord>) -> Self {
        sort_projects(&mut data);
        Self {
            data,
            query: String::new(),
        }
    }

    /// Records visible under the current query.
    pub fn visible(&self) -> Vec<&ProjectRecord> {
        filter(&self.data, &self.query)
    }
}

/// Newest first by date string; equal dates by ascending title.
pub fn compare_projects(a: &ProjectRecord, b: &ProjectRecord) -> Ordering {
    b.date_key()
        .cmp(a.date_key())
        .then_with(|| a.title.cmp(&b.title))
}

/// Sorts in gallery order. Stable, so full ties keep manifest order.
pub fn sort_projects(data: &mut [ProjectRecord]) {
    data.sort_by(compare_projects);
}

/// Case-insensitive substring filter over title, description, tags and tech.
///
/// A blank (after trimming) query keeps everything. Relative order is preserved.
pub fn filter<'a>(data: &'a [ProjectRecord], query: &str) -> Vec<&'a ProjectRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return data.iter().collect();
    }
    data.iter()
        .filter(|record| record.haystack().contains(&needle))
        .collect()
}

/// Pushes `list` to the view: count first, then cards.
pub fn render_list<V: ListView + ?Sized>(view: &mut V, list: &[&ProjectRecord]) {
    let cards: Vec<Card> = list.iter().map(|record| Card::from_record(record)).collect();
    view.set_count(cards.len());
    view.set_items(&cards);
}

/// Renders the filtered view of `state`.
pub fn render<V: ListView + ?Sized>(view: &mut V, state: &GalleryState) {
    render_list(view, &state.visible());
}

/// Gallery component: owns its state and drives a view.
pub struct Gallery<V: ListView> {
    state: GalleryState,
    view: V,
}

impl<V: ListView> Gallery<V> {
    pub fn new(view: V) -> Self {
        Self {
            state: GalleryState::default(),
            view,
        }
    }

    /// Fetches the manifest once and renders it with an empty query.
    ///
    /// On failure the data is cleared, the view shows
    /// [`LOAD_FAILURE_MESSAGE`] and the error is logged and returned.
    pub fn load<S: ManifestSource + ?Sized>(&mut self, source: &S) -> LoadResult<usize> {
        match source.fetch() {
            Ok(records) => {
                self.state = GalleryState::from_manifest(records);
                info!(
                    "event=gallery_load module=gallery status=ok source={} count={}",
                    source.describe(),
                    self.state.data.len()
                );
                render(&mut self.view, &self.state);
                Ok(self.state.data.len())
            }
            Err(err) => {
                error!(
                    "event=gallery_load module=gallery status=error source={} error={}",
                    source.describe(),
                    err
                );
                self.state = GalleryState::default();
                self.view.set_error_message(LOAD_FAILURE_MESSAGE);
                Err(err)
            }
        }
    }

    /// Search box input handler: stores the raw value and re-renders.
    pub fn on_search_input(&mut self, raw: &str) {
        self.state.query = raw.to_string();
        render(&mut self.view, &self.state);
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_projects, filter, sort_projects, Card, GalleryState};
    use crate::model::project::ProjectRecord;
    use std::cmp::Ordering;

    fn dated(slug: &str, title: &str, date: Option<&str>) -> ProjectRecord {
        let mut record = ProjectRecord::new(slug, title);
        record.date = date.map(str::to_string);
        record
    }

    #[test]
    fn sort_is_newest_first_with_missing_dates_last() {
        let mut data = vec![
            dated("a", "A", None),
            dated("b", "B", Some("2023-01-01")),
            dated("c", "C", Some("2024-06-01")),
        ];
        sort_projects(&mut data);
        let slugs: Vec<&str> = data.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "b", "a"]);
    }

    #[test]
    fn equal_dates_order_by_title() {
        let a = dated("1", "Zeta", Some("2024-01-01"));
        let b = dated("2", "Alpha", Some("2024-01-01"));
        assert_eq!(compare_projects(&a, &b), Ordering::Greater);
        assert_eq!(compare_projects(&b, &a), Ordering::Less);
    }

    #[test]
    fn filter_trims_query() {
        let data = vec![ProjectRecord::new("a", "Alpha"), ProjectRecord::new("b", "Beta")];
        let hits = filter(&data, "  beta  ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "b");
    }

    #[test]
    fn whitespace_query_keeps_everything() {
        let data = vec![ProjectRecord::new("a", "Alpha"), ProjectRecord::new("b", "Beta")];
        assert_eq!(filter(&data, "   ").len(), 2);
    }

    #[test]
    fn filter_matches_across_field_boundaries() {
        let mut record = ProjectRecord::new("a", "Alpha");
        record.tags = vec!["web".to_string()];
        let data = vec![record];
        assert_eq!(filter(&data, "alpha web").len(), 1);
    }

    #[test]
    fn card_falls_back_to_generated_thumb() {
        let mut record = ProjectRecord::new("a", "Alpha");
        let card = Card::from_record(&record);
        assert!(card.image.starts_with("data:image/svg+xml,"));
        assert_eq!(card.description, "");

        record.image = Some("cover.png".to_string());
        record.description = Some("desc".to_string());
        let card = Card::from_record(&record);
        assert_eq!(card.image, "cover.png");
        assert_eq!(card.description, "desc");
        assert_eq!(card.href, "projects/a/");
    }

    #[test]
    fn state_from_manifest_starts_with_empty_query() {
        let state = GalleryState::from_manifest(vec![ProjectRecord::new("a", "Alpha")]);
        assert!(state.query.is_empty());
        assert_eq!(state.visible().len(), 1);
    }
}
