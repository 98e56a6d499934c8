use folio_core::gallery::source::LoadResult;
use folio_core::gallery::LOAD_FAILURE_MESSAGE;
use folio_core::{
    filter, parse_manifest, render, Card, Gallery, GalleryState, HtmlListView, ListView,
    LoadError, ManifestSource, ProjectRecord,
};

struct StaticManifest(Vec<ProjectRecord>);

impl ManifestSource for StaticManifest {
    fn fetch(&self) -> LoadResult<Vec<ProjectRecord>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

struct BrokenManifest;

impl ManifestSource for BrokenManifest {
    fn fetch(&self) -> LoadResult<Vec<ProjectRecord>> {
        parse_manifest(b"<html>not json</html>")
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

#[derive(Default)]
struct RecordingList {
    count: Option<usize>,
    titles: Vec<String>,
    error: Option<String>,
}

impl ListView for RecordingList {
    fn set_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    fn set_items(&mut self, cards: &[Card]) {
        self.titles = cards.iter().map(|card| card.title.clone()).collect();
        self.error = None;
    }

    fn set_error_message(&mut self, message: &str) {
        self.titles.clear();
        self.error = Some(message.to_string());
    }
}

fn record(slug: &str, title: &str, date: Option<&str>) -> ProjectRecord {
    let mut record = ProjectRecord::new(slug, title);
    record.date = date.map(str::to_string);
    record
}

fn sample_data() -> Vec<ProjectRecord> {
    let mut react = record("dash", "Dashboard", Some("2024-03-01"));
    react.tech = vec!["React".to_string(), "TypeScript".to_string()];
    let mut cli = record("cli", "Command Line Tool", Some("2023-11-12"));
    cli.description = Some("Fast file search written in Rust".to_string());
    cli.tags = vec!["tooling".to_string()];
    let bare = record("bare", "Bare", None);
    vec![react, cli, bare]
}

#[test]
fn filter_result_is_ordered_subset() {
    let data = sample_data();
    for query in ["", "a", "rust", "tool", "zzz", "REACT", " e "] {
        let hits = filter(&data, query);
        let mut last_index = None;
        for hit in hits {
            let index = data
                .iter()
                .position(|candidate| std::ptr::eq(candidate, hit))
                .expect("hit must come from data");
            if let Some(previous) = last_index {
                assert!(index > previous, "order not preserved for `{query}`");
            }
            last_index = Some(index);
        }
    }
}

#[test]
fn empty_query_returns_everything() {
    let data = sample_data();
    assert_eq!(filter(&data, "").len(), data.len());
}

#[test]
fn filter_is_case_insensitive() {
    let data = sample_data();
    let upper: Vec<&str> = filter(&data, "REACT").iter().map(|p| p.slug.as_str()).collect();
    let lower: Vec<&str> = filter(&data, "react").iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(upper, lower);
    assert_eq!(upper, vec!["dash"]);
}

#[test]
fn filter_searches_description_and_tags() {
    let data = sample_data();
    assert_eq!(filter(&data, "file search")[0].slug, "cli");
    assert_eq!(filter(&data, "TOOLING")[0].slug, "cli");
}

#[test]
fn records_without_optional_fields_are_searchable() {
    let data = vec![ProjectRecord::default(), record("bare", "Bare", None)];
    assert_eq!(filter(&data, "bare").len(), 1);
    assert_eq!(filter(&data, "missing").len(), 0);
}

#[test]
fn null_optional_fields_load_as_absent() {
    let records = parse_manifest(
        br#"[{"slug":"a","title":"Alpha","tags":null,"tech":null,"description":null},
            {"slug":"b","title":"Beta"}]"#,
    )
    .expect("null fields must not reject the manifest");
    assert_eq!(records.len(), 2);
    assert!(records[0].tags.is_empty());
    assert!(records[0].tech.is_empty());

    let mut gallery = Gallery::new(RecordingList::default());
    gallery
        .load(&StaticManifest(records))
        .expect("manifest loads");
    gallery.on_search_input("alpha");
    assert_eq!(gallery.view().count, Some(1));
    assert!(gallery.view().error.is_none());
}

#[test]
fn manifest_sort_breaks_date_ties_by_title() {
    let state = GalleryState::from_manifest(vec![
        record("z", "Zulu", Some("2024-01-01")),
        record("none", "Alpha", None),
        record("a", "Alpha", Some("2024-01-01")),
        record("new", "Mike", Some("2025-02-02")),
    ]);
    let slugs: Vec<&str> = state.data.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["new", "a", "z", "none"]);
}

#[test]
fn render_is_a_function_of_state() {
    let mut state = GalleryState::from_manifest(sample_data());
    state.query = "rust".to_string();

    let mut first = RecordingList::default();
    let mut second = RecordingList::default();
    render(&mut first, &state);
    render(&mut second, &state);
    assert_eq!(first.titles, second.titles);
    assert_eq!(first.count, Some(1));
}

#[test]
fn gallery_renders_on_load_and_on_every_input() {
    let mut gallery = Gallery::new(RecordingList::default());
    let loaded = gallery
        .load(&StaticManifest(sample_data()))
        .expect("static manifest loads");
    assert_eq!(loaded, 3);
    assert_eq!(gallery.view().count, Some(3));
    assert_eq!(
        gallery.view().titles,
        vec!["Dashboard", "Command Line Tool", "Bare"]
    );

    gallery.on_search_input("  TypeScript ");
    assert_eq!(gallery.state().query, "  TypeScript ");
    assert_eq!(gallery.view().count, Some(1));

    gallery.on_search_input("nothing matches");
    assert_eq!(gallery.view().count, Some(0));
    assert!(gallery.view().titles.is_empty());

    gallery.on_search_input("");
    assert_eq!(gallery.view().count, Some(3));
}

#[test]
fn load_failure_shows_fixed_message_and_leaves_gallery_empty() {
    let mut gallery = Gallery::new(RecordingList::default());
    let err = gallery
        .load(&BrokenManifest)
        .expect_err("broken manifest must fail");
    assert!(matches!(err, LoadError::Parse(_)));
    assert_eq!(gallery.view().error.as_deref(), Some(LOAD_FAILURE_MESSAGE));
    assert!(gallery.state().data.is_empty());

    gallery.on_search_input("anything");
    assert_eq!(gallery.view().count, Some(0));
}

#[test]
fn searching_alpha_renders_one_card_end_to_end() {
    let manifest = br#"[
        {"slug": "one", "title": "Alpha Tracker", "date": "2024-01-01"},
        {"slug": "two", "title": "Beta Board", "date": "2024-02-01"},
        {"slug": "three", "title": "Gamma Notes"}
    ]"#;
    let records = parse_manifest(manifest).expect("manifest parses");

    let mut gallery = Gallery::new(HtmlListView::new());
    gallery
        .load(&StaticManifest(records))
        .expect("manifest loads");
    assert_eq!(gallery.view().count_text(), "3");
    assert_eq!(gallery.view().card_count(), 3);

    gallery.on_search_input("alpha");
    assert_eq!(gallery.view().count_text(), "1");
    assert_eq!(gallery.view().card_count(), 1);
    assert!(gallery
        .view()
        .items_html()
        .contains("href=\"projects/one/\""));
}

#[test]
fn html_view_escapes_manifest_markup() {
    let mut hostile = ProjectRecord::new("x", "<script>alert(1)</script>");
    hostile.description = Some("<b>bold</b>".to_string());

    let mut gallery = Gallery::new(HtmlListView::new());
    gallery
        .load(&StaticManifest(vec![hostile]))
        .expect("manifest loads");
    let html = gallery.view().items_html();
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn html_view_error_state_replaces_cards() {
    let mut gallery = Gallery::new(HtmlListView::new());
    gallery
        .load(&StaticManifest(sample_data()))
        .expect("manifest loads");
    let _ = gallery.load(&BrokenManifest);
    assert_eq!(
        gallery.view().items_html(),
        format!("<p>{LOAD_FAILURE_MESSAGE}</p>")
    );
}
