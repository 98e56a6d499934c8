//! Static project page and sitemap generation.
//!
//! # Responsibility
//! - Expand `templates/project.html` once per manifest record.
//! - Write `projects/<slug>/index.html` and a `sitemap.xml` under a site root.
//!
//! # Invariants
//! - Records without a path-safe slug are skipped, never written.
//! - Every manifest-sourced value is escaped before substitution, except
//!   `{{image}}` which is a URL or data URI and is attribute-escaped.

use crate::gallery::source::{FileManifest, LoadError, ManifestSource};
use crate::gallery::thumb::generated_thumb;
use crate::markup::escape_html;
use crate::model::project::ProjectRecord;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const TEMPLATE_PATH: &str = "templates/project.html";
pub const MANIFEST_PATH: &str = "projects.json";
pub const PAGES_DIR: &str = "projects";
pub const SITEMAP_PATH: &str = "sitemap.xml";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(title|description|image|tagsHtml|linksHtml|canonical|date|keywords)\}\}")
        .expect("valid placeholder regex")
});

pub type SiteResult<T> = Result<T, SiteError>;

#[derive(Debug)]
pub enum SiteError {
    MissingTemplate(PathBuf),
    MissingManifest(PathBuf),
    Manifest(LoadError),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for SiteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTemplate(path) => write!(f, "template not found: {}", path.display()),
            Self::MissingManifest(path) => write!(f, "manifest not found: {}", path.display()),
            Self::Manifest(err) => write!(f, "{err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for SiteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Manifest(err) => Some(err),
            Self::Write { source, .. } | Self::Read { source, .. } => Some(source),
            Self::MissingTemplate(_) | Self::MissingManifest(_) => None,
        }
    }
}

impl From<LoadError> for SiteError {
    fn from(value: LoadError) -> Self {
        Self::Manifest(value)
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Slugs written, in manifest order.
    pub written: Vec<String>,
    /// Titles of records skipped for a missing or unsafe slug.
    pub skipped: Vec<String>,
    pub sitemap: PathBuf,
}

/// Whether `slug` can be used as a single directory name.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
        && !slug.chars().any(char::is_control)
}

/// Absolute page URL for `slug`.
pub fn canonical_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}/projects/{}/",
        base_url.trim_end_matches('/'),
        urlencoding::encode(slug)
    )
}

/// Chip row markup for tags followed by tech.
pub fn chips_html(record: &ProjectRecord) -> String {
    record
        .labels()
        .map(|label| format!("<span class='tag'>{}</span>", escape_html(label)))
        .collect()
}

/// Demo and code buttons, space separated.
pub fn links_html(record: &ProjectRecord) -> String {
    let mut parts = Vec::new();
    if let Some(demo) = record.demo.as_deref().filter(|value| !value.is_empty()) {
        parts.push(format!(
            "<a class='btn' href='{}' target='_blank' rel='noopener'>\u{2197} Demo</a>",
            escape_html(demo)
        ));
    }
    if let Some(repo) = record.repo.as_deref().filter(|value| !value.is_empty()) {
        parts.push(format!(
            "<a class='btn' href='{}' target='_blank' rel='noopener'>&lt;/&gt; Code</a>",
            escape_html(repo)
        ));
    }
    parts.join(" ")
}

/// Tags and tech joined with `", "` for the keywords meta tag.
pub fn keywords(record: &ProjectRecord) -> String {
    record.labels().collect::<Vec<_>>().join(", ")
}

/// Expands the page template for one record.
pub fn render_project_page(template: &str, record: &ProjectRecord, base_url: &str) -> String {
    let image = match record.image.as_deref() {
        Some(image) if !image.is_empty() => image.to_string(),
        _ => generated_thumb(&record.title),
    };
    let title = escape_html(&record.title);
    let description = escape_html(record.description.as_deref().unwrap_or(""));
    let image = escape_html(&image);
    let tags = chips_html(record);
    let links = links_html(record);
    let canonical = canonical_url(base_url, &record.slug);
    let date = escape_html(record.date_key());
    let keyword_list = escape_html(&keywords(record));

    // Why: one pass over the template, so substituted manifest text that looks
    // like a placeholder is never expanded again.
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "title" => title.clone(),
            "description" => description.clone(),
            "image" => image.clone(),
            "tagsHtml" => tags.clone(),
            "linksHtml" => links.clone(),
            "canonical" => canonical.clone(),
            "date" => date.clone(),
            _ => keyword_list.clone(),
        })
        .into_owned()
}

/// Sitemap listing the site root and every safe project page.
pub fn render_sitemap(base_url: &str, records: &[ProjectRecord]) -> String {
    let root = format!("{}/", base_url.trim_end_matches('/'));
    let urls = std::iter::once(root).chain(
        records
            .iter()
            .filter(|record| is_safe_slug(&record.slug))
            .map(|record| canonical_url(base_url, &record.slug)),
    );
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for url in urls {
        out.push_str(&format!("  <url><loc>{}</loc></url>\n", escape_html(&url)));
    }
    out.push_str("</urlset>\n");
    out
}

/// Generates every project page and the sitemap under `root`.
pub fn build_site(root: &Path, base_url: &str) -> SiteResult<BuildReport> {
    let template_path = root.join(TEMPLATE_PATH);
    if !template_path.is_file() {
        return Err(SiteError::MissingTemplate(template_path));
    }
    let manifest_path = root.join(MANIFEST_PATH);
    if !manifest_path.is_file() {
        return Err(SiteError::MissingManifest(manifest_path));
    }

    let template = std::fs::read_to_string(&template_path).map_err(|source| SiteError::Read {
        path: template_path.clone(),
        source,
    })?;
    let records = FileManifest::new(&manifest_path).fetch()?;

    let mut report = BuildReport::default();
    for record in &records {
        if !is_safe_slug(&record.slug) {
            warn!(
                "event=site_page module=site status=skipped reason=slug title={:?}",
                record.title
            );
            report.skipped.push(record.title.clone());
            continue;
        }
        let page_path = root.join(PAGES_DIR).join(&record.slug).join("index.html");
        write_file(&page_path, &render_project_page(&template, record, base_url))?;
        info!(
            "event=site_page module=site status=ok slug={}",
            record.slug
        );
        report.written.push(record.slug.clone());
    }

    let sitemap_path = root.join(SITEMAP_PATH);
    write_file(&sitemap_path, &render_sitemap(base_url, &records))?;
    info!(
        "event=site_build module=site status=ok pages={} skipped={}",
        report.written.len(),
        report.skipped.len()
    );
    report.sitemap = sitemap_path;
    Ok(report)
}

fn write_file(path: &Path, content: &str) -> SiteResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SiteError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })
}
