//! Project manifest record.
//!
//! # Responsibility
//! - Mirror the JSON schema of `projects.json` entries.
//! - Provide the search haystack and navigation path helpers.
//!
//! # Invariants
//! - Every optional field deserializes to an empty value when absent or
//!   `null`, so a sparse manifest entry never fails the whole load.

use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// URL-safe identifier; doubles as the project page directory name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-like date string. Only used for ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Explicit thumbnail URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tech: Vec<String>,
    /// Live demo link shown on the project page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    /// Source repository link shown on the project page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

/// Reads `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProjectRecord {
    /// Creates a record with only slug and title set.
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sort key for the date column; missing dates sort as the empty string.
    pub fn date_key(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    /// Lower-cased search text: title, description, tags and tech joined by
    /// single spaces.
    pub fn haystack(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2 + self.tags.len() + self.tech.len());
        parts.push(self.title.as_str());
        if let Some(description) = self.description.as_deref() {
            parts.push(description);
        }
        parts.extend(self.tags.iter().map(String::as_str));
        parts.extend(self.tech.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }

    /// Tags followed by tech entries, as shown in chip rows and keywords.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .chain(self.tech.iter())
            .map(String::as_str)
    }

    /// Relative link to the generated project page.
    pub fn page_href(&self) -> String {
        format!("projects/{}/", urlencoding::encode(&self.slug))
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectRecord;

    #[test]
    fn sparse_entry_deserializes_with_defaults() {
        let record: ProjectRecord =
            serde_json::from_str(r#"{"slug":"a","title":"Alpha"}"#).expect("sparse record");
        assert_eq!(record.description, None);
        assert!(record.tags.is_empty());
        assert_eq!(record.date_key(), "");
    }

    #[test]
    fn null_fields_deserialize_as_absent() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"slug":null,"title":null,"description":null,"tags":null,"tech":null}"#,
        )
        .expect("null fields are accepted");
        assert_eq!(record, ProjectRecord::default());
    }

    #[test]
    fn haystack_skips_absent_description() {
        let mut record = ProjectRecord::new("a", "Alpha");
        record.tags = vec!["Web".to_string()];
        record.tech = vec!["Rust".to_string()];
        assert_eq!(record.haystack(), "alpha web rust");
    }

    #[test]
    fn page_href_encodes_slug() {
        let record = ProjectRecord::new("my app", "x");
        assert_eq!(record.page_href(), "projects/my%20app/");
    }
}
