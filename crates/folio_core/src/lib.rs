//! Core logic for the folio portfolio site.
//! Gallery search, contact form dispatch and static page generation live here;
//! front ends only provide rendering surfaces.

pub mod config;
pub mod contact;
pub mod gallery;
pub mod logging;
pub mod markup;
pub mod model;
pub mod site;

pub use config::{ConfigError, ContactConfig, SiteConfig};
pub use contact::relay::{HttpRelay, RelayPayload, RelayTransport, SubmitError};
pub use contact::{
    check, relay_payload, to_mailto, validate, ContactForm, FieldCheck, FormState, FormView,
    SubmitOutcome,
};
pub use gallery::source::{
    parse_manifest, source_for, FileManifest, HttpManifest, LoadError, ManifestSource,
};
pub use gallery::thumb::{generated_thumb, thumb_svg};
pub use gallery::{filter, render, sort_projects, Card, Gallery, GalleryState, ListView};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use markup::{escape_html, HtmlListView};
pub use model::contact::{ContactSubmission, Field};
pub use model::project::ProjectRecord;
pub use site::{build_site, BuildReport, SiteError};
