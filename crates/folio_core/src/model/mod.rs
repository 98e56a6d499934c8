//! Domain records shared by the gallery and the contact form.
//!
//! # Responsibility
//! - Define the manifest record shape consumed by gallery and site generation.
//! - Define the transient contact submission built per submit attempt.
//!
//! # Invariants
//! - Manifest records are immutable once loaded; callers replace the whole list.
//! - Contact submissions are never persisted.

pub mod contact;
pub mod project;
