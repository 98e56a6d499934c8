//! Contact form handling.
//!
//! # Responsibility
//! - Validate submitted fields and annotate per-field errors.
//! - Dispatch a valid submission via `mailto:` or a JSON relay endpoint.
//! - Guard against overlapping submissions.
//!
//! # Invariants
//! - Every validation check runs, so all field errors surface together.
//! - A tripped honeypot rejects silently: no field error, no status text.
//! - The form is reset only after a successful relay send.
//! - While one submission is validating or sending, others return `Busy`.

pub mod relay;

use crate::config::ContactConfig;
use crate::model::contact::{ContactSubmission, Field};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use relay::{RelayPayload, RelayTransport};
use std::sync::{Mutex, PoisonError};

pub const NAME_ERROR: &str = "Please enter your name.";
pub const EMAIL_ERROR: &str = "Please enter a valid email.";
pub const MESSAGE_ERROR: &str = "Please enter a message.";
pub const STATUS_SENT: &str = "Thanks! Your message was sent.";
pub const STATUS_OPENING_MAIL: &str = "Opening your email app...";
pub const STATUS_FAILED: &str = "Sorry, there was a problem sending your message.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Page surface the contact form writes to.
pub trait FormView {
    /// Empties every per-field error slot.
    fn clear_errors(&mut self);
    fn set_error(&mut self, field: Field, message: &str);
    fn set_status(&mut self, message: &str);
    /// Clears all form inputs.
    fn reset(&mut self);
    /// Points the current page at `uri`.
    fn navigate(&mut self, uri: &str);
}

/// Result of running every validation check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCheck {
    pub errors: Vec<(Field, &'static str)>,
    pub honeypot_tripped: bool,
}

impl FieldCheck {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && !self.honeypot_tripped
    }
}

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Runs all field checks without touching any view.
pub fn check(data: &ContactSubmission) -> FieldCheck {
    let mut errors = Vec::new();
    if data.name.trim().is_empty() {
        errors.push((Field::Name, NAME_ERROR));
    }
    if !is_valid_email(&data.email) {
        errors.push((Field::Email, EMAIL_ERROR));
    }
    if data.message.trim().is_empty() {
        errors.push((Field::Message, MESSAGE_ERROR));
    }
    FieldCheck {
        errors,
        // Why: a filled honeypot adds no field error, so an automated sender
        // cannot tell its submission was dropped.
        honeypot_tripped: !data.company.trim().is_empty(),
    }
}

/// Clears the error slots, annotates failing fields and reports validity.
pub fn validate<V: FormView + ?Sized>(data: &ContactSubmission, view: &mut V) -> bool {
    view.clear_errors();
    let result = check(data);
    for (field, message) in &result.errors {
        view.set_error(*field, message);
    }
    result.is_ok()
}

/// Builds the `mailto:` URI for `data` addressed to `mailbox`.
pub fn to_mailto(data: &ContactSubmission, mailbox: &str) -> String {
    let body = format!(
        "Name: {}\nEmail: {}\n\n{}",
        data.name, data.email, data.message
    );
    let mut uri = format!(
        "mailto:{mailbox}?subject={}&body={}",
        urlencoding::encode(&data.effective_subject()),
        urlencoding::encode(&body)
    );
    if data.send_copy {
        uri.push_str("&cc=");
        uri.push_str(&urlencoding::encode(&data.email));
    }
    uri
}

/// Relay body for `data`, with the subject defaulted.
pub fn relay_payload(data: &ContactSubmission) -> RelayPayload {
    RelayPayload {
        name: data.name.clone(),
        email: data.email.clone(),
        subject: data.effective_subject(),
        message: data.message.clone(),
    }
}

/// Lifecycle of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Sending,
    Sent,
    Failed,
    Rejected,
}

impl FormState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Validating | Self::Sending)
    }
}

/// What one call to [`ContactForm::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission is still in flight; nothing was touched.
    Busy,
    /// Validation failed or the honeypot was filled.
    Rejected,
    /// Relay accepted the message.
    Sent,
    /// Page was navigated to this `mailto:` URI.
    MailtoOpened(String),
    /// Relay send failed.
    Failed,
}

/// Contact form component.
pub struct ContactForm<T: RelayTransport> {
    config: ContactConfig,
    transport: T,
    state: Mutex<FormState>,
}

impl<T: RelayTransport> ContactForm<T> {
    pub fn new(config: ContactConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            state: Mutex::new(FormState::Idle),
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> FormState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Form submit handler.
    pub fn submit<V: FormView + ?Sized>(
        &self,
        data: &ContactSubmission,
        view: &mut V,
    ) -> SubmitOutcome {
        if !self.begin() {
            return SubmitOutcome::Busy;
        }

        view.set_status("");
        if !validate(data, view) {
            self.finish(FormState::Rejected);
            return SubmitOutcome::Rejected;
        }

        if self.config.use_relay {
            self.send_via_relay(data, view)
        } else {
            let uri = to_mailto(data, &self.config.mailbox);
            view.navigate(&uri);
            view.set_status(STATUS_OPENING_MAIL);
            info!(
                "event=contact_mailto module=contact status=ok send_copy={}",
                data.send_copy
            );
            self.finish(FormState::Sent);
            SubmitOutcome::MailtoOpened(uri)
        }
    }

    fn send_via_relay<V: FormView + ?Sized>(
        &self,
        data: &ContactSubmission,
        view: &mut V,
    ) -> SubmitOutcome {
        self.finish(FormState::Sending);
        let payload = relay_payload(data);
        match self.transport.send(&self.config.relay_endpoint, &payload) {
            Ok(_) => {
                info!("event=contact_relay module=contact status=ok");
                view.set_status(STATUS_SENT);
                view.reset();
                self.finish(FormState::Sent);
                SubmitOutcome::Sent
            }
            Err(err) => {
                error!(
                    "event=contact_relay module=contact status=error error={}",
                    err
                );
                view.set_status(STATUS_FAILED);
                self.finish(FormState::Failed);
                SubmitOutcome::Failed
            }
        }
    }

    /// Moves to `Validating` unless a submission is already in flight.
    fn begin(&self) -> bool {
        // Why: check and transition under one lock, so two submits racing from
        // different threads cannot both reach the relay.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_in_flight() {
            return false;
        }
        *state = FormState::Validating;
        true
    }

    fn finish(&self, next: FormState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
