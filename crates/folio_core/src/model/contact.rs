//! Contact submission model.

use serde::{Deserialize, Serialize};

/// Form fields that can carry an inline error annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// Form control id of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Values captured from the contact form for one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Hidden honeypot input; humans leave it empty.
    pub company: String,
    /// Whether the sender asked to be copied on the mailto message.
    pub send_copy: bool,
}

impl ContactSubmission {
    /// Subject line to send: the user's subject, else a generated one.
    pub fn effective_subject(&self) -> String {
        if self.subject.is_empty() {
            format!("New message from {}", self.name)
        } else {
            self.subject.clone()
        }
    }
}
