//! Form-relay transport.
//!
//! # Responsibility
//! - Serialize the relay payload and POST it as JSON.
//! - Map non-success statuses to `SubmitError::Status`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SubmitResult<T> = Result<T, SubmitError>;

/// Relay send failure.
#[derive(Debug)]
pub enum SubmitError {
    /// Relay answered with a non-2xx status.
    Status(u16),
    Transport(reqwest::Error),
    /// Success response whose body is not JSON.
    Decode(String),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(status) => write!(f, "Request failed: {status}"),
            Self::Transport(err) => write!(f, "relay request failed: {err}"),
            Self::Decode(message) => write!(f, "relay response is not JSON: {message}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }
        Self::Transport(value)
    }
}

/// JSON body sent to the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Sends one payload to a relay endpoint.
pub trait RelayTransport {
    /// POSTs `payload` and returns the decoded JSON response.
    fn send(&self, endpoint: &str, payload: &RelayPayload) -> SubmitResult<serde_json::Value>;
}

/// `reqwest` blocking transport.
#[derive(Debug, Clone, Default)]
pub struct HttpRelay {
    client: reqwest::blocking::Client,
}

impl HttpRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl RelayTransport for HttpRelay {
    fn send(&self, endpoint: &str, payload: &RelayPayload) -> SubmitResult<serde_json::Value> {
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }
        Ok(response.json::<serde_json::Value>()?)
    }
}
