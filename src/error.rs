//! Error types shared by the validator, the data sources and the cards.

use thiserror::Error;

/// Rejection of a candidate address at the input boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Address cannot be empty")]
    Empty,

    #[error("Invalid address format: {0} (expected 0x followed by 40 hex characters)")]
    InvalidFormat(String),
}

/// Failure of a single backend call.
///
/// `status` is present when the upstream answered with a non-2xx response;
/// transport failures (timeouts, DNS, connection resets) and undecodable
/// bodies carry only a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.describe())]
pub struct FetchError {
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: format!("Unexpected response: {}", message.into()),
        }
    }

    fn describe(&self) -> String {
        let message = if self.message.trim().is_empty() {
            "source unavailable"
        } else {
            self.message.as_str()
        };
        match self.status {
            Some(status) => format!("HTTP {status}: {message}"),
            None => message.to_string(),
        }
    }
}
