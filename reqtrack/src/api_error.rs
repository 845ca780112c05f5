use std::fmt;
use thiserror::Error;

/// Error value of a wrapped API method, as seen by the OpenAPI tracker.
///
/// The tracker decides between a server error and a network error by asking
/// the error whether it carries a status code. This is a heuristic: an error
/// type that does not report its status is always treated as a network
/// failure.
pub trait ApiError: fmt::Display + fmt::Debug {
    /// The status code of the response that produced this error, if a
    /// response was received at all.
    fn status_code(&self) -> Option<u16> {
        None
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn stack(&self) -> String {
        format!("{self:?}")
    }
}

impl ApiError for String {}

impl ApiError for &'static str {}

/// A response that was received but reported a failure.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{status} {status_text}")]
pub struct ResponseError {
    pub status: u16,
    pub status_text: String,
    pub body: Option<String>,
}

impl ResponseError {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        ResponseError {
            status,
            status_text: status_text.into(),
            body: None,
        }
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        ResponseError {
            body: Some(body.into()),
            ..self
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl ApiError for ResponseError {
    fn status_code(&self) -> Option<u16> {
        Some(self.status)
    }
}

/// Normalized failure attached when no response was obtained.
#[derive(Error, Debug, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{message}")]
pub struct NetworkFailure {
    pub message: String,
    pub stack: String,
}

impl NetworkFailure {
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        NetworkFailure {
            message: message.into(),
            stack: stack.into(),
        }
    }

    pub fn from_error<E: ApiError + ?Sized>(error: &E) -> Self {
        NetworkFailure {
            message: error.message(),
            stack: error.stack(),
        }
    }
}

/// Plain JSON error bodies: an object with a numeric `status` member counts
/// as a server response, anything else as a network failure.
///
/// Any JSON number is accepted (`500` and `500.0` alike) as long as it is a
/// whole number in the `u16` range; other numbers do not name a status.
#[cfg(feature = "serde")]
impl ApiError for serde_json::Value {
    fn status_code(&self) -> Option<u16> {
        let status = self.get("status")?.as_f64()?;
        if status.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&status) {
            Some(status as u16)
        } else {
            None
        }
    }

    fn message(&self) -> String {
        match self.get("message").and_then(serde_json::Value::as_str) {
            Some(message) => message.to_string(),
            None => match self.as_str() {
                Some(text) => text.to_string(),
                None => self.to_string(),
            },
        }
    }

    fn stack(&self) -> String {
        self.get("stack")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}
