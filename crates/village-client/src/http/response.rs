//! Buffered backend responses.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::model::Payload;
use crate::{Error, ErrorKind, Result};

/// Longest body excerpt quoted in decode errors.
const PREVIEW_LEN: usize = 100;

/// A fully read backend response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the response, returning the body bytes.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Returns whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|err| {
            Error::from(err)
                .with_message(format!(
                    "unexpected response body: {}",
                    preview(&self.body)
                ))
                .with_status(self.status)
        })
    }

    /// Decodes the body as `T`, unwrapping a `{"success", "data"}` envelope if present.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T> {
        self.json::<Payload<T>>().map(Payload::into_inner)
    }

    /// Returns the response unchanged if it is 2xx, otherwise the matching error.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }

    /// Converts a non-success response into a classified [`Error`].
    ///
    /// The backend's `detail` (a string, a `{code, message}` object or a list
    /// of validation issues) becomes the message; the full JSON body is kept
    /// on the error for field-level feedback.
    pub fn into_error(self) -> Error {
        let kind = ErrorKind::from_status(self.status);
        let mut error = Error::new(kind).with_status(self.status);

        match serde_json::from_slice::<serde_json::Value>(&self.body) {
            Ok(body) => {
                let message =
                    describe_error_body(&body).unwrap_or_else(|| default_reason(self.status));
                error = error.with_message(message).with_body(body);
            }
            Err(_) if self.body.is_empty() => {
                error = error.with_message(default_reason(self.status));
            }
            Err(_) => {
                error = error.with_message(preview(&self.body));
            }
        }

        error
    }
}

fn default_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > PREVIEW_LEN {
        let head: String = text.chars().take(PREVIEW_LEN).collect();
        format!("{head}...")
    } else {
        text.into_owned()
    }
}

/// Extracts a human-readable message from a FastAPI-style error body.
fn describe_error_body(body: &serde_json::Value) -> Option<String> {
    let detail = body.get("detail").unwrap_or(body);

    match detail {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Object(fields) => fields
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        serde_json::Value::Array(issues) => {
            let messages: Vec<String> = issues.iter().filter_map(describe_issue).collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Formats one `{"loc": [...], "msg": "..."}` validation issue as `field: msg`.
fn describe_issue(issue: &serde_json::Value) -> Option<String> {
    let msg = issue.get("msg")?.as_str()?;
    let field = issue
        .get("loc")
        .and_then(serde_json::Value::as_array)
        .and_then(|loc| loc.last())
        .and_then(|last| match last {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    Some(match field {
        Some(field) => format!("{field}: {msg}"),
        None => msg.to_owned(),
    })
}
