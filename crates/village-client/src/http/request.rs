//! Immutable request descriptors.

use std::collections::HashMap;

use reqwest::Method;
use serde::Serialize;

use crate::{Error, Result};

/// Which send of a request descriptor this is.
///
/// A descriptor is sent at most twice: once as [`Attempt::Initial`] and, after
/// a successful token refresh, once more as [`Attempt::Retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Attempt {
    /// First send.
    Initial,
    /// Resend after refreshing credentials.
    Retry,
}

/// Description of one backend call: method, path relative to the base URL,
/// query, JSON body and extra headers.
///
/// The descriptor is never mutated while being sent, so a retry replays
/// exactly the same request with only the bearer token swapped.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured base URL (a leading `/` is ignored).
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
    /// Extra headers. `Authorization` is managed by the client and ignored here.
    pub headers: HashMap<String, String>,
    /// Sent without credentials and excluded from refresh-and-retry.
    pub anonymous: bool,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: HashMap::new(),
            anonymous: false,
        }
    }

    /// Creates a `GET` request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `POST` request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a `PUT` request for `path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a `DELETE` request for `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets the JSON body.
    pub fn with_json<T>(mut self, body: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Appends the fields of a flat serializable struct as query parameters.
    ///
    /// `None` fields are skipped; strings are passed verbatim and other
    /// scalars use their JSON rendering.
    pub fn with_query<T>(mut self, query: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(query)?;
        let serde_json::Value::Object(fields) = value else {
            return Err(Error::serialization().with_message("query must serialize to an object"));
        };

        for (name, value) in fields {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => self.query.push((name, s)),
                serde_json::Value::Bool(_) | serde_json::Value::Number(_) => {
                    self.query.push((name, value.to_string()));
                }
                _ => {
                    return Err(Error::serialization()
                        .with_message(format!("query parameter `{name}` is not a scalar")));
                }
            }
        }

        Ok(self)
    }

    /// Appends a single query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Adds a custom header to the request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Marks the request as not needing credentials (login, signup, refresh).
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}
