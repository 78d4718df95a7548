use std::{str::FromStr, time::Duration};

use crate::ParseMethodError;

/// Request method of a query.
///
/// `Update` and `Push` are not standard HTTP methods. They are sent verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `UPDATE`
    Update,
    /// `PUSH`
    Push,
}

impl NetworkMethod {
    /// Uppercase method token as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkMethod::Get => "GET",
            NetworkMethod::Post => "POST",
            NetworkMethod::Put => "PUT",
            NetworkMethod::Patch => "PATCH",
            NetworkMethod::Delete => "DELETE",
            NetworkMethod::Update => "UPDATE",
            NetworkMethod::Push => "PUSH",
        }
    }
}

impl std::fmt::Display for NetworkMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(NetworkMethod::Get),
            "POST" => Ok(NetworkMethod::Post),
            "PUT" => Ok(NetworkMethod::Put),
            "PATCH" => Ok(NetworkMethod::Patch),
            "DELETE" => Ok(NetworkMethod::Delete),
            "UPDATE" => Ok(NetworkMethod::Update),
            "PUSH" => Ok(NetworkMethod::Push),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/**
 * Options for a request [`use_network()`](crate::use_network())
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkOptions {
    /// Path relative to the configured base URL.
    pub path: String,
    /// Cache key for this logical query.
    /// A new key triggers a new request.
    pub query_key: String,
    /// Request method. Default is `GET`.
    pub method: NetworkMethod,
    /// Request headers, sent in order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Option<String>,
    /// Time before the call is aborted.
    /// If no timeout, the client default is used (10 seconds unless configured).
    pub timeout: Option<Duration>,
}

impl NetworkOptions {
    /// Options for a `GET` of `path`, cached under `query_key`.
    pub fn new(path: impl Into<String>, query_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query_key: query_key.into(),
            method: NetworkMethod::default(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Set the method.
    pub fn set_method(self, method: NetworkMethod) -> Self {
        NetworkOptions { method, ..self }
    }

    /// Set the headers.
    pub fn set_headers(self, headers: Vec<(String, String)>) -> Self {
        NetworkOptions { headers, ..self }
    }

    /// Append a header.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn set_body(self, body: Option<String>) -> Self {
        NetworkOptions { body, ..self }
    }

    /// Set the timeout.
    pub fn set_timeout(self, timeout: Option<Duration>) -> Self {
        NetworkOptions { timeout, ..self }
    }
}
