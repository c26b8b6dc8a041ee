//! HTTP command transport to the remote automation server

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppiumError, Result};

/// HTTP verb of a WebDriver command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single WebDriver command, relative to the server base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Command {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Sends commands to a remote automation server.
///
/// Implementations return the whole response body for `POST /session` and
/// the unwrapped `value` field for every other command.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: Command) -> Result<Value>;
}

/// [`CommandExecutor`] speaking HTTP/JSON via reqwest
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: String,
}

impl HttpExecutor {
    /// Create an executor for `base_url` (e.g. `http://localhost:4723`)
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CommandExecutor for HttpExecutor {
    async fn execute(&self, command: Command) -> Result<Value> {
        let url = format!("{}{}", self.base_url, command.path);
        debug!("{} {}", command.method, url);

        let request = match command.method {
            Method::Get => self.client.get(&url),
            Method::Post => self
                .client
                .post(&url)
                .json(&command.body.unwrap_or_else(|| Value::Object(Default::default()))),
            Method::Delete => self.client.delete(&url),
        };

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                AppiumError::InvalidResponse(format!("HTTP {}: {} ({})", status, text.trim(), e))
            })?
        };

        if let Some(err) = parse_error(&body) {
            return Err(err);
        }
        if !status.is_success() {
            return Err(AppiumError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        if command.method == Method::Post && command.path == "/session" {
            return Ok(body);
        }
        Ok(unwrap_value(body))
    }
}

/// Extract a W3C (`value.error`) or legacy (`status != 0`) error response
pub(crate) fn parse_error(body: &Value) -> Option<AppiumError> {
    let value = body.get("value")?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Some(AppiumError::WebDriver {
            error: error.to_string(),
            message: message.to_string(),
        });
    }

    match body.get("status").and_then(Value::as_i64) {
        Some(status) if status != 0 => Some(AppiumError::WebDriver {
            error: format!("status {}", status),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
        _ => None,
    }
}

fn unwrap_value(mut body: Value) -> Value {
    match body.get_mut("value") {
        Some(value) => value.take(),
        None => body,
    }
}

/// Read the session id from a new-session response body
pub(crate) fn session_id_from(body: &Value) -> Result<String> {
    body.get("value")
        .and_then(|v| v.get("sessionId"))
        .or_else(|| body.get("sessionId"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppiumError::InvalidResponse(format!("missing sessionId in {}", body)))
}
