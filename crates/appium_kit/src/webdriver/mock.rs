//! In-memory executor that records commands, for tests

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use super::client::{Command, CommandExecutor, Method};
use crate::error::{AppiumError, Result};

pub(crate) const SESSION_ID: &str = "mock-session";

type Handler = Box<dyn Fn(&Command) -> Result<Value> + Send + Sync>;

pub(crate) struct MockExecutor {
    calls: Arc<Mutex<Vec<Command>>>,
    handler: Handler,
}

impl MockExecutor {
    pub(crate) fn new(handler: impl Fn(&Command) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            handler: Box::new(handler),
        }
    }

    /// Executor answering like a healthy server with a 200x100 window
    pub(crate) fn healthy() -> Self {
        Self::new(healthy_response)
    }

    /// Shared log of every command received
    pub(crate) fn calls(&self) -> Arc<Mutex<Vec<Command>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, command: Command) -> Result<Value> {
        let result = (self.handler)(&command);
        self.calls.lock().unwrap().push(command);
        result
    }
}

pub(crate) fn session_path(suffix: &str) -> String {
    format!("/session/{}{}", SESSION_ID, suffix)
}

pub(crate) fn healthy_response(command: &Command) -> Result<Value> {
    let value = match (command.method, command.path.as_str()) {
        (Method::Post, "/session") => {
            json!({"value": {"sessionId": SESSION_ID, "capabilities": {"platformName": "Android"}}})
        }
        (Method::Get, p) if p.ends_with("/window/rect") => {
            json!({"x": 0, "y": 0, "width": 200, "height": 100})
        }
        (Method::Get, p) if p.ends_with("/screenshot") => {
            json!(general_purpose::STANDARD.encode(b"\x89PNG\r\n\x1a\nfake"))
        }
        (Method::Post, p) if p.ends_with("/element") => {
            json!({"element-6066-11e4-a52e-4f735466cecf": "el-1"})
        }
        _ => Value::Null,
    };
    Ok(value)
}

/// Healthy server on which every element lookup fails
pub(crate) fn missing_elements(command: &Command) -> Result<Value> {
    if command.method == Method::Post && command.path.ends_with("/element") {
        return Err(AppiumError::WebDriver {
            error: "no such element".to_string(),
            message: "An element could not be located on the page".to_string(),
        });
    }
    healthy_response(command)
}
