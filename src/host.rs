//! Types for the host plugin contract.
//!
//! The host loads plugins with an initialization payload (its service client
//! plus the project root) and invokes registered hooks with tool-call
//! payloads. These types model that surface so the guard can be written and
//! tested against it; the same serde derives back the subprocess wire
//! adapter in `main.rs`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity levels accepted by the host's logging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// A structured log record sent to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Name of the component emitting the entry.
    pub service: String,
    pub level: LogLevel,
    pub message: String,
    /// Arbitrary structured metadata attached to the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl LogEntry {
    pub fn new(service: &str, level: LogLevel, message: &str) -> Self {
        Self {
            service: service.to_string(),
            level,
            message: message.to_string(),
            extra: None,
        }
    }

    /// Shorthand for an informational entry.
    pub fn info(service: &str, message: &str) -> Self {
        Self::new(service, LogLevel::Info, message)
    }

    /// Attach structured metadata to the entry.
    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// Services the host offers to plugins.
///
/// Log delivery is fire-and-forget: implementations swallow failures, so an
/// unreachable host never blocks or fails a decision.
pub trait HostClient: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// Initialization payload handed to a plugin when the host loads it.
pub struct PluginInit {
    /// Host services, when the host offers any.
    pub client: Option<Arc<dyn HostClient>>,
    /// Project root the host is operating in.
    pub directory: PathBuf,
}

impl PluginInit {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            client: None,
            directory: directory.into(),
        }
    }

    pub fn with_client(mut self, client: Arc<dyn HostClient>) -> Self {
        self.client = Some(client);
        self
    }
}

/// Read-only half of the pre-execution payload: which tool is about to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolExecuteInput {
    /// Tool name as the host reports it (e.g. "bash", "shell", "read").
    pub tool: String,
    #[serde(default, rename = "sessionID", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, rename = "callID", skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
}

impl ToolExecuteInput {
    pub fn new(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            session_id: None,
            call_id: None,
        }
    }
}

/// Mutable half of the pre-execution payload: the pending tool arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolExecuteOutput {
    #[serde(default)]
    pub args: ToolArgs,
}

impl ToolExecuteOutput {
    pub fn with_command(command: &str) -> Self {
        Self {
            args: ToolArgs {
                command: Some(command.to_string()),
            },
        }
    }
}

/// Arguments of a pending shell tool call. Non-shell tools carry no command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}
