//! Makefile detection and the deploy guard hook.
//!
//! The guard decides its mode once, at plugin initialization: a project
//! without a Makefile gets no hooks at all (direct deploys stay allowed),
//! while a project with one gets a single pre-execution hook that vetoes
//! raw deploy commands.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::error::GuardError;
use crate::hooks::{ExecutionHook, HookEvent, HookSet};
use crate::host::{HostClient, LogEntry, PluginInit, ToolExecuteInput, ToolExecuteOutput};
use crate::pattern;

/// Service tag on every log entry this plugin emits.
pub const SERVICE: &str = "makefile-deploy-guard";

/// Logged once at initialization when the project has no Makefile.
pub const BYPASS_MESSAGE: &str =
    "No Makefile found. Plugin is bypassing and allowing direct deploys.";

/// Logged when a raw deploy command is vetoed.
pub const BLOCKED_MESSAGE: &str = "Blocked direct deploy command";

/// Tools whose commands are guarded. Everything else passes untouched.
const GUARDED_TOOLS: &[&str] = &["bash", "shell"];

pub struct MakefileDeployGuard;

impl MakefileDeployGuard {
    /// Initialize the plugin for a project.
    ///
    /// Probes the project root for `Makefile` or `makefile` once. When one
    /// exists, the returned set holds exactly one pre-execution hook; when
    /// none does, the set is empty (plugin disabled) and a single bypass
    /// notice goes to the host client. Initialization itself never fails.
    pub fn init(init: PluginInit) -> HookSet {
        let mut hooks = HookSet::new();

        if !has_makefile(&init.directory) {
            if let Some(client) = &init.client {
                client.log(&LogEntry::info(SERVICE, BYPASS_MESSAGE));
            }
            return hooks;
        }

        hooks.register(
            HookEvent::ToolExecuteBefore,
            Box::new(DeployGuardHook {
                client: init.client,
            }),
        );
        hooks
    }
}

/// Check for a Makefile in the project root. Unreadable paths count as absent.
fn has_makefile(dir: &Path) -> bool {
    dir.join("Makefile").exists() || dir.join("makefile").exists()
}

/// The registered pre-execution handler: vetoes raw deploy commands issued
/// through the shell tools.
pub struct DeployGuardHook {
    client: Option<Arc<dyn HostClient>>,
}

impl ExecutionHook for DeployGuardHook {
    fn before_execute(
        &self,
        input: &ToolExecuteInput,
        output: &ToolExecuteOutput,
    ) -> Result<(), GuardError> {
        if !GUARDED_TOOLS.contains(&input.tool.as_str()) {
            return Ok(());
        }
        let Some(command) = output.args.command.as_deref() else {
            return Ok(());
        };
        if command.is_empty() || !pattern::is_raw_deploy(command) {
            return Ok(());
        }

        // The log call completes before the veto is returned; extra carries
        // the command exactly as submitted, not the normalized form.
        if let Some(client) = &self.client {
            client.log(
                &LogEntry::info(SERVICE, BLOCKED_MESSAGE).with_extra(json!({ "command": command })),
            );
        }
        Err(GuardError::blocked(command))
    }
}
