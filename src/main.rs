//! makefile-deploy-guard: pre-execution hook for shell tool calls.
//!
//! Reads a tool-call description as JSON from stdin. When the working
//! project contains a Makefile and the command is a raw deploy invocation
//! (`wrangler deploy`, `bun run deploy[:target]`, `npm run deploy`, with or
//! without an `npx` prefix), writes a deny decision to stdout; otherwise
//! writes nothing. Every decision exits 0; only unreadable or malformed
//! input exits 1.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use makefile_deploy_guard::config::Config;
use makefile_deploy_guard::guard::MakefileDeployGuard;
use makefile_deploy_guard::host::{PluginInit, ToolExecuteInput, ToolExecuteOutput};
use makefile_deploy_guard::logging::{self, LogClient};

#[derive(Deserialize)]
struct HookInput {
    tool_name: Option<String>,
    tool_input: Option<ToolInput>,
    cwd: Option<String>,
}

#[derive(Deserialize)]
struct ToolInput {
    command: Option<String>,
}

/// Subprocess hosts report tool names capitalized ("Bash"); the plugin
/// contract spells them lowercase.
fn canonical_tool(tool_name: Option<String>) -> String {
    tool_name.unwrap_or_default().to_lowercase()
}

/// The host's decision payload for a vetoed command.
fn deny_decision(reason: &str) -> serde_json::Value {
    serde_json::json!({
        "hookSpecificOutput": {
            "hookEventName": "PreToolUse",
            "permissionDecision": "deny",
            "permissionDecisionReason": reason,
        }
    })
}

fn main() {
    let config = Config::load();
    logging::init(&config.settings);

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(1);
    }

    let hook_input: HookInput = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("JSON parse error: {e}");
            std::process::exit(1);
        }
    };

    let tool = canonical_tool(hook_input.tool_name);

    let directory = hook_input
        .cwd
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default();

    let init = PluginInit::new(directory).with_client(Arc::new(LogClient));
    let hooks = MakefileDeployGuard::init(init);
    if hooks.is_empty() {
        // No Makefile: bypass mode, nothing to enforce.
        std::process::exit(0);
    }

    let command = hook_input
        .tool_input
        .and_then(|t| t.command)
        .unwrap_or_default();

    let result = hooks.dispatch_before_execute(
        &ToolExecuteInput::new(&tool),
        &ToolExecuteOutput::with_command(&command),
    );

    match result {
        Ok(()) => {
            log::debug!("allowed: {tool} {command}");
        }
        Err(err) => {
            let output = deny_decision(&err.to_string());
            println!("{}", serde_json::to_string(&output).unwrap());
        }
    }
}
