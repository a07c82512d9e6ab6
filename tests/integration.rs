use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use makefile_deploy_guard::check_command;
use makefile_deploy_guard::guard::{self, MakefileDeployGuard};
use makefile_deploy_guard::hooks::HookEvent;
use makefile_deploy_guard::host::{
    HostClient, LogEntry, LogLevel, PluginInit, ToolExecuteInput, ToolExecuteOutput,
};

/// A project directory with a Makefile at its root.
fn makefile_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Makefile"), "deploy:\n\twrangler deploy\n").unwrap();
    dir
}

/// A project directory without any Makefile.
fn bare_project() -> TempDir {
    TempDir::new().unwrap()
}

fn blocked(dir: &Path, tool: &str, command: &str) -> bool {
    check_command(dir, tool, command).is_err()
}

macro_rules! blocked_test {
    ($name:ident, $cmd:expr) => {
        #[test]
        fn $name() {
            let dir = makefile_project();
            assert!(blocked(dir.path(), "bash", $cmd), "command: {}", $cmd);
        }
    };
}

macro_rules! allowed_test {
    ($name:ident, $cmd:expr) => {
        #[test]
        fn $name() {
            let dir = makefile_project();
            assert!(!blocked(dir.path(), "bash", $cmd), "command: {}", $cmd);
        }
    };
}

/// Records every entry logged through the host client.
#[derive(Default)]
struct RecordingClient {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingClient {
    fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl HostClient for RecordingClient {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ── BLOCKED: raw deploy commands ──

blocked_test!(blocks_wrangler_deploy, "wrangler deploy");
blocked_test!(blocks_wrangler_deploy_with_flags, "wrangler deploy --env production");
blocked_test!(blocks_npx_wrangler_deploy, "npx wrangler deploy");
blocked_test!(blocks_bun_run_deploy, "bun run deploy");
blocked_test!(blocks_bun_run_deploy_worker, "bun run deploy:worker");
blocked_test!(blocks_bun_run_deploy_auth, "bun run deploy:auth");
blocked_test!(blocks_bun_run_deploy_frontend, "bun run deploy:frontend");
blocked_test!(blocks_npm_run_deploy, "npm run deploy");
blocked_test!(blocks_padded_whitespace, "  wrangler   deploy  ");
blocked_test!(blocks_tab_separated, "wrangler\tdeploy");

// ── ALLOWED: everything else ──

allowed_test!(allows_make_deploy, "make deploy");
allowed_test!(allows_make_deploy_worker, "make deploy-worker");
allowed_test!(allows_make_help, "make help");
allowed_test!(allows_wrangler_publish, "wrangler publish");
allowed_test!(allows_wrangler_dev, "wrangler dev");
allowed_test!(allows_wrangler_tail, "wrangler tail");
allowed_test!(allows_bun_run_build, "bun run build");
allowed_test!(allows_npm_run_test, "npm run test");
allowed_test!(allows_npm_install, "npm install wrangler");
allowed_test!(allows_echo, "echo hello");
allowed_test!(allows_git_push, "git push origin main");
allowed_test!(allows_deploy_text_mid_command, "echo wrangler deploy");
allowed_test!(allows_npm_run_deployment, "npm run deployment");
allowed_test!(allows_empty_command, "");

// ── Bypass mode: no Makefile ──

#[test]
fn no_makefile_registers_no_hooks() {
    let dir = bare_project();
    let hooks = MakefileDeployGuard::init(PluginInit::new(dir.path()));
    assert!(hooks.is_empty());
}

#[test]
fn no_makefile_allows_raw_deploys() {
    let dir = bare_project();
    assert!(!blocked(dir.path(), "bash", "wrangler deploy"));
    assert!(!blocked(dir.path(), "bash", "npm run deploy"));
}

#[test]
fn no_makefile_logs_one_bypass_notice() {
    let dir = bare_project();
    let client = Arc::new(RecordingClient::default());
    let hooks =
        MakefileDeployGuard::init(PluginInit::new(dir.path()).with_client(client.clone()));
    assert!(hooks.is_empty());

    let entries = client.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].service, guard::SERVICE);
    assert_eq!(entries[0].level, LogLevel::Info);
    assert_eq!(entries[0].message, guard::BYPASS_MESSAGE);
    assert!(entries[0].extra.is_none());
}

#[test]
fn no_makefile_without_client_is_silent() {
    let dir = bare_project();
    let hooks = MakefileDeployGuard::init(PluginInit::new(dir.path()));
    assert!(hooks.is_empty());
}

// ── Armed mode: Makefile present ──

#[test]
fn makefile_registers_exactly_one_hook() {
    let dir = makefile_project();
    let hooks = MakefileDeployGuard::init(PluginInit::new(dir.path()));
    assert_eq!(hooks.len(), 1);
    assert!(hooks.contains(HookEvent::ToolExecuteBefore));
}

#[test]
fn lowercase_makefile_also_arms_the_guard() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("makefile"), "deploy:\n").unwrap();
    let hooks = MakefileDeployGuard::init(PluginInit::new(dir.path()));
    assert_eq!(hooks.len(), 1);
    assert!(blocked(dir.path(), "bash", "wrangler deploy"));
}

#[test]
fn armed_init_logs_nothing() {
    let dir = makefile_project();
    let client = Arc::new(RecordingClient::default());
    let _hooks =
        MakefileDeployGuard::init(PluginInit::new(dir.path()).with_client(client.clone()));
    assert!(client.entries().is_empty());
}

// ── Tool filtering ──

#[test]
fn shell_tool_is_guarded() {
    let dir = makefile_project();
    assert!(blocked(dir.path(), "shell", "wrangler deploy"));
}

#[test]
fn other_tools_pass_deploy_text() {
    let dir = makefile_project();
    assert!(!blocked(dir.path(), "read", "wrangler deploy"));
    assert!(!blocked(dir.path(), "edit", "npm run deploy"));
    assert!(!blocked(dir.path(), "webfetch", "bun run deploy"));
}

#[test]
fn tool_names_match_exactly() {
    // The plugin contract spells tools lowercase; "Bash" is not guarded here.
    // The subprocess adapter lowercases before dispatch.
    let dir = makefile_project();
    assert!(!blocked(dir.path(), "Bash", "wrangler deploy"));
}

#[test]
fn session_metadata_does_not_affect_the_decision() {
    let dir = makefile_project();
    let hooks = MakefileDeployGuard::init(PluginInit::new(dir.path()));
    let input = ToolExecuteInput {
        tool: "bash".into(),
        session_id: Some("ses_01".into()),
        call_id: Some("call_07".into()),
    };
    let result =
        hooks.dispatch_before_execute(&input, &ToolExecuteOutput::with_command("npm run deploy"));
    assert!(result.is_err());
}

// ── Veto logging ──

#[test]
fn veto_logs_the_raw_command() {
    let dir = makefile_project();
    let client = Arc::new(RecordingClient::default());
    let hooks =
        MakefileDeployGuard::init(PluginInit::new(dir.path()).with_client(client.clone()));

    let raw = "  npx   wrangler deploy";
    let result = hooks.dispatch_before_execute(
        &ToolExecuteInput::new("bash"),
        &ToolExecuteOutput::with_command(raw),
    );
    assert!(result.is_err());

    let entries = client.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].service, guard::SERVICE);
    assert_eq!(entries[0].level, LogLevel::Info);
    assert_eq!(entries[0].message, guard::BLOCKED_MESSAGE);
    // extra carries the command as submitted, not the normalized form
    assert_eq!(
        entries[0]
            .extra
            .as_ref()
            .and_then(|extra| extra["command"].as_str()),
        Some(raw)
    );
}

#[test]
fn allowed_commands_log_nothing() {
    let dir = makefile_project();
    let client = Arc::new(RecordingClient::default());
    let hooks =
        MakefileDeployGuard::init(PluginInit::new(dir.path()).with_client(client.clone()));

    hooks
        .dispatch_before_execute(
            &ToolExecuteInput::new("bash"),
            &ToolExecuteOutput::with_command("make deploy"),
        )
        .unwrap();
    assert!(client.entries().is_empty());
}

#[test]
fn veto_without_client_still_blocks() {
    let dir = makefile_project();
    assert!(blocked(dir.path(), "bash", "wrangler deploy"));
}

// ── Veto notice ──

#[test]
fn notice_names_command_and_makefile_targets() {
    let dir = makefile_project();
    let err = check_command(dir.path(), "bash", "wrangler deploy --env production").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("🚫 Direct deploy blocked by MakefileDeployGuard."));
    assert!(msg.contains("wrangler deploy --env production"));
    assert!(msg.contains("make deploy          # full deploy"));
    assert!(msg.contains("make deploy-worker   # just the API worker"));
    assert!(msg.contains("Run 'make help'"));
}
