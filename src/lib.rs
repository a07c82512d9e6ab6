//! makefile-deploy-guard: a pre-execution hook that blocks raw deploy
//! commands in projects driven by a Makefile.
//!
//! At initialization the guard probes the project root for a `Makefile`
//! (either casing). When one exists it registers a single
//! [`hooks::HookEvent::ToolExecuteBefore`] handler that normalizes bash/shell
//! commands, tests them against a fixed deploy pattern
//! ([`pattern::DEPLOY_PATTERN`]), and vetoes matches with
//! [`GuardError::BlockedCommand`]. When no Makefile exists it registers
//! nothing, and every command runs unimpeded.
//!
//! # Architecture
//!
//! - **[`host`]** — Host plugin contract: init payload, tool-call halves, log entries.
//! - **[`hooks`]** — Hook registration: event names, handler trait, dispatch.
//! - **[`guard`]** — The guard itself: Makefile probe, tool filter, veto.
//! - **[`pattern`]** — The fixed raw-deploy matcher and command normalization.
//! - **[`error`]** — The blocked-command error and its user-facing notice.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Hook logging to `~/.local/share/makefile-deploy-guard/guard.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// The blocked-command error.
pub mod error;
/// Makefile detection and the deploy guard hook.
pub mod guard;
/// Hook events, the handler trait, and the registration set.
pub mod hooks;
/// Host plugin contract types.
pub mod host;
/// File-based hook logging and the host-client bridge.
pub mod logging;
/// The raw-deploy command matcher.
pub mod pattern;

use std::path::Path;

pub use error::GuardError;
pub use guard::MakefileDeployGuard;
pub use hooks::HookSet;
pub use host::PluginInit;

/// Initialize the guard for a project and run one command through it.
///
/// This is the main entry point for tests and simple usage. For host
/// integration with logging, build a [`PluginInit`] with a client and keep
/// the returned [`HookSet`] for the session.
pub fn check_command(directory: &Path, tool: &str, command: &str) -> Result<(), GuardError> {
    let hooks = MakefileDeployGuard::init(PluginInit::new(directory));
    hooks.dispatch_before_execute(
        &host::ToolExecuteInput::new(tool),
        &host::ToolExecuteOutput::with_command(command),
    )
}
