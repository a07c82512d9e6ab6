use thiserror::Error;

/// Errors a guard hook can raise to veto a tool call.
#[derive(Debug, Error)]
pub enum GuardError {
    /// A raw deploy command was vetoed in a Makefile-driven project.
    /// Displays as the full multi-line notice shown to the user.
    #[error("{}", blocked_notice(.command))]
    BlockedCommand {
        /// The offending command, exactly as submitted.
        command: String,
    },
}

impl GuardError {
    pub fn blocked(command: impl Into<String>) -> Self {
        GuardError::BlockedCommand {
            command: command.into(),
        }
    }
}

/// The user-facing veto notice. Points at the Makefile targets that replace
/// the blocked invocation.
fn blocked_notice(command: &str) -> String {
    format!(
        r"🚫 Direct deploy blocked by MakefileDeployGuard.

This project must use the Makefile so env + secrets are wired correctly.
Instead of:
  {command}

Use the Makefile. For example:
  make deploy          # full deploy
  make deploy-worker   # just the API worker

Run 'make help' or look at the Makefile for all available deployment targets."
    )
}
