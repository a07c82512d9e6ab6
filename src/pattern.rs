use std::sync::LazyLock;

use regex::Regex;

/// Matches direct deploy invocations at the start of a command, with or
/// without an `npx` prefix. Case-sensitive and anchored: deploy text buried
/// later in a command line is not a match.
pub const DEPLOY_PATTERN: &str = r"^(?:npx\s+)?\b(?:wrangler deploy|bun run deploy(?::worker|:auth|:frontend)?|npm run deploy)\b";

static DEPLOY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEPLOY_PATTERN).expect("deploy pattern must compile"));

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Test whether a command is a raw deploy invocation.
pub fn is_raw_deploy(command: &str) -> bool {
    DEPLOY_REGEX.is_match(&normalize(command))
}
