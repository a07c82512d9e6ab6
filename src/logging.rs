use std::fs::OpenOptions;
use std::path::PathBuf;

use simplelog::WriteLogger;

use crate::config::Settings;
use crate::host::{HostClient, LogEntry, LogLevel};

/// Initialize file logging for the hook binary, appending to the guard log.
/// Best-effort: every failure path (no HOME, unwritable path, logger already
/// set) leaves logging uninitialized. Logging must never block the hook.
pub fn init(settings: &Settings) {
    let Some(path) = log_path(settings) else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = WriteLogger::init(
        settings.level_filter(),
        simplelog::Config::default(),
        file,
    );
}

/// Resolve the log destination: the configured override, or
/// ~/.local/share/makefile-deploy-guard/guard.log.
fn log_path(settings: &Settings) -> Option<PathBuf> {
    if !settings.log_file.is_empty() {
        return Some(PathBuf::from(&settings.log_file));
    }
    let home = std::env::var_os("HOME")?;
    Some(std::path::Path::new(&home).join(".local/share/makefile-deploy-guard/guard.log"))
}

/// A [`HostClient`] that forwards entries into the `log` facade.
///
/// The subprocess adapter has no host services, so guard log entries land in
/// the hook's own log file instead.
pub struct LogClient;

impl HostClient for LogClient {
    fn log(&self, entry: &LogEntry) {
        let text = format_entry(entry);
        match entry.level {
            LogLevel::Debug => log::debug!("{text}"),
            LogLevel::Info => log::info!("{text}"),
            LogLevel::Warn => log::warn!("{text}"),
            LogLevel::Error => log::error!("{text}"),
        }
    }
}

/// Render an entry as one log line: service prefix, message, then the extra
/// metadata as compact JSON when present.
fn format_entry(entry: &LogEntry) -> String {
    match &entry.extra {
        Some(extra) => format!("{}: {} {}", entry.service, entry.message, extra),
        None => format!("{}: {}", entry.service, entry.message),
    }
}
