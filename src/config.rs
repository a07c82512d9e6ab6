use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    /// Hook log verbosity: off, error, warn, info, debug, trace.
    /// Unrecognized values fall back to info.
    #[serde(default)]
    pub log_level: String,
    /// Log file path override. Empty selects
    /// `~/.local/share/makefile-deploy-guard/guard.log`.
    #[serde(default)]
    pub log_file: String,
}

impl Settings {
    /// Parse the configured verbosity for the `log` facade.
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    log_level: Option<String>,
    log_file: Option<String>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/makefile-deploy-guard/config.toml (if exists)
    ///
    /// Scalars override; keys omitted from the overlay keep their defaults.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/makefile-deploy-guard/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path =
            std::path::Path::new(&home).join(".config/makefile-deploy-guard/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("makefile-deploy-guard: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (scalar override semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(v) = overlay.settings.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = overlay.settings.log_file {
            self.settings.log_file = v;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
