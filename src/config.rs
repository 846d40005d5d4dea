//! Field configuration persistence
//!
//! Stores per-field overrides in `~/.config/guarded-input/config.yaml`:
//!
//! ```yaml
//! reconcile_interval_ms: 100
//! fields:
//!   resources:
//!     max_length: 40
//!   name:
//!     forbidden: [isk, admin, root]
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::editable::{CharFilter, FieldConfig, FieldKind};
use crate::util::{is_ascii_letter, is_label_char};

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// How often the host should call `reconcile`, in milliseconds
    #[serde(default = "default_reconcile_interval_ms")]
    pub reconcile_interval_ms: u64,

    /// Per-field overrides on top of the presets
    #[serde(default)]
    pub fields: HashMap<FieldKind, FieldOverrides>,
}

fn default_reconcile_interval_ms() -> u64 {
    100
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            reconcile_interval_ms: default_reconcile_interval_ms(),
            fields: HashMap::new(),
        }
    }
}

/// Named allow-lists selectable from YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// ASCII letters
    Letters,
    /// ASCII letters, digits, whitespace and `-`
    Label,
    /// Anything
    Any,
}

impl CharClass {
    pub fn filter(self) -> CharFilter {
        match self {
            CharClass::Letters => is_ascii_letter,
            CharClass::Label => is_label_char,
            CharClass::Any => |_| true,
        }
    }
}

/// Optional replacements for a preset's rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbidden: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<CharClass>,
    /// Only affects keystroke previews; blur still collapses runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_whitespace: Option<bool>,
}

impl FieldOverrides {
    /// Apply the overrides that are set, keeping the rest of `config`
    pub fn apply(&self, mut config: FieldConfig) -> FieldConfig {
        if let Some(max_length) = self.max_length {
            config.max_length = max_length;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(forbidden) = &self.forbidden {
            config.forbidden_substrings = forbidden.clone();
        }
        if let Some(allowed) = self.allowed {
            config.char_filter = allowed.filter();
        }
        if let Some(collapse) = self.collapse_whitespace {
            config.collapse_whitespace = collapse;
        }
        config
    }
}

impl GuardConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Preset for `kind` with any configured overrides applied
    pub fn field_config(&self, kind: FieldKind) -> FieldConfig {
        match self.fields.get(&kind) {
            Some(overrides) => overrides.apply(kind.config()),
            None => kind.config(),
        }
    }

    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_millis(self.reconcile_interval_ms)
    }

    /// A timer for driving `reconcile` at the configured interval
    pub fn reconcile_timer(&self) -> ReconcileTimer {
        ReconcileTimer::new(self.reconcile_interval())
    }
}

/// Host-driven tick source for periodic reconciliation.
///
/// The host calls [`ReconcileTimer::poll`] from its own loop with the current
/// time; the timer only decides whether a tick is due.
#[derive(Debug, Clone)]
pub struct ReconcileTimer {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl ReconcileTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true (and records the tick) if a reconcile is due at `now`.
    /// The first poll is always due.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last_tick {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.last_tick = Some(now);
        }
        due
    }

    /// Stop tracking; the next poll is due immediately
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
