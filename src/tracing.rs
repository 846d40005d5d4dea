//! Tracing infrastructure for field diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=guarded_input::editable=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/guarded-input/logs/guarded-input.log` with
//! daily rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::editable::ConstrainedTextField;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`) and goes to stderr so
/// command output on stdout stays machine-readable.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of a field's value and caret for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub value: String,
    pub anchor: usize,
    pub head: usize,
}

impl FieldSnapshot {
    pub fn from_field(field: &ConstrainedTextField) -> Self {
        let selection = field.selection();
        Self {
            value: field.value().to_string(),
            anchor: selection.anchor,
            head: selection.head,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FieldSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.value != other.value {
            changes.push(format!("value: {:?} → {:?}", self.value, other.value));
        }
        if self.head != other.head {
            changes.push(format!("caret: {} → {}", self.head, other.head));
        }
        let was_empty = self.anchor == self.head;
        let is_empty = other.anchor == other.head;
        if was_empty != is_empty {
            let status = if is_empty { "cleared" } else { "active" };
            changes.push(format!("selection {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::FieldConfig;

    #[test]
    fn test_snapshot_diff() {
        let mut field = ConstrainedTextField::new(FieldConfig::resources());
        let before = FieldSnapshot::from_field(&field);
        assert_eq!(before.diff(&before), None);

        field.on_character_typed('a', 10);
        let after = FieldSnapshot::from_field(&field);
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("caret: 10 → 11"));
        assert!(diff.contains("Resources_a"));

        field.select_all();
        let selected = FieldSnapshot::from_field(&field);
        assert_eq!(after.diff(&selected).as_deref(), Some("selection active"));
    }
}
