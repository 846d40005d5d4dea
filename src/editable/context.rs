//! Field kinds of the upload form.
//!
//! Identifies which logical input a field instance backs and provides its
//! preset configuration and user-facing wording.

use serde::{Deserialize, Serialize};

use super::constraints::FieldConfig;
use super::outcome::Signal;

/// Identifies which form input a field is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Uploader's name
    Name,
    /// Subject label
    Subject,
    /// Resources label behind the `Resources_` prefix
    Resources,
}

impl FieldKind {
    /// Get the preset configuration for this field
    pub fn config(&self) -> FieldConfig {
        match self {
            FieldKind::Name => FieldConfig::name(),
            FieldKind::Subject => FieldConfig::subject(),
            FieldKind::Resources => FieldConfig::resources(),
        }
    }

    /// Human-readable field label
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Name => "Name",
            FieldKind::Subject => "Subject",
            FieldKind::Resources => "Resources",
        }
    }

    /// Description of the allow-list for messages
    pub fn allowed_description(&self) -> &'static str {
        match self {
            FieldKind::Name => "letters (a-z, A-Z)",
            FieldKind::Subject | FieldKind::Resources => {
                "letters (a-z, A-Z), numbers (0-9), spaces, and hyphens (-)"
            }
        }
    }

    /// Message a host can show for a signal; `None` for silent signals.
    pub fn message(&self, signal: &Signal, config: &FieldConfig) -> Option<String> {
        match signal {
            Signal::InvalidCharacter(chars) if !chars.is_empty() => {
                let found: Vec<String> = chars.iter().map(|c| c.to_string()).collect();
                Some(format!(
                    "Invalid characters detected! Only {} are allowed. Found: {}",
                    self.allowed_description(),
                    found.join(", ")
                ))
            }
            Signal::InvalidCharacter(_) => None,
            Signal::LimitReached if config.prefix.is_empty() => Some(format!(
                "{} cannot exceed {} characters",
                self.label(),
                config.max_length
            )),
            Signal::LimitReached => Some(format!(
                "{} cannot exceed {} characters (excluding \"{}\")",
                self.label(),
                config.max_length,
                config.prefix
            )),
            Signal::Blocked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_configs() {
        assert_eq!(FieldKind::Name.config().max_length, 20);
        assert_eq!(FieldKind::Subject.config().max_length, 30);
        assert_eq!(FieldKind::Resources.config().prefix, "Resources_");
    }

    #[test]
    fn test_limit_messages() {
        let kind = FieldKind::Resources;
        let msg = kind.message(&Signal::LimitReached, &kind.config()).unwrap();
        assert_eq!(
            msg,
            "Resources cannot exceed 30 characters (excluding \"Resources_\")"
        );

        let kind = FieldKind::Subject;
        let msg = kind.message(&Signal::LimitReached, &kind.config()).unwrap();
        assert_eq!(msg, "Subject cannot exceed 30 characters");
    }

    #[test]
    fn test_invalid_character_message() {
        let kind = FieldKind::Subject;
        let msg = kind
            .message(&Signal::InvalidCharacter(vec!['@', '!']), &kind.config())
            .unwrap();
        assert!(msg.ends_with("Found: @, !"));
        assert!(msg.contains("hyphens"));
    }

    #[test]
    fn test_blocked_is_silent() {
        let kind = FieldKind::Resources;
        assert!(kind.message(&Signal::Blocked, &kind.config()).is_none());
    }
}
