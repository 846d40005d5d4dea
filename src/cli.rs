//! Command-line interface for exercising constrained fields
//!
//! Supports:
//! - Sanitizing a value with a field's rules
//! - Replaying a YAML script of edit events against a field
//! - Building upload file names from form values

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::GuardConfig;
use crate::editable::{
    sanitize_tracked, ConstrainedTextField, EditOutcome, FieldKind, FieldMsg, SanitizeOptions,
    Signal,
};
use crate::upload_name::{upload_order, UploadDetails, UploadKind};

/// Constrained text input toolkit
#[derive(Parser, Debug)]
#[command(name = "guarded-input", version, about = "Constrained text input toolkit")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/guarded-input/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the sanitized value of TEXT for a field
    Sanitize {
        /// Field whose rules apply
        #[arg(long, value_enum)]
        field: FieldKind,
        /// Trim leading and trailing whitespace
        #[arg(long)]
        trim: bool,
        /// Keep whitespace runs as typed
        #[arg(long)]
        no_collapse: bool,
        /// Text to sanitize (prefix excluded)
        text: String,
    },
    /// Apply a YAML script of edit events and print each outcome as JSON
    Replay {
        /// Script file
        script: PathBuf,
        /// Override the field named in the script
        #[arg(long, value_enum)]
        field: Option<FieldKind>,
    },
    /// Print the upload file names for a submission, in upload order
    Filename(FilenameArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FilenameArgs {
    #[arg(long)]
    pub branch: String,
    #[arg(long)]
    pub sem: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub year: String,
    /// Resources label (the `Resources_` prefix may be included)
    #[arg(long, value_name = "LABEL")]
    pub resources: Option<String>,
    /// Subject label
    #[arg(long, value_name = "LABEL")]
    pub subject: Option<String>,
    #[arg(long)]
    pub ese: bool,
    #[arg(long)]
    pub ise1: bool,
    #[arg(long)]
    pub ise2: bool,
    #[arg(long)]
    pub combined: bool,
}

impl CliArgs {
    /// Load the explicit config file, or the default one with fallback
    pub fn load_config(&self) -> Result<GuardConfig> {
        match &self.config {
            Some(path) => GuardConfig::load_from(path),
            None => Ok(GuardConfig::load()),
        }
    }
}

/// Result of the `sanitize` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub value: String,
    pub rejected: Vec<char>,
    pub truncated: bool,
    pub forbidden_removed: bool,
    /// Messages a host would show for the signals
    pub messages: Vec<String>,
}

pub fn run_sanitize(
    config: &GuardConfig,
    kind: FieldKind,
    text: &str,
    options: SanitizeOptions,
) -> SanitizeReport {
    let field_config = config.field_config(kind);
    let sanitized = sanitize_tracked(&field_config, text, options);

    let mut signals = Vec::new();
    if !sanitized.rejected.is_empty() {
        signals.push(Signal::InvalidCharacter(sanitized.rejected.clone()));
    }
    if sanitized.truncated {
        signals.push(Signal::LimitReached);
    }
    let messages = signals
        .iter()
        .filter_map(|signal| kind.message(signal, &field_config))
        .collect();

    SanitizeReport {
        value: sanitized.text,
        rejected: sanitized.rejected,
        truncated: sanitized.truncated,
        forbidden_removed: sanitized.forbidden_removed,
        messages,
    }
}

/// A scripted sequence of host events for one field
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub field: FieldKind,
    /// Programmatic initial value
    #[serde(default)]
    pub value: Option<String>,
    pub events: Vec<FieldMsg>,
}

impl ReplayScript {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Apply every event of `script` in order, returning one outcome per event
pub fn run_replay(config: &GuardConfig, script: ReplayScript) -> Vec<EditOutcome> {
    let mut field = ConstrainedTextField::new(config.field_config(script.field));
    if let Some(value) = &script.value {
        field.set_value(value);
    }

    script
        .events
        .into_iter()
        .map(|msg| field.update(msg))
        .collect()
}

/// Build the upload file names for the selected kinds, in upload order.
///
/// The name and labels go through their fields' rules first, like a
/// submitted form would.
pub fn run_filename(config: &GuardConfig, args: &FilenameArgs) -> Result<Vec<String>> {
    let finalize = |kind: FieldKind, raw: &str| {
        let mut field = ConstrainedTextField::new(config.field_config(kind));
        field.set_value(raw);
        field.semantic_value()
    };

    let mut selected = Vec::new();
    if let Some(label) = &args.resources {
        selected.push(UploadKind::Resources(finalize(FieldKind::Resources, label)));
    }
    if let Some(label) = &args.subject {
        selected.push(UploadKind::Subject(finalize(FieldKind::Subject, label)));
    }
    for (flag, kind) in [
        (args.ese, UploadKind::Ese),
        (args.ise1, UploadKind::Ise1),
        (args.ise2, UploadKind::Ise2),
        (args.combined, UploadKind::Combined),
    ] {
        if flag {
            selected.push(kind);
        }
    }

    let name = finalize(FieldKind::Name, &args.name);
    anyhow::ensure!(!name.is_empty(), "Please fill in your name.");

    let details = UploadDetails {
        branch: args.branch.clone(),
        sem: args.sem.clone(),
        name,
        year: args.year.clone(),
    };

    let order = upload_order(&selected)?;
    Ok(order.iter().map(|kind| details.file_name(kind)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filename_args() -> FilenameArgs {
        FilenameArgs {
            branch: "CSE".to_string(),
            sem: "SEM3".to_string(),
            name: "jOHN".to_string(),
            year: "2024".to_string(),
            resources: None,
            subject: None,
            ese: false,
            ise1: false,
            ise2: false,
            combined: false,
        }
    }

    #[test]
    fn test_parse_sanitize_command() {
        let args = CliArgs::try_parse_from([
            "guarded-input",
            "sanitize",
            "--field",
            "name",
            "--trim",
            "Maverisk",
        ])
        .unwrap();
        assert!(args.config.is_none());
        match args.command {
            Command::Sanitize {
                field,
                trim,
                no_collapse,
                text,
            } => {
                assert_eq!(field, FieldKind::Name);
                assert!(trim);
                assert!(!no_collapse);
                assert_eq!(text, "Maverisk");
            }
            other => panic!("Expected sanitize, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "guarded-input",
            "replay",
            "script.yaml",
            "--config",
            "custom.yaml",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_run_sanitize_reports_rejections() {
        let config = GuardConfig::default();
        let report = run_sanitize(
            &config,
            FieldKind::Name,
            "admin123",
            SanitizeOptions::FINAL,
        );
        assert_eq!(report.value, "");
        assert_eq!(report.rejected, vec!['1', '2', '3']);
        assert!(report.forbidden_removed);
        assert_eq!(report.messages.len(), 1);
        assert!(report.messages[0].ends_with("Found: 1, 2, 3"));
    }

    #[test]
    fn test_run_replay() {
        let yaml = r#"
field: resources
events:
  - event: type_char
    ch: "A"
    caret: 10
  - event: delete_backward
  - event: delete_backward
"#;
        let script: ReplayScript = serde_yaml::from_str(yaml).unwrap();
        let outcomes = run_replay(&GuardConfig::default(), script);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].value, "Resources_A");
        assert_eq!(outcomes[1].value, "Resources_");
        assert_eq!(outcomes[2].signals, vec![Signal::Blocked]);
    }

    #[test]
    fn test_run_filename() {
        let mut args = filename_args();
        args.resources = Some("Resources_Lab  Manual".to_string());
        args.ise2 = true;
        let names = run_filename(&GuardConfig::default(), &args).unwrap();
        assert_eq!(
            names,
            vec![
                "CSE_Resources_Lab Manual_SEM3(John)<2024>.pdf".to_string(),
                "CSE_ISE2_SEM3(John)<2024>.pdf".to_string(),
            ]
        );
    }

    #[test]
    fn test_run_filename_requires_selection() {
        let err = run_filename(&GuardConfig::default(), &filename_args()).unwrap_err();
        assert!(err.to_string().contains("at least one file type"));
    }
}
