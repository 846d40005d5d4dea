//! guarded-input - constrained single-line text fields
//!
//! This crate provides text fields that stay valid after every edit event:
//! an allow-list of characters, a maximum length, an immutable prefix and
//! whitespace/capitalization normalization, plus the upload file naming the
//! fields feed into.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod tracing;
pub mod upload_name;
pub mod util;

// Re-export commonly used types
pub use config::GuardConfig;
pub use editable::{ConstrainedTextField, EditOutcome, FieldConfig, FieldKind, FieldMsg, Signal};
