//! Constrained single-line text fields.
//!
//! A field keeps its value valid after every edit event, whatever the origin:
//! typed characters, paste, drag-and-drop, composed input, deletion, blur and
//! out-of-band mutation caught by periodic reconciliation.
//!
//! # Architecture
//!
//! - [`FieldConfig`]: allow-list, length limit, prefix and normalization rules
//! - [`sanitize`] / [`sanitize_tracked`]: the one normalization pipeline,
//!   tracking where each surviving character came from
//! - [`StringBuffer`]: char-offset string storage
//! - [`Selection`]: caret and selection
//! - [`ConstrainedTextField`]: field state and the edit operations
//! - [`FieldMsg`]: raw host events, dispatched through
//!   [`ConstrainedTextField::update`]
//! - [`Signal`] / [`EditOutcome`]: advisory feedback and results
//! - [`FieldKind`]: the form's field presets and their user-facing wording
//!
//! # Example
//!
//! ```
//! use guarded_input::editable::{ConstrainedTextField, FieldConfig};
//!
//! let mut field = ConstrainedTextField::new(FieldConfig::resources());
//! assert_eq!(field.value(), "Resources_");
//!
//! field.on_paste("  Lab   Manual!  ", 10, 10);
//! assert_eq!(field.value(), "Resources_Lab Manual");
//! assert_eq!(field.semantic_value(), "Lab Manual");
//! ```

mod buffer;
mod constraints;
mod context;
mod messages;
mod outcome;
mod sanitize;
mod selection;
mod state;

// Re-export main types
pub use buffer::StringBuffer;
pub use constraints::{CharFilter, FieldConfig, RESOURCES_PREFIX};
pub use context::FieldKind;
pub use messages::{FieldMsg, MoveTarget};
pub use outcome::{Decision, EditOutcome, Signal};
pub use sanitize::{rejected_chars, sanitize, sanitize_tracked, SanitizeOptions, Sanitized};
pub use selection::Selection;
pub use state::ConstrainedTextField;
