//! Upload file naming.
//!
//! Turns the submitted form values into the PDF names the uploader stores,
//! and validates which upload kinds were picked.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Most upload kinds a single submission may select
pub const MAX_SELECTIONS: usize = 3;

/// Uploader details shared by every file of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDetails {
    pub branch: String,
    pub sem: String,
    pub name: String,
    pub year: String,
}

/// One kind of file in a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum UploadKind {
    /// Resources file with its label (prefix already stripped)
    Resources(String),
    /// Subject file with its label
    Subject(String),
    Ese,
    Ise1,
    Ise2,
    Combined,
}

impl UploadKind {
    /// Position in the canonical upload order
    fn rank(&self) -> usize {
        match self {
            UploadKind::Resources(_) => 0,
            UploadKind::Subject(_) => 1,
            UploadKind::Ese => 2,
            UploadKind::Ise1 => 3,
            UploadKind::Ise2 => 4,
            UploadKind::Combined => 5,
        }
    }

    /// Display name; labelled kinds show their label, in parentheses when
    /// `include_details` is set
    pub fn friendly_name(&self, include_details: bool) -> String {
        match self {
            UploadKind::Resources(label) if include_details => format!("Resources ({})", label),
            UploadKind::Subject(label) if include_details => format!("Subject ({})", label),
            UploadKind::Resources(label) | UploadKind::Subject(label) => label.clone(),
            UploadKind::Ese => "ESE".to_string(),
            UploadKind::Ise1 => "ISE 1".to_string(),
            UploadKind::Ise2 => "ISE 2".to_string(),
            UploadKind::Combined => "COMBINED".to_string(),
        }
    }
}

/// Why a selection of upload kinds was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    Empty,
    TooMany(usize),
    MissingResourcesName,
    MissingSubjectName,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::Empty => write!(f, "Please select at least one file type to upload."),
            SelectionError::TooMany(_) => write!(
                f,
                "You can select a maximum of {} file types (including Subject and Resources).",
                MAX_SELECTIONS
            ),
            SelectionError::MissingResourcesName => write!(f, "Please enter the resources name."),
            SelectionError::MissingSubjectName => write!(f, "Please enter the subject name."),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Validate a selection and return it in canonical upload order
/// (resources, subject, ESE, ISE 1, ISE 2, COMBINED). Duplicates collapse.
pub fn upload_order(selected: &[UploadKind]) -> Result<Vec<UploadKind>, SelectionError> {
    let mut order: Vec<UploadKind> = Vec::with_capacity(selected.len());
    for kind in selected {
        if !order.iter().any(|k| k.rank() == kind.rank()) {
            order.push(kind.clone());
        }
    }
    order.sort_by_key(UploadKind::rank);

    for kind in &order {
        match kind {
            UploadKind::Resources(label) if label.trim().is_empty() => {
                return Err(SelectionError::MissingResourcesName)
            }
            UploadKind::Subject(label) if label.trim().is_empty() => {
                return Err(SelectionError::MissingSubjectName)
            }
            _ => {}
        }
    }

    match order.len() {
        0 => Err(SelectionError::Empty),
        n if n > MAX_SELECTIONS => Err(SelectionError::TooMany(n)),
        _ => Ok(order),
    }
}

impl UploadDetails {
    /// Stored file name for one upload kind
    pub fn file_name(&self, kind: &UploadKind) -> String {
        let middle = match kind {
            UploadKind::Resources(label) => format!("Resources_{}", label),
            _ => kind.friendly_name(false).replace(' ', ""),
        };
        format!(
            "{}_{}_{}({})<{}>.pdf",
            self.branch, middle, self.sem, self.name, self.year
        )
    }
}
