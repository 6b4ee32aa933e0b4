pub mod validators;
pub mod registration;

use serde::{Deserialize, Serialize};

/// Outcome of one field check, shown as inline helper text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCheck {
    pub field: String,
    pub valid: bool,
    pub message: String,
}

impl FieldCheck {
    pub fn pass(field: &str, message: impl Into<String>) -> Self {
        FieldCheck {
            field: field.to_string(),
            valid: true,
            message: message.into(),
        }
    }

    pub fn fail(field: &str, message: impl Into<String>) -> Self {
        FieldCheck {
            field: field.to_string(),
            valid: false,
            message: message.into(),
        }
    }
}
