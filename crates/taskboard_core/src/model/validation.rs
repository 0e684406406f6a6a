//! Required-text validation shared by both stores.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected user input. Reported to the caller as a notice; state is left
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyProjectName,
    EmptyTaskTitle,
    EmptyNote,
    EmptyTodoText,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProjectName => write!(f, "Project name required!"),
            Self::EmptyTaskTitle => write!(f, "Task title required!"),
            Self::EmptyNote => write!(f, "Note cannot be empty!"),
            Self::EmptyTodoText => write!(f, "Task text cannot be empty!"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it with `error` when nothing is left.
pub fn require_text(value: &str, error: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{require_text, ValidationError};

    #[test]
    fn require_text_trims_surrounding_whitespace() {
        assert_eq!(
            require_text("  ship it \n", ValidationError::EmptyTaskTitle).unwrap(),
            "ship it"
        );
    }

    #[test]
    fn require_text_rejects_whitespace_only() {
        let err = require_text(" \t\n", ValidationError::EmptyNote).unwrap_err();
        assert_eq!(err, ValidationError::EmptyNote);
        assert_eq!(err.to_string(), "Note cannot be empty!");
    }
}
