//! Error types for list and todo operations.

use thiserror::Error;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// What kind of name failed validation, so the message can say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    List,
    Todo,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => f.write_str("List name"),
            Self::Todo => f.write_str("Todo"),
        }
    }
}

/// Errors raised by list and todo operations.
///
/// The `Display` text is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Trimmed name is empty or longer than the allowed maximum.
    #[error("{0} must be between 1 and 100 characters.")]
    TooShortOrLong(NameKind),

    /// Another list already has this name.
    #[error("List name must be unique.")]
    DuplicateName,

    #[error("The specified list was not found.")]
    ListNotFound,

    #[error("The specified todo was not found.")]
    TodoNotFound,
}

impl TodoError {
    /// Validation failures are recovered by re-rendering the originating form.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::TooShortOrLong(_) | Self::DuplicateName)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ListNotFound | Self::TodoNotFound)
    }
}
