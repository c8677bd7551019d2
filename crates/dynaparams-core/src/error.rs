//! Error types for the parameter-building layer.

use dynaparams_model::ClientError;

/// Errors surfaced by builders and collection operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A builder that needs at least one field was given none.
    #[error("{builder} requires at least one field")]
    EmptyFieldList {
        /// Name of the builder that rejected the input.
        builder: &'static str,
    },

    /// A field was named twice in one update.
    #[error("field `{field}` appears more than once in one update")]
    DuplicateField {
        /// The repeated field name.
        field: String,
    },

    /// Two merged clauses would bind the same placeholder to different targets.
    #[error("placeholder `{placeholder}` is already bound by another clause")]
    PlaceholderCollision {
        /// The contested placeholder.
        placeholder: &'static str,
    },

    /// The client rejected the request. Passed through unchanged.
    #[error(transparent)]
    Transport(#[from] ClientError),
}

impl StoreError {
    /// The client error, if this failure came from the client.
    #[must_use]
    pub fn as_client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Transport(e) => Some(e),
            Self::EmptyFieldList { .. }
            | Self::DuplicateField { .. }
            | Self::PlaceholderCollision { .. } => None,
        }
    }
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
