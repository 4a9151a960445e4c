//! Error types for flashlearn-core.

use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors from driving a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("answer must be revealed before rating")]
    AnswerHidden,

    #[error("study session is already finished")]
    SessionFinished,
}
