//! Errors - エラー型
//!
//! The store itself never fails: lookup misses are silent no-ops and input
//! is validated before it reaches the store. These types cover the edges
//! around it (form input, parsing, rendering).

use thiserror::Error;

use crate::ports::SurfaceError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown project status: {0:?}")]
    UnknownStatus(String),

    #[error("invalid project id: {0:?}")]
    InvalidProjectId(String),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Rejected form input. Each variant names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("description must be at least {min} characters long")]
    DescriptionTooShort { min: usize },

    #[error("people must be a number, got {0:?}")]
    PeopleNotANumber(String),

    #[error("people must be between {min} and {max}, got {value}")]
    PeopleOutOfRange { min: u32, max: u32, value: i64 },
}
