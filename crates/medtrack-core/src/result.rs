//! Convenience result alias for the unified error type.

use crate::error::AppError;

/// Result alias used across all MedTrack crates.
pub type AppResult<T> = Result<T, AppError>;
