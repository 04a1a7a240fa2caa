//! Convenience result type alias for the transform shims.

use crate::error::AppError;

/// A specialized `Result` type for transform operations.
pub type AppResult<T> = Result<T, AppError>;
