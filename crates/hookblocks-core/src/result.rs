//! Convenience result type alias for HookBlocks.

use crate::error::AppError;

/// A specialized `Result` type for HookBlocks operations.
pub type AppResult<T> = Result<T, AppError>;
