//! Unified result type built on `color-eyre`.
//!
//! Every fallible function in release-roundup returns the [`Result`]
//! alias defined here so errors carry context and render consistently
//! at the top level.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout release-roundup.
///
/// Alias for `color_eyre::eyre::Result<T>`. Domain errors from
/// [`crate::error::RoundupError`] convert into eyre reports via `?`,
/// and callers can layer context with `.wrap_err()`.
pub type Result<T> = EyreResult<T>;
