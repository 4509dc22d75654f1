//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `EcoError` as one variant
//! via `#[from]`.  The core decision engine itself never returns errors: the
//! only fallible step is validating configuration before a run starts.

use thiserror::Error;

/// The top-level error type for `eco-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EcoError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name:   &'static str,
        reason: String,
    },
}

impl EcoError {
    /// Shorthand for [`EcoError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EcoError::InvalidParameter { name, reason: reason.into() }
    }
}

/// Shorthand result type for all `eco-*` crates.
pub type EcoResult<T> = Result<T, EcoError>;
