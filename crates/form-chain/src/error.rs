use thiserror::Error;

use crate::chain::ChainError;
use crate::issues::ValidationFailure;
use crate::reconstruct::ReconstructError;

/// Errors raised by form-level operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("form is not bound to a submission source")]
    MissingBinding,
}
