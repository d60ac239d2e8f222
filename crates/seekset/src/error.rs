//! Module: error
//! Responsibility: executor-surface failure contracts.
//! Boundary: pagination misuse is developer-facing; store failures and
//! cancellation propagate unchanged to whatever retry/timeout policy lives
//! outside this engine.

use seekset_core::{error::PlanError, value::KeyKind};
use thiserror::Error as ThisError;

///
/// InvalidOriginKey
///
/// Raised eagerly when a key-only origin is attached whose kind does not
/// match the record's declared primary-key kind.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("origin key type mismatch: expected {expected:?}, found {found:?}")]
pub struct InvalidOriginKey {
    pub expected: KeyKind,
    pub found: KeyKind,
}

///
/// SeekError
///
/// One pagination request's failure surface, generic over the store's own
/// error type. Store errors are never wrapped into strings or retried here.
///

#[derive(Debug, PartialEq, ThisError)]
pub enum SeekError<S> {
    /// Seek pagination on a plan without any real ordering keys.
    #[error("seek pagination requires an explicit ordering")]
    MissingOrdering,

    /// Origin key kind mismatch, re-raised if the eager check was bypassed.
    #[error(transparent)]
    InvalidOrigin(#[from] InvalidOriginKey),

    /// The request's cancellation token fired between store calls.
    #[error("pagination request was cancelled")]
    Cancelled,

    /// Backing-store failure, propagated unchanged.
    #[error("store error: {0}")]
    Store(S),
}

impl<S> From<PlanError> for SeekError<S> {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::MissingOrdering => Self::MissingOrdering,
        }
    }
}

///
/// TESTS
///
