//! Module: error
//! Responsibility: plan-layer failure contracts.
//! Boundary: executor-layer errors (cancellation, store failures) live in
//! the `seekset` crate and wrap these.

use thiserror::Error as ThisError;

///
/// PlanError
///
/// Programming-misuse failures raised while turning a declarative plan into
/// an executable one. These surface at execution time, not at construction
/// time, so plans can be composed incrementally.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlanError {
    /// Seek pagination was requested on a plan with no real ordering keys.
    #[error("seek pagination requires an explicit ordering")]
    MissingOrdering,
}
