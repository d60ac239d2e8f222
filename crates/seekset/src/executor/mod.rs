//! Module: executor
//! Responsibility: running a paginated plan against a store — seek mode
//! with origin resolution and look-ahead, offset mode with total counting.
//! Does not own: plan rewriting (seekset-core) or row storage.
//! Boundary: the only code that calls through the store traits.

pub mod offset;
pub mod seek;

use crate::error::SeekError;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
mod tests;

// Checked before every store round-trip in the async paths; an in-flight
// store call itself is the store's business to interrupt.
fn ensure_live<S>(token: &CancellationToken) -> Result<(), SeekError<S>> {
    if token.is_cancelled() {
        return Err(SeekError::Cancelled);
    }

    Ok(())
}
