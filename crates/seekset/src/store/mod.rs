//! Module: store
//! Responsibility: the abstract ordered-query provider contract.
//! Does not own: plan construction or pagination semantics.
//! Boundary: the only suspension points of a pagination request are calls
//! through these traits.

mod memory;

pub use memory::{MemoryStore, MemoryStoreError};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use seekset_core::{plan::ExecutablePlan, traits::Record};

///
/// ReadStore
///
/// Synchronous execution of a lowered plan: apply filters, order, reverse,
/// skip, and take, then materialize. `count` receives a plan already
/// stripped of its pagination window and must count post-filter rows.
///

pub trait ReadStore<T: Record> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(&self, plan: &ExecutablePlan) -> Result<Vec<T>, Self::Error>;

    fn count(&self, plan: &ExecutablePlan) -> Result<u64, Self::Error>;
}

///
/// AsyncReadStore
///
/// Asynchronous twin of [`ReadStore`]. `stream` defaults to materializing
/// `execute`; stores with native streaming enumeration may override it.
///

#[async_trait]
pub trait AsyncReadStore<T: Record>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute(&self, plan: &ExecutablePlan) -> Result<Vec<T>, Self::Error>;

    async fn count(&self, plan: &ExecutablePlan) -> Result<u64, Self::Error>;

    fn stream<'a>(&'a self, plan: &'a ExecutablePlan) -> BoxStream<'a, Result<T, Self::Error>> {
        stream::once(self.execute(plan))
            .flat_map(|result| match result {
                Ok(rows) => stream::iter(rows.into_iter().map(Ok)).boxed(),
                Err(err) => stream::once(async move { Err(err) }).boxed(),
            })
            .boxed()
    }
}
