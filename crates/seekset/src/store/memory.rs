use crate::store::{AsyncReadStore, ReadStore};
use async_trait::async_trait;
use seekset_core::{
    plan::ExecutablePlan,
    traits::{FieldAccess, Record},
    value::{KeyValue, apply_direction, ranked_cmp},
};
use std::{
    cmp::Ordering,
    sync::atomic::{AtomicBool, Ordering as AtomicOrdering},
};
use thiserror::Error as ThisError;

///
/// MemoryStoreError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MemoryStoreError {
    /// The store was poisoned by a test to exercise error propagation.
    #[error("memory store is unavailable")]
    Unavailable,
}

///
/// MemoryStore
///
/// In-memory reference store. Applies a lowered plan in the contract order
/// (filters → order → reverse → skip → take) using the engine's own
/// predicate evaluation and null-policy comparator, so engine tests and
/// store-backed behavior share one ordering definition.
///

#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    rows: Vec<T>,
    poisoned: AtomicBool,
}

impl<T: Record> MemoryStore<T> {
    #[must_use]
    pub const fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            poisoned: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail, for error-propagation tests.
    pub fn poison(&self) {
        self.poisoned.store(true, AtomicOrdering::SeqCst);
    }

    /// Remove the row with the given primary key, if present.
    pub fn remove(&mut self, key: &KeyValue) {
        self.rows.retain(|row| &row.primary_key() != key);
    }

    fn run(&self, plan: &ExecutablePlan) -> Result<Vec<T>, MemoryStoreError> {
        if self.poisoned.load(AtomicOrdering::SeqCst) {
            return Err(MemoryStoreError::Unavailable);
        }

        let mut rows: Vec<T> = self
            .rows
            .iter()
            .filter(|row| plan.row_matches(*row))
            .cloned()
            .collect();

        if !plan.order.is_empty() {
            rows.sort_by(|left, right| compare_rows(left, right, plan));
        }
        if plan.reverse {
            rows.reverse();
        }

        let skip = usize::try_from(plan.skip.unwrap_or(0)).unwrap_or(usize::MAX);
        let take = plan
            .take
            .map_or(usize::MAX, |count| usize::try_from(count).unwrap_or(usize::MAX));

        Ok(rows.into_iter().skip(skip).take(take).collect())
    }

    fn run_count(&self, plan: &ExecutablePlan) -> Result<u64, MemoryStoreError> {
        if self.poisoned.load(AtomicOrdering::SeqCst) {
            return Err(MemoryStoreError::Unavailable);
        }

        let matching = self
            .rows
            .iter()
            .filter(|row| plan.row_matches(*row))
            .count();

        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }
}

// Lexicographic comparison over the plan's order-key chain.
fn compare_rows<T: FieldAccess>(left: &T, right: &T, plan: &ExecutablePlan) -> Ordering {
    for key in plan.order.iter() {
        let ordering = ranked_cmp(&left.field(&key.path), &right.field(&key.path), key.nulls);
        let ordering = apply_direction(ordering, key.direction);

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

impl<T: Record> ReadStore<T> for MemoryStore<T> {
    type Error = MemoryStoreError;

    fn execute(&self, plan: &ExecutablePlan) -> Result<Vec<T>, Self::Error> {
        self.run(plan)
    }

    fn count(&self, plan: &ExecutablePlan) -> Result<u64, Self::Error> {
        self.run_count(plan)
    }
}

#[async_trait]
impl<T: Record> AsyncReadStore<T> for MemoryStore<T> {
    type Error = MemoryStoreError;

    async fn execute(&self, plan: &ExecutablePlan) -> Result<Vec<T>, Self::Error> {
        self.run(plan)
    }

    async fn count(&self, plan: &ExecutablePlan) -> Result<u64, Self::Error> {
        self.run_count(plan)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use seekset_core::{
        order::{OrderKey, OrderKeyChain},
        path::FieldPath,
        plan::Direction,
        value::KeyKind,
    };

    #[derive(Clone, Debug, Eq, PartialEq)]
    struct Row {
        id: i64,
    }

    impl FieldAccess for Row {
        fn field(&self, path: &FieldPath) -> KeyValue {
            match path.leaf() {
                "id" => KeyValue::Int(self.id),
                _ => KeyValue::Null,
            }
        }
    }

    impl Record for Row {
        const SOURCE: &'static str = "rows";

        fn primary_key(&self) -> KeyValue {
            KeyValue::Int(self.id)
        }

        fn primary_key_path() -> FieldPath {
            FieldPath::field("id")
        }

        fn key_kind() -> KeyKind {
            KeyKind::Int
        }
    }

    fn ordered_plan() -> ExecutablePlan {
        let mut plan = ExecutablePlan::new("rows");
        plan.order = OrderKeyChain::new(vec![OrderKey::new(
            FieldPath::field("id"),
            Direction::Asc,
        )]);

        plan
    }

    #[test]
    fn remove_drops_the_row_with_the_given_key() {
        let mut store = MemoryStore::new(vec![Row { id: 1 }, Row { id: 2 }]);
        store.remove(&KeyValue::Int(1));

        let rows = ReadStore::execute(&store, &ordered_plan()).unwrap();
        assert_eq!(rows, vec![Row { id: 2 }]);
    }

    #[tokio::test]
    async fn default_stream_yields_rows_in_plan_order() {
        let store = MemoryStore::new(vec![Row { id: 2 }, Row { id: 1 }]);
        let plan = ordered_plan();

        let rows: Vec<Row> = store
            .stream(&plan)
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[tokio::test]
    async fn default_stream_surfaces_store_errors() {
        let store = MemoryStore::new(vec![Row { id: 1 }]);
        store.poison();
        let plan = ordered_plan();

        let mut stream = store.stream(&plan);
        assert_eq!(
            stream.next().await,
            Some(Err(MemoryStoreError::Unavailable))
        );
    }
}
