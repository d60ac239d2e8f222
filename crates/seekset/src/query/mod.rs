//! Module: query
//! Responsibility: the fluent plan-building surface and execution routing.
//! Does not own: rewriting semantics or store calls; those live in
//! `seekset_core::rewrite` and `crate::executor`.
//! Boundary: the API applications compose queries through.
//!
//! `FieldPath`s always address the root record shape, before any
//! projection; `project` changes the output type only.

use crate::{
    error::{InvalidOriginKey, SeekError},
    executor,
    result::{OffsetList, SeekList},
    store::{AsyncReadStore, ReadStore},
};
use seekset_core::{
    origin::{Origin, ProjectionBinding},
    path::FieldPath,
    plan::{Direction, Plan, Predicate, SeekDirection},
    traits::Record,
    value::KeyValue,
};
use std::{marker::PhantomData, sync::Arc};
use tokio_util::sync::CancellationToken;

///
/// Projection
///
/// A typed map from the root record shape to a projected result shape,
/// together with the field bindings the origin translator matches against:
/// each binding records that the post-projection `target` path was built
/// from the pre-projection `source` path.
///

pub struct Projection<T, U> {
    map: Arc<dyn Fn(&T) -> U + Send + Sync>,
    bindings: Vec<ProjectionBinding>,
}

impl<T, U> Projection<T, U> {
    #[must_use]
    pub fn new(
        bindings: Vec<ProjectionBinding>,
        map: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Self {
        Self {
            map: Arc::new(map),
            bindings,
        }
    }

    #[must_use]
    pub fn bindings(&self) -> &[ProjectionBinding] {
        &self.bindings
    }

    pub(crate) fn apply(&self, row: &T) -> U {
        (self.map)(row)
    }
}

impl<T, U> Clone for Projection<T, U> {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
            bindings: self.bindings.clone(),
        }
    }
}

impl<T, U> std::fmt::Debug for Projection<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Projection")
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

///
/// Query
///
/// Root fluent query over one record type. Owns plan construction and
/// execution routing only; results are inspected on the returned
/// envelopes.
///

#[derive(Clone, Debug)]
pub struct Query<T: Record> {
    plan: Plan,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Query<T> {
    /// Start from the record type's root sequence.
    #[must_use]
    pub fn all() -> Self {
        Self {
            plan: Plan::new(T::SOURCE),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    fn map_plan(mut self, map: impl FnOnce(Plan) -> Plan) -> Self {
        self.plan = map(self.plan);
        self
    }

    // ------------------------------------------------------------------
    // Refinement
    // ------------------------------------------------------------------

    #[must_use]
    pub fn filter(self, predicate: Predicate) -> Self {
        self.map_plan(|plan| plan.filter(predicate))
    }

    #[must_use]
    pub fn order_by(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by(path, Direction::Asc))
    }

    #[must_use]
    pub fn order_by_desc(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by(path, Direction::Desc))
    }

    /// Append a lower-priority ordering clause. Repeatable.
    #[must_use]
    pub fn then_by(self, path: FieldPath) -> Self {
        self.order_by(path)
    }

    #[must_use]
    pub fn then_by_desc(self, path: FieldPath) -> Self {
        self.order_by_desc(path)
    }

    /// Sort nulls before non-null values for the structurally-related key
    /// registered most recently.
    #[must_use]
    pub fn nulls_first(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by_null_check(path, Direction::Desc))
    }

    /// Sort nulls after non-null values for the structurally-related key
    /// registered most recently.
    #[must_use]
    pub fn nulls_last(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by_null_check(path, Direction::Asc))
    }

    /// Append a raw null-ordering marker clause. `nulls_first`/`nulls_last`
    /// are the readable spellings; this is the direct form for callers that
    /// already hold a marker direction.
    #[must_use]
    pub fn then_by_null_check(self, path: FieldPath, direction: Direction) -> Self {
        self.map_plan(|plan| plan.order_by_null_check(path, direction))
    }

    #[must_use]
    pub fn skip(self, count: u64) -> Self {
        self.map_plan(|plan| plan.skip(count))
    }

    #[must_use]
    pub fn take(self, count: u64) -> Self {
        self.map_plan(|plan| plan.take(count))
    }

    /// Map results to a projected shape, recording the field bindings the
    /// origin translator needs to resolve projected origins.
    #[must_use]
    pub fn project<U>(
        self,
        bindings: Vec<ProjectionBinding>,
        map: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Projected<T, U> {
        Projected {
            plan: self.plan,
            projection: Projection::new(bindings, map),
        }
    }

    // ------------------------------------------------------------------
    // Pagination directives
    // ------------------------------------------------------------------

    /// Switch to seek pagination. Requires at least one prior `order_by`;
    /// the requirement is checked at execution so plans can be composed
    /// before they are complete.
    #[must_use]
    pub fn seek_by(self, direction: SeekDirection) -> SeekQuery<T> {
        SeekQuery {
            plan: self.plan.seek(direction),
            origin: None,
        }
    }

    // ------------------------------------------------------------------
    // Offset execution
    // ------------------------------------------------------------------

    pub fn to_offset_list<S: ReadStore<T>>(
        &self,
        store: &S,
    ) -> Result<OffsetList<T>, SeekError<S::Error>> {
        executor::offset::offset_sync(&self.plan, store)
    }

    pub async fn to_offset_list_async<S: AsyncReadStore<T>>(
        &self,
        store: &S,
        token: &CancellationToken,
    ) -> Result<OffsetList<T>, SeekError<S::Error>> {
        executor::offset::offset_async(&self.plan, store, token).await
    }
}

///
/// Projected
///
/// A query whose results are mapped to another shape. Plan refinement
/// still addresses the root record shape.
///

#[derive(Clone, Debug)]
pub struct Projected<T: Record, U> {
    plan: Plan,
    projection: Projection<T, U>,
}

impl<T: Record, U> Projected<T, U> {
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    fn map_plan(mut self, map: impl FnOnce(Plan) -> Plan) -> Self {
        self.plan = map(self.plan);
        self
    }

    #[must_use]
    pub fn filter(self, predicate: Predicate) -> Self {
        self.map_plan(|plan| plan.filter(predicate))
    }

    #[must_use]
    pub fn order_by(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by(path, Direction::Asc))
    }

    #[must_use]
    pub fn order_by_desc(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by(path, Direction::Desc))
    }

    #[must_use]
    pub fn then_by(self, path: FieldPath) -> Self {
        self.order_by(path)
    }

    #[must_use]
    pub fn then_by_desc(self, path: FieldPath) -> Self {
        self.order_by_desc(path)
    }

    #[must_use]
    pub fn nulls_first(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by_null_check(path, Direction::Desc))
    }

    #[must_use]
    pub fn nulls_last(self, path: FieldPath) -> Self {
        self.map_plan(|plan| plan.order_by_null_check(path, Direction::Asc))
    }

    #[must_use]
    pub fn skip(self, count: u64) -> Self {
        self.map_plan(|plan| plan.skip(count))
    }

    #[must_use]
    pub fn take(self, count: u64) -> Self {
        self.map_plan(|plan| plan.take(count))
    }

    #[must_use]
    pub fn seek_by(self, direction: SeekDirection) -> ProjectedSeekQuery<T, U> {
        ProjectedSeekQuery {
            plan: self.plan.seek(direction),
            projection: self.projection,
            origin: None,
        }
    }

    pub fn to_offset_list<S: ReadStore<T>>(
        &self,
        store: &S,
    ) -> Result<OffsetList<U>, SeekError<S::Error>> {
        executor::offset::offset_projected_sync(&self.plan, &self.projection, store)
    }

    pub async fn to_offset_list_async<S: AsyncReadStore<T>>(
        &self,
        store: &S,
        token: &CancellationToken,
    ) -> Result<OffsetList<U>, SeekError<S::Error>> {
        executor::offset::offset_projected_async(&self.plan, &self.projection, store, token).await
    }
}

// Eager origin-key kind check shared by both seek builders.
fn checked_origin_key<T: Record>(key: KeyValue) -> Result<KeyValue, InvalidOriginKey> {
    let found = key.kind();
    let expected = T::key_kind();

    if found == expected {
        Ok(key)
    } else {
        Err(InvalidOriginKey { expected, found })
    }
}

///
/// SeekQuery
///
/// Seek-paginated query over the root record shape. Immutable request
/// state built fluently: direction, then origin, then page size.
///

#[derive(Clone, Debug)]
pub struct SeekQuery<T: Record> {
    plan: Plan,
    origin: Option<Origin<T>>,
}

impl<T: Record> SeekQuery<T> {
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Anchor the page after (or before, when backward) this record.
    #[must_use]
    pub fn after(mut self, origin: T) -> Self {
        self.origin = Some(Origin::Record(origin));
        self
    }

    /// Anchor by primary-key value only; the executor fetches the full
    /// origin with a dedicated lookup query.
    pub fn after_key(mut self, key: KeyValue) -> Result<Self, InvalidOriginKey> {
        self.origin = Some(Origin::Key(checked_origin_key::<T>(key)?));
        Ok(self)
    }

    /// Page size. Folds into the seek directive so later passes see one
    /// canonical node.
    #[must_use]
    pub fn take(mut self, count: u64) -> Self {
        self.plan = self.plan.take_into_seek(count);
        self
    }

    pub fn to_seek_list<S: ReadStore<T>>(
        &self,
        store: &S,
    ) -> Result<SeekList<T>, SeekError<S::Error>> {
        executor::seek::seek_entity_sync(&self.plan, self.origin.as_ref(), store)
    }

    pub async fn to_seek_list_async<S: AsyncReadStore<T>>(
        &self,
        store: &S,
        token: &CancellationToken,
    ) -> Result<SeekList<T>, SeekError<S::Error>> {
        executor::seek::seek_entity_async(&self.plan, self.origin.as_ref(), store, token).await
    }
}

///
/// ProjectedSeekQuery
///
/// Seek-paginated query over a projected shape. Origins are projected
/// records (or bare keys); order keys resolve through the projection's
/// bindings, falling back to the primary-key lookup when the projection
/// dropped a keyed field but kept the key.
///

#[derive(Clone, Debug)]
pub struct ProjectedSeekQuery<T: Record, U> {
    plan: Plan,
    projection: Projection<T, U>,
    origin: Option<Origin<U>>,
}

impl<T: Record, U> ProjectedSeekQuery<T, U>
where
    U: seekset_core::traits::FieldAccess + Clone + Send + Sync + 'static,
{
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    #[must_use]
    pub fn after(mut self, origin: U) -> Self {
        self.origin = Some(Origin::Record(origin));
        self
    }

    pub fn after_key(mut self, key: KeyValue) -> Result<Self, InvalidOriginKey> {
        self.origin = Some(Origin::Key(checked_origin_key::<T>(key)?));
        Ok(self)
    }

    #[must_use]
    pub fn take(mut self, count: u64) -> Self {
        self.plan = self.plan.take_into_seek(count);
        self
    }

    pub fn to_seek_list<S: ReadStore<T>>(
        &self,
        store: &S,
    ) -> Result<SeekList<U>, SeekError<S::Error>> {
        executor::seek::seek_projected_sync(&self.plan, &self.projection, self.origin.as_ref(), store)
    }

    pub async fn to_seek_list_async<S: AsyncReadStore<T>>(
        &self,
        store: &S,
        token: &CancellationToken,
    ) -> Result<SeekList<U>, SeekError<S::Error>> {
        executor::seek::seek_projected_async(
            &self.plan,
            &self.projection,
            self.origin.as_ref(),
            store,
            token,
        )
        .await
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use seekset_core::value::KeyKind;

    #[derive(Clone, Debug)]
    struct Card {
        id: i64,
    }

    impl seekset_core::traits::FieldAccess for Card {
        fn field(&self, path: &FieldPath) -> KeyValue {
            match path.leaf() {
                "id" => KeyValue::Int(self.id),
                _ => KeyValue::Null,
            }
        }
    }

    impl Record for Card {
        const SOURCE: &'static str = "cards";

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

    #[test]
    fn after_key_rejects_kind_mismatch_eagerly() {
        let result = Query::<Card>::all()
            .order_by(FieldPath::field("id"))
            .seek_by(SeekDirection::Forward)
            .after_key(KeyValue::from("not-an-int"));

        assert_eq!(
            result.err(),
            Some(InvalidOriginKey {
                expected: KeyKind::Int,
                found: KeyKind::Text,
            })
        );
    }

    #[test]
    fn after_key_accepts_matching_kind() {
        let query = Query::<Card>::all()
            .order_by(FieldPath::field("id"))
            .seek_by(SeekDirection::Forward)
            .after_key(KeyValue::Int(7));

        assert!(query.is_ok());
    }

    #[test]
    fn take_folds_into_the_seek_directive() {
        let query = Query::<Card>::all()
            .order_by(FieldPath::field("id"))
            .seek_by(SeekDirection::Forward)
            .take(25);

        let directive = query.plan().seek_node().unwrap();
        assert_eq!(directive.size, Some(25));
    }
}
