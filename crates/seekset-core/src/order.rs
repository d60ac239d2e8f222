//! Module: order
//! Responsibility: the typed order-key model and its extraction walk.
//! Does not own: filter construction or origin resolution.
//! Boundary: every pass downstream of extraction sees `OrderKey`, never raw
//! ordering clauses.

use crate::{
    error::PlanError,
    path::FieldPath,
    plan::{Direction, OrderTarget, Plan, PlanNode},
    value::NullPolicy,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// OrderKey
///
/// One resolved sort key: field path, direction, and null placement.
/// Chain position defines lexicographic priority (first = most significant).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderKey {
    pub path: FieldPath,
    pub direction: Direction,
    pub nulls: NullPolicy,
}

impl OrderKey {
    #[must_use]
    pub const fn new(path: FieldPath, direction: Direction) -> Self {
        Self {
            path,
            direction,
            nulls: NullPolicy::None,
        }
    }

    #[must_use]
    pub const fn with_nulls(mut self, nulls: NullPolicy) -> Self {
        self.nulls = nulls;
        self
    }
}

///
/// OrderKeyChain
///

#[derive(
    Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize,
)]
pub struct OrderKeyChain(Vec<OrderKey>);

impl OrderKeyChain {
    #[must_use]
    pub const fn new(keys: Vec<OrderKey>) -> Self {
        Self(keys)
    }

    /// Reject an empty chain; keyset pagination has no meaning without one.
    pub fn require_non_empty(&self) -> Result<(), PlanError> {
        if self.0.is_empty() {
            return Err(PlanError::MissingOrdering);
        }

        Ok(())
    }
}

/// Walk a plan's ordering clauses top-to-bottom into an order-key chain.
///
/// A `NullCheck` clause is a null-ordering marker: it attaches a null policy
/// to the closest preceding real key it is structurally related to. An
/// ascending check sorts non-null (false) before null (true), so ascending
/// means nulls-last and descending means nulls-first. A marker with no
/// structurally-related prior key is not unique enough to define order and
/// is ignored.
#[must_use]
pub fn extract_order_keys(plan: &Plan) -> OrderKeyChain {
    let mut keys: Vec<OrderKey> = Vec::new();

    for node in plan.nodes() {
        let PlanNode::OrderBy(clause) = node else {
            continue;
        };

        match &clause.target {
            OrderTarget::Field(path) => {
                keys.push(OrderKey::new(path.clone(), clause.direction));
            }
            OrderTarget::NullCheck(path) => {
                let policy = match clause.direction {
                    Direction::Asc => NullPolicy::NullsLast,
                    Direction::Desc => NullPolicy::NullsFirst,
                };

                if let Some(key) = keys
                    .iter_mut()
                    .rev()
                    .find(|key| key.path.is_related_to(path))
                {
                    key.nulls = policy;
                }
            }
        }
    }

    OrderKeyChain(keys)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::SeekDirection;

    fn base_plan() -> Plan {
        Plan::new("cards")
    }

    #[test]
    fn chain_preserves_clause_priority() {
        let plan = base_plan()
            .order_by(FieldPath::field("rank"), Direction::Desc)
            .order_by(FieldPath::field("id"), Direction::Asc);

        let chain = extract_order_keys(&plan);

        assert_eq!(
            *chain,
            vec![
                OrderKey::new(FieldPath::field("rank"), Direction::Desc),
                OrderKey::new(FieldPath::field("id"), Direction::Asc),
            ]
        );
    }

    #[test]
    fn ascending_null_check_marks_previous_key_nulls_last() {
        let plan = base_plan()
            .order_by(FieldPath::field("name"), Direction::Asc)
            .order_by_null_check(FieldPath::field("name"), Direction::Asc);

        let chain = extract_order_keys(&plan);

        assert_eq!(chain[0].nulls, NullPolicy::NullsLast);
    }

    #[test]
    fn descending_null_check_marks_previous_key_nulls_first() {
        let plan = base_plan()
            .order_by(FieldPath::via("book", "name"), Direction::Asc)
            .order_by_null_check(FieldPath::field("book"), Direction::Desc);

        let chain = extract_order_keys(&plan);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].nulls, NullPolicy::NullsFirst);
    }

    #[test]
    fn marker_attaches_to_closest_related_key() {
        let plan = base_plan()
            .order_by(FieldPath::via("book", "name"), Direction::Asc)
            .order_by(FieldPath::via("book", "year"), Direction::Asc)
            .order_by_null_check(FieldPath::field("book"), Direction::Asc);

        let chain = extract_order_keys(&plan);

        assert_eq!(chain[0].nulls, NullPolicy::None);
        assert_eq!(chain[1].nulls, NullPolicy::NullsLast);
    }

    #[test]
    fn isolated_marker_is_ignored() {
        let plan = base_plan()
            .order_by(FieldPath::field("name"), Direction::Asc)
            .order_by_null_check(FieldPath::field("year"), Direction::Asc);

        let chain = extract_order_keys(&plan);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].nulls, NullPolicy::None);
    }

    #[test]
    fn marker_only_plan_yields_empty_chain() {
        let plan = base_plan()
            .order_by_null_check(FieldPath::field("name"), Direction::Asc)
            .seek(SeekDirection::Forward);

        let chain = extract_order_keys(&plan);

        assert!(chain.is_empty());
        assert!(matches!(
            chain.require_non_empty(),
            Err(PlanError::MissingOrdering)
        ));
    }
}
