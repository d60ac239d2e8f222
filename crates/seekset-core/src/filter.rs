//! Module: filter
//! Responsibility: building the composite keyset predicate from an
//! order-key chain, an origin translation, and a seek direction.
//! Does not own: plan rewriting or execution.
//! Boundary: emits a `Predicate` tree; never evaluates rows itself.

use crate::{
    order::{OrderKey, OrderKeyChain},
    origin::{OriginTranslation, ResolvedBound},
    plan::{CompareOp, Direction, Predicate, SeekDirection},
};

/// Build the lexicographic tuple-comparison predicate:
///
/// ```text
/// cmp(k1) ∨ (eq(k1) ∧ cmp(k2)) ∨ (eq(k1) ∧ eq(k2) ∧ cmp(k3)) ∨ …
/// ```
///
/// Per-key `cmp` is strictly-greater when travel direction and key direction
/// agree (forward∧asc or backward∧desc), strictly-less otherwise, with null
/// placement folded in per the key's policy.
///
/// The chain is truncated at the first unresolved key: bounds past it cannot
/// participate in a sound comparison. `None` means no filter at all (first
/// page); `Some(Predicate::Never)` means the origin resolved but nothing can
/// lie beyond it in the travel direction.
#[must_use]
pub fn build_seek_filter(
    chain: &OrderKeyChain,
    translation: &OriginTranslation,
    direction: SeekDirection,
) -> Option<Predicate> {
    let mut disjuncts: Vec<Predicate> = Vec::new();
    let mut equality_prefix: Vec<Predicate> = Vec::new();
    let mut any_resolved = false;

    for (index, key) in chain.iter().enumerate() {
        let bound = translation.bound(index);

        if matches!(bound, ResolvedBound::Unresolved) {
            break;
        }
        any_resolved = true;

        if let Some(comparison) = bound_comparison(key, bound, direction) {
            let mut conjuncts = equality_prefix.clone();
            conjuncts.push(comparison);
            disjuncts.push(Predicate::and(conjuncts));
        }

        equality_prefix.push(bound_equality(key, bound));
    }

    if !any_resolved {
        return None;
    }

    Some(Predicate::or(disjuncts))
}

// Whether this key is traversed toward greater values.
const fn travels_greater(key: &OrderKey, direction: SeekDirection) -> bool {
    matches!(
        (direction, key.direction),
        (SeekDirection::Forward, Direction::Asc) | (SeekDirection::Backward, Direction::Desc)
    )
}

// Strict per-key comparison against the origin bound, or `None` when no row
// can compare strictly beyond the bound on this key alone.
fn bound_comparison(
    key: &OrderKey,
    bound: &ResolvedBound,
    direction: SeekDirection,
) -> Option<Predicate> {
    let greater = travels_greater(key, direction);
    let nulls_first = key.nulls.nulls_rank_first();

    match bound {
        ResolvedBound::Unresolved => None,
        ResolvedBound::Null => {
            // Moving away from the null region: every non-null value lies
            // beyond. Moving into it: nothing does.
            if greater == nulls_first {
                Some(Predicate::IsNotNull(key.path.clone()))
            } else {
                None
            }
        }
        ResolvedBound::Value(value) => {
            let op = if greater { CompareOp::Gt } else { CompareOp::Lt };
            let base = Predicate::compare(key.path.clone(), op, value.clone());

            // The null region lies past the bound in the travel direction.
            if greater != nulls_first {
                Some(Predicate::or(vec![
                    base,
                    Predicate::IsNull(key.path.clone()),
                ]))
            } else {
                Some(base)
            }
        }
    }
}

// Per-key tie predicate used as the equality prefix of later disjuncts.
fn bound_equality(key: &OrderKey, bound: &ResolvedBound) -> Predicate {
    match bound {
        ResolvedBound::Value(value) => {
            Predicate::compare(key.path.clone(), CompareOp::Eq, value.clone())
        }
        // Null and unresolved both tie on "is null"; unresolved never
        // reaches here because the chain is truncated first.
        ResolvedBound::Null | ResolvedBound::Unresolved => {
            Predicate::IsNull(key.path.clone())
        }
    }
}

///
/// TESTS
///
