use crate::{plan::Direction, value::KeyValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// NullPolicy
///
/// Where null field values sort relative to non-null values for one order
/// key. `None` means the plan declared nothing; the engine convention is
/// nulls-first in ascending order.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum NullPolicy {
    #[default]
    None,
    NullsFirst,
    NullsLast,
}

impl NullPolicy {
    /// Whether nulls rank before non-null values under this policy.
    #[must_use]
    pub const fn nulls_rank_first(self) -> bool {
        matches!(self, Self::None | Self::NullsFirst)
    }
}

/// Strict comparator for identical orderable variants.
///
/// Returns `None` for mismatched variants and whenever either operand is
/// null: three-valued comparison, the way the backing store compares.
/// Text is byte-wise ordinal, never locale-sensitive. Enums compare by
/// declared ordinal.
#[must_use]
pub fn strict_cmp(left: &KeyValue, right: &KeyValue) -> Option<Ordering> {
    match (left, right) {
        (KeyValue::Bool(a), KeyValue::Bool(b)) => Some(a.cmp(b)),
        (KeyValue::Enum(a), KeyValue::Enum(b)) => Some(a.cmp(b)),
        (KeyValue::Int(a), KeyValue::Int(b)) => Some(a.cmp(b)),
        (KeyValue::Text(a), KeyValue::Text(b)) => Some(a.cmp(b)),
        (KeyValue::Uint(a), KeyValue::Uint(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Total comparator used by sorting stores.
///
/// Ordering rules:
/// 1. Null placement per the key's null policy
/// 2. Same-variant strict comparison
/// 3. Deterministic variant rank for mixed variants
#[must_use]
pub fn ranked_cmp(left: &KeyValue, right: &KeyValue, nulls: NullPolicy) -> Ordering {
    match (left.is_null(), right.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => {
            return if nulls.nulls_rank_first() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        (false, true) => {
            return if nulls.nulls_rank_first() {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        (false, false) => {}
    }

    strict_cmp(left, right)
        .unwrap_or_else(|| left.variant_rank().cmp(&right.variant_rank()))
}

/// Flip an ascending comparison result for descending keys.
#[must_use]
pub const fn apply_direction(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

///
/// TESTS
///
