//! Module: origin
//! Responsibility: resolving an origin record (full, projected, or key-only)
//! onto the order keys of the current query.
//! Does not own: the secondary lookup round-trip; the executor issues it
//! when a translation reports unresolved keys.
//! Boundary: one `OriginTranslation` per query execution, immutable once
//! built.

use crate::{
    order::OrderKeyChain,
    path::FieldPath,
    traits::FieldAccess,
    value::KeyValue,
};
use serde::{Deserialize, Serialize};

///
/// Origin
///
/// The anchor marking the boundary of the current page: either a full
/// record of the query's output shape, or just its primary-key value.
///

#[derive(Clone, Debug)]
pub enum Origin<U> {
    Record(U),
    Key(KeyValue),
}

///
/// ResolvedBound
///
/// Per-key origin resolution outcome. `Null` covers both a null field on
/// the origin and a missing navigation target; the filter builder treats
/// them identically. `Unresolved` means the value cannot be read locally
/// and a secondary lookup is required if one is possible.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResolvedBound {
    Null,
    Unresolved,
    Value(KeyValue),
}

///
/// ProjectionBinding
///
/// One field of a projection's construction: the post-projection `target`
/// path was built from the pre-projection `source` path. The translator
/// matches order keys (source shape) against these to read projected
/// origins.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProjectionBinding {
    pub target: FieldPath,
    pub source: FieldPath,
}

impl ProjectionBinding {
    #[must_use]
    pub const fn new(target: FieldPath, source: FieldPath) -> Self {
        Self { target, source }
    }
}

///
/// OriginTranslation
///
/// Bounds parallel to the order-key chain, built once per execution.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OriginTranslation {
    bounds: Vec<ResolvedBound>,
}

impl OriginTranslation {
    /// Translation from pre-resolved bounds, parallel to the chain.
    #[must_use]
    pub const fn new(bounds: Vec<ResolvedBound>) -> Self {
        Self { bounds }
    }

    /// Translation with every key unresolved and no lookup possible:
    /// first-page behavior.
    #[must_use]
    pub fn unresolved(chain: &OrderKeyChain) -> Self {
        Self {
            bounds: vec![ResolvedBound::Unresolved; chain.len()],
        }
    }

    /// Read each key's bound directly off a record of the query's element
    /// type.
    #[must_use]
    pub fn from_record<R: FieldAccess + ?Sized>(chain: &OrderKeyChain, origin: &R) -> Self {
        let bounds = chain
            .iter()
            .map(|key| match origin.field(&key.path) {
                KeyValue::Null => ResolvedBound::Null,
                value => ResolvedBound::Value(value),
            })
            .collect();

        Self { bounds }
    }

    /// Resolve keys through a projected origin.
    ///
    /// Each key's pre-projection path is matched against the projection's
    /// source paths; a hit reads the origin's post-projection field, a miss
    /// means the projection dropped the field and the key is unresolvable
    /// locally.
    #[must_use]
    pub fn from_projected<U: FieldAccess + ?Sized>(
        chain: &OrderKeyChain,
        origin: &U,
        bindings: &[ProjectionBinding],
    ) -> Self {
        let bounds = chain
            .iter()
            .map(|key| {
                let Some(binding) = bindings.iter().find(|b| b.source == key.path) else {
                    return ResolvedBound::Unresolved;
                };

                match origin.field(&binding.target) {
                    KeyValue::Null => ResolvedBound::Null,
                    value => ResolvedBound::Value(value),
                }
            })
            .collect();

        Self { bounds }
    }

    #[must_use]
    pub fn bound(&self, index: usize) -> &ResolvedBound {
        self.bounds.get(index).unwrap_or(&ResolvedBound::Unresolved)
    }

    #[must_use]
    pub fn has_unresolved(&self) -> bool {
        self.bounds.contains(&ResolvedBound::Unresolved)
    }
}

/// Recover the primary-key value from a projected origin, if the projection
/// kept it. This is what decides whether a secondary lookup is possible for
/// a projected origin with dropped order-key fields.
#[must_use]
pub fn projected_primary_key<U: FieldAccess + ?Sized>(
    origin: &U,
    bindings: &[ProjectionBinding],
    primary_key_path: &FieldPath,
) -> Option<KeyValue> {
    let binding = bindings.iter().find(|b| &b.source == primary_key_path)?;

    match origin.field(&binding.target) {
        KeyValue::Null => None,
        value => Some(value),
    }
}

///
/// TESTS
///
