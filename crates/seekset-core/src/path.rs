//! Module: path
//! Responsibility: explicit field-path descriptors.
//! Does not own: value extraction or plan semantics.
//! Boundary: order keys, predicates, and projection bindings address fields
//! through `FieldPath` instead of host-language reflection.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

///
/// FieldPath
///
/// A field on the root record shape, optionally reached through one to-one
/// navigation hop. Single-hop is a hard modeling limit, not a default.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FieldPath {
    relation: Option<Cow<'static, str>>,
    field: Cow<'static, str>,
}

impl FieldPath {
    /// A direct field on the root record.
    #[must_use]
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            relation: None,
            field: name.into(),
        }
    }

    /// A field reached through one to-one relation.
    #[must_use]
    pub fn via(
        relation: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            relation: Some(relation.into()),
            field: field.into(),
        }
    }

    #[must_use]
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    #[must_use]
    pub fn leaf(&self) -> &str {
        &self.field
    }

    /// Structural prefix test.
    ///
    /// `a.is_prefix_of(b)` holds when `a == b`, or when `a` names the
    /// relation that `b` navigates through (`a = "book"`, `b = "book.name"`).
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }

        self.relation.is_none() && other.relation.as_deref() == Some(self.leaf())
    }

    /// Whether two paths are structurally related in either direction.
    ///
    /// This is the attachment rule for null-ordering markers: a marker on a
    /// relation binds keys navigating through it, and a marker on a navigated
    /// field binds the key for that field.
    #[must_use]
    pub fn is_related_to(&self, other: &Self) -> bool {
        self.is_prefix_of(other) || other.is_prefix_of(self)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.relation() {
            Some(relation) => write!(f, "{relation}.{}", self.field),
            None => write!(f, "{}", self.field),
        }
    }
}

///
/// TESTS
///
