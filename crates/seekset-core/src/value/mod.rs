//! Module: value
//! Responsibility: the tagged key-value sum type and its comparators.
//! Does not own: field access, plan shapes, or null-policy extraction.
//! Boundary: every order-key bound and predicate operand is a `KeyValue`.

mod compare;

pub use compare::{NullPolicy, apply_direction, ranked_cmp, strict_cmp};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

///
/// OrdinalValue
///
/// An enum-like value compared by its declared ordinal, never by its label.
/// The label is carried for diagnostics and rendering only.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OrdinalValue {
    pub ordinal: u32,
    pub label: Cow<'static, str>,
}

impl OrdinalValue {
    #[must_use]
    pub const fn new(ordinal: u32, label: &'static str) -> Self {
        Self {
            ordinal,
            label: Cow::Borrowed(label),
        }
    }
}

// Equality and ordering are ordinal-only by contract.
impl PartialEq for OrdinalValue {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal
    }
}

impl Eq for OrdinalValue {}

impl PartialOrd for OrdinalValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdinalValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal.cmp(&other.ordinal)
    }
}

///
/// KeyValue
///
/// Tagged value used for order-key bounds and predicate operands.
///
/// `Null` → the underlying field is absent (`Option::None`) or a referenced
/// to-one navigation target does not exist; the two are indistinguishable
/// on purpose.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum KeyValue {
    Bool(bool),
    Enum(OrdinalValue),
    Int(i64),
    Null,
    Text(String),
    Uint(u64),
}

///
/// KeyKind
///
/// Tag-only mirror of `KeyValue`, used for eager origin-key type checks.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum KeyKind {
    Bool,
    Enum,
    Int,
    Null,
    Text,
    Uint,
}

impl KeyValue {
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        match self {
            Self::Bool(_) => KeyKind::Bool,
            Self::Enum(_) => KeyKind::Enum,
            Self::Int(_) => KeyKind::Int,
            Self::Null => KeyKind::Null,
            Self::Text(_) => KeyKind::Text,
            Self::Uint(_) => KeyKind::Uint,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    // Deterministic rank for mixed-variant comparisons in total orderings.
    pub(crate) const fn variant_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::Uint(_) => 2,
            Self::Enum(_) => 3,
            Self::Text(_) => 4,
            Self::Null => 5,
        }
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for KeyValue {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<OrdinalValue> for KeyValue {
    fn from(value: OrdinalValue) -> Self {
        Self::Enum(value)
    }
}

impl<V: Into<Self>> From<Option<V>> for KeyValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl std::fmt::Display for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Enum(v) => write!(f, "{}#{}", v.label, v.ordinal),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => write!(f, "null"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

///
/// TESTS
///
