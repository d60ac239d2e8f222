//! Module: traits
//! Responsibility: record/field-access contracts shared by every pass.
//! Does not own: store execution or plan construction.
//! Boundary: the only way the engine reads application data.

use crate::{
    path::FieldPath,
    value::{KeyKind, KeyValue},
};

///
/// FieldAccess
///
/// Read one field by path. A missing field, a `None` value, or a missing
/// to-one navigation target all read as `KeyValue::Null`.
///

pub trait FieldAccess {
    fn field(&self, path: &FieldPath) -> KeyValue;
}

///
/// Record
///
/// A root query element: a named source sequence plus a primary-key
/// accessor. The key accessor is what lets the engine build the secondary
/// origin-lookup query from a bare key value.
///

pub trait Record: FieldAccess + Clone + Send + Sync + 'static {
    /// Name of the root sequence this record type is queried from.
    const SOURCE: &'static str;

    fn primary_key(&self) -> KeyValue;

    fn primary_key_path() -> FieldPath;

    /// Declared kind of the primary key, for eager origin-key checks.
    fn key_kind() -> KeyKind;
}
