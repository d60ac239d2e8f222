use crate::{
    path::FieldPath,
    traits::FieldAccess,
    value::{KeyValue, strict_cmp},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

///
/// Predicate
///
/// Boolean filter AST evaluated against one row, or translated by a store
/// into its native filter form.
///
/// `Never` matches nothing. The keyset filter builder emits it when a fully
/// resolved origin has no reachable successor in the travel direction;
/// "no filter at all" is expressed as the absence of a predicate instead.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    And(Vec<Predicate>),
    Compare {
        path: FieldPath,
        op: CompareOp,
        value: KeyValue,
    },
    IsNull(FieldPath),
    IsNotNull(FieldPath),
    Never,
    Or(Vec<Predicate>),
}

impl Predicate {
    #[must_use]
    pub const fn compare(path: FieldPath, op: CompareOp, value: KeyValue) -> Self {
        Self::Compare { path, op, value }
    }

    /// Conjunction with single-element flattening.
    #[must_use]
    pub fn and(mut parts: Vec<Self>) -> Self {
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            Self::And(parts)
        }
    }

    /// Disjunction with single-element flattening; empty input is `Never`.
    #[must_use]
    pub fn or(mut parts: Vec<Self>) -> Self {
        match parts.len() {
            0 => Self::Never,
            1 => parts.remove(0),
            _ => Self::Or(parts),
        }
    }

    /// Evaluate against one row.
    ///
    /// Comparisons with a null operand on either side are false; null tests
    /// go through `IsNull`/`IsNotNull` explicitly. This matches how the
    /// backing stores this engine targets treat null in comparisons.
    pub fn matches<R: FieldAccess + ?Sized>(&self, row: &R) -> bool {
        match self {
            Self::And(parts) => parts.iter().all(|part| part.matches(row)),
            Self::Or(parts) => parts.iter().any(|part| part.matches(row)),
            Self::Never => false,
            Self::IsNull(path) => row.field(path).is_null(),
            Self::IsNotNull(path) => !row.field(path).is_null(),
            Self::Compare { path, op, value } => {
                compare_matches(&row.field(path), *op, value)
            }
        }
    }
}

// Three-valued comparison collapse: unknown evaluates to false.
fn compare_matches(field: &KeyValue, op: CompareOp, value: &KeyValue) -> bool {
    let Some(ordering) = strict_cmp(field, value) else {
        return false;
    };

    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And(parts) => write_joined(f, parts, " and "),
            Self::Or(parts) => write_joined(f, parts, " or "),
            Self::Never => write!(f, "never"),
            Self::IsNull(path) => write!(f, "{path} is null"),
            Self::IsNotNull(path) => write!(f, "{path} is not null"),
            Self::Compare { path, op, value } => {
                let op = match op {
                    CompareOp::Eq => "=",
                    CompareOp::Ne => "!=",
                    CompareOp::Lt => "<",
                    CompareOp::Lte => "<=",
                    CompareOp::Gt => ">",
                    CompareOp::Gte => ">=",
                };
                write!(f, "{path} {op} {value}")
            }
        }
    }
}

fn write_joined(
    f: &mut std::fmt::Formatter<'_>,
    parts: &[Predicate],
    separator: &str,
) -> std::fmt::Result {
    write!(f, "(")?;
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{part}")?;
    }
    write!(f, ")")
}

///
/// TESTS
///
