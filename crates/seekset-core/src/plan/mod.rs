//! Module: plan
//! Responsibility: the declarative query-plan AST.
//! Does not own: order-key extraction, filter construction, or execution.
//! Boundary: plans are serializable data; every pass is a function over them.

mod executable;
mod predicate;

pub use executable::ExecutablePlan;
pub use predicate::{CompareOp, Predicate};

use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

///
/// Direction
///
/// Sort direction of one ordering clause.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// SeekDirection
///
/// Traversal direction of a seek request relative to its origin.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SeekDirection {
    #[default]
    Forward,
    Backward,
}

///
/// OrderTarget
///
/// What an ordering clause sorts on.
///
/// `NullCheck` is the null-ordering marker convention: an extra clause that
/// compares a field against constant null. It is reinterpreted during
/// order-key extraction and never reaches the store as a real key.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OrderTarget {
    Field(FieldPath),
    NullCheck(FieldPath),
}

///
/// OrderClause
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderClause {
    pub target: OrderTarget,
    pub direction: Direction,
}

impl OrderClause {
    #[must_use]
    pub const fn field(path: FieldPath, direction: Direction) -> Self {
        Self {
            target: OrderTarget::Field(path),
            direction,
        }
    }

    #[must_use]
    pub const fn null_check(path: FieldPath, direction: Direction) -> Self {
        Self {
            target: OrderTarget::NullCheck(path),
            direction,
        }
    }
}

///
/// SeekNode
///
/// The canonical pagination directive. A literal `Take` directly following
/// a `Seek` folds into `size` so later passes see one node to transform.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeekNode {
    pub direction: SeekDirection,
    pub size: Option<u64>,
}

///
/// PlanNode
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlanNode {
    Filter(Predicate),
    OrderBy(OrderClause),
    Reverse,
    Seek(SeekNode),
    Skip(u64),
    Take(u64),
}

///
/// Plan
///
/// A root source name plus an ordered pipeline of nodes. Construction never
/// fails; misuse (seek without ordering) surfaces at execution time so plans
/// can be composed and handed around before they are complete.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Plan {
    source: Cow<'static, str>,
    nodes: Vec<PlanNode>,
}

impl Plan {
    #[must_use]
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn nodes(&self) -> &[PlanNode] {
        &self.nodes
    }

    #[must_use]
    pub fn push(mut self, node: PlanNode) -> Self {
        self.nodes.push(node);
        self
    }

    #[must_use]
    pub fn filter(self, predicate: Predicate) -> Self {
        self.push(PlanNode::Filter(predicate))
    }

    #[must_use]
    pub fn order_by(self, path: FieldPath, direction: Direction) -> Self {
        self.push(PlanNode::OrderBy(OrderClause::field(path, direction)))
    }

    /// Append a null-ordering marker clause for a structurally-related key.
    #[must_use]
    pub fn order_by_null_check(self, path: FieldPath, direction: Direction) -> Self {
        self.push(PlanNode::OrderBy(OrderClause::null_check(path, direction)))
    }

    #[must_use]
    pub fn skip(self, count: u64) -> Self {
        self.push(PlanNode::Skip(count))
    }

    #[must_use]
    pub fn take(self, count: u64) -> Self {
        self.push(PlanNode::Take(count))
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.push(PlanNode::Reverse)
    }

    #[must_use]
    pub fn seek(self, direction: SeekDirection) -> Self {
        self.push(PlanNode::Seek(SeekNode {
            direction,
            size: None,
        }))
    }

    /// The trailing seek directive, if this plan carries one.
    #[must_use]
    pub fn seek_node(&self) -> Option<SeekNode> {
        self.nodes.iter().rev().find_map(|node| match node {
            PlanNode::Seek(seek) => Some(*seek),
            _ => None,
        })
    }

    /// Fold the page size into a trailing seek directive when present,
    /// otherwise append a plain bounded take.
    #[must_use]
    pub fn take_into_seek(mut self, count: u64) -> Self {
        if let Some(PlanNode::Seek(seek)) = self.nodes.last_mut() {
            seek.size = Some(count);
            self
        } else {
            self.take(count)
        }
    }
}

///
/// TESTS
///
