//! Core plan layer for seekset: the query-plan AST, order-key extraction,
//! origin translation, keyset filter construction, and plan lowering.
//!
//! Everything in this crate is pure and synchronous. Store contracts,
//! executors, and the fluent builder surface live in the `seekset` crate.

pub mod error;
pub mod filter;
pub mod order;
pub mod origin;
pub mod path;
pub mod plan;
pub mod rewrite;
pub mod traits;
pub mod value;

///
/// Prelude
///
/// Domain vocabulary only. No lowering helpers or internals.
///

pub mod prelude {
    pub use crate::{
        error::PlanError,
        order::{OrderKey, OrderKeyChain},
        origin::{Origin, ProjectionBinding},
        path::FieldPath,
        plan::{CompareOp, Direction, Plan, Predicate, SeekDirection},
        traits::{FieldAccess, Record},
        value::{KeyKind, KeyValue, NullPolicy, OrdinalValue},
    };
}
