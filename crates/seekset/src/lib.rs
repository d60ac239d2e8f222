//! seekset: keyset ("seek") pagination over a backend-neutral query plan.
//!
//! A caller builds an ordered plan with the fluent [`Query`] surface,
//! attaches a pagination directive — an origin plus a direction for seek
//! mode, or skip/take for offset mode — and the executors rewrite the plan,
//! run it against a [`store::ReadStore`], and return a [`SeekList`] or
//! [`OffsetList`] envelope.
//!
//! Seek pagination stays stable under concurrent writes because it filters
//! by "items ordered after the last item seen" instead of a numeric offset;
//! the offset mode exists for surfaces where stability does not matter.

pub mod error;
pub mod executor;
pub mod query;
pub mod result;
pub mod store;

pub use error::{InvalidOriginKey, SeekError};
pub use query::{Projected, ProjectedSeekQuery, Projection, Query, SeekQuery};
pub use result::{Offset, OffsetList, Seek, SeekList};

// The plan layer is part of the public vocabulary.
pub use seekset_core::{
    error::PlanError,
    filter::build_seek_filter,
    order::{OrderKey, OrderKeyChain, extract_order_keys},
    origin::{Origin, OriginTranslation, ProjectionBinding, ResolvedBound},
    path::FieldPath,
    plan::{
        CompareOp, Direction, ExecutablePlan, Plan, PlanNode, Predicate, SeekDirection,
    },
    rewrite::PageInfo,
    traits::{FieldAccess, Record},
    value::{KeyKind, KeyValue, NullPolicy, OrdinalValue},
};

///
/// Prelude
///
/// Domain vocabulary only; stores and executors are named explicitly.
///

pub mod prelude {
    pub use crate::{
        error::SeekError,
        query::Query,
        result::{OffsetList, SeekList},
    };
    pub use seekset_core::prelude::*;
}
