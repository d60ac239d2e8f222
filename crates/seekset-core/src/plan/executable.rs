use crate::{order::OrderKeyChain, plan::Predicate, value::NullPolicy};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

///
/// ExecutablePlan
///
/// Flattened, store-facing form of a rewritten plan. Stores apply the parts
/// in this order: filters → order → reverse → skip → take. The seek
/// directive never reaches this form; the rewriter has already folded it
/// into `filters`, `reverse`, and `take`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ExecutablePlan {
    pub source: Cow<'static, str>,
    pub filters: Vec<Predicate>,
    pub order: OrderKeyChain,
    pub reverse: bool,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl ExecutablePlan {
    #[must_use]
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            filters: Vec::new(),
            order: OrderKeyChain::default(),
            reverse: false,
            skip: None,
            take: None,
        }
    }

    /// Whether one row passes every filter.
    pub fn row_matches<R: crate::traits::FieldAccess + ?Sized>(&self, row: &R) -> bool {
        self.filters.iter().all(|filter| filter.matches(row))
    }
}

impl std::fmt::Display for ExecutablePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source={}", self.source)?;

        for filter in &self.filters {
            write!(f, " filter={filter}")?;
        }

        if !self.order.is_empty() {
            write!(f, " order=")?;
            for (index, key) in self.order.iter().enumerate() {
                if index > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}:{:?}", key.path, key.direction)?;
                if key.nulls != NullPolicy::None {
                    write!(f, ":{:?}", key.nulls)?;
                }
            }
        }

        if self.reverse {
            write!(f, " reverse")?;
        }
        if let Some(skip) = self.skip {
            write!(f, " skip={skip}")?;
        }
        if let Some(take) = self.take {
            write!(f, " take={take}")?;
        }

        Ok(())
    }
}

///
/// TESTS
///
