//! Module: rewrite
//! Responsibility: plan-transformation passes — directive canonicalization,
//! lowering to the store-facing form, and the seek rewrite itself.
//! Does not own: origin resolution or store calls.
//! Boundary: pure functions from plan to plan.

use crate::{
    order::OrderKeyChain,
    path::FieldPath,
    plan::{
        Direction, ExecutablePlan, Plan, PlanNode, Predicate, SeekDirection, SeekNode,
    },
    value::KeyValue,
};
use serde::{Deserialize, Serialize};

///
/// PageInfo
///
/// Offset-mode pagination intent extracted from a plan's skip/take nodes.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageInfo {
    pub skip: u64,
    pub size: Option<u64>,
}

/// Canonicalize the pagination directive: a `Take` immediately following a
/// `Seek` folds its literal page size into the directive, leaving one node
/// for later passes to transform.
#[must_use]
pub fn fold_seek_take(plan: &Plan) -> Plan {
    let mut folded = Plan::new(plan.source().to_string());

    for node in plan.nodes() {
        match node {
            PlanNode::Take(count) => {
                folded = folded.take_into_seek(*count);
            }
            node => {
                folded = folded.push(node.clone());
            }
        }
    }

    folded
}

/// Flatten a declarative plan into the store-facing executable form.
///
/// Filters conjoin; ordering clauses go through order-key extraction;
/// `Reverse` toggles; repeated `Skip`/`Take` are last-wins (the fluent
/// surface only ever emits one of each). Seek directives are skipped here —
/// `rewrite_seek` folds them in.
#[must_use]
pub fn lower_plan(plan: &Plan) -> ExecutablePlan {
    let mut lowered = ExecutablePlan::new(plan.source().to_string());

    for node in plan.nodes() {
        match node {
            PlanNode::Filter(predicate) => lowered.filters.push(predicate.clone()),
            PlanNode::Reverse => lowered.reverse = !lowered.reverse,
            PlanNode::Skip(count) => lowered.skip = Some(*count),
            PlanNode::Take(count) => lowered.take = Some(*count),
            PlanNode::OrderBy(_) | PlanNode::Seek(_) => {}
        }
    }

    lowered.order = crate::order::extract_order_keys(plan);
    lowered
}

/// Rewrite a seek-paginated plan into its executable form.
///
/// Forward splices `filter → take(size + 1)` after the ordering chain.
/// Backward additionally reverses iteration: "the page before X" holds the
/// closest items less than X, found by scanning from the far end and
/// limiting; the executor restores ascending presentation order afterwards.
/// The extra fetched row is the look-ahead probe.
#[must_use]
pub fn rewrite_seek(
    plan: &Plan,
    chain: OrderKeyChain,
    filter: Option<Predicate>,
    direction: SeekDirection,
    page_size: Option<u64>,
) -> ExecutablePlan {
    let mut lowered = lower_plan(plan);
    lowered.order = chain;

    if direction == SeekDirection::Backward {
        lowered.reverse = !lowered.reverse;
    }
    if let Some(filter) = filter {
        lowered.filters.push(filter);
    }

    // The canonical directive governs the window; stray takes do not.
    lowered.take = page_size.map(|size| size.saturating_add(1));
    lowered.skip = None;

    lowered
}

/// The trailing seek directive of a canonicalized plan.
#[must_use]
pub fn seek_directive(plan: &Plan) -> Option<SeekNode> {
    plan.seek_node()
}

/// Offset-mode intent from a lowered plan.
#[must_use]
pub fn page_info(plan: &Plan) -> PageInfo {
    let lowered = lower_plan(plan);

    PageInfo {
        skip: lowered.skip.unwrap_or(0),
        size: lowered.take,
    }
}

/// The same plan with pagination stripped, for total-count queries.
/// Ordering is cleared too; counting does not need it.
#[must_use]
pub fn strip_paging(plan: &Plan) -> ExecutablePlan {
    let mut lowered = lower_plan(plan);
    lowered.skip = None;
    lowered.take = None;
    lowered.order = OrderKeyChain::default();
    lowered.reverse = false;

    lowered
}

/// The dedicated origin-lookup query for a key-only origin: filter the root
/// sequence by primary key, order by primary key, take the single match.
#[must_use]
pub fn origin_lookup_plan(
    source: &'static str,
    primary_key_path: FieldPath,
    key: KeyValue,
) -> ExecutablePlan {
    let mut lookup = ExecutablePlan::new(source);
    lookup.filters.push(Predicate::compare(
        primary_key_path.clone(),
        crate::plan::CompareOp::Eq,
        key,
    ));
    lookup.order = OrderKeyChain::new(vec![crate::order::OrderKey::new(
        primary_key_path,
        Direction::Asc,
    )]);
    lookup.take = Some(1);

    lookup
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        order::extract_order_keys,
        plan::{CompareOp, SeekNode},
    };

    fn ordered_plan() -> Plan {
        Plan::new("cards")
            .filter(Predicate::compare(
                FieldPath::field("set"),
                CompareOp::Eq,
                "dominaria".into(),
            ))
            .order_by(FieldPath::field("name"), Direction::Asc)
            .order_by(FieldPath::field("id"), Direction::Asc)
    }

    #[test]
    fn fold_merges_take_following_seek() {
        let plan = ordered_plan().seek(SeekDirection::Forward).take(10);

        let folded = fold_seek_take(&plan);

        assert_eq!(
            folded.seek_node(),
            Some(SeekNode {
                direction: SeekDirection::Forward,
                size: Some(10),
            })
        );
        assert!(!folded.nodes().iter().any(|n| matches!(n, PlanNode::Take(_))));
    }

    #[test]
    fn fold_leaves_take_without_directive_alone() {
        let plan = ordered_plan().take(10);

        let folded = fold_seek_take(&plan);

        assert!(folded.nodes().iter().any(|n| matches!(n, PlanNode::Take(10))));
    }

    #[test]
    fn forward_rewrite_splices_filter_and_look_ahead() {
        let plan = ordered_plan();
        let chain = extract_order_keys(&plan);
        let filter = Predicate::compare(FieldPath::field("name"), CompareOp::Gt, "Ava".into());

        let lowered = rewrite_seek(&plan, chain, Some(filter), SeekDirection::Forward, Some(10));

        assert_eq!(lowered.filters.len(), 2);
        assert!(!lowered.reverse);
        assert_eq!(lowered.take, Some(11));
        assert_eq!(lowered.order.len(), 2);
    }

    #[test]
    fn backward_rewrite_reverses_iteration() {
        let plan = ordered_plan();
        let chain = extract_order_keys(&plan);

        let lowered = rewrite_seek(&plan, chain, None, SeekDirection::Backward, Some(10));

        assert!(lowered.reverse);
        assert_eq!(lowered.take, Some(11));
    }

    #[test]
    fn page_info_reads_skip_and_take() {
        let plan = ordered_plan().skip(20).take(10);

        assert_eq!(
            page_info(&plan),
            PageInfo {
                skip: 20,
                size: Some(10),
            }
        );
    }

    #[test]
    fn strip_paging_clears_window_and_ordering() {
        let plan = ordered_plan().skip(20).take(10);

        let stripped = strip_paging(&plan);

        assert_eq!(stripped.skip, None);
        assert_eq!(stripped.take, None);
        assert!(stripped.order.is_empty());
        assert_eq!(stripped.filters.len(), 1);
    }

    #[test]
    fn origin_lookup_targets_one_row_by_primary_key() {
        let lookup = origin_lookup_plan("cards", FieldPath::field("id"), 7_i64.into());

        assert_eq!(lookup.take, Some(1));
        assert_eq!(lookup.order.len(), 1);
        assert_eq!(
            lookup.filters,
            vec![Predicate::compare(
                FieldPath::field("id"),
                CompareOp::Eq,
                7_i64.into()
            )]
        );
    }
}
