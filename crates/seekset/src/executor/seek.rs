//! Seek-mode execution.
//!
//! One request runs in four stages: canonicalize the plan and extract its
//! order-key chain, resolve the origin onto that chain (issuing the
//! secondary lookup for key-only origins), build the composite boundary
//! filter, then fetch `page size + 1` rows and trim the look-ahead probe
//! into the result envelope's anchors.

use crate::{
    error::SeekError,
    executor::ensure_live,
    query::Projection,
    result::{Seek, SeekList},
    store::{AsyncReadStore, ReadStore},
};
use seekset_core::{
    error::PlanError,
    filter::build_seek_filter,
    order::{OrderKeyChain, extract_order_keys},
    origin::{Origin, OriginTranslation, projected_primary_key},
    plan::{ExecutablePlan, Plan, SeekDirection, SeekNode},
    rewrite::{fold_seek_take, origin_lookup_plan, rewrite_seek, seek_directive},
    traits::{FieldAccess, Record},
    value::KeyValue,
};
use tokio_util::sync::CancellationToken;

///
/// Prepared
///
/// The canonicalized request frame shared by every seek entry point.
///

struct Prepared {
    plan: Plan,
    chain: OrderKeyChain,
    directive: SeekNode,
}

fn prepare(plan: &Plan) -> Result<Prepared, PlanError> {
    let plan = fold_seek_take(plan);
    let chain = extract_order_keys(&plan);
    chain.require_non_empty()?;

    let directive = seek_directive(&plan).unwrap_or(SeekNode {
        direction: SeekDirection::Forward,
        size: None,
    });

    Ok(Prepared {
        plan,
        chain,
        directive,
    })
}

///
/// Resolution
///
/// Origin resolution as far as it can go without a store round-trip.
/// `Lookup` carries the partially-resolved translation to fall back on if
/// the origin row has vanished; for key-only origins that fallback is fully
/// unresolved and the request degrades to a first page.
///

enum Resolution {
    Ready(OriginTranslation),
    Lookup {
        key: KeyValue,
        partial: OriginTranslation,
    },
}

fn resolve_entity<T: Record>(chain: &OrderKeyChain, origin: Option<&Origin<T>>) -> Resolution {
    match origin {
        None => Resolution::Ready(OriginTranslation::unresolved(chain)),
        Some(Origin::Record(record)) => {
            Resolution::Ready(OriginTranslation::from_record(chain, record))
        }
        Some(Origin::Key(key)) => Resolution::Lookup {
            key: key.clone(),
            partial: OriginTranslation::unresolved(chain),
        },
    }
}

fn resolve_projected<T: Record, U: FieldAccess>(
    chain: &OrderKeyChain,
    origin: Option<&Origin<U>>,
    projection: &Projection<T, U>,
) -> Resolution {
    match origin {
        None => Resolution::Ready(OriginTranslation::unresolved(chain)),
        Some(Origin::Key(key)) => Resolution::Lookup {
            key: key.clone(),
            partial: OriginTranslation::unresolved(chain),
        },
        Some(Origin::Record(record)) => {
            let partial =
                OriginTranslation::from_projected(chain, record, projection.bindings());

            if !partial.has_unresolved() {
                return Resolution::Ready(partial);
            }

            // The projection dropped an order-key field; a lookup can fill
            // the gaps only if it kept the primary key.
            match projected_primary_key(record, projection.bindings(), &T::primary_key_path()) {
                Some(key) => Resolution::Lookup { key, partial },
                None => Resolution::Ready(partial),
            }
        }
    }
}

fn lookup_plan<T: Record>(key: KeyValue) -> ExecutablePlan {
    origin_lookup_plan(T::SOURCE, T::primary_key_path(), key)
}

fn translated<T: Record>(
    chain: &OrderKeyChain,
    mut rows: Vec<T>,
    partial: OriginTranslation,
) -> OriginTranslation {
    rows.pop().map_or_else(
        || {
            tracing::debug!("origin row vanished, falling back to local bounds");
            partial
        },
        |row| OriginTranslation::from_record(chain, &row),
    )
}

/// Rewrite to the store-facing plan, with `anchored` reporting whether any
/// origin bound survived into the boundary filter.
fn rewritten(prepared: &Prepared, translation: &OriginTranslation) -> (ExecutablePlan, bool) {
    let filter = build_seek_filter(&prepared.chain, translation, prepared.directive.direction);
    let anchored = filter.is_some();

    let lowered = rewrite_seek(
        &prepared.plan,
        prepared.chain.clone(),
        filter,
        prepared.directive.direction,
        prepared.directive.size,
    );

    (lowered, anchored)
}

/// Trim the look-ahead probe, restore ascending presentation, and place the
/// boundary anchors.
///
/// Forward: `previous` is the first item when the page was anchored, `next`
/// is the last item when a probe row proved more exist. Backward mirrors
/// that after the rows are flipped back to ascending order.
fn assemble<X: Clone>(
    mut rows: Vec<X>,
    direction: SeekDirection,
    size: Option<u64>,
    anchored: bool,
) -> SeekList<X> {
    let fetched = u64::try_from(rows.len()).unwrap_or(u64::MAX);
    let look_ahead = size.is_some_and(|size| fetched > size);

    if look_ahead {
        let size = size.unwrap_or(0);
        rows.truncate(usize::try_from(size).unwrap_or(usize::MAX));
    }
    if direction == SeekDirection::Backward {
        rows.reverse();
    }

    let (previous, next) = match direction {
        SeekDirection::Forward => (
            if anchored { rows.first().cloned() } else { None },
            if look_ahead { rows.last().cloned() } else { None },
        ),
        SeekDirection::Backward => (
            if look_ahead { rows.first().cloned() } else { None },
            if anchored { rows.last().cloned() } else { None },
        ),
    };

    SeekList::new(rows, Seek::new(previous, next))
}

// ----------------------------------------------------------------------
// Entry points
// ----------------------------------------------------------------------

pub fn seek_entity_sync<T: Record, S: ReadStore<T>>(
    plan: &Plan,
    origin: Option<&Origin<T>>,
    store: &S,
) -> Result<SeekList<T>, SeekError<S::Error>> {
    let prepared = prepare(plan)?;

    let translation = match resolve_entity(&prepared.chain, origin) {
        Resolution::Ready(translation) => translation,
        Resolution::Lookup { key, partial } => {
            let rows = store
                .execute(&lookup_plan::<T>(key))
                .map_err(SeekError::Store)?;
            translated(&prepared.chain, rows, partial)
        }
    };

    let (lowered, anchored) = rewritten(&prepared, &translation);
    tracing::debug!(plan = %lowered, anchored, "seek page");

    let rows = store.execute(&lowered).map_err(SeekError::Store)?;

    Ok(assemble(
        rows,
        prepared.directive.direction,
        prepared.directive.size,
        anchored,
    ))
}

pub async fn seek_entity_async<T: Record, S: AsyncReadStore<T>>(
    plan: &Plan,
    origin: Option<&Origin<T>>,
    store: &S,
    token: &CancellationToken,
) -> Result<SeekList<T>, SeekError<S::Error>> {
    let prepared = prepare(plan)?;

    let translation = match resolve_entity(&prepared.chain, origin) {
        Resolution::Ready(translation) => translation,
        Resolution::Lookup { key, partial } => {
            ensure_live(token)?;
            let rows = store
                .execute(&lookup_plan::<T>(key))
                .await
                .map_err(SeekError::Store)?;
            translated(&prepared.chain, rows, partial)
        }
    };

    let (lowered, anchored) = rewritten(&prepared, &translation);
    tracing::debug!(plan = %lowered, anchored, "seek page");

    ensure_live(token)?;
    let rows = store.execute(&lowered).await.map_err(SeekError::Store)?;

    Ok(assemble(
        rows,
        prepared.directive.direction,
        prepared.directive.size,
        anchored,
    ))
}

pub fn seek_projected_sync<T, U, S>(
    plan: &Plan,
    projection: &Projection<T, U>,
    origin: Option<&Origin<U>>,
    store: &S,
) -> Result<SeekList<U>, SeekError<S::Error>>
where
    T: Record,
    U: FieldAccess + Clone,
    S: ReadStore<T>,
{
    let prepared = prepare(plan)?;

    let translation = match resolve_projected(&prepared.chain, origin, projection) {
        Resolution::Ready(translation) => translation,
        Resolution::Lookup { key, partial } => {
            let rows = store
                .execute(&lookup_plan::<T>(key))
                .map_err(SeekError::Store)?;
            translated(&prepared.chain, rows, partial)
        }
    };

    let (lowered, anchored) = rewritten(&prepared, &translation);
    tracing::debug!(plan = %lowered, anchored, "projected seek page");

    let rows = store.execute(&lowered).map_err(SeekError::Store)?;
    let items: Vec<U> = rows.iter().map(|row| projection.apply(row)).collect();

    Ok(assemble(
        items,
        prepared.directive.direction,
        prepared.directive.size,
        anchored,
    ))
}

pub async fn seek_projected_async<T, U, S>(
    plan: &Plan,
    projection: &Projection<T, U>,
    origin: Option<&Origin<U>>,
    store: &S,
    token: &CancellationToken,
) -> Result<SeekList<U>, SeekError<S::Error>>
where
    T: Record,
    U: FieldAccess + Clone,
    S: AsyncReadStore<T>,
{
    let prepared = prepare(plan)?;

    let translation = match resolve_projected(&prepared.chain, origin, projection) {
        Resolution::Ready(translation) => translation,
        Resolution::Lookup { key, partial } => {
            ensure_live(token)?;
            let rows = store
                .execute(&lookup_plan::<T>(key))
                .await
                .map_err(SeekError::Store)?;
            translated(&prepared.chain, rows, partial)
        }
    };

    let (lowered, anchored) = rewritten(&prepared, &translation);
    tracing::debug!(plan = %lowered, anchored, "projected seek page");

    ensure_live(token)?;
    let rows = store.execute(&lowered).await.map_err(SeekError::Store)?;
    let items: Vec<U> = rows.iter().map(|row| projection.apply(row)).collect();

    Ok(assemble(
        items,
        prepared.directive.direction,
        prepared.directive.size,
        anchored,
    ))
}
