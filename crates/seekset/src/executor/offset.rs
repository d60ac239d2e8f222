//! Offset-mode execution.
//!
//! Two store round-trips per request: a total count over the filtered
//! sequence with the pagination window stripped, then the windowed fetch.
//! The metadata derives page index and count from that total, so a skip
//! beyond the end yields an empty page with honest numbers.

use crate::{
    error::SeekError,
    executor::ensure_live,
    query::Projection,
    result::{Offset, OffsetList},
    store::{AsyncReadStore, ReadStore},
};
use seekset_core::{
    plan::Plan,
    rewrite::{PageInfo, lower_plan, page_info, strip_paging},
    traits::Record,
};
use tokio_util::sync::CancellationToken;

/// Metadata from the window intent plus the unwindowed total. A plan with
/// no explicit take is a single page holding everything past the skip.
fn offset_meta(info: PageInfo, total: u64) -> Offset {
    let page_size = info.size.unwrap_or_else(|| total.saturating_sub(info.skip));
    let page_index = if page_size == 0 {
        0
    } else {
        info.skip / page_size
    };

    Offset::new(page_index, total, page_size)
}

pub fn offset_sync<T: Record, S: ReadStore<T>>(
    plan: &Plan,
    store: &S,
) -> Result<OffsetList<T>, SeekError<S::Error>> {
    let info = page_info(plan);
    let total = store.count(&strip_paging(plan)).map_err(SeekError::Store)?;

    let lowered = lower_plan(plan);
    tracing::debug!(plan = %lowered, total, "offset page");
    let rows = store.execute(&lowered).map_err(SeekError::Store)?;

    Ok(OffsetList::new(rows, offset_meta(info, total)))
}

pub async fn offset_async<T: Record, S: AsyncReadStore<T>>(
    plan: &Plan,
    store: &S,
    token: &CancellationToken,
) -> Result<OffsetList<T>, SeekError<S::Error>> {
    let info = page_info(plan);

    ensure_live(token)?;
    let total = store
        .count(&strip_paging(plan))
        .await
        .map_err(SeekError::Store)?;

    let lowered = lower_plan(plan);
    tracing::debug!(plan = %lowered, total, "offset page");

    ensure_live(token)?;
    let rows = store.execute(&lowered).await.map_err(SeekError::Store)?;

    Ok(OffsetList::new(rows, offset_meta(info, total)))
}

pub fn offset_projected_sync<T, U, S>(
    plan: &Plan,
    projection: &Projection<T, U>,
    store: &S,
) -> Result<OffsetList<U>, SeekError<S::Error>>
where
    T: Record,
    S: ReadStore<T>,
{
    let page = offset_sync(plan, store)?;
    let (rows, offset) = page.into_parts();
    let items = rows.iter().map(|row| projection.apply(row)).collect();

    Ok(OffsetList::new(items, offset))
}

pub async fn offset_projected_async<T, U, S>(
    plan: &Plan,
    projection: &Projection<T, U>,
    store: &S,
    token: &CancellationToken,
) -> Result<OffsetList<U>, SeekError<S::Error>>
where
    T: Record,
    S: AsyncReadStore<T>,
{
    let page = offset_async(plan, store, token).await?;
    let (rows, offset) = page.into_parts();
    let items = rows.iter().map(|row| projection.apply(row)).collect();

    Ok(OffsetList::new(items, offset))
}
