use super::{Card, CardPreview, store};
use crate::{
    error::SeekError,
    query::Query,
    store::{MemoryStore, MemoryStoreError},
};
use proptest::prelude::*;
use seekset_core::{
    origin::ProjectionBinding,
    path::FieldPath,
    plan::SeekDirection,
    value::KeyValue,
};
use tokio_util::sync::CancellationToken;

fn by_name() -> Query<Card> {
    Query::all().order_by(FieldPath::field("name"))
}

fn by_artist() -> Query<Card> {
    Query::all()
        .order_by(FieldPath::field("artist"))
        .then_by(FieldPath::field("name"))
}

fn names(items: &[Card]) -> Vec<&'static str> {
    items.iter().map(|card| card.name).collect()
}

#[test]
fn first_page_has_no_previous_anchor() {
    let list = by_name()
        .seek_by(SeekDirection::Forward)
        .take(2)
        .to_seek_list(&store())
        .unwrap();

    assert_eq!(names(list.items()), vec!["Ancestral Recall", "Black Lotus"]);
    assert!(!list.seek().has_previous());
    assert_eq!(list.seek().next().map(|c| c.name), Some("Black Lotus"));
}

#[test]
fn next_anchor_walks_to_the_following_page() {
    let store = store();

    let first = by_name()
        .seek_by(SeekDirection::Forward)
        .take(2)
        .to_seek_list(&store)
        .unwrap();
    let origin = first.seek().next().unwrap().clone();

    let second = by_name()
        .seek_by(SeekDirection::Forward)
        .after(origin)
        .take(2)
        .to_seek_list(&store)
        .unwrap();

    assert_eq!(names(second.items()), vec!["Counterspell", "Mox Pearl"]);
    assert_eq!(second.seek().previous().map(|c| c.name), Some("Counterspell"));
    assert_eq!(second.seek().next().map(|c| c.name), Some("Mox Pearl"));
}

#[test]
fn look_ahead_only_reports_next_when_a_probe_row_exists() {
    let store = store();

    // Exactly page-size rows: the probe fetch comes back short.
    let exact = by_name()
        .seek_by(SeekDirection::Forward)
        .take(5)
        .to_seek_list(&store)
        .unwrap();
    assert_eq!(exact.len(), 5);
    assert!(!exact.seek().has_next());

    let short = by_name()
        .seek_by(SeekDirection::Forward)
        .take(4)
        .to_seek_list(&store)
        .unwrap();
    assert_eq!(short.len(), 4);
    assert!(short.seek().has_next());
}

#[test]
fn backward_without_origin_is_the_last_page_in_ascending_order() {
    let list = by_name()
        .seek_by(SeekDirection::Backward)
        .take(2)
        .to_seek_list(&store())
        .unwrap();

    assert_eq!(names(list.items()), vec!["Mox Pearl", "Time Walk"]);
    assert_eq!(list.seek().previous().map(|c| c.name), Some("Mox Pearl"));
    assert!(!list.seek().has_next());
}

#[test]
fn backward_from_a_pages_first_item_returns_the_previous_page() {
    let store = store();

    let first = by_name()
        .seek_by(SeekDirection::Forward)
        .take(2)
        .to_seek_list(&store)
        .unwrap();
    let second = by_name()
        .seek_by(SeekDirection::Forward)
        .after(first.seek().next().unwrap().clone())
        .take(2)
        .to_seek_list(&store)
        .unwrap();

    let back = by_name()
        .seek_by(SeekDirection::Backward)
        .after(second.items()[0].clone())
        .take(2)
        .to_seek_list(&store)
        .unwrap();

    assert_eq!(back.items(), first.items());
    // Nothing precedes the first page, so no further backward anchor.
    assert!(!back.seek().has_previous());
    assert_eq!(back.seek().next().map(|c| c.name), Some("Black Lotus"));
}

#[test]
fn nullable_key_sorts_nulls_first_by_default() {
    let list = by_artist()
        .seek_by(SeekDirection::Forward)
        .take(3)
        .to_seek_list(&store())
        .unwrap();

    assert_eq!(
        names(list.items()),
        vec!["Mox Pearl", "Time Walk", "Ancestral Recall"]
    );
}

#[test]
fn null_ava_ben_pages_cleanly_across_the_null_boundary() {
    // Three artists [null, "Ava", "Ben"], nulls first, page size 2: the
    // first page ends exactly on the null/non-null boundary and the second
    // page is the remainder with nothing beyond it.
    let rows = vec![
        Card::new(1, "One", Some("Ben")),
        Card::new(2, "Two", None),
        Card::new(3, "Three", Some("Ava")),
    ];
    let store = MemoryStore::new(rows);
    let query = Query::<Card>::all()
        .order_by(FieldPath::field("artist"))
        .then_by(FieldPath::field("id"));

    let first = query
        .clone()
        .seek_by(SeekDirection::Forward)
        .take(2)
        .to_seek_list(&store)
        .unwrap();
    assert_eq!(
        first.items().iter().map(|c| c.artist).collect::<Vec<_>>(),
        vec![None, Some("Ava")]
    );
    assert!(first.seek().has_next());

    let second = query
        .seek_by(SeekDirection::Forward)
        .after(first.seek().next().unwrap().clone())
        .take(2)
        .to_seek_list(&store)
        .unwrap();
    assert_eq!(
        second.items().iter().map(|c| c.artist).collect::<Vec<_>>(),
        vec![Some("Ben")]
    );
    assert!(!second.seek().has_next());
}

#[test]
fn null_origin_bound_crosses_out_of_the_null_region() {
    // Mox Pearl has a null artist; the page after it covers the rest of the
    // null region and every non-null artist.
    let origin = Card::new(4, "Mox Pearl", None);

    let list = by_artist()
        .seek_by(SeekDirection::Forward)
        .after(origin)
        .take(10)
        .to_seek_list(&store())
        .unwrap();

    assert_eq!(
        names(list.items()),
        vec!["Time Walk", "Ancestral Recall", "Counterspell", "Black Lotus"]
    );
}

#[test]
fn nulls_last_moves_the_null_region_past_every_value() {
    let query = Query::<Card>::all()
        .order_by(FieldPath::field("artist"))
        .nulls_last(FieldPath::field("artist"))
        .then_by(FieldPath::field("name"));

    let list = query
        .clone()
        .seek_by(SeekDirection::Forward)
        .take(10)
        .to_seek_list(&store())
        .unwrap();
    assert_eq!(
        names(list.items()),
        vec![
            "Ancestral Recall",
            "Counterspell",
            "Black Lotus",
            "Mox Pearl",
            "Time Walk"
        ]
    );

    // From the last non-null artist, the next page is the null region.
    let list = query
        .seek_by(SeekDirection::Forward)
        .after(Card::new(2, "Black Lotus", Some("Rush")))
        .take(10)
        .to_seek_list(&store())
        .unwrap();
    assert_eq!(names(list.items()), vec!["Mox Pearl", "Time Walk"]);
}

#[test]
fn key_origin_is_fetched_with_a_secondary_lookup() {
    let list = by_name()
        .seek_by(SeekDirection::Forward)
        .after_key(KeyValue::Int(2))
        .unwrap()
        .take(2)
        .to_seek_list(&store())
        .unwrap();

    assert_eq!(names(list.items()), vec!["Counterspell", "Mox Pearl"]);
}

#[test]
fn vanished_key_origin_degrades_to_the_first_page() {
    // The anchor row is deleted between requests; its key no longer
    // resolves and the request starts over from the top.
    let mut store = store();
    store.remove(&KeyValue::Int(2));

    let list = by_name()
        .seek_by(SeekDirection::Forward)
        .after_key(KeyValue::Int(2))
        .unwrap()
        .take(2)
        .to_seek_list(&store)
        .unwrap();

    assert_eq!(names(list.items()), vec!["Ancestral Recall", "Counterspell"]);
    assert!(!list.seek().has_previous());
}

#[test]
fn seek_without_ordering_is_rejected_at_execution() {
    let result = Query::<Card>::all()
        .seek_by(SeekDirection::Forward)
        .take(2)
        .to_seek_list(&store());

    assert!(matches!(result, Err(SeekError::MissingOrdering)));
}

#[test]
fn repeated_requests_are_idempotent() {
    let store = store();
    let query = by_name()
        .seek_by(SeekDirection::Forward)
        .after(Card::new(2, "Black Lotus", Some("Rush")))
        .take(2);

    let first = query.to_seek_list(&store).unwrap();
    let second = query.to_seek_list(&store).unwrap();

    assert_eq!(first, second);
}

#[test]
fn store_failures_propagate_unchanged() {
    let store = store();
    store.poison();

    let result = by_name()
        .seek_by(SeekDirection::Forward)
        .take(2)
        .to_seek_list(&store);

    assert!(matches!(
        result,
        Err(SeekError::Store(MemoryStoreError::Unavailable))
    ));
}

fn preview_bindings() -> Vec<ProjectionBinding> {
    vec![
        ProjectionBinding::new(FieldPath::field("id"), FieldPath::field("id")),
        ProjectionBinding::new(FieldPath::field("title"), FieldPath::field("name")),
    ]
}

fn preview(card: &Card) -> CardPreview {
    CardPreview {
        id: card.id,
        title: card.name,
    }
}

#[test]
fn projected_origin_resolves_through_its_bindings() {
    let list = Query::<Card>::all()
        .order_by(FieldPath::field("name"))
        .project(preview_bindings(), preview)
        .seek_by(SeekDirection::Forward)
        .after(CardPreview {
            id: 2,
            title: "Black Lotus",
        })
        .take(2)
        .to_seek_list(&store())
        .unwrap();

    let titles: Vec<_> = list.items().iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["Counterspell", "Mox Pearl"]);
    assert_eq!(list.seek().next().map(|p| p.title), Some("Mox Pearl"));
}

#[test]
fn dropped_order_field_falls_back_to_a_primary_key_lookup() {
    // The preview carries no artist, but it kept the primary key, so the
    // executor refetches the full origin row to resolve the artist bound.
    let list = Query::<Card>::all()
        .order_by(FieldPath::field("artist"))
        .then_by(FieldPath::field("name"))
        .project(preview_bindings(), preview)
        .seek_by(SeekDirection::Forward)
        .after(CardPreview {
            id: 1,
            title: "Ancestral Recall",
        })
        .take(10)
        .to_seek_list(&store())
        .unwrap();

    let titles: Vec<_> = list.items().iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["Counterspell", "Black Lotus"]);
}

#[tokio::test]
async fn cancelled_token_short_circuits_before_the_store_call() {
    let token = CancellationToken::new();
    token.cancel();

    let result = by_name()
        .seek_by(SeekDirection::Forward)
        .take(2)
        .to_seek_list_async(&store(), &token)
        .await;

    assert!(matches!(result, Err(SeekError::Cancelled)));
}

#[tokio::test]
async fn async_and_sync_paths_agree() {
    let store = store();
    let query = by_name().seek_by(SeekDirection::Forward).take(3);

    let sync = query.to_seek_list(&store).unwrap();
    let token = CancellationToken::new();
    let asynced = query.to_seek_list_async(&store, &token).await.unwrap();

    assert_eq!(sync, asynced);
}

proptest! {
    /// Walking every page forward and concatenating reproduces the full
    /// catalogue in order, with no row skipped or repeated.
    #[test]
    fn forward_walk_covers_the_sequence(
        groups in prop::collection::vec(0u8..3, 0..12),
        page_size in 1u64..5,
    ) {
        let cards: Vec<Card> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let artist = match *group {
                    0 => None,
                    1 => Some("Avon"),
                    _ => Some("Birch"),
                };
                Card::new(i64::try_from(index).unwrap(), "-", artist)
            })
            .collect();

        let mut expected = cards.clone();
        expected.sort_by_key(|card| (card.artist, card.id));

        let store = MemoryStore::new(cards.clone());
        let base = Query::<Card>::all()
            .order_by(FieldPath::field("artist"))
            .then_by(FieldPath::field("id"));

        let mut collected = Vec::new();
        let mut origin: Option<Card> = None;

        for _ in 0..=cards.len() {
            let mut query = base.clone().seek_by(SeekDirection::Forward).take(page_size);
            if let Some(origin) = origin.clone() {
                query = query.after(origin);
            }

            let page = query.to_seek_list(&store).unwrap();
            collected.extend_from_slice(page.items());

            match page.seek().next() {
                Some(next) => origin = Some(next.clone()),
                None => break,
            }
        }

        prop_assert_eq!(collected, expected);
    }
}
