//! Module: result
//! Responsibility: pagination result envelopes.
//! Does not own: query execution or pagination planning.
//! Boundary: value objects handed back to callers; immutable after
//! assembly.

use serde::{Deserialize, Serialize};

///
/// Seek
///
/// Boundary anchors of one seek page. `previous`/`next` hold the records a
/// caller would pass back as the next request's origin; `None` means no
/// page exists in that direction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Seek<U> {
    previous: Option<U>,
    next: Option<U>,
}

impl<U> Seek<U> {
    #[must_use]
    pub const fn new(previous: Option<U>, next: Option<U>) -> Self {
        Self { previous, next }
    }

    #[must_use]
    pub const fn previous(&self) -> Option<&U> {
        self.previous.as_ref()
    }

    #[must_use]
    pub const fn next(&self) -> Option<&U> {
        self.next.as_ref()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub fn into_parts(self) -> (Option<U>, Option<U>) {
        (self.previous, self.next)
    }
}

///
/// SeekList
///
/// One seek-paginated page. `items.len() <= page_size` always; equality
/// requires a look-ahead row to have existed in the fetch direction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeekList<U> {
    items: Vec<U>,
    seek: Seek<U>,
}

impl<U> SeekList<U> {
    #[must_use]
    pub const fn new(items: Vec<U>, seek: Seek<U>) -> Self {
        Self { items, seek }
    }

    #[must_use]
    pub fn items(&self) -> &[U] {
        &self.items
    }

    #[must_use]
    pub const fn seek(&self) -> &Seek<U> {
        &self.seek
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume this page and return `(items, seek)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<U>, Seek<U>) {
        (self.items, self.seek)
    }

    #[must_use]
    pub fn into_items(self) -> Vec<U> {
        self.items
    }
}

impl<U> From<(Vec<U>, Seek<U>)> for SeekList<U> {
    fn from(value: (Vec<U>, Seek<U>)) -> Self {
        let (items, seek) = value;

        Self::new(items, seek)
    }
}

impl<U> From<SeekList<U>> for (Vec<U>, Seek<U>) {
    fn from(value: SeekList<U>) -> Self {
        value.into_parts()
    }
}

///
/// Offset
///
/// Offset-mode pagination metadata, computed from a total-count query run
/// without the skip/take window applied.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Offset {
    page_index: u64,
    total_items: u64,
    page_size: u64,
}

impl Offset {
    #[must_use]
    pub const fn new(page_index: u64, total_items: u64, page_size: u64) -> Self {
        Self {
            page_index,
            total_items,
            page_size,
        }
    }

    #[must_use]
    pub const fn page_index(&self) -> u64 {
        self.page_index
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of pages at this page size, rounding the last partial page up.
    #[must_use]
    pub const fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total_items.div_ceil(self.page_size)
        }
    }
}

///
/// OffsetList
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OffsetList<U> {
    items: Vec<U>,
    offset: Offset,
}

impl<U> OffsetList<U> {
    #[must_use]
    pub const fn new(items: Vec<U>, offset: Offset) -> Self {
        Self { items, offset }
    }

    #[must_use]
    pub fn items(&self) -> &[U] {
        &self.items
    }

    #[must_use]
    pub const fn offset(&self) -> &Offset {
        &self.offset
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<U>, Offset) {
        (self.items, self.offset)
    }
}

impl<U> From<(Vec<U>, Offset)> for OffsetList<U> {
    fn from(value: (Vec<U>, Offset)) -> Self {
        let (items, offset) = value;

        Self::new(items, offset)
    }
}

impl<U> From<OffsetList<U>> for (Vec<U>, Offset) {
    fn from(value: OffsetList<U>) -> Self {
        value.into_parts()
    }
}

///
/// TESTS
///
