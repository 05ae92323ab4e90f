//! # Pagination
//!
//! Windows a sequence into 1-based pages with count metadata.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{Result, argument_err};

/// One page of a source sequence, with the counts a grid needs to render
/// its pager.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    /// The items in this page.
    pub items: Vec<T>,

    /// The total item count of the source sequence.
    pub total_count: usize,

    /// The requested page size.
    pub page_size: usize,

    /// The reported page number.
    ///
    /// When the requested page lies beyond `total_pages` this resets to 1
    /// while `items` stays the (empty) window of the requested page.
    pub current_page: usize,

    /// The number of pages the source splits into.
    pub total_pages: usize,
}

impl<T> PagedList<T> {
    /// True when a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// True when a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

impl<T> Deref for PagedList<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for PagedList<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Window a sequence into the requested 1-based page.
///
/// The skip count is clamped so it never exceeds the source length, which
/// means a page past the end yields an empty window (reported as
/// `current_page` 1) rather than an error.
///
/// # Errors
///
/// Returns `Error::Argument` when `page_number` or `page_size` is zero.
pub fn paginate<T>(source: Vec<T>, page_number: usize, page_size: usize) -> Result<PagedList<T>> {
    if page_number < 1 || page_size < 1 {
        return Err(argument_err!("page number and page size must both be greater than zero"));
    }

    let total_count = source.len();
    let skip = total_count.min((page_number - 1) * page_size);
    let items = source.into_iter().skip(skip).take(page_size).collect();

    let total_pages = total_count.div_ceil(page_size);
    let current_page = if page_number > total_pages { 1 } else { page_number };

    Ok(PagedList {
        items,
        total_count,
        page_size,
        current_page,
        total_pages,
    })
}
