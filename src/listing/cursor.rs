//! Page boundary and marker computation

use tracing::trace;

use super::{Page, PageFraction};

/// Index a marker resumes from
///
/// The first id `>= marker`. A marker that sorts after every id falls back
/// to 0, which restarts the listing from the top.
pub fn resolve_marker<S: AsRef<str>>(sorted_ids: &[S], marker: &str) -> usize {
    let idx = sorted_ids.partition_point(|id| id.as_ref() < marker);
    if idx == sorted_ids.len() {
        0
    } else {
        idx
    }
}

/// Compute one page of `sorted_ids`
///
/// - no marker: the first `floor(N / d)` ids
/// - marker resolving past index 0: `floor(N / d)` ids from the resolved index
/// - marker resolving to index 0: everything, as a final page
///
/// The last rule keeps a crawl finite when `floor(N / d) == 0`: the first
/// page is then empty and points at the first id, and the follow-up call
/// returns the whole keyspace.
///
/// `sorted_ids` must be ascending and free of duplicates.
pub fn list_page<'a, S: AsRef<str>>(
    sorted_ids: &'a [S],
    marker: Option<&str>,
    fraction: PageFraction,
) -> Page<'a, S> {
    let total = sorted_ids.len();
    let page_len = fraction.page_len(total);

    let (start, end) = match marker {
        None => (0, page_len),
        Some(marker) => match resolve_marker(sorted_ids, marker) {
            0 => (0, total),
            start => (start, start + page_len),
        },
    };

    trace!(total, page_len, start, end, ?marker, "Computed page boundaries");

    if end >= total {
        Page {
            start,
            items: &sorted_ids[start..],
            next_marker: None,
        }
    } else {
        Page {
            start,
            items: &sorted_ids[start..end],
            next_marker: Some(&sorted_ids[end]),
        }
    }
}
