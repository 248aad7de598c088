//! Listing Module
//!
//! Cursor-based pagination over a sorted keyspace.
//!
//! ## Page Boundaries
//! ```text
//!  sorted ids:  a0 a1 a2 ... a14 | a15 ... a29 | a30 ... a44
//!               └─ page 1 ──────┘ └─ page 2 ──┘ └─ page 3 ──┘
//!  next marker:          a15             a30          (none)
//! ```
//!
//! The page length is `floor(N / d)` where `N` is the namespace size at the
//! time of the call and `d` is the [`PageFraction`]. The next marker is the
//! first id *not* returned, so the following page starts with it.

mod cursor;

use crate::error::{Result, SimError};

pub use cursor::{list_page, resolve_marker};

/// Page length divisor (`d`), never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFraction(usize);

impl PageFraction {
    /// Divisor used when none is configured
    pub const DEFAULT: usize = 3;

    pub fn new(divisor: usize) -> Result<Self> {
        if divisor == 0 {
            return Err(SimError::Config(
                "page fraction must be at least 1".to_string(),
            ));
        }
        Ok(Self(divisor))
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Page length for a keyspace of `total` ids
    pub fn page_len(&self, total: usize) -> usize {
        total / self.0
    }
}

impl Default for PageFraction {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// One page of a listing, borrowed from the sorted id slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, S> {
    /// Index of the first returned id
    pub start: usize,

    /// Returned ids, ascending
    pub items: &'a [S],

    /// First id of the next page; `None` on the final page
    pub next_marker: Option<&'a S>,
}

impl<'a, S: AsRef<str>> Page<'a, S> {
    pub fn is_final(&self) -> bool {
        self.next_marker.is_none()
    }

    /// Copy the page out of the borrowed id slice
    pub fn to_listing(&self) -> Listing {
        Listing {
            items: self.items.iter().map(|id| id.as_ref().to_string()).collect(),
            next_marker: self.next_marker.map(|id| id.as_ref().to_string()),
        }
    }
}

/// An owned page, as served to clients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<String>,
    pub next_marker: Option<String>,
}

impl Listing {
    pub fn is_final(&self) -> bool {
        self.next_marker.is_none()
    }
}
