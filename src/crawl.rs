//! Crawl driver
//!
//! Walks a namespace listing the way a client does: fetch a page, follow
//! `x-next-batch` until it disappears. Ids are deduplicated because a marker
//! is itself an id and consumers must not rely on page exclusivity.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Result, SimError};
use crate::protocol::{decode_listing, Request};
use crate::simulator::Simulator;
use crate::universe::Namespace;

/// Everything a crawl observed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Each page's ids, in request order
    pub pages: Vec<Vec<String>>,

    /// Every `x-next-batch` URL that was followed
    pub next_batches: Vec<String>,

    /// Distinct ids in first-seen order
    pub ids: Vec<String>,
}

impl CrawlReport {
    /// Number of listing requests issued
    pub fn requests(&self) -> usize {
        self.pages.len()
    }

    /// Total ids served, duplicates included
    pub fn served(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

/// Crawl one namespace of `sim` from the top
///
/// Fails if a response is not a listing, or if the crawl issues more
/// requests than the namespace has ids (plus the two a tiny namespace
/// needs), which would mean the cursor stopped advancing.
pub fn crawl(sim: &Simulator, namespace: Namespace) -> Result<CrawlReport> {
    let limit = sim.universe().len(namespace) + 2;
    let mut report = CrawlReport::default();
    let mut seen = BTreeSet::new();
    let mut url = sim.listing_url(namespace);

    loop {
        if report.requests() >= limit {
            return Err(SimError::InvalidState(format!(
                "{} crawl did not terminate after {} requests",
                namespace, limit
            )));
        }

        let response = sim.execute(&Request::get(&url)?);
        let (ids, next_batch) = decode_listing(&response)?;

        for id in &ids {
            if seen.insert(id.clone()) {
                report.ids.push(id.clone());
            }
        }
        report.pages.push(ids);

        match next_batch {
            Some(next) => {
                report.next_batches.push(next.clone());
                url = next;
            }
            None => break,
        }
    }

    debug!(
        %namespace,
        requests = report.requests(),
        distinct = report.ids.len(),
        "Crawl finished"
    );

    Ok(report)
}
