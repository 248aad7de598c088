//! Simulator Module
//!
//! The facade a test drives: it owns one universe, seeds it, and answers
//! simulated requests against it.
//!
//! ## Responsibilities
//! - Validate configuration and own the seeded RNG
//! - Run seeding operations under the write lock
//! - Route listing and lookup requests under the read lock
//! - Turn every failure into a response value (never a panic)

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use tracing::{debug, trace, warn};

use crate::block::SeedBlock;
use crate::config::Config;
use crate::error::Result;
use crate::listing::{list_page, Listing, PageFraction};
use crate::lookup::{lookup, LookupOutcome};
use crate::protocol::{self, Method, Request, Response, Route};
use crate::seed::{self, OrphanReport, SeedProfile, SimRng};
use crate::universe::{BlockUniverse, Namespace};

/// A simulated block-listing service for one vault
///
/// ## Concurrency Model: seed, then read
///
/// - **Seeding** (`generate_blocks`, `seed_blocks`, `generate_orphaned_blocks`)
///   takes the universe write lock and the RNG lock
/// - **Requests** (`list`, `lookup`, `execute`) take only the read lock and
///   keep no per-client state; the marker travels in each request
///
/// Seeding while requests are in flight is outside the contract: a crawl
/// that spans a seeding call sees page boundaries computed over two
/// different universes.
pub struct Simulator {
    /// Simulator configuration
    config: Config,

    /// Validated page divisor
    fraction: PageFraction,

    /// Seeding parameters derived from the config
    profile: SeedProfile,

    /// The block universe (single writer during seeding, many readers after)
    universe: RwLock<BlockUniverse>,

    /// Source of every random draw made while seeding
    rng: Mutex<SimRng>,
}

impl Simulator {
    /// Create a simulator with an empty universe
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let fraction = PageFraction::new(config.page_fraction)?;
        let rng = match config.seed {
            Some(seed) => SimRng::seeded(seed),
            None => SimRng::from_entropy(),
        };
        let universe = BlockUniverse::new(config.project_id.clone(), config.vault_id.clone());
        let profile = SeedProfile::from_config(&config);

        debug!(
            vault = config.vault_id.as_str(),
            seed = rng.seed(),
            divisor = fraction.get(),
            "Simulator created"
        );

        Ok(Self {
            config,
            fraction,
            profile,
            universe: RwLock::new(universe),
            rng: Mutex::new(rng),
        })
    }

    /// Pin the base time used to backdate `ref_modified`
    pub fn with_base_time(mut self, base_time: i64) -> Self {
        self.profile = self.profile.with_base_time(base_time);
        self
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Generate `count` logical blocks, each with a storage block
    pub fn generate_blocks(&self, count: usize) -> Result<usize> {
        let mut universe = self.universe.write();
        let mut rng = self.rng.lock();
        seed::generate_blocks(&mut universe, count, &mut rng, &self.profile)
    }

    /// Insert caller-supplied logical blocks, each with a storage block
    pub fn seed_blocks<I>(&self, blocks: I) -> Result<usize>
    where
        I: IntoIterator<Item = SeedBlock>,
    {
        let mut universe = self.universe.write();
        let mut rng = self.rng.lock();
        seed::seed_blocks(&mut universe, blocks, &mut rng, &self.profile)
    }

    /// Add exactly `count` orphaned storage blocks
    pub fn generate_orphaned_blocks(&self, count: usize) -> Result<OrphanReport> {
        let mut universe = self.universe.write();
        let mut rng = self.rng.lock();
        seed::distribute_orphans(&mut universe, count, &mut rng, &self.profile)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// One page of a namespace listing
    pub fn list(&self, namespace: Namespace, marker: Option<&str>) -> Listing {
        let universe = self.universe.read();
        let ids = universe.sorted_ids(namespace);
        let page = list_page(&ids, marker, self.fraction);

        debug!(
            %namespace,
            start = page.start,
            items = page.items.len(),
            next = ?page.next_marker,
            "Served listing page"
        );

        page.to_listing()
    }

    /// Point lookup scoped to `vault_id`
    pub fn lookup(&self, namespace: Namespace, vault_id: &str, id: &str) -> LookupOutcome {
        lookup(&self.universe.read(), namespace, vault_id, id)
    }

    /// Answer a simulated HTTP request
    ///
    /// Unroutable requests get a 400, wrong methods a 405; nothing here
    /// returns an error to the caller.
    pub fn execute(&self, request: &Request) -> Response {
        trace!(method = ?request.method, url = %request.url, "Received request");

        let route = match protocol::parse_route(&request.url) {
            Ok(route) => route,
            Err(e) => {
                warn!("Rejected request {}: {}", request.url, e);
                return Response::bad_request(&e.to_string());
            }
        };

        match (request.method, route) {
            (Method::Get, Route::List { namespace, .. }) => {
                let marker = protocol::marker_from_url(&request.url);
                self.listing_response(namespace, marker.as_deref())
            }
            (Method::Head, Route::Block { namespace, vault_id, id }) => {
                protocol::encode_lookup(&self.lookup(namespace, &vault_id, &id))
            }
            (method, route) => {
                warn!("Method {:?} not allowed on {:?}", method, route);
                Response::method_not_allowed(&format!("{:?} not allowed", method))
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Read access to the universe (holds the read lock)
    pub fn universe(&self) -> RwLockReadGuard<'_, BlockUniverse> {
        self.universe.read()
    }

    /// Listing URL of a namespace in this vault
    pub fn listing_url(&self, namespace: Namespace) -> String {
        protocol::blocks_url(&self.config.api_host, &self.config.vault_id, namespace)
    }

    /// URL of a single block in this vault
    pub fn block_url(&self, namespace: Namespace, id: &str) -> Result<String> {
        protocol::block_url(&self.config.api_host, &self.config.vault_id, namespace, id)
    }

    /// Seed of the RNG (for reproducing a run)
    pub fn seed(&self) -> u64 {
        self.rng.lock().seed()
    }

    pub fn page_fraction(&self) -> PageFraction {
        self.fraction
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn listing_response(&self, namespace: Namespace, marker: Option<&str>) -> Response {
        let listing = self.list(namespace, marker);

        let next_batch = match listing.next_marker.as_deref() {
            Some(next) => match protocol::next_batch_url(
                &self.config.api_host,
                &self.config.vault_id,
                namespace,
                next,
            ) {
                Ok(url) => Some(url),
                Err(e) => return Response::bad_request(&e.to_string()),
            },
            None => None,
        };

        match protocol::encode_listing(&listing, next_batch.as_deref()) {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to encode listing: {}", e);
                Response::bad_request(&e.to_string())
            }
        }
    }
}
