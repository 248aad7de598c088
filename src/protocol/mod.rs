//! Protocol Module
//!
//! The simulated HTTP surface a crawling client talks to. Nothing here
//! touches a socket: requests and responses are plain values.
//!
//! ## Routes
//! ```text
//! GET  https://{host}/v1.0/vaults/{vault}/blocks[?marker=..]           metadata listing
//! HEAD https://{host}/v1.0/vaults/{vault}/blocks/{block_id}            metadata lookup
//! GET  https://{host}/v1.0/vaults/{vault}/storage/blocks[?marker=..]   storage listing
//! HEAD https://{host}/v1.0/vaults/{vault}/storage/blocks/{storage_id}  storage lookup
//! ```
//!
//! ### Listing Response
//! - 200, body: JSON array of ids
//! - `x-next-batch`: URL of the next page (only when one exists)
//!
//! ### Lookup Response
//! - 204, attributes in `X-Block-*` / `X-Ref-Modified` / `X-Storage-ID` headers
//! - 404, body: `invalid vault id` or `invalid block id`

mod codec;
mod request;
mod response;

pub use codec::{
    block_url, blocks_url, decode_listing, decode_lookup, encode_listing, encode_lookup,
    marker_from_url, next_batch_url, parse_route, API_VERSION,
};
pub use request::{Method, Request, Route};
pub use response::{headers, Response, Status};
