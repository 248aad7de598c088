//! Protocol codec
//!
//! Encoding and decoding between listing/lookup values and simulated HTTP
//! requests and responses.
//!
//! ## Path Layout
//! ```text
//! /{version}/vaults/{vault_id}/blocks[/{block_id}]
//! /{version}/vaults/{vault_id}/storage/blocks[/{storage_id}]
//!  seg[0]    seg[1] seg[2]    seg[3..]
//! ```
//!
//! The vault id is always taken from `seg[2]`. Vault and block ids are
//! percent-encoded in paths and decoded again when routing.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::error::{Result, SimError};
use crate::listing::Listing;
use crate::lookup::{BlockAttributes, LookupOutcome, NotFoundReason};
use crate::universe::Namespace;

use super::response::headers;
use super::{Response, Route, Status};

/// API version segment used when building URLs
pub const API_VERSION: &str = "v1.0";

/// Rendering of an absent id in headers
const ABSENT_ID: &str = "None";

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// =============================================================================
// URL Building
// =============================================================================

/// Listing URL of a namespace
pub fn blocks_url(api_host: &str, vault_id: &str, namespace: Namespace) -> String {
    let vault_id = utf8_percent_encode(vault_id, PATH_SEGMENT);
    match namespace {
        Namespace::Metadata => format!("https://{}/{}/vaults/{}/blocks", api_host, API_VERSION, vault_id),
        Namespace::Storage => format!(
            "https://{}/{}/vaults/{}/storage/blocks",
            api_host, API_VERSION, vault_id
        ),
    }
}

/// URL of a single block in a namespace
pub fn block_url(api_host: &str, vault_id: &str, namespace: Namespace, id: &str) -> Result<String> {
    let mut url = Url::parse(&blocks_url(api_host, vault_id, namespace))?;
    url.path_segments_mut()
        .map_err(|_| SimError::Protocol("listing url cannot be a base".to_string()))?
        .push(id);
    Ok(url.into())
}

/// Value of the `x-next-batch` header for a page ending before `marker`
pub fn next_batch_url(api_host: &str, vault_id: &str, namespace: Namespace, marker: &str) -> Result<String> {
    let mut url = Url::parse(&blocks_url(api_host, vault_id, namespace))?;
    url.query_pairs_mut().append_pair("marker", marker);
    Ok(url.into())
}

/// The `marker` query parameter, if present
pub fn marker_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "marker")
        .map(|(_, value)| value.into_owned())
}

// =============================================================================
// Routing
// =============================================================================

/// Work out which namespace and block a URL addresses
pub fn parse_route(url: &Url) -> Result<Route> {
    let decoded = url
        .path_segments()
        .map(|s| {
            s.filter(|seg| !seg.is_empty())
                .map(decode_segment)
                .collect::<Result<Vec<String>>>()
        })
        .transpose()?
        .unwrap_or_default();
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

    if segments.len() < 4 || segments[1] != "vaults" {
        return Err(SimError::Protocol(format!("unrecognized path: {}", url.path())));
    }

    let vault_id = segments[2].to_string();

    match &segments[3..] {
        ["blocks"] => Ok(Route::List {
            namespace: Namespace::Metadata,
            vault_id,
        }),
        ["blocks", id] => Ok(Route::Block {
            namespace: Namespace::Metadata,
            vault_id,
            id: id.to_string(),
        }),
        ["storage", "blocks"] => Ok(Route::List {
            namespace: Namespace::Storage,
            vault_id,
        }),
        ["storage", "blocks", id] => Ok(Route::Block {
            namespace: Namespace::Storage,
            vault_id,
            id: id.to_string(),
        }),
        _ => Err(SimError::Protocol(format!("unrecognized path: {}", url.path()))),
    }
}

fn decode_segment(segment: &str) -> Result<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| SimError::Protocol(format!("path segment {} is not utf-8: {}", segment, e)))
}

// =============================================================================
// Listing Encoding/Decoding
// =============================================================================

/// Encode a page as a 200 response
///
/// `next_batch` becomes the `x-next-batch` header when present.
pub fn encode_listing(listing: &Listing, next_batch: Option<&str>) -> Result<Response> {
    let body = serde_json::to_vec(&listing.items)?;
    let mut response = Response::ok(body).with_header(headers::CONTENT_TYPE, "application/json");
    if let Some(url) = next_batch {
        response = response.with_header(headers::NEXT_BATCH, url);
    }
    Ok(response)
}

/// Decode a listing response into its ids and the next page URL
pub fn decode_listing(response: &Response) -> Result<(Vec<String>, Option<String>)> {
    if response.status != Status::Ok {
        return Err(SimError::Protocol(format!(
            "listing failed with status {}: {}",
            response.status.code(),
            response.body_text().unwrap_or_default()
        )));
    }

    let ids: Vec<String> = serde_json::from_slice(&response.body)?;
    let next_batch = response.header(headers::NEXT_BATCH).map(str::to_string);
    Ok((ids, next_batch))
}

// =============================================================================
// Lookup Encoding/Decoding
// =============================================================================

/// Encode a lookup outcome as a 204 or 404 response
pub fn encode_lookup(outcome: &LookupOutcome) -> Response {
    let attrs = match outcome {
        LookupOutcome::Found(attrs) => attrs,
        LookupOutcome::NotFound(reason) => return Response::not_found(reason.as_str()),
    };

    let mut response = Response::no_content()
        .with_header(headers::REFERENCE_COUNT, attrs.ref_count)
        .with_header(headers::REF_MODIFIED, attrs.ref_modified)
        .with_header(headers::STORAGE_ID, attrs.storage_id.as_deref().unwrap_or(ABSENT_ID))
        .with_header(headers::BLOCK_ID, attrs.block_id.as_deref().unwrap_or(ABSENT_ID))
        .with_header(headers::BLOCK_SIZE, attrs.block_size);

    if let Some(orphaned) = attrs.block_orphaned {
        response = response.with_header(headers::BLOCK_ORPHANED, if orphaned { "True" } else { "False" });
    }

    response
}

/// Decode a lookup response back into an outcome
pub fn decode_lookup(response: &Response) -> Result<LookupOutcome> {
    match response.status {
        Status::NoContent => {}
        Status::NotFound => {
            let reason = match response.body_text() {
                Some(text) if text == NotFoundReason::InvalidVaultId.as_str() => NotFoundReason::InvalidVaultId,
                Some(text) if text == NotFoundReason::InvalidBlockId.as_str() => NotFoundReason::InvalidBlockId,
                other => {
                    return Err(SimError::Protocol(format!(
                        "unexpected 404 reason: {:?}",
                        other
                    )))
                }
            };
            return Ok(LookupOutcome::NotFound(reason));
        }
        status => {
            return Err(SimError::Protocol(format!(
                "unexpected lookup status: {}",
                status.code()
            )))
        }
    }

    let block_orphaned = match response.header(headers::BLOCK_ORPHANED) {
        None => None,
        Some(value) => Some(parse_bool(value)?),
    };

    Ok(LookupOutcome::Found(BlockAttributes {
        ref_count: parse_header(response, headers::REFERENCE_COUNT)?,
        ref_modified: parse_header(response, headers::REF_MODIFIED)?,
        storage_id: optional_id(required_header(response, headers::STORAGE_ID)?),
        block_id: optional_id(required_header(response, headers::BLOCK_ID)?),
        block_size: parse_header(response, headers::BLOCK_SIZE)?,
        block_orphaned,
    }))
}

// =============================================================================
// Private Helpers
// =============================================================================

fn required_header<'a>(response: &'a Response, name: &str) -> Result<&'a str> {
    response
        .header(name)
        .ok_or_else(|| SimError::Protocol(format!("missing header {}", name)))
}

fn parse_header<T: std::str::FromStr>(response: &Response, name: &str) -> Result<T> {
    let value = required_header(response, name)?;
    value
        .parse()
        .map_err(|_| SimError::Protocol(format!("invalid {} header: {}", name, value)))
}

fn parse_bool(value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SimError::Protocol(format!("invalid boolean header: {}", value)))
    }
}

fn optional_id(value: &str) -> Option<String> {
    (value != ABSENT_ID).then(|| value.to_string())
}
