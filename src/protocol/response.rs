//! Response definitions
//!
//! Represents responses to clients.

use bytes::Bytes;

/// Header names used on the wire
pub mod headers {
    pub const NEXT_BATCH: &str = "x-next-batch";
    pub const REFERENCE_COUNT: &str = "X-Block-Reference-Count";
    pub const REF_MODIFIED: &str = "X-Ref-Modified";
    pub const STORAGE_ID: &str = "X-Storage-ID";
    pub const BLOCK_ID: &str = "X-Block-ID";
    pub const BLOCK_SIZE: &str = "X-Block-Size";
    pub const BLOCK_ORPHANED: &str = "X-Block-Orphaned";
    pub const CONTENT_TYPE: &str = "Content-Type";
}

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    Ok = 200,
    NoContent = 204,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
}

impl Status {
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

/// A response to send to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Headers in insertion order
    pub headers: Vec<(String, String)>,

    /// Body (empty for 204)
    pub body: Bytes,
}

impl Response {
    /// Create a 200 response with a body
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: Status::Ok,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Create a 204 response
    pub fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Create a 404 response carrying a reason string
    pub fn not_found(reason: &str) -> Self {
        Self::with_text(Status::NotFound, reason)
    }

    /// Create a 400 response
    pub fn bad_request(message: &str) -> Self {
        Self::with_text(Status::BadRequest, message)
    }

    /// Create a 405 response
    pub fn method_not_allowed(message: &str) -> Self {
        Self::with_text(Status::MethodNotAllowed, message)
    }

    pub fn with_header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// First header value named `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as UTF-8, if it is
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    fn with_text(status: Status, text: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::copy_from_slice(text.as_bytes()),
        }
    }
}
