//! Request definitions
//!
//! Represents requests from a crawling client.

use url::Url;

use crate::error::Result;
use crate::universe::Namespace;

/// Supported request methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Listing
    Get,

    /// Point lookup
    Head,
}

/// A simulated HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url)?,
        })
    }

    pub fn get(url: &str) -> Result<Self> {
        Self::new(Method::Get, url)
    }

    pub fn head(url: &str) -> Result<Self> {
        Self::new(Method::Head, url)
    }
}

/// Where a request path points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A namespace listing
    List { namespace: Namespace, vault_id: String },

    /// A single block in a namespace
    Block {
        namespace: Namespace,
        vault_id: String,
        id: String,
    },
}

impl Route {
    pub fn namespace(&self) -> Namespace {
        match self {
            Route::List { namespace, .. } | Route::Block { namespace, .. } => *namespace,
        }
    }

    pub fn vault_id(&self) -> &str {
        match self {
            Route::List { vault_id, .. } | Route::Block { vault_id, .. } => vault_id,
        }
    }
}
