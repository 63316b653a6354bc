/// Rewrites content-addressed locators into fetchable gateway URLs
use crate::config::DEFAULT_GATEWAY;

const IPFS_SCHEME: &str = "ipfs://";

/// An HTTP(S) gateway that serves IPFS content under `<base><hash>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    base: String,
}

impl Gateway {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Gateway URL for `uri`, or `None` when there is nothing to resolve.
    ///
    /// The scheme marker is stripped and the rest appended to the base
    /// as-is. Reachability is left to whoever loads the URL.
    pub fn resolve(&self, uri: Option<&str>) -> Option<String> {
        let uri = uri.filter(|u| !u.is_empty())?;
        Some(format!("{}{}", self.base, uri.replacen(IPFS_SCHEME, "", 1)))
    }

    /// First locator in `candidates` that resolves
    pub fn resolve_first<'a>(&self, candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
        candidates.into_iter().find_map(|uri| self.resolve(uri))
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY)
    }
}
