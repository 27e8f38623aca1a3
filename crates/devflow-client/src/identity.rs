//! Request identity seam
//!
//! Every API call carries the caller's decentralized identifier, an opaque
//! value held in persistent client storage.

/// Request-identity header attached to every call
pub const DID_HEADER: &str = "x-request-user-did";

/// Source of the persisted identity consulted by the header builder
///
/// Implementations read the backing store on every call rather than caching,
/// so an identity change lands on the very next request.
pub trait DidStore: Send + Sync {
    fn current_did(&self) -> Option<String>;
}

/// Fixed identity, for tests and one-shot tools
#[derive(Debug, Clone)]
pub struct StaticDid(String);

impl StaticDid {
    pub fn new(did: impl Into<String>) -> Self {
        Self(did.into())
    }
}

impl DidStore for StaticDid {
    fn current_did(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// No persisted identity; the header is omitted
#[derive(Debug, Clone, Default)]
pub struct AnonymousDid;

impl DidStore for AnonymousDid {
    fn current_did(&self) -> Option<String> {
        None
    }
}
