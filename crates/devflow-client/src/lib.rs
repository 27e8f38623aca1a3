//! DevFlow API Client
//!
//! Typed wrapper over the DevFlow backend REST API: one strongly-typed
//! method per endpoint, a tagged error taxonomy replacing the original
//! thrown-exception interceptor, and an explicit session context threaded
//! through the auth calls instead of ambient shared state.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use devflow::Session;
//! use devflow_client::{DevFlowClient, StaticDid};
//!
//! let client = DevFlowClient::new("http://localhost:8080/api", Arc::new(StaticDid::new("did-1")))?;
//! let mut session = Session::new();
//! ```

pub mod ai;
pub mod auth;
pub mod client;
pub mod error;
pub mod identity;
pub mod projects;
pub mod prompt_templates;
pub mod user_stories;
pub mod users;

// Re-export the entry points
pub use client::{DetailResponse, DevFlowClient, ListResponse, MessageResponse};
pub use error::{ApiError, ApiResult};
pub use identity::{AnonymousDid, DidStore, StaticDid, DID_HEADER};
