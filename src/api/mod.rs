//! HTTP API over the journal.
//!
//! JSON routes are nested under `/api/`; the HTML portal shell is served
//! from `/`. Every response passes through the access log and gets
//! `Cache-Control: no-store`.
//!
//! The router is composable: `api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{ApiServer, ApiServerInfo};
pub use types::ApiContext;
