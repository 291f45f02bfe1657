//! API middleware stack.
//!
//! 1. Access log: one `tracing` event per request with method, path,
//!    status and latency.

pub mod audit;
