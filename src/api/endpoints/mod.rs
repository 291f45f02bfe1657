//! API endpoint handlers.
//!
//! Each module corresponds to a portal tab or feature. Handlers are thin:
//! they validate input at the boundary and call into `CoreState`.

pub mod health;
pub mod journal;
pub mod portal;
pub mod resources;
pub mod session;
