//! Networking: REST calls, wire types, and the sync service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps each endpoint, `sync` layers retries, debouncing, and the
//! localStorage fallback on top, and `types` defines the shared wire schema.

pub mod api;
pub mod sync;
pub mod types;
