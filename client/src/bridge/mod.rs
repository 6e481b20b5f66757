//! Browser-extension integration.
//!
//! SYSTEM CONTEXT
//! ==============
//! `extension` receives bookmark captures over `postMessage` and `storage`
//! events; `image` keeps their screenshots inside the persistence budget.

pub mod extension;
pub mod image;
