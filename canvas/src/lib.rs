//! Canvas rendering and input engine for the whiteboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the board canvas: translating raw DOM input events into
//! document mutations, maintaining camera state for pan/zoom, hit-testing
//! folders, headers, and drawn paths, and rendering the scene. The host layer
//! is responsible only for wiring DOM events to the engine and persisting the
//! resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | In-memory board document and entity types |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against board entities |
//! | [`render`] | Scene rendering |
//! | [`consts`] | Shared numeric constants (zoom limits, drag thresholds, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
