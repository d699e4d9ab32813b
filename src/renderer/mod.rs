//! Rendering support
//!
//! Drawing itself belongs to the host. This module turns simulation
//! snapshots into GPU-ready instance data and keeps the cosmetic state
//! (colors, hit flashes) that collision events drive.

pub mod instance;

pub use instance::{CircleInstance, Highlights, colors};
