//! Ballpit - circular rigid bodies bouncing around a rectangular arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, boundary and pair collisions)
//! - `config`: Scenario loading and validation
//! - `error`: Error types shared by config loading and collision resolution
//! - `renderer`: GPU-ready instance data and cosmetic state fed by sim events

pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{BodyConfig, SimConfig};
pub use error::{CollisionError, ConfigError};
pub use sim::Simulation;

/// Simulation configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Body defaults
    pub const BODY_RADIUS: f64 = 50.0;
    pub const BODY_VELOCITY: (f64, f64) = (7.0, 4.0);

    /// Ticks per second the host loop is expected to run at (pacing is the host's job)
    pub const TICK_RATE: u32 = 60;

    /// Tolerance used when comparing conserved quantities
    pub const EPSILON: f64 = 1e-9;
}
