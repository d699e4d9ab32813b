//! Error types
//!
//! Configuration errors are fatal to starting a run. Collision errors never
//! leave the tick that produced them.

use thiserror::Error;

/// A scenario that cannot be simulated
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("body {index} has invalid radius {radius} (must be positive and finite)")]
    InvalidRadius { index: usize, radius: f64 },
    #[error("scatter radius {radius} and speed {max_speed} must be finite, radius positive")]
    InvalidScatter { radius: f64, max_speed: f64 },
    #[error("body {index} has a non-finite position or velocity")]
    NonFinite { index: usize },
    #[error("body {index} at ({x}, {y}) lies entirely outside the arena")]
    OutsideBounds { index: usize, x: f64, y: f64 },
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A pair collision that could not be resolved this tick
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CollisionError {
    /// Both centers coincide, so there is no collision normal
    #[error("bodies {a} and {b} share a center; no collision normal")]
    Degenerate { a: u32, b: u32 },
}
