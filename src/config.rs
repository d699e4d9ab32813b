//! Scenario configuration
//!
//! A scenario is the arena size plus an ordered list of bodies. It is read
//! from JSON; unknown fields (colors, debug draw flags) are ignored since
//! they are not part of the physics.
//!
//! ```json
//! {
//!   "width": 800,
//!   "height": 600,
//!   "bodies": [
//!     { "position": [400, 300], "radius": 50, "velocity": [7, 4] }
//!   ]
//! }
//! ```

use std::path::Path;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Aabb, Bounds};

/// Initial state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Center `[x, y]`
    pub position: [f64; 2],
    pub radius: f64,
    /// Units per tick `[x, y]`
    #[serde(default)]
    pub velocity: [f64; 2],
}

impl BodyConfig {
    pub fn new(position: [f64; 2], radius: f64, velocity: [f64; 2]) -> Self {
        Self {
            position,
            radius,
            velocity,
        }
    }
}

fn default_width() -> f64 {
    ARENA_WIDTH
}

fn default_height() -> f64 {
    ARENA_HEIGHT
}

/// A complete scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Bodies in processing order
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimConfig {
    /// A single ball launched from the middle of the default arena
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            bodies: vec![BodyConfig::new(
                [ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0],
                BODY_RADIUS,
                [BODY_VELOCITY.0, BODY_VELOCITY.1],
            )],
        }
    }
}

impl SimConfig {
    /// Check everything a run depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }

        let bounds = Bounds::new(self.width, self.height);
        for (index, body) in self.bodies.iter().enumerate() {
            if !body.radius.is_finite() || body.radius <= 0.0 {
                return Err(ConfigError::InvalidRadius {
                    index,
                    radius: body.radius,
                });
            }

            let pos = DVec2::from_array(body.position);
            if !pos.is_finite() || !DVec2::from_array(body.velocity).is_finite() {
                return Err(ConfigError::NonFinite { index });
            }

            if bounds.excludes(&Aabb::around(pos, body.radius)) {
                return Err(ConfigError::OutsideBounds {
                    index,
                    x: pos.x,
                    y: pos.y,
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON scenario
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded scenario {} ({} bodies)",
            path.display(),
            config.bodies.len()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deterministic random scenario: `count` equal bodies on a jittered grid
    /// (never overlapping, never outside the arena), each heading in a random
    /// direction at between half and all of `max_speed`.
    ///
    /// Fewer bodies are placed if the grid runs out of cells.
    pub fn scatter(
        seed: u64,
        count: usize,
        radius: f64,
        max_speed: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidBounds { width, height });
        }
        if !(radius.is_finite() && max_speed.is_finite()) || radius <= 0.0 {
            return Err(ConfigError::InvalidScatter { radius, max_speed });
        }

        let mut rng = Pcg32::seed_from_u64(seed);

        let cell = radius * 2.5;
        let jitter = radius * 0.2;
        // Saturating casts: a tiny radius in a big arena just means "plenty of room"
        let cols = (width / cell).floor() as usize;
        let rows = (height / cell).floor() as usize;
        let capacity = cols.checked_mul(rows).unwrap_or(usize::MAX);

        if count > capacity {
            log::warn!(
                "Only {} of {} bodies fit a {}x{} arena at radius {}",
                capacity,
                count,
                width,
                height,
                radius
            );
        }

        let bodies = (0..count.min(capacity))
            .map(|i| {
                let (col, row) = (i % cols, i / cols);
                let x = cell * (col as f64 + 0.5) + rng.random_range(-jitter..=jitter);
                let y = cell * (row as f64 + 0.5) + rng.random_range(-jitter..=jitter);

                let angle = rng.random_range(0.0..std::f64::consts::TAU);
                let speed = max_speed * rng.random_range(0.5..=1.0);
                let vel = DVec2::from_angle(angle) * speed;

                BodyConfig::new([x, y], radius, vel.to_array())
            })
            .collect();

        let config = Self {
            width,
            height,
            bodies,
        };
        config.validate()?;
        Ok(config)
    }
}
