//! Simulation state and core body types
//!
//! Everything the tick mutates lives here. Cosmetic state does not: renderers
//! react to [`SimEvent`]s instead.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::ConfigError;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// Square of half-size `radius` around `center`
    #[inline]
    pub fn around(center: DVec2, radius: f64) -> Self {
        let half = DVec2::splat(radius);
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// One edge of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// The enclosing arena: origin at (0, 0), y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if the box lies within the arena (touching allowed)
    pub fn contains(&self, aabb: &Aabb) -> bool {
        aabb.min.x >= 0.0
            && aabb.min.y >= 0.0
            && aabb.max.x <= self.width
            && aabb.max.y <= self.height
    }

    /// True if the box shares no area with the arena
    pub fn excludes(&self, aabb: &Aabb) -> bool {
        aabb.max.x <= 0.0
            || aabb.max.y <= 0.0
            || aabb.min.x >= self.width
            || aabb.min.y >= self.height
    }
}

/// A circular rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Index in the simulation's body sequence
    pub id: u32,
    /// Center
    pub pos: DVec2,
    /// Units per tick
    pub vel: DVec2,
    /// Fixed for the body's lifetime
    pub radius: f64,
}

impl Body {
    pub fn new(id: u32, pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
        }
    }

    /// Free motion: advance the center by one tick of velocity
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn translate(&mut self, delta: DVec2) {
        self.pos += delta;
    }

    /// Current bounding square
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }

    /// Bounding square after one more tick of free motion
    #[inline]
    pub fn next_bounds(&self) -> Aabb {
        Aabb::around(self.pos + self.vel, self.radius)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Linear momentum (all bodies have unit mass)
    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.vel
    }

    /// Kinetic energy (unit mass)
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.vel.length_squared()
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            pos: self.pos,
            radius: self.radius,
        }
    }
}

/// What a body collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Reflected off an arena edge
    Boundary { edge: Edge },
    /// Resolved against another body
    Pair { other: u32 },
    /// Shared a center with another body; resolution skipped this tick
    Degenerate { other: u32 },
    /// Would have crossed an edge by more than one diameter; clamped
    Overrun { edge: Edge },
}

/// Collision event emitted during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEvent {
    pub body: u32,
    pub kind: CollisionKind,
}

/// Per-body state for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: u32,
    pub pos: DVec2,
    pub radius: f64,
}

/// The complete simulation (deterministic).
///
/// Serializes for inspection and logging only. A run is always rebuilt from a
/// [`SimConfig`] through [`Simulation::new`], which validates it:
///
/// ```compile_fail
/// let sim: ballpit::Simulation = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    /// Bodies in stable processing order (index == id)
    pub(crate) bodies: Vec<Body>,
    /// Arena, immutable for the run
    pub(crate) bounds: Bounds,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub(crate) events: Vec<SimEvent>,
}

impl Simulation {
    /// Build a simulation from a validated scenario
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let bodies = config
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Body::new(
                    i as u32,
                    DVec2::from_array(b.position),
                    DVec2::from_array(b.velocity),
                    b.radius,
                )
            })
            .collect::<Vec<_>>();

        log::info!(
            "Simulation created: {} bodies in {}x{} arena",
            bodies.len(),
            config.width,
            config.height
        );

        Ok(Self {
            bodies,
            bounds: Bounds::new(config.width, config.height),
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Collision events from the most recent tick
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Read-only view of every body, in processing order
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
