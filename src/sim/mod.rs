//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one unit of time)
//! - Stable iteration order (by body index)
//! - No rendering, timing or platform dependencies

pub mod boundary;
pub mod collision;
pub mod state;
pub mod tick;

pub use boundary::{BoundaryHit, check_and_resolve};
pub use collision::{
    CollisionPair, PairOutcome, find_colliding_pair, find_colliding_pair_where, overlaps, resolve,
};
pub use state::{Aabb, Body, BodySnapshot, Bounds, CollisionKind, Edge, SimEvent, Simulation};
pub use tick::{BodyPhase, tick};
