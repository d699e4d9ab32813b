//! Body-vs-arena collision detection and response
//!
//! Exact circle-vs-edge tests against the body's predicted bounding square.
//! Edges are checked top, bottom, left, right and the first crossing wins, so
//! a body heading into a corner reflects on one axis per tick.

use super::state::{Body, Bounds, Edge};

/// Result of a boundary reflection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHit {
    /// Edge the body was reflected off
    pub edge: Edge,
    /// How far the predicted square crossed the edge
    pub penetration: f64,
    /// Crossing exceeded one body diameter (velocity is too large for the body)
    pub overrun: bool,
}

/// Check the body's next position against the arena and reflect it if it
/// would cross an edge.
///
/// On a hit the body is clamped tangent to the edge and the velocity
/// component perpendicular to it is negated. Position and velocity are final
/// for this tick: the caller must skip pair resolution and free motion.
pub fn check_and_resolve(body: &mut Body, bounds: &Bounds) -> Option<BoundaryHit> {
    let next = body.next_bounds();

    let (edge, penetration) = if next.min.y < 0.0 {
        (Edge::Top, -next.min.y)
    } else if next.max.y > bounds.height {
        (Edge::Bottom, next.max.y - bounds.height)
    } else if next.min.x < 0.0 {
        (Edge::Left, -next.min.x)
    } else if next.max.x > bounds.width {
        (Edge::Right, next.max.x - bounds.width)
    } else {
        return None;
    };

    match edge {
        Edge::Top => {
            body.pos.y = body.radius;
            body.vel.y = -body.vel.y;
        }
        Edge::Bottom => {
            body.pos.y = bounds.height - body.radius;
            body.vel.y = -body.vel.y;
        }
        Edge::Left => {
            body.pos.x = body.radius;
            body.vel.x = -body.vel.x;
        }
        Edge::Right => {
            body.pos.x = bounds.width - body.radius;
            body.vel.x = -body.vel.x;
        }
    }

    Some(BoundaryHit {
        edge,
        penetration,
        overrun: penetration > 2.0 * body.radius,
    })
}
