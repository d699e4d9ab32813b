//! Fixed timestep simulation tick
//!
//! One tick is one synchronous pass over every body, in index order:
//! 1. Boundary reflection (takes precedence, finalizes the body for the tick)
//! 2. Pair detection and resolution among the bodies still free
//! 3. Free motion for everything not finalized in step 1

use std::collections::HashSet;

use super::boundary::check_and_resolve;
use super::collision::{PairOutcome, find_colliding_pair_where, pair_mut, resolve};
use super::state::{CollisionKind, SimEvent, Simulation};
use crate::error::CollisionError;

/// Where a body ended up within the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPhase {
    /// No collision handled yet
    Free,
    /// Reflected off an edge; position and velocity are final
    BoundaryResolved,
    /// Exchanged velocity with another body
    PairResolved,
}

/// Advance the simulation by one fixed timestep
pub fn tick(sim: &mut Simulation) {
    sim.time_ticks += 1;
    sim.events.clear();

    let bounds = sim.bounds;
    let mut phases = vec![BodyPhase::Free; sim.bodies.len()];

    // --- BOUNDARY ---
    for (body, phase) in sim.bodies.iter_mut().zip(phases.iter_mut()) {
        let Some(hit) = check_and_resolve(body, &bounds) else {
            continue;
        };
        *phase = BodyPhase::BoundaryResolved;

        if hit.overrun {
            log::warn!(
                "Body {} overran the {:?} edge by {:.2} (radius {}); clamped",
                body.id,
                hit.edge,
                hit.penetration,
                body.radius
            );
            sim.events.push(SimEvent {
                body: body.id,
                kind: CollisionKind::Overrun { edge: hit.edge },
            });
        }
        sim.events.push(SimEvent {
            body: body.id,
            kind: CollisionKind::Boundary { edge: hit.edge },
        });
    }

    // --- PAIRS ---
    // Re-scan among free bodies until nothing collides; each body is resolved
    // at most once per tick, always by the first pair in scan order. Pairs that
    // needed no response (separating or degenerate) only retire themselves.
    let mut skipped: HashSet<(usize, usize)> = HashSet::new();
    while let Some(pair) = find_colliding_pair_where(&sim.bodies, |i, j| {
        phases[i] == BodyPhase::Free
            && phases[j] == BodyPhase::Free
            && !skipped.contains(&(i, j))
    }) {
        let (a, b) = pair_mut(&mut sim.bodies, pair.a, pair.b);
        let (a_id, b_id) = (a.id, b.id);

        match resolve(a, b) {
            Ok(PairOutcome::Resolved { corrected }) => {
                phases[pair.a] = BodyPhase::PairResolved;
                phases[pair.b] = BodyPhase::PairResolved;
                log::debug!(
                    "Resolved bodies {} and {} (corrected: {})",
                    a_id,
                    b_id,
                    corrected
                );
                sim.events.push(SimEvent {
                    body: a_id,
                    kind: CollisionKind::Pair { other: b_id },
                });
                sim.events.push(SimEvent {
                    body: b_id,
                    kind: CollisionKind::Pair { other: a_id },
                });
            }
            Ok(PairOutcome::Separating) => {
                log::trace!("Bodies {} and {} already separating", a_id, b_id);
                skipped.insert((pair.a, pair.b));
            }
            Err(CollisionError::Degenerate { a, b }) => {
                skipped.insert((pair.a, pair.b));
                log::debug!("Skipping degenerate pair {} / {} this tick", a, b);
                sim.events.push(SimEvent {
                    body: a,
                    kind: CollisionKind::Degenerate { other: b },
                });
                sim.events.push(SimEvent {
                    body: b,
                    kind: CollisionKind::Degenerate { other: a },
                });
            }
        }
    }

    // --- MOTION ---
    for (body, phase) in sim.bodies.iter_mut().zip(phases.iter()) {
        if *phase != BodyPhase::BoundaryResolved {
            body.step();
        }
    }
}

impl Simulation {
    /// Advance every body by one tick
    pub fn update(&mut self) {
        tick(self);
    }

    /// Advance `ticks` ticks, returning the number of collision events seen
    pub fn run(&mut self, ticks: u64) -> usize {
        let mut events = 0;
        for _ in 0..ticks {
            self.update();
            events += self.events.len();
        }
        events
    }
}
