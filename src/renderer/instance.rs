//! Per-circle instance data for GPU upload

use bytemuck::{Pod, Zeroable};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{BodySnapshot, SimEvent};

/// One circle, laid out for an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    /// 1.0 on the tick a body collided, fading to 0.0
    pub flash: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    pub fn new(snapshot: &BodySnapshot, color: [f32; 4], flash: f32) -> Self {
        Self {
            center: [snapshot.pos.x as f32, snapshot.pos.y as f32],
            radius: snapshot.radius as f32,
            flash,
            color,
        }
    }
}

/// Colors for bodies
pub mod colors {
    pub const BODY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}

/// Flash decay per tick
const FLASH_DECAY: f32 = 0.85;

/// Cosmetic per-body state driven by collision events.
///
/// Every body that collides (edge or other body) gets a fresh random color
/// and a flash. The physics never sees any of this.
#[derive(Debug, Clone)]
pub struct Highlights {
    rng: Pcg32,
    colors: Vec<[f32; 4]>,
    flash: Vec<f32>,
}

impl Highlights {
    pub fn new(seed: u64, body_count: usize) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            colors: vec![colors::BODY; body_count],
            flash: vec![0.0; body_count],
        }
    }

    /// Decay old flashes, then apply this tick's events
    pub fn apply(&mut self, events: &[SimEvent]) {
        for f in &mut self.flash {
            *f *= FLASH_DECAY;
            if *f < 0.01 {
                *f = 0.0;
            }
        }

        for event in events {
            let i = event.body as usize;
            if i >= self.colors.len() {
                continue;
            }
            self.colors[i] = [
                self.rng.random::<f32>(),
                self.rng.random::<f32>(),
                self.rng.random::<f32>(),
                1.0,
            ];
            self.flash[i] = 1.0;
        }
    }

    pub fn color(&self, body: u32) -> [f32; 4] {
        self.colors
            .get(body as usize)
            .copied()
            .unwrap_or(colors::BODY)
    }

    /// Build the instance buffer contents for a snapshot
    pub fn instances(&self, snapshot: &[BodySnapshot]) -> Vec<CircleInstance> {
        snapshot
            .iter()
            .map(|s| {
                let flash = self.flash.get(s.id as usize).copied().unwrap_or(0.0);
                CircleInstance::new(s, self.color(s.id), flash)
            })
            .collect()
    }
}
