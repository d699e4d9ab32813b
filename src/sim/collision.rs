//! Body-vs-body collision detection and response
//!
//! Detection is an exact narrow-phase circle test over every unordered pair,
//! O(n²) per scan. A broad phase (uniform grid or sweep-and-prune) would slot
//! in ahead of `find_colliding_pair_where` for large body counts; resolution
//! must stay serialized either way.

use glam::DVec2;

use super::state::Body;
use crate::error::CollisionError;

/// Two distinct bodies that overlap at the time of the scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionPair {
    /// Index of the first body (always less than `b`)
    pub a: usize,
    /// Index of the second body
    pub b: usize,
    /// Distance between centers at detection time
    pub distance: f64,
    /// Centers coincide; there is no collision normal
    pub singular: bool,
}

/// Result of resolving a pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Bodies were already moving apart; nothing changed
    Separating,
    /// Normal velocity exchanged, `corrected` if overlap correction moved them
    Resolved { corrected: bool },
}

/// True if the two bodies overlap
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// First colliding pair in scan order (i ascending, then j > i ascending)
pub fn find_colliding_pair(bodies: &[Body]) -> Option<CollisionPair> {
    find_colliding_pair_where(bodies, |_, _| true)
}

/// Like [`find_colliding_pair`], but only pairs `(i, j)` for which
/// `eligible(i, j)` holds are tested.
pub fn find_colliding_pair_where<F>(bodies: &[Body], eligible: F) -> Option<CollisionPair>
where
    F: Fn(usize, usize) -> bool,
{
    for (i, a) in bodies.iter().enumerate() {
        for (j, b) in bodies.iter().enumerate().skip(i + 1) {
            if !eligible(i, j) {
                continue;
            }
            let distance = a.pos.distance(b.pos);
            if distance < a.radius + b.radius {
                return Some(CollisionPair {
                    a: i,
                    b: j,
                    distance,
                    singular: distance == 0.0,
                });
            }
        }
    }
    None
}

/// Resolve an equal-mass, perfectly elastic collision between two bodies.
///
/// The full normal component of the relative velocity is exchanged, which
/// conserves momentum and kinetic energy. If the bodies would still overlap
/// after one tick at their new velocities, they are pushed apart along the
/// normal until exactly tangent.
pub fn resolve(a: &mut Body, b: &mut Body) -> Result<PairOutcome, CollisionError> {
    let offset = a.pos - b.pos;
    let distance = offset.length();
    if distance == 0.0 {
        return Err(CollisionError::Degenerate { a: a.id, b: b.id });
    }
    let normal = offset / distance;

    let relative_vel = a.vel - b.vel;
    let speed_along_normal = relative_vel.dot(normal);

    if speed_along_normal > 0.0 {
        return Ok(PairOutcome::Separating);
    }

    let impulse = speed_along_normal * normal;
    a.vel -= impulse;
    b.vel += impulse;

    let contact = a.radius + b.radius;
    let next_distance = (a.pos + a.vel).distance(b.pos + b.vel);
    let overlap = contact - distance;

    let corrected = next_distance < contact && overlap > 0.0;
    if corrected {
        let push: DVec2 = normal * (overlap * 0.5);
        a.translate(push);
        b.translate(-push);
    }

    Ok(PairOutcome::Resolved { corrected })
}

/// Mutable access to two distinct bodies of a slice
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j, "pair indices must be ordered");
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EPSILON;
    use proptest::prelude::*;

    fn body(id: u32, pos: (f64, f64), vel: (f64, f64), radius: f64) -> Body {
        Body::new(id, DVec2::new(pos.0, pos.1), DVec2::new(vel.0, vel.1), radius)
    }

    #[test]
    fn test_head_on_exchange() {
        let mut a = body(0, (100.0, 100.0), (5.0, 0.0), 50.0);
        let mut b = body(1, (200.0, 100.0), (-5.0, 0.0), 50.0);

        let outcome = resolve(&mut a, &mut b).unwrap();
        assert_eq!(outcome, PairOutcome::Resolved { corrected: false });
        assert!((a.vel - DVec2::new(-5.0, 0.0)).length() < EPSILON);
        assert!((b.vel - DVec2::new(5.0, 0.0)).length() < EPSILON);
        // Already tangent: no positional change
        assert_eq!(a.pos, DVec2::new(100.0, 100.0));
        assert_eq!(b.pos, DVec2::new(200.0, 100.0));
    }

    #[test]
    fn test_separating_pair_is_noop() {
        let mut a = body(0, (100.0, 100.0), (-3.0, 1.0), 50.0);
        let mut b = body(1, (180.0, 100.0), (4.0, -2.0), 50.0);

        let outcome = resolve(&mut a, &mut b).unwrap();
        assert_eq!(outcome, PairOutcome::Separating);
        assert_eq!(a.vel, DVec2::new(-3.0, 1.0));
        assert_eq!(b.vel, DVec2::new(4.0, -2.0));
        assert_eq!(a.pos, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_degenerate_pair_is_rejected() {
        let mut a = body(3, (100.0, 100.0), (5.0, 0.0), 10.0);
        let mut b = body(7, (100.0, 100.0), (-5.0, 2.0), 10.0);

        let err = resolve(&mut a, &mut b).unwrap_err();
        assert_eq!(err, CollisionError::Degenerate { a: 3, b: 7 });
        assert_eq!(a.vel, DVec2::new(5.0, 0.0));
        assert_eq!(b.vel, DVec2::new(-5.0, 2.0));
        assert!(a.vel.is_finite() && b.vel.is_finite());
    }

    #[test]
    fn test_overlap_correction_makes_tangent() {
        // Overlapping by 20 and barely moving: still overlapping after the exchange
        let mut a = body(0, (100.0, 100.0), (1.0, 0.0), 30.0);
        let mut b = body(1, (140.0, 100.0), (-1.0, 0.0), 30.0);

        let outcome = resolve(&mut a, &mut b).unwrap();
        assert_eq!(outcome, PairOutcome::Resolved { corrected: true });
        assert!((a.pos.distance(b.pos) - 60.0).abs() < EPSILON);
        // Split evenly around the original midpoint
        assert!((a.pos - DVec2::new(90.0, 100.0)).length() < EPSILON);
        assert!((b.pos - DVec2::new(150.0, 100.0)).length() < EPSILON);
    }

    #[test]
    fn test_overlap_correction_along_diagonal() {
        let mut a = body(0, (100.0, 100.0), (0.0, 0.0), 20.0);
        let mut b = body(1, (110.0, 110.0), (-0.5, -0.5), 25.0);

        let outcome = resolve(&mut a, &mut b).unwrap();
        assert_eq!(outcome, PairOutcome::Resolved { corrected: true });
        assert!((a.pos.distance(b.pos) - 45.0).abs() < EPSILON);
    }

    #[test]
    fn test_find_first_pair_in_scan_order() {
        let bodies = vec![
            body(0, (100.0, 100.0), (0.0, 0.0), 10.0),
            body(1, (400.0, 100.0), (0.0, 0.0), 10.0),
            body(2, (410.0, 100.0), (0.0, 0.0), 10.0),
            body(3, (105.0, 100.0), (0.0, 0.0), 10.0),
        ];

        // (0, 3) comes before (1, 2) because i = 0 is scanned first
        let pair = find_colliding_pair(&bodies).unwrap();
        assert_eq!((pair.a, pair.b), (0, 3));
        assert!((pair.distance - 5.0).abs() < EPSILON);
        assert!(!pair.singular);

        let pair = find_colliding_pair_where(&bodies, |i, j| i != 0 && j != 0).unwrap();
        assert_eq!((pair.a, pair.b), (1, 2));
    }

    #[test]
    fn test_touching_is_not_colliding() {
        let bodies = vec![
            body(0, (100.0, 100.0), (5.0, 0.0), 50.0),
            body(1, (200.0, 100.0), (-5.0, 0.0), 50.0),
        ];
        assert!(find_colliding_pair(&bodies).is_none());
        assert!(!overlaps(&bodies[0], &bodies[1]));
    }

    #[test]
    fn test_find_flags_singular_pair() {
        let bodies = vec![
            body(0, (100.0, 100.0), (0.0, 0.0), 10.0),
            body(1, (100.0, 100.0), (0.0, 0.0), 10.0),
        ];
        let pair = find_colliding_pair(&bodies).unwrap();
        assert!(pair.singular);
        assert_eq!(pair.distance, 0.0);
    }

    #[test]
    fn test_pair_mut_returns_requested_bodies() {
        let mut bodies = vec![
            body(0, (0.0, 0.0), (0.0, 0.0), 1.0),
            body(1, (1.0, 0.0), (0.0, 0.0), 1.0),
            body(2, (2.0, 0.0), (0.0, 0.0), 1.0),
        ];
        let (a, b) = pair_mut(&mut bodies, 0, 2);
        assert_eq!((a.id, b.id), (0, 2));
    }

    fn coord() -> impl Strategy<Value = f64> {
        -100.0..100.0f64
    }

    fn speed() -> impl Strategy<Value = f64> {
        -20.0..20.0f64
    }

    proptest! {
        #[test]
        fn prop_resolve_conserves_momentum_and_energy(
            ax in coord(), ay in coord(), bx in coord(), by in coord(),
            avx in speed(), avy in speed(), bvx in speed(), bvy in speed(),
            ra in 1.0..50.0f64, rb in 1.0..50.0f64,
        ) {
            let mut a = body(0, (ax, ay), (avx, avy), ra);
            let mut b = body(1, (bx, by), (bvx, bvy), rb);
            prop_assume!(a.pos.distance(b.pos) > 1e-6);

            let momentum_before = a.vel + b.vel;
            let energy_before = a.vel.length_squared() + b.vel.length_squared();

            resolve(&mut a, &mut b).unwrap();

            let momentum_after = a.vel + b.vel;
            let energy_after = a.vel.length_squared() + b.vel.length_squared();

            prop_assert!((momentum_before - momentum_after).length() < 1e-9);
            prop_assert!((energy_before - energy_after).abs() < 1e-9 * energy_before.max(1.0));
        }

        #[test]
        fn prop_separating_pairs_are_untouched(
            ax in coord(), ay in coord(), bx in coord(), by in coord(),
            avx in speed(), avy in speed(), bvx in speed(), bvy in speed(),
        ) {
            let mut a = body(0, (ax, ay), (avx, avy), 10.0);
            let mut b = body(1, (bx, by), (bvx, bvy), 10.0);
            let offset = a.pos - b.pos;
            prop_assume!(offset.length() > 1e-6);
            prop_assume!((a.vel - b.vel).dot(offset / offset.length()) > 0.0);

            let (a_before, b_before) = (a.clone(), b.clone());
            prop_assert_eq!(resolve(&mut a, &mut b).unwrap(), PairOutcome::Separating);
            prop_assert_eq!(a, a_before);
            prop_assert_eq!(b, b_before);
        }
    }
}
