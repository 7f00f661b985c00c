//! Stone-stone collision detection and response
//!
//! Pairs are checked in insertion order. Each overlapping pair is pushed
//! apart symmetrically, then receives an equal and opposite impulse along the
//! contact normal unless the stones are already separating. Impulses are
//! applied immediately, so simultaneous three-stone contacts depend on order.

use glam::Vec2;

use super::stone::Stone;

/// Result of a contact check between two stones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first stone toward the second
    pub normal: Vec2,
    /// Overlap depth (sum of radii minus centre distance)
    pub penetration: f32,
}

/// Check two stones for overlap.
///
/// Coincident centres have no defined normal and report no contact.
pub fn stone_contact(a: &Stone, b: &Stone) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;

    if dist > 0.0 && dist < min_dist {
        Some(Contact {
            normal: delta / dist,
            penetration: min_dist - dist,
        })
    } else {
        None
    }
}

/// Separate an overlapping pair and apply the collision impulse.
///
/// Returns `true` if an impulse was applied (both stones are then active).
pub fn resolve_pair(a: &mut Stone, b: &mut Stone, restitution: f32) -> bool {
    let Some(contact) = stone_contact(a, b) else {
        return false;
    };
    let n = contact.normal;

    // Positional correction: half the overlap each way
    let correction = n * contact.penetration * 0.5;
    a.pos -= correction;
    b.pos += correction;

    // Relative velocity of b seen from a; positive means already separating
    let vel_along_normal = (b.vel - a.vel).dot(n);
    if vel_along_normal > 0.0 {
        return false;
    }

    let impulse = -(1.0 + restitution) * vel_along_normal / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = n * impulse;

    a.vel -= impulse / a.mass;
    b.vel += impulse / b.mass;
    a.active = true;
    b.active = true;
    true
}

/// Resolve every overlapping pair of in-play stones.
///
/// Returns the index pairs that exchanged an impulse, in resolution order.
pub fn resolve_collisions(stones: &mut [Stone], restitution: f32) -> Vec<(usize, usize)> {
    let mut hits = Vec::new();
    for i in 0..stones.len() {
        let (head, tail) = stones.split_at_mut(i + 1);
        let a = &mut head[i];
        for (offset, b) in tail.iter_mut().enumerate() {
            if !a.in_play || !b.in_play {
                continue;
            }
            if resolve_pair(a, b, restitution) {
                hits.push((i, i + 1 + offset));
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stone::Team;
    use proptest::prelude::*;

    fn moving(pos: Vec2, vel: Vec2) -> Stone {
        Stone::thrown(Team::Red, pos, vel, 0.0)
    }

    #[test]
    fn test_no_contact_when_apart() {
        let a = Stone::at_rest(Team::Red, Vec2::new(0.0, 0.0));
        let b = Stone::at_rest(Team::Blue, Vec2::new(30.0, 0.0));
        assert!(stone_contact(&a, &b).is_none());
    }

    #[test]
    fn test_coincident_centres_are_skipped() {
        let mut a = moving(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0));
        let mut b = moving(Vec2::new(5.0, 5.0), Vec2::new(-1.0, 0.0));
        assert!(stone_contact(&a, &b).is_none());
        assert!(!resolve_pair(&mut a, &mut b, 0.9));
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
        assert_eq!(b.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_head_on_hit_transfers_momentum() {
        let mut shooter = moving(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0));
        let mut target = Stone::at_rest(Team::Blue, Vec2::new(27.0, 0.0));

        assert!(resolve_pair(&mut shooter, &mut target, 0.9));
        // Equal masses: target takes (1+e)/2 of the speed, shooter keeps (1-e)/2
        assert!((target.vel.x - 1.9).abs() < 1e-5);
        assert!((shooter.vel.x - 0.1).abs() < 1e-5);
        assert!(target.active, "struck stone is set moving again");
        // Overlap was 1.0, split evenly
        assert!((shooter.pos.x + 0.5).abs() < 1e-5);
        assert!((target.pos.x - 27.5).abs() < 1e-5);
    }

    #[test]
    fn test_separating_pair_gets_no_impulse() {
        let mut a = moving(Vec2::new(0.0, 0.0), Vec2::new(-1.0, 0.0));
        let mut b = moving(Vec2::new(20.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(!resolve_pair(&mut a, &mut b, 0.9));
        assert_eq!(a.vel, Vec2::new(-1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));
        // Still pushed apart
        assert!((b.pos.x - a.pos.x - 28.0).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_play_stones_are_ignored() {
        let mut stones = vec![
            moving(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)),
            Stone::at_rest(Team::Blue, Vec2::new(20.0, 0.0)),
        ];
        stones[1].in_play = false;
        let hits = resolve_collisions(&mut stones, 0.9);
        assert!(hits.is_empty());
        assert_eq!(stones[1].pos, Vec2::new(20.0, 0.0));
        assert!(!stones[1].active);
    }

    #[test]
    fn test_pairs_resolved_in_insertion_order() {
        let mut stones = vec![
            moving(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)),
            Stone::at_rest(Team::Blue, Vec2::new(27.0, 0.0)),
            Stone::at_rest(Team::Red, Vec2::new(200.0, 0.0)),
        ];
        let hits = resolve_collisions(&mut stones, 0.9);
        assert_eq!(hits, vec![(0, 1)]);
        assert!(!stones[2].active);
    }

    proptest! {
        #[test]
        fn prop_positional_correction_removes_overlap(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            dx in -27.0f32..27.0, dy in -27.0f32..27.0,
            avx in -3.0f32..3.0, avy in -3.0f32..3.0,
        ) {
            let mut a = moving(Vec2::new(ax, ay), Vec2::new(avx, avy));
            let mut b = Stone::at_rest(Team::Blue, Vec2::new(ax + dx, ay + dy));
            prop_assume!(Vec2::new(dx, dy).length() > 1e-3);

            resolve_pair(&mut a, &mut b, 0.9);
            let gap = a.pos.distance(b.pos) - (a.radius + b.radius);
            prop_assert!(gap > -1e-3, "stones still overlap by {}", -gap);
        }

        #[test]
        fn prop_elastic_collision_conserves_momentum_and_energy(
            ma in 0.5f32..3.0, mb in 0.5f32..3.0,
            angle in 0.0f32..std::f32::consts::TAU,
            sep in 5.0f32..27.0,
            avx in -3.0f32..3.0, avy in -3.0f32..3.0,
            bvx in -3.0f32..3.0, bvy in -3.0f32..3.0,
        ) {
            let offset = Vec2::new(angle.cos(), angle.sin()) * sep;
            let mut a = Stone::new(Team::Red, Vec2::ZERO, Vec2::new(avx, avy), 14.0, ma, 0.0);
            let mut b = Stone::new(Team::Blue, offset, Vec2::new(bvx, bvy), 14.0, mb, 0.0);

            let momentum_before = a.vel * ma + b.vel * mb;
            let energy_before = 0.5 * ma * a.vel.length_squared() + 0.5 * mb * b.vel.length_squared();

            resolve_pair(&mut a, &mut b, 1.0);

            let momentum_after = a.vel * ma + b.vel * mb;
            let energy_after = 0.5 * ma * a.vel.length_squared() + 0.5 * mb * b.vel.length_squared();
            prop_assert!((momentum_before - momentum_after).length() < 1e-3);
            prop_assert!((energy_before - energy_after).abs() < 1e-2);
        }

        #[test]
        fn prop_velocity_change_is_inverse_to_mass(
            ma in 0.5f32..3.0, mb in 0.5f32..3.0,
            speed in 0.5f32..5.0,
        ) {
            let mut a = Stone::new(Team::Red, Vec2::ZERO, Vec2::new(speed, 0.0), 14.0, ma, 0.0);
            let mut b = Stone::new(Team::Blue, Vec2::new(27.0, 0.0), Vec2::ZERO, 14.0, mb, 0.0);
            let va = a.vel;

            prop_assert!(resolve_pair(&mut a, &mut b, 0.9));
            let dva = (a.vel - va).length();
            let dvb = b.vel.length();
            prop_assert!((dva * ma - dvb * mb).abs() < 1e-3);
        }
    }
}
