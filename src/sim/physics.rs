//! Per-frame stone physics
//!
//! Each active stone, once per step:
//! 1. stops if slower than the stop speed
//! 2. loses spin to angular drag
//! 3. bends along its left-hand normal in proportion to curl and speed
//! 4. slows by the friction factor (less while sweeping)
//! 5. integrates position and bounces off the sheet bounds
//!
//! After every stone has moved, overlapping pairs are resolved.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::sheet::Bounds;
use super::stone::Stone;
use crate::consts::*;

/// Tunable physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Velocity multiplier per step
    pub friction: f32,
    /// Velocity multiplier per step while sweeping
    pub sweep_friction: f32,
    /// Lateral force per unit of curl
    pub curl_strength: f32,
    /// Curl strength scale while sweeping
    pub sweep_curl_multiplier: f32,
    /// Stone-stone restitution
    pub restitution: f32,
    /// Restitution against the sheet bounds
    pub wall_restitution: f32,
    /// Curl multiplier per step
    pub angular_drag: f32,
    /// Stones slower than this come to rest
    pub stop_speed: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            sweep_friction: SWEEP_FRICTION,
            curl_strength: CURL_STRENGTH,
            sweep_curl_multiplier: SWEEP_CURL_MULTIPLIER,
            restitution: RESTITUTION,
            wall_restitution: WALL_RESTITUTION,
            angular_drag: ANGULAR_DRAG,
            stop_speed: STOP_SPEED,
        }
    }
}

impl PhysicsParams {
    /// Friction factor for the current sweeping state
    #[inline]
    pub fn effective_friction(&self, sweeping: bool) -> f32 {
        if sweeping { self.sweep_friction } else { self.friction }
    }

    /// Curl strength for the current sweeping state
    #[inline]
    pub fn effective_curl_strength(&self, sweeping: bool) -> f32 {
        if sweeping {
            self.curl_strength * self.sweep_curl_multiplier
        } else {
            self.curl_strength
        }
    }
}

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Stones that came to rest this step
    pub stopped: Vec<usize>,
    /// Stone pairs that exchanged an impulse
    pub collisions: Vec<(usize, usize)>,
}

/// Advances stones under friction, curl and collisions
#[derive(Debug, Clone, Default)]
pub struct PhysicsEngine {
    pub params: PhysicsParams,
}

impl PhysicsEngine {
    pub fn new(params: PhysicsParams) -> Self {
        Self { params }
    }

    /// Advance all stones by `dt`, then resolve collisions.
    ///
    /// `bounds` of `None` lets stones travel freely.
    pub fn step(
        &self,
        stones: &mut [Stone],
        dt: f32,
        sweeping: bool,
        bounds: Option<&Bounds>,
    ) -> StepReport {
        let friction = self.params.effective_friction(sweeping);
        let curl_strength = self.params.effective_curl_strength(sweeping);
        let mut report = StepReport::default();

        for (i, stone) in stones.iter_mut().enumerate() {
            if !stone.active {
                continue;
            }

            let speed = stone.speed();
            if speed < self.params.stop_speed {
                stone.stop();
                report.stopped.push(i);
                continue;
            }

            stone.curl *= self.params.angular_drag;
            let curl_force = stone.curl * curl_strength;
            if curl_force != 0.0 {
                let normal = Vec2::new(-stone.vel.y, stone.vel.x) / speed;
                stone.vel += normal * curl_force * dt * speed;
            }

            stone.vel *= friction;
            stone.pos += stone.vel * dt;

            if let Some(bounds) = bounds {
                apply_bounds(stone, bounds, self.params.wall_restitution);
            }
        }

        report.collisions = resolve_collisions(stones, self.params.restitution);
        report
    }
}

/// Clamp a stone inside the bounds, bouncing the velocity component that hit.
///
/// The bottom limit sits one radius *outside* the bounds, unlike the other
/// three edges.
pub fn apply_bounds(stone: &mut Stone, bounds: &Bounds, wall_restitution: f32) {
    let left = bounds.left + stone.radius;
    let right = bounds.right - stone.radius;
    let top = bounds.top + stone.radius;
    let bottom = bounds.bottom + stone.radius;

    if stone.pos.x < left {
        stone.pos.x = left;
        stone.vel.x *= -wall_restitution;
    }
    if stone.pos.x > right {
        stone.pos.x = right;
        stone.vel.x *= -wall_restitution;
    }
    if stone.pos.y < top {
        stone.pos.y = top;
        stone.vel.y *= -wall_restitution;
    }
    if stone.pos.y > bottom {
        stone.pos.y = bottom;
        stone.vel.y *= -wall_restitution;
    }
}
