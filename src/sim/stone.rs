//! Curling stones
//!
//! A stone is the only moving body on the sheet. Its position and velocity are
//! advanced by the physics step; everything else (throwing, ruling out of play)
//! goes through the small set of methods here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Red,
    Blue,
}

impl Team {
    /// Team for a zero-based index (even = Red, odd = Blue)
    pub fn from_index(index: u32) -> Self {
        if index % 2 == 0 { Team::Red } else { Team::Blue }
    }

    pub fn index(self) -> usize {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
        }
    }
}

/// A curling stone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stone {
    pub team: Team,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Signed spin; positive bends the path toward the left-hand normal
    pub curl: f32,
    /// Still moving (speed above the stop threshold)
    pub active: bool,
    /// Still a scoring candidate and collision participant
    pub in_play: bool,
    /// Has passed the hog line at some point since it was thrown
    #[serde(default)]
    pub crossed_hog: bool,
}

impl Stone {
    /// Create a moving stone.
    ///
    /// Panics if `radius` or `mass` is not strictly positive.
    pub fn new(team: Team, pos: Vec2, vel: Vec2, radius: f32, mass: f32, curl: f32) -> Self {
        assert!(radius > 0.0, "stone radius must be positive, got {radius}");
        assert!(mass > 0.0, "stone mass must be positive, got {mass}");
        Self {
            team,
            pos,
            vel,
            radius,
            mass,
            curl,
            active: true,
            in_play: true,
            crossed_hog: false,
        }
    }

    /// A standard stone (default radius and mass) thrown from `pos`
    pub fn thrown(team: Team, pos: Vec2, vel: Vec2, curl: f32) -> Self {
        Self::new(team, pos, vel, STONE_RADIUS, STONE_MASS, curl)
    }

    /// A standard stone lying still at `pos`
    pub fn at_rest(team: Team, pos: Vec2) -> Self {
        let mut stone = Self::thrown(team, pos, Vec2::ZERO, 0.0);
        stone.active = false;
        stone
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Zero velocity and mark the stone as settled
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.active = false;
    }

    /// Remove the stone from play (stops it as well)
    pub fn rule_out(&mut self) {
        self.in_play = false;
        self.stop();
    }

    pub fn overlaps(&self, other: &Stone) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_clears_velocity_and_activity() {
        let mut stone = Stone::thrown(Team::Red, Vec2::ZERO, Vec2::new(3.0, 4.0), 1.0);
        assert!((stone.speed() - 5.0).abs() < 1e-6);
        assert!(stone.active);

        stone.stop();
        assert_eq!(stone.vel, Vec2::ZERO);
        assert!(!stone.active);
        assert!(stone.in_play);
    }

    #[test]
    fn test_rule_out() {
        let mut stone = Stone::thrown(Team::Blue, Vec2::ZERO, Vec2::new(0.0, -2.0), 0.0);
        stone.rule_out();
        assert!(!stone.in_play);
        assert!(!stone.active);
    }

    #[test]
    fn test_overlaps() {
        let a = Stone::at_rest(Team::Red, Vec2::new(0.0, 0.0));
        let b = Stone::at_rest(Team::Blue, Vec2::new(27.0, 0.0));
        let c = Stone::at_rest(Team::Blue, Vec2::new(28.5, 0.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    #[should_panic]
    fn test_zero_mass_panics() {
        Stone::new(Team::Red, Vec2::ZERO, Vec2::ZERO, STONE_RADIUS, 0.0, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_negative_radius_panics() {
        Stone::new(Team::Red, Vec2::ZERO, Vec2::ZERO, -1.0, STONE_MASS, 0.0);
    }

    #[test]
    fn test_team_alternation() {
        assert_eq!(Team::from_index(0), Team::Red);
        assert_eq!(Team::from_index(7), Team::Blue);
        assert_eq!(Team::Red.opponent(), Team::Blue);
        assert_eq!(Team::Blue.index(), 1);
    }
}
