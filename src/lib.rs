//! Curling - A two-team curling simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stone physics, collisions, scoring, match flow)
//! - `settings`: Match configuration loaded from JSON
//! - `scoreboard`: End-by-end results for a match
//!
//! Rendering and input capture live outside this crate. A renderer reads
//! [`sim::MatchController::render_stones`] and the [`sim::Sheet`] each frame;
//! an input source feeds [`sim::TickInput`] commands into
//! [`sim::MatchController::tick`].

pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use scoreboard::{EndRecord, Scoreboard};
pub use settings::{MatchSettings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one frame)
    pub const SIM_DT: f32 = 1.0;
    /// Frames per second assumed when converting wall-clock delays to ticks
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Stone defaults
    pub const STONE_RADIUS: f32 = 14.0;
    pub const STONE_MASS: f32 = 1.0;
    pub const STONES_PER_TEAM: u32 = 8;

    /// Throw speed model: speed = THROW_BASE_SPEED + power * THROW_POWER_SCALE
    pub const THROW_BASE_SPEED: f32 = 0.08;
    pub const THROW_POWER_SCALE: f32 = 0.065;

    /// Input ranges accepted from the aiming UI / AI
    pub const MIN_POWER: f32 = 15.0;
    pub const MAX_POWER: f32 = 100.0;
    pub const MAX_AIM_DEGREES: f32 = 40.0;

    /// Physics defaults
    pub const FRICTION: f32 = 0.992;
    pub const SWEEP_FRICTION: f32 = 0.996;
    pub const CURL_STRENGTH: f32 = 0.00004;
    pub const SWEEP_CURL_MULTIPLIER: f32 = 0.7;
    pub const RESTITUTION: f32 = 0.9;
    pub const WALL_RESTITUTION: f32 = 0.6;
    pub const ANGULAR_DRAG: f32 = 0.998;
    /// Stones slower than this come to rest
    pub const STOP_SPEED: f32 = 0.02;

    /// Sheet layout (sheet-local units, y grows toward the hack)
    pub const SHEET_WIDTH: f32 = 520.0;
    pub const SHEET_HEIGHT: f32 = 900.0;
    pub const SHEET_SIDE_MARGIN: f32 = 110.0;
    pub const SHEET_END_MARGIN: f32 = 60.0;
    pub const HOUSE_Y: f32 = 220.0;
    pub const HOUSE_RADIUS: f32 = 70.0;
    /// Ring radii from the outside in
    pub const HOUSE_RINGS: [f32; 4] = [HOUSE_RADIUS, 50.0, 30.0, 12.0];
    pub const HACK_OFFSET: f32 = 110.0;
    /// Hog line distance below the house centre
    pub const HOG_LINE_OFFSET: f32 = 260.0;
    /// Back line distance above the house centre
    pub const BACK_LINE_OFFSET: f32 = 90.0;

    /// Telemetry distance scale per unit of speed per tick
    pub const DISTANCE_SCALE: f32 = 0.02;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversion() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((rad_to_deg(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_house_radius_is_outer_ring() {
        assert_eq!(consts::HOUSE_RINGS[0], consts::HOUSE_RADIUS);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
