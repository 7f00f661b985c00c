//! Computer opponent shot selection
//!
//! The opponent reads the board, picks a shot type and produces the same
//! power / angle / curl triple a human would dial in. Randomness comes from a
//! seeded PCG so a match replays identically for the same seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::stone::{Stone, Team};
use crate::consts::*;
use crate::rad_to_deg;

/// Aim parameters for a single throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotParams {
    /// Throw strength in `[MIN_POWER, MAX_POWER]`
    pub power: f32,
    /// Aim offset from straight up the sheet, degrees in `[-40, 40]`
    pub angle_deg: f32,
    pub curl: f32,
}

impl ShotParams {
    pub fn new(power: f32, angle_deg: f32, curl: f32) -> Self {
        Self {
            power,
            angle_deg,
            curl,
        }
    }
}

/// Everything the opponent looks at when choosing a shot
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub stones: &'a [Stone],
    pub house_center: Vec2,
    pub house_radius: f32,
    pub hog_line_y: f32,
    /// Shot accuracy, roughly 0.5 (wild) to 1.2 (sharp)
    pub difficulty: f32,
    /// The team about to throw
    pub team: Team,
}

impl BoardView<'_> {
    /// Point the aim angle is measured from
    fn aim_origin(&self) -> Vec2 {
        Vec2::new(self.house_center.x, self.hog_line_y + HOG_LINE_OFFSET)
    }
}

/// Shot type, chosen from the board alone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotMode {
    /// Come to rest on the button
    Draw,
    /// Park in front of the house
    Guard,
    /// Hit the opponent's best stone out of the house
    Takeout { target: Vec2 },
}

impl ShotMode {
    /// Pick a shot for `board.team`:
    /// - takeout if the opponent has a stone in the house
    /// - draw if the opponent has nothing in play
    /// - guard otherwise
    pub fn select(board: &BoardView<'_>) -> Self {
        let opponent = board.team.opponent();
        let mut opponent_stones = board
            .stones
            .iter()
            .filter(|s| s.in_play && s.team == opponent)
            .peekable();

        if opponent_stones.peek().is_none() {
            return ShotMode::Draw;
        }

        let best_in_house = opponent_stones
            .map(|s| (s.pos.distance(board.house_center), s.pos))
            .filter(|(dist, _)| *dist < board.house_radius)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match best_in_house {
            Some((_, target)) => ShotMode::Takeout { target },
            None => ShotMode::Guard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotMode::Draw => "draw",
            ShotMode::Guard => "guard",
            ShotMode::Takeout { .. } => "takeout",
        }
    }
}

/// Seeded shot chooser for the computer opponent
#[derive(Debug, Clone)]
pub struct ShotPlanner {
    rng: Pcg32,
}

impl ShotPlanner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Choose aim parameters for the current board
    pub fn choose_shot(&mut self, board: &BoardView<'_>) -> ShotParams {
        let mode = ShotMode::select(board);
        let d = board.difficulty;
        let house = board.house_center;

        let (target, power, curl) = match mode {
            ShotMode::Takeout { target } => {
                let dx = target.x - house.x;
                let power = (86.0 * d).clamp(72.0, 100.0);
                (target, power, (-dx * 0.12).clamp(-12.0, 12.0))
            }
            ShotMode::Guard => {
                let offset_x = self.jitter() * 90.0 * (1.2 - d);
                let target = Vec2::new(house.x + offset_x, board.hog_line_y + 40.0);
                let power = (52.0 * d).clamp(42.0, 70.0);
                (target, power, (offset_x * 0.12).clamp(-12.0, 12.0))
            }
            ShotMode::Draw => {
                let offset = Vec2::new(
                    self.jitter() * 40.0 * (1.1 - d),
                    self.jitter() * 30.0 * (1.1 - d),
                );
                let power = (66.0 * d).clamp(50.0, 82.0);
                (house + offset, power, (offset.x * 0.1).clamp(-10.0, 10.0))
            }
        };

        let power = power.clamp(MIN_POWER, MAX_POWER);
        let angle_deg = aim_angle_deg(board.aim_origin(), target);
        log::debug!(
            "{} plays {}: power {:.0}, angle {:.1}, curl {:.1}",
            board.team.as_str(),
            mode.as_str(),
            power,
            angle_deg,
            curl
        );

        ShotParams {
            power,
            angle_deg,
            curl,
        }
    }

    /// Uniform sample in [-0.5, 0.5)
    fn jitter(&mut self) -> f32 {
        self.rng.random::<f32>() - 0.5
    }
}

/// Aim angle from `origin` to `target`, measured from straight up the sheet
/// and clamped to the aimable range.
pub fn aim_angle_deg(origin: Vec2, target: Vec2) -> f32 {
    let d = target - origin;
    let angle = d.y.atan2(d.x) + std::f32::consts::FRAC_PI_2;
    rad_to_deg(angle).clamp(-MAX_AIM_DEGREES, MAX_AIM_DEGREES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sheet::Sheet;

    fn board<'a>(sheet: &Sheet, stones: &'a [Stone], difficulty: f32) -> BoardView<'a> {
        BoardView {
            stones,
            house_center: sheet.house_center,
            house_radius: sheet.house_radius(),
            hog_line_y: sheet.hog_line_y,
            difficulty,
            team: Team::Blue,
        }
    }

    #[test]
    fn test_aim_angle_straight_ahead_is_zero() {
        let angle = aim_angle_deg(Vec2::new(260.0, 740.0), Vec2::new(260.0, 220.0));
        assert!(angle.abs() < 1e-3);
        // Target to the right of the origin: positive angle
        assert!(aim_angle_deg(Vec2::new(260.0, 740.0), Vec2::new(300.0, 220.0)) > 0.0);
        // Far off to the side: clamped
        assert_eq!(aim_angle_deg(Vec2::new(0.0, 0.0), Vec2::new(100.0, -1.0)), 40.0);
    }

    #[test]
    fn test_mode_selection() {
        let sheet = Sheet::default();

        let empty: Vec<Stone> = Vec::new();
        assert_eq!(ShotMode::select(&board(&sheet, &empty, 1.0)), ShotMode::Draw);

        // Only own stones: still a draw
        let own = vec![Stone::at_rest(Team::Blue, sheet.house_center)];
        assert_eq!(ShotMode::select(&board(&sheet, &own, 1.0)), ShotMode::Draw);

        let guard_only = vec![Stone::at_rest(Team::Red, Vec2::new(260.0, 420.0))];
        assert_eq!(ShotMode::select(&board(&sheet, &guard_only, 1.0)), ShotMode::Guard);

        let near = sheet.house_center + Vec2::new(10.0, 0.0);
        let far = sheet.house_center + Vec2::new(0.0, 50.0);
        let in_house = vec![
            Stone::at_rest(Team::Red, far),
            Stone::at_rest(Team::Red, near),
        ];
        assert_eq!(
            ShotMode::select(&board(&sheet, &in_house, 1.0)),
            ShotMode::Takeout { target: near }
        );
    }

    #[test]
    fn test_out_of_play_stones_are_invisible() {
        let sheet = Sheet::default();
        let mut stone = Stone::at_rest(Team::Red, sheet.house_center);
        stone.in_play = false;
        let stones = vec![stone];
        assert_eq!(ShotMode::select(&board(&sheet, &stones, 1.0)), ShotMode::Draw);
    }

    #[test]
    fn test_shot_ranges() {
        let sheet = Sheet::default();
        let mut planner = ShotPlanner::new(7);
        let takeout = vec![Stone::at_rest(Team::Red, sheet.house_center + Vec2::new(20.0, 0.0))];
        let guard = vec![Stone::at_rest(Team::Red, Vec2::new(200.0, 400.0))];
        let draw: Vec<Stone> = Vec::new();

        for difficulty in [0.5, 0.75, 1.0, 1.2] {
            let shot = planner.choose_shot(&board(&sheet, &takeout, difficulty));
            assert!((72.0..=100.0).contains(&shot.power));
            assert!((-12.0..=12.0).contains(&shot.curl));
            // Target is right of centre: curl pulls back left
            assert!(shot.curl < 0.0);

            let shot = planner.choose_shot(&board(&sheet, &guard, difficulty));
            assert!((42.0..=70.0).contains(&shot.power));

            let shot = planner.choose_shot(&board(&sheet, &draw, difficulty));
            assert!((50.0..=82.0).contains(&shot.power));
            assert!((-10.0..=10.0).contains(&shot.curl));
            assert!((-40.0..=40.0).contains(&shot.angle_deg));
        }
    }

    #[test]
    fn test_same_seed_same_shots() {
        let sheet = Sheet::default();
        let stones: Vec<Stone> = Vec::new();
        let mut a = ShotPlanner::new(42);
        let mut b = ShotPlanner::new(42);
        for _ in 0..5 {
            assert_eq!(
                a.choose_shot(&board(&sheet, &stones, 0.8)),
                b.choose_shot(&board(&sheet, &stones, 0.8))
            );
        }
    }
}
