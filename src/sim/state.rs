//! Match state and turn bookkeeping
//!
//! Everything needed to resume a match lives here; the controller owns the
//! only instance and mutates it within a tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::ShotParams;
use super::scoring::EndScore;
use super::stone::{Stone, Team};
use crate::consts::*;
use crate::deg_to_rad;
use crate::settings::MatchSettings;

/// Where the match is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Board is still, waiting for `team` to throw
    AwaitingThrow(Team),
    /// At least one stone is moving
    StoneInMotion,
    /// All stones thrown and settled, waiting for the end to be scored
    EndComplete,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    StoneThrown { index: usize, team: Team },
    StoneStopped { index: usize },
    StoneOutOfPlay { index: usize },
    Collision { a: usize, b: usize },
    EndScored { end: u32, score: EndScore },
    /// The last end has been scored; `winner` is `None` on a tie
    MatchOver { winner: Option<Team> },
}

/// An opponent throw waiting for its think delay to run out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingShot {
    pub team: Team,
    pub params: ShotParams,
    pub ticks_remaining: u32,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Stones in throw order
    pub stones: Vec<Stone>,
    pub current_team: Team,
    /// Shots thrown this end
    pub current_shot: u32,
    pub stones_per_team: u32,
    /// Current end (1-indexed)
    pub end_number: u32,
    pub total_ends: u32,
    /// Points per team, indexed by `Team::index`
    pub scores: [u32; 2],
    pub hammer_team: Team,
    pub sweeping: bool,
    /// Distance covered by moving stones since the last throw
    pub distance_traveled: f32,
    /// Opponent throw in its think delay
    pub pending_shot: Option<PendingShot>,
}

impl MatchState {
    pub fn new(settings: &MatchSettings) -> Self {
        Self {
            stones: Vec::new(),
            current_team: Team::Red,
            current_shot: 0,
            stones_per_team: settings.stones_per_team,
            end_number: 1,
            total_ends: settings.total_ends,
            scores: [0, 0],
            hammer_team: Team::Red,
            sweeping: false,
            distance_traveled: 0.0,
            pending_shot: None,
        }
    }

    /// Shots in a full end
    #[inline]
    pub fn total_shots(&self) -> u32 {
        self.stones_per_team * 2
    }

    pub fn is_stone_moving(&self) -> bool {
        self.stones.iter().any(|s| s.active)
    }

    /// Stones `team` has left to throw this end
    pub fn stones_remaining(&self, team: Team) -> u32 {
        let thrown = self.stones.iter().filter(|s| s.team == team).count() as u32;
        self.stones_per_team.saturating_sub(thrown)
    }

    /// A throw is allowed only on a still board with shots left
    pub fn can_throw(&self) -> bool {
        !self.is_stone_moving() && self.current_shot < self.total_shots()
    }

    pub fn phase(&self) -> MatchPhase {
        if self.is_stone_moving() {
            MatchPhase::StoneInMotion
        } else if self.current_shot >= self.total_shots() {
            MatchPhase::EndComplete
        } else {
            MatchPhase::AwaitingThrow(self.current_team)
        }
    }

    /// Every scheduled end has been scored
    pub fn is_match_over(&self) -> bool {
        self.end_number > self.total_ends
    }

    pub fn score(&self, team: Team) -> u32 {
        self.scores[team.index()]
    }

    /// Leading team, `None` when level
    pub fn leader(&self) -> Option<Team> {
        let red = self.score(Team::Red);
        let blue = self.score(Team::Blue);
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Some(Team::Red),
            std::cmp::Ordering::Less => Some(Team::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Release a stone for the current team from `hack`.
    ///
    /// Returns the new stone's index, or `None` if no throw is allowed now.
    pub fn throw_stone(&mut self, hack: Vec2, shot: &ShotParams) -> Option<usize> {
        if !self.can_throw() {
            return None;
        }

        let team = self.current_team;
        let stone = Stone::thrown(team, hack, throw_velocity(shot), shot.curl);
        self.stones.push(stone);
        self.distance_traveled = 0.0;

        self.current_shot += 1;
        self.current_team = Team::from_index(self.current_shot);

        log::debug!(
            "End {} shot {}: {} throws power {:.0}, angle {:.1}, curl {:.1}",
            self.end_number,
            self.current_shot,
            team.as_str(),
            shot.power,
            shot.angle_deg,
            shot.curl
        );
        Some(self.stones.len() - 1)
    }

    /// Take back the last throw. Returns `false` if nothing was undone.
    pub fn undo_shot(&mut self) -> bool {
        if self.is_stone_moving() {
            return false;
        }
        if self.stones.pop().is_none() {
            return false;
        }
        if self.current_shot > 0 {
            self.current_shot -= 1;
            self.current_team = Team::from_index(self.current_shot);
        }
        log::debug!("Undo: back to shot {}", self.current_shot + 1);
        true
    }

    /// Clear the sheet for a new end; the hammer team throws first
    pub fn reset_end(&mut self) {
        self.stones.clear();
        self.current_shot = 0;
        self.current_team = self.hammer_team;
        self.distance_traveled = 0.0;
    }

    /// Add an end's result and pass the hammer. Advances to the next end.
    pub fn apply_end_score(&mut self, score: EndScore) {
        if let EndScore::Scored { team, points } = score {
            self.scores[team.index()] += points;
        }
        self.hammer_team = score.next_hammer(self.hammer_team);
        self.end_number += 1;
        self.reset_end();
    }
}

/// Initial velocity for a shot: angle 0 is straight up the sheet (-y)
pub fn throw_velocity(shot: &ShotParams) -> Vec2 {
    let speed = THROW_BASE_SPEED + shot.power * THROW_POWER_SCALE;
    let base_angle = -std::f32::consts::FRAC_PI_2 + deg_to_rad(shot.angle_deg);
    Vec2::new(base_angle.cos(), base_angle.sin()) * speed
}
