//! End scoring
//!
//! The team with the stone closest to the button scores one point for every
//! stone of theirs closer than the opponent's best stone in the house. A tie
//! for shot stone scores nothing and counts as a blank end.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::stone::{Stone, Team};
use crate::distance;

/// Outcome of an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndScore {
    /// No stone in the house, or a tie for shot stone
    Blank,
    Scored { team: Team, points: u32 },
}

impl EndScore {
    pub fn team(&self) -> Option<Team> {
        match self {
            EndScore::Blank => None,
            EndScore::Scored { team, .. } => Some(*team),
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            EndScore::Blank => 0,
            EndScore::Scored { points, .. } => *points,
        }
    }

    /// Hammer for the next end: the team that did not score keeps or gains it
    pub fn next_hammer(&self, current: Team) -> Team {
        match self {
            EndScore::Blank => current,
            EndScore::Scored { team, .. } => team.opponent(),
        }
    }
}

/// Score the stones against a house at `house_center` of `house_radius`.
///
/// Only in-play stones whose centre lies within the radius (inclusive) count.
pub fn calculate_score(stones: &[Stone], house_center: Vec2, house_radius: f32) -> EndScore {
    let mut in_house: Vec<(f32, Team)> = stones
        .iter()
        .filter(|s| s.in_play)
        .map(|s| (distance(s.pos, house_center), s.team))
        .filter(|(dist, _)| *dist <= house_radius)
        .collect();

    if in_house.is_empty() {
        return EndScore::Blank;
    }

    in_house.sort_by(|a, b| a.0.total_cmp(&b.0));

    let leader = in_house[0].1;
    let opponent_best = in_house
        .iter()
        .find(|(_, team)| *team != leader)
        .map_or(f32::INFINITY, |(dist, _)| *dist);

    let points = in_house
        .iter()
        .filter(|(dist, team)| *team == leader && *dist < opponent_best)
        .count() as u32;

    if points == 0 {
        return EndScore::Blank;
    }

    EndScore::Scored {
        team: leader,
        points,
    }
}
