//! Match scoreboard
//!
//! Tracks the result of every completed end, in order.

use serde::{Deserialize, Serialize};

use crate::sim::{EndScore, Team};

/// Result of one completed end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndRecord {
    /// End number (1-indexed)
    pub end: u32,
    /// Scoring team, `None` for a blank end
    pub team: Option<Team>,
    pub points: u32,
}

impl EndRecord {
    pub fn new(end: u32, score: EndScore) -> Self {
        Self {
            end,
            team: score.team(),
            points: score.points(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.team.is_none()
    }

    /// Short description, e.g. "Red +2" or "Blank end"
    pub fn summary(&self) -> String {
        match self.team {
            Some(team) => format!("{} +{}", team.as_str(), self.points),
            None => "Blank end".to_string(),
        }
    }
}

/// End-by-end record of a match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub ends: Vec<EndRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self { ends: Vec::new() }
    }

    /// Record a completed end
    pub fn record(&mut self, end: u32, score: EndScore) -> EndRecord {
        let record = EndRecord::new(end, score);
        self.ends.push(record);
        record
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    pub fn clear(&mut self) {
        self.ends.clear();
    }

    /// Total points for a team across recorded ends
    pub fn total(&self, team: Team) -> u32 {
        self.ends
            .iter()
            .filter(|e| e.team == Some(team))
            .map(|e| e.points)
            .sum()
    }

    /// Points a team scored in each end (0 for ends it did not score)
    pub fn line(&self, team: Team) -> Vec<u32> {
        self.ends
            .iter()
            .map(|e| if e.team == Some(team) { e.points } else { 0 })
            .collect()
    }

    pub fn blank_ends(&self) -> usize {
        self.ends.iter().filter(|e| e.is_blank()).count()
    }

    /// Leading team, `None` when tied
    pub fn leader(&self) -> Option<Team> {
        let red = self.total(Team::Red);
        let blue = self.total(Team::Blue);
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Some(Team::Red),
            std::cmp::Ordering::Less => Some(Team::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// "Final <red> - <blue>"
    pub fn final_summary(&self) -> String {
        format!("Final {} - {}", self.total(Team::Red), self.total(Team::Blue))
    }
}
