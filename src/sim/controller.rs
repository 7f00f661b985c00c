//! Match controller
//!
//! Owns the match state and advances it one frame at a time. Input arrives as
//! a [`TickInput`] per tick; the opponent's think delay is a tick countdown, so
//! a whole match can be driven without a wall clock.

use glam::Vec2;

use super::ai::{BoardView, ShotParams, ShotPlanner};
use super::physics::PhysicsEngine;
use super::scoring::{EndScore, calculate_score};
use super::sheet::Sheet;
use super::state::{MatchEvent, MatchPhase, MatchState, PendingShot};
use super::stone::Team;
use crate::consts::*;
use crate::scoreboard::Scoreboard;
use crate::settings::MatchSettings;

/// Commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Throw with these aim parameters (ignored on the opponent's turn)
    pub throw: Option<ShotParams>,
    /// Start/stop sweeping; the state holds until changed
    pub sweep: Option<bool>,
    /// Take back the last throw
    pub undo: bool,
    /// Score the end once the board is still
    pub score_end: bool,
    /// Clear the sheet without scoring
    pub reset_end: bool,
    /// Start a new match
    pub reset_match: bool,
}

/// What a renderer needs to draw one stone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStone {
    pub pos: Vec2,
    pub radius: f32,
    pub team: Team,
}

/// Live readout of the moving stone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub speed: f32,
    pub curl: f32,
    pub distance: f32,
}

/// Turn/end state machine tying physics and scoring together
#[derive(Debug, Clone)]
pub struct MatchController {
    pub state: MatchState,
    pub sheet: Sheet,
    pub scoreboard: Scoreboard,
    settings: MatchSettings,
    physics: PhysicsEngine,
    planner: ShotPlanner,
}

impl MatchController {
    pub fn new(settings: MatchSettings) -> Self {
        Self::with_sheet(settings, Sheet::default())
    }

    pub fn with_sheet(settings: MatchSettings, sheet: Sheet) -> Self {
        Self {
            state: MatchState::new(&settings),
            sheet,
            scoreboard: Scoreboard::new(),
            physics: PhysicsEngine::new(settings.physics),
            planner: ShotPlanner::new(settings.seed),
            settings,
        }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase()
    }

    /// Team played by the computer on its turn
    pub fn is_ai_turn(&self) -> bool {
        self.settings.ai_team == Some(self.state.current_team)
    }

    /// Throw for the current team. Both players and the opponent go through
    /// here; returns the new stone's index, or `None` if the throw was ignored.
    pub fn throw_stone(&mut self, shot: ShotParams) -> Option<usize> {
        let index = self.state.throw_stone(self.sheet.hack, &shot);
        if index.is_none() {
            log::debug!("Throw ignored: board moving or end exhausted");
        }
        index
    }

    pub fn set_sweeping(&mut self, sweeping: bool) {
        self.state.sweeping = sweeping;
    }

    pub fn undo_shot(&mut self) -> bool {
        self.state.undo_shot()
    }

    pub fn reset_end(&mut self) {
        self.state.reset_end();
    }

    /// Fresh match from the same settings; cancels a pending opponent throw
    pub fn reset_match(&mut self) {
        self.state = MatchState::new(&self.settings);
        self.scoreboard.clear();
        self.planner = ShotPlanner::new(self.settings.seed);
        log::info!("New match: {} ends", self.state.total_ends);
    }

    /// Score the current end and move on to the next.
    ///
    /// Ignored (returns `None`) while any stone is moving.
    pub fn score_end(&mut self) -> Option<EndScore> {
        if self.state.is_stone_moving() {
            log::debug!("Score end ignored: stones still moving");
            return None;
        }

        let score = calculate_score(
            &self.state.stones,
            self.sheet.house_center,
            self.sheet.house_radius(),
        );
        let end = self.state.end_number;
        let record = self.scoreboard.record(end, score);
        self.state.apply_end_score(score);

        log::info!(
            "End {}: {} (Red {} - Blue {}), hammer to {}",
            end,
            record.summary(),
            self.state.score(Team::Red),
            self.state.score(Team::Blue),
            self.state.hammer_team.as_str()
        );
        if self.state.is_match_over() {
            log::info!("{}", self.scoreboard.final_summary());
        }
        Some(score)
    }

    /// Advance one frame: apply commands, step physics, update stone
    /// validity, then run the opponent's timer.
    pub fn tick(&mut self, input: &TickInput) -> Vec<MatchEvent> {
        let mut events = Vec::new();

        if input.reset_match {
            self.reset_match();
        }
        if let Some(sweeping) = input.sweep {
            self.set_sweeping(sweeping);
        }
        if input.undo {
            self.undo_shot();
        }
        if let Some(shot) = input.throw {
            if self.is_ai_turn() {
                log::warn!("Throw ignored: {} is computer controlled", self.state.current_team.as_str());
            } else if let Some(index) = self.throw_stone(shot) {
                events.push(MatchEvent::StoneThrown {
                    index,
                    team: self.state.stones[index].team,
                });
            }
        }
        if input.score_end {
            if let Some(score) = self.score_end() {
                events.push(MatchEvent::EndScored {
                    end: self.state.end_number - 1,
                    score,
                });
                if self.state.is_match_over() {
                    events.push(MatchEvent::MatchOver {
                        winner: self.state.leader(),
                    });
                }
            }
        }
        if input.reset_end {
            self.reset_end();
        }

        let report = self.physics.step(
            &mut self.state.stones,
            SIM_DT,
            self.state.sweeping,
            Some(&self.sheet.bounds),
        );
        events.extend(report.stopped.iter().map(|&index| MatchEvent::StoneStopped { index }));
        events.extend(
            report
                .collisions
                .iter()
                .map(|&(a, b)| MatchEvent::Collision { a, b }),
        );

        self.update_stone_validity(&mut events);

        let traveled: f32 = self.state.stones.iter().map(|s| s.speed()).sum();
        self.state.distance_traveled += traveled * DISTANCE_SCALE;

        self.run_opponent(&mut events);
        events
    }

    /// Apply the hog line and back line rules to every in-play stone
    fn update_stone_validity(&mut self, events: &mut Vec<MatchEvent>) {
        for (index, stone) in self.state.stones.iter_mut().enumerate() {
            if !stone.in_play {
                continue;
            }
            if self.sheet.is_beyond_hog_line(stone) {
                stone.crossed_hog = true;
            }
            if self.sheet.is_beyond_back_line(stone) || (!stone.active && !stone.crossed_hog) {
                stone.rule_out();
                events.push(MatchEvent::StoneOutOfPlay { index });
            }
        }
    }

    /// Plan the opponent's throw when it is their turn, release it when the
    /// think delay runs out. At most one throw is ever pending.
    fn run_opponent(&mut self, events: &mut Vec<MatchEvent>) {
        if let Some(mut pending) = self.state.pending_shot.take() {
            pending.ticks_remaining = pending.ticks_remaining.saturating_sub(1);
            if pending.ticks_remaining > 0 {
                self.state.pending_shot = Some(pending);
            } else {
                self.release_pending(pending, events);
            }
            return;
        }

        if !self.is_ai_turn() || !self.state.can_throw() {
            return;
        }

        let board = BoardView {
            stones: &self.state.stones,
            house_center: self.sheet.house_center,
            house_radius: self.sheet.house_radius(),
            hog_line_y: self.sheet.hog_line_y,
            difficulty: self.settings.ai_difficulty,
            team: self.state.current_team,
        };
        let params = self.planner.choose_shot(&board);
        let pending = PendingShot {
            team: self.state.current_team,
            params,
            ticks_remaining: self.settings.ai_think_ticks,
        };

        if pending.ticks_remaining == 0 {
            self.release_pending(pending, events);
        } else {
            self.state.pending_shot = Some(pending);
        }
    }

    fn release_pending(&mut self, pending: PendingShot, events: &mut Vec<MatchEvent>) {
        if self.state.current_team != pending.team {
            log::warn!(
                "Dropping {} throw: turn passed to {}",
                pending.team.as_str(),
                self.state.current_team.as_str()
            );
            return;
        }
        match self.throw_stone(pending.params) {
            Some(index) => events.push(MatchEvent::StoneThrown {
                index,
                team: pending.team,
            }),
            None => log::warn!("Dropping {} throw: board not ready", pending.team.as_str()),
        }
    }

    /// In-play stones for drawing
    pub fn render_stones(&self) -> impl Iterator<Item = RenderStone> + '_ {
        self.state
            .stones
            .iter()
            .filter(|s| s.in_play)
            .map(|s| RenderStone {
                pos: s.pos,
                radius: s.radius,
                team: s.team,
            })
    }

    /// Readout of the first moving stone (zero speed when the board is still)
    pub fn telemetry(&self) -> Telemetry {
        let (speed, curl) = self
            .state
            .stones
            .iter()
            .find(|s| s.active)
            .map_or((0.0, 0.0), |s| (s.speed(), s.curl));
        Telemetry {
            speed,
            curl,
            distance: self.state.distance_traveled,
        }
    }

    /// Tick with no input until no stone is moving or `max_ticks` pass.
    ///
    /// Returns the number of ticks run. Opponent throws still fire.
    pub fn run_until_settled(&mut self, max_ticks: u32) -> u32 {
        let idle = TickInput::default();
        for ticks in 0..max_ticks {
            if !self.state.is_stone_moving() {
                return ticks;
            }
            self.tick(&idle);
        }
        max_ticks
    }
}
