//! Curling entry point
//!
//! Runs a headless match: the built-in opponent plays its configured team and
//! a second shot planner plays the other side through the same throw input a
//! human would use. Pass a settings JSON path as the first argument to
//! override the defaults.

use curling::MatchSettings;
use curling::sim::{BoardView, MatchController, MatchEvent, MatchPhase, ShotPlanner, Team, TickInput};

/// Safety valve so a stuck simulation cannot spin forever
const MAX_TICKS_PER_END: u32 = 200_000;

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match MatchSettings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => MatchSettings::default(),
    };

    log::info!(
        "Curling (headless) starting: {} ends, {} stones per team",
        settings.total_ends,
        settings.stones_per_team
    );

    let human_team = match settings.ai_team {
        Some(team) => team.opponent(),
        None => Team::Red,
    };
    let mut stand_in = ShotPlanner::new(settings.seed.wrapping_add(1));
    let mut game = MatchController::new(settings);

    while !game.state.is_match_over() {
        play_end(&mut game, &mut stand_in, human_team);
    }

    println!("{}", game.scoreboard.final_summary());
    for record in &game.scoreboard.ends {
        println!("End {:>2}: {}", record.end, record.summary());
    }
}

/// Play one end to completion and score it
fn play_end(game: &mut MatchController, stand_in: &mut ShotPlanner, human_team: Team) {
    for _ in 0..MAX_TICKS_PER_END {
        // Sweep our own stones while they run
        let sweeping = game
            .state
            .stones
            .last()
            .is_some_and(|s| s.active && s.team == human_team);
        let mut input = TickInput {
            sweep: Some(sweeping),
            ..Default::default()
        };

        match game.phase() {
            MatchPhase::AwaitingThrow(team) if !game.is_ai_turn() => {
                let board = BoardView {
                    stones: &game.state.stones,
                    house_center: game.sheet.house_center,
                    house_radius: game.sheet.house_radius(),
                    hog_line_y: game.sheet.hog_line_y,
                    difficulty: game.settings().ai_difficulty,
                    team,
                };
                input.throw = Some(stand_in.choose_shot(&board));
            }
            MatchPhase::EndComplete => input.score_end = true,
            _ => {}
        }

        for event in game.tick(&input) {
            match event {
                MatchEvent::EndScored { end, score } => {
                    log::info!("End {end} complete: {score:?}");
                    return;
                }
                MatchEvent::Collision { a, b } => log::debug!("Stones {a} and {b} collided"),
                _ => {}
            }
        }
    }

    log::warn!("End {} did not finish; scoring as it lies", game.state.end_number);
    game.state.stones.iter_mut().for_each(|s| s.stop());
    game.score_end();
}
