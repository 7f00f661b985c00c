//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (stone throw order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod controller;
pub mod physics;
pub mod scoring;
pub mod sheet;
pub mod state;
pub mod stone;

pub use ai::{BoardView, ShotMode, ShotParams, ShotPlanner};
pub use collision::{Contact, resolve_collisions, resolve_pair, stone_contact};
pub use controller::{MatchController, RenderStone, Telemetry, TickInput};
pub use physics::{PhysicsEngine, PhysicsParams, StepReport, apply_bounds};
pub use scoring::{EndScore, calculate_score};
pub use sheet::{Bounds, Sheet};
pub use state::{MatchEvent, MatchPhase, MatchState, PendingShot, throw_velocity};
pub use stone::{Stone, Team};
