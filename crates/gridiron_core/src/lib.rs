//! # gridiron_core - Draft, Schedule and Season Engine
//!
//! Generates a pool of synthetic American-football players, allocates them
//! to teams through a round-robin draft, builds a rotating round-robin
//! schedule and simulates a season into win/loss standings.
//!
//! ## Features
//! - Seeded generation: the same seed produces the same pool and draft
//! - Pluggable game simulation through [`season::GameSimulator`]
//! - Optional week-parallel season runner
//! - Compressed, checksummed session snapshots
//!
//! ```rust
//! use gridiron_core::{GameSession, LeagueConfig, RatingWeightedSimulator};
//!
//! let mut session = GameSession::new();
//! session.start_new_game(LeagueConfig::default()).unwrap();
//! session.run_draft_phase().unwrap();
//! session.play_remaining_season(&RatingWeightedSimulator::new(7)).unwrap();
//! assert_eq!(session.results().len(), 3);
//! ```

// Player construction takes every attribute explicitly
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod draft;
pub mod error;
pub mod models;
pub mod save;
pub mod schedule;
pub mod season;
pub mod session;

pub use config::LeagueConfig;
pub use draft::{Draft, DraftPick};
pub use error::{LeagueError, Result};
pub use models::{Player, PlayerId, Position, Team, TeamId};
pub use save::{GameSave, SaveError, SaveManager, SnapshotStore};
pub use schedule::{Fixture, Schedule, Week};
pub use season::{
    run_season, run_season_parallel, run_week, GameResult, GameSimulator,
    RatingWeightedSimulator, Standings, TeamRecord, WeekResults,
};
pub use session::{GameSession, SessionPhase};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
