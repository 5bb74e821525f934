use crate::models::{PlayerId, TeamId};
use crate::save::SaveError;
use crate::session::SessionPhase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Player {player} is already on the roster of {team}")]
    PlayerAlreadyRostered { player: PlayerId, team: TeamId },

    #[error("Unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("Invalid phase: expected {expected}, found {found}")]
    InvalidPhase { expected: SessionPhase, found: SessionPhase },

    #[error("Can only advance week during season (current phase: {found})")]
    NotInSeason { found: SessionPhase },

    #[error("No season to continue")]
    NoActiveSeason,

    #[error("Draft not initialized")]
    DraftNotInitialized,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load configuration from {path}: {message}")]
    ConfigLoad { path: String, message: String },

    #[error(transparent)]
    Save(#[from] SaveError),
}

impl LeagueError {
    /// Rejected operations leave state untouched and can simply be retried
    /// once the precondition holds.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LeagueError::Save(err) => err.is_recoverable(),
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
