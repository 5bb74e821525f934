pub mod player;
pub mod team;

pub use player::{Player, PlayerId, Position, ATTRIBUTE_MAX, ATTRIBUTE_MIN};
pub use team::{RosterSummary, Team, TeamId, TEAM_ABBREVIATIONS, TEAM_NAMES};
