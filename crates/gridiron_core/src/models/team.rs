use super::player::{Player, PlayerId, Position};
use crate::error::LeagueError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Franchise names, paired index-for-index with [`TEAM_ABBREVIATIONS`].
pub const TEAM_NAMES: [&str; 8] =
    ["Hawks", "Sharks", "Lions", "Dragons", "Vipers", "Bears", "Wolves", "Panthers"];
pub const TEAM_ABBREVIATIONS: [&str; 8] = ["HAW", "SHK", "LIO", "DRA", "VIP", "BER", "WOL", "PAN"];

/// Index of a team in the league's team list.
///
/// Names are reused cyclically once the name table runs out, so identity is
/// always the id and never the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub usize);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub abbreviation: String,
    /// Draft order is preserved.
    pub roster: Vec<Player>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self { id, name: name.into(), abbreviation: abbreviation.into(), roster: Vec::new() }
    }

    /// Team `index` of a league, named from the fixed table with cyclic reuse.
    pub fn from_name_table(index: usize) -> Self {
        let slot = index % TEAM_NAMES.len();
        Self::new(TeamId(index), TEAM_NAMES[slot], TEAM_ABBREVIATIONS[slot])
    }

    /// Append `player` to the roster and point it back at this team.
    ///
    /// Ownership is exclusive: a player that already has a team is rejected and
    /// the roster is left untouched.
    pub fn add_player(&mut self, mut player: Player) -> Result<(), LeagueError> {
        if let Some(owner) = player.team() {
            return Err(LeagueError::PlayerAlreadyRostered { player: player.id, team: owner });
        }
        player.assign_team(self.id);
        self.roster.push(player);
        Ok(())
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn roster_summary(&self) -> RosterSummary {
        let mut by_position = BTreeMap::new();
        let mut rating_total = 0u32;
        for player in &self.roster {
            *by_position.entry(player.position.to_string()).or_insert(0usize) += 1;
            rating_total += player.overall_rating() as u32;
        }

        let average_overall = if self.roster.is_empty() {
            None
        } else {
            Some(rating_total as f32 / self.roster.len() as f32)
        };

        RosterSummary {
            size: self.roster.len(),
            average_overall,
            line_players: self.roster.iter().filter(|p| p.position.is_line()).count(),
            by_position,
        }
    }

    pub fn count_at(&self, position: Position) -> usize {
        self.roster.iter().filter(|p| p.position == position).count()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.abbreviation)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterSummary {
    pub size: usize,
    /// `None` for an empty roster.
    pub average_overall: Option<f32>,
    pub line_players: usize,
    pub by_position: BTreeMap<String, usize>,
}
