//! Draft session: pool ownership and round-robin allocation.
//!
//! The pool starts rating-descending and only ever shrinks. Every pick moves
//! one player from `available` into a team roster and appends a [`DraftPick`]
//! to the log, so `available + picks` always partitions the generated pool.

pub mod generator;

pub use generator::{
    generate_players, generate_players_with, generate_teams, DRAFT_POSITIONS,
    GENERATED_ATTRIBUTE_MAX,
};

use crate::config::LeagueConfig;
use crate::models::{Player, PlayerId, Position, Team, TeamId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One entry of the append-only draft log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftPick {
    /// 1-based overall pick number
    pub number: usize,
    /// 1-based round
    pub round: usize,
    pub team: TeamId,
    pub player: PlayerId,
}

/// A row of the draft board listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardRow {
    pub index: usize,
    pub name: String,
    pub position: Position,
    pub speed: u8,
    pub strength: u8,
    pub skill: u8,
    pub overall: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    available: Vec<Player>,
    picks: Vec<DraftPick>,
    teams: Vec<Team>,
    current_pick: usize,
    /// Pool size at creation; fixes the per-team quota.
    pool_size: usize,
}

impl Draft {
    /// Start a draft over `pool` (expected best-first) for `teams` in pick order.
    pub fn new(pool: Vec<Player>, teams: Vec<Team>) -> Self {
        let pool_size = pool.len();
        Self { available: pool, picks: Vec::new(), teams, current_pick: 0, pool_size }
    }

    /// Fresh pool and cyclically named teams from `config`.
    pub fn generate(config: &LeagueConfig) -> Self {
        let pool = generate_players(config.num_draft_players, config.seed);
        Self::new(pool, generate_teams(config.num_teams))
    }

    pub fn available(&self) -> &[Player] {
        &self.available
    }

    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    #[cfg(test)]
    pub(crate) fn teams_mut(&mut self) -> &mut Vec<Team> {
        &mut self.teams
    }

    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }

    pub fn current_pick(&self) -> usize {
        self.current_pick
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn is_complete(&self) -> bool {
        self.available.is_empty() || self.current_pick >= self.picks_per_team() * self.teams.len()
    }

    /// Quota per team; the remainder of the pool is never drafted.
    pub fn picks_per_team(&self) -> usize {
        if self.teams.is_empty() {
            0
        } else {
            self.pool_size / self.teams.len()
        }
    }

    /// Move the player at `index` of the current pool to `team`.
    ///
    /// Returns `false` and leaves everything untouched when the pool is empty,
    /// `index` is outside the pool as it is right now, or `team` is not in
    /// this draft.
    pub fn draft_player(&mut self, team: TeamId, index: usize) -> bool {
        if self.available.is_empty() {
            warn!("Draft pool is empty, no more players to draft");
            return false;
        }

        if index >= self.available.len() {
            warn!(index, available = self.available.len(), "Invalid player index");
            return false;
        }

        let Some(slot) = self.teams.iter().position(|t| t.id == team) else {
            warn!(%team, "Team is not part of this draft");
            return false;
        };

        let candidate = self.available[index].clone();
        let player_id = candidate.id;
        if let Err(err) = self.teams[slot].add_player(candidate) {
            warn!(%err, "Pick rejected");
            return false;
        }
        let player = self.available.remove(index);

        self.current_pick += 1;
        let pick = DraftPick {
            number: self.current_pick,
            round: (self.current_pick - 1) / self.teams.len() + 1,
            team,
            player: player_id,
        };
        self.picks.push(pick);

        let drafted_by = &self.teams[slot];
        debug!(
            pick = pick.number,
            round = pick.round,
            "{} ({}) drafted by {}",
            player.name,
            player.position,
            drafted_by
        );
        true
    }

    /// Strict round-robin: every round each team, in list order, takes the
    /// best remaining player (pool index 0). Stops early if the pool runs dry.
    /// Returns the number of picks made.
    pub fn run_draft(&mut self) -> usize {
        let picks_per_team = self.picks_per_team();
        info!(teams = self.teams.len(), picks_per_team, pool = self.available.len(), "Starting draft");

        let team_order: Vec<TeamId> = self.teams.iter().map(|t| t.id).collect();
        let mut made = 0;

        'rounds: for _ in 0..picks_per_team {
            for &team in &team_order {
                if self.available.is_empty() {
                    info!("Draft concluded - no more players available");
                    break 'rounds;
                }
                if self.draft_player(team, 0) {
                    made += 1;
                }
            }
        }

        info!(picks = made, remaining = self.available.len(), "Draft complete");
        made
    }

    pub fn available_board(&self) -> Vec<BoardRow> {
        self.available
            .iter()
            .enumerate()
            .map(|(index, p)| BoardRow {
                index,
                name: p.name.clone(),
                position: p.position,
                speed: p.speed,
                strength: p.strength,
                skill: p.skill,
                overall: p.overall_rating(),
            })
            .collect()
    }

    /// Players drafted so far, in pick order.
    pub fn drafted_players(&self) -> Vec<&Player> {
        self.picks
            .iter()
            .filter_map(|pick| {
                self.teams
                    .iter()
                    .find(|t| t.id == pick.team)
                    .and_then(|t| t.get_player(pick.player))
            })
            .collect()
    }
}
