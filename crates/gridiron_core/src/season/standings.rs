use super::GameResult;
use crate::models::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub fn games_decided(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Win/loss changes produced by a batch of games, merged later with
/// [`Standings::apply`].
pub type StandingsDelta = BTreeMap<TeamId, TeamRecord>;

/// Win/loss table, in the league's team order.
///
/// Ties are not recorded: a tied game changes neither team's counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standings {
    entries: Vec<(TeamId, TeamRecord)>,
}

impl Standings {
    pub fn new(teams: &[Team]) -> Self {
        Self::from_ids(teams.iter().map(|t| t.id))
    }

    pub fn from_ids(ids: impl IntoIterator<Item = TeamId>) -> Self {
        Self { entries: ids.into_iter().map(|id| (id, TeamRecord::default())).collect() }
    }

    pub fn record(&self, team: TeamId) -> Option<TeamRecord> {
        self.entries.iter().find(|(id, _)| *id == team).map(|(_, record)| *record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record one concluded game. The strictly higher score wins.
    pub fn update(&mut self, result: &GameResult) {
        self.apply(&delta_for(std::slice::from_ref(result)));
    }

    pub fn apply(&mut self, delta: &StandingsDelta) {
        for (team, change) in delta {
            match self.entries.iter_mut().find(|(id, _)| id == team) {
                Some((_, record)) => {
                    record.wins += change.wins;
                    record.losses += change.losses;
                }
                None => warn!(%team, "Result for a team outside the standings ignored"),
            }
        }
    }

    /// Teams by descending wins. Equal win counts keep league order; losses
    /// and point differential are not used as tiebreakers.
    pub fn ranked(&self) -> Vec<(TeamId, TeamRecord)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.wins.cmp(&a.1.wins));
        ranked
    }

    /// `name: W W - L L` lines in ranked order.
    pub fn format_table(&self, teams: &[Team]) -> String {
        let mut out = String::new();
        for (id, record) in self.ranked() {
            let name = teams.iter().find(|t| t.id == id).map(|t| t.name.as_str()).unwrap_or("?");
            let _ = writeln!(out, "{:<10}: {} W - {} L", name, record.wins, record.losses);
        }
        out
    }
}

/// Standings changes for `games`, computed without touching any table.
pub fn delta_for(games: &[GameResult]) -> StandingsDelta {
    let mut delta = StandingsDelta::new();
    for game in games {
        if let (Some(winner), Some(loser)) = (game.winner(), game.loser()) {
            delta.entry(winner).or_default().wins += 1;
            delta.entry(loser).or_default().losses += 1;
        }
    }
    delta
}
