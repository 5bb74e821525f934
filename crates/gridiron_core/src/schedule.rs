//! Round-robin fixture generation by list rotation.
//!
//! The working order is split in half each week (`home[i]` vs `away[i]`),
//! then rotated by moving the element at index 1 to the end while index 0
//! stays anchored. Weeks are generated for as long as requested: a full
//! cycle is not enforced, so long seasons repeat pairings and a two-team
//! league plays the same fixture every week.

use crate::models::{Team, TeamId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Fixture {
    pub home: TeamId,
    pub away: TeamId,
}

impl Fixture {
    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if self.home == team {
            Some(self.away)
        } else if self.away == team {
            Some(self.home)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Week {
    /// 1-based
    pub number: usize,
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Schedule {
    weeks: Vec<Week>,
}

impl Schedule {
    pub fn for_teams(teams: &[Team], num_weeks: usize) -> Self {
        let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
        Self::round_robin(&ids, num_weeks)
    }

    /// `num_weeks` weeks of fixtures for `teams`, in the given order.
    ///
    /// An odd team count gets a bye slot (`None`) appended; pairings against
    /// it are dropped from the emitted week.
    pub fn round_robin(teams: &[TeamId], num_weeks: usize) -> Self {
        let mut order: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
        if order.len() % 2 == 1 {
            order.push(None);
        }
        let half = order.len() / 2;

        let mut weeks = Vec::with_capacity(num_weeks);
        for number in 1..=num_weeks {
            let (home, away) = order.split_at(half);
            let fixtures = home
                .iter()
                .zip(away)
                .filter_map(|(home, away)| Some(Fixture { home: (*home)?, away: (*away)? }))
                .collect();
            weeks.push(Week { number, fixtures });

            if order.len() > 2 {
                let moved = order.remove(1);
                order.push(moved);
            }
        }

        Self { weeks }
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Week by 1-based number.
    pub fn week(&self, number: usize) -> Option<&Week> {
        number.checked_sub(1).and_then(|idx| self.weeks.get(idx))
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Week> {
        self.weeks.iter()
    }

    pub fn total_fixtures(&self) -> usize {
        self.weeks.iter().map(|w| w.fixtures.len()).sum()
    }

    /// `(week number, fixture)` for every game `team` plays.
    pub fn fixtures_for(&self, team: TeamId) -> Vec<(usize, Fixture)> {
        self.weeks
            .iter()
            .flat_map(move |w| {
                w.fixtures.iter().filter(move |f| f.involves(team)).map(move |f| (w.number, *f))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Week;
    type IntoIter = std::slice::Iter<'a, Week>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
