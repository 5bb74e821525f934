//! Season runner.
//!
//! Drives a [`Schedule`] through a [`GameSimulator`] week by week, fixture by
//! fixture, and folds every result into [`Standings`].

pub mod sim;
pub mod standings;

pub use sim::RatingWeightedSimulator;
pub use standings::{delta_for, Standings, StandingsDelta, TeamRecord};

use crate::error::{LeagueError, Result};
use crate::models::{Team, TeamId};
use crate::schedule::{Schedule, Week};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where a fixture sits in the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureContext {
    /// 1-based week number
    pub week: usize,
    /// Position of the fixture within its week
    pub slot: usize,
}

/// Final score of one game, keyed by team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub home: TeamId,
    pub away: TeamId,
    pub home_score: u32,
    pub away_score: u32,
}

impl GameResult {
    pub fn score_for(&self, team: TeamId) -> Option<u32> {
        if team == self.home {
            Some(self.home_score)
        } else if team == self.away {
            Some(self.away_score)
        } else {
            None
        }
    }

    pub fn is_tie(&self) -> bool {
        self.home_score == self.away_score
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(self.home),
            std::cmp::Ordering::Less => Some(self.away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        self.winner().map(|w| if w == self.home { self.away } else { self.home })
    }
}

/// Per-game scoring model.
///
/// Implementations receive the fixture's position so seeded models can derive
/// per-game randomness that does not depend on the order games are played in.
pub trait GameSimulator {
    fn simulate(&self, fixture: FixtureContext, home: &Team, away: &Team) -> GameResult;
}

impl<F> GameSimulator for F
where
    F: Fn(FixtureContext, &Team, &Team) -> GameResult,
{
    fn simulate(&self, fixture: FixtureContext, home: &Team, away: &Team) -> GameResult {
        self(fixture, home, away)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekResults {
    pub week: usize,
    pub games: Vec<GameResult>,
}

fn find_team(teams: &[Team], id: TeamId) -> Result<&Team> {
    teams.iter().find(|t| t.id == id).ok_or(LeagueError::UnknownTeam(id))
}

/// Play every fixture of `week` in schedule order. Standings are not touched.
pub fn run_week<S>(week: &Week, teams: &[Team], simulator: &S) -> Result<WeekResults>
where
    S: GameSimulator + ?Sized,
{
    let mut games = Vec::with_capacity(week.fixtures.len());
    for (slot, fixture) in week.fixtures.iter().enumerate() {
        let home = find_team(teams, fixture.home)?;
        let away = find_team(teams, fixture.away)?;

        let result =
            simulator.simulate(FixtureContext { week: week.number, slot }, home, away);
        debug!(
            week = week.number,
            "{} {} - {} {}",
            home.name,
            result.home_score,
            result.away_score,
            away.name
        );
        games.push(result);
    }
    Ok(WeekResults { week: week.number, games })
}

/// Play the whole schedule in order, then fold every result into
/// `standings`. On error `standings` is left untouched.
pub fn run_season<S>(
    schedule: &Schedule,
    teams: &[Team],
    simulator: &S,
    standings: &mut Standings,
) -> Result<Vec<WeekResults>>
where
    S: GameSimulator + ?Sized,
{
    info!(weeks = schedule.len(), "Starting season");

    let mut results = Vec::with_capacity(schedule.len());
    for week in schedule {
        results.push(run_week(week, teams, simulator)?);
    }

    // Only a fully played schedule reaches the table.
    for week_results in &results {
        for game in &week_results.games {
            standings.update(game);
        }
    }

    info!(games = results.iter().map(|w| w.games.len()).sum::<usize>(), "End of season");
    Ok(results)
}

/// Like [`run_season`], but simulates weeks concurrently.
///
/// Workers only compute each week's results and standings delta; the deltas
/// are merged into `standings` in week order once every week has finished,
/// so `standings` keeps a single writer.
pub fn run_season_parallel<S>(
    schedule: &Schedule,
    teams: &[Team],
    simulator: &S,
    standings: &mut Standings,
) -> Result<Vec<WeekResults>>
where
    S: GameSimulator + Sync + ?Sized,
{
    info!(weeks = schedule.len(), "Starting season (parallel weeks)");

    let outcomes = schedule
        .weeks()
        .par_iter()
        .map(|week| {
            let week_results = run_week(week, teams, simulator)?;
            let delta = delta_for(&week_results.games);
            Ok::<_, LeagueError>((week_results, delta))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::with_capacity(outcomes.len());
    for (week_results, delta) in outcomes {
        standings.apply(&delta);
        results.push(week_results);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{generate_teams, Draft};
    use std::cell::RefCell;

    fn fixed_score(_: FixtureContext, home: &Team, away: &Team) -> GameResult {
        GameResult { home: home.id, away: away.id, home_score: 14, away_score: 7 }
    }

    #[test]
    fn test_game_result_lookup_by_team() {
        let result = GameResult { home: TeamId(0), away: TeamId(1), home_score: 21, away_score: 14 };
        assert_eq!(result.score_for(TeamId(0)), Some(21));
        assert_eq!(result.score_for(TeamId(1)), Some(14));
        assert_eq!(result.score_for(TeamId(2)), None);
        assert_eq!(result.winner(), Some(TeamId(0)));
        assert_eq!(result.loser(), Some(TeamId(1)));

        let tie = GameResult { home_score: 10, away_score: 10, ..result };
        assert!(tie.is_tie());
        assert_eq!(tie.winner(), None);
        assert_eq!(tie.loser(), None);
    }

    #[test]
    fn test_fixtures_played_in_schedule_order() {
        let teams = generate_teams(4);
        let schedule = Schedule::for_teams(&teams, 3);
        let calls = RefCell::new(Vec::new());
        let recorder = |ctx: FixtureContext, home: &Team, away: &Team| {
            calls.borrow_mut().push((ctx.week, ctx.slot, home.id, away.id));
            fixed_score(ctx, home, away)
        };

        let mut standings = Standings::new(&teams);
        run_season(&schedule, &teams, &recorder, &mut standings).unwrap();

        let expected: Vec<(usize, usize, TeamId, TeamId)> = schedule
            .iter()
            .flat_map(|w| {
                w.fixtures.iter().enumerate().map(move |(slot, f)| (w.number, slot, f.home, f.away))
            })
            .collect();
        assert_eq!(calls.into_inner(), expected);
    }

    #[test]
    fn test_two_team_season_with_fixed_scores() {
        let mut draft = Draft::new(crate::draft::generate_players(20, 8), generate_teams(2));
        draft.run_draft();
        let teams = draft.into_teams();

        let schedule = Schedule::for_teams(&teams, 3);
        let mut standings = Standings::new(&teams);
        let results = run_season(&schedule, &teams, &fixed_score, &mut standings).unwrap();

        assert_eq!(results.len(), 3);
        // Two teams never rotate: team 0 hosts all three weeks.
        assert_eq!(standings.record(TeamId(0)), Some(TeamRecord { wins: 3, losses: 0 }));
        assert_eq!(standings.record(TeamId(1)), Some(TeamRecord { wins: 0, losses: 3 }));
    }

    #[test]
    fn test_home_wins_track_home_weeks() {
        let teams = generate_teams(5);
        let schedule = Schedule::for_teams(&teams, 4);
        let mut standings = Standings::new(&teams);
        run_season(&schedule, &teams, &fixed_score, &mut standings).unwrap();

        for team in &teams {
            let games = schedule.fixtures_for(team.id);
            let home = games.iter().filter(|(_, f)| f.home == team.id).count() as u32;
            let away = games.len() as u32 - home;
            assert_eq!(standings.record(team.id), Some(TeamRecord { wins: home, losses: away }));
        }
    }

    #[test]
    fn test_failure_in_a_later_week_leaves_standings_untouched() {
        let league = generate_teams(3);
        // Week 1 is 0 v 2 (team 1 has the bye), week 2 is 2 v 1.
        let schedule = Schedule::for_teams(&league, 2);
        let without_team_1 = vec![league[0].clone(), league[2].clone()];
        let mut standings = Standings::new(&league);

        let err =
            run_season(&schedule, &without_team_1, &fixed_score, &mut standings).unwrap_err();

        assert!(matches!(err, LeagueError::UnknownTeam(TeamId(1))));
        assert_eq!(standings, Standings::new(&league));
    }

    #[test]
    fn test_unknown_team_in_schedule_is_an_error() {
        let teams = generate_teams(2);
        let schedule = Schedule::round_robin(&[TeamId(0), TeamId(9)], 1);
        let mut standings = Standings::new(&teams);

        let err = run_season(&schedule, &teams, &fixed_score, &mut standings).unwrap_err();
        assert!(matches!(err, LeagueError::UnknownTeam(TeamId(9))));
        assert_eq!(standings.record(TeamId(0)), Some(TeamRecord::default()));
    }

    #[test]
    fn test_parallel_season_matches_sequential() {
        let mut draft = Draft::new(crate::draft::generate_players(60, 21), generate_teams(6));
        draft.run_draft();
        let teams = draft.into_teams();
        let schedule = Schedule::for_teams(&teams, 10);
        let simulator = RatingWeightedSimulator::new(5);

        let mut sequential = Standings::new(&teams);
        let seq_results = run_season(&schedule, &teams, &simulator, &mut sequential).unwrap();

        let mut parallel = Standings::new(&teams);
        let par_results =
            run_season_parallel(&schedule, &teams, &simulator, &mut parallel).unwrap();

        assert_eq!(seq_results, par_results);
        assert_eq!(sequential, parallel);
    }
}
