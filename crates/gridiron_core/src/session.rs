//! Game session context.
//!
//! A [`GameSession`] owns everything a running league needs: configuration,
//! the draft (and through it the teams), the schedule, the standings and the
//! results log. Callers pass it around explicitly; there is no global game
//! state. The phase enum mirrors the shell's menus, but nothing here reads
//! input.

use crate::config::LeagueConfig;
use crate::draft::Draft;
use crate::error::{LeagueError, Result};
use crate::models::{Team, TeamId};
use crate::save::{GameSave, SnapshotStore};
use crate::schedule::Schedule;
use crate::season::{run_week, GameSimulator, Standings, WeekResults};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    #[default]
    MainMenu,
    Draft,
    Season,
    EndGame,
    Exiting,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::MainMenu => "MAIN_MENU",
            SessionPhase::Draft => "DRAFT",
            SessionPhase::Season => "SEASON",
            SessionPhase::EndGame => "END_GAME",
            SessionPhase::Exiting => "EXITING",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    phase: SessionPhase,
    config: LeagueConfig,
    draft: Option<Draft>,
    schedule: Schedule,
    /// Absent from version 0 snapshots; rebuilt on migration.
    #[serde(default)]
    standings: Standings,
    results: Vec<WeekResults>,
    user_team: Option<TeamId>,
    /// 0 until a game is started
    current_season: u32,
    /// Weeks played so far this season
    current_week: usize,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.draft.as_mut()
    }

    /// League teams in pick order; empty before a game is started.
    pub fn teams(&self) -> &[Team] {
        self.draft.as_ref().map(Draft::teams).unwrap_or(&[])
    }

    pub fn user_team(&self) -> Option<&Team> {
        let id = self.user_team?;
        self.teams().iter().find(|t| t.id == id)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn results(&self) -> &[WeekResults] {
        &self.results
    }

    pub fn current_season(&self) -> u32 {
        self.current_season
    }

    pub fn current_week(&self) -> usize {
        self.current_week
    }

    /// True once a schedule exists and every week of it has been played.
    pub fn is_season_over(&self) -> bool {
        !self.schedule.is_empty() && self.current_week >= self.schedule.len()
    }

    pub fn is_running(&self) -> bool {
        self.phase != SessionPhase::Exiting
    }

    /// Fresh teams, pool and draft from `config`; the user gets the first team.
    ///
    /// An invalid config is rejected before anything changes.
    pub fn start_new_game(&mut self, config: LeagueConfig) -> Result<()> {
        if self.phase == SessionPhase::Exiting {
            return Err(LeagueError::InvalidPhase {
                expected: SessionPhase::MainMenu,
                found: self.phase,
            });
        }
        config.check()?;

        info!(
            players = config.num_draft_players,
            teams = config.num_teams,
            seed = config.seed,
            "Starting a new game"
        );

        let draft = Draft::generate(&config);
        self.user_team = draft.teams().first().map(|t| t.id);
        self.draft = Some(draft);
        self.config = config;
        self.schedule = Schedule::default();
        self.standings = Standings::default();
        self.results.clear();
        self.current_season = 1;
        self.current_week = 0;
        self.set_phase(SessionPhase::Draft);
        Ok(())
    }

    /// Run the automated draft, build the season schedule and reset the
    /// standings. Returns the number of picks made.
    pub fn run_draft_phase(&mut self) -> Result<usize> {
        self.expect_phase(SessionPhase::Draft)?;
        let draft = self.draft.as_mut().ok_or(LeagueError::DraftNotInitialized)?;

        let picks = draft.run_draft();
        for team in draft.teams() {
            let summary = team.roster_summary();
            debug!(
                team = %team,
                size = summary.size,
                average = ?summary.average_overall,
                "Draft results"
            );
        }

        self.schedule = Schedule::for_teams(draft.teams(), self.config.season_weeks);
        self.standings = Standings::new(draft.teams());
        self.results.clear();
        self.current_week = 0;
        self.set_phase(SessionPhase::Season);
        Ok(picks)
    }

    /// Play the next scheduled week and fold it into the standings.
    ///
    /// Outside [`SessionPhase::Season`] this fails with
    /// [`LeagueError::NotInSeason`] and changes nothing. After the last
    /// scheduled week the phase moves to [`SessionPhase::EndGame`].
    pub fn advance_week<S>(&mut self, simulator: &S) -> Result<&WeekResults>
    where
        S: GameSimulator + ?Sized,
    {
        if self.phase != SessionPhase::Season {
            warn!(phase = %self.phase, "Can only advance week during season");
            return Err(LeagueError::NotInSeason { found: self.phase });
        }

        let draft = self.draft.as_ref().ok_or(LeagueError::DraftNotInitialized)?;
        let next = self.current_week + 1;
        let week = self
            .schedule
            .week(next)
            .ok_or(LeagueError::NotInSeason { found: SessionPhase::EndGame })?;

        let week_results = run_week(week, draft.teams(), simulator)?;

        for game in &week_results.games {
            self.standings.update(game);
        }
        self.current_week = next;
        info!(week = self.current_week, season = self.current_season, "Advanced week");

        self.results.push(week_results);
        if self.is_season_over() {
            info!(season = self.current_season, "Season ended");
            self.set_phase(SessionPhase::EndGame);
        }

        Ok(&self.results[self.results.len() - 1])
    }

    /// Advance until the season ends. Returns the weeks played by this call.
    pub fn play_remaining_season<S>(&mut self, simulator: &S) -> Result<&[WeekResults]>
    where
        S: GameSimulator + ?Sized,
    {
        self.expect_phase(SessionPhase::Season)?;
        let start = self.results.len();
        while self.phase == SessionPhase::Season {
            self.advance_week(simulator)?;
        }
        Ok(&self.results[start..])
    }

    /// Back to the season from the main menu, if one is still in progress.
    pub fn continue_season(&mut self) -> Result<()> {
        self.expect_phase(SessionPhase::MainMenu)?;
        if self.current_season == 0 || self.schedule.is_empty() || self.is_season_over() {
            return Err(LeagueError::NoActiveSeason);
        }
        self.set_phase(SessionPhase::Season);
        Ok(())
    }

    pub fn return_to_menu(&mut self) {
        if self.phase != SessionPhase::Exiting {
            self.set_phase(SessionPhase::MainMenu);
        }
    }

    pub fn exit(&mut self) {
        self.set_phase(SessionPhase::Exiting);
    }

    /// Snapshot the whole session under `filename`.
    pub fn save_game<St>(&self, store: &St, filename: &str) -> Result<()>
    where
        St: SnapshotStore + ?Sized,
    {
        store.save(filename, &GameSave::new(self.clone()))?;
        info!(filename, phase = %self.phase, "Game saved");
        Ok(())
    }

    /// Restore a session saved with [`GameSession::save_game`], phase included.
    pub fn load_game<St>(store: &St, filename: &str) -> Result<Self>
    where
        St: SnapshotStore + ?Sized,
    {
        let save = store.load(filename)?;
        save.validate()?;
        info!(filename, phase = %save.session.phase, "Game loaded");
        Ok(save.session)
    }

    pub(crate) fn restore_standings(&mut self, standings: Standings) {
        self.standings = standings;
    }

    pub(crate) fn set_current_week(&mut self, week: usize) {
        self.current_week = week;
    }

    fn expect_phase(&self, expected: SessionPhase) -> Result<()> {
        if self.phase != expected {
            return Err(LeagueError::InvalidPhase { expected, found: self.phase });
        }
        Ok(())
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            info!(from = %self.phase, to = %phase, "Phase change");
            self.phase = phase;
        }
    }
}
