//! End-to-end league runs through the public API.
//!
//! Covers the default demo league (20 players, 2 teams, 3 weeks) with a fixed
//! scoring stub, snapshot persistence on disk, and the draft partition
//! property over random league sizes.

use gridiron_core::draft::{generate_players, generate_teams};
use gridiron_core::save::DEFAULT_SAVE_FILE;
use gridiron_core::season::FixtureContext;
use gridiron_core::{
    Draft, GameResult, GameSession, LeagueConfig, PlayerId, RatingWeightedSimulator, SaveManager,
    Schedule, SessionPhase, Team, TeamId, TeamRecord,
};
use proptest::prelude::*;
use std::collections::HashSet;
use tempfile::TempDir;

fn home_14_away_7(_: FixtureContext, home: &Team, away: &Team) -> GameResult {
    GameResult { home: home.id, away: away.id, home_score: 14, away_score: 7 }
}

#[test]
fn test_demo_league_with_fixed_scores() {
    let mut session = GameSession::new();
    session.start_new_game(LeagueConfig::default()).unwrap();

    let picks = session.run_draft_phase().unwrap();
    assert_eq!(picks, 20);
    for team in session.teams() {
        assert_eq!(team.roster.len(), 10);
        assert!(team.roster.iter().all(|p| p.team() == Some(team.id)));
    }

    // The top prospect goes first overall to the first team.
    let draft = session.draft().unwrap();
    assert_eq!(draft.picks()[0].team, TeamId(0));
    assert_eq!(session.teams()[0].roster[0].id, draft.picks()[0].player);

    session.play_remaining_season(&home_14_away_7).unwrap();

    assert_eq!(session.phase(), SessionPhase::EndGame);
    assert_eq!(session.results().len(), 3);
    assert_eq!(session.standings().record(TeamId(0)), Some(TeamRecord { wins: 3, losses: 0 }));
    assert_eq!(session.standings().record(TeamId(1)), Some(TeamRecord { wins: 0, losses: 3 }));

    let table = session.standings().format_table(session.teams());
    assert_eq!(table, "Hawks     : 3 W - 0 L\nSharks    : 0 W - 3 L\n");
}

#[test]
fn test_snapshot_survives_disk_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = SaveManager::new(temp_dir.path().join("saves"));

    let mut session = GameSession::new();
    let config = LeagueConfig { num_teams: 4, seed: 11, ..LeagueConfig::default() };
    session.start_new_game(config).unwrap();
    session.run_draft_phase().unwrap();
    session.advance_week(&home_14_away_7).unwrap();
    session.save_game(&store, DEFAULT_SAVE_FILE).unwrap();

    let loaded = GameSession::load_game(&store, DEFAULT_SAVE_FILE).unwrap();
    assert_eq!(loaded.phase(), SessionPhase::Season);
    assert_eq!(loaded.current_week(), 1);
    assert_eq!(loaded.schedule(), session.schedule());
    assert_eq!(loaded.standings(), session.standings());
    assert_eq!(loaded.results(), session.results());

    let saves = store.list_saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].team_count, 4);
}

#[test]
fn test_corrupted_snapshot_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = SaveManager::new(temp_dir.path());

    let mut session = GameSession::new();
    session.start_new_game(LeagueConfig::default()).unwrap();
    session.save_game(&store, "draft.dat").unwrap();

    let path = temp_dir.path().join("draft.dat");
    let mut bytes = std::fs::read(&path).unwrap();
    bytes[6] ^= 0xff;
    std::fs::write(&path, bytes).unwrap();

    let err = GameSession::load_game(&store, "draft.dat").unwrap_err();
    assert!(!err.is_recoverable());
}

#[test]
fn test_same_seed_same_league() {
    let run = || {
        let mut session = GameSession::new();
        let config = LeagueConfig {
            num_draft_players: 50,
            num_teams: 6,
            season_weeks: 5,
            seed: 99,
            ..LeagueConfig::default()
        };
        session.start_new_game(config).unwrap();
        session.run_draft_phase().unwrap();
        session.play_remaining_season(&RatingWeightedSimulator::new(99)).unwrap();
        session
    };

    let (a, b) = (run(), run());
    assert_eq!(a.draft().unwrap().picks(), b.draft().unwrap().picks());
    assert_eq!(a.results(), b.results());
    assert_eq!(a.standings(), b.standings());
}

proptest! {
    #[test]
    fn prop_draft_partitions_the_pool(
        players in 0usize..120,
        teams in 0usize..12,
        seed in any::<u64>(),
    ) {
        let pool = generate_players(players, seed);
        let original: HashSet<PlayerId> = pool.iter().map(|p| p.id).collect();

        let mut draft = Draft::new(pool, generate_teams(teams));
        let made = draft.run_draft();

        let expected = if teams == 0 { 0 } else { (players / teams) * teams };
        prop_assert_eq!(made, expected);

        let mut seen: HashSet<PlayerId> = draft.available().iter().map(|p| p.id).collect();
        for team in draft.teams() {
            for player in &team.roster {
                prop_assert!(seen.insert(player.id), "player {} appears twice", player.id);
                prop_assert_eq!(player.team(), Some(team.id));
            }
        }
        prop_assert_eq!(seen, original);
    }

    #[test]
    fn prop_schedule_weeks_are_valid(teams in 0usize..17, weeks in 0usize..30) {
        let league = generate_teams(teams);
        let schedule = Schedule::for_teams(&league, weeks);
        prop_assert_eq!(schedule.len(), weeks);

        for week in &schedule {
            let mut playing = HashSet::new();
            for fixture in &week.fixtures {
                prop_assert!(fixture.home != fixture.away);
                prop_assert!(fixture.home.0 < teams && fixture.away.0 < teams);
                prop_assert!(playing.insert(fixture.home));
                prop_assert!(playing.insert(fixture.away));
            }
            prop_assert_eq!(week.fixtures.len(), teams / 2);
        }
    }
}
