//! Gridiron CLI
//!
//! Runs a league from the command line: new game, automated draft, full
//! season with the reference simulator. Also prints draft boards and the
//! standings stored in a snapshot.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gridiron_core::config::DEFAULT_SAVE_DIR;
use gridiron_core::draft::{generate_players, BoardRow};
use gridiron_core::{
    Draft, GameSession, LeagueConfig, RatingWeightedSimulator, SaveManager, WeekResults,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "Draft, schedule and simulate a football league", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game, run the draft and play the whole season
    Play(PlayArgs),

    /// Print the generated draft board
    Board {
        /// Number of prospects
        #[arg(long, default_value_t = gridiron_core::config::DEFAULT_DRAFT_PLAYERS)]
        players: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Also write the board as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show the standings stored in a save file
    Standings {
        /// Save file name inside the save directory
        #[arg(long)]
        save: String,

        #[arg(long, default_value = DEFAULT_SAVE_DIR)]
        save_dir: PathBuf,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    /// YAML or JSON league config (falls back to $GRIDIRON_CONFIG_PATH)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    players: Option<usize>,

    #[arg(long)]
    teams: Option<usize>,

    #[arg(long)]
    weeks: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Save the finished session under this file name
    #[arg(long)]
    save: Option<String>,

    /// Print a JSON report instead of text
    #[arg(long, default_value = "false")]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(&args)?,
        Commands::Board { players, seed, csv } => {
            let draft = Draft::new(generate_players(players, seed), Vec::new());
            let board = draft.available_board();
            print_board(&board);

            if let Some(path) = csv {
                write_board_csv(&path, &board)?;
                println!("\nBoard written to: {}", path.display());
            }
        }
        Commands::Standings { save, save_dir } => {
            let store = SaveManager::new(save_dir);
            let session = GameSession::load_game(&store, &save)
                .with_context(|| format!("Failed to load save {}", save))?;

            println!(
                "Phase: {}  Season {}  Week {}/{}",
                session.phase(),
                session.current_season(),
                session.current_week(),
                session.schedule().len()
            );
            print!("{}", session.standings().format_table(session.teams()));
        }
    }

    Ok(())
}

fn play(args: &PlayArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let seed = config.seed;
    let save_dir = config.save_dir.clone();

    let mut session = GameSession::new();
    session.start_new_game(config)?;
    session.run_draft_phase()?;
    session.play_remaining_season(&RatingWeightedSimulator::new(seed))?;

    if args.json {
        let report = SeasonReport::from_session(&session);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_rosters(&session);
        print_results(&session);
        println!("\n--- Final Standings ---");
        print!("{}", session.standings().format_table(session.teams()));
    }

    if let Some(filename) = &args.save {
        let store = SaveManager::new(save_dir);
        session
            .save_game(&store, filename)
            .with_context(|| format!("Failed to save game to {}", filename))?;
        info!("Saved to {}", store.save_dir().join(filename).display());
    }

    Ok(())
}

/// Config file (flag, then environment), then flag overrides.
fn resolve_config(args: &PlayArgs) -> Result<LeagueConfig> {
    let mut config = match &args.config {
        Some(path) => LeagueConfig::from_path(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => LeagueConfig::from_env()?.unwrap_or_default(),
    };

    if let Some(players) = args.players {
        config.num_draft_players = players;
    }
    if let Some(teams) = args.teams {
        config.num_teams = teams;
    }
    if let Some(weeks) = args.weeks {
        config.season_weeks = weeks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    config.check()?;
    Ok(config)
}

fn print_board(board: &[BoardRow]) {
    println!("--- Draft Board ---");
    for row in board {
        println!(
            "{:>3}. {:<12} {:<3} Spd: {:>2}, Str: {:>2}, Skl: {:>2}  Ovr: {:>2}",
            row.index + 1,
            row.name,
            row.position,
            row.speed,
            row.strength,
            row.skill,
            row.overall
        );
    }
}

fn write_board_csv(path: &Path, board: &[BoardRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for row in board {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_rosters(session: &GameSession) {
    println!("--- Draft Results ---");
    for team in session.teams() {
        println!("\n{} Roster:", team);
        for player in &team.roster {
            println!("  - {} ({}) - Ovr: {}", player.name, player.position, player.overall_rating());
        }
    }
}

fn print_results(session: &GameSession) {
    let teams = session.teams();
    let name = |id| teams.iter().find(|t| t.id == id).map(|t| t.name.as_str()).unwrap_or("?");

    for week in session.results() {
        println!("\n-- Week {} --", week.week);
        for game in &week.games {
            println!(
                "{} {} - {} {}",
                name(game.home),
                game.home_score,
                game.away_score,
                name(game.away)
            );
        }
    }
}

#[derive(Serialize)]
struct TeamLine {
    name: String,
    abbreviation: String,
    roster_size: usize,
    average_overall: Option<f32>,
    wins: u32,
    losses: u32,
}

#[derive(Serialize)]
struct SeasonReport<'a> {
    season: u32,
    phase: String,
    standings: Vec<TeamLine>,
    weeks: &'a [WeekResults],
}

impl<'a> SeasonReport<'a> {
    fn from_session(session: &'a GameSession) -> Self {
        let standings = session
            .standings()
            .ranked()
            .into_iter()
            .filter_map(|(id, record)| {
                let team = session.teams().iter().find(|t| t.id == id)?;
                let summary = team.roster_summary();
                Some(TeamLine {
                    name: team.name.clone(),
                    abbreviation: team.abbreviation.clone(),
                    roster_size: summary.size,
                    average_overall: summary.average_overall,
                    wins: record.wins,
                    losses: record.losses,
                })
            })
            .collect();

        Self {
            season: session.current_season(),
            phase: session.phase().to_string(),
            standings,
            weeks: session.results(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("league.yaml");
        std::fs::write(&path, "num_teams: 4\nseason_weeks: 6\nseed: 3\n").unwrap();

        let args = PlayArgs {
            config: Some(path),
            teams: Some(6),
            seed: Some(10),
            ..PlayArgs::default()
        };
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.num_teams, 6);
        assert_eq!(config.season_weeks, 6);
        assert_eq!(config.seed, 10);
        assert_eq!(config.num_draft_players, 20);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("league.json");
        std::fs::write(&path, r#"{"num_teams": 2}"#).unwrap();

        let args = PlayArgs { config: Some(path), weeks: Some(0), ..PlayArgs::default() };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_board_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.csv");
        let board = Draft::new(generate_players(5, 1), Vec::new()).available_board();

        write_board_csv(&path, &board).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("index,name,position,speed,strength,skill,overall"));
        assert_eq!(lines.count(), 5);
    }

    #[test]
    fn test_report_lists_ranked_teams() {
        let mut session = GameSession::new();
        session.start_new_game(LeagueConfig { num_teams: 3, ..LeagueConfig::default() }).unwrap();
        session.run_draft_phase().unwrap();
        session.play_remaining_season(&RatingWeightedSimulator::new(4)).unwrap();

        let report = SeasonReport::from_session(&session);
        assert_eq!(report.standings.len(), 3);
        assert_eq!(report.weeks.len(), 3);
        assert_eq!(report.phase, "END_GAME");
        assert!(report.standings.windows(2).all(|w| w[0].wins >= w[1].wins));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["standings"][0]["roster_size"], 6);
    }
}
