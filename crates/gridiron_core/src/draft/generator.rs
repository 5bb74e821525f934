//! Draft pool and team generation.

use crate::models::{Player, PlayerId, Position, Team, ATTRIBUTE_MIN};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Reverse;
use std::ops::RangeInclusive;
use tracing::warn;

/// Weighted position table. Common positions take two slots so uniform draws
/// skew towards a realistic depth chart.
pub const DRAFT_POSITIONS: [Position; 20] = [
    Position::QB,
    Position::RB,
    Position::WR,
    Position::WR,
    Position::TE,
    Position::C,
    Position::G,
    Position::G,
    Position::T,
    Position::T,
    Position::DE,
    Position::DE,
    Position::DT,
    Position::DT,
    Position::LB,
    Position::LB,
    Position::CB,
    Position::CB,
    Position::S,
    Position::S,
];

/// Generated attributes stop at 95, below [`ATTRIBUTE_MAX`](crate::models::ATTRIBUTE_MAX).
pub const GENERATED_ATTRIBUTE_MAX: u8 = 95;
pub const PROSPECT_AGE: RangeInclusive<u8> = 21..=24;
pub const PROSPECT_POTENTIAL: RangeInclusive<u8> = 60..=99;

/// Generate a seeded draft pool. See [`generate_players_with`].
pub fn generate_players(count: usize, seed: u64) -> Vec<Player> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_players_with(count, &mut rng)
}

/// Generate `count` prospects and order them best-first.
///
/// Players are named `Player 001`, `Player 002`, ... in generation order. The
/// result is sorted by descending overall rating with a stable sort, so equal
/// ratings keep generation order and index 0 is always the best prospect.
///
/// Ids are `u32`; generation stops once they run out, so every id is unique.
pub fn generate_players_with<R: Rng>(count: usize, rng: &mut R) -> Vec<Player> {
    let attribute_range = ATTRIBUTE_MIN..=GENERATED_ATTRIBUTE_MAX;

    let mut players: Vec<Player> = (0..count)
        .map_while(|i| {
            let id = player_id(i)?;
            let position = DRAFT_POSITIONS[rng.gen_range(0..DRAFT_POSITIONS.len())];
            let speed = rng.gen_range(attribute_range.clone());
            let strength = rng.gen_range(attribute_range.clone());
            let skill = rng.gen_range(attribute_range.clone());
            let age = rng.gen_range(PROSPECT_AGE);
            let potential = rng.gen_range(PROSPECT_POTENTIAL);

            Some(Player::new(
                id,
                format!("Player {:03}", i + 1),
                position,
                speed,
                strength,
                skill,
                age,
                potential,
            ))
        })
        .collect();

    if players.len() < count {
        warn!(requested = count, generated = players.len(), "Player id range exhausted");
    }

    players.sort_by_key(|p| Reverse(p.overall_rating()));
    players
}

fn player_id(index: usize) -> Option<PlayerId> {
    u32::try_from(index).ok().map(PlayerId)
}

/// `count` empty teams named from the franchise table, reused cyclically.
pub fn generate_teams(count: usize) -> Vec<Team> {
    (0..count).map(Team::from_name_table).collect()
}
