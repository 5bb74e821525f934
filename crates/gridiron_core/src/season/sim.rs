//! Reference scoring model.

use super::{FixtureContext, GameResult, GameSimulator};
use crate::models::{Team, ATTRIBUTE_MAX, ATTRIBUTE_MIN};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_DRIVES_PER_TEAM: u32 = 11;
/// Rating assumed for a team with an empty roster.
pub const BASELINE_RATING: f32 = 60.0;

const TOUCHDOWN: u32 = 7;
const FIELD_GOAL: u32 = 3;
const FIELD_GOAL_CHANCE: f64 = 0.15;

/// Drive-by-drive scoring weighted by average roster rating.
///
/// Every game gets its own ChaCha8 stream derived from the seed and the
/// fixture's (week, slot), so results do not depend on play order.
#[derive(Debug, Clone)]
pub struct RatingWeightedSimulator {
    seed: u64,
    drives_per_team: u32,
}

impl RatingWeightedSimulator {
    pub fn new(seed: u64) -> Self {
        Self { seed, drives_per_team: DEFAULT_DRIVES_PER_TEAM }
    }

    pub fn with_drives(mut self, drives_per_team: u32) -> Self {
        self.drives_per_team = drives_per_team;
        self
    }

    fn rng_for(&self, fixture: FixtureContext) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(((fixture.week as u64) << 32) | fixture.slot as u64);
        rng
    }

    fn touchdown_chance(own: f32, opponent: f32) -> f64 {
        let span = (ATTRIBUTE_MAX - ATTRIBUTE_MIN) as f32;
        let quality = ((own - ATTRIBUTE_MIN as f32) / span).clamp(0.0, 1.0);
        let edge = (own - opponent) / 100.0;
        (0.20 + 0.10 * quality as f64 + 0.5 * edge as f64).clamp(0.05, 0.45)
    }

    fn drive_points<R: Rng>(rng: &mut R, touchdown_chance: f64) -> u32 {
        let roll: f64 = rng.gen();
        if roll < touchdown_chance {
            TOUCHDOWN
        } else if roll < touchdown_chance + FIELD_GOAL_CHANCE {
            FIELD_GOAL
        } else {
            0
        }
    }
}

fn team_rating(team: &Team) -> f32 {
    team.roster_summary().average_overall.unwrap_or(BASELINE_RATING)
}

impl GameSimulator for RatingWeightedSimulator {
    fn simulate(&self, fixture: FixtureContext, home: &Team, away: &Team) -> GameResult {
        let mut rng = self.rng_for(fixture);
        let (home_rating, away_rating) = (team_rating(home), team_rating(away));
        let home_chance = Self::touchdown_chance(home_rating, away_rating);
        let away_chance = Self::touchdown_chance(away_rating, home_rating);

        let mut home_score = 0;
        let mut away_score = 0;
        // Alternate possessions, home receives first.
        for _ in 0..self.drives_per_team {
            home_score += Self::drive_points(&mut rng, home_chance);
            away_score += Self::drive_points(&mut rng, away_chance);
        }

        GameResult { home: home.id, away: away.id, home_score, away_score }
    }
}
