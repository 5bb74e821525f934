use super::team::TeamId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest value a primary attribute can take.
pub const ATTRIBUTE_MIN: u8 = 50;
/// Highest value a primary attribute can take.
pub const ATTRIBUTE_MAX: u8 = 99;

/// Stable identity of a generated player (its 0-based generation sequence number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Draft prospect / rostered player.
///
/// Everything except the team back-reference is fixed at generation time.
/// The back-reference is a lookup-only [`TeamId`] set exactly once by
/// [`Team::add_player`](super::team::Team::add_player).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub speed: u8,
    pub strength: u8,
    pub skill: u8,
    pub age: u8,
    /// Hidden development ceiling. Stored, never read by the draft.
    pub potential: u8,
    #[serde(default)]
    team: Option<TeamId>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        position: Position,
        speed: u8,
        strength: u8,
        skill: u8,
        age: u8,
        potential: u8,
    ) -> Self {
        Self { id, name: name.into(), position, speed, strength, skill, age, potential, team: None }
    }

    /// Overall rating used for pool ordering.
    ///
    /// Line positions are strength-weighted: `(str + str + skl) / 3`.
    /// Every other position averages all three primary attributes. Both round down.
    pub fn overall_rating(&self) -> u8 {
        let (a, b, c) = if self.position.is_line() {
            (self.strength, self.strength, self.skill)
        } else {
            (self.speed, self.strength, self.skill)
        };
        ((a as u16 + b as u16 + c as u16) / 3) as u8
    }

    /// Owning team, if drafted.
    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    pub fn is_drafted(&self) -> bool {
        self.team.is_some()
    }

    pub(crate) fn assign_team(&mut self, team: TeamId) {
        debug_assert!(self.team.is_none(), "player {} already belongs to a team", self.id);
        self.team = Some(team);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Spd: {}, Str: {}, Skl: {}",
            self.name, self.position, self.speed, self.strength, self.skill
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    C,
    G,
    T,
    DE,
    DT,
    LB,
    CB,
    S,
}

impl Position {
    pub const ALL: [Position; 12] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::C,
        Position::G,
        Position::T,
        Position::DE,
        Position::DT,
        Position::LB,
        Position::CB,
        Position::S,
    ];

    /// Offensive line (center, guard, tackle).
    pub fn is_line(&self) -> bool {
        matches!(self, Position::C | Position::G | Position::T)
    }

    pub fn is_offense(&self) -> bool {
        matches!(
            self,
            Position::QB
                | Position::RB
                | Position::WR
                | Position::TE
                | Position::C
                | Position::G
                | Position::T
        )
    }

    pub fn is_defense(&self) -> bool {
        !self.is_offense()
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::C => "C",
            Position::G => "G",
            Position::T => "T",
            Position::DE => "DE",
            Position::DT => "DT",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::S => "S",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.abbreviation())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.abbreviation() == code)
            .ok_or_else(|| format!("Unknown position: {}", s))
    }
}
