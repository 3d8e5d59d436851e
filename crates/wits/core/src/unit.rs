//! Team, unit class and race enumerations plus the frozen per-class tables.

use crate::codec::EnumCodec;
use crate::enum_codec_serde;

// ============================================================================
// Team
// ============================================================================

/// Team relative to the recording player.
///
/// Colors double as roles: RED is the player themself, BLUE the opponent,
/// GOLD the ally and GREEN the second opponent in duos matches.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Team {
    #[default]
    #[strum(to_string = "UNKNOWN")]
    Unknown = 0,
    #[strum(to_string = "RED", serialize = "SELF")]
    Red = 1,
    #[strum(to_string = "BLUE", serialize = "ENEMY")]
    Blue = 2,
    #[strum(to_string = "GOLD", serialize = "ALLY")]
    Gold = 3,
    #[strum(to_string = "GREEN", serialize = "ENEMY2")]
    Green = 4,
}

impl Team {
    /// Slot in team-indexed lists: self(0), enemy(1), ally(2), enemy2(3).
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Unknown => None,
            Self::Red => Some(0),
            Self::Blue => Some(1),
            Self::Gold => Some(2),
            Self::Green => Some(3),
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Blue),
            2 => Some(Self::Gold),
            3 => Some(Self::Green),
            _ => None,
        }
    }

    /// Only present in four-player matches.
    pub const fn is_duos(self) -> bool {
        matches!(self, Self::Gold | Self::Green)
    }
}

impl EnumCodec for Team {
    const KIND: &'static str = "team";

    fn from_int(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_repr)
    }

    fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    fn name(self) -> &'static str {
        self.into()
    }
}

enum_codec_serde!(Team);

// ============================================================================
// Unit Class
// ============================================================================

/// Canonical unit class. Race-specific specials all collapse to `Special`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum UnitClass {
    #[default]
    Unknown = 0,
    Runner = 1,
    Soldier = 2,
    Medic = 3,
    Sniper = 4,
    Heavy = 5,
    Thorn = 6,
    Special = 7,
}

const CLASS_COST: [u8; 8] = [0, 1, 2, 2, 3, 4, 1, 7];
const CLASS_STRENGTH: [u8; 8] = [0, 1, 2, 0, 3, 3, 1, 3];
const CLASS_DISTANCE: [u8; 8] = [0, 5, 3, 3, 1, 2, 2, 3];

impl UnitClass {
    /// Wits (action points) needed to spawn a unit of this class.
    pub const fn cost(self) -> u8 {
        CLASS_COST[self as usize]
    }

    /// Attack strength. Specials are generalized to 3.
    pub const fn strength(self) -> u8 {
        CLASS_STRENGTH[self as usize]
    }

    /// Movement range in tiles.
    pub const fn distance(self) -> u8 {
        CLASS_DISTANCE[self as usize]
    }
}

impl EnumCodec for UnitClass {
    const KIND: &'static str = "unit class";

    // A placed unit always has a class, so UNKNOWN is rejected in both forms.
    fn from_int(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_repr)
            .filter(|class| *class != Self::Unknown)
    }

    fn from_name(name: &str) -> Option<Self> {
        name.parse().ok().filter(|class| *class != Self::Unknown)
    }

    fn name(self) -> &'static str {
        self.into()
    }
}

enum_codec_serde!(UnitClass);

// ============================================================================
// Unit Race
// ============================================================================

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum UnitRace {
    #[default]
    #[strum(to_string = "UNKNOWN", serialize = "UNKNOWN_RACE")]
    Unknown = 0,
    Feedback = 1,
    Adorables = 2,
    Scallywags = 3,
    Veggienauts = 4,
}

impl EnumCodec for UnitRace {
    const KIND: &'static str = "unit race";

    fn from_int(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_repr)
    }

    fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    fn name(self) -> &'static str {
        self.into()
    }
}

enum_codec_serde!(UnitRace);
