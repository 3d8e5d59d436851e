//! Packed terrain values.
//!
//! A [`MapTerrain`] fits in four bits. The upper two bits select the category
//! and the lower two bits the team or variant inside it:
//!
//! ```text
//! 00xx  bonus   (neutral, red, blue)
//! 01xx  other   (wall, occupied, hole, floor)
//! 10xx  base    (red, blue, gold, green)
//! 11xx  spawn   (red, blue, gold, green)
//! ```
//!
//! Masking with [`TYPE_MASK`] therefore answers "is this any base?" without
//! comparing against every team variant.

use crate::codec::EnumCodec;
use crate::enum_codec_serde;
use crate::unit::Team;

/// Selects the category bits of a packed terrain value.
pub const TYPE_MASK: u8 = 0b1100;

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
pub enum MapTerrain {
    #[default]
    Unknown = 0,
    #[strum(to_string = "BONUS", serialize = "BONUS_NEUTRAL")]
    BonusNeutral = 1,
    BonusRed = 2,
    BonusBlue = 3,
    Wall = 4,
    Occupied = 5,
    Hole = 6,
    Floor = 7,
    BaseRed = 8,
    BaseBlue = 9,
    BaseGold = 10,
    BaseGreen = 11,
    SpawnRed = 12,
    SpawnBlue = 13,
    SpawnGold = 14,
    SpawnGreen = 15,
}

/// Category selected by the top two bits of a packed terrain value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TerrainCategory {
    Bonus = 0b0000,
    Other = 0b0100,
    Base = 0b1000,
    Spawn = 0b1100,
}

impl MapTerrain {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::from_repr(bits)
    }

    pub const fn category(self) -> TerrainCategory {
        match self.bits() & TYPE_MASK {
            0b0000 => TerrainCategory::Bonus,
            0b0100 => TerrainCategory::Other,
            0b1000 => TerrainCategory::Base,
            _ => TerrainCategory::Spawn,
        }
    }

    pub const fn base(team: Team) -> Option<Self> {
        match team {
            Team::Red => Some(Self::BaseRed),
            Team::Blue => Some(Self::BaseBlue),
            Team::Gold => Some(Self::BaseGold),
            Team::Green => Some(Self::BaseGreen),
            Team::Unknown => None,
        }
    }

    pub const fn spawn(team: Team) -> Option<Self> {
        match team {
            Team::Red => Some(Self::SpawnRed),
            Team::Blue => Some(Self::SpawnBlue),
            Team::Gold => Some(Self::SpawnGold),
            Team::Green => Some(Self::SpawnGreen),
            Team::Unknown => None,
        }
    }

    /// Owning team of a base or spawn tile (and of a captured bonus tile).
    pub const fn team(self) -> Option<Team> {
        match self.category() {
            TerrainCategory::Base | TerrainCategory::Spawn => {
                Team::from_index((self.bits() & !TYPE_MASK) as usize)
            }
            TerrainCategory::Bonus => match self {
                Self::BonusRed => Some(Team::Red),
                Self::BonusBlue => Some(Team::Blue),
                _ => None,
            },
            TerrainCategory::Other => None,
        }
    }

    /// Pattern match used when grouping tiles by kind.
    ///
    /// A base or spawn pattern matches every team variant of its category and
    /// a bonus pattern matches any bonus ownership. Wall, hole, floor and
    /// occupied are not split by team, so they only match themselves.
    pub fn matches(self, pattern: MapTerrain) -> bool {
        match pattern.category() {
            TerrainCategory::Base | TerrainCategory::Spawn => {
                self.bits() & TYPE_MASK == pattern.bits() & TYPE_MASK
            }
            TerrainCategory::Bonus => {
                self != Self::Unknown && self.category() == TerrainCategory::Bonus
            }
            TerrainCategory::Other => self == pattern,
        }
    }

    /// Units may stand on this terrain.
    pub const fn can_walk(self) -> bool {
        !matches!(self, Self::Unknown | Self::Wall | Self::Hole)
    }
}

impl EnumCodec for MapTerrain {
    const KIND: &'static str = "terrain";

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

enum_codec_serde!(MapTerrain);

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn category_mask_ignores_team() {
        assert_eq!(
            MapTerrain::SpawnRed.bits() & TYPE_MASK,
            MapTerrain::SpawnBlue.bits() & TYPE_MASK
        );
        assert_ne!(
            MapTerrain::SpawnRed.bits() & TYPE_MASK,
            MapTerrain::BaseRed.bits() & TYPE_MASK
        );
        assert_eq!(MapTerrain::BaseGreen.category(), TerrainCategory::Base);
        assert_eq!(MapTerrain::Hole.category(), TerrainCategory::Other);
    }

    #[test]
    fn team_variants_decode_from_low_bits() {
        assert_eq!(MapTerrain::BaseGold.team(), Some(Team::Gold));
        assert_eq!(MapTerrain::SpawnBlue.team(), Some(Team::Blue));
        assert_eq!(MapTerrain::BonusRed.team(), Some(Team::Red));
        assert_eq!(MapTerrain::Floor.team(), None);
        for team in Team::iter().filter(|t| *t != Team::Unknown) {
            assert_eq!(MapTerrain::base(team).and_then(MapTerrain::team), Some(team));
            assert_eq!(MapTerrain::spawn(team).and_then(MapTerrain::team), Some(team));
        }
    }

    #[test]
    fn matching_by_category_or_exact_value() {
        assert!(MapTerrain::BaseGreen.matches(MapTerrain::BaseRed));
        assert!(MapTerrain::SpawnGold.matches(MapTerrain::SpawnRed));
        assert!(!MapTerrain::SpawnGold.matches(MapTerrain::BaseRed));
        assert!(MapTerrain::BonusBlue.matches(MapTerrain::BonusNeutral));
        assert!(!MapTerrain::Unknown.matches(MapTerrain::BonusNeutral));
        assert!(MapTerrain::Floor.matches(MapTerrain::Floor));
        assert!(!MapTerrain::Hole.matches(MapTerrain::Floor));
        assert!(!MapTerrain::Occupied.matches(MapTerrain::Wall));
    }

    #[test]
    fn names_and_bits_round_trip() {
        for terrain in MapTerrain::iter() {
            assert_eq!(MapTerrain::from_bits(terrain.bits()), Some(terrain));
            assert_eq!(MapTerrain::decode_name(terrain.name()), Ok(terrain));
        }
        assert_eq!(MapTerrain::decode_name("BONUS"), Ok(MapTerrain::BonusNeutral));
        assert_eq!(MapTerrain::from_bits(16), None);
    }

    #[test]
    fn walkable_terrain() {
        assert!(MapTerrain::Floor.can_walk());
        assert!(MapTerrain::SpawnRed.can_walk());
        assert!(!MapTerrain::Wall.can_walk());
        assert!(!MapTerrain::Hole.can_walk());
    }
}
