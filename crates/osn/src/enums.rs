//! Enumerations of the legacy format.
//!
//! Colors, classes and player slots use their own numbering in archived
//! replays. Each type converts into its canonical counterpart from
//! `wits-core`.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use wits_core::codec::{EnumCodec, EnumVisitor};
use wits_core::enum_codec_serde;
use wits_core::{Team, UnitClass};

// ============================================================================
// Player Color
// ============================================================================

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum PlayerColor {
    Blue = 1,
    Red = 2,
    Green = 3,
    Gold = 4,
}

impl EnumCodec for PlayerColor {
    const KIND: &'static str = "player color";

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

enum_codec_serde!(PlayerColor);

// ============================================================================
// Legacy Unit Class
// ============================================================================

/// Unit class as numbered by the legacy game. Race specials have their own
/// values here and collapse to [`UnitClass::Special`] in the canonical model.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum LegacyClass {
    #[strum(to_string = "UNKNOWN", serialize = "UNKNOWN_CLASS")]
    Unknown = 0,
    #[strum(to_string = "RUNNER", serialize = "SCOUT")]
    Runner = 1,
    Soldier = 2,
    Medic = 3,
    Sniper = 4,
    Heavy = 5,
    Scrambler = 6,
    Mobi = 7,
    #[strum(to_string = "BOMBSHELL", serialize = "ARTILLERY")]
    Bombshell = 8,
    Bramble = 9,
    BrambleThorn = 10,
}

impl LegacyClass {
    pub const fn as_wits(self) -> UnitClass {
        match self {
            Self::Unknown => UnitClass::Unknown,
            Self::Runner => UnitClass::Runner,
            Self::Soldier => UnitClass::Soldier,
            Self::Medic => UnitClass::Medic,
            Self::Sniper => UnitClass::Sniper,
            Self::Heavy => UnitClass::Heavy,
            Self::Scrambler | Self::Mobi | Self::Bombshell | Self::Bramble => UnitClass::Special,
            Self::BrambleThorn => UnitClass::Thorn,
        }
    }
}

impl EnumCodec for LegacyClass {
    const KIND: &'static str = "legacy unit class";

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

enum_codec_serde!(LegacyClass);

// ============================================================================
// Player Index
// ============================================================================

/// Seat of a player in the match, 0 through 3. The seat decides the team:
/// the first two seats are self and enemy, the last two only exist in duos.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::FromRepr)]
#[repr(u8)]
pub enum PlayerIndex {
    #[default]
    Player1 = 0,
    Player2 = 1,
    Player3 = 2,
    Player4 = 3,
}

impl PlayerIndex {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn team(self) -> Team {
        match self {
            Self::Player1 => Team::Red,
            Self::Player2 => Team::Blue,
            Self::Player3 => Team::Gold,
            Self::Player4 => Team::Green,
        }
    }
}

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.as_u8() + 1)
    }
}

impl EnumCodec for PlayerIndex {
    const KIND: &'static str = "player index";

    fn from_int(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_repr)
    }

    // Seats are never written by name.
    fn from_name(_name: &str) -> Option<Self> {
        None
    }

    fn name(self) -> &'static str {
        match self {
            Self::Player1 => "PLAYER_1",
            Self::Player2 => "PLAYER_2",
            Self::Player3 => "PLAYER_3",
            Self::Player4 => "PLAYER_4",
        }
    }
}

impl Serialize for PlayerIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for PlayerIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EnumVisitor::<PlayerIndex>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn colors_use_legacy_numbering() {
        assert_eq!(serde_json::from_str::<PlayerColor>("1").unwrap(), PlayerColor::Blue);
        assert_eq!(serde_json::from_str::<PlayerColor>("2").unwrap(), PlayerColor::Red);
        assert_eq!(serde_json::from_str::<PlayerColor>(r#""gold""#).unwrap(), PlayerColor::Gold);
        assert!(serde_json::from_str::<PlayerColor>("0").is_err());
        assert!(serde_json::from_str::<PlayerColor>("5").is_err());
        assert_eq!(serde_json::to_string(&PlayerColor::Green).unwrap(), r#""GREEN""#);
    }

    #[test]
    fn specials_collapse_and_thorns_map_to_thorn() {
        assert_eq!(LegacyClass::Runner.as_wits(), UnitClass::Runner);
        assert_eq!(LegacyClass::Heavy.as_wits(), UnitClass::Heavy);
        for class in [
            LegacyClass::Scrambler,
            LegacyClass::Mobi,
            LegacyClass::Bombshell,
            LegacyClass::Bramble,
        ] {
            assert_eq!(class.as_wits(), UnitClass::Special);
        }
        assert_eq!(LegacyClass::BrambleThorn.as_wits(), UnitClass::Thorn);
    }

    #[test]
    fn legacy_class_codec() {
        assert_eq!(serde_json::from_str::<LegacyClass>("8").unwrap(), LegacyClass::Bombshell);
        assert_eq!(
            serde_json::from_str::<LegacyClass>(r#""ARTILLERY""#).unwrap(),
            LegacyClass::Bombshell
        );
        assert_eq!(
            serde_json::from_str::<LegacyClass>(r#""SCOUT""#).unwrap(),
            LegacyClass::Runner
        );
        assert!(serde_json::from_str::<LegacyClass>("0").is_err());
        assert!(serde_json::from_str::<LegacyClass>("11").is_err());
        for class in LegacyClass::iter().skip(1) {
            let encoded = serde_json::to_string(&class).unwrap();
            assert_eq!(serde_json::from_str::<LegacyClass>(&encoded).unwrap(), class);
        }
    }

    #[test]
    fn player_index_decides_team() {
        let seats: Vec<Team> = (0..4)
            .map(|i| serde_json::from_str::<PlayerIndex>(&i.to_string()).unwrap().team())
            .collect();
        assert_eq!(seats, vec![Team::Red, Team::Blue, Team::Gold, Team::Green]);
        assert!(serde_json::from_str::<PlayerIndex>("4").is_err());
        assert_eq!(serde_json::to_string(&PlayerIndex::Player3).unwrap(), "2");
    }
}
