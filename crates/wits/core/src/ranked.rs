//! League standings recorded with ranked matches.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Skill level of a ranked player. Advancing within the top-100 of a tier
/// promotes the player to the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeagueTier {
    #[default]
    Unranked,
    Novice,
    Intermediate,
    Advanced,
    Expert,
}

impl LeagueTier {
    pub const ALL: [LeagueTier; 5] = [
        Self::Unranked,
        Self::Novice,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unranked => "Unranked",
            Self::Novice => "Novice",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for LeagueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown league tier {0:?}")]
pub struct UnknownTier(pub String);

impl FromStr for LeagueTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTier(s.to_owned()))
    }
}

impl Serialize for LeagueTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LeagueTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Rank within a tier, 1 through 100.
pub type LeagueRank = i32;

/// A player's league position before the match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    #[serde(rename = "gcID")]
    pub gcid: String,
    pub tier: LeagueTier,
    pub rank: LeagueRank,
}

/// A player's league position after the match and the points it moved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsAfter {
    #[serde(rename = "gcID")]
    pub gcid: String,
    pub tier: LeagueTier,
    pub rank: LeagueRank,
    pub delta: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_names_round_trip() {
        for tier in LeagueTier::ALL {
            assert_eq!(tier.as_str().parse::<LeagueTier>(), Ok(tier));
        }
        assert_eq!("expert".parse::<LeagueTier>(), Ok(LeagueTier::Expert));
        assert_eq!(
            "Supertitan".parse::<LeagueTier>(),
            Err(UnknownTier("Supertitan".into()))
        );
    }

    #[test]
    fn standings_use_legacy_player_key() {
        let after = StandingsAfter {
            gcid: "G:1234".into(),
            tier: LeagueTier::Advanced,
            rank: 12,
            delta: -7,
        };
        assert_eq!(
            serde_json::to_string(&after).unwrap(),
            r#"{"gcID":"G:1234","tier":"Advanced","rank":12,"delta":-7}"#
        );
        assert_eq!(Standings::default().tier, LeagueTier::Unranked);
    }
}
