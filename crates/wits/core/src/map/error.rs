use crate::coord::HexCoord;
use crate::error::{CodecError, ErrorSeverity, WitsError};
use crate::terrain::MapTerrain;
use crate::unit::Team;

/// Errors raised while decoding, encoding or validating map terrain.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// Two tiles claim the same cell.
    #[error("coordinate {position} repeated between {existing}, {incoming}")]
    TerrainCollision {
        position: HexCoord,
        existing: &'static str,
        incoming: &'static str,
    },

    /// A tile sits on one of the six cells surrounding a base.
    #[error("coordinate {position} collides with the base at {base} ({existing} tile)")]
    BaseCollision {
        base: HexCoord,
        position: HexCoord,
        existing: &'static str,
    },

    /// Spawn or base lists describe more teams than a match can hold.
    #[error("terrain lists describe {found} teams, at most 4 are supported")]
    TooManyTeams { found: usize },

    /// A spawn or base tile without an owning team.
    #[error("{kind} tile at {position} has no team")]
    MissingTeam {
        kind: &'static str,
        position: HexCoord,
    },

    /// The canonical form stores a single base per team.
    #[error("team {team} has more than one base")]
    DuplicateBase { team: Team },

    /// Packed terrain that has no authoring counterpart.
    #[error("terrain {terrain} at {position} cannot be placed in a map definition")]
    UnplaceableTerrain {
        position: HexCoord,
        terrain: MapTerrain,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl WitsError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Codec(err) => err.severity(),
            Self::TerrainCollision { .. } | Self::BaseCollision { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TerrainCollision { .. } => "MAP_TERRAIN_COLLISION",
            Self::BaseCollision { .. } => "MAP_BASE_COLLISION",
            Self::TooManyTeams { .. } => "MAP_TOO_MANY_TEAMS",
            Self::MissingTeam { .. } => "MAP_MISSING_TEAM",
            Self::DuplicateBase { .. } => "MAP_DUPLICATE_BASE",
            Self::UnplaceableTerrain { .. } => "MAP_UNPLACEABLE_TERRAIN",
            Self::Codec(err) => err.error_code(),
        }
    }
}
