use std::collections::HashMap;

use crate::coord::HexCoord;
use crate::map::{MapError, TerrainDefinition, TileDefinition};

/// Checks that no two tiles share a cell and that nothing touches a base.
///
/// Tiles are claimed category by category (floor, wall, bonus, spawn, base).
/// Each base additionally claims its six neighbours, so a tile next to a base
/// is rejected with [`MapError::BaseCollision`].
pub fn validate_exclusivity(terrain: &TerrainDefinition) -> Result<(), MapError> {
    let mut claimed: HashMap<HexCoord, &TileDefinition> = HashMap::with_capacity(terrain.len());

    for tile in terrain
        .floor()
        .chain(terrain.wall())
        .chain(terrain.bonus())
        .chain(terrain.spawn())
    {
        ensure_unclaimed(&claimed, tile)?;
        claimed.insert(tile.position, tile);
    }

    for base in terrain.base() {
        ensure_unclaimed(&claimed, base)?;
        for neighbor in base.position.neighbors() {
            if let Some(existing) = claimed.get(&neighbor) {
                return Err(MapError::BaseCollision {
                    base: base.position,
                    position: neighbor,
                    existing: existing.type_name(),
                });
            }
        }
        claimed.insert(base.position, base);
    }

    Ok(())
}

fn ensure_unclaimed(
    claimed: &HashMap<HexCoord, &TileDefinition>,
    tile: &TileDefinition,
) -> Result<(), MapError> {
    match claimed.get(&tile.position) {
        Some(existing) => Err(MapError::TerrainCollision {
            position: tile.position,
            existing: existing.type_name(),
            incoming: tile.type_name(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileKind;
    use crate::unit::Team;

    fn coord(i: i32, j: i32) -> HexCoord {
        HexCoord::new(i, j)
    }

    #[test]
    fn accepts_disjoint_tiles() {
        let mut terrain = TerrainDefinition::new();
        terrain.push(coord(0, 4), TileKind::Floor);
        terrain.push(coord(0, 2), TileKind::Wall);
        terrain.push(coord(2, 7), TileKind::Spawn(Team::Red));
        terrain.push(coord(2, 2), TileKind::Base(Team::Red));
        terrain.push(coord(10, 2), TileKind::Base(Team::Blue));
        assert_eq!(validate_exclusivity(&terrain), Ok(()));
    }

    #[test]
    fn reports_both_type_names() {
        let mut terrain = TerrainDefinition::new();
        terrain.push(coord(3, 4), TileKind::Bonus);
        terrain.push(coord(3, 4), TileKind::Floor);
        let err = validate_exclusivity(&terrain).unwrap_err();
        assert_eq!(
            err,
            MapError::TerrainCollision {
                position: coord(3, 4),
                existing: "FLOOR",
                incoming: "BONUS",
            }
        );
        assert_eq!(err.to_string(), "coordinate [3, 4] repeated between FLOOR, BONUS");
    }

    #[test]
    fn floor_next_to_base_is_rejected() {
        let mut terrain = TerrainDefinition::new();
        terrain.push(coord(1, 1), TileKind::Floor);
        terrain.push(coord(2, 2), TileKind::Base(Team::Red));
        assert_eq!(
            validate_exclusivity(&terrain),
            Err(MapError::BaseCollision {
                base: coord(2, 2),
                position: coord(1, 1),
                existing: "FLOOR",
            })
        );
    }

    #[test]
    fn adjacent_bases_collide() {
        let mut terrain = TerrainDefinition::new();
        terrain.push(coord(4, 4), TileKind::Base(Team::Red));
        terrain.push(coord(4, 5), TileKind::Base(Team::Blue));
        assert!(matches!(
            validate_exclusivity(&terrain),
            Err(MapError::BaseCollision { existing: "BASE", .. })
        ));
    }

    #[test]
    fn base_on_spawn_cell_is_a_plain_collision() {
        let mut terrain = TerrainDefinition::new();
        terrain.push(coord(5, 5), TileKind::Spawn(Team::Blue));
        terrain.push(coord(5, 5), TileKind::Base(Team::Blue));
        assert!(matches!(
            validate_exclusivity(&terrain),
            Err(MapError::TerrainCollision { existing: "SPAWN", incoming: "BASE", .. })
        ));
    }
}
