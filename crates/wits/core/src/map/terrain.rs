use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::Value;

use crate::coord::{HexCoord, decode_coord, encode_coord};
use crate::map::MapError;
use crate::terrain::MapTerrain;
use crate::unit::Team;

/// Lookup form of a map's terrain: one packed value per occupied cell.
pub type PackedTerrain = BTreeMap<HexCoord, MapTerrain>;

/// Semantic kind of an authored tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Floor,
    Wall,
    Bonus,
    Spawn(Team),
    Base(Team),
}

impl TileKind {
    /// Upper-case name used in diagnostics.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Floor => "FLOOR",
            Self::Wall => "WALL",
            Self::Bonus => "BONUS",
            Self::Spawn(_) => "SPAWN",
            Self::Base(_) => "BASE",
        }
    }

    pub const fn team(self) -> Option<Team> {
        match self {
            Self::Spawn(team) | Self::Base(team) => Some(team),
            _ => None,
        }
    }

    /// Packed value for this kind. Tiles with an unknown team pack to
    /// [`MapTerrain::Unknown`].
    pub fn terrain(self) -> MapTerrain {
        match self {
            Self::Floor => MapTerrain::Floor,
            Self::Wall => MapTerrain::Wall,
            Self::Bonus => MapTerrain::BonusNeutral,
            Self::Spawn(team) => MapTerrain::spawn(team).unwrap_or_default(),
            Self::Base(team) => MapTerrain::base(team).unwrap_or_default(),
        }
    }

    /// Collapses runtime-only variants: occupied cells are floor, holes are
    /// impassable like walls, and bonus ownership is dropped.
    pub fn from_terrain(terrain: MapTerrain) -> Option<Self> {
        use MapTerrain::*;
        match terrain {
            Unknown => None,
            Floor | Occupied => Some(Self::Floor),
            Wall | Hole => Some(Self::Wall),
            BonusNeutral | BonusRed | BonusBlue => Some(Self::Bonus),
            BaseRed | BaseBlue | BaseGold | BaseGreen => terrain.team().map(Self::Base),
            SpawnRed | SpawnBlue | SpawnGold | SpawnGreen => terrain.team().map(Self::Spawn),
        }
    }

    pub fn can_walk(self) -> bool {
        self.terrain().can_walk()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileDefinition {
    pub position: HexCoord,
    pub kind: TileKind,
}

impl TileDefinition {
    pub const fn new(position: HexCoord, kind: TileKind) -> Self {
        Self { position, kind }
    }

    pub fn terrain(&self) -> MapTerrain {
        self.kind.terrain()
    }

    pub const fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

/// The authored terrain of a map.
///
/// Tiles are kept in decode order. Views by kind go through the packed
/// terrain value so that spawn and base lookups match any team.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerrainDefinition {
    tiles: Vec<TileDefinition>,
}

impl TerrainDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: HexCoord, kind: TileKind) {
        self.tiles.push(TileDefinition::new(position, kind));
    }

    pub fn tiles(&self) -> &[TileDefinition] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles whose packed value matches `pattern` (see [`MapTerrain::matches`]).
    pub fn select(&self, pattern: MapTerrain) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.tiles
            .iter()
            .filter(move |tile| tile.terrain().matches(pattern))
    }

    pub fn floor(&self) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.select(MapTerrain::Floor)
    }

    pub fn wall(&self) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.select(MapTerrain::Wall)
    }

    pub fn bonus(&self) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.select(MapTerrain::BonusNeutral)
    }

    pub fn spawn(&self) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.select(MapTerrain::SpawnRed)
    }

    pub fn base(&self) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.select(MapTerrain::BaseRed)
    }

    /// Builds the lookup form. When tiles overlap (an invalid map) the first
    /// one in category order wins.
    pub fn packed(&self) -> PackedTerrain {
        let mut packed = PackedTerrain::new();
        for tile in self.categorized() {
            packed.entry(tile.position).or_insert_with(|| tile.terrain());
        }
        packed
    }

    /// Rebuilds the authoring form from a lookup map, in canonical order:
    /// category first, then team slot, then coordinate.
    pub fn from_packed(packed: &PackedTerrain) -> Result<Self, MapError> {
        let mut tiles = Vec::with_capacity(packed.len());
        for (&position, &terrain) in packed {
            let kind = TileKind::from_terrain(terrain)
                .ok_or(MapError::UnplaceableTerrain { position, terrain })?;
            tiles.push(TileDefinition::new(position, kind));
        }
        tiles.sort_by_key(|tile| (category_rank(tile.kind), tile.kind.team().and_then(Team::index)));
        Ok(Self { tiles })
    }

    fn categorized(&self) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.floor()
            .chain(self.wall())
            .chain(self.bonus())
            .chain(self.spawn())
            .chain(self.base())
    }

    fn to_lists(&self) -> Result<TerrainLists, MapError> {
        for tile in &self.tiles {
            if tile.kind.team().is_some() {
                team_slot(tile)?;
            }
        }

        // Team-indexed lists start with two slots and grow to four the first
        // time an ally or second-enemy tile shows up.
        let mut spawn: Vec<Vec<HexCoord>> = vec![Vec::new(); 2];
        for tile in self.spawn() {
            let slot = team_slot(tile)?;
            if slot >= spawn.len() {
                spawn.resize(4, Vec::new());
            }
            spawn[slot].push(tile.position);
        }

        let mut base: Vec<Option<HexCoord>> = vec![None; 2];
        for tile in self.base() {
            let slot = team_slot(tile)?;
            if slot >= base.len() {
                base.resize(4, None);
            }
            if base[slot].replace(tile.position).is_some() {
                return Err(MapError::DuplicateBase {
                    team: tile.kind.team().unwrap_or_default(),
                });
            }
        }

        Ok(TerrainLists {
            floor: positions(self.floor()),
            wall: positions(self.wall()),
            bonus: positions(self.bonus()),
            spawn,
            base: base
                .into_iter()
                .map(|slot| slot.map_or_else(|| Value::Array(Vec::new()), encode_coord))
                .collect(),
        })
    }

    fn from_lists(lists: TerrainLists) -> Result<Self, MapError> {
        let mut terrain = Self::new();
        for position in lists.floor {
            terrain.push(position, TileKind::Floor);
        }
        for position in lists.wall {
            terrain.push(position, TileKind::Wall);
        }
        for position in lists.bonus {
            terrain.push(position, TileKind::Bonus);
        }

        let found = lists.spawn.len();
        for (slot, positions) in lists.spawn.into_iter().enumerate() {
            let team = Team::from_index(slot).ok_or(MapError::TooManyTeams { found })?;
            for position in positions {
                terrain.push(position, TileKind::Spawn(team));
            }
        }

        let found = lists.base.len();
        for (slot, value) in lists.base.iter().enumerate() {
            let team = Team::from_index(slot).ok_or(MapError::TooManyTeams { found })?;
            // An empty slot keeps the positions of the teams after it.
            if matches!(value, Value::Array(items) if items.is_empty()) {
                continue;
            }
            terrain.push(decode_coord(value)?, TileKind::Base(team));
        }

        Ok(terrain)
    }
}

fn positions<'a>(tiles: impl Iterator<Item = &'a TileDefinition>) -> Vec<HexCoord> {
    tiles.map(|tile| tile.position).collect()
}

fn team_slot(tile: &TileDefinition) -> Result<usize, MapError> {
    tile.kind
        .team()
        .and_then(Team::index)
        .ok_or(MapError::MissingTeam {
            kind: tile.type_name(),
            position: tile.position,
        })
}

fn category_rank(kind: TileKind) -> u8 {
    match kind {
        TileKind::Floor => 0,
        TileKind::Wall => 1,
        TileKind::Bonus => 2,
        TileKind::Spawn(_) => 3,
        TileKind::Base(_) => 4,
    }
}

/// Wire layout of the `terrain` object in map files.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TerrainLists {
    #[serde(default)]
    floor: Vec<HexCoord>,
    #[serde(default)]
    wall: Vec<HexCoord>,
    #[serde(default)]
    bonus: Vec<HexCoord>,
    #[serde(default)]
    spawn: Vec<Vec<HexCoord>>,
    #[serde(default)]
    base: Vec<Value>,
}

impl Serialize for TerrainDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_lists()
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TerrainDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lists = TerrainLists::deserialize(deserializer)?;
        Self::from_lists(lists).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coord(i: i32, j: i32) -> HexCoord {
        HexCoord::new(i, j)
    }

    fn solo() -> TerrainDefinition {
        serde_json::from_str(
            r#"{
                "floor": [[0, 4], [1, 3]],
                "wall": [[0, 2]],
                "bonus": [[3, 4]],
                "spawn": [[[2, 7]], [[10, 7], [10, 8]]],
                "base": [[2, 2], [10, 2]]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_team_indexed_lists() {
        let terrain = solo();
        let spawn: Vec<_> = terrain.spawn().copied().collect();
        assert_eq!(
            spawn,
            vec![
                TileDefinition::new(coord(2, 7), TileKind::Spawn(Team::Red)),
                TileDefinition::new(coord(10, 7), TileKind::Spawn(Team::Blue)),
                TileDefinition::new(coord(10, 8), TileKind::Spawn(Team::Blue)),
            ]
        );
        let base: Vec<_> = terrain.base().map(|t| (t.position, t.kind.team())).collect();
        assert_eq!(
            base,
            vec![(coord(2, 2), Some(Team::Red)), (coord(10, 2), Some(Team::Blue))]
        );
        assert_eq!(terrain.floor().count(), 2);
        assert_eq!(terrain.wall().count(), 1);
        assert_eq!(terrain.bonus().count(), 1);
    }

    #[test]
    fn solo_encoding_keeps_two_team_slots() {
        let encoded = serde_json::to_value(solo()).unwrap();
        assert_eq!(encoded["spawn"], serde_json::json!([[[2, 7]], [[10, 7], [10, 8]]]));
        assert_eq!(encoded["base"], serde_json::json!([[2, 2], [10, 2]]));
    }

    #[test]
    fn duos_tile_grows_lists_to_four_slots() {
        let mut terrain = solo();
        terrain.push(coord(6, 9), TileKind::Spawn(Team::Gold));
        let encoded = serde_json::to_value(&terrain).unwrap();
        assert_eq!(
            encoded["spawn"],
            serde_json::json!([[[2, 7]], [[10, 7], [10, 8]], [[6, 9]], []])
        );
        // Bases only reach four slots once a duos base appears.
        assert_eq!(encoded["base"], serde_json::json!([[2, 2], [10, 2]]));

        terrain.push(coord(6, 1), TileKind::Base(Team::Green));
        let encoded = serde_json::to_value(&terrain).unwrap();
        assert_eq!(
            encoded["base"],
            serde_json::json!([[2, 2], [10, 2], [], [6, 1]])
        );
        let decoded: TerrainDefinition = serde_json::from_value(encoded.clone()).unwrap();
        assert_eq!(decoded.packed(), terrain.packed());
        assert_eq!(serde_json::to_value(&decoded).unwrap(), encoded);
    }

    #[test]
    fn rejects_fifth_team_and_unknown_team() {
        let err = serde_json::from_str::<TerrainDefinition>(
            r#"{"spawn": [[], [], [], [], [[1, 1]]]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at most 4"), "{err}");

        let mut terrain = TerrainDefinition::new();
        terrain.push(coord(1, 1), TileKind::Base(Team::Unknown));
        assert!(serde_json::to_string(&terrain).is_err());
    }

    #[test]
    fn second_base_for_a_team_cannot_be_encoded() {
        let mut terrain = solo();
        terrain.push(coord(5, 5), TileKind::Base(Team::Red));
        let err = serde_json::to_string(&terrain).unwrap_err();
        assert!(err.to_string().contains("more than one base"), "{err}");
    }

    #[test]
    fn packed_view_matches_category_masks() {
        let terrain = solo();
        let packed = terrain.packed();
        assert_eq!(packed.len(), terrain.len());
        assert_eq!(packed[&coord(10, 8)], MapTerrain::SpawnBlue);
        assert_eq!(packed[&coord(2, 2)], MapTerrain::BaseRed);
        for tile in terrain.tiles() {
            let value = packed[&tile.position];
            assert_eq!(TileKind::from_terrain(value), Some(tile.kind));
            assert_eq!(
                value.category(),
                tile.kind.terrain().category(),
                "{}",
                tile.position
            );
        }
    }

    #[test]
    fn from_packed_collapses_runtime_variants() {
        let mut packed = PackedTerrain::new();
        packed.insert(coord(0, 0), MapTerrain::Occupied);
        packed.insert(coord(0, 1), MapTerrain::Hole);
        packed.insert(coord(0, 2), MapTerrain::BonusRed);
        packed.insert(coord(0, 3), MapTerrain::SpawnGreen);
        let terrain = TerrainDefinition::from_packed(&packed).unwrap();
        let kinds: Vec<_> = terrain.tiles().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TileKind::Floor,
                TileKind::Wall,
                TileKind::Bonus,
                TileKind::Spawn(Team::Green)
            ]
        );

        packed.insert(coord(9, 9), MapTerrain::Unknown);
        assert!(matches!(
            TerrainDefinition::from_packed(&packed),
            Err(MapError::UnplaceableTerrain { .. })
        ));
    }

    #[test]
    fn packed_round_trip_is_canonical() {
        let terrain = solo();
        let rebuilt = TerrainDefinition::from_packed(&terrain.packed()).unwrap();
        assert_eq!(rebuilt.packed(), terrain.packed());
        assert_eq!(rebuilt, terrain);
    }

    fn arb_terrain() -> impl Strategy<Value = TerrainDefinition> {
        let cell = (0i32..13, 0i32..13).prop_map(|(i, j)| HexCoord::new(i, j));
        let kind = prop_oneof![
            Just(TileKind::Floor),
            Just(TileKind::Wall),
            Just(TileKind::Bonus),
            (0usize..4).prop_map(|slot| TileKind::Spawn(Team::from_index(slot).unwrap())),
        ];
        (
            proptest::collection::btree_map(cell, kind, 0..40),
            proptest::collection::btree_set(0usize..4, 0..4),
        )
            .prop_map(|(cells, base_teams)| {
                let mut packed: PackedTerrain = cells
                    .into_iter()
                    .map(|(position, kind)| (position, kind.terrain()))
                    .collect();
                for slot in base_teams {
                    let team = Team::from_index(slot).unwrap();
                    // Bases live outside the generated range so they never overlap.
                    let position = HexCoord::new(20 + slot as i32, 20);
                    packed.insert(position, TileKind::Base(team).terrain());
                }
                TerrainDefinition::from_packed(&packed).unwrap()
            })
    }

    proptest! {
        #[test]
        fn json_round_trip(terrain in arb_terrain()) {
            let encoded = serde_json::to_string(&terrain).unwrap();
            let decoded: TerrainDefinition = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(&decoded, &terrain);
            prop_assert_eq!(decoded.packed(), terrain.packed());
        }
    }
}
