//! Dense, rectangular tile storage and its builder.

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::{Position, TerrainKind, Tile};

/// Reasons a map size may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Either dimension was zero.
    #[error("map dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Requested width in tiles.
        width: u32,
        /// Requested height in tiles.
        height: u32,
    },
    /// A dimension does not fit the signed coordinate space.
    #[error("map dimensions {width}x{height} exceed the addressable range")]
    TooLarge {
        /// Requested width in tiles.
        width: u32,
        /// Requested height in tiles.
        height: u32,
    },
}

/// Validated width and height of a tile map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct MapDimensions {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: u32,
    height: u32,
}

impl TryFrom<RawDimensions> for MapDimensions {
    type Error = GridError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl MapDimensions {
    /// Validates and wraps the provided dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }

        let fits_coordinates = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
        let fits_memory = usize::try_from(u64::from(width) * u64::from(height)).is_ok();
        if !fits_coordinates || !fits_memory {
            return Err(GridError::TooLarge { width, height });
        }

        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile at `(⌊width/2⌋, ⌊height/2⌋)`, where the player spawns.
    #[must_use]
    pub const fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Reports whether the position lies on the map.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, position: Position) -> Option<usize> {
        let column = u32::try_from(position.x).ok()?;
        let row = u32::try_from(position.y).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(row as usize * self.width as usize + column as usize)
    }
}

/// Immutable, fully populated grid of tiles stored in row-major order.
///
/// Grids are only produced by [`TileGridBuilder::finish`], so every cell is
/// populated exactly once and all rows share the same length. Serialized
/// grids carry their tiles as `height` rows of `width` tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.dimensions.width()
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Validated dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Reports whether the position lies on the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    /// Returns the tile at the provided coordinates, or `None` when either
    /// coordinate falls outside the grid.
    #[must_use]
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tile(Position::new(x, y))
    }

    /// Returns the tile at the provided position, if it lies on the grid.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.dimensions
            .index(position)
            .and_then(|index| self.tiles.get(index))
    }

    /// Iterator over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.dimensions.width() as usize)
    }

    /// Iterator over every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

impl Serialize for TileGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<&[Tile]> = self.rows().collect();
        let mut state = serializer.serialize_struct("TileGrid", 2)?;
        state.serialize_field("dimensions", &self.dimensions)?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}

/// Owns an in-progress grid while generation rules are applied.
#[derive(Clone, Debug)]
pub struct TileGridBuilder {
    dimensions: MapDimensions,
    tiles: Vec<Tile>,
}

impl TileGridBuilder {
    /// Starts a grid with every cell set to `kind`.
    #[must_use]
    pub fn filled(dimensions: MapDimensions, kind: TerrainKind) -> Self {
        let mut tiles = Vec::with_capacity(dimensions.cell_count());
        for y in 0..dimensions.height() as i32 {
            for x in 0..dimensions.width() as i32 {
                tiles.push(Tile { x, y, kind });
            }
        }
        Self { dimensions, tiles }
    }

    /// Dimensions of the grid under construction.
    #[must_use]
    pub const fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Terrain currently painted at the coordinates, if they are in bounds.
    #[must_use]
    pub fn kind_at(&self, x: i32, y: i32) -> Option<TerrainKind> {
        self.dimensions
            .index(Position::new(x, y))
            .and_then(|index| self.tiles.get(index))
            .map(|tile| tile.kind)
    }

    /// Paints a cell. Coordinates outside the grid are ignored.
    pub fn paint(&mut self, x: i32, y: i32, kind: TerrainKind) {
        if let Some(index) = self.dimensions.index(Position::new(x, y)) {
            if let Some(tile) = self.tiles.get_mut(index) {
                tile.kind = kind;
            }
        }
    }

    /// Seals the grid, preventing further mutation.
    #[must_use]
    pub fn finish(self) -> TileGrid {
        TileGrid {
            dimensions: self.dimensions,
            tiles: self.tiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimensions(width: u32, height: u32) -> MapDimensions {
        MapDimensions::new(width, height).expect("valid dimensions")
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            MapDimensions::new(0, 4),
            Err(GridError::ZeroDimension {
                width: 0,
                height: 4
            })
        );
        assert!(MapDimensions::new(3, 0).is_err());
        assert!(MapDimensions::new(u32::MAX, 1).is_err());
    }

    #[test]
    fn center_uses_floor_division() {
        assert_eq!(dimensions(25, 20).center(), Position::new(12, 10));
        assert_eq!(dimensions(1, 1).center(), Position::new(0, 0));
    }

    #[test]
    fn builder_paints_only_in_bounds_cells() {
        let mut builder = TileGridBuilder::filled(dimensions(3, 2), TerrainKind::Grass);
        builder.paint(2, 1, TerrainKind::Rock);
        builder.paint(3, 1, TerrainKind::Rock);
        builder.paint(-1, 0, TerrainKind::Rock);

        let grid = builder.finish();
        assert_eq!(grid.iter().filter(|tile| tile.kind == TerrainKind::Rock).count(), 1);
        assert_eq!(grid.tile_at(2, 1).map(|tile| tile.kind), Some(TerrainKind::Rock));
    }

    #[test]
    fn rows_are_rectangular_and_coordinates_match_cells() {
        let grid = TileGridBuilder::filled(dimensions(4, 3), TerrainKind::Ground).finish();
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 4);
            for (x, tile) in row.iter().enumerate() {
                assert_eq!(tile.position(), Position::new(x as i32, y as i32));
            }
        }
    }

    #[test]
    fn dimensions_deserialize_through_validation() {
        let bytes = bincode::serialize(&(0_u32, 3_u32)).expect("serialize");
        let parsed: Result<MapDimensions, _> = bincode::deserialize(&bytes);
        assert!(parsed.is_err());

        let bytes = bincode::serialize(&(25_u32, 20_u32)).expect("serialize");
        let parsed: MapDimensions = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(parsed, dimensions(25, 20));
    }

    #[test]
    fn grids_serialize_as_rows_of_tiles() {
        let mut builder = TileGridBuilder::filled(dimensions(2, 2), TerrainKind::Grass);
        builder.paint(1, 0, TerrainKind::Water);
        let grid = builder.finish();

        let tile = |x, y, kind| Tile { x, y, kind };
        let expected = (
            (2_u32, 2_u32),
            vec![
                vec![tile(0, 0, TerrainKind::Grass), tile(1, 0, TerrainKind::Water)],
                vec![tile(0, 1, TerrainKind::Grass), tile(1, 1, TerrainKind::Grass)],
            ],
        );

        assert_eq!(
            bincode::serialize(&grid).expect("serialize grid"),
            bincode::serialize(&expected).expect("serialize rows")
        );
    }
}
