#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Pixel Adventure adapters.

mod notifications;
mod terrain;

use anyhow::Result as AnyResult;
use glam::Vec2;
use pixel_adventure_core::{Delta, Direction, Npc, Position, TileGrid};
use pixel_adventure_system_detection::detection_tiles;
use std::{error::Error, fmt, time::Duration};

pub use notifications::{Notification, ToastQueue, DEFAULT_TOAST_DURATION};
pub use terrain::{SpriteFrame, TerrainCatalog, TerrainSprite, TERRAIN_FRAME_SIZE};

/// Glyph drawn on tiles watched by an NPC.
pub const DETECTION_GLYPH: char = '!';

/// Glyph drawn on the player's tile.
pub const PLAYER_GLYPH: char = '@';

/// Glyph drawn for an NPC looking in the provided direction.
#[must_use]
pub const fn npc_glyph(facing: Direction) -> char {
    match facing {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Direction keys held while a frame was captured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldKeys {
    /// Up arrow or `W`.
    pub up: bool,
    /// Down arrow or `S`.
    pub down: bool,
    /// Left arrow or `A`.
    pub left: bool,
    /// Right arrow or `D`.
    pub right: bool,
}

impl HeldKeys {
    /// Reports whether no direction key is held.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Movement request produced by the held keys on a poll tick.
    ///
    /// Down overrides up and right overrides left when both are held.
    #[must_use]
    pub fn delta(&self) -> Option<Delta> {
        let mut delta = Delta::default();
        if self.up {
            delta.dy = -1;
        }
        if self.down {
            delta.dy = 1;
        }
        if self.left {
            delta.dx = -1;
        }
        if self.right {
            delta.dx = 1;
        }
        (!delta.is_zero()).then_some(delta)
    }
}

/// Describes the pixel layout of a tile map drawn by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a source tile in pixels.
    pub tile_size: u32,
    /// Integer magnification applied when drawing.
    pub scale: u32,
}

impl TileGridPresentation {
    /// Default side length of a source tile.
    pub const DEFAULT_TILE_SIZE: u32 = 32;

    /// Default magnification.
    pub const DEFAULT_SCALE: u32 = 2;

    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `tile_size` or `scale` is zero.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_size: u32,
        scale: u32,
    ) -> std::result::Result<Self, RenderingError> {
        if tile_size == 0 {
            return Err(RenderingError::InvalidTileSize { tile_size });
        }
        if scale == 0 {
            return Err(RenderingError::InvalidScale { scale });
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
            scale,
        })
    }

    /// Side length of a tile on screen.
    #[must_use]
    pub fn tile_length(&self) -> f32 {
        (self.tile_size * self.scale) as f32
    }

    /// Width of the drawn map on screen.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length()
    }

    /// Height of the drawn map on screen.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length()
    }

    /// Top-left screen coordinate of the provided tile.
    #[must_use]
    pub fn tile_origin(&self, position: Position) -> Vec2 {
        Vec2::new(position.x as f32, position.y as f32) * self.tile_length()
    }
}

/// Text snapshot of the map with its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Pixel layout of the map.
    pub tile_grid: TileGridPresentation,
    /// Player location in tile coordinates.
    pub player: Position,
    /// Direction the player faces.
    pub player_facing: Direction,
    glyphs: Vec<Vec<char>>,
}

impl Scene {
    /// Composes a scene from a map snapshot.
    ///
    /// Terrain glyphs come from `catalog`. Detection tiles are drawn over
    /// terrain, NPCs over detection tiles and the player over everything.
    #[must_use]
    pub fn compose(
        tile_grid: TileGridPresentation,
        grid: &TileGrid,
        catalog: &TerrainCatalog,
        player: Position,
        player_facing: Direction,
        npcs: &[Npc],
    ) -> Self {
        let mut glyphs: Vec<Vec<char>> = grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|tile| catalog.sprite(tile.kind).glyph)
                    .collect()
            })
            .collect();

        let mut mark = |position: Position, glyph: char| {
            if !grid.contains(position) {
                return;
            }
            let (Ok(x), Ok(y)) = (usize::try_from(position.x), usize::try_from(position.y)) else {
                return;
            };
            if let Some(cell) = glyphs.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = glyph;
            }
        };

        for npc in npcs {
            for tile in detection_tiles(npc) {
                mark(tile, DETECTION_GLYPH);
            }
        }
        for npc in npcs {
            mark(npc.position, npc_glyph(npc.facing));
        }
        mark(player, PLAYER_GLYPH);

        Self {
            tile_grid,
            player,
            player_facing,
            glyphs,
        }
    }

    /// Glyph drawn at a tile, if the tile lies on the map.
    #[must_use]
    pub fn glyph_at(&self, position: Position) -> Option<char> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.glyphs.get(y)?.get(x).copied()
    }

    /// Renders the scene as newline separated rows.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.glyphs.len() * (self.tile_grid.columns as usize + 1));
        for row in &self.glyphs {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown above the map.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
    /// Alerts that should be drawn over the scene.
    pub toasts: ToastQueue,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
            toasts: ToastQueue::new(),
        }
    }
}

/// Rendering backend capable of presenting Pixel Adventure scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update` closure receives the time elapsed since the last
    /// poll tick and the keys held on that tick, and may mutate the
    /// presentation before it is drawn.
    fn run<F>(self, presentation: Presentation, update: F) -> AnyResult<()>
    where
        F: FnMut(Duration, HeldKeys, &mut Presentation) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Tile size must be positive to avoid a zero-sized tile.
    InvalidTileSize {
        /// Provided tile size that failed validation.
        tile_size: u32,
    },
    /// Scale must be positive to avoid a zero-sized tile.
    InvalidScale {
        /// Provided scale that failed validation.
        scale: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize { tile_size } => {
                write!(f, "tile_size must be positive (received {tile_size})")
            }
            Self::InvalidScale { scale } => {
                write!(f, "scale must be positive (received {scale})")
            }
        }
    }
}

impl Error for RenderingError {}
