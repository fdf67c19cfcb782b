#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pixel Adventure engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that presentation code turns into frames and notifications.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod grid;

pub use grid::{GridError, MapDimensions, TileGrid, TileGridBuilder};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Pixel Adventure.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Regenerates the tile map using the provided dimensions.
    GenerateMap {
        /// Width and height of the map measured in tiles.
        dimensions: MapDimensions,
    },
    /// Replaces the roster of stationary NPCs watching the map.
    SetNpcs {
        /// NPCs in detection priority order.
        npcs: Vec<Npc>,
    },
    /// Turns the player towards the provided direction without moving.
    FacePlayer {
        /// Direction the player should face.
        direction: Direction,
    },
    /// Places the player on an already validated tile.
    PlacePlayer {
        /// Tile the player occupies after the command.
        position: Position,
    },
    /// Reports that a movement attempt was refused.
    RejectMove {
        /// Tile the player attempted to enter.
        target: Position,
        /// Reason the attempt was refused.
        reason: MoveRejection,
    },
    /// Announces an encounter resolved by the movement system.
    TriggerEncounter {
        /// Encounter that fired.
        encounter: Encounter,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A fresh tile map replaced the previous one.
    MapGenerated {
        /// Dimensions of the new map.
        dimensions: MapDimensions,
        /// Spawn tile the player was reset to.
        spawn: Position,
    },
    /// The NPC roster changed.
    NpcsChanged {
        /// Number of NPCs kept after clipping to the map.
        count: usize,
    },
    /// The player turned to face a new direction.
    PlayerTurned {
        /// Direction the player now faces.
        direction: Direction,
    },
    /// The player moved between two tiles.
    PlayerMoved {
        /// Tile occupied before the move.
        from: Position,
        /// Tile occupied after the move.
        to: Position,
    },
    /// A movement attempt left the player in place.
    MoveRejected {
        /// Tile the player attempted to enter.
        target: Position,
        /// Reason the attempt was refused.
        reason: MoveRejection,
    },
    /// An encounter fired at the player's current tile.
    EncounterTriggered {
        /// Encounter that fired.
        encounter: Encounter,
        /// Tile the player occupies when the encounter fires.
        position: Position,
    },
}

/// Cardinal facing directions used by the player and NPCs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit step taken when travelling in this direction.
    #[must_use]
    pub const fn delta(self) -> Delta {
        match self {
            Self::Up => Delta::new(0, -1),
            Self::Down => Delta::new(0, 1),
            Self::Left => Delta::new(-1, 0),
            Self::Right => Delta::new(1, 0),
        }
    }

    /// Facing derived from a movement delta.
    ///
    /// The vertical component wins for diagonal deltas. A zero delta has no
    /// facing.
    #[must_use]
    pub const fn from_delta(delta: Delta) -> Option<Self> {
        if delta.dy < 0 {
            Some(Self::Up)
        } else if delta.dy > 0 {
            Some(Self::Down)
        } else if delta.dx < 0 {
            Some(Self::Left)
        } else if delta.dx > 0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Location of a single tile expressed as signed column and row coordinates.
///
/// Coordinates are signed so that out-of-map candidates produced by movement
/// or detection rays remain representable; whether a position is on the map
/// is answered by [`TileGrid::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based column index.
    pub x: i32,
    /// Zero-based row index.
    pub y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position reached after applying the provided delta.
    #[must_use]
    pub const fn offset(self, delta: Delta) -> Self {
        Self {
            x: self.x.saturating_add(delta.dx),
            y: self.y.saturating_add(delta.dy),
        }
    }

    /// Position reached after `steps` unit steps in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, steps: u32) -> Self {
        let steps = i32::try_from(steps).unwrap_or(i32::MAX);
        let unit = direction.delta();
        Self {
            x: self.x.saturating_add(unit.dx.saturating_mul(steps)),
            y: self.y.saturating_add(unit.dy.saturating_mul(steps)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Requested change in position for a single move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    /// Column change.
    pub dx: i32,
    /// Row change.
    pub dy: i32,
}

impl Delta {
    /// Creates a new delta.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Reports whether the delta leaves a position unchanged.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Categorical terrain tag carried by every tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    /// Tall grass where wild encounters lurk.
    Grass,
    /// Bare ground forming paths and the spawn clearing.
    Ground,
    /// Boulders that block movement.
    Rock,
    /// Pools that block movement.
    Water,
}

impl TerrainKind {
    /// Every terrain kind in catalog order.
    pub const ALL: [TerrainKind; 4] = [Self::Grass, Self::Water, Self::Rock, Self::Ground];

    /// Stable identifier used by configuration and asset tables.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Ground => "ground",
            Self::Rock => "rock",
            Self::Water => "water",
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error raised when a terrain identifier is not recognised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown terrain kind `{0}`")]
pub struct TerrainParseError(pub String);

impl FromStr for TerrainKind {
    type Err = TerrainParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == value)
            .ok_or_else(|| TerrainParseError(value.to_owned()))
    }
}

/// One cell of the map grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Column occupied by the tile.
    pub x: i32,
    /// Row occupied by the tile.
    pub y: i32,
    /// Terrain painted on the tile.
    #[serde(rename = "type")]
    pub kind: TerrainKind,
}

impl Tile {
    /// Position of the tile within its grid.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Decides which terrain kinds may be entered.
///
/// The core consumes this capability without owning the table behind it.
pub trait TerrainClassifier {
    /// Reports whether the player may stand on the provided terrain.
    fn is_walkable(&self, kind: TerrainKind) -> bool;
}

impl<T: TerrainClassifier + ?Sized> TerrainClassifier for &T {
    fn is_walkable(&self, kind: TerrainKind) -> bool {
        (**self).is_walkable(kind)
    }
}

/// Unique identifier assigned to an NPC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Stationary character that watches a straight line of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    /// Identifier used when reporting encounters.
    pub id: NpcId,
    /// Display name shown to the player.
    pub name: String,
    /// Tile the NPC stands on; the tile is never enterable.
    pub position: Position,
    /// Direction the detection ray extends in.
    pub facing: Direction,
    /// Number of tiles watched, starting one tile ahead of the NPC.
    pub detection_range: u32,
}

/// Encounter surfaced to the presentation layer after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encounter {
    /// A wild creature appeared in the grass.
    Wild,
    /// A watching NPC spotted the player.
    Npc {
        /// NPC whose detection ray the player stepped into.
        npc: NpcId,
    },
}

/// Reasons a movement attempt may leave the player in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The target lies outside the map.
    OutOfBounds,
    /// An NPC stands on the target.
    OccupiedByNpc,
    /// The target lies on an NPC's detection ray.
    SpottedByNpc,
    /// The target terrain cannot be entered.
    Blocked,
}

/// Result of resolving a single movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Position the player occupies after resolution.
    pub position: Position,
    /// Encounter fired by the move, if any.
    pub encounter: Option<Encounter>,
    /// Reason the move was refused, if it was.
    pub rejection: Option<MoveRejection>,
}

impl MoveOutcome {
    /// Outcome of an accepted move.
    #[must_use]
    pub const fn moved(position: Position, encounter: Option<Encounter>) -> Self {
        Self {
            position,
            encounter,
            rejection: None,
        }
    }

    /// Outcome of a refused move that keeps the player at `position`.
    #[must_use]
    pub const fn rejected(
        position: Position,
        reason: MoveRejection,
        encounter: Option<Encounter>,
    ) -> Self {
        Self {
            position,
            encounter,
            rejection: Some(reason),
        }
    }

    /// Reports whether the player changed tiles.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }
}
