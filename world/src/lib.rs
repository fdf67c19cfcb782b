#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Pixel Adventure.

mod generation;

use pixel_adventure_core::{
    Command, Direction, Event, MapDimensions, Npc, Position, TileGrid, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use generation::{generate, GeneratorTuning};

/// Configuration parameters required to construct the world.
#[derive(Clone, Debug, Default)]
pub struct Config {
    seed: Option<u64>,
    tuning: GeneratorTuning,
}

impl Config {
    /// Creates a new configuration using the provided seed and generator tuning.
    ///
    /// Without a seed the generator draws from operating-system entropy.
    #[must_use]
    pub fn new(seed: Option<u64>, tuning: GeneratorTuning) -> Self {
        Self { seed, tuning }
    }
}

/// Represents the authoritative Pixel Adventure world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Option<TileGrid>,
    player: Player,
    roster: Vec<Npc>,
    npcs: Vec<Npc>,
    tuning: GeneratorTuning,
    rng: ChaCha8Rng,
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Position,
    facing: Direction,
}

impl World {
    /// Creates an empty world; no map exists until a `GenerateMap` command runs.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            banner: WELCOME_BANNER,
            grid: None,
            player: Player {
                position: Position::new(0, 0),
                facing: Direction::Down,
            },
            roster: Vec::new(),
            npcs: Vec::new(),
            tuning: config.tuning,
            rng,
        }
    }

    fn regenerate(&mut self, dimensions: MapDimensions) -> Position {
        let grid = generate(dimensions, &self.tuning, &mut self.rng);
        let spawn = dimensions.center();
        self.grid = Some(grid);
        self.player = Player {
            position: spawn,
            facing: Direction::Down,
        };
        spawn
    }

    fn refresh_active_npcs(&mut self) {
        let grid = self.grid.as_ref();
        self.npcs = self
            .roster
            .iter()
            .filter(|npc| grid.map_or(true, |grid| grid.contains(npc.position)))
            .cloned()
            .collect();
    }

    fn accepts_position(&self, position: Position) -> bool {
        let Some(grid) = self.grid.as_ref() else {
            return false;
        };
        grid.contains(position) && !self.npcs.iter().any(|npc| npc.position == position)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::GenerateMap { dimensions } => {
            let previous_npcs = std::mem::take(&mut world.npcs);
            let spawn = world.regenerate(dimensions);
            world.refresh_active_npcs();
            tracing::info!(
                width = dimensions.width(),
                height = dimensions.height(),
                %spawn,
                "map generated"
            );
            out_events.push(Event::MapGenerated { dimensions, spawn });
            if world.npcs != previous_npcs {
                out_events.push(Event::NpcsChanged {
                    count: world.npcs.len(),
                });
            }
        }
        Command::SetNpcs { npcs } => {
            world.roster = npcs;
            world.refresh_active_npcs();
            if world.npcs.len() != world.roster.len() {
                tracing::warn!(
                    dropped = world.roster.len() - world.npcs.len(),
                    "npcs outside the map were skipped"
                );
            }
            out_events.push(Event::NpcsChanged {
                count: world.npcs.len(),
            });
        }
        Command::FacePlayer { direction } => {
            if world.player.facing != direction {
                world.player.facing = direction;
                out_events.push(Event::PlayerTurned { direction });
            }
        }
        Command::PlacePlayer { position } => {
            if !world.accepts_position(position) {
                tracing::warn!(%position, "ignoring placement onto an unavailable tile");
                return;
            }
            let from = world.player.position;
            world.player.position = position;
            out_events.push(Event::PlayerMoved { from, to: position });
        }
        Command::RejectMove { target, reason } => {
            out_events.push(Event::MoveRejected { target, reason });
        }
        Command::TriggerEncounter { encounter } => {
            if world.grid.is_none() {
                return;
            }
            out_events.push(Event::EncounterTriggered {
                encounter,
                position: world.player.position,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use pixel_adventure_core::{Direction, Npc, NpcId, Position, TileGrid};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the current tile map, if one was generated.
    #[must_use]
    pub fn tile_grid(world: &World) -> Option<&TileGrid> {
        world.grid.as_ref()
    }

    /// Tile currently occupied by the player.
    #[must_use]
    pub fn player_position(world: &World) -> Position {
        world.player.position
    }

    /// Direction the player currently faces.
    #[must_use]
    pub fn player_facing(world: &World) -> Direction {
        world.player.facing
    }

    /// NPCs standing on the current map in detection priority order.
    #[must_use]
    pub fn npcs(world: &World) -> &[Npc] {
        &world.npcs
    }

    /// Looks up an active NPC by identifier.
    #[must_use]
    pub fn npc(world: &World, id: NpcId) -> Option<&Npc> {
        world.npcs.iter().find(|npc| npc.id == id)
    }
}
