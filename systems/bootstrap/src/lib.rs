#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Pixel Adventure experience.

use pixel_adventure_core::{Command, Direction, MapDimensions, Npc, NpcId, Position};
use pixel_adventure_world::{query, World};

/// Default map width in tiles.
pub const DEFAULT_MAP_WIDTH: u32 = 25;

/// Default map height in tiles.
pub const DEFAULT_MAP_HEIGHT: u32 = 20;

/// Tiles watched by each trainer in the default roster.
const TRAINER_DETECTION_RANGE: u32 = 2;

const TRAINERS: [(&str, i32, i32, Direction); 4] = [
    ("Bug Catcher", 8, 8, Direction::Down),
    ("Youngster", 15, 12, Direction::Right),
    ("Hiker", 5, 15, Direction::Left),
    ("Elder", 20, 5, Direction::Up),
];

/// Produces data required to greet the player and populate the first map.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Trainers standing on the default map, in detection priority order.
    #[must_use]
    pub fn default_npcs(&self) -> Vec<Npc> {
        TRAINERS
            .iter()
            .zip(1..)
            .map(|(&(name, x, y, facing), id)| Npc {
                id: NpcId::new(id),
                name: name.to_owned(),
                position: Position::new(x, y),
                facing,
                detection_range: TRAINER_DETECTION_RANGE,
            })
            .collect()
    }

    /// Commands that generate the first map and place the roster on it.
    #[must_use]
    pub fn opening_commands(&self, dimensions: MapDimensions, npcs: Vec<Npc>) -> Vec<Command> {
        vec![
            Command::SetNpcs { npcs },
            Command::GenerateMap { dimensions },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_adventure_world::{apply, Config, GeneratorTuning};

    #[test]
    fn default_roster_fits_default_map() {
        let bootstrap = Bootstrap;
        let dimensions =
            MapDimensions::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT).expect("valid dimensions");
        let npcs = bootstrap.default_npcs();

        assert_eq!(npcs.len(), 4);
        assert!(npcs.iter().all(|npc| dimensions.contains(npc.position)));
        assert_eq!(npcs[0].id, NpcId::new(1));
        assert_eq!(npcs[3].name, "Elder");
    }

    #[test]
    fn opening_commands_spawn_player_at_center() {
        let bootstrap = Bootstrap;
        let mut world = World::new(Config::new(Some(3), GeneratorTuning::default()));
        let dimensions =
            MapDimensions::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT).expect("valid dimensions");
        let mut events = Vec::new();
        for command in bootstrap.opening_commands(dimensions, bootstrap.default_npcs()) {
            apply(&mut world, command, &mut events);
        }

        assert_eq!(query::player_position(&world), Position::new(12, 10));
        assert_eq!(query::npcs(&world).len(), 4);
        assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Pixel Adventure.");
    }
}
