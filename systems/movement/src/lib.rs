#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that resolves player steps and rolls encounters.

use pixel_adventure_core::{
    Command, Delta, Direction, Encounter, MoveOutcome, MoveRejection, Npc, Position,
    TerrainClassifier, TerrainKind, TileGrid,
};
use pixel_adventure_system_detection::first_detecting;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Probability that entering grass fires a wild encounter.
pub const WILD_ENCOUNTER_CHANCE: f64 = 0.6;

/// Terrain on which wild encounters may fire.
pub const WILD_ENCOUNTER_TERRAIN: TerrainKind = TerrainKind::Grass;

/// Stream selected on the encounter RNG so a shared seed does not replay the
/// generator's sequence.
const ENCOUNTER_STREAM: u64 = 0x5eed_0f_e4c0;

/// Resolves a single movement request against the map and NPC roster.
///
/// Checks run in order and the first failing check decides the outcome:
/// map bounds, NPC occupancy, NPC detection rays, terrain walkability. Only a
/// detection hit reports an encounter on a refused move; the player stays in
/// place in every refused case. Accepted moves onto grass roll for a wild
/// encounter, which does not stop the player from entering the tile.
pub fn attempt_move<C, R>(
    current: Position,
    delta: Delta,
    grid: &TileGrid,
    npcs: &[Npc],
    classifier: &C,
    wild_chance: f64,
    rng: &mut R,
) -> MoveOutcome
where
    C: TerrainClassifier + ?Sized,
    R: Rng + ?Sized,
{
    let target = current.offset(delta);

    if !grid.contains(target) {
        return MoveOutcome::rejected(current, MoveRejection::OutOfBounds, None);
    }

    if npcs.iter().any(|npc| npc.position == target) {
        return MoveOutcome::rejected(current, MoveRejection::OccupiedByNpc, None);
    }

    if let Some(npc) = first_detecting(npcs, target) {
        let encounter = Encounter::Npc { npc: npc.id };
        return MoveOutcome::rejected(current, MoveRejection::SpottedByNpc, Some(encounter));
    }

    let Some(tile) = grid.tile(target) else {
        return MoveOutcome::rejected(current, MoveRejection::Blocked, None);
    };
    if !classifier.is_walkable(tile.kind) {
        return MoveOutcome::rejected(current, MoveRejection::Blocked, None);
    }

    let encounter = (tile.kind == WILD_ENCOUNTER_TERRAIN && roll(rng, wild_chance))
        .then_some(Encounter::Wild);
    MoveOutcome::moved(target, encounter)
}

/// Configuration parameters required to construct the movement system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    wild_chance: f64,
    rng_seed: Option<u64>,
}

impl Config {
    /// Creates a new configuration using the provided encounter chance and seed.
    #[must_use]
    pub const fn new(wild_chance: f64, rng_seed: Option<u64>) -> Self {
        Self {
            wild_chance,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(WILD_ENCOUNTER_CHANCE, None)
    }
}

/// Pure system that turns movement requests into world commands.
#[derive(Debug)]
pub struct Movement {
    wild_chance: f64,
    rng: ChaCha8Rng,
}

impl Movement {
    /// Creates a new movement system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        rng.set_stream(ENCOUNTER_STREAM);
        Self {
            wild_chance: config.wild_chance,
            rng,
        }
    }

    /// Resolves a movement request and emits the commands that apply it.
    ///
    /// Requests are ignored while no map exists or when the delta is zero.
    /// The player turns towards the requested direction even when the move
    /// itself is refused.
    pub fn handle<C>(
        &mut self,
        request: Delta,
        player: Position,
        grid: Option<&TileGrid>,
        npcs: &[Npc],
        classifier: &C,
        out: &mut Vec<Command>,
    ) -> Option<MoveOutcome>
    where
        C: TerrainClassifier + ?Sized,
    {
        let grid = grid?;
        let direction = Direction::from_delta(request)?;
        out.push(Command::FacePlayer { direction });

        let outcome = attempt_move(
            player,
            request,
            grid,
            npcs,
            classifier,
            self.wild_chance,
            &mut self.rng,
        );

        match outcome.rejection {
            None => out.push(Command::PlacePlayer {
                position: outcome.position,
            }),
            Some(reason) => out.push(Command::RejectMove {
                target: player.offset(request),
                reason,
            }),
        }
        if let Some(encounter) = outcome.encounter {
            out.push(Command::TriggerEncounter { encounter });
        }

        tracing::debug!(
            from = %player,
            to = %outcome.position,
            rejection = ?outcome.rejection,
            encounter = ?outcome.encounter,
            "resolved move"
        );
        Some(outcome)
    }
}

fn roll<R>(rng: &mut R, chance: f64) -> bool
where
    R: Rng + ?Sized,
{
    if chance.is_nan() || chance <= 0.0 {
        false
    } else if chance >= 1.0 {
        true
    } else {
        rng.gen_bool(chance)
    }
}
