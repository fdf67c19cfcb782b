#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Line-of-sight rays cast by stationary NPCs.
//!
//! An NPC watches a straight line of tiles starting one tile ahead of it in
//! its facing direction. There is no cone spread and no occlusion: a tile is
//! watched purely by coordinate, whatever terrain lies in between.

use pixel_adventure_core::{Npc, Position};

/// Tiles watched by the NPC, nearest first.
///
/// The sequence always holds exactly `detection_range` positions; positions
/// may fall outside the map.
#[must_use]
pub fn detection_tiles(npc: &Npc) -> Vec<Position> {
    ray(npc).collect()
}

/// Reports whether the candidate lies exactly on one of the NPC's watched tiles.
#[must_use]
pub fn is_detected(npc: &Npc, candidate: Position) -> bool {
    ray(npc).any(|tile| tile == candidate)
}

/// First NPC in list order whose ray contains the candidate.
///
/// List order is the only tie-break when several rays overlap.
#[must_use]
pub fn first_detecting(npcs: &[Npc], candidate: Position) -> Option<&Npc> {
    npcs.iter().find(|npc| is_detected(npc, candidate))
}

fn ray(npc: &Npc) -> impl Iterator<Item = Position> + '_ {
    (1..=npc.detection_range).map(move |step| npc.position.stepped(npc.facing, step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_adventure_core::{Direction, NpcId};

    fn watcher(facing: Direction, range: u32) -> Npc {
        Npc {
            id: NpcId::new(1),
            name: "Watcher".to_owned(),
            position: Position::new(5, 5),
            facing,
            detection_range: range,
        }
    }

    #[test]
    fn zero_range_watches_nothing() {
        let npc = watcher(Direction::Left, 0);
        assert!(detection_tiles(&npc).is_empty());
        assert!(!is_detected(&npc, Position::new(4, 5)));
    }

    #[test]
    fn npc_tile_itself_is_not_watched() {
        let npc = watcher(Direction::Down, 3);
        assert!(!is_detected(&npc, npc.position));
    }
}
