//! Layered procedural generator that paints paths, rocks, and water pools.

use pixel_adventure_core::{MapDimensions, TerrainKind, TileGrid, TileGridBuilder};
use rand::Rng;
use serde::Deserialize;

/// Aggregated tuning knobs controlling every adjustable aspect of map generation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorTuning {
    /// Chance that a column receives one ground path tile.
    pub column_path_chance: f64,
    /// Chance that a row receives one ground path tile.
    pub row_path_chance: f64,
    /// Chance that a remaining grass tile turns into rock.
    pub rock_chance: f64,
    /// Chance that a remaining grass tile seeds a water pool.
    pub water_seed_chance: f64,
    /// Chance that each grass neighbour of a pool seed also floods.
    pub water_spread_chance: f64,
    /// Half-extent of the box around the map centre that never receives water.
    pub water_exclusion_radius: f64,
    /// Half-extent of the square around the spawn tile forced to ground.
    pub spawn_clearing_radius: u32,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            column_path_chance: 0.7,
            row_path_chance: 0.7,
            rock_chance: 0.08,
            water_seed_chance: 0.05,
            water_spread_chance: 0.7,
            water_exclusion_radius: 5.0,
            spawn_clearing_radius: 2,
        }
    }
}

/// Generates a fresh tile map.
///
/// Rules run in a fixed order and later rules override earlier ones on the
/// same cell. The spawn clearing is painted last so the player always starts
/// on walkable ground.
pub fn generate<R>(dimensions: MapDimensions, tuning: &GeneratorTuning, rng: &mut R) -> TileGrid
where
    R: Rng + ?Sized,
{
    let mut builder = TileGridBuilder::filled(dimensions, TerrainKind::Grass);
    lay_paths(&mut builder, tuning, rng);
    scatter_rocks(&mut builder, tuning, rng);
    flood_pools(&mut builder, tuning, rng);
    clear_spawn(&mut builder, tuning);

    let grid = builder.finish();
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        rock = count(&grid, TerrainKind::Rock),
        water = count(&grid, TerrainKind::Water),
        ground = count(&grid, TerrainKind::Ground),
        "generated tile map"
    );
    grid
}

fn lay_paths<R>(builder: &mut TileGridBuilder, tuning: &GeneratorTuning, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let (width, height) = signed_extent(builder.dimensions());

    for x in 0..width {
        if roll(rng, tuning.column_path_chance) {
            let y = rng.gen_range(0..height);
            builder.paint(x, y, TerrainKind::Ground);
        }
    }

    for y in 0..height {
        if roll(rng, tuning.row_path_chance) {
            let x = rng.gen_range(0..width);
            builder.paint(x, y, TerrainKind::Ground);
        }
    }
}

fn scatter_rocks<R>(builder: &mut TileGridBuilder, tuning: &GeneratorTuning, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let (width, height) = signed_extent(builder.dimensions());

    for y in 0..height {
        for x in 0..width {
            if builder.kind_at(x, y) == Some(TerrainKind::Grass) && roll(rng, tuning.rock_chance) {
                builder.paint(x, y, TerrainKind::Rock);
            }
        }
    }
}

fn flood_pools<R>(builder: &mut TileGridBuilder, tuning: &GeneratorTuning, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let dimensions = builder.dimensions();
    let (width, height) = signed_extent(dimensions);
    let exclusion = ExclusionBox::around_center(dimensions, tuning.water_exclusion_radius);

    for y in 0..height {
        for x in 0..width {
            let seeds_pool = builder.kind_at(x, y) == Some(TerrainKind::Grass)
                && roll(rng, tuning.water_seed_chance)
                && !exclusion.contains(x, y);
            if !seeds_pool {
                continue;
            }

            builder.paint(x, y, TerrainKind::Water);

            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    let floods = builder.kind_at(nx, ny) == Some(TerrainKind::Grass)
                        && roll(rng, tuning.water_spread_chance)
                        && !exclusion.contains(nx, ny);
                    if floods {
                        builder.paint(nx, ny, TerrainKind::Water);
                    }
                }
            }
        }
    }
}

fn clear_spawn(builder: &mut TileGridBuilder, tuning: &GeneratorTuning) {
    let dimensions = builder.dimensions();
    let (width, height) = signed_extent(dimensions);
    let center = dimensions.center();
    let radius = i32::try_from(tuning.spawn_clearing_radius).unwrap_or(i32::MAX);

    let rows = center.y.saturating_sub(radius).max(0)..=center.y.saturating_add(radius).min(height - 1);
    for y in rows {
        let columns =
            center.x.saturating_sub(radius).max(0)..=center.x.saturating_add(radius).min(width - 1);
        for x in columns {
            builder.paint(x, y, TerrainKind::Ground);
        }
    }
}

/// Box measured from the real-valued map centre; a cell lies outside once
/// either axis is farther than the radius.
#[derive(Clone, Copy, Debug)]
struct ExclusionBox {
    center_x: f64,
    center_y: f64,
    radius: f64,
}

impl ExclusionBox {
    fn around_center(dimensions: MapDimensions, radius: f64) -> Self {
        Self {
            center_x: f64::from(dimensions.width()) / 2.0,
            center_y: f64::from(dimensions.height()) / 2.0,
            radius,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        (f64::from(x) - self.center_x).abs() <= self.radius
            && (f64::from(y) - self.center_y).abs() <= self.radius
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

fn signed_extent(dimensions: MapDimensions) -> (i32, i32) {
    (
        i32::try_from(dimensions.width()).unwrap_or(i32::MAX),
        i32::try_from(dimensions.height()).unwrap_or(i32::MAX),
    )
}

fn count(grid: &TileGrid, kind: TerrainKind) -> usize {
    grid.iter().filter(|tile| tile.kind == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::mock::StepRng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn dimensions(width: u32, height: u32) -> MapDimensions {
        MapDimensions::new(width, height).expect("valid dimensions")
    }

    #[test]
    fn exclusion_box_uses_disjunctive_guard() {
        let exclusion = ExclusionBox::around_center(dimensions(25, 20), 5.0);
        assert!(exclusion.contains(12, 10));
        assert!(exclusion.contains(8, 5));
        assert!(!exclusion.contains(7, 10));
        assert!(!exclusion.contains(12, 16));
        assert!(exclusion.contains(17, 15));
        assert!(!exclusion.contains(18, 15));
    }

    #[test]
    fn rolls_saturate_outside_unit_interval() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert!(!roll(&mut rng, 0.0));
        assert!(!roll(&mut rng, f64::NAN));
        assert!(roll(&mut rng, 1.5));
    }

    #[test]
    fn forced_rolls_turn_all_free_grass_into_rock() {
        let mut rng = StepRng::new(0, 0);
        let grid = generate(dimensions(12, 12), &GeneratorTuning::default(), &mut rng);

        assert_eq!(count(&grid, TerrainKind::Grass), 0);
        assert_eq!(count(&grid, TerrainKind::Water), 0);
    }

    #[test]
    fn water_never_lands_inside_exclusion_box() {
        let tuning = GeneratorTuning {
            rock_chance: 0.0,
            water_seed_chance: 1.0,
            ..GeneratorTuning::default()
        };
        let dims = dimensions(30, 30);
        let exclusion = ExclusionBox::around_center(dims, tuning.water_exclusion_radius);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let grid = generate(dims, &tuning, &mut rng);

        for tile in grid.iter() {
            if tile.kind == TerrainKind::Water {
                assert!(
                    !exclusion.contains(tile.x, tile.y),
                    "water at {:?} inside exclusion box",
                    tile.position()
                );
            }
        }
        assert!(count(&grid, TerrainKind::Water) > 0);
    }

    #[test]
    fn disabled_rules_leave_grass_with_spawn_clearing() {
        let tuning = GeneratorTuning {
            column_path_chance: 0.0,
            row_path_chance: 0.0,
            rock_chance: 0.0,
            water_seed_chance: 0.0,
            ..GeneratorTuning::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grid = generate(dimensions(9, 9), &tuning, &mut rng);

        assert_eq!(count(&grid, TerrainKind::Ground), 25);
        assert_eq!(count(&grid, TerrainKind::Grass), 81 - 25);
    }
}
