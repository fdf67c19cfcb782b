use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use pixel_adventure_core::MapDimensions;
use pixel_adventure_rendering::{TileGridPresentation, DEFAULT_TOAST_DURATION};
use pixel_adventure_system_bootstrap::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use pixel_adventure_system_movement::WILD_ENCOUNTER_CHANCE;
use pixel_adventure_world::GeneratorTuning;
use serde::Deserialize;
use thiserror::Error;

/// Interval between two reads of the held direction keys.
const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Largest radius accepted for the generator's exclusion box and spawn clearing.
const MAX_TUNING_RADIUS: u32 = 1024;

/// Settings loaded from the optional TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Seed shared by map generation and encounter rolls; entropy when absent.
    pub(crate) seed: Option<u64>,
    pub(crate) map: MapConfig,
    pub(crate) display: DisplayConfig,
    pub(crate) encounters: EncounterConfig,
    pub(crate) input: InputConfig,
    pub(crate) generation: GeneratorTuning,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MapConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DisplayConfig {
    pub(crate) tile_size: u32,
    pub(crate) scale: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tile_size: TileGridPresentation::DEFAULT_TILE_SIZE,
            scale: TileGridPresentation::DEFAULT_SCALE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EncounterConfig {
    pub(crate) wild_chance: f64,
    pub(crate) toast_seconds: u64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            wild_chance: WILD_ENCOUNTER_CHANCE,
            toast_seconds: DEFAULT_TOAST_DURATION.as_secs(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct InputConfig {
    pub(crate) poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Settings that parse but cannot drive a session.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("{field} must lie within 0.0..=1.0 (received {value})")]
    Chance { field: &'static str, value: f64 },
    #[error(
        "{field} must lie within 0..={max} (received {value})",
        max = MAX_TUNING_RADIUS
    )]
    Radius { field: &'static str, value: f64 },
    #[error("poll_interval_ms must be positive")]
    ZeroPollInterval,
}

impl GameConfig {
    /// Reads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses and validates a TOML document.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        let chances = [
            ("wild_chance", self.encounters.wild_chance),
            ("column_path_chance", generation.column_path_chance),
            ("row_path_chance", generation.row_path_chance),
            ("rock_chance", generation.rock_chance),
            ("water_seed_chance", generation.water_seed_chance),
            ("water_spread_chance", generation.water_spread_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Chance { field, value });
            }
        }

        let radii = [
            ("water_exclusion_radius", generation.water_exclusion_radius),
            (
                "spawn_clearing_radius",
                f64::from(generation.spawn_clearing_radius),
            ),
        ];
        for (field, value) in radii {
            if !(0.0..=f64::from(MAX_TUNING_RADIUS)).contains(&value) {
                return Err(ConfigError::Radius { field, value });
            }
        }

        if self.input.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub(crate) fn dimensions(&self) -> Result<MapDimensions> {
        MapDimensions::new(self.map.width, self.map.height).context("invalid map size")
    }

    pub(crate) fn layout(&self) -> Result<TileGridPresentation> {
        TileGridPresentation::new(
            self.map.width,
            self.map.height,
            self.display.tile_size,
            self.display.scale,
        )
        .context("invalid display settings")
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.input.poll_interval_ms)
    }

    pub(crate) fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.encounters.toast_seconds)
    }
}
