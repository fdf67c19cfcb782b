use std::time::Duration;

use anyhow::{Context, Result};
use pixel_adventure_core::{Event, MoveOutcome};
use pixel_adventure_rendering::{
    HeldKeys, Notification, Presentation, Scene, TerrainCatalog, TileGridPresentation,
};
use pixel_adventure_system_bootstrap::Bootstrap;
use pixel_adventure_system_movement::{self as movement, Movement};
use pixel_adventure_world::{self as world, query, World};

use crate::config::GameConfig;

/// Title drawn above the map.
pub(crate) const WINDOW_TITLE: &str = "Pixel Adventure";

/// Wires the world, the movement system and the presentation together.
#[derive(Debug)]
pub(crate) struct Game {
    world: World,
    movement: Movement,
    catalog: TerrainCatalog,
    layout: TileGridPresentation,
    toast_duration: Duration,
}

impl Game {
    /// Generates the opening map and places the default roster on it.
    pub(crate) fn start(config: &GameConfig) -> Result<Self> {
        let dimensions = config.dimensions()?;
        let layout = config.layout()?;
        let mut world = World::new(world::Config::new(config.seed, config.generation.clone()));
        let bootstrap = Bootstrap;

        let mut events = Vec::new();
        for command in bootstrap.opening_commands(dimensions, bootstrap.default_npcs()) {
            world::apply(&mut world, command, &mut events);
        }
        tracing::debug!(?events, "opening commands applied");

        Ok(Self {
            world,
            movement: Movement::new(movement::Config::new(
                config.encounters.wild_chance,
                config.seed,
            )),
            catalog: TerrainCatalog,
            layout,
            toast_duration: config.toast_duration(),
        })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Presentation of the current world state with no alerts showing.
    pub(crate) fn presentation(&self) -> Result<Presentation> {
        Ok(Presentation::new(WINDOW_TITLE, self.scene()?))
    }

    /// Advances one poll tick.
    ///
    /// Expires alerts, resolves the move requested by the held keys, raises
    /// alerts for encounters and redraws the scene. Returns the resolved move,
    /// or `None` when nothing was requested.
    pub(crate) fn tick(
        &mut self,
        elapsed: Duration,
        keys: HeldKeys,
        presentation: &mut Presentation,
    ) -> Result<Option<MoveOutcome>> {
        presentation.toasts.advance(elapsed);
        let Some(delta) = keys.delta() else {
            return Ok(None);
        };

        let mut commands = Vec::new();
        let outcome = self.movement.handle(
            delta,
            query::player_position(&self.world),
            query::tile_grid(&self.world),
            query::npcs(&self.world),
            &self.catalog,
            &mut commands,
        );

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        for event in &events {
            if let Event::EncounterTriggered {
                encounter,
                position,
            } = event
            {
                tracing::info!(?encounter, %position, "encounter triggered");
                let notification =
                    Notification::from_encounter(encounter, query::npcs(&self.world))
                        .with_duration(self.toast_duration);
                presentation.toasts.push(notification);
            }
        }

        presentation.scene = self.scene()?;
        Ok(outcome)
    }

    fn scene(&self) -> Result<Scene> {
        let grid = query::tile_grid(&self.world).context("no map has been generated")?;
        Ok(Scene::compose(
            self.layout,
            grid,
            &self.catalog,
            query::player_position(&self.world),
            query::player_facing(&self.world),
            query::npcs(&self.world),
        ))
    }
}
