use std::{io::Write, time::Duration};

use anyhow::Result as AnyResult;
use pixel_adventure_rendering::{HeldKeys, Presentation, RenderingBackend, TerrainCatalog};

/// Backend that prints frames as text and reads held keys from a script.
///
/// Time is simulated: every frame advances the clock by the poll interval
/// without sleeping. Idle ticks are only drawn when the set of visible alerts
/// changes.
#[derive(Debug)]
pub(crate) struct TerminalBackend<I, W> {
    frames: I,
    poll_interval: Duration,
    out: W,
}

impl<I, W> TerminalBackend<I, W> {
    pub(crate) fn new(frames: I, poll_interval: Duration, out: W) -> Self {
        Self {
            frames,
            poll_interval,
            out,
        }
    }
}

impl<I, W> RenderingBackend for TerminalBackend<I, W>
where
    I: IntoIterator<Item = HeldKeys>,
    W: Write,
{
    fn run<F>(self, mut presentation: Presentation, mut update: F) -> AnyResult<()>
    where
        F: FnMut(Duration, HeldKeys, &mut Presentation) -> AnyResult<()>,
    {
        let Self {
            frames,
            poll_interval,
            mut out,
        } = self;

        draw_legend(&mut out, &TerrainCatalog)?;
        draw(&mut out, &presentation)?;
        for keys in frames {
            let visible = presentation.toasts.len();
            update(poll_interval, keys, &mut presentation)?;
            if !keys.is_idle() || presentation.toasts.len() != visible {
                draw(&mut out, &presentation)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn draw_legend<W: Write>(out: &mut W, catalog: &TerrainCatalog) -> AnyResult<()> {
    writeln!(out, "Terrain")?;
    for sprite in catalog.entries() {
        writeln!(
            out,
            "  {} {} ({})",
            sprite.glyph,
            sprite.name,
            sprite.walkability_label()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn draw<W: Write>(out: &mut W, presentation: &Presentation) -> AnyResult<()> {
    let scene = &presentation.scene;
    let layout = scene.tile_grid;
    writeln!(
        out,
        "== {} ({}x{} px) ==",
        presentation.window_title,
        layout.width(),
        layout.height()
    )?;
    write!(out, "{}", scene.render())?;
    let origin = layout.tile_origin(scene.player);
    writeln!(
        out,
        "player {} facing {:?} at {},{} px",
        scene.player, scene.player_facing, origin.x, origin.y
    )?;
    for toast in presentation.toasts.iter() {
        writeln!(out, "! {}: {}", toast.title, toast.description)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_adventure_core::{Direction, MapDimensions, Position, TerrainKind, TileGridBuilder};
    use pixel_adventure_rendering::{Notification, Scene, TileGridPresentation};

    fn presentation() -> Presentation {
        let dimensions = MapDimensions::new(3, 2).expect("valid dimensions");
        let grid = TileGridBuilder::filled(dimensions, TerrainKind::Ground).finish();
        let scene = Scene::compose(
            TileGridPresentation::new(3, 2, 32, 2).expect("valid layout"),
            &grid,
            &TerrainCatalog,
            Position::new(1, 1),
            Direction::Down,
            &[],
        );
        Presentation::new("Test", scene)
    }

    fn right() -> HeldKeys {
        HeldKeys {
            right: true,
            ..HeldKeys::default()
        }
    }

    #[test]
    fn legend_lists_every_terrain_with_its_walkability() {
        let mut out = Vec::new();
        TerminalBackend::new(Vec::<HeldKeys>::new(), Duration::from_millis(200), &mut out)
            .run(presentation(), |_, _, _| Ok(()))
            .expect("backend runs");

        let text = String::from_utf8(out).expect("utf-8 output");
        assert!(text.starts_with(
            "Terrain\n  . Grass (Walkable)\n  ~ Water (Not Walkable)\n  \
             # Rock (Not Walkable)\n  _ Ground (Walkable)\n\n"
        ));
    }

    #[test]
    fn frames_show_pixel_layout() {
        let mut out = Vec::new();
        TerminalBackend::new(Vec::<HeldKeys>::new(), Duration::from_millis(200), &mut out)
            .run(presentation(), |_, _, _| Ok(()))
            .expect("backend runs");

        let text = String::from_utf8(out).expect("utf-8 output");
        assert!(text.contains(
            "== Test (192x128 px) ==\n___\n_@_\nplayer (1, 1) facing Down at 64,64 px\n"
        ));
    }

    #[test]
    fn idle_ticks_advance_time_without_redrawing() {
        let mut out = Vec::new();
        let backend = TerminalBackend::new(
            vec![HeldKeys::default(), right(), HeldKeys::default()],
            Duration::from_millis(200),
            &mut out,
        );
        let mut elapsed = Duration::ZERO;
        backend
            .run(presentation(), |dt, _, _| {
                elapsed += dt;
                Ok(())
            })
            .expect("backend runs");

        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(text.matches("== Test").count(), 2);
        assert_eq!(elapsed, Duration::from_millis(600));
    }

    #[test]
    fn alerts_appearing_on_idle_ticks_are_drawn() {
        let mut out = Vec::new();
        let backend = TerminalBackend::new(
            vec![HeldKeys::default()],
            Duration::from_millis(200),
            &mut out,
        );
        backend
            .run(presentation(), |_, _, presentation| {
                presentation
                    .toasts
                    .push(Notification::new("Hiker spotted you!", "Hiker wants to battle!"));
                Ok(())
            })
            .expect("backend runs");

        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(text.matches("== Test").count(), 2);
        assert!(text.contains("! Hiker spotted you!: Hiker wants to battle!\n"));
    }

    #[test]
    fn update_errors_stop_the_loop() {
        let mut out = Vec::new();
        let backend = TerminalBackend::new(
            vec![HeldKeys::default(); 3],
            Duration::from_millis(200),
            &mut out,
        );
        let mut calls = 0;
        let result = backend.run(presentation(), |_, _, _| {
            calls += 1;
            anyhow::bail!("stop")
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
