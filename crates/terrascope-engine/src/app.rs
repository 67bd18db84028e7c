//! Headless driver loop.
//!
//! Plays a walk script against a [`WorldSession`], one tick per frame,
//! and reports what the viewer would see.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use terrascope_world::WorldSession;
use terrascope_worldgen::Biome;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::walk::{Action, Walk};

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames played
    pub frames: u64,
    /// Ticks that changed the visible window
    pub window_updates: u64,
    /// Unit steps taken by the window center
    pub center_steps: u64,
    /// Chunks admitted to the window
    pub admitted: u64,
    /// Chunks evicted from the window
    pub evicted: u64,
}

/// Runs a full walk.
pub fn run(config: &EngineConfig) -> Result<RunSummary> {
    config.validate().context("invalid configuration")?;
    let walk: Walk = config.walk.parse().context("invalid walk script")?;
    let mut session = WorldSession::new(config.world.clone())?;

    info!(
        "Walking {} steps ({} frames) over seed {} ({} mode)",
        walk.steps().len(),
        walk.total_frames(),
        session.seed(),
        session.mode()
    );

    let mut summary = RunSummary::default();
    record(&mut summary, &mut session)?;

    for (action, pace) in walk.frames() {
        match action {
            Action::Move { dx, dz } => session.move_viewpoint(dx, dz, pace),
            Action::Zoom(direction) => session.change_zoom(direction),
            Action::Wait => {},
        }
        record(&mut summary, &mut session)?;
        summary.frames += 1;

        if config.report_interval > 0 && summary.frames % u64::from(config.report_interval) == 0 {
            report(&session, config, summary.frames);
        }
    }

    report(&session, config, summary.frames);
    for (biome, count) in biome_histogram(&session) {
        info!("  {:<12} {:>8} cells", biome.name(), count);
    }
    info!(
        "Run complete: {} frames, {} window updates, {} center steps, +{} -{} chunks",
        summary.frames, summary.window_updates, summary.center_steps, summary.admitted, summary.evicted
    );
    Ok(summary)
}

fn record(summary: &mut RunSummary, session: &mut WorldSession) -> Result<()> {
    if let Some(update) = session.tick()? {
        debug!(
            "Window update: steps={}, -{} +{}, reinitialized={}",
            update.steps, update.evicted, update.admitted, update.reinitialized
        );
        summary.window_updates += 1;
        summary.center_steps += update.steps;
        summary.admitted += update.admitted as u64;
        summary.evicted += update.evicted as u64;
    }
    Ok(())
}

/// Logs the status line the viewer would show.
fn report(session: &WorldSession, config: &EngineConfig, frame: u64) {
    let stats = session.stats();
    info!(
        "frame {}: generated={} visible={} pos=({:.1}, {:.1}) zoom={:.2} render_distance={}",
        frame,
        stats.generated_chunks,
        stats.visible_chunks,
        stats.position.0,
        stats.position.1,
        stats.zoom,
        stats.render_distance
    );

    let viewport = config.viewport();
    let center = (viewport.0 / 2.0, viewport.1 / 2.0);
    if let Some(cell) = session.cell_at_screen(center, viewport) {
        let world = cell.world();
        info!(
            "  under cursor: cell ({}, {}) {} elevation={:.1} temperature={:.2} rainfall={:.2}",
            world.x,
            world.z,
            cell.biome(),
            cell.elevation(),
            cell.temperature(),
            cell.rainfall()
        );
    }
}

/// Counts cells per biome across the visible window.
pub fn biome_histogram(session: &WorldSession) -> BTreeMap<Biome, u64> {
    let mut histogram = BTreeMap::new();
    for chunk in session.visible().current_visible_chunks() {
        for cell in chunk.cells() {
            *histogram.entry(cell.biome()).or_insert(0) += 1;
        }
    }
    histogram
}
