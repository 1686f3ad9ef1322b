// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Taktiktafel - tactics whiteboard for team-sports coaching
//!
//! A cross-platform desktop application for drawing plays on a field,
//! placing players and the ball, and stepping through them as an
//! animated sequence of frames.

mod app;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::TaktikApp;
use config::BoardConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = BoardConfig::discover().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {:#}", e);
        BoardConfig::default()
    });

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Taktiktafel"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Taktiktafel",
        options,
        Box::new(|cc| Ok(Box::new(TaktikApp::new(&cc.egui_ctx, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
