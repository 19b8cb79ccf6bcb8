// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! doodlespeak - draw a doodle, hear what it is
//!
//! A desktop application that sends a drawn or uploaded image to a
//! multimodal model for a short, child-friendly description and reads the
//! description aloud.

mod app;
mod config;
mod error;
mod interpret;
mod io;
mod models;
mod raster;
mod services;
mod ui;

use anyhow::Result;
use app::DoodleApp;
use config::Config;
use error::AppError;
use interpret::Interpreter;
use services::{GeminiClient, GoogleTts};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // A missing API key stops here, before any window is opened.
    let config = Config::load().map_err(|e| {
        match e.downcast_ref::<AppError>() {
            Some(app_error) if app_error.is_fatal() => log::error!("{}", app_error),
            _ => log::error!("Invalid configuration: {:#}", e),
        }
        e
    })?;
    log::debug!("{:?}", config);

    let describer = GeminiClient::new(
        &config.gemini_endpoint,
        &config.model,
        &config.api_key,
        config.timeout,
    )?;
    let speaker = GoogleTts::new(&config.tts_endpoint, config.timeout)?;
    let app = DoodleApp::new(&config, Interpreter::new(describer, speaker));

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("AI Doodle-to-Text"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "doodlespeak",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
