// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interpretation result panel.

use crate::interpret::Interpretation;
use crate::models::language::Language;
use std::path::Path;

/// Requests from the result panel.
pub enum OutputAction {
    None,
    Play,
    Stop,
    SaveAudio,
}

/// Display the text and audio of the last interpretation.
pub fn show(
    ui: &mut egui::Ui,
    result: &Interpretation,
    language: Language,
    audio_path: Option<&Path>,
    playing: bool,
) -> OutputAction {
    let mut action = OutputAction::None;

    let Some(text) = result.text() else {
        return action;
    };

    ui.heading(format!("Gemini’s Interpretation ({})", language.name()));
    ui.add_space(4.0);
    ui.label(egui::RichText::new(text).size(16.0));
    ui.add_space(12.0);

    ui.heading("Listen");
    match (result.audio(), audio_path) {
        (Some(audio), Some(path)) => {
            ui.label(
                egui::RichText::new(format!(
                    "{} ({} KB) saved to {}",
                    audio.mime_type,
                    audio.bytes.len() / 1024,
                    path.display()
                ))
                .weak(),
            );
            ui.horizontal(|ui| {
                if playing {
                    if ui.button("⏹ Stop").clicked() {
                        action = OutputAction::Stop;
                    }
                } else if ui.button("▶ Play").clicked() {
                    action = OutputAction::Play;
                }
                if ui.button("💾 Save audio...").clicked() {
                    action = OutputAction::SaveAudio;
                }
            });
        }
        (Some(_), None) => {
            ui.label(egui::RichText::new("Audio could not be stored").weak());
        }
        (None, _) => {
            ui.label(egui::RichText::new("No audio available").weak());
        }
    }

    action
}
