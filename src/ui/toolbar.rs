// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sidebar with drawing controls, edit actions and language selection.

use crate::models::color::Rgb;
use crate::models::language::Language;
use crate::models::session::{Brush, Session};

/// Requests from the sidebar that change the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    None,
    Undo,
    Redo,
    Clear,
    Reset,
    Background(Rgb),
}

/// Display the sidebar. Pen and language settings are edited in place.
pub fn show(ui: &mut egui::Ui, session: &mut Session) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.heading("Drawing Controls");
    ui.add_space(4.0);

    ui.add(
        egui::Slider::new(&mut session.brush.width, Brush::MIN_WIDTH..=Brush::MAX_WIDTH)
            .step_by(1.0)
            .text("Pen size"),
    );

    ui.horizontal(|ui| {
        let mut pen = session.brush.color.0;
        if ui.color_edit_button_srgb(&mut pen).changed() {
            session.brush.color = Rgb(pen);
        }
        ui.label("Pen color");
    });

    ui.horizontal(|ui| {
        let mut background = session.background.0;
        if ui.color_edit_button_srgb(&mut background).changed() {
            action = ToolbarAction::Background(Rgb(background));
        }
        ui.label("Background color");
    });

    ui.separator();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(session.history.can_undo(), egui::Button::new("↶ Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            action = ToolbarAction::Undo;
        }
        if ui
            .add_enabled(session.history.can_redo(), egui::Button::new("↷ Redo"))
            .on_hover_text("Ctrl+Shift+Z")
            .clicked()
        {
            action = ToolbarAction::Redo;
        }
        if ui
            .add_enabled(
                !session.history.current().is_empty(),
                egui::Button::new("🗑 Delete all"),
            )
            .clicked()
        {
            action = ToolbarAction::Clear;
        }
    });

    if ui
        .button("⟲ Start over")
        .on_hover_text("Clear the canvas, its history and the current image")
        .clicked()
    {
        action = ToolbarAction::Reset;
    }

    ui.separator();

    ui.heading("Output Language");
    egui::ComboBox::from_id_source("language")
        .selected_text(session.language.name())
        .show_ui(ui, |ui| {
            for lang in Language::ALL {
                ui.selectable_value(&mut session.language, lang, lang.name());
            }
        });

    action
}
