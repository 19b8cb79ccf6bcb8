// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Freehand drawing surface.
//!
//! The surface renders the current canvas state plus the stroke being drawn
//! and reports each finished stroke. It never touches the history itself.

use crate::models::canvas_state::{CanvasState, Point, Stroke};
use crate::models::color::Rgb;
use crate::models::session::Brush;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    StrokeFinished(Stroke),
}

/// Display the drawing surface and handle pointer input.
pub fn show(
    ui: &mut egui::Ui,
    state: &CanvasState,
    size: u32,
    background: Rgb,
    brush: Brush,
    in_progress: &mut Option<Stroke>,
    enabled: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    let side = size as f32;
    let sense = if enabled {
        egui::Sense::drag()
    } else {
        egui::Sense::hover()
    };

    let (response, painter) = ui.allocate_painter(egui::vec2(side, side), sense);
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, background.to_color32());

    if enabled {
        if let Some(pos) = response.interact_pointer_pos() {
            // Canvas pixel coordinates
            let local = pos - rect.min;
            in_progress
                .get_or_insert_with(|| Stroke::new(brush.color, brush.width))
                .add_point(Point::new(local.x, local.y));
        } else if let Some(stroke) = in_progress.take() {
            action = CanvasAction::StrokeFinished(stroke);
        }
    } else {
        *in_progress = None;
    }

    for stroke in state.strokes().iter().chain(in_progress.iter()) {
        paint_stroke(&painter, rect, stroke);
    }
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(120)));

    if enabled {
        response.on_hover_cursor(egui::CursorIcon::Crosshair);
    }
    action
}

fn paint_stroke(painter: &egui::Painter, rect: egui::Rect, stroke: &Stroke) {
    let color = stroke.color.to_color32();
    let to_screen = |p: &Point| rect.min + egui::vec2(p.x, p.y);

    match stroke.points.as_slice() {
        [] => {}
        [only] => {
            painter.circle_filled(to_screen(only), stroke.width / 2.0, color);
        }
        points => {
            let screen: Vec<egui::Pos2> = points.iter().map(to_screen).collect();
            painter.add(egui::Shape::line(screen, egui::Stroke::new(stroke.width, color)));
        }
    }
}
