// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the field and the drawn layer.
//!
//! This module shows the field background with the board's composited
//! layer on top and turns pointer input into board events in canvas
//! pixel coordinates.

use crate::models::{board::TacticBoard, stamp::Point};
use crate::util::geometry::{display_to_canvas, fit_size};

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Click(Point),
}

/// Display the canvas area and collect pointer events for this frame.
pub fn show(
    ui: &mut egui::Ui,
    board: &TacticBoard,
    background: &Option<egui::TextureHandle>,
    drawing: &Option<egui::TextureHandle>,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();
    let (canvas_width, canvas_height) = board.dimensions();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let available = ui.available_size();
        let (display_width, display_height) = fit_size(canvas_width, canvas_height, available.x, available.y);

        // Center the board
        let x_offset = (available.x - display_width) / 2.0;
        let y_offset = (available.y - display_height) / 2.0;
        let image_rect = egui::Rect::from_min_size(
            ui.min_rect().min + egui::vec2(x_offset, y_offset),
            egui::vec2(display_width, display_height),
        );
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

        let painter = ui.painter();
        if let Some(texture) = background {
            painter.image(texture.id(), image_rect, uv, egui::Color32::WHITE);
        }
        if let Some(texture) = drawing {
            painter.image(texture.id(), image_rect, uv, egui::Color32::WHITE);
        }

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());
        let to_canvas = |pos: egui::Pos2| {
            let rel = pos - image_rect.min;
            display_to_canvas(rel.x, rel.y, display_width, display_height, canvas_width, canvas_height)
        };

        let (pressed, down, released, pointer_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        let mut stroking = board.is_stroking();
        if let Some(pos) = pointer_pos {
            if pressed && response.hovered() {
                actions.push(CanvasAction::PointerDown(to_canvas(pos)));
                stroking = true;
            } else if stroking && down {
                actions.push(CanvasAction::PointerMove(to_canvas(pos)));
            }
            if stroking && released {
                actions.push(CanvasAction::PointerUp(to_canvas(pos)));
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                actions.push(CanvasAction::Click(to_canvas(pos)));
            }
        }

        let cursor = if board.tools().tool.is_line_tool() {
            egui::CursorIcon::Crosshair
        } else {
            egui::CursorIcon::PointingHand
        };
        if response.hovered() {
            ui.ctx().set_cursor_icon(cursor);
        }
    });

    // Display current tool info at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        let tools = board.tools();
        ui.label(format!("Current tool: {}", tools.tool.label()));
        ui.separator();
        ui.label(format!("Width: {:.0}", tools.stroke_width));
        ui.separator();
        ui.label(format!("Field: {:?} ({}x{})", tools.field, canvas_width, canvas_height));
        if board.is_playing() {
            ui.separator();
            ui.label("Playing");
        }
    });

    actions
}
