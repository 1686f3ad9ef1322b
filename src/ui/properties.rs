// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke and stamp properties panel.
//!
//! This module provides the side panel for choosing color, stroke width
//! and the numbered player label, and lists the stamps on the current frame.

use crate::config::to_hex_color;
use crate::models::{
    board::TacticBoard,
    stamp::StampKind,
    tool::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH},
};
use image::Rgb;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SelectColor(Rgb<u8>),
    SetStrokeWidth(f32),
    SetPlayerLabel(String),
}

fn to_color32(color: Rgb<u8>) -> egui::Color32 {
    let [r, g, b] = color.0;
    egui::Color32::from_rgb(r, g, b)
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, board: &TacticBoard, palette: &[Rgb<u8>], label_input: &mut String) -> PropertiesAction {
    let mut action = PropertiesAction::None;
    let tools = board.tools();

    ui.heading("Color");
    ui.horizontal_wrapped(|ui| {
        for &color in palette {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::click());
            ui.painter().rect_filled(rect, 3.0, to_color32(color));
            if color == tools.stroke_color {
                ui.painter().rect_stroke(rect, 3.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
            }
            if response.clicked() {
                action = PropertiesAction::SelectColor(color);
            }
        }

        let mut custom = tools.stroke_color.0;
        if egui::color_picker::color_edit_button_srgb(ui, &mut custom).changed() {
            action = PropertiesAction::SelectColor(Rgb(custom));
        }
    });
    ui.label(egui::RichText::new(to_hex_color(tools.stroke_color)).monospace().weak());

    ui.add_space(8.0);
    ui.heading("Stroke");
    let mut width = tools.stroke_width;
    if ui
        .add(egui::Slider::new(&mut width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).text("Width"))
        .changed()
    {
        action = PropertiesAction::SetStrokeWidth(width);
    }

    ui.add_space(8.0);
    ui.heading("Player label");
    if ui.text_edit_singleline(label_input).changed() {
        action = PropertiesAction::SetPlayerLabel(label_input.clone());
    }
    ui.label(egui::RichText::new("Number, letter or emoji for the # Number stamp").weak());

    ui.add_space(8.0);
    ui.separator();
    let objects = &board.current_frame().objects;
    ui.heading(format!("Stamps on frame {} ({})", board.current_index() + 1, objects.len()));
    ui.label(
        egui::RichText::new(format!(
            "Undo steps: {} (history {} KB)",
            board.undo_depth(),
            board.history_bytes() / 1024
        ))
        .weak(),
    );
    egui::ScrollArea::vertical().show(ui, |ui| {
        for stamp in objects {
            let name = match stamp.kind {
                StampKind::Player => "Player".to_string(),
                StampKind::Opponent => "Opponent".to_string(),
                StampKind::Ball => "Ball".to_string(),
                StampKind::Numbered => format!("Player {}", stamp.label),
            };
            ui.horizontal(|ui| {
                ui.colored_label(to_color32(stamp.color), "●");
                ui.label(format!("{} at ({:.0}, {:.0})", name, stamp.position.x, stamp.position.y));
            });
        }
    });

    action
}
