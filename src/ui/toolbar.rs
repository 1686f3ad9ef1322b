// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar for picking drawing tools and
//! stamps. Exactly one tool is active at a time.

use crate::models::{stamp::StampKind, tool::Tool};

const LINE_TOOLS: [(Tool, &str); 4] = [
    (Tool::Pen, "✏ Pen"),
    (Tool::DashedPen, "┅ Dashed"),
    (Tool::Arrow, "➡ Arrow"),
    (Tool::Eraser, "⌫ Eraser"),
];

const STAMP_TOOLS: [(Tool, &str); 4] = [
    (Tool::Stamp(StampKind::Player), "● Player"),
    (Tool::Stamp(StampKind::Opponent), "● Opponent"),
    (Tool::Stamp(StampKind::Ball), "⚽ Ball"),
    (Tool::Stamp(StampKind::Numbered), "# Number"),
];

/// Display the toolbar. Returns the tool the user picked, if any.
pub fn show(ui: &mut egui::Ui, current_tool: Tool) -> Option<Tool> {
    let mut picked = None;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Draw:");
        for (tool, text) in LINE_TOOLS {
            if ui.selectable_label(current_tool == tool, text).clicked() {
                picked = Some(tool);
            }
        }

        ui.separator();

        ui.label("Stamps:");
        for (tool, text) in STAMP_TOOLS {
            if ui.selectable_label(current_tool == tool, text).clicked() {
                picked = Some(tool);
            }
        }

        ui.separator();

        // Tool description
        let tool_text = match current_tool {
            Tool::Pen => "Drag to draw a solid line",
            Tool::DashedPen => "Drag to draw a dashed line (runs, passes without ball)",
            Tool::Arrow => "Drag from start to end to draw an arrow",
            Tool::Eraser => "Drag to erase drawn lines",
            Tool::Stamp(StampKind::Numbered) => "Click to place a player with the label from the side panel",
            Tool::Stamp(_) => "Click to place, then the pen is selected again",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });
    picked
}
