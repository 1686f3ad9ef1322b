// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame timeline controls.
//!
//! This module provides the bar for navigating, adding and removing
//! animation frames and for starting and pausing playback.

use crate::models::board::TacticBoard;

/// Result of timeline interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineAction {
    None,
    PrevFrame,
    NextFrame,
    NewFrame,
    DeleteFrame,
    ClearFrame,
    Undo,
    Play,
    Pause,
}

/// Display the timeline bar.
pub fn show(ui: &mut egui::Ui, board: &TacticBoard) -> TimelineAction {
    let mut action = TimelineAction::None;
    let count = board.frame_count();
    let shown = board.shown_index();

    ui.horizontal(|ui| {
        if ui.add_enabled(shown > 0, egui::Button::new("⏮ Prev")).clicked() {
            action = TimelineAction::PrevFrame;
        }

        // One box per frame, highlighting the one on screen
        for index in 0..count {
            let text = egui::RichText::new(format!("{}", index + 1));
            ui.label(if index == shown { text.strong().underline() } else { text.weak() });
        }

        if ui.add_enabled(shown + 1 < count, egui::Button::new("Next ⏭")).clicked() {
            action = TimelineAction::NextFrame;
        }

        ui.separator();

        if board.is_playing() {
            if ui.button("⏸ Pause").clicked() {
                action = TimelineAction::Pause;
            }
        } else if ui.button("▶ Play").clicked() {
            action = TimelineAction::Play;
        }

        ui.separator();

        if ui.button("➕ New frame").clicked() {
            action = TimelineAction::NewFrame;
        }
        if ui.add_enabled(count > 1, egui::Button::new("🗑 Delete frame")).clicked() {
            action = TimelineAction::DeleteFrame;
        }
        if ui.button("Clear frame").clicked() {
            action = TimelineAction::ClearFrame;
        }
        if ui.add_enabled(board.can_undo(), egui::Button::new("↶ Undo")).clicked() {
            action = TimelineAction::Undo;
        }

        ui.separator();
        ui.label(format!("Frame {} / {}", shown + 1, count));
    });

    action
}
