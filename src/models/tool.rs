// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tool selection and drawing settings.

use super::stamp::StampKind;
use image::Rgb;

/// Thinnest stroke the board accepts.
pub const MIN_STROKE_WIDTH: f32 = 1.0;

/// Thickest stroke the board accepts.
pub const MAX_STROKE_WIDTH: f32 = 20.0;

/// Current drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    DashedPen,
    Arrow,
    Eraser,
    Stamp(StampKind),
}

impl Tool {
    /// Tools that paint along a pointer drag.
    pub fn is_line_tool(self) -> bool {
        !matches!(self, Tool::Stamp(_))
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::DashedPen => "Dashed",
            Tool::Arrow => "Arrow",
            Tool::Eraser => "Eraser",
            Tool::Stamp(StampKind::Player) => "Player",
            Tool::Stamp(StampKind::Opponent) => "Opponent",
            Tool::Stamp(StampKind::Ball) => "Ball",
            Tool::Stamp(StampKind::Numbered) => "Number",
        }
    }
}

/// Field background variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Full,
    Half,
}

/// Active tool, stroke and field settings of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    pub tool: Tool,
    pub stroke_width: f32,
    pub stroke_color: Rgb<u8>,
    pub field: FieldKind,
    /// Label used by the next numbered player stamp.
    pub player_label: String,
}

impl ToolState {
    pub fn new(stroke_width: f32, stroke_color: Rgb<u8>) -> Self {
        Self {
            tool: Tool::Pen,
            stroke_width: stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
            stroke_color,
            field: FieldKind::Full,
            player_label: String::new(),
        }
    }

    /// Radius of the eraser brush (three times the stroke line width).
    pub fn eraser_radius(&self) -> f32 {
        self.stroke_width * 3.0 / 2.0
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(3.0, Rgb([229, 57, 53]))
    }
}
