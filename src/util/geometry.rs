// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate transformations between the on-screen
//! display and canvas pixels, arrowhead construction and the color
//! contrast rule used for stamp labels.

use crate::models::stamp::Point;
use image::Rgb;
use std::f32::consts::PI;

/// Angle between the shaft and each side of an arrowhead.
const ARROW_HEAD_ANGLE: f32 = PI / 6.0;

/// Luma above which black text is used on a fill.
const LUMA_THRESHOLD: f32 = 186.0;

/// Scale a canvas of the given size to fit the available area, keeping its aspect ratio.
pub fn fit_size(canvas_width: u32, canvas_height: u32, available_width: f32, available_height: f32) -> (f32, f32) {
    let canvas_aspect = canvas_width as f32 / canvas_height as f32;
    let available_aspect = available_width / available_height;

    if canvas_aspect > available_aspect {
        // Canvas is wider - fit to width
        (available_width, available_width / canvas_aspect)
    } else {
        // Canvas is taller - fit to height
        (available_height * canvas_aspect, available_height)
    }
}

/// Convert a position relative to the displayed canvas into canvas pixels.
pub fn display_to_canvas(
    rel_x: f32,
    rel_y: f32,
    display_width: f32,
    display_height: f32,
    canvas_width: u32,
    canvas_height: u32,
) -> Point {
    Point {
        x: rel_x / display_width * canvas_width as f32,
        y: rel_y / display_height * canvas_height as f32,
    }
}

/// Length of the arrowhead sides for a stroke width.
pub fn arrow_head_length(stroke_width: f32) -> f32 {
    stroke_width * 4.0 + 8.0
}

/// Triangle of an arrowhead pointing at `end`: tip followed by the two back vertices.
pub fn arrowhead(start: Point, end: Point, head_length: f32) -> [Point; 3] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let back = |offset: f32| Point {
        x: end.x - head_length * (angle + offset).cos(),
        y: end.y - head_length * (angle + offset).sin(),
    };
    [end, back(-ARROW_HEAD_ANGLE), back(ARROW_HEAD_ANGLE)]
}

/// Dash and gap length of dashed strokes.
pub fn dash_pattern(stroke_width: f32) -> (f32, f32) {
    (stroke_width * 3.0 + 6.0, stroke_width * 2.0 + 4.0)
}

/// Broadcast luma (0.299R + 0.587G + 0.114B) of a color.
pub fn luma(color: Rgb<u8>) -> f32 {
    let [r, g, b] = color.0;
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Black or white, whichever is legible on `fill`.
pub fn contrast_color(fill: Rgb<u8>) -> Rgb<u8> {
    if luma(fill) > LUMA_THRESHOLD {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}
