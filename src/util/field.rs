// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Procedural field backgrounds.
//!
//! Used when no background image is configured for a field kind.

use super::raster::{fill_disc, stroke_circle, stroke_segment};
use crate::models::{stamp::Point, tool::FieldKind};
use image::{Rgba, RgbaImage};

const GRASS_LIGHT: Rgba<u8> = Rgba([58, 140, 66, 255]);
const GRASS_DARK: Rgba<u8> = Rgba([50, 124, 58, 255]);
const LINE: Rgba<u8> = Rgba([245, 245, 245, 255]);

/// Render a field of the given kind at the given canvas size.
pub fn render(kind: FieldKind, width: u32, height: u32) -> RgbaImage {
    let stripes = 10;
    let stripe = (width / stripes).max(1);
    let mut img = RgbaImage::from_fn(width, height, |x, _| {
        if (x / stripe) % 2 == 0 {
            GRASS_LIGHT
        } else {
            GRASS_DARK
        }
    });

    let (w, h) = (width as f32, height as f32);
    let margin = (w.min(h) * 0.05).max(4.0);
    let line = (w.min(h) / 200.0).max(2.0);
    let (left, top, right, bottom) = (margin, margin, w - margin, h - margin);

    let segment = |img: &mut RgbaImage, ax: f32, ay: f32, bx: f32, by: f32| {
        stroke_segment(img, Point::new(ax, ay), Point::new(bx, by), line, LINE);
    };
    let rect = |img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32| {
        segment(img, x0, y0, x1, y0);
        segment(img, x1, y0, x1, y1);
        segment(img, x1, y1, x0, y1);
        segment(img, x0, y1, x0, y0);
    };

    rect(&mut img, left, top, right, bottom);
    match kind {
        FieldKind::Full => {
            // Landscape pitch, goals on the left and right
            let (cx, cy) = (w / 2.0, h / 2.0);
            let pitch_h = bottom - top;
            let box_depth = (right - left) * 0.16;
            let box_half = pitch_h * 0.3;
            segment(&mut img, cx, top, cx, bottom);
            stroke_circle(&mut img, Point::new(cx, cy), pitch_h * 0.15, line, LINE);
            fill_disc(&mut img, Point::new(cx, cy), line * 1.5, LINE);
            rect(&mut img, left, cy - box_half, left + box_depth, cy + box_half);
            rect(&mut img, right - box_depth, cy - box_half, right, cy + box_half);
        }
        FieldKind::Half => {
            // Halfway line on top, goal at the bottom
            let cx = w / 2.0;
            let pitch_w = right - left;
            let box_depth = (bottom - top) * 0.3;
            let box_half = pitch_w * 0.3;
            stroke_circle(&mut img, Point::new(cx, top), pitch_w * 0.15, line, LINE);
            rect(&mut img, cx - box_half, bottom - box_depth, cx + box_half, bottom);
            fill_disc(&mut img, Point::new(cx, bottom - box_depth * 0.7), line * 1.5, LINE);
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_matches_requested_size() {
        let img = render(FieldKind::Half, 320, 240);
        assert_eq!(img.dimensions(), (320, 240));
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_full_and_half_differ() {
        assert_ne!(render(FieldKind::Full, 200, 130), render(FieldKind::Half, 200, 130));
    }
}
