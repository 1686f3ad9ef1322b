// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Software rasterizer for the board's drawn layer.
//!
//! Strokes are built by dabbing filled discs along the pointer path, the
//! same way a round brush is swept over a canvas.

use crate::models::stamp::Point;
use image::{Pixel, Rgba, RgbaImage};

/// Fully transparent pixel.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Progress along a dashed stroke, carried across segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashState {
    pub distance: f32,
}

/// Clamped bounding box of a disc, in pixel indices.
fn disc_bounds(img: &RgbaImage, center: Point, radius: f32) -> Option<(u32, u32, u32, u32)> {
    let (width, height) = img.dimensions();
    let min_x = (center.x - radius).floor().max(0.0);
    let min_y = (center.y - radius).floor().max(0.0);
    let max_x = (center.x + radius).ceil().min(width as f32 - 1.0);
    let max_y = (center.y + radius).ceil().min(height as f32 - 1.0);
    if max_x < min_x || max_y < min_y {
        return None;
    }
    Some((min_x as u32, min_y as u32, max_x as u32, max_y as u32))
}

/// Apply `f` to every pixel whose center lies inside the disc.
fn for_disc(img: &mut RgbaImage, center: Point, radius: f32, mut f: impl FnMut(&mut Rgba<u8>)) {
    // Sub-pixel brushes still touch the pixel under the pointer
    let radius = radius.max(0.5);
    let Some((min_x, min_y, max_x, max_y)) = disc_bounds(img, center, radius) else {
        return;
    };
    let r2 = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= r2 {
                f(img.get_pixel_mut(x, y));
            }
        }
    }
}

/// Alpha-blend a filled disc onto the layer.
pub fn fill_disc(img: &mut RgbaImage, center: Point, radius: f32, color: Rgba<u8>) {
    for_disc(img, center, radius, |px| px.blend(&color));
}

/// Clear a disc back to transparent.
pub fn erase_disc(img: &mut RgbaImage, center: Point, radius: f32) {
    for_disc(img, center, radius, |px| *px = TRANSPARENT);
}

/// Call `dab` at evenly spaced points from `a` to `b`, both ends included.
fn walk_segment(a: Point, b: Point, spacing: f32, mut dab: impl FnMut(Point, f32)) {
    let length = a.distance(b);
    let steps = (length / spacing.max(0.5)).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let point = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        dab(point, length * t);
    }
}

/// Solid stroke of the given line width from `a` to `b`.
pub fn stroke_segment(img: &mut RgbaImage, a: Point, b: Point, width: f32, color: Rgba<u8>) {
    let radius = width / 2.0;
    walk_segment(a, b, radius / 2.0, |p, _| fill_disc(img, p, radius, color));
}

/// Erasing stroke of the given line width from `a` to `b`.
pub fn erase_segment(img: &mut RgbaImage, a: Point, b: Point, width: f32) {
    let radius = width / 2.0;
    walk_segment(a, b, radius / 2.0, |p, _| erase_disc(img, p, radius));
}

/// Dashed stroke continuing the pattern recorded in `state`.
pub fn dashed_segment(
    img: &mut RgbaImage,
    a: Point,
    b: Point,
    width: f32,
    color: Rgba<u8>,
    (dash, gap): (f32, f32),
    state: &mut DashState,
) {
    let radius = width / 2.0;
    let period = dash + gap;
    let start = state.distance;
    walk_segment(a, b, 1.0, |p, travelled| {
        if (start + travelled) % period < dash {
            fill_disc(img, p, radius, color);
        }
    });
    state.distance += a.distance(b);
}

/// Fill a triangle, used for arrowheads.
pub fn fill_triangle(img: &mut RgbaImage, [a, b, c]: [Point; 3], color: Rgba<u8>) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
    let max_x = a.x.max(b.x).max(c.x).ceil().min(width as f32 - 1.0);
    let max_y = a.y.max(b.y).max(c.y).ceil().min(height as f32 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }

    let edge = |p: Point, q: Point, x: f32, y: f32| (q.x - p.x) * (y - p.y) - (q.y - p.y) * (x - p.x);
    for y in min_y..=max_y as u32 {
        for x in min_x..=max_x as u32 {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let e0 = edge(a, b, px, py);
            let e1 = edge(b, c, px, py);
            let e2 = edge(c, a, px, py);
            // Either winding order counts as inside
            let inside = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
            if inside {
                img.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}

/// Outline a circle with a ring of the given line width.
pub fn stroke_circle(img: &mut RgbaImage, center: Point, radius: f32, width: f32, color: Rgba<u8>) {
    let outer = radius + width / 2.0;
    let inner = (radius - width / 2.0).max(0.0);
    let Some((min_x, min_y, max_x, max_y)) = disc_bounds(img, center, outer) else {
        return;
    };
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            let d2 = dx * dx + dy * dy;
            if d2 <= outer * outer && d2 >= inner * inner {
                img.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn painted(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p[3] > 0).count()
    }

    #[test]
    fn test_fill_disc_clips_at_edges() {
        let mut img = RgbaImage::new(10, 10);
        fill_disc(&mut img, Point::new(0.0, 0.0), 3.0, RED);
        assert!(painted(&img) > 0);
        assert_eq!(img.get_pixel(0, 0), &RED);
        assert_eq!(img.get_pixel(9, 9), &TRANSPARENT);
    }

    #[test]
    fn test_disc_outside_canvas_is_ignored() {
        let mut img = RgbaImage::new(10, 10);
        fill_disc(&mut img, Point::new(-50.0, -50.0), 3.0, RED);
        assert_eq!(painted(&img), 0);
    }

    #[test]
    fn test_stroke_segment_covers_path() {
        let mut img = RgbaImage::new(40, 10);
        stroke_segment(&mut img, Point::new(2.0, 5.0), Point::new(37.0, 5.0), 2.0, RED);
        for x in 2..37 {
            assert_eq!(img.get_pixel(x, 5), &RED, "gap at x={x}");
        }
    }

    #[test]
    fn test_dashed_segment_leaves_gaps() {
        let mut img = RgbaImage::new(60, 10);
        let mut state = DashState::default();
        dashed_segment(&mut img, Point::new(0.0, 5.0), Point::new(59.0, 5.0), 2.0, RED, (10.0, 10.0), &mut state);
        assert_eq!(img.get_pixel(4, 5), &RED);
        assert_eq!(img.get_pixel(15, 5), &TRANSPARENT);
        assert_eq!(img.get_pixel(25, 5), &RED);
        assert!((state.distance - 59.0).abs() < 0.001);
    }

    #[test]
    fn test_erase_segment_clears_pixels() {
        let mut img = RgbaImage::from_pixel(20, 20, RED);
        erase_segment(&mut img, Point::new(0.0, 10.0), Point::new(20.0, 10.0), 4.0);
        assert_eq!(img.get_pixel(10, 10), &TRANSPARENT);
        assert_eq!(img.get_pixel(10, 0), &RED);
    }

    #[test]
    fn test_fill_triangle_either_winding() {
        let tri = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
        let mut cw = RgbaImage::new(12, 12);
        fill_triangle(&mut cw, tri, RED);
        let mut ccw = RgbaImage::new(12, 12);
        fill_triangle(&mut ccw, [tri[0], tri[2], tri[1]], RED);
        assert_eq!(cw, ccw);
        assert_eq!(cw.get_pixel(1, 1), &RED);
        assert_eq!(cw.get_pixel(9, 9), &TRANSPARENT);
    }
}
