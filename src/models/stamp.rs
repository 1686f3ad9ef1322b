// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stamp data structures.
//!
//! This module defines the discrete markers (players, opponents, ball and
//! numbered players) that are placed on the board with a single click.

use image::Rgb;

/// Radius of player and opponent markers in canvas pixels.
pub const MARKER_RADIUS: f32 = 12.0;

/// Radius of the ball marker in canvas pixels.
pub const BALL_RADIUS: f32 = 8.0;

/// Base radius of numbered player stamps; the stroke width is added on top.
pub const STAMP_BASE_RADIUS: f32 = 10.0;

/// A 2D point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Kind of stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampKind {
    /// Own player (marker A).
    Player,
    /// Opponent (marker B).
    Opponent,
    Ball,
    /// Player disc carrying an operator supplied label.
    Numbered,
}

impl StampKind {
    /// Fill color used by the fixed-color kinds.
    pub fn default_color(self) -> Option<Rgb<u8>> {
        match self {
            StampKind::Player => Some(Rgb([30, 90, 200])),
            StampKind::Opponent => Some(Rgb([210, 40, 40])),
            StampKind::Ball => Some(Rgb([255, 255, 255])),
            StampKind::Numbered => None,
        }
    }

    /// Radius for a stamp of this kind at the given stroke width.
    pub fn radius(self, stroke_width: f32) -> f32 {
        match self {
            StampKind::Player | StampKind::Opponent => MARKER_RADIUS,
            StampKind::Ball => BALL_RADIUS,
            StampKind::Numbered => STAMP_BASE_RADIUS + stroke_width,
        }
    }
}

/// A placed stamp. Stamps are never edited after placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub position: Point,
    pub kind: StampKind,
    pub color: Rgb<u8>,
    pub label: String,
    pub radius: f32,
}

impl Stamp {
    /// Create a stamp of the given kind.
    ///
    /// Fixed-color kinds ignore `color`; only numbered stamps keep `label`.
    pub fn new(kind: StampKind, position: Point, color: Rgb<u8>, label: &str, stroke_width: f32) -> Self {
        let label = match kind {
            StampKind::Numbered => label.trim().to_string(),
            _ => String::new(),
        };
        Self {
            position,
            kind,
            color: kind.default_color().unwrap_or(color),
            label,
            radius: kind.radius(stroke_width),
        }
    }

    /// Label text color that stays legible on this stamp's fill.
    pub fn label_color(&self) -> Rgb<u8> {
        crate::util::geometry::contrast_color(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_radius_scales_with_width() {
        let stamp = Stamp::new(StampKind::Numbered, Point::new(5.0, 5.0), Rgb([0, 0, 0]), "9", 4.0);
        assert_eq!(stamp.radius, STAMP_BASE_RADIUS + 4.0);
        assert_eq!(stamp.label, "9");
    }

    #[test]
    fn test_fixed_kinds_ignore_color_and_label() {
        let stamp = Stamp::new(StampKind::Ball, Point::default(), Rgb([1, 2, 3]), "7", 10.0);
        assert_eq!(stamp.color, Rgb([255, 255, 255]));
        assert_eq!(stamp.radius, BALL_RADIUS);
        assert!(stamp.label.is_empty());
    }

    #[test]
    fn test_label_color_on_light_fill_is_black() {
        let stamp = Stamp::new(StampKind::Numbered, Point::default(), Rgb([250, 240, 60]), "10", 3.0);
        assert_eq!(stamp.label_color(), Rgb([0, 0, 0]));
    }
}
