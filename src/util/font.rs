// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stamp label rendering.
//!
//! Labels are rasterized with `ab_glyph` from the proportional font stack
//! that ships with egui, so numbers, letters and emoji all draw. Every
//! character uses the first font in the stack that has a glyph for it.

use crate::models::stamp::Point;
use ab_glyph::{point, Font, FontArc, GlyphId, ScaleFont};
use image::{Pixel, Rgba, RgbaImage};
use std::sync::OnceLock;

/// Proportional fonts in fallback order.
fn font_stack() -> &'static [FontArc] {
    static FONTS: OnceLock<Vec<FontArc>> = OnceLock::new();
    FONTS.get_or_init(|| {
        let definitions = egui::FontDefinitions::default();
        let family = definitions
            .families
            .get(&egui::FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();
        family
            .iter()
            .filter_map(|name| {
                let data = definitions.font_data.get(name)?;
                match FontArc::try_from_vec(data.font.to_vec()) {
                    Ok(font) => Some(font),
                    Err(e) => {
                        log::warn!("Skipping label font {}: {}", name, e);
                        None
                    }
                }
            })
            .collect()
    })
}

/// Index into the font stack and glyph for `ch`.
fn lookup(ch: char) -> Option<(usize, GlyphId)> {
    if ch.is_control() {
        return None;
    }
    font_stack()
        .iter()
        .enumerate()
        .map(|(index, font)| (index, font.glyph_id(ch)))
        .find(|(_, id)| id.0 != 0)
}

struct PlacedGlyph {
    font: usize,
    id: GlyphId,
    x: f32,
}

/// Single-line layout at `size` pixels. Returns the glyphs and the line width.
fn layout(text: &str, size: f32) -> (Vec<PlacedGlyph>, f32) {
    let fonts = font_stack();
    let mut placed: Vec<PlacedGlyph> = Vec::new();
    let mut x = 0.0;
    for (font, id) in text.chars().filter_map(lookup) {
        let scaled = fonts[font].as_scaled(size);
        if let Some(prev) = placed.last().filter(|prev| prev.font == font) {
            x += scaled.kern(prev.id, id);
        }
        placed.push(PlacedGlyph { font, id, x });
        x += scaled.h_advance(id);
    }
    (placed, x)
}

/// True if at least one visible character of `text` has a glyph.
pub fn has_glyphs(text: &str) -> bool {
    text.chars().any(|ch| !ch.is_whitespace() && lookup(ch).is_some())
}

/// Width in pixels of `text` at `size`, counting only drawable characters.
pub fn text_width(text: &str, size: f32) -> f32 {
    layout(text, size).1
}

/// Largest size up to `max_size` at which `text` is at most `max_width` wide.
pub fn fit_font_size(text: &str, max_size: f32, max_width: f32) -> f32 {
    let width = text_width(text, max_size);
    if width <= max_width || width <= 0.0 {
        max_size
    } else {
        max_size * max_width / width
    }
}

/// Draw `text` centered on `center` at `size` pixels, blending by glyph coverage.
pub fn draw_text_centered(img: &mut RgbaImage, center: Point, text: &str, size: f32, color: Rgba<u8>) {
    let fonts = font_stack();
    let Some(primary) = fonts.first() else {
        return;
    };
    let (placed, width) = layout(text, size);
    let metrics = primary.as_scaled(size);
    let baseline = center.y + (metrics.ascent() + metrics.descent()) / 2.0;
    let left = center.x - width / 2.0;
    let (img_width, img_height) = img.dimensions();

    for glyph in placed {
        let positioned = glyph.id.with_scale_and_position(size, point(left + glyph.x, baseline));
        let Some(outlined) = fonts[glyph.font].outline_glyph(positioned) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|px, py, coverage| {
            let x = bounds.min.x as i64 + px as i64;
            let y = bounds.min.y as i64 + py as i64;
            if coverage <= 0.0 || x < 0 || y < 0 || x >= img_width as i64 || y >= img_height as i64 {
                return;
            }
            let alpha = (coverage.min(1.0) * color[3] as f32).round() as u8;
            img.get_pixel_mut(x as u32, y as u32)
                .blend(&Rgba([color[0], color[1], color[2], alpha]));
        });
    }
}
