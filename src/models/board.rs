// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The tactic board drawing engine.
//!
//! `TacticBoard` owns every piece of board state: the frame sequence with
//! the per-frame undo histories, the active tool settings, the stroke in
//! progress and the playback timer. The UI layer only translates pointer
//! and button events into calls on this type and displays `composite()`.
//!
//! Two cursors are tracked. The edit cursor (`current`) is where drawing
//! and navigation happen; the display cursor (`display`) is what playback
//! shows. They only differ while playing, and `pause()` moves the edit
//! cursor to the frame that was on screen.

use super::{
    frame::Frame,
    playback::{Playback, DEFAULT_INTERVAL},
    stamp::{Point, Stamp, StampKind},
    tool::{FieldKind, Tool, ToolState, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH},
};
use crate::error::BoardError;
use crate::util::{
    font,
    geometry::{arrow_head_length, arrowhead, dash_pattern},
    raster::{self, DashState},
};
use image::{Rgb, Rgba, RgbaImage};
use std::path::Path;
use std::time::Duration;

/// Outline drawn around stamps.
const STAMP_OUTLINE: Rgba<u8> = Rgba([20, 20, 20, 255]);

/// Tunables the board is created with.
#[derive(Debug, Clone)]
pub struct BoardSettings {
    pub history_limit: usize,
    pub playback_interval: Duration,
    pub stroke_width: f32,
    pub stroke_color: Rgb<u8>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            history_limit: 50,
            playback_interval: DEFAULT_INTERVAL,
            stroke_width: 3.0,
            stroke_color: Rgb([229, 57, 53]),
        }
    }
}

/// A stroke between pointer down and pointer up.
#[derive(Debug, Clone)]
struct ActiveStroke {
    tool: Tool,
    start: Point,
    last: Point,
    dash: DashState,
}

/// Tactic board state and operations.
pub struct TacticBoard {
    frames: Vec<Frame>,
    /// Edit cursor
    current: usize,
    /// Display cursor used by playback
    display: usize,
    tools: ToolState,
    width: u32,
    height: u32,
    history_limit: usize,
    stroke: Option<ActiveStroke>,
    playback: Playback,
    /// Bumped on every visible change so the UI knows when to re-upload
    revision: u64,
}

impl TacticBoard {
    /// Create a board with one empty frame on a full field.
    pub fn new(width: u32, height: u32, settings: BoardSettings) -> Self {
        let history_limit = settings.history_limit.max(1);
        Self {
            frames: vec![Frame::blank(width, height, history_limit)],
            current: 0,
            display: 0,
            tools: ToolState::new(settings.stroke_width, settings.stroke_color),
            width,
            height,
            history_limit,
            stroke: None,
            playback: Playback::new(settings.playback_interval),
            revision: 0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Index of the frame being edited.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the frame on screen.
    pub fn shown_index(&self) -> usize {
        if self.playback.is_playing() {
            self.display
        } else {
            self.current
        }
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Time until the next playback step, if playing.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.playback.is_playing().then(|| self.playback.remaining())
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.current_frame().history.can_undo()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    // --- tool state -------------------------------------------------------

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tools.tool != tool {
            log::debug!("Selected tool {:?}", tool);
        }
        self.tools.tool = tool;
    }

    pub fn select_color(&mut self, color: Rgb<u8>) {
        self.tools.stroke_color = color;
    }

    /// Set the stroke width; eraser and numbered stamp sizes follow it.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.tools.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    pub fn set_player_label(&mut self, label: &str) {
        self.tools.player_label = label.to_string();
    }

    // --- pointer input ----------------------------------------------------

    /// Begin a stroke for line tools. Stamp tools wait for `click`.
    pub fn pointer_down(&mut self, pos: Point) {
        self.pause();
        let tool = self.tools.tool;
        if !tool.is_line_tool() {
            return;
        }

        let mut stroke = ActiveStroke {
            tool,
            start: pos,
            last: pos,
            dash: DashState::default(),
        };
        // A click without movement still leaves a dot
        self.paint_segment(&mut stroke, pos, pos);
        self.stroke = Some(stroke);
        self.touch();
    }

    /// Extend the active stroke to `pos`, painting as it goes.
    pub fn pointer_move(&mut self, pos: Point) {
        let Some(mut stroke) = self.stroke.take() else {
            return;
        };
        if pos != stroke.last {
            let from = stroke.last;
            self.paint_segment(&mut stroke, from, pos);
            stroke.last = pos;
            self.touch();
        }
        self.stroke = Some(stroke);
    }

    /// Finish the active stroke and commit it to the frame history.
    pub fn pointer_up(&mut self, pos: Point) {
        self.pointer_move(pos);
        let Some(stroke) = self.stroke.take() else {
            return;
        };

        if stroke.tool == Tool::Arrow {
            let width = self.tools.stroke_width;
            let color = self.stroke_rgba();
            draw_arrow(&mut self.frame_mut().drawings, stroke.start, pos, width, color);
        }
        self.frame_mut().commit();
        self.touch();
        log::debug!("Finished {:?} stroke on frame {}", stroke.tool, self.current + 1);
    }

    /// Place a stamp at `pos` when a stamp tool is active.
    ///
    /// Returns `Ok(false)` for line tools. After placing, the tool reverts to the pen.
    pub fn click(&mut self, pos: Point) -> Result<bool, BoardError> {
        let Tool::Stamp(kind) = self.tools.tool else {
            return Ok(false);
        };
        self.pause();
        if kind == StampKind::Numbered {
            let label = self.tools.player_label.trim();
            if label.is_empty() {
                log::warn!("Refused numbered stamp without a label");
                return Err(BoardError::EmptyLabel);
            }
            if !font::has_glyphs(label) {
                log::warn!("Refused numbered stamp with undrawable label {:?}", label);
                return Err(BoardError::UnrenderableLabel);
            }
        }

        let stamp = Stamp::new(
            kind,
            pos,
            self.tools.stroke_color,
            &self.tools.player_label,
            self.tools.stroke_width,
        );
        let frame = self.frame_mut();
        frame.objects.push(stamp);
        frame.commit();
        self.tools.tool = Tool::Pen;
        self.touch();
        log::debug!("Placed {:?} stamp at ({:.1}, {:.1})", kind, pos.x, pos.y);
        Ok(true)
    }

    fn stroke_rgba(&self) -> Rgba<u8> {
        let [r, g, b] = self.tools.stroke_color.0;
        Rgba([r, g, b, 255])
    }

    /// Paint the part of a stroke between two pointer positions.
    fn paint_segment(&mut self, stroke: &mut ActiveStroke, from: Point, to: Point) {
        let width = self.tools.stroke_width;
        let color = self.stroke_rgba();
        let eraser_width = self.tools.eraser_radius() * 2.0;
        let layer = &mut self.frames[self.current].drawings;
        match stroke.tool {
            Tool::Pen => raster::stroke_segment(layer, from, to, width, color),
            Tool::DashedPen => {
                raster::dashed_segment(layer, from, to, width, color, dash_pattern(width), &mut stroke.dash)
            }
            Tool::Eraser => raster::erase_segment(layer, from, to, eraser_width),
            // Previewed in `composite` and baked on pointer up
            Tool::Arrow | Tool::Stamp(_) => {}
        }
    }

    // --- history ------------------------------------------------------------

    /// Step the current frame back one committed state.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.pause();
        if self.stroke.is_some() {
            return false;
        }
        let undone = self.frame_mut().undo();
        if undone {
            self.touch();
            log::info!("Undo on frame {}", self.current + 1);
        }
        undone
    }

    /// Empty the current frame. Callers confirm with the operator first.
    pub fn clear_frame(&mut self) {
        self.pause();
        self.stroke = None;
        let frame = self.frame_mut();
        frame.clear();
        frame.commit();
        self.touch();
        log::info!("Cleared frame {}", self.current + 1);
    }

    // --- frames -------------------------------------------------------------

    /// Insert a copy of the current frame after it and make it current.
    pub fn new_frame(&mut self) {
        self.pause();
        self.stroke = None;
        self.frame_mut().commit();
        let copy = Frame::from_snapshot(self.current_frame().snapshot(), self.history_limit);
        self.current += 1;
        self.frames.insert(self.current, copy);
        self.touch();
        log::info!("Added frame {} of {}", self.current + 1, self.frames.len());
    }

    /// Remove the current frame and its history. Callers confirm first.
    pub fn delete_frame(&mut self) -> Result<(), BoardError> {
        if self.frames.len() <= 1 {
            log::warn!("Refused to delete the last frame");
            return Err(BoardError::LastFrame);
        }
        self.pause();
        self.stroke = None;
        self.frames.remove(self.current);
        self.current = self.current.min(self.frames.len() - 1);
        self.touch();
        log::info!("Deleted frame, now on {} of {}", self.current + 1, self.frames.len());
        Ok(())
    }

    pub fn prev_frame(&mut self) -> bool {
        self.pause();
        self.navigate(self.current.checked_sub(1))
    }

    pub fn next_frame(&mut self) -> bool {
        self.pause();
        let target = self.current + 1;
        self.navigate((target < self.frames.len()).then_some(target))
    }

    /// Commit the current frame, then move to `target` if there is one.
    fn navigate(&mut self, target: Option<usize>) -> bool {
        self.stroke = None;
        self.frame_mut().commit();
        match target {
            Some(index) => {
                self.current = index;
                self.touch();
                log::debug!("Showing frame {} of {}", index + 1, self.frames.len());
                true
            }
            None => false,
        }
    }

    // --- playback -----------------------------------------------------------

    /// Start looping through the frames from the current one.
    pub fn play(&mut self) {
        if self.playback.is_playing() {
            return;
        }
        self.stroke = None;
        self.frame_mut().commit();
        self.display = self.current;
        self.playback.start();
        log::info!("Playback started");
    }

    /// Stop playback; editing continues on the frame that was on screen.
    pub fn pause(&mut self) {
        if !self.playback.is_playing() {
            return;
        }
        self.playback.stop();
        self.current = self.display;
        self.touch();
        log::info!("Playback paused on frame {}", self.current + 1);
    }

    /// Advance playback by `dt`. Returns true when a different frame is due on screen.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let steps = self.playback.advance(dt) as usize;
        if steps == 0 {
            return false;
        }
        self.display = (self.display + steps) % self.frames.len();
        self.touch();
        true
    }

    // --- field --------------------------------------------------------------

    /// Switch the field background and reset to one empty frame sized for it.
    ///
    /// Returns false if that field is already active at that size.
    pub fn switch_field(&mut self, kind: FieldKind, width: u32, height: u32) -> bool {
        if self.tools.field == kind && self.dimensions() == (width, height) {
            return false;
        }
        self.pause();
        self.stroke = None;
        self.tools.field = kind;
        self.width = width;
        self.height = height;
        self.frames = vec![Frame::blank(width, height, self.history_limit)];
        self.current = 0;
        self.display = 0;
        self.touch();
        log::info!("Switched to {:?} field ({}x{})", kind, width, height);
        true
    }

    // --- rendering and export -------------------------------------------------

    /// Drawn layer of the frame on screen with stamps and any arrow preview on top.
    ///
    /// The field background is not included.
    pub fn composite(&self) -> RgbaImage {
        let mut img = self.render_frame(self.shown_index());
        if let Some(stroke) = self.stroke.as_ref().filter(|s| s.tool == Tool::Arrow) {
            draw_arrow(&mut img, stroke.start, stroke.last, self.tools.stroke_width, self.stroke_rgba());
        }
        img
    }

    fn render_frame(&self, index: usize) -> RgbaImage {
        let frame = &self.frames[index];
        let mut img = frame.drawings.clone();
        for stamp in &frame.objects {
            draw_stamp(&mut img, stamp);
        }
        img
    }

    /// Download name for the current frame, numbered from 1.
    pub fn export_file_name(&self) -> String {
        format!("Taktiktafel_Frame_{}.png", self.current + 1)
    }

    /// Write the current frame (without background) as PNG.
    pub fn export_current_frame(&self, path: &Path) -> Result<(), BoardError> {
        crate::io::media::save_png(&self.render_frame(self.current), path)?;
        log::info!("Exported frame {} to {}", self.current + 1, path.display());
        Ok(())
    }

    /// Undo steps available on the current frame.
    pub fn undo_depth(&self) -> usize {
        self.current_frame().history.len() - 1
    }

    /// Bytes held by the undo histories of all frames.
    pub fn history_bytes(&self) -> usize {
        self.frames.iter().map(|frame| frame.history.byte_size()).sum()
    }
}

/// Straight shaft from `start` to `end` with a filled arrowhead at `end`.
fn draw_arrow(img: &mut RgbaImage, start: Point, end: Point, width: f32, color: Rgba<u8>) {
    raster::stroke_segment(img, start, end, width, color);
    if start != end {
        raster::fill_triangle(img, arrowhead(start, end, arrow_head_length(width)), color);
    }
}

fn draw_stamp(img: &mut RgbaImage, stamp: &Stamp) {
    let [r, g, b] = stamp.color.0;
    let fill = Rgba([r, g, b, 255]);
    raster::fill_disc(img, stamp.position, stamp.radius, fill);
    raster::stroke_circle(img, stamp.position, stamp.radius, 2.0, STAMP_OUTLINE);

    match stamp.kind {
        StampKind::Ball => raster::fill_disc(img, stamp.position, stamp.radius / 3.0, STAMP_OUTLINE),
        StampKind::Numbered => {
            let [r, g, b] = stamp.label_color().0;
            // Keep the label inside the disc
            let size = font::fit_font_size(&stamp.label, stamp.radius * 1.2, stamp.radius * 1.6);
            font::draw_text_centered(img, stamp.position, &stamp.label, size, Rgba([r, g, b, 255]));
        }
        StampKind::Player | StampKind::Opponent => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::Snapshot;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn board() -> TacticBoard {
        TacticBoard::new(120, 80, BoardSettings::default())
    }

    fn draw_line(board: &mut TacticBoard, from: Point, to: Point) {
        board.pointer_down(from);
        board.pointer_move(Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0));
        board.pointer_up(to);
    }

    fn place(board: &mut TacticBoard, kind: StampKind, pos: Point) {
        board.select_tool(Tool::Stamp(kind));
        assert!(board.click(pos).unwrap());
    }

    #[test]
    fn test_starts_with_one_empty_frame() {
        let board = board();
        assert_eq!(board.frame_count(), 1);
        assert_eq!(board.current_index(), 0);
        assert!(!board.can_undo());
        assert_eq!(board.tools().tool, Tool::Pen);
    }

    #[test]
    fn test_pen_stroke_paints_and_undo_reverts() {
        let mut board = board();
        let before = board.current_frame().drawings.clone();

        board.select_color(RED);
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(100.0, 60.0));
        assert_ne!(board.current_frame().drawings, before);

        assert!(board.undo());
        assert_eq!(board.current_frame().drawings, before);
    }

    #[test]
    fn test_strokes_paint_while_dragging() {
        for tool in [Tool::Pen, Tool::DashedPen] {
            let mut board = board();
            board.select_tool(tool);
            board.pointer_down(Point::new(10.0, 40.0));
            let revision = board.revision();
            board.pointer_move(Point::new(110.0, 40.0));

            // Visible before the pointer is released, committed only after
            assert!(board.revision() > revision);
            let painted = (12..108).filter(|&x| board.current_frame().drawings.get_pixel(x, 40)[3] > 0).count();
            assert!(painted > 40, "{tool:?} painted {painted} pixels");
            assert!(!board.can_undo());

            board.pointer_up(Point::new(110.0, 40.0));
            assert!(board.can_undo());
        }
    }

    #[test]
    fn test_history_memory_is_bounded_across_frames() {
        let mut board = TacticBoard::new(1050, 680, BoardSettings::default());
        let raw_layer = 1050 * 680 * 4;
        for frame in 0..2 {
            for i in 0..12 {
                let y = 20.0 + i as f32 * 50.0;
                draw_line(&mut board, Point::new(50.0, y), Point::new(1000.0, y + 10.0));
            }
            if frame == 0 {
                board.new_frame();
            }
        }
        assert_eq!(board.frame_count(), 2);
        assert_eq!(board.undo_depth(), 12);
        // 26 stored layers in less than a single uncompressed one
        assert!(board.history_bytes() < raw_layer);
    }

    #[test]
    fn test_click_without_drag_still_paints() {
        let mut board = board();
        board.pointer_down(Point::new(40.0, 40.0));
        board.pointer_up(Point::new(40.0, 40.0));
        assert!(board.current_frame().drawings.pixels().any(|p| p[3] > 0));
        assert!(board.can_undo());
    }

    #[test]
    fn test_undo_with_single_entry_is_noop() {
        let mut board = board();
        let before = board.current_frame().snapshot();
        assert!(!board.undo());
        assert_eq!(board.current_frame().snapshot(), before);
    }

    #[test]
    fn test_eraser_removes_pixels() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 40.0), Point::new(110.0, 40.0));
        assert_eq!(board.current_frame().drawings.get_pixel(60, 40)[3], 255);

        board.select_tool(Tool::Eraser);
        draw_line(&mut board, Point::new(60.0, 10.0), Point::new(60.0, 70.0));
        assert_eq!(board.current_frame().drawings.get_pixel(60, 40)[3], 0);
    }

    #[test]
    fn test_arrow_is_baked_on_pointer_up_only() {
        let mut board = board();
        board.select_tool(Tool::Arrow);
        board.pointer_down(Point::new(10.0, 40.0));
        board.pointer_move(Point::new(80.0, 40.0));

        // Preview is visible but nothing is committed yet
        assert!(board.composite().get_pixel(80, 40)[3] > 0);
        assert_eq!(board.current_frame().drawings.get_pixel(80, 40)[3], 0);

        board.pointer_up(Point::new(100.0, 40.0));
        let drawings = &board.current_frame().drawings;
        assert_eq!(drawings.get_pixel(50, 40)[3], 255);
        // Arrowhead widens the stroke behind the tip
        assert_eq!(drawings.get_pixel(90, 43)[3], 255);
        assert!(board.can_undo());
    }

    #[test]
    fn test_stamp_reverts_tool_and_grows_objects() {
        let mut board = board();
        for (i, kind) in [StampKind::Player, StampKind::Opponent, StampKind::Ball].into_iter().enumerate() {
            place(&mut board, kind, Point::new(20.0 + 20.0 * i as f32, 30.0));
            assert_eq!(board.tools().tool, Tool::Pen);
            assert_eq!(board.current_frame().objects.len(), i + 1);
        }
    }

    #[test]
    fn test_pointer_down_with_stamp_tool_does_nothing() {
        let mut board = board();
        board.select_tool(Tool::Stamp(StampKind::Ball));
        board.pointer_down(Point::new(20.0, 20.0));
        board.pointer_up(Point::new(20.0, 20.0));
        assert!(board.current_frame().objects.is_empty());
        assert!(!board.can_undo());
    }

    #[test]
    fn test_numbered_stamp_needs_label() {
        let mut board = board();
        board.select_tool(Tool::Stamp(StampKind::Numbered));
        assert!(matches!(board.click(Point::new(5.0, 5.0)), Err(BoardError::EmptyLabel)));
        assert!(board.current_frame().objects.is_empty());

        board.set_player_label("9");
        board.select_color(RED);
        assert!(board.click(Point::new(30.0, 30.0)).unwrap());
        let stamp = &board.current_frame().objects[0];
        assert_eq!(stamp.label, "9");
        assert_eq!(stamp.color, RED);
    }

    #[test]
    fn test_label_without_glyphs_is_refused() {
        let mut board = board();
        board.select_tool(Tool::Stamp(StampKind::Numbered));
        board.set_player_label("\u{7}");
        assert!(matches!(board.click(Point::new(30.0, 30.0)), Err(BoardError::UnrenderableLabel)));
        assert!(board.current_frame().objects.is_empty());
        assert!(!board.can_undo());
    }

    #[test]
    fn test_emoji_label_is_drawn() {
        let mut board = board();
        board.select_color(Rgb([20, 20, 120]));
        board.set_player_label("⚽");
        place(&mut board, StampKind::Numbered, Point::new(60.0, 40.0));

        let composite = board.composite();
        let label_pixels = composite
            .pixels()
            .filter(|p| p[0] > 200 && p[1] > 200 && p[2] > 200)
            .count();
        assert!(label_pixels > 0);
    }

    #[test]
    fn test_long_label_stays_inside_stamp() {
        let mut board = board();
        board.set_player_label("ABCDEFGHIJ");
        place(&mut board, StampKind::Numbered, Point::new(60.0, 40.0));

        let stamp = board.current_frame().objects[0].clone();
        for (x, y, p) in board.composite().enumerate_pixels() {
            if p[3] > 0 {
                let distance = stamp.position.distance(Point::new(x as f32 + 0.5, y as f32 + 0.5));
                assert!(distance <= stamp.radius + 2.0, "pixel at ({x}, {y}) outside stamp");
            }
        }
    }

    #[test]
    fn test_click_with_line_tool_is_ignored() {
        let mut board = board();
        assert!(!board.click(Point::new(5.0, 5.0)).unwrap());
        assert!(board.current_frame().objects.is_empty());
    }

    #[test]
    fn test_undo_removes_stamp_with_its_step() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(50.0, 10.0));
        place(&mut board, StampKind::Ball, Point::new(60.0, 60.0));
        let lined = board.current_frame().drawings.clone();

        assert!(board.undo());
        assert!(board.current_frame().objects.is_empty());
        assert_eq!(board.current_frame().drawings, lined);
    }

    #[test]
    fn test_frame_count_never_below_one() {
        let mut board = board();
        assert!(matches!(board.delete_frame(), Err(BoardError::LastFrame)));
        assert_eq!(board.frame_count(), 1);

        board.new_frame();
        board.new_frame();
        assert_eq!(board.frame_count(), 3);
        assert!(board.delete_frame().is_ok());
        assert!(board.delete_frame().is_ok());
        assert!(board.delete_frame().is_err());
        assert_eq!(board.frame_count(), 1);
        assert_eq!(board.current_index(), 0);
    }

    #[test]
    fn test_delete_on_single_frame_leaves_state_unchanged() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(50.0, 10.0));
        let before = board.current_frame().snapshot();
        let revision = board.revision();
        assert!(board.delete_frame().is_err());
        assert_eq!(board.current_frame().snapshot(), before);
        assert_eq!(board.revision(), revision);
        assert!(board.can_undo());
    }

    #[test]
    fn test_delete_last_index_clamps_cursor() {
        let mut board = board();
        board.new_frame();
        board.new_frame();
        assert_eq!(board.current_index(), 2);
        board.delete_frame().unwrap();
        assert_eq!(board.current_index(), 1);
    }

    #[test]
    fn test_new_frame_inserts_after_current() {
        let mut board = board();
        board.new_frame();
        board.new_frame();
        assert!(board.prev_frame());
        place(&mut board, StampKind::Ball, Point::new(10.0, 10.0));

        board.new_frame();
        assert_eq!(board.frame_count(), 4);
        assert_eq!(board.current_index(), 2);
        assert_eq!(board.current_frame().objects.len(), 1);
        // The copy starts with its own history
        assert!(!board.can_undo());
    }

    #[test]
    fn test_clone_then_prev_frame_scenario() {
        let mut board = board();
        board.select_color(RED);
        draw_line(&mut board, Point::new(10.0, 40.0), Point::new(110.0, 40.0));
        let red_line = board.current_frame().drawings.clone();

        board.new_frame();
        assert_eq!(board.frame_count(), 2);
        assert_eq!(board.current_frame().drawings, red_line);

        board.set_player_label("9");
        place(&mut board, StampKind::Numbered, Point::new(60.0, 20.0));
        assert_eq!(board.current_frame().objects.len(), 1);

        assert!(board.prev_frame());
        assert_eq!(board.current_index(), 0);
        assert_eq!(board.current_frame().drawings, red_line);
        assert!(board.current_frame().objects.is_empty());
    }

    #[test]
    fn test_navigation_stops_at_ends() {
        let mut board = board();
        assert!(!board.prev_frame());
        assert!(!board.next_frame());
        board.new_frame();
        assert!(!board.next_frame());
        assert!(board.prev_frame());
        assert!(board.next_frame());
    }

    #[test]
    fn test_navigation_does_not_add_undo_steps() {
        let mut board = board();
        board.new_frame();
        board.prev_frame();
        board.next_frame();
        assert!(!board.can_undo());
    }

    #[test]
    fn test_clear_frame_is_undoable() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(50.0, 10.0));
        place(&mut board, StampKind::Player, Point::new(60.0, 60.0));
        let before = board.current_frame().snapshot();

        board.clear_frame();
        assert!(board.current_frame().objects.is_empty());
        assert!(board.current_frame().drawings.pixels().all(|p| p[3] == 0));

        assert!(board.undo());
        assert_eq!(board.current_frame().snapshot(), before);
    }

    #[test]
    fn test_play_wraps_and_pause_syncs_cursor() {
        let mut board = board();
        board.new_frame();
        board.new_frame();
        assert_eq!(board.current_index(), 2);

        board.play();
        assert!(board.is_playing());
        assert!(board.tick(DEFAULT_INTERVAL));
        assert_eq!(board.shown_index(), 0);
        assert!(board.tick(DEFAULT_INTERVAL));
        assert_eq!(board.shown_index(), 1);
        // Edit cursor untouched while playing
        assert_eq!(board.current_index(), 2);

        board.pause();
        assert!(!board.is_playing());
        assert_eq!(board.current_index(), 1);
        assert!(!board.tick(DEFAULT_INTERVAL * 3));
        assert_eq!(board.shown_index(), 1);
    }

    #[test]
    fn test_playback_does_not_mutate_frames() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(50.0, 10.0));
        board.new_frame();
        let before: Vec<Snapshot> = board.frames.iter().map(Frame::snapshot).collect();

        board.play();
        board.tick(DEFAULT_INTERVAL * 5);
        board.pause();
        let after: Vec<Snapshot> = board.frames.iter().map(Frame::snapshot).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_editing_while_playing_pauses() {
        let mut board = board();
        board.new_frame();
        board.play();
        board.tick(DEFAULT_INTERVAL);
        assert_eq!(board.shown_index(), 0);

        board.pointer_down(Point::new(10.0, 10.0));
        board.pointer_up(Point::new(20.0, 10.0));
        assert!(!board.is_playing());
        assert_eq!(board.current_index(), 0);
        assert!(board.can_undo());
    }

    #[test]
    fn test_switch_field_resets_frames() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(50.0, 10.0));
        board.new_frame();
        board.new_frame();
        assert_eq!(board.frame_count(), 3);

        assert!(board.switch_field(FieldKind::Half, 90, 70));
        assert_eq!(board.frame_count(), 1);
        assert_eq!(board.current_index(), 0);
        assert_eq!(board.tools().field, FieldKind::Half);
        assert_eq!(board.dimensions(), (90, 70));
        assert_eq!(board.current_frame().drawings.dimensions(), (90, 70));
        assert!(board.current_frame().drawings.pixels().all(|p| p[3] == 0));
        assert!(!board.can_undo());
    }

    #[test]
    fn test_switch_to_active_field_is_noop() {
        let mut board = board();
        board.new_frame();
        assert!(!board.switch_field(FieldKind::Full, 120, 80));
        assert_eq!(board.frame_count(), 2);
    }

    #[test]
    fn test_stroke_width_clamped_and_scales_stamps() {
        let mut board = board();
        board.set_stroke_width(100.0);
        assert_eq!(board.tools().stroke_width, MAX_STROKE_WIDTH);
        board.set_stroke_width(0.0);
        assert_eq!(board.tools().stroke_width, MIN_STROKE_WIDTH);

        board.set_stroke_width(6.0);
        assert_eq!(board.tools().eraser_radius(), 9.0);
        board.set_player_label("7");
        place(&mut board, StampKind::Numbered, Point::new(50.0, 50.0));
        assert_eq!(board.current_frame().objects[0].radius, 16.0);
    }

    #[test]
    fn test_composite_draws_stamps_over_layer() {
        let mut board = board();
        place(&mut board, StampKind::Opponent, Point::new(60.0, 40.0));
        assert!(board.current_frame().drawings.pixels().all(|p| p[3] == 0));
        assert_eq!(board.composite().get_pixel(60, 40), &Rgba([210, 40, 40, 255]));
    }

    #[test]
    fn test_export_file_name_is_one_based() {
        let mut board = board();
        assert_eq!(board.export_file_name(), "Taktiktafel_Frame_1.png");
        board.new_frame();
        assert_eq!(board.export_file_name(), "Taktiktafel_Frame_2.png");
    }

    #[test]
    fn test_export_current_frame_writes_png() {
        let mut board = board();
        place(&mut board, StampKind::Ball, Point::new(60.0, 40.0));
        let path = std::env::temp_dir().join(format!("taktiktafel_export_{}.png", std::process::id()));
        board.export_current_frame(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.dimensions(), (120, 80));
        assert_eq!(loaded.get_pixel(0, 0)[3], 0);
        assert!(loaded.get_pixel(60, 40)[3] > 0);
    }
}
