// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the tactic board, keeps the textures in
//! sync with it and routes UI panel actions to board operations.

use crate::config::BoardConfig;
use crate::io::media::{self, LoadedImage};
use crate::models::{
    board::TacticBoard,
    stamp::StampKind,
    tool::{FieldKind, Tool},
};
use crate::ui::{
    canvas::{self, CanvasAction},
    properties::{self, PropertiesAction},
    timeline::{self, TimelineAction},
    toolbar,
};
use crate::util::field;
use image::{Rgb, RgbaImage};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Destructive action waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    ClearFrame,
    DeleteFrame,
}

impl Confirm {
    fn question(self) -> &'static str {
        match self {
            Confirm::ClearFrame => "Clear everything on this frame?",
            Confirm::DeleteFrame => "Delete this frame?",
        }
    }
}

/// Short-lived notification.
struct Toast {
    message: String,
    until: Instant,
}

/// Result of background image loading, tagged with the field it was for.
type BackgroundResult = Result<LoadedImage, (FieldKind, String)>;

/// Main application state.
pub struct TaktikApp {
    config: BoardConfig,

    /// The drawing engine
    board: TacticBoard,

    /// Colors offered in the properties panel
    palette: Vec<Rgb<u8>>,

    /// Field background texture
    background_texture: Option<egui::TextureHandle>,

    /// Composited drawn layer texture
    drawing_texture: Option<egui::TextureHandle>,

    /// Board revision currently in `drawing_texture`
    uploaded_revision: Option<u64>,

    /// Receiver for background image loading
    background_loader: Option<Receiver<BackgroundResult>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Text of the numbered player label field
    label_input: String,

    confirm: Option<Confirm>,
    toast: Option<Toast>,

    /// Time of the previous update, for the playback timer
    last_update: Instant,
}

impl TaktikApp {
    /// Create the application with a full field.
    pub fn new(ctx: &egui::Context, config: BoardConfig) -> Self {
        let full = config.field(FieldKind::Full);
        let board = TacticBoard::new(full.width, full.height, config.board_settings());
        let mut app = Self {
            palette: config.palette_colors(),
            config,
            board,
            background_texture: None,
            drawing_texture: None,
            uploaded_revision: None,
            background_loader: None,
            loading_message: None,
            label_input: String::new(),
            confirm: None,
            toast: None,
            last_update: Instant::now(),
        };
        app.switch_field(ctx, FieldKind::Full);
        app
    }

    fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            until: Instant::now() + TOAST_DURATION,
        });
    }

    /// Switch the field, decoding a configured background image in the background.
    fn switch_field(&mut self, ctx: &egui::Context, kind: FieldKind) {
        if self.background_loader.is_some() {
            return;
        }
        if self.background_texture.is_some() && self.board.tools().field == kind {
            self.show_toast(format!("{:?} field is already shown, frames were kept", kind));
            return;
        }

        let field_config = self.config.field(kind).clone();
        let Some(path) = field_config.image else {
            let background = field::render(kind, field_config.width, field_config.height);
            self.apply_background(ctx, kind, &background);
            return;
        };

        self.board.pause();
        let (sender, receiver) = channel();
        self.background_loader = Some(receiver);
        self.loading_message = Some(format!("Loading {:?} field...", kind));

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = media::load_image(&path, kind).map_err(|e| (kind, format!("{:#}", e)));
            if let Ok(ref loaded) = result {
                log::info!("Loaded background: {} ({}x{})", path.display(), loaded.width, loaded.height);
            }
            let _ = sender.send(result);
        });
    }

    /// Install a decoded background and resize the board to it.
    fn apply_background(&mut self, ctx: &egui::Context, kind: FieldKind, background: &RgbaImage) {
        let (width, height) = background.dimensions();
        self.board.switch_field(kind, width, height);
        self.background_texture = Some(ctx.load_texture(
            "field_background",
            to_color_image(background),
            egui::TextureOptions::LINEAR,
        ));
    }

    /// Apply a finished background load, falling back to the drawn field on failure.
    fn poll_background_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.background_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.background_loader = None;
        self.loading_message = None;

        let (kind, background) = match result {
            Ok(loaded) => {
                let kind = loaded.kind;
                match loaded.into_rgba() {
                    Some(background) => (kind, background),
                    None => {
                        log::error!("Decoded background has an invalid pixel buffer");
                        let field_config = self.config.field(kind);
                        (kind, field::render(kind, field_config.width, field_config.height))
                    }
                }
            }
            Err((kind, e)) => {
                log::error!("Failed to load background: {}", e);
                self.show_toast("Background image could not be loaded");
                let field_config = self.config.field(kind);
                (kind, field::render(kind, field_config.width, field_config.height))
            }
        };
        self.apply_background(ctx, kind, &background);
    }

    /// Re-upload the drawn layer if the board changed since the last upload.
    fn sync_drawing_texture(&mut self, ctx: &egui::Context) {
        let revision = self.board.revision();
        if self.uploaded_revision == Some(revision) {
            return;
        }
        let image = to_color_image(&self.board.composite());
        if let Some(texture) = self.drawing_texture.as_mut() {
            texture.set(image, egui::TextureOptions::LINEAR);
        } else {
            self.drawing_texture = Some(ctx.load_texture("board_drawing", image, egui::TextureOptions::LINEAR));
        }
        self.uploaded_revision = Some(revision);
    }

    /// Export the current frame through a save dialog.
    fn export_frame(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(self.board.export_file_name())
            .save_file()
        else {
            return;
        };

        match self.board.export_current_frame(&path) {
            Ok(()) => self.show_toast(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to export frame: {}", e);
                self.show_toast(format!("Export failed: {}", e));
            }
        }
    }

    /// Write the active settings to a YAML or JSON file.
    fn save_settings(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("YAML", &["yaml", "yml"])
            .add_filter("JSON", &["json"])
            .set_file_name(crate::config::DEFAULT_CONFIG_FILE)
            .save_file()
        else {
            return;
        };

        match crate::io::serialization::export_config(&self.config, &path) {
            Ok(()) => log::info!("Saved settings to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save settings: {:#}", e);
                self.show_toast(format!("Saving settings failed: {}", e));
            }
        }
    }

    fn request_delete_frame(&mut self) {
        if self.board.frame_count() <= 1 {
            self.show_toast("The last frame cannot be deleted");
        } else {
            self.confirm = Some(Confirm::DeleteFrame);
        }
    }

    fn handle_timeline(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::PrevFrame => {
                self.board.prev_frame();
            }
            TimelineAction::NextFrame => {
                self.board.next_frame();
            }
            TimelineAction::NewFrame => self.board.new_frame(),
            TimelineAction::DeleteFrame => self.request_delete_frame(),
            TimelineAction::ClearFrame => self.confirm = Some(Confirm::ClearFrame),
            TimelineAction::Undo => {
                self.board.undo();
            }
            TimelineAction::Play => self.board.play(),
            TimelineAction::Pause => self.board.pause(),
            TimelineAction::None => {}
        }
    }

    fn handle_canvas(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::PointerDown(point) => self.board.pointer_down(point),
            CanvasAction::PointerMove(point) => self.board.pointer_move(point),
            CanvasAction::PointerUp(point) => self.board.pointer_up(point),
            CanvasAction::Click(point) => {
                if let Err(e) = self.board.click(point) {
                    self.show_toast(e.to_string());
                }
            }
        }
    }

    fn handle_confirmed(&mut self, confirm: Confirm) {
        match confirm {
            Confirm::ClearFrame => self.board.clear_frame(),
            Confirm::DeleteFrame => {
                if let Err(e) = self.board.delete_frame() {
                    self.show_toast(e.to_string());
                }
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Export Frame as PNG...").clicked() {
                    self.export_frame();
                    ui.close_menu();
                }
                if ui.button("Save Settings As...").clicked() {
                    self.save_settings();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.add_enabled(self.board.can_undo(), egui::Button::new("Undo (Ctrl+Z)")).clicked() {
                    self.board.undo();
                    ui.close_menu();
                }
                if ui.button("Clear Frame...").clicked() {
                    self.confirm = Some(Confirm::ClearFrame);
                    ui.close_menu();
                }
            });

            ui.menu_button("Field", |ui| {
                let active = self.board.tools().field;
                for (kind, text) in [(FieldKind::Full, "Full field"), (FieldKind::Half, "Half field")] {
                    if ui.selectable_label(active == kind, text).clicked() {
                        self.switch_field(ctx, kind);
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("Frames", |ui| {
                if ui.button("New Frame").clicked() {
                    self.board.new_frame();
                    ui.close_menu();
                }
                if ui.button("Delete Frame...").clicked() {
                    self.request_delete_frame();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Previous (←)").clicked() {
                    self.board.prev_frame();
                    ui.close_menu();
                }
                if ui.button("Next (→)").clicked() {
                    self.board.next_frame();
                    ui.close_menu();
                }
                let play_text = if self.board.is_playing() { "Pause (Space)" } else { "Play (Space)" };
                if ui.button(play_text).clicked() {
                    self.toggle_playback();
                    ui.close_menu();
                }
            });
        });
    }

    fn toggle_playback(&mut self) {
        if self.board.is_playing() {
            self.board.pause();
        } else {
            self.board.play();
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // Only process if no text field is focused (to avoid acting while typing a label)
        if ctx.wants_keyboard_input() {
            return;
        }
        let (undo, prev, next, space) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::Z),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Space),
            )
        });
        if undo {
            self.board.undo();
        }
        if prev {
            self.board.prev_frame();
        }
        if next {
            self.board.next_frame();
        }
        if space {
            self.toggle_playback();
        }
    }

    fn confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(confirm) = self.confirm else {
            return;
        };
        let mut answer = None;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(confirm.question());
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(accepted) = answer {
            self.confirm = None;
            if accepted {
                self.handle_confirmed(confirm);
            }
        }
    }

    fn toast_overlay(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let Some(ref toast) = self.toast else {
            return;
        };
        if now >= toast.until {
            self.toast = None;
            return;
        }
        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -60.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(&toast.message).color(egui::Color32::from_gray(230)));
                });
            });
        ctx.request_repaint_after(toast.until - now);
    }
}

/// Convert a raster to an egui image.
fn to_color_image(img: &RgbaImage) -> egui::ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw())
}

impl eframe::App for TaktikApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loading
        self.poll_background_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        // Toolbar
        let picked_tool = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.board.tools().tool))
            .inner;
        if let Some(tool) = picked_tool {
            self.board.select_tool(tool);
            if tool == Tool::Stamp(StampKind::Numbered) && self.label_input.trim().is_empty() {
                self.show_toast("Enter a player label in the side panel first");
            }
        }

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, &self.board, &self.palette, &mut self.label_input))
            .inner;
        match properties_action {
            PropertiesAction::SelectColor(color) => self.board.select_color(color),
            PropertiesAction::SetStrokeWidth(width) => self.board.set_stroke_width(width),
            PropertiesAction::SetPlayerLabel(label) => self.board.set_player_label(&label),
            PropertiesAction::None => {}
        }

        // Timeline (bottom)
        let timeline_action = egui::TopBottomPanel::bottom("timeline")
            .show(ctx, |ui| timeline::show(ui, &self.board))
            .inner;
        self.handle_timeline(timeline_action);

        self.handle_keyboard(ctx);

        // Advance playback
        let now = Instant::now();
        self.board.tick(now - self.last_update);
        self.last_update = now;
        if let Some(wait) = self.board.next_tick_in() {
            ctx.request_repaint_after(wait);
        }

        self.sync_drawing_texture(ctx);

        // Main canvas (center)
        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(egui::RichText::new(message).size(16.0).color(egui::Color32::from_gray(200)));
                        });
                    });
                    Vec::new()
                } else {
                    canvas::show(ui, &self.board, &self.background_texture, &self.drawing_texture)
                }
            })
            .inner;

        let revision = self.board.revision();
        for action in canvas_actions {
            self.handle_canvas(action);
        }
        if self.board.revision() != revision {
            ctx.request_repaint();
        }

        self.confirm_dialog(ctx);
        self.toast_overlay(ctx);
    }
}
