// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app owns the [`Session`] and turns UI events into session actions.
//! Interpretations run on a worker thread; while one is in flight every
//! control that would change the session is disabled.

use crate::config::Config;
use crate::error::{AppError, Severity};
use crate::interpret::{Interpretation, Interpreter};
use crate::io::playback::Player;
use crate::io::{audio, media};
use crate::models::canvas_state::Stroke;
use crate::models::language::Language;
use crate::models::session::{ImageOrigin, InputMethod, Session};
use crate::services::{GeminiClient, GoogleTts};
use crate::ui::{canvas, output, toolbar};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

type DoodleInterpreter = Interpreter<GeminiClient, GoogleTts>;

/// A message shown to the user after a failed or partial action.
struct Notice {
    severity: Severity,
    message: String,
}

/// Result of the worker thread.
struct Finished {
    language: Language,
    result: Interpretation,
}

/// Main application state.
pub struct DoodleApp {
    session: Session,

    interpreter: Arc<DoodleInterpreter>,

    /// Stroke currently being drawn
    in_progress_stroke: Option<Stroke>,

    /// Receiver for the running interpretation
    worker: Option<Receiver<Finished>>,

    /// Last finished interpretation and the language it was requested in
    last_result: Option<(Language, Interpretation)>,

    /// Where the last synthesized audio was written
    audio_path: Option<PathBuf>,

    /// Speech playback
    player: Player,

    notice: Option<Notice>,

    /// Preview of the uploaded image
    upload_texture: Option<egui::TextureHandle>,
}

impl DoodleApp {
    pub fn new(config: &Config, interpreter: DoodleInterpreter) -> Self {
        Self {
            session: Session::new(
                config.canvas_size,
                config.background,
                config.brush,
                config.history_limit,
            ),
            interpreter: Arc::new(interpreter),
            in_progress_stroke: None,
            worker: None,
            last_result: None,
            audio_path: None,
            player: Player::new(),
            notice: None,
            upload_texture: None,
        }
    }

    fn busy(&self) -> bool {
        self.worker.is_some()
    }

    fn report(&mut self, error: &AppError) {
        match error.severity() {
            Severity::Warning => log::warn!("{}", error),
            Severity::Error => log::error!("{}", error),
        }
        self.notice = Some(Notice {
            severity: error.severity(),
            message: error.to_string(),
        });
    }

    fn apply_toolbar(&mut self, action: toolbar::ToolbarAction) {
        match action {
            toolbar::ToolbarAction::Undo => self.session.undo(),
            toolbar::ToolbarAction::Redo => self.session.redo(),
            toolbar::ToolbarAction::Clear => self.session.clear_canvas(),
            toolbar::ToolbarAction::Reset => {
                self.session.reset();
                self.player.stop();
                self.in_progress_stroke = None;
                self.upload_texture = None;
                self.last_result = None;
                self.audio_path = None;
                self.notice = None;
            }
            toolbar::ToolbarAction::Background(color) => {
                log::info!("Background color set to {}", color.to_hex());
                self.session.set_background(color);
            }
            toolbar::ToolbarAction::None => {}
        }
    }

    /// Ask for a file and make it the current image.
    fn pick_upload(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", media::UPLOAD_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        let result = std::fs::read(&path)
            .map_err(|e| AppError::Decode(e.to_string()))
            .and_then(|bytes| {
                self.session
                    .upload(&bytes, media::UploadFormat::from_path(&path))
            });

        match result {
            Ok(()) => {
                log::info!("Loaded upload: {}", path.display());
                self.notice = None;
                self.refresh_upload_texture(ctx);
            }
            Err(e) => self.report(&e),
        }
    }

    fn refresh_upload_texture(&mut self, ctx: &egui::Context) {
        self.upload_texture = self.session.current_image().map(|image| {
            let size = [image.width() as usize, image.height() as usize];
            let color_image = egui::ColorImage::from_rgb(size, image.as_raw());
            ctx.load_texture("uploaded_image", color_image, egui::TextureOptions::LINEAR)
        });
    }

    /// Start an interpretation of the current image on a worker thread.
    fn start_interpretation(&mut self) {
        let (sender, receiver) = channel();
        self.worker = Some(receiver);
        self.notice = None;

        let image = self.session.current_image().cloned();
        let language = self.session.language;
        let interpreter = Arc::clone(&self.interpreter);
        log::info!("Interpreting in {}", language.name());

        std::thread::spawn(move || {
            let result = interpreter.interpret(image.as_ref(), language);
            let _ = sender.send(Finished { language, result });
        });
    }

    fn finish_interpretation(&mut self, finished: Finished) {
        let Finished { language, result } = finished;
        self.player.stop();
        log::debug!("Interpretation finished at stage {:?}", result.stage());

        if let Some(error) = result.error() {
            self.report(error);
        }

        self.audio_path = match result.audio() {
            Some(clip) => match audio::persist_clip(clip) {
                Ok(path) => Some(path),
                Err(e) => {
                    log::error!("Failed to store audio: {:#}", e);
                    self.notice = Some(Notice {
                        severity: Severity::Error,
                        message: format!("Could not store audio: {:#}", e),
                    });
                    None
                }
            },
            None => None,
        };

        self.last_result = Some((language, result));
    }

    fn play_audio(&mut self) {
        let Some(clip) = self.last_result.as_ref().and_then(|(_, r)| r.audio()) else {
            return;
        };
        if let Err(e) = self.player.play(clip) {
            log::error!("Failed to play audio: {:#}", e);
            self.notice = Some(Notice {
                severity: Severity::Error,
                message: format!("Could not play audio: {:#}", e),
            });
        }
    }

    /// Check the worker for a result. A worker that died without sending
    /// one must not leave the controls disabled.
    fn poll_worker(&mut self) {
        let Some(receiver) = &self.worker else {
            return;
        };
        match receiver.try_recv() {
            Ok(finished) => {
                self.worker = None;
                self.finish_interpretation(finished);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.worker = None;
                log::error!("Interpretation worker stopped without a result");
                self.notice = Some(Notice {
                    severity: Severity::Error,
                    message: "The interpretation stopped unexpectedly. Please try again."
                        .to_string(),
                });
            }
        }
    }

    fn save_audio(&mut self) {
        let Some(clip) = self.last_result.as_ref().and_then(|(_, r)| r.audio()) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("MP3", &["mp3"])
            .set_file_name("interpretation.mp3")
            .save_file()
        else {
            return;
        };
        if let Err(e) = audio::save_clip(clip, &path) {
            log::error!("Failed to export audio: {:#}", e);
            self.notice = Some(Notice {
                severity: Severity::Error,
                message: format!("{:#}", e),
            });
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.busy() || ctx.wants_keyboard_input() {
            return;
        }

        // Undo (Ctrl+Z)
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift)
        {
            self.session.undo();
        }

        // Redo (Ctrl+Shift+Z or Ctrl+Y)
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.session.redo();
        }
    }

    fn show_input(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let busy = self.busy();

        let mut method = self.session.input_method();
        ui.add_enabled_ui(!busy, |ui| {
            ui.horizontal(|ui| {
                ui.radio_value(&mut method, InputMethod::Draw, "Draw on Canvas");
                ui.radio_value(&mut method, InputMethod::Upload, "Upload Image");
            });
        });
        self.session.set_input_method(method);
        ui.add_space(8.0);

        match method {
            InputMethod::Draw => {
                let canvas_action = canvas::show(
                    ui,
                    self.session.history.current(),
                    self.session.canvas_size(),
                    self.session.background,
                    self.session.brush,
                    &mut self.in_progress_stroke,
                    !busy,
                );
                if let canvas::CanvasAction::StrokeFinished(stroke) = canvas_action {
                    self.session.add_stroke(stroke);
                }
            }
            InputMethod::Upload => {
                if ui
                    .add_enabled(!busy, egui::Button::new("📂 Upload a drawing (PNG, JPG, JPEG)"))
                    .clicked()
                {
                    self.pick_upload(ctx);
                }
                let uploaded = self.session.image.origin() == Some(ImageOrigin::Uploaded);
                if let (true, Some(texture)) = (uploaded, &self.upload_texture) {
                    let max = self.session.canvas_size() as f32;
                    let size = texture.size_vec2();
                    let scale = (max / size.x.max(size.y)).min(1.0);
                    ui.add(egui::Image::new(egui::load::SizedTexture::new(
                        texture.id(),
                        size * scale,
                    )));
                    ui.label(egui::RichText::new("Uploaded Image").weak());
                }
            }
        }
    }
}

impl eframe::App for DoodleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a finished interpretation
        self.poll_worker();

        // Request repaint while working (to update spinner) or playing
        if self.busy() || self.player.is_playing() {
            ctx.request_repaint();
        }

        self.handle_shortcuts(ctx);

        let busy = self.busy();
        let toolbar_action = egui::SidePanel::left("controls")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!busy, |ui| toolbar::show(ui, &mut self.session))
                    .inner
            })
            .inner;
        self.apply_toolbar(toolbar_action);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(egui::RichText::new("AI Doodle‑to‑Text").size(32.0));
                    ui.label("Transform your drawings into simple descriptions and short stories");
                    ui.add_space(16.0);
                    ui.label(egui::RichText::new("Draw a doodle or upload an image").size(18.0));
                    ui.add_space(8.0);

                    self.show_input(ui, ctx);

                    ui.add_space(20.0);
                    ui.heading("Generate Interpretation");
                    if ui
                        .add_enabled(!self.busy(), egui::Button::new("Interpret with Gemini"))
                        .clicked()
                    {
                        self.start_interpretation();
                    }

                    if self.busy() {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Interpreting your doodle…");
                        });
                    }

                    if let Some(notice) = &self.notice {
                        let color = match notice.severity {
                            Severity::Warning => egui::Color32::YELLOW,
                            Severity::Error => egui::Color32::LIGHT_RED,
                        };
                        ui.colored_label(color, &notice.message);
                    }

                    ui.add_space(12.0);
                    let playing = self.player.is_playing();
                    let output_action = match &self.last_result {
                        Some((language, result)) if !self.busy() => output::show(
                            ui,
                            result,
                            *language,
                            self.audio_path.as_deref(),
                            playing,
                        ),
                        _ => output::OutputAction::None,
                    };
                    match output_action {
                        output::OutputAction::Play => self.play_audio(),
                        output::OutputAction::Stop => self.player.stop(),
                        output::OutputAction::SaveAudio => self.save_audio(),
                        output::OutputAction::None => {}
                    }
                });
            });
        });
    }
}
