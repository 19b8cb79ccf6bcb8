// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session context.
//!
//! A [`Session`] owns everything a single user works with: the canvas
//! history, the current image, the background color and the selected pen
//! and language. Every user action is a method on the session.

use super::canvas_state::{CanvasState, Stroke};
use super::color::Rgb;
use super::history::History;
use super::language::Language;
use crate::error::AppError;
use crate::io::media::{self, UploadFormat};
use crate::raster::{blank, draw};
use image::{DynamicImage, RgbImage};

/// Where the user is currently supplying input from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    Draw,
    Upload,
}

/// Where the current image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Drawn,
    Uploaded,
}

/// The single image considered for interpretation.
#[derive(Debug, Clone, Default)]
pub struct ImageSelector {
    current: Option<(RgbImage, ImageOrigin)>,
}

impl ImageSelector {
    /// Offer a freshly drawn raster. Blank rasters are ignored.
    /// Returns whether the current image changed.
    pub fn offer_drawing(&mut self, raster: RgbImage, background: Rgb) -> bool {
        let raster = DynamicImage::ImageRgb8(raster);
        if blank::is_blank(&raster, background) {
            log::trace!("Drawn canvas is blank, keeping current image");
            return false;
        }
        self.current = Some((raster.into_rgb8(), ImageOrigin::Drawn));
        true
    }

    /// Decode an upload and make it current. On failure the current image is kept.
    pub fn upload(&mut self, bytes: &[u8], format: Option<UploadFormat>) -> Result<(), AppError> {
        let image = media::decode_upload(bytes, format)?;
        self.set_uploaded(image);
        Ok(())
    }

    /// Make an already decoded upload current.
    pub fn set_uploaded(&mut self, image: RgbImage) {
        log::info!("Uploaded image {}x{}", image.width(), image.height());
        self.current = Some((image, ImageOrigin::Uploaded));
    }

    pub fn current(&self) -> Option<&RgbImage> {
        self.current.as_ref().map(|(image, _)| image)
    }

    pub fn origin(&self) -> Option<ImageOrigin> {
        self.current.as_ref().map(|(_, origin)| *origin)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Pen settings for new strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Rgb,
    pub width: f32,
}

impl Brush {
    pub const MIN_WIDTH: f32 = 2.0;
    pub const MAX_WIDTH: f32 = 25.0;

    pub fn new(color: Rgb, width: f32) -> Self {
        Self {
            color,
            width: width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH),
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(Rgb::BLACK, 6.0)
    }
}

/// All state for one user session.
#[derive(Debug, Clone)]
pub struct Session {
    pub history: History,
    pub image: ImageSelector,
    pub background: Rgb,
    pub brush: Brush,
    pub language: Language,
    input_method: InputMethod,
    canvas_size: u32,
}

impl Session {
    /// A session with an empty square canvas of `canvas_size` pixels.
    pub fn new(canvas_size: u32, background: Rgb, brush: Brush, history_limit: usize) -> Self {
        let mut history = History::with_limit(history_limit);
        history.push(CanvasState::empty());
        Self {
            history,
            image: ImageSelector::default(),
            background,
            brush,
            language: Language::default(),
            input_method: InputMethod::default(),
            canvas_size,
        }
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    pub fn input_method(&self) -> InputMethod {
        self.input_method
    }

    /// Switching input method leaves the current image alone.
    pub fn set_input_method(&mut self, method: InputMethod) {
        if self.input_method != method {
            log::info!("Input method changed to {:?}", method);
            self.input_method = method;
        }
    }

    /// Raster snapshot of the canvas as currently displayed.
    pub fn canvas_raster(&self) -> RgbImage {
        draw::rasterize(
            self.history.current(),
            self.canvas_size,
            self.canvas_size,
            self.background,
        )
    }

    /// Record a finished stroke drawn with the current brush.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        if stroke.is_empty() {
            return;
        }
        let next = self.history.current().with_stroke(stroke);
        self.history.push(next);
        log::info!(
            "Stroke recorded, {} stroke(s) on canvas",
            self.history.current().strokes().len()
        );
        self.offer_canvas();
    }

    pub fn undo(&mut self) {
        if self.history.undo() {
            log::info!("Undo");
            self.follow_canvas();
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            log::info!("Redo");
            self.follow_canvas();
        }
    }

    /// Delete everything on the canvas.
    pub fn clear_canvas(&mut self) {
        self.history.clear();
        log::info!("Canvas cleared");
    }

    /// Change the background. Only affects rendering and blank detection.
    pub fn set_background(&mut self, background: Rgb) {
        if self.background != background {
            self.background = background;
            self.follow_canvas();
        }
    }

    /// Decode and select an uploaded file.
    pub fn upload(&mut self, bytes: &[u8], format: Option<UploadFormat>) -> Result<(), AppError> {
        self.image.upload(bytes, format)
    }

    /// The image an interpretation would use.
    pub fn current_image(&self) -> Option<&RgbImage> {
        self.image.current()
    }

    /// Start over: empty canvas history and no current image.
    pub fn reset(&mut self) {
        self.history = History::with_limit(self.history.limit());
        self.history.push(CanvasState::empty());
        self.image.reset();
        log::info!("Session reset");
    }

    /// A new stroke was drawn: offer the canvas as the current image.
    fn offer_canvas(&mut self) {
        if self.input_method != InputMethod::Draw {
            return;
        }
        let raster = self.canvas_raster();
        if self.image.offer_drawing(raster, self.background) {
            log::debug!("Current image updated from canvas");
        }
    }

    /// The canvas changed without a new stroke. Only an image that already
    /// came from the canvas follows it; an upload is never replaced.
    fn follow_canvas(&mut self) {
        if self.image.origin() == Some(ImageOrigin::Drawn) {
            self.offer_canvas();
        }
    }
}
