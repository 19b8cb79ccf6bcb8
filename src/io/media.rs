// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Uploaded image decoding.
//!
//! Only PNG and JPEG uploads are accepted. Decoded images are converted to
//! 8-bit RGB, the color space the rest of the application works in.

use crate::error::AppError;
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// Extensions offered in the upload file picker.
pub const UPLOAD_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Raster formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Png,
    Jpeg,
}

impl UploadFormat {
    /// Format declared by a file extension, if supported.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(UploadFormat::Png),
            "jpg" | "jpeg" => Some(UploadFormat::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }

    fn image_format(self) -> ImageFormat {
        match self {
            UploadFormat::Png => ImageFormat::Png,
            UploadFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Decode uploaded bytes into an RGB raster.
///
/// With a declared format the bytes must be in that format. Without one the
/// format is sniffed from the content and must still be PNG or JPEG.
pub fn decode_upload(bytes: &[u8], declared: Option<UploadFormat>) -> Result<RgbImage, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Decode("file is empty".to_string()));
    }

    let format = match declared {
        Some(format) => format.image_format(),
        None => match image::guess_format(bytes) {
            Ok(ImageFormat::Png) => ImageFormat::Png,
            Ok(ImageFormat::Jpeg) => ImageFormat::Jpeg,
            Ok(other) => {
                return Err(AppError::Decode(format!("unsupported format {:?}", other)));
            }
            Err(e) => return Err(AppError::Decode(e.to_string())),
        },
    };

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AppError::Decode(e.to_string()))?;
    log::debug!("Decoded upload: {:?} {}x{}", format, img.width(), img.height());
    Ok(img.to_rgb8())
}
