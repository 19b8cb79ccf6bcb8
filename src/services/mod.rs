// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Remote collaborators: the description model and the speech synthesizer.
//!
//! Both are reached through small traits so the orchestrator can be driven
//! by test doubles. Calls are blocking and bounded by the client timeout.

pub mod gemini;
pub mod speech;

use image::RgbImage;
use thiserror::Error;

pub use gemini::GeminiClient;
pub use speech::GoogleTts;

/// Failure talking to a remote service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("could not encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// A playable audio payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Produces text about an image from a natural-language instruction.
#[cfg_attr(test, mockall::automock)]
pub trait DescriptionService {
    fn describe(&self, image: &RgbImage, prompt: &str) -> Result<String, ServiceError>;
}

/// Turns text into speech in the language identified by `language_code`.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechService {
    fn synthesize(&self, text: &str, language_code: &str) -> Result<AudioClip, ServiceError>;
}

/// Keep at most `limit` characters of a response body for error messages.
fn truncate_body(body: String, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body,
    }
}

/// Turn a non-success HTTP response into [`ServiceError::Status`].
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        body: truncate_body(body, 300),
    })
}
