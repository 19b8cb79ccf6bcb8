// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Google Translate text-to-speech client used as the speech service.
//!
//! The endpoint only accepts short inputs, so text is packed into chunks of
//! at most [`MAX_CHUNK_CHARS`] characters. Each chunk returns an MP3 segment
//! and the segments are concatenated in order.

use super::{check_status, AudioClip, ServiceError, SpeechService};
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Longest input the endpoint accepts per request.
pub const MAX_CHUNK_CHARS: usize = 100;

pub struct GoogleTts {
    client: Client,
    endpoint: String,
}

impl GoogleTts {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        log::info!("Speech service configured: endpoint={}", endpoint);
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    fn fetch_chunk(
        &self,
        chunk: &str,
        language_code: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, ServiceError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language_code),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()?;
        let bytes = check_status(response)?.bytes()?;
        Ok(bytes.to_vec())
    }
}

/// Split `text` into whitespace-delimited chunks of at most `max_chars`
/// characters. Words longer than the limit are cut.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

impl SpeechService for GoogleTts {
    fn synthesize(&self, text: &str, language_code: &str) -> Result<AudioClip, ServiceError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(ServiceError::Malformed("no text to speak".to_string()));
        }

        log::debug!(
            "Synthesizing {} chunk(s) in language {}",
            chunks.len(),
            language_code
        );
        let mut bytes = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            bytes.extend(self.fetch_chunk(chunk, language_code, idx, chunks.len())?);
        }

        if bytes.is_empty() {
            return Err(ServiceError::Malformed("empty audio payload".to_string()));
        }
        Ok(AudioClip {
            bytes,
            mime_type: "audio/mpeg",
        })
    }
}
