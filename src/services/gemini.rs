// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gemini `generateContent` client used as the description service.

use super::{check_status, DescriptionService, ServiceError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

// --- generateContent wire types ---

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text { text: String },
    Image { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Blocking client for a multimodal Gemini model.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = endpoint.trim_end_matches('/').to_string();
        log::info!(
            "Description service configured: endpoint={}, model={}, timeout={:?}",
            endpoint,
            model,
            timeout
        );

        Ok(Self {
            client,
            endpoint,
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// PNG-encode `image` and base64 it for inline transport.
fn encode_png(image: &RgbImage) -> Result<String, ServiceError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(STANDARD.encode(bytes))
}

fn build_request(prompt: &str, png_base64: String) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![
                RequestPart::Text {
                    text: prompt.to_string(),
                },
                RequestPart::Image {
                    inline_data: InlineData {
                        mime_type: "image/png",
                        data: png_base64,
                    },
                },
            ],
        }],
    }
}

/// Concatenate the text parts of the first candidate. A response without
/// candidates (for example a blocked prompt) yields an empty string.
fn extract_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

impl DescriptionService for GeminiClient {
    fn describe(&self, image: &RgbImage, prompt: &str) -> Result<String, ServiceError> {
        let start = std::time::Instant::now();
        let request = build_request(prompt, encode_png(image)?);

        log::debug!(
            "Requesting description from {} ({}x{} image)",
            self.model,
            image.width(),
            image.height()
        );
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;
        let response = check_status(response)?;

        let body = response.text()?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        let text = extract_text(parsed);

        log::debug!(
            "Description received: {} chars in {} ms",
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_new_trims_endpoint() {
        let client = GeminiClient::new(
            "https://example.test/v1beta/",
            "gemini-test",
            "key",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
        assert_eq!(client.model(), "gemini-test");
    }

    #[test]
    fn test_request_shape() {
        let request = build_request("Describe it", "QUJD".to_string());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        {"text": "Describe it"},
                        {"inline_data": {"mime_type": "image/png", "data": "QUJD"}}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_encode_png_roundtrips() {
        let image = RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3]));
        let encoded = encode_png(&image).unwrap();
        let bytes = STANDARD.decode(encoded).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "A cat. "}, {"text": "It naps."}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 12}
        }))
        .unwrap();
        assert_eq!(extract_text(response), "A cat. It naps.");
    }

    #[test]
    fn test_extract_text_without_candidates_is_empty() {
        let blocked: GenerateResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert_eq!(extract_text(blocked), "");

        let no_content: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert_eq!(extract_text(no_content), "");
    }
}
