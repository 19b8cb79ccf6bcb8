// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Describe-then-speak orchestration.
//!
//! An interpretation runs two blocking calls in order: the description
//! service turns the image into text, then the speech service reads that
//! text aloud. The outcome is one of three shapes so that "text but no
//! audio" is an ordinary result rather than a side effect of error handling.

use crate::error::AppError;
use crate::models::language::Language;
use crate::services::{AudioClip, DescriptionService, SpeechService};
use image::RgbImage;

/// Progress through an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Requesting,
    DescribedOk,
    DescribeFailed,
    Synthesizing,
    SynthOk,
    SynthFailed,
}

/// Result of [`Interpreter::interpret`].
#[derive(Debug)]
pub enum Interpretation {
    /// Both steps succeeded.
    Complete { text: String, audio: AudioClip },
    /// Text was produced but could not be spoken.
    Partial { text: String, error: AppError },
    /// Nothing usable was produced.
    Failed(AppError),
}

impl Interpretation {
    /// The description text, when the first step produced one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Interpretation::Complete { text, .. } | Interpretation::Partial { text, .. } => {
                Some(text)
            }
            Interpretation::Failed(_) => None,
        }
    }

    pub fn audio(&self) -> Option<&AudioClip> {
        match self {
            Interpretation::Complete { audio, .. } => Some(audio),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            Interpretation::Complete { .. } => None,
            Interpretation::Partial { error, .. } | Interpretation::Failed(error) => Some(error),
        }
    }

    /// The stage the interpretation ended in.
    pub fn stage(&self) -> Stage {
        match self {
            Interpretation::Complete { .. } => Stage::SynthOk,
            Interpretation::Partial { .. } => Stage::SynthFailed,
            Interpretation::Failed(AppError::MissingInput) => Stage::Idle,
            Interpretation::Failed(_) => Stage::DescribeFailed,
        }
    }
}

/// Instruction sent alongside the image.
pub fn build_prompt(language: Language) -> String {
    let name = language.name();
    format!(
        "You are helping a child. Look at the doodle and describe it simply in {name}. \
         Then write a short cheerful story idea (1–2 sentences) also in {name}."
    )
}

/// Runs interpretations against a pair of services.
pub struct Interpreter<D, S> {
    describer: D,
    speaker: S,
}

impl<D: DescriptionService, S: SpeechService> Interpreter<D, S> {
    pub fn new(describer: D, speaker: S) -> Self {
        Self { describer, speaker }
    }

    pub fn interpret(&self, image: Option<&RgbImage>, language: Language) -> Interpretation {
        let Some(image) = image else {
            log::warn!("Interpretation requested without an image");
            return Interpretation::Failed(AppError::MissingInput);
        };

        log::debug!("Stage {:?} -> {:?}", Stage::Idle, Stage::Requesting);
        let prompt = build_prompt(language);
        let text = match self.describer.describe(image, &prompt) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                log::error!("Description failed: {}", e);
                log::debug!("Stage {:?} -> {:?}", Stage::Requesting, Stage::DescribeFailed);
                return Interpretation::Failed(AppError::DescribeTransport(e.to_string()));
            }
        };
        if text.is_empty() {
            log::warn!("Description service returned no text");
            log::debug!("Stage {:?} -> {:?}", Stage::Requesting, Stage::DescribeFailed);
            return Interpretation::Failed(AppError::EmptyDescription);
        }
        log::debug!("Stage {:?} -> {:?}", Stage::Requesting, Stage::DescribedOk);

        log::debug!("Stage {:?} -> {:?}", Stage::DescribedOk, Stage::Synthesizing);
        match self.speaker.synthesize(&text, language.speech_code()) {
            Ok(audio) => {
                log::info!(
                    "Interpretation complete: {} chars, {} audio bytes",
                    text.len(),
                    audio.bytes.len()
                );
                Interpretation::Complete { text, audio }
            }
            Err(e) => {
                log::error!("Speech synthesis failed: {}", e);
                Interpretation::Partial {
                    text,
                    error: AppError::Synthesis(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockDescriptionService, MockSpeechService, ServiceError};
    use mockall::predicate::eq;

    fn image() -> RgbImage {
        RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]))
    }

    fn clip() -> AudioClip {
        AudioClip {
            bytes: vec![0xff, 0xfb, 0x90],
            mime_type: "audio/mpeg",
        }
    }

    #[test]
    fn test_missing_image_contacts_nobody() {
        let mut describer = MockDescriptionService::new();
        describer.expect_describe().times(0);
        let mut speaker = MockSpeechService::new();
        speaker.expect_synthesize().times(0);

        let result = Interpreter::new(describer, speaker).interpret(None, Language::English);
        assert!(matches!(result, Interpretation::Failed(AppError::MissingInput)));
        assert_eq!(result.stage(), Stage::Idle);
    }

    #[test]
    fn test_complete_interpretation() {
        let mut describer = MockDescriptionService::new();
        describer
            .expect_describe()
            .withf(|_, prompt| prompt.contains("in French"))
            .times(1)
            .returning(|_, _| Ok("  Un chat.\n".to_string()));
        let mut speaker = MockSpeechService::new();
        speaker
            .expect_synthesize()
            .with(eq("Un chat."), eq("fr"))
            .times(1)
            .returning(|_, _| Ok(clip()));

        let img = image();
        let result = Interpreter::new(describer, speaker).interpret(Some(&img), Language::French);
        assert_eq!(result.text(), Some("Un chat."));
        assert_eq!(result.audio(), Some(&clip()));
        assert!(result.error().is_none());
        assert_eq!(result.stage(), Stage::SynthOk);
    }

    #[test]
    fn test_synthesis_failure_keeps_text() {
        let mut describer = MockDescriptionService::new();
        describer
            .expect_describe()
            .times(1)
            .returning(|_, _| Ok("A cat.".to_string()));
        let mut speaker = MockSpeechService::new();
        speaker.expect_synthesize().times(1).returning(|_, _| {
            Err(ServiceError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        });

        let img = image();
        let result = Interpreter::new(describer, speaker).interpret(Some(&img), Language::English);
        match &result {
            Interpretation::Partial { text, error } => {
                assert_eq!(text, "A cat.");
                assert!(matches!(error, AppError::Synthesis(_)));
            }
            other => panic!("expected partial result, got {:?}", other),
        }
        assert_eq!(result.stage(), Stage::SynthFailed);
    }

    #[test]
    fn test_blank_description_skips_synthesis() {
        let mut describer = MockDescriptionService::new();
        describer
            .expect_describe()
            .times(1)
            .returning(|_, _| Ok(" \n\t ".to_string()));
        let mut speaker = MockSpeechService::new();
        speaker.expect_synthesize().times(0);

        let img = image();
        let result = Interpreter::new(describer, speaker).interpret(Some(&img), Language::Hindi);
        assert!(matches!(result, Interpretation::Failed(AppError::EmptyDescription)));
        assert!(result.text().is_none());
    }

    #[test]
    fn test_transport_failure_skips_synthesis() {
        let mut describer = MockDescriptionService::new();
        describer
            .expect_describe()
            .times(1)
            .returning(|_, _| Err(ServiceError::Malformed("bad json".to_string())));
        let mut speaker = MockSpeechService::new();
        speaker.expect_synthesize().times(0);

        let img = image();
        let result = Interpreter::new(describer, speaker).interpret(Some(&img), Language::German);
        match result {
            Interpretation::Failed(AppError::DescribeTransport(msg)) => {
                assert!(msg.contains("bad json"))
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_service_is_transport_failure() {
        use crate::services::GeminiClient;
        use std::time::Duration;

        // Nothing listens on the discard port.
        let describer = GeminiClient::new(
            "http://127.0.0.1:9",
            "gemini-1.5-flash",
            "test-key",
            Duration::from_secs(2),
        )
        .unwrap();
        let mut speaker = MockSpeechService::new();
        speaker.expect_synthesize().times(0);

        let img = image();
        let result = Interpreter::new(describer, speaker).interpret(Some(&img), Language::English);
        assert!(matches!(
            result,
            Interpretation::Failed(AppError::DescribeTransport(_))
        ));
        assert_eq!(result.stage(), Stage::DescribeFailed);
    }

    #[test]
    fn test_prompt_names_language_twice() {
        let prompt = build_prompt(Language::Japanese);
        assert_eq!(prompt.matches("Japanese").count(), 2);
        assert!(prompt.starts_with("You are helping a child."));
    }
}
