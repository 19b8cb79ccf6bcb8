// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-app playback of synthesized speech.
//!
//! The output device is opened on the first play, so a machine without
//! audio hardware only fails when the user actually asks to listen.

use crate::services::AudioClip;
use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;

/// Decode MP3 bytes into a playable source.
pub fn decode(bytes: Vec<u8>) -> Result<Decoder<Cursor<Vec<u8>>>> {
    Decoder::new(Cursor::new(bytes)).context("decode audio")
}

/// Plays one clip at a time on the default output device.
#[derive(Default)]
pub struct Player {
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing `clip`, replacing whatever was playing.
    pub fn play(&mut self, clip: &AudioClip) -> Result<()> {
        self.stop();
        let source = decode(clip.bytes.clone())?;

        if self.output.is_none() {
            let output = OutputStream::try_default().context("open audio output device")?;
            self.output = Some(output);
        }
        let Some((_, handle)) = self.output.as_ref() else {
            anyhow::bail!("audio output device unavailable");
        };

        let sink = Sink::try_new(handle).context("start audio playback")?;
        sink.append(source);
        self.sink = Some(sink);
        log::info!("Playing {} bytes of audio", clip.bytes.len());
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            log::debug!("Playback stopped");
        }
    }

    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_idle() {
        let mut player = Player::new();
        assert!(!player.is_playing());
        player.stop();
        assert!(!player.is_playing());
    }

    #[test]
    fn test_garbage_is_not_audio() {
        assert!(decode(b"definitely not an mp3".to_vec()).is_err());
    }

    #[test]
    fn test_play_rejects_undecodable_clip() {
        // Decoding happens before the output device is opened.
        let mut player = Player::new();
        let clip = AudioClip {
            bytes: b"definitely not an mp3".to_vec(),
            mime_type: "audio/mpeg",
        };
        let err = player.play(&clip).unwrap_err();
        assert!(err.to_string().contains("decode audio"));
        assert!(!player.is_playing());
    }
}
