// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Synthesized audio persistence.

use crate::services::AudioClip;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `clip` to a fresh `.mp3` file in the temp directory and keep it.
pub fn persist_clip(clip: &AudioClip) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("doodlespeak-")
        .suffix(".mp3")
        .tempfile()
        .context("create temporary audio file")?;
    file.write_all(&clip.bytes)
        .context("write temporary audio file")?;

    let (_, path) = file.keep().context("keep temporary audio file")?;
    log::info!("Saved {} bytes of audio to {}", clip.bytes.len(), path.display());
    Ok(path)
}

/// Copy `clip` to a user-chosen location.
pub fn save_clip(clip: &AudioClip, path: &Path) -> Result<()> {
    std::fs::write(path, &clip.bytes)
        .with_context(|| format!("write audio file: {}", path.display()))?;
    log::info!("Exported audio to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> AudioClip {
        AudioClip {
            bytes: b"ID3fake-mp3-payload".to_vec(),
            mime_type: "audio/mpeg",
        }
    }

    #[test]
    fn test_persist_clip_writes_mp3() {
        let path = persist_clip(&clip()).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), clip().bytes);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_save_clip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.mp3");
        save_clip(&clip(), &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), clip().bytes);
    }

    #[test]
    fn test_save_clip_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("story.mp3");
        let err = save_clip(&clip(), &path).unwrap_err();
        assert!(err.to_string().contains("write audio file"));
    }
}
