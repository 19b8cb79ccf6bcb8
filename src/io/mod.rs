// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for uploaded images and synthesized audio.

pub mod audio;
pub mod media;
pub mod playback;
