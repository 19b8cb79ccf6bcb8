// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Raster helpers: blank detection and stroke rasterization.

pub mod blank;
pub mod draw;
