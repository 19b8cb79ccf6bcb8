// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: colors, canvas states, history, and the session context.

pub mod canvas_state;
pub mod color;
pub mod history;
pub mod language;
pub mod session;
