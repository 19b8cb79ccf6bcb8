// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history of canvas states.
//!
//! `past` holds every recorded state up to and including the one on screen;
//! `future` holds states that were undone, nearest first. The history is
//! linear: recording a new state after an undo throws the redo buffer away.

use super::canvas_state::CanvasState;
use std::collections::VecDeque;

/// Default number of states kept in `past`.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    /// Recorded states, oldest first. The back is the current state.
    past: VecDeque<CanvasState>,
    /// Undone states, the next redo target at the front.
    future: VecDeque<CanvasState>,
    /// Maximum length of `past`
    max_size: usize,
    empty: CanvasState,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A history keeping at most `max_size` states (at least one).
    pub fn with_limit(max_size: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_size: max_size.max(1),
            empty: CanvasState::empty(),
        }
    }

    /// Record a new state. Identical consecutive states are ignored.
    pub fn push(&mut self, state: CanvasState) {
        if self.past.back() == Some(&state) {
            log::debug!("History push skipped, state unchanged");
            return;
        }

        self.past.push_back(state);
        if self.past.len() > self.max_size {
            self.past.pop_front();
        }
        self.future.clear();
        log::debug!("History push, {} recorded state(s)", self.past.len());
    }

    /// Step back one state. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        if self.past.len() <= 1 {
            return false;
        }
        match self.past.pop_back() {
            Some(state) => {
                self.future.push_front(state);
                true
            }
            None => false,
        }
    }

    /// Step forward one undone state. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.future.pop_front() {
            Some(state) => {
                self.past.push_back(state);
                if self.past.len() > self.max_size {
                    self.past.pop_front();
                }
                true
            }
            None => false,
        }
    }

    /// Delete everything: record the empty state and drop the redo buffer.
    pub fn clear(&mut self) {
        self.push(CanvasState::empty());
        self.future.clear();
    }

    /// The state currently on screen.
    pub fn current(&self) -> &CanvasState {
        self.past.back().unwrap_or(&self.empty)
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of recorded states, including the current one.
    pub fn len(&self) -> usize {
        self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }

    /// Maximum number of recorded states.
    pub fn limit(&self) -> usize {
        self.max_size
    }

    /// Number of states available to redo.
    pub fn redo_len(&self) -> usize {
        self.future.len()
    }
}
