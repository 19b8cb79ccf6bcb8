// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Structural canvas snapshots.
//!
//! A [`CanvasState`] is the set of strokes currently on the drawing surface.
//! States are compared through a canonical key so that the history can drop
//! consecutive duplicates without depending on how a state happens to be
//! formatted or in which order its strokes were collected.

use super::color::Rgb;
use std::fmt::Write;

/// A point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single freehand stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: Rgb,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Rgb, width: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            width,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        // Pointer events repeat the last position while the button is held still.
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Exact textual key for this stroke. Floats are encoded by bit pattern.
    fn key(&self) -> String {
        let mut key = String::with_capacity(24 + self.points.len() * 17);
        // Writing into a String cannot fail.
        let _ = write!(key, "{}:{:08x}", self.color.to_hex(), self.width.to_bits());
        for p in &self.points {
            let _ = write!(key, ";{:08x},{:08x}", p.x.to_bits(), p.y.to_bits());
        }
        key
    }
}

/// Everything drawn on the canvas at one moment.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    strokes: Vec<Stroke>,
}

impl CanvasState {
    /// The canonical state with nothing drawn.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// A new state with `stroke` added on top.
    pub fn with_stroke(&self, stroke: Stroke) -> Self {
        let mut strokes = self.strokes.clone();
        strokes.push(stroke);
        Self { strokes }
    }

    /// Canonical comparison key: per-stroke keys, sorted, newline-joined.
    pub fn comparison_key(&self) -> String {
        let mut keys: Vec<String> = self.strokes.iter().map(Stroke::key).collect();
        keys.sort_unstable();
        keys.join("\n")
    }
}

impl PartialEq for CanvasState {
    fn eq(&self, other: &Self) -> bool {
        self.strokes.len() == other.strokes.len() && self.comparison_key() == other.comparison_key()
    }
}

impl Eq for CanvasState {}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f32, f32)], color: Rgb) -> Stroke {
        let mut s = Stroke::new(color, 6.0);
        for &(x, y) in points {
            s.add_point(Point::new(x, y));
        }
        s
    }

    #[test]
    fn test_equality_ignores_stroke_order() {
        let a = stroke(&[(1.0, 1.0), (2.0, 2.0)], Rgb::BLACK);
        let b = stroke(&[(5.0, 5.0)], Rgb([255, 0, 0]));

        let ab = CanvasState::from_strokes(vec![a.clone(), b.clone()]);
        let ba = CanvasState::from_strokes(vec![b, a]);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_equality_is_exact() {
        let a = CanvasState::from_strokes(vec![stroke(&[(1.0, 1.0)], Rgb::BLACK)]);
        let b = CanvasState::from_strokes(vec![stroke(&[(1.0, 1.000_001)], Rgb::BLACK)]);
        let c = CanvasState::from_strokes(vec![stroke(&[(1.0, 1.0)], Rgb([0, 0, 1]))]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, CanvasState::empty());
    }

    #[test]
    fn test_stroke_skips_repeated_points() {
        let s = stroke(&[(3.0, 4.0), (3.0, 4.0), (3.0, 5.0)], Rgb::BLACK);
        assert_eq!(s.points.len(), 2);
    }

    #[test]
    fn test_with_stroke_leaves_original_untouched() {
        let base = CanvasState::empty();
        let next = base.with_stroke(stroke(&[(0.0, 0.0)], Rgb::BLACK));
        assert!(base.is_empty());
        assert_eq!(next.strokes().len(), 1);
    }
}
