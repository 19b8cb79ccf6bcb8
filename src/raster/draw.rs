// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rasterize canvas states.
//!
//! Strokes are drawn by stamping a round brush along each segment, with
//! stamps spaced at most one pixel apart.

use crate::models::canvas_state::{CanvasState, Point, Stroke};
use crate::models::color::Rgb;
use image::RgbImage;

/// Render `state` on a `width` x `height` image filled with `background`.
pub fn rasterize(state: &CanvasState, width: u32, height: u32, background: Rgb) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, background.to_pixel());
    for stroke in state.strokes() {
        draw_stroke(&mut image, stroke);
    }
    log::trace!(
        "Rasterized {} stroke(s) at {}x{}",
        state.strokes().len(),
        width,
        height
    );
    image
}

fn draw_stroke(image: &mut RgbImage, stroke: &Stroke) {
    let radius = (stroke.width / 2.0).max(0.5);
    let color = stroke.color.to_pixel();

    let mut points = stroke.points.iter();
    let Some(&first) = points.next() else {
        return;
    };
    stamp(image, first, radius, color);

    let mut prev = first;
    for &next in points {
        let dx = next.x - prev.x;
        let dy = next.y - prev.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            stamp(image, Point::new(prev.x + dx * t, prev.y + dy * t), radius, color);
        }
        prev = next;
    }
}

/// Fill every pixel whose center lies within `radius` of `center`.
fn stamp(image: &mut RgbImage, center: Point, radius: f32, color: image::Rgb<u8>) {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return;
    }

    let min_x = (center.x - radius).floor().max(0.0) as u32;
    let min_y = (center.y - radius).floor().max(0.0) as u32;
    let max_x = ((center.x + radius).ceil().max(0.0) as u32).min(w - 1);
    let max_y = ((center.y + radius).ceil().max(0.0) as u32).min(h - 1);
    let r2 = radius * radius;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 + 0.5 - center.x;
            let py = y as f32 + 0.5 - center.y;
            if px * px + py * py <= r2 {
                image.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::blank::is_blank;
    use image::DynamicImage;

    fn line(points: &[(f32, f32)], color: Rgb, width: f32) -> Stroke {
        let mut stroke = Stroke::new(color, width);
        for &(x, y) in points {
            stroke.add_point(Point::new(x, y));
        }
        stroke
    }

    #[test]
    fn test_empty_state_is_background() {
        let img = rasterize(&CanvasState::empty(), 32, 32, Rgb([0, 0, 139]));
        assert!(is_blank(&DynamicImage::ImageRgb8(img), Rgb([0, 0, 139])));
    }

    #[test]
    fn test_dot_stroke_paints_center() {
        let state = CanvasState::from_strokes(vec![line(&[(10.0, 10.0)], Rgb::BLACK, 6.0)]);
        let img = rasterize(&state, 20, 20, Rgb::WHITE);
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_segment_is_continuous() {
        let state = CanvasState::from_strokes(vec![line(
            &[(2.0, 10.5), (30.0, 10.5)],
            Rgb([255, 0, 0]),
            2.0,
        )]);
        let img = rasterize(&state, 40, 20, Rgb::WHITE);
        for x in 2..30 {
            assert_eq!(img.get_pixel(x, 10).0, [255, 0, 0], "gap at x={}", x);
        }
    }

    #[test]
    fn test_strokes_outside_canvas_are_clipped() {
        let state = CanvasState::from_strokes(vec![line(
            &[(-50.0, -50.0), (-10.0, -10.0)],
            Rgb::BLACK,
            4.0,
        )]);
        let img = rasterize(&state, 16, 16, Rgb::WHITE);
        assert!(is_blank(&DynamicImage::ImageRgb8(img), Rgb::WHITE));
    }

    #[test]
    fn test_background_colored_stroke_reads_as_blank() {
        let state = CanvasState::from_strokes(vec![line(
            &[(1.0, 1.0), (14.0, 14.0)],
            Rgb::WHITE,
            3.0,
        )]);
        let img = rasterize(&state, 16, 16, Rgb::WHITE);
        assert!(is_blank(&DynamicImage::ImageRgb8(img), Rgb::WHITE));
    }
}
