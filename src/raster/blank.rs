// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Blank canvas detection.
//!
//! An image is blank when it is pixel-for-pixel identical to a solid fill of
//! the background color. Strokes drawn in the background color therefore do
//! not count as content.

use crate::models::color::Rgb;
use image::{DynamicImage, RgbImage};

/// Inclusive pixel bounds of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// Per-channel absolute difference between `image` and a same-sized fill of `background`.
fn difference(image: &RgbImage, background: Rgb) -> RgbImage {
    let reference = RgbImage::from_pixel(image.width(), image.height(), background.to_pixel());
    let mut diff = RgbImage::new(image.width(), image.height());
    for ((out, a), b) in diff.pixels_mut().zip(image.pixels()).zip(reference.pixels()) {
        for c in 0..3 {
            out.0[c] = a.0[c].abs_diff(b.0[c]);
        }
    }
    diff
}

/// Bounding box of every pixel that differs from `background`, or `None`
/// when nothing does.
pub fn difference_bbox(image: &DynamicImage, background: Rgb) -> Option<BoundingBox> {
    let rgb = image.to_rgb8();
    let diff = difference(&rgb, background);

    let mut bbox: Option<BoundingBox> = None;
    for (x, y, pixel) in diff.enumerate_pixels() {
        if pixel.0 == [0, 0, 0] {
            continue;
        }
        bbox = Some(match bbox {
            None => BoundingBox {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            Some(b) => BoundingBox {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            },
        });
    }
    bbox
}

/// Whether `image` holds no user content on top of `background`.
pub fn is_blank(image: &DynamicImage, background: Rgb) -> bool {
    difference_bbox(image, background).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(width: u32, height: u32, color: Rgb) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, color.to_pixel()))
    }

    #[test]
    fn test_solid_background_is_blank() {
        for color in [Rgb::WHITE, Rgb::BLACK, Rgb([0, 0, 139])] {
            assert!(is_blank(&solid(40, 30, color), color));
        }
    }

    #[test]
    fn test_single_pixel_is_content() {
        let mut img = RgbImage::from_pixel(20, 20, Rgb::WHITE.to_pixel());
        img.put_pixel(13, 4, image::Rgb([254, 255, 255]));
        let img = DynamicImage::ImageRgb8(img);

        assert!(!is_blank(&img, Rgb::WHITE));
        assert_eq!(
            difference_bbox(&img, Rgb::WHITE),
            Some(BoundingBox {
                min_x: 13,
                min_y: 4,
                max_x: 13,
                max_y: 4
            })
        );
    }

    #[test]
    fn test_bbox_spans_all_content() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb::WHITE.to_pixel());
        img.put_pixel(2, 7, image::Rgb([0, 0, 0]));
        img.put_pixel(8, 1, image::Rgb([0, 0, 0]));
        let bbox = difference_bbox(&DynamicImage::ImageRgb8(img), Rgb::WHITE);
        assert_eq!(
            bbox,
            Some(BoundingBox {
                min_x: 2,
                min_y: 1,
                max_x: 8,
                max_y: 7
            })
        );
    }

    #[test]
    fn test_background_mismatch_is_not_blank() {
        assert!(!is_blank(&solid(8, 8, Rgb::WHITE), Rgb::BLACK));
    }

    #[test]
    fn test_alpha_channel_is_ignored() {
        let img = RgbaImage::from_pixel(6, 6, Rgba([255, 255, 255, 0]));
        assert!(is_blank(&DynamicImage::ImageRgba8(img), Rgb::WHITE));
    }

    #[test]
    fn test_empty_image_is_blank() {
        assert!(is_blank(&solid(0, 0, Rgb::BLACK), Rgb::WHITE));
    }
}
