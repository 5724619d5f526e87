//! Corner-sampled background color estimation.
//!
//! The estimate assumes a roughly centered subject: the four image corners
//! are taken as background samples and averaged. This is a heuristic stand-in
//! for segmentation, not true matting.

use image::{Rgba, RgbaImage};

/// Average background color of an image, one `f32` per channel.
///
/// Computed fresh for every synthesis pass; immutable while a pass runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundEstimate {
    /// Mean red channel of the four corner pixels.
    pub r: f32,
    /// Mean green channel of the four corner pixels.
    pub g: f32,
    /// Mean blue channel of the four corner pixels.
    pub b: f32,
}

impl BackgroundEstimate {
    /// Sample the four corner pixels and average each channel.
    ///
    /// Reads exactly `(0,0)`, `(w-1,0)`, `(0,h-1)` and `(w-1,h-1)`. A 1x1
    /// image samples its only pixel four times, which is the same value.
    #[must_use]
    pub fn from_corners(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let corners = [
            img.get_pixel(0, 0),
            img.get_pixel(w - 1, 0),
            img.get_pixel(0, h - 1),
            img.get_pixel(w - 1, h - 1),
        ];

        let mut sum = [0.0f32; 3];
        for px in corners {
            for ch in 0..3 {
                sum[ch] += f32::from(px[ch]);
            }
        }

        Self {
            r: sum[0] / 4.0,
            g: sum[1] / 4.0,
            b: sum[2] / 4.0,
        }
    }

    /// Euclidean distance between a pixel's RGB and this estimate.
    #[must_use]
    pub fn distance(&self, px: &Rgba<u8>) -> f32 {
        let dr = f32::from(px[0]) - self.r;
        let dg = f32::from(px[1]) - self.g;
        let db = f32::from(px[2]) - self.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_image_estimates_its_own_color() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([128, 128, 128, 255]));
        let bg = BackgroundEstimate::from_corners(&img);
        assert!((bg.r - 128.0).abs() < f32::EPSILON);
        assert!((bg.g - 128.0).abs() < f32::EPSILON);
        assert!((bg.b - 128.0).abs() < f32::EPSILON);
    }

    #[test]
    fn corners_are_averaged_without_weighting() {
        let mut img = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 0, Rgba([100, 0, 0, 255]));
        img.put_pixel(19, 0, Rgba([0, 100, 0, 255]));
        img.put_pixel(0, 9, Rgba([0, 0, 100, 255]));
        img.put_pixel(19, 9, Rgba([100, 100, 100, 255]));

        let bg = BackgroundEstimate::from_corners(&img);
        assert!((bg.r - 50.0).abs() < f32::EPSILON);
        assert!((bg.g - 50.0).abs() < f32::EPSILON);
        assert!((bg.b - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn interior_pixels_do_not_affect_the_estimate() {
        let mut img = RgbaImage::from_pixel(9, 9, Rgba([0, 0, 0, 255]));
        img.put_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let bg = BackgroundEstimate::from_corners(&img);
        assert!((bg.r).abs() < f32::EPSILON);
    }

    #[test]
    fn distance_is_euclidean() {
        let bg = BackgroundEstimate {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        };
        // 3-4-0 triangle: distance 5
        let d = bg.distance(&Rgba([3, 4, 0, 255]));
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn distance_to_matching_color_is_zero() {
        let bg = BackgroundEstimate {
            r: 40.0,
            g: 50.0,
            b: 60.0,
        };
        assert!(bg.distance(&Rgba([40, 50, 60, 255])).abs() < f32::EPSILON);
    }

    #[test]
    fn single_pixel_image_samples_itself() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([7, 8, 9, 255]));
        let bg = BackgroundEstimate::from_corners(&img);
        assert!((bg.r - 7.0).abs() < f32::EPSILON);
        assert!((bg.g - 8.0).abs() < f32::EPSILON);
        assert!((bg.b - 9.0).abs() < f32::EPSILON);
    }
}
