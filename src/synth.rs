//! Per-pixel map synthesizers.
//!
//! Three independent heuristics derive auxiliary maps from one working
//! buffer and its [`BackgroundEstimate`]:
//!
//! 1. **Depth**: color distance from the background scaled and biased by a
//!    vertical gradient, contrast-stretched, written as grayscale, then
//!    smoothed with a Gaussian blur pass.
//! 2. **Mask**: pixels further than [`SUBJECT_THRESHOLD`] from the
//!    background become solid white; the rest keep their original color.
//! 3. **Noise**: uniform per-pixel monochromatic grain added to the
//!    original colors. Non-deterministic by design.

use std::fmt;

use image::{imageops, Rgba, RgbaImage};
use rand::Rng;

use crate::background::BackgroundEstimate;

/// Color distance above which a pixel is classified as subject.
pub const SUBJECT_THRESHOLD: f32 = 60.0;

/// Gaussian sigma for the depth smoothing pass.
pub const DEPTH_BLUR_SIGMA: f32 = 4.0;

/// Scale applied to the background distance before biasing.
const DEPTH_GAIN: f32 = 1.5;

/// Maximum vertical bias, reached at the bottom row.
const VERTICAL_BIAS: f32 = 100.0;

/// Depth values below this are treated as background in the stretch.
const STRETCH_KNEE: f32 = 80.0;

/// Attenuation for presumed-background depth values.
const STRETCH_ATTENUATION: f32 = 0.4;

/// Lift for presumed-subject depth values, capped at 255.
const STRETCH_LIFT: f32 = 40.0;

/// Peak-to-peak amplitude of the grain jitter (one scalar per pixel).
const NOISE_SPAN: f32 = 50.0;

/// The map heuristics this crate can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Grayscale depth approximation.
    Depth,
    /// Subject silhouette over the original background.
    Mask,
    /// Original colors with additive film grain.
    Noise,
}

impl MapKind {
    /// All kinds, in generation order.
    pub const ALL: [MapKind; 3] = [MapKind::Depth, MapKind::Mask, MapKind::Noise];

    /// Lowercase name used in file suffixes and messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MapKind::Depth => "depth",
            MapKind::Mask => "mask",
            MapKind::Noise => "noise",
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthesize one map kind from a working buffer.
///
/// Samples a fresh [`BackgroundEstimate`] for this pass and dispatches to
/// the matching heuristic. The `rng` is only consumed by [`MapKind::Noise`];
/// pass a seeded generator for reproducible grain.
pub fn synthesize<R: Rng + ?Sized>(kind: MapKind, src: &RgbaImage, rng: &mut R) -> RgbaImage {
    let bg = BackgroundEstimate::from_corners(src);
    match kind {
        MapKind::Depth => depth_map(src, &bg),
        MapKind::Mask => mask_map(src, &bg),
        MapKind::Noise => noise_map(src, rng),
    }
}

/// Synthesize the grayscale depth approximation.
///
/// Per pixel: `distance * 1.5` plus a vertical bias growing from 0 at the
/// top row to 100 at the bottom (floors read as closer than skies), then a
/// contrast stretch that pushes presumed background toward black and
/// presumed subject toward white. A final Gaussian blur pass smooths the
/// hard edges the segmentation heuristic leaves behind.
#[must_use]
pub fn depth_map(src: &RgbaImage, bg: &BackgroundEstimate) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);

    for (x, y, px) in src.enumerate_pixels() {
        let diff = bg.distance(px);
        let mut depth = diff * DEPTH_GAIN;

        #[allow(clippy::cast_precision_loss)]
        let vertical = (y as f32 / h as f32) * VERTICAL_BIAS;
        depth += vertical;

        depth = if depth < STRETCH_KNEE {
            depth * STRETCH_ATTENUATION
        } else {
            (depth + STRETCH_LIFT).min(255.0)
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = depth.clamp(0.0, 255.0) as u8;
        out.put_pixel(x, y, Rgba([v, v, v, 255]));
    }

    imageops::blur(&out, DEPTH_BLUR_SIGMA)
}

/// Synthesize the subject mask.
///
/// Pixels whose distance from the background exceeds [`SUBJECT_THRESHOLD`]
/// are written solid white; all others keep their original RGB. Alpha is
/// forced to full opacity either way. No blur pass.
#[must_use]
pub fn mask_map(src: &RgbaImage, bg: &BackgroundEstimate) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);

    for (x, y, px) in src.enumerate_pixels() {
        let pixel = if bg.distance(px) > SUBJECT_THRESHOLD {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([px[0], px[1], px[2], 255])
        };
        out.put_pixel(x, y, pixel);
    }

    out
}

/// Synthesize the film-grain variant.
///
/// Draws one uniform scalar in `[-25, +25)` per pixel and adds it to all
/// three channels, clamping each to `[0, 255]`. Hue and luminance structure
/// survive; repeated runs differ on purpose.
pub fn noise_map<R: Rng + ?Sized>(src: &RgbaImage, rng: &mut R) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);

    for (x, y, px) in src.enumerate_pixels() {
        let grain = (rng.gen::<f32>() - 0.5) * NOISE_SPAN;
        let mut channels = [0u8; 4];
        for ch in 0..3 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                channels[ch] = (f32::from(px[ch]) + grain).clamp(0.0, 255.0) as u8;
            }
        }
        channels[3] = 255;
        out.put_pixel(x, y, Rgba(channels));
    }

    out
}
