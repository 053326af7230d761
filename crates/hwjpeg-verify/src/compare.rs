//! Image similarity comparison.
//!
//! The fidelity metric is the aggregate per-channel intensity difference
//! between two images, normalized by total channel count and the maximum
//! channel value: `(sum_of_abs_diffs / 255 * 100) / (width * height * 3)`.
//! Lower is more similar; identical images score 0.0 and maximally different
//! images score 100.0.

use image::DynamicImage;
use thiserror::Error;

/// Difference percentage the hardware was validated against: an encode pass
/// whose re-decoded output differs from the source by more than this is
/// considered a failure by the reference harness.
pub const DEFAULT_THRESHOLD: f64 = 0.22;

/// Errors for comparison preconditions.
///
/// Both are fatal input errors reported before any pixel is examined;
/// mismatched inputs are never silently coerced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    /// The images have different color modes.
    #[error("different kinds of images: {original:?} vs {candidate:?}")]
    ModeMismatch {
        original: image::ColorType,
        candidate: image::ColorType,
    },

    /// The images have different dimensions.
    #[error("different sizes: {original_width}x{original_height} vs {candidate_width}x{candidate_height}")]
    SizeMismatch {
        original_width: u32,
        original_height: u32,
        candidate_width: u32,
        candidate_height: u32,
    },

    /// One or both images have no pixels.
    #[error("cannot compare empty images")]
    EmptyImage,
}

/// Compute the normalized difference percentage between two images.
///
/// The images must share color mode and dimensions. The result is symmetric
/// in its arguments and lies in `[0.0, 100.0]`.
pub fn compare(original: &DynamicImage, candidate: &DynamicImage) -> Result<f64, CompareError> {
    if original.color() != candidate.color() {
        return Err(CompareError::ModeMismatch {
            original: original.color(),
            candidate: candidate.color(),
        });
    }

    let a = original.to_rgb8();
    let b = candidate.to_rgb8();
    if a.dimensions() != b.dimensions() {
        return Err(CompareError::SizeMismatch {
            original_width: a.width(),
            original_height: a.height(),
            candidate_width: b.width(),
            candidate_height: b.height(),
        });
    }

    let (width, height) = a.dimensions();
    if width == 0 || height == 0 {
        return Err(CompareError::EmptyImage);
    }

    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw().iter())
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum();

    let components = f64::from(width) * f64::from(height) * 3.0;
    Ok((total as f64 / 255.0 * 100.0) / components)
}

/// Whether a difference percentage counts as a pass under `threshold`.
pub fn within_threshold(difference: f64, threshold: f64) -> bool {
    difference <= threshold
}


// ============================================================================
// Property-Based Tests
// ============================================================================
