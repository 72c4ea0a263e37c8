//! Palette validation with WCAG contrast checking.

use float_cmp::approx_eq;
use tracing::debug;

#[cfg(debug_assertions)]
use tracing::instrument;

use crate::apca::apca_contrast;
use crate::color::{Color01, contrast_between};
use crate::pipeline::PaletteResult;

/// Ratios within this distance of the threshold count as passing.
const RATIO_TOLERANCE: f64 = 0.05;

/// Text/background pair checked against the contrast threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationPair {
    pub foreground: &'static str,
    pub background: &'static str,
}

/// Result of validating a single color pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub pair: ValidationPair,
    /// WCAG contrast ratio
    pub ratio: f64,
    /// Ratio the pair was checked against
    pub threshold: f64,
    pub passes: bool,
    /// APCA Lc, reference only
    pub apca_lc: f64,
}

/// Pairs that must reach the threshold for the palette to be valid.
pub fn required_pairs(result: &PaletteResult) -> Vec<(ValidationPair, Color01, Color01)> {
    vec![
        (
            ValidationPair {
                foreground: "button-text",
                background: "button-bg",
            },
            result.base_text.value,
            result.base_background,
        ),
        (
            ValidationPair {
                foreground: "hover-text",
                background: "hover-bg",
            },
            result.hover_text.value,
            result.hover,
        ),
    ]
}

/// Check one pair against `threshold`.
pub fn check_pair(pair: ValidationPair, fg: Color01, bg: Color01, threshold: f64) -> ValidationResult {
    let ratio = contrast_between(fg, bg);
    let passes = ratio > threshold || approx_eq!(f64, ratio, threshold, epsilon = RATIO_TOLERANCE);
    ValidationResult {
        pair,
        ratio,
        threshold,
        passes,
        apca_lc: apca_contrast(fg, bg),
    }
}

/// Validate every required pair of a palette.
#[cfg_attr(debug_assertions, instrument(skip(result), fields(base = ?result.base)))]
pub fn validate(result: &PaletteResult, threshold: f64) -> Vec<ValidationResult> {
    required_pairs(result)
        .into_iter()
        .map(|(pair, fg, bg)| check_pair(pair, fg, bg, threshold))
        .collect()
}

/// Validate a palette and return warnings for any failing pairs.
pub fn validate_with_warnings(result: &PaletteResult, threshold: f64) -> Vec<String> {
    validate(result, threshold)
        .into_iter()
        .filter(|r| !r.passes)
        .map(|r| {
            debug!(
                fg = r.pair.foreground,
                bg = r.pair.background,
                ratio = r.ratio,
                threshold = r.threshold,
                "contrast below threshold"
            );
            format!(
                "{} on {}: ratio {:.2} (required: {:.2}, APCA Lc {:.1})",
                r.pair.foreground,
                r.pair.background,
                r.ratio,
                r.threshold,
                r.apca_lc.abs()
            )
        })
        .collect()
}
