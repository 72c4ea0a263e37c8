//! APCA (Accessible Perceptual Contrast Algorithm) implementation.
//!
//! Calculates perceptual contrast between foreground and background colors
//! using the APCA-W3 constants drafted for WCAG 3.0. Reported alongside the
//! WCAG ratio as reference information.

use crate::color::Color01;

/// APCA luminance coefficients for sRGB D65
const COEF_R: f64 = 0.2126729;
const COEF_G: f64 = 0.7151522;
const COEF_B: f64 = 0.0721750;

/// APCA uses a simple power curve rather than the piecewise sRGB transfer
const MAIN_TRC: f64 = 2.4;

/// Threshold for low-luminance soft clamp
const LOW_Y_THRESHOLD: f64 = 0.022;
const LOW_Y_EXPONENT: f64 = 1.414;

/// APCA contrast calculation constants
const SCALE: f64 = 1.14;
const OFFSET: f64 = 0.027;
const THRESHOLD: f64 = 0.1;

/// Exponents for light background (dark text on light bg)
const EXP_BG_LIGHT: f64 = 0.56;
const EXP_FG_LIGHT: f64 = 0.57;

/// Exponents for dark background (light text on dark bg)
const EXP_BG_DARK: f64 = 0.65;
const EXP_FG_DARK: f64 = 0.62;

/// Convert a unit sRGB color to APCA luminance (Y), soft-clamped near black.
pub fn apca_luminance(color: Color01) -> f64 {
    let y = COEF_R * color.red.clamp(0.0, 1.0).powf(MAIN_TRC)
        + COEF_G * color.green.clamp(0.0, 1.0).powf(MAIN_TRC)
        + COEF_B * color.blue.clamp(0.0, 1.0).powf(MAIN_TRC);

    if y < LOW_Y_THRESHOLD {
        y + (LOW_Y_THRESHOLD - y).powf(LOW_Y_EXPONENT)
    } else {
        y
    }
}

/// Calculate APCA contrast (Lc) between foreground and background colors.
///
/// Returns the Lc value:
/// - Positive values indicate dark text on light background
/// - Negative values indicate light text on dark background
/// - Typical range: -108 to +106
///
/// # Example
///
/// ```
/// use chainhue::apca::apca_contrast;
/// use chainhue::color::unit;
///
/// let black = unit(0.0, 0.0, 0.0);
/// let white = unit(1.0, 1.0, 1.0);
///
/// assert!(apca_contrast(black, white) > 100.0);
/// assert!(apca_contrast(white, black) < -100.0);
/// ```
pub fn apca_contrast(fg: Color01, bg: Color01) -> f64 {
    let y_fg = apca_luminance(fg);
    let y_bg = apca_luminance(bg);

    let c = if y_bg > y_fg {
        SCALE * (y_bg.powf(EXP_BG_LIGHT) - y_fg.powf(EXP_FG_LIGHT))
    } else {
        SCALE * (y_bg.powf(EXP_BG_DARK) - y_fg.powf(EXP_FG_DARK))
    };

    if c.abs() < THRESHOLD {
        0.0
    } else if c > 0.0 {
        (c - OFFSET) * 100.0
    } else {
        (c + OFFSET) * 100.0
    }
}
