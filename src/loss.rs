//! Scalar penalties over color space minimized by the optimizers.
//!
//! Every loss is a pure function of its inputs and is non-negative. Weights
//! are fixed design constants.

use crate::color::{
    Color01, Hsv, contrast_between, hsv_to_rgb, relative_luminance, rgb_to_hsv, squared_distance,
};
use crate::hover::{HoverPolicy, hover_from_base};

/// Default minimum WCAG contrast ratio for text.
pub const DEFAULT_TARGET_CONTRAST: f64 = 6.0;

/// Weight of the style (target color) term.
const STYLE_WEIGHT: f64 = 0.18;
/// Weight of the text-channel magnitude regularizer.
const TEXT_REG_WEIGHT: f64 = 0.0015;
/// Saturation floor for the style target.
const TARGET_MIN_SATURATION: f64 = 0.55;
/// Style target value on light and dark backgrounds.
const TARGET_VALUE_ON_LIGHT: f64 = 0.15;
const TARGET_VALUE_ON_DARK: f64 = 0.95;
/// Background luminance above which a background counts as light.
const LIGHT_BACKGROUND_LUMINANCE: f64 = 0.5;

/// Target squared RGB distance between base and hover.
const HOVER_TARGET_DIFF: f64 = 0.06;
/// Target absolute luminance shift between base and hover.
const HOVER_TARGET_LUM_SHIFT: f64 = 0.25;
/// Safe luminance band for the hover color.
const HOVER_MIN_LUMINANCE: f64 = 0.08;
const HOVER_MAX_LUMINANCE: f64 = 0.92;
const HOVER_LUM_WEIGHT: f64 = 0.6;
const HOVER_EXTREME_WEIGHT: f64 = 0.2;
const POLICY_REG_WEIGHT: f64 = 0.002;

/// Prior the policy regularizer pulls toward: mix fraction, then R/G/B factors.
pub const POLICY_PRIOR: HoverPolicy = HoverPolicy {
    mix: 0.18,
    red: 0.82,
    green: 0.86,
    blue: 0.92,
};

/// Individual terms of the text loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLossTerms {
    /// Squared contrast deficit below the target ratio
    pub contrast: f64,
    /// Squared distance to the style target color (unweighted)
    pub style: f64,
    /// Channel magnitude regularizer (weighted)
    pub regularization: f64,
}

impl TextLossTerms {
    /// Weighted total.
    pub fn total(&self) -> f64 {
        self.contrast + STYLE_WEIGHT * self.style + self.regularization
    }
}

/// Style target for text on `background`.
///
/// Complementary hue, saturation floored at 0.55, and a value pushing toward
/// dark text on light backgrounds and light text on dark ones.
pub fn style_target(background: Color01) -> Color01 {
    let hsv = rgb_to_hsv(background);
    let value = if relative_luminance(background) > LIGHT_BACKGROUND_LUMINANCE {
        TARGET_VALUE_ON_LIGHT
    } else {
        TARGET_VALUE_ON_DARK
    };
    let target = Hsv::new(
        hsv.hue,
        hsv.saturation.max(TARGET_MIN_SATURATION),
        value,
    )
    .rotate(0.5);
    hsv_to_rgb(target)
}

/// Squared contrast deficit below `target_contrast`.
pub fn contrast_deficit(background: Color01, text: Color01, target_contrast: f64) -> f64 {
    let ratio = contrast_between(background, text);
    (target_contrast - ratio).max(0.0).powi(2)
}

/// Break the text loss into its terms.
pub fn text_loss_terms(background: Color01, text: Color01, target_contrast: f64) -> TextLossTerms {
    TextLossTerms {
        contrast: contrast_deficit(background, text, target_contrast),
        style: squared_distance(text, style_target(background)),
        regularization: TEXT_REG_WEIGHT
            * (text.red * text.red + text.green * text.green + text.blue * text.blue),
    }
}

/// Text loss for `text` over `background`.
pub fn text_loss(background: Color01, text: Color01, target_contrast: f64) -> f64 {
    text_loss_terms(background, text, target_contrast).total()
}

/// Individual terms of the hover-policy loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyLossTerms {
    /// Squared miss of the target base/hover distance
    pub diff: f64,
    /// Squared miss of the target luminance shift (unweighted)
    pub luminance: f64,
    /// Quadratic excess outside the safe luminance band (unweighted)
    pub extreme: f64,
    /// Pull toward the policy prior (weighted)
    pub regularization: f64,
}

impl PolicyLossTerms {
    /// Weighted total.
    pub fn total(&self) -> f64 {
        self.diff
            + HOVER_LUM_WEIGHT * self.luminance
            + HOVER_EXTREME_WEIGHT * self.extreme
            + self.regularization
    }
}

/// Quadratic penalty for luminance outside the safe band, zero inside.
pub fn extreme_penalty(luminance: f64) -> f64 {
    if luminance < HOVER_MIN_LUMINANCE {
        (HOVER_MIN_LUMINANCE - luminance).powi(2)
    } else if luminance > HOVER_MAX_LUMINANCE {
        (luminance - HOVER_MAX_LUMINANCE).powi(2)
    } else {
        0.0
    }
}

/// Break the hover-policy loss into its terms.
pub fn policy_loss_terms(base: Color01, policy: HoverPolicy) -> PolicyLossTerms {
    let hover = hover_from_base(base, policy);
    let base_lum = relative_luminance(base);
    let hover_lum = relative_luminance(hover);

    let regularization = POLICY_REG_WEIGHT
        * policy
            .to_array()
            .iter()
            .zip(POLICY_PRIOR.to_array())
            .map(|(p, prior)| (p - prior).powi(2))
            .sum::<f64>();

    PolicyLossTerms {
        diff: (squared_distance(hover, base) - HOVER_TARGET_DIFF).powi(2),
        luminance: ((hover_lum - base_lum).abs() - HOVER_TARGET_LUM_SHIFT).powi(2),
        extreme: extreme_penalty(hover_lum),
        regularization,
    }
}

/// Hover-policy loss for deriving a hover color from `base` with `policy`.
pub fn policy_loss(base: Color01, policy: HoverPolicy) -> f64 {
    policy_loss_terms(base, policy).total()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::color::unit;

    #[test]
    fn contrast_deficit_zero_when_target_met() {
        let black = unit(0.0, 0.0, 0.0);
        let white = unit(1.0, 1.0, 1.0);
        assert_eq!(contrast_deficit(black, white, DEFAULT_TARGET_CONTRAST), 0.0);
    }

    #[test]
    fn contrast_deficit_is_squared_gap() {
        let gray = unit(0.5, 0.5, 0.5);
        // Identical colors have ratio 1
        assert_relative_eq!(contrast_deficit(gray, gray, 6.0), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn style_target_is_dark_on_light_background() {
        let target = style_target(unit(0.95, 0.95, 0.9));
        assert!(relative_luminance(target) < 0.1);
    }

    #[test]
    fn style_target_is_light_on_dark_background() {
        let target = style_target(unit(0.05, 0.05, 0.2));
        assert!(rgb_to_hsv(target).value > 0.9);
    }

    #[test]
    fn style_target_uses_complementary_hue() {
        // Pure blue background -> hue 2/3, complement is 1/6 (yellow)
        let target = style_target(unit(0.0, 0.0, 1.0));
        assert_relative_eq!(rgb_to_hsv(target).hue, 1.0 / 6.0, epsilon = 1e-9);
    }

    #[test]
    fn extreme_penalty_zero_inside_band() {
        assert_eq!(extreme_penalty(0.5), 0.0);
        assert_relative_eq!(extreme_penalty(0.0), 0.0064, epsilon = 1e-12);
        assert_relative_eq!(extreme_penalty(1.0), 0.0064, epsilon = 1e-12);
    }

    #[test]
    fn policy_regularization_vanishes_at_prior() {
        let terms = policy_loss_terms(unit(0.3, 0.5, 0.7), POLICY_PRIOR);
        assert_eq!(terms.regularization, 0.0);
    }

    #[test]
    fn losses_are_non_negative() {
        let samples = [
            unit(0.0, 0.0, 0.0),
            unit(1.0, 1.0, 1.0),
            unit(0.13, 0.55, 0.9),
            unit(0.9, 0.2, 0.1),
        ];
        for bg in samples {
            for text in samples {
                assert!(text_loss(bg, text, DEFAULT_TARGET_CONTRAST) >= 0.0);
            }
            assert!(policy_loss(bg, POLICY_PRIOR) >= 0.0);
        }
    }
}
