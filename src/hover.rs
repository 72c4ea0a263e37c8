//! Hover background derivation.
//!
//! A hover color is a linear mix from the base color toward a per-channel
//! darkened copy of it. The mix fraction and the three darkening factors form
//! a [`HoverPolicy`], which is either fixed at design time ([`FixedHover`]) or
//! searched by gradient descent ([`LearnedHover`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Color01, unit};
use crate::loss::POLICY_PRIOR;
use crate::optimizer::{DescentSettings, OptimizationResult, optimize_policy};

/// Parameters of the hover derivation: mix fraction and channel factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverPolicy {
    /// Fraction of the darkened target mixed into the base
    pub mix: f64,
    /// Red darkening factor
    pub red: f64,
    /// Green darkening factor
    pub green: f64,
    /// Blue darkening factor
    pub blue: f64,
}

impl Default for HoverPolicy {
    fn default() -> Self {
        DEFAULT_FIXED_POLICY
    }
}

/// Policy used by [`FixedHover`] unless configured otherwise.
pub const DEFAULT_FIXED_POLICY: HoverPolicy = HoverPolicy {
    mix: 0.35,
    red: 0.72,
    green: 0.76,
    blue: 0.84,
};

impl HoverPolicy {
    /// Flatten to `[mix, red, green, blue]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.mix, self.red, self.green, self.blue]
    }

    /// Map an optimizer parameter vector to a policy, clamping into `[0, 1]`.
    ///
    /// Missing entries fall back to the prior.
    pub fn from_params(params: &[f64]) -> Self {
        let prior = POLICY_PRIOR.to_array();
        let at = |i: usize| {
            let v = params.get(i).copied().unwrap_or(prior[i]);
            if v.is_nan() { prior[i] } else { v.clamp(0.0, 1.0) }
        };
        Self {
            mix: at(0),
            red: at(1),
            green: at(2),
            blue: at(3),
        }
    }

    /// Policy rounded to four decimal places, as shown in reports.
    pub fn rounded(self) -> [f64; 4] {
        self.to_array().map(|v| (v * 10_000.0).round() / 10_000.0)
    }
}

/// Derive a hover color from `base` using `policy`.
///
/// Computes `(1 - t) * base + t * (r * fr, g * fg, b * fb)`. Out-of-range
/// policies are not rejected; the result is clamped into `[0, 1]`.
///
/// # Example
///
/// ```
/// use chainhue::color::unit;
/// use chainhue::hover::{HoverPolicy, hover_from_base};
///
/// let base = unit(0.4, 0.6, 0.8);
/// let same = hover_from_base(base, HoverPolicy { mix: 0.0, red: 0.1, green: 0.2, blue: 0.3 });
/// assert_eq!(same, base);
/// ```
pub fn hover_from_base(base: Color01, policy: HoverPolicy) -> Color01 {
    let t = policy.mix;
    let mix = |channel: f64, factor: f64| (1.0 - t) * channel + t * (channel * factor);
    unit(
        mix(base.red, policy.red),
        mix(base.green, policy.green),
        mix(base.blue, policy.blue),
    )
}

/// A hover color together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverDerivation {
    /// The derived hover background
    pub color: Color01,
    /// Policy the color was derived with
    pub policy: HoverPolicy,
    /// Optimizer diagnostics when the policy was learned
    pub optimization: Option<OptimizationResult<HoverPolicy>>,
}

/// Capability to derive a hover background from a base color.
pub trait HoverStrategy {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Derive the hover background for `base`.
    fn derive_hover(&self, base: Color01) -> HoverDerivation;
}

/// Closed-form derivation with a design-time policy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedHover {
    pub policy: HoverPolicy,
}

impl HoverStrategy for FixedHover {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn derive_hover(&self, base: Color01) -> HoverDerivation {
        HoverDerivation {
            color: hover_from_base(base, self.policy),
            policy: self.policy,
            optimization: None,
        }
    }
}

/// Policy searched per base color by minimizing the hover-policy loss.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnedHover {
    /// Descent settings for the policy search
    pub settings: DescentSettings,
    /// Starting policy
    pub initial: HoverPolicy,
}

impl Default for LearnedHover {
    fn default() -> Self {
        Self {
            settings: DescentSettings::policy(),
            initial: POLICY_PRIOR,
        }
    }
}

impl HoverStrategy for LearnedHover {
    fn name(&self) -> &'static str {
        "learned"
    }

    fn derive_hover(&self, base: Color01) -> HoverDerivation {
        let result = optimize_policy(base, self.initial, &self.settings);
        let policy = result.value;
        debug!(
            mix = policy.mix,
            red = policy.red,
            green = policy.green,
            blue = policy.blue,
            loss = result.loss,
            "Learned hover policy"
        );
        HoverDerivation {
            color: hover_from_base(base, policy),
            policy,
            optimization: Some(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn full_mix_returns_darkened_target() {
        let base = unit(0.5, 0.8, 1.0);
        let policy = HoverPolicy {
            mix: 1.0,
            red: 0.5,
            green: 0.25,
            blue: 0.9,
        };
        let hover = hover_from_base(base, policy);
        assert_relative_eq!(hover.red, 0.25);
        assert_relative_eq!(hover.green, 0.2);
        assert_relative_eq!(hover.blue, 0.9);
    }

    #[test]
    fn out_of_range_policy_is_clamped() {
        let base = unit(0.9, 0.9, 0.9);
        let policy = HoverPolicy {
            mix: 1.0,
            red: 2.0,
            green: -1.0,
            blue: 1.0,
        };
        let hover = hover_from_base(base, policy);
        assert_eq!(hover.red, 1.0);
        assert_eq!(hover.green, 0.0);
    }

    #[test]
    fn from_params_clamps_and_fills() {
        let policy = HoverPolicy::from_params(&[1.4, -0.2]);
        assert_eq!(policy.mix, 1.0);
        assert_eq!(policy.red, 0.0);
        assert_eq!(policy.green, POLICY_PRIOR.green);
        assert_eq!(policy.blue, POLICY_PRIOR.blue);
    }

    #[test]
    fn rounded_keeps_four_decimals() {
        let policy = HoverPolicy {
            mix: 0.123_456,
            red: 0.5,
            green: 0.999_99,
            blue: 0.35,
        };
        assert_eq!(policy.rounded(), [0.1235, 0.5, 1.0, 0.35]);
    }

    #[test]
    fn fixed_strategy_reports_no_optimization() {
        let derivation = FixedHover::default().derive_hover(unit(0.2, 0.4, 0.6));
        assert!(derivation.optimization.is_none());
        assert_eq!(derivation.policy, DEFAULT_FIXED_POLICY);
    }
}
