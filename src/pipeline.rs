//! Base → text → hover → hover text chain.

use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

#[cfg(debug_assertions)]
use tracing::instrument;

use crate::color::{Color01, Color255, to_unit, unit};
use crate::hover::{HoverPolicy, HoverStrategy};
use crate::loss::DEFAULT_TARGET_CONTRAST;
use crate::optimizer::{DescentSettings, OptimizationResult, TEXT_INITIAL_PARAMS, optimize_text};

/// Per-channel scale applied to the base to get the page background.
pub const DEFAULT_PAGE_DARKENING: f64 = 0.10;

/// Settings for everything in the chain except the hover strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSettings {
    /// Text optimizer settings, shared by both text stages
    pub text: DescentSettings,
    /// Starting parameters for the base-text stage
    pub text_initial: Vec<f64>,
    /// Minimum WCAG contrast the text loss aims for
    pub target_contrast: f64,
    /// Page background scale factor
    pub page_darkening: f64,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            text: DescentSettings::text(),
            text_initial: TEXT_INITIAL_PARAMS.to_vec(),
            target_contrast: DEFAULT_TARGET_CONTRAST,
            page_darkening: DEFAULT_PAGE_DARKENING,
        }
    }
}

/// Everything one chain run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteResult {
    /// Input color
    pub base: Color255,
    /// Button background, the input in unit range
    pub base_background: Color01,
    /// Button text optimization
    pub base_text: OptimizationResult<Color01>,
    /// Hover background
    pub hover: Color01,
    /// Policy the hover background was derived with
    pub hover_policy: HoverPolicy,
    /// Hover text optimization, warm-started from `base_text`
    pub hover_text: OptimizationResult<Color01>,
    /// Page background
    pub page_background: Color01,
    /// Policy search diagnostics, only for learned strategies
    pub policy_optimization: Option<OptimizationResult<HoverPolicy>>,
    /// Name of the hover strategy used
    pub strategy: &'static str,
}

/// Scale each channel of `base` by `factor`.
pub fn page_background(base: Color01, factor: f64) -> Color01 {
    unit(base.red * factor, base.green * factor, base.blue * factor)
}

/// Run the full chain for one base color.
///
/// The hover-text stage starts from the base-text stage's final parameters;
/// nothing else flows between stages.
///
/// # Example
///
/// ```
/// use palette::Srgb;
/// use chainhue::hover::FixedHover;
/// use chainhue::pipeline::{ChainSettings, apply_chain};
///
/// let result = apply_chain(Srgb::new(34u8, 139, 230), &FixedHover::default(), &ChainSettings::default());
/// assert!(result.base_text.loss.is_finite());
/// assert_ne!(result.hover, result.base_background);
/// ```
#[cfg_attr(
    debug_assertions,
    instrument(skip(strategy, settings), fields(hover = strategy.name()))
)]
pub fn apply_chain<S: HoverStrategy + ?Sized>(
    base: Color255,
    strategy: &S,
    settings: &ChainSettings,
) -> PaletteResult {
    let start = Instant::now();
    let base_background = to_unit(base);

    let base_text = optimize_text(
        base_background,
        &settings.text_initial,
        &settings.text,
        settings.target_contrast,
    );

    let derivation = strategy.derive_hover(base_background);

    let hover_text = optimize_text(
        derivation.color,
        &base_text.params,
        &settings.text,
        settings.target_contrast,
    );

    let page = page_background(base_background, settings.page_darkening);

    info!(
        strategy = strategy.name(),
        base_text_loss = base_text.loss,
        hover_text_loss = hover_text.loss,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Chain complete"
    );

    PaletteResult {
        base,
        base_background,
        base_text,
        hover: derivation.color,
        hover_policy: derivation.policy,
        hover_text,
        page_background: page,
        policy_optimization: derivation.optimization,
        strategy: strategy.name(),
    }
}

/// Run independent chains in parallel, preserving input order.
pub fn apply_chain_batch<S: HoverStrategy + Sync + ?Sized>(
    bases: &[Color255],
    strategy: &S,
    settings: &ChainSettings,
) -> Vec<PaletteResult> {
    bases
        .par_iter()
        .map(|&base| apply_chain(base, strategy, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use palette::Srgb;

    use super::*;
    use crate::hover::FixedHover;

    #[test]
    fn page_background_scales_base() {
        let page = page_background(unit(0.5, 1.0, 0.2), 0.1);
        assert_relative_eq!(page.red, 0.05);
        assert_relative_eq!(page.green, 0.1);
        assert_relative_eq!(page.blue, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn hover_text_is_warm_started() {
        let settings = ChainSettings {
            text: DescentSettings {
                iterations: 0,
                ..DescentSettings::text()
            },
            text_initial: vec![1.0, -1.0, 0.5],
            ..Default::default()
        };
        let result = apply_chain(Srgb::new(200u8, 40, 40), &FixedHover::default(), &settings);
        // With no iterations, both stages report their starting point
        assert_eq!(result.base_text.params, vec![1.0, -1.0, 0.5]);
        assert_eq!(result.hover_text.params, result.base_text.params);
    }
}
