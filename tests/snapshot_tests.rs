//! Snapshot tests for rendered palettes.
//!
//! Results are built by hand so the rendered output is exact.

use chainhue::color::{Color01, to_unit, unit};
use chainhue::hover::DEFAULT_FIXED_POLICY;
use chainhue::optimizer::OptimizationResult;
use chainhue::pipeline::PaletteResult;
use chainhue::report::{render_css, render_summary, style_bindings};
use palette::Srgb;

fn stage(value: Color01, loss: f64) -> OptimizationResult<Color01> {
    OptimizationResult {
        params: vec![0.0; 3],
        value,
        loss,
        initial_loss: loss,
    }
}

fn sample() -> PaletteResult {
    let base = Srgb::new(34u8, 139, 230);
    PaletteResult {
        base,
        base_background: to_unit(base),
        base_text: stage(unit(0.0, 0.0, 0.0), 0.25),
        hover: unit(0.2, 0.4, 0.6),
        hover_policy: DEFAULT_FIXED_POLICY,
        hover_text: stage(unit(1.0, 1.0, 1.0), 1.5),
        page_background: unit(0.0, 0.2, 0.4),
        policy_optimization: None,
        strategy: "fixed",
    }
}

#[test]
fn snapshot_css() {
    insta::assert_snapshot!(render_css(&sample()), @r"
    :root {
      --btn-bg: rgb(34, 139, 230);
      --btn-fg: rgb(0, 0, 0);
      --btn-hover-bg: rgb(51, 102, 153);
      --btn-hover-fg: rgb(255, 255, 255);
      --page-bg: rgb(0, 51, 102);
    }
    ");
}

#[test]
fn snapshot_summary() {
    insta::assert_snapshot!(render_summary(&sample()), @r"
    Strategy:          fixed
    Button background: rgb(34, 139, 230)
    Button text:       rgb(0, 0, 0)  loss 0.250000
    Hover background:  rgb(51, 102, 153)
    Hover text:        rgb(255, 255, 255)  loss 1.500000
    Page background:   rgb(0, 51, 102)
    Hover policy:      mix 0.3500, r 0.7200, g 0.7600, b 0.8400  (fixed)
    ");
}

#[test]
fn snapshot_learned_policy_line() {
    let mut result = sample();
    result.strategy = "learned";
    result.policy_optimization = Some(OptimizationResult {
        params: DEFAULT_FIXED_POLICY.to_array().to_vec(),
        value: DEFAULT_FIXED_POLICY,
        loss: 0.0123,
        initial_loss: 0.5,
    });
    let summary = render_summary(&result);
    let last = summary.lines().last().unwrap_or_default();
    insta::assert_snapshot!(last, @"Hover policy:      mix 0.3500, r 0.7200, g 0.7600, b 0.8400  loss 0.012300");
}

#[test]
fn test_bindings_order() {
    let properties: Vec<_> = style_bindings(&sample())
        .into_iter()
        .map(|b| b.property)
        .collect();
    assert_eq!(
        properties,
        ["--btn-bg", "--btn-fg", "--btn-hover-bg", "--btn-hover-fg", "--page-bg"]
    );
}
