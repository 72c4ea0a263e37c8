//! Presentation adapter for chain results.
//!
//! Binds palette fields to named style properties, renders a text summary,
//! and provides a serializable view for JSON/YAML output. Nothing here feeds
//! back into the chain.

use serde::Serialize;

use crate::color::{Color01, Color255, to_byte, to_hex};
use crate::optimizer::OptimizationResult;
use crate::pipeline::PaletteResult;

/// Button background property.
pub const BUTTON_BG: &str = "--btn-bg";
/// Button text property.
pub const BUTTON_FG: &str = "--btn-fg";
/// Hover background property.
pub const HOVER_BG: &str = "--btn-hover-bg";
/// Hover text property.
pub const HOVER_FG: &str = "--btn-hover-fg";
/// Page background property.
pub const PAGE_BG: &str = "--page-bg";

/// A named style property and its `rgb(r, g, b)` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleBinding {
    pub property: &'static str,
    pub value: String,
}

/// Format a byte color as `rgb(r, g, b)`.
pub fn css_rgb(color: Color255) -> String {
    format!("rgb({}, {}, {})", color.red, color.green, color.blue)
}

/// Bindings for every palette role, in a stable order.
pub fn style_bindings(result: &PaletteResult) -> Vec<StyleBinding> {
    [
        (BUTTON_BG, result.base),
        (BUTTON_FG, to_byte(result.base_text.value)),
        (HOVER_BG, to_byte(result.hover)),
        (HOVER_FG, to_byte(result.hover_text.value)),
        (PAGE_BG, to_byte(result.page_background)),
    ]
    .into_iter()
    .map(|(property, color)| StyleBinding {
        property,
        value: css_rgb(color),
    })
    .collect()
}

/// Render bindings as a `:root` custom-property block.
pub fn render_css(result: &PaletteResult) -> String {
    let mut out = String::from(":root {\n");
    for binding in style_bindings(result) {
        out.push_str(&format!("  {}: {};\n", binding.property, binding.value));
    }
    out.push_str("}\n");
    out
}

/// Render a multi-line human-readable summary.
pub fn render_summary(result: &PaletteResult) -> String {
    let rgb = |c: Color01| css_rgb(to_byte(c));
    let mut lines = vec![
        format!("Strategy:          {}", result.strategy),
        format!("Button background: {}", css_rgb(result.base)),
        format!(
            "Button text:       {}  loss {:.6}",
            rgb(result.base_text.value),
            result.base_text.loss
        ),
        format!("Hover background:  {}", rgb(result.hover)),
        format!(
            "Hover text:        {}  loss {:.6}",
            rgb(result.hover_text.value),
            result.hover_text.loss
        ),
        format!("Page background:   {}", rgb(result.page_background)),
    ];

    let [mix, red, green, blue] = result.hover_policy.rounded();
    let policy = format!("mix {mix:.4}, r {red:.4}, g {green:.4}, b {blue:.4}");
    match &result.policy_optimization {
        Some(opt) => lines.push(format!(
            "Hover policy:      {policy}  loss {:.6}",
            opt.loss
        )),
        None => lines.push(format!("Hover policy:      {policy}  (fixed)")),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// A color in byte and hex form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    pub rgb: [u8; 3],
    pub hex: String,
}

impl From<Color255> for ColorEntry {
    fn from(c: Color255) -> Self {
        Self {
            rgb: [c.red, c.green, c.blue],
            hex: format!("#{}", to_hex(c)),
        }
    }
}

impl From<Color01> for ColorEntry {
    fn from(c: Color01) -> Self {
        to_byte(c).into()
    }
}

/// An optimized color and its final loss.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub color: ColorEntry,
    pub loss: f64,
}

impl From<&OptimizationResult<Color01>> for StageReport {
    fn from(r: &OptimizationResult<Color01>) -> Self {
        Self {
            color: r.value.into(),
            loss: r.loss,
        }
    }
}

/// Hover policy rounded to four decimals, with the search loss if learned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyReport {
    pub mix: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss: Option<f64>,
}

/// Serializable view of a [`PaletteResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteReport {
    pub strategy: &'static str,
    pub button_background: ColorEntry,
    pub button_text: StageReport,
    pub hover_background: ColorEntry,
    pub hover_text: StageReport,
    pub page_background: ColorEntry,
    pub hover_policy: PolicyReport,
    pub styles: Vec<StyleBinding>,
}

impl From<&PaletteResult> for PaletteReport {
    fn from(result: &PaletteResult) -> Self {
        let [mix, red, green, blue] = result.hover_policy.rounded();
        Self {
            strategy: result.strategy,
            button_background: result.base.into(),
            button_text: (&result.base_text).into(),
            hover_background: result.hover.into(),
            hover_text: (&result.hover_text).into(),
            page_background: result.page_background.into(),
            hover_policy: PolicyReport {
                mix,
                red,
                green,
                blue,
                loss: result.policy_optimization.as_ref().map(|o| o.loss),
            },
            styles: style_bindings(result),
        }
    }
}
