//! Color space utilities: unit/byte scaling, sRGB linearization, WCAG
//! luminance and contrast, turn-based HSV, and input parsing.

use std::fmt;

use csscolorparser::Color as CssColor;
use palette::encoding::Srgb as SrgbEncoding;
use palette::{FromColor, Hsv as PaletteHsv, Srgb};

/// Channel intensities in `[0, 1]`.
pub type Color01 = Srgb<f64>;

/// Channel intensities in `[0, 255]`, the display representation.
pub type Color255 = Srgb<u8>;

/// sRGB transfer function threshold below which the curve is linear.
const LINEAR_THRESHOLD: f64 = 0.04045;

/// ITU-R BT.709 luminance coefficients.
const COEF_R: f64 = 0.2126;
const COEF_G: f64 = 0.7152;
const COEF_B: f64 = 0.0722;

/// Offset added to both luminances in the WCAG contrast ratio.
const CONTRAST_OFFSET: f64 = 0.05;

/// HSV with hue expressed in turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in `[0, 1)`, one unit is a full turn
    pub hue: f64,
    /// Saturation in `[0, 1]`
    pub saturation: f64,
    /// Value in `[0, 1]`
    pub value: f64,
}

impl Hsv {
    /// Build an HSV color, wrapping hue and clamping saturation/value.
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue: wrap_turn(hue),
            saturation: saturation.clamp(0.0, 1.0),
            value: value.clamp(0.0, 1.0),
        }
    }

    /// Rotate hue by `turns`, wrapping into `[0, 1)`.
    pub fn rotate(self, turns: f64) -> Self {
        Self::new(self.hue + turns, self.saturation, self.value)
    }
}

/// Wrap a hue expressed in turns into `[0, 1)`.
pub fn wrap_turn(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Build a unit color, clamping each channel into `[0, 1]`.
pub fn unit(red: f64, green: f64, blue: f64) -> Color01 {
    Srgb::new(clamp_channel(red), clamp_channel(green), clamp_channel(blue))
}

/// Clamp every channel of a unit color into `[0, 1]`.
pub fn clamp_unit(color: Color01) -> Color01 {
    unit(color.red, color.green, color.blue)
}

fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Convert a byte color to unit range.
pub fn to_unit(color: Color255) -> Color01 {
    color.into_format::<f64>()
}

/// Convert a unit color to bytes, clamping before rounding.
pub fn to_byte(color: Color01) -> Color255 {
    let c = clamp_unit(color);
    Srgb::new(
        (c.red * 255.0).round() as u8,
        (c.green * 255.0).round() as u8,
        (c.blue * 255.0).round() as u8,
    )
}

/// Convert sRGB to hex string (without # prefix).
pub fn to_hex(color: Color255) -> String {
    format!("{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Inverse sRGB transfer function for a single channel.
pub fn linearize(channel: f64) -> f64 {
    if channel <= LINEAR_THRESHOLD {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of a unit color.
///
/// # Example
///
/// ```
/// use chainhue::color::{relative_luminance, unit};
///
/// assert_eq!(relative_luminance(unit(0.0, 0.0, 0.0)), 0.0);
/// assert!((relative_luminance(unit(1.0, 1.0, 1.0)) - 1.0).abs() < 1e-12);
/// ```
pub fn relative_luminance(color: Color01) -> f64 {
    COEF_R * linearize(color.red) + COEF_G * linearize(color.green) + COEF_B * linearize(color.blue)
}

/// WCAG contrast ratio between two relative luminances.
///
/// Symmetric in its arguments and always `>= 1` for non-negative input.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + CONTRAST_OFFSET) / (darker + CONTRAST_OFFSET)
}

/// Contrast ratio between two unit colors.
pub fn contrast_between(a: Color01, b: Color01) -> f64 {
    contrast_ratio(relative_luminance(a), relative_luminance(b))
}

/// Squared Euclidean distance between two unit colors.
pub fn squared_distance(a: Color01, b: Color01) -> f64 {
    let dr = a.red - b.red;
    let dg = a.green - b.green;
    let db = a.blue - b.blue;
    dr * dr + dg * dg + db * db
}

/// Convert a unit color to turn-based HSV.
///
/// Grays (no chroma) report hue 0 and saturation 0.
pub fn rgb_to_hsv(color: Color01) -> Hsv {
    let hsv = PaletteHsv::<SrgbEncoding, f64>::from_color(clamp_unit(color));
    if hsv.saturation <= 0.0 {
        return Hsv::new(0.0, 0.0, hsv.value);
    }
    Hsv::new(
        hsv.hue.into_positive_degrees() / 360.0,
        hsv.saturation,
        hsv.value,
    )
}

/// Convert turn-based HSV back to a unit color.
pub fn hsv_to_rgb(hsv: Hsv) -> Color01 {
    let converted = Srgb::<f64>::from_color(PaletteHsv::<SrgbEncoding, f64>::new(
        wrap_turn(hsv.hue) * 360.0,
        hsv.saturation.clamp(0.0, 1.0),
        hsv.value.clamp(0.0, 1.0),
    ));
    clamp_unit(converted)
}

/// Logistic function, maps any real to `(0, 1)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Map an unconstrained 3-vector to a unit color through the logistic function.
pub fn sigmoid_color(params: &[f64]) -> Color01 {
    let channel = |i: usize| params.get(i).copied().map(sigmoid).unwrap_or(0.5);
    unit(channel(0), channel(1), channel(2))
}

/// Reason a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or whitespace
    Empty,
    /// Input did not split into exactly three tokens
    WrongArity(usize),
    /// A token was not a finite number
    NotNumeric(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty color input"),
            Self::WrongArity(n) => write!(f, "expected 3 channels, found {}", n),
            Self::NotNumeric(token) => write!(f, "channel '{}' is not a number", token),
        }
    }
}

impl std::error::Error for ParseError {}

/// Usage hint shown when color input is rejected.
pub const USAGE_HINT: &str = "expected three comma-separated values, e.g. \"34, 139, 230\"";

/// Parse `"r, g, b"` into a byte color.
///
/// Tokens are trimmed; each must be a finite number and is rounded and
/// clamped into `[0, 255]`.
///
/// # Example
///
/// ```
/// use chainhue::color::parse_triple;
///
/// let c = parse_triple("10, 20, 30").unwrap();
/// assert_eq!((c.red, c.green, c.blue), (10, 20, 30));
/// assert!(parse_triple("1,2").is_err());
/// ```
pub fn parse_triple(input: &str) -> Result<Color255, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if tokens.len() != 3 {
        return Err(ParseError::WrongArity(tokens.len()));
    }

    let mut channels = [0u8; 3];
    for (slot, token) in channels.iter_mut().zip(&tokens) {
        let value: f64 = token
            .parse()
            .map_err(|_| ParseError::NotNumeric(token.to_string()))?;
        if !value.is_finite() {
            return Err(ParseError::NotNumeric(token.to_string()));
        }
        *slot = value.round().clamp(0.0, 255.0) as u8;
    }

    Ok(Srgb::new(channels[0], channels[1], channels[2]))
}

/// Parse a triple, falling back to any CSS color (hex, rgb(), hsl(), named).
///
/// The fallback only applies to input that looks like CSS: a `#` prefix, a
/// functional `(`, or a leading letter. Bare numbers keep the triple error.
pub fn parse_color(input: &str) -> Result<Color255, ParseError> {
    parse_triple(input).or_else(|err| {
        let trimmed = input.trim();
        if !looks_like_css(trimmed) {
            return Err(err);
        }
        let css: CssColor = trimmed.parse().map_err(|_| err)?;
        let [r, g, b, _a] = css.to_rgba8();
        Ok(Srgb::new(r, g, b))
    })
}

fn looks_like_css(input: &str) -> bool {
    input.starts_with('#')
        || input.contains('(')
        || input.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}
