//! TOML configuration file support, layered with figment.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file, then
//! flags given on the command line.

use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::gradient::Differencing;
use crate::hover::{DEFAULT_FIXED_POLICY, FixedHover, HoverPolicy, HoverStrategy, LearnedHover};
use crate::loss::{DEFAULT_TARGET_CONTRAST, POLICY_PRIOR};
use crate::optimizer::{DescentSettings, TEXT_INITIAL_PARAMS};
use crate::pipeline::{ChainSettings, DEFAULT_PAGE_DARKENING};

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error writing file
    Io(std::io::Error),
    /// Layered extraction error (includes TOML parse errors)
    Extract(Box<figment::Error>),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// A setting is outside the range the chain can use
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Extract(e) => write!(f, "Config error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::Invalid(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Which hover strategy the chain uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    /// Closed-form derivation with a fixed policy
    #[default]
    Fixed,
    /// Policy searched by gradient descent per base color
    Learned,
}

/// Root configuration structure for TOML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Hover strategy selection and policies
    pub hover: HoverConfig,
    /// Text optimizer settings, shared by both text stages
    pub text: DescentSettings,
    /// Policy optimizer settings for the learned strategy
    pub policy: DescentSettings,
    /// Contrast settings
    pub contrast: ContrastConfig,
    /// Page background settings
    pub page: PageConfig,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hover: HoverConfig::default(),
            text: DescentSettings::text(),
            policy: DescentSettings::policy(),
            contrast: ContrastConfig::default(),
            page: PageConfig::default(),
        }
    }
}

/// Hover strategy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub strategy: HoverMode,
    /// Policy used by the fixed strategy
    pub fixed: HoverPolicy,
    /// Starting policy for the learned strategy
    pub initial: HoverPolicy,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            strategy: HoverMode::Fixed,
            fixed: DEFAULT_FIXED_POLICY,
            initial: POLICY_PRIOR,
        }
    }
}

/// Contrast settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Minimum WCAG contrast ratio for text
    pub target: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET_CONTRAST,
        }
    }
}

/// Page background settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Per-channel scale applied to the base color
    pub darkening: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            darkening: DEFAULT_PAGE_DARKENING,
        }
    }
}

/// Command-line overrides; only fields that were set are serialized so they
/// layer over file settings without clobbering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "HoverOverrides::is_empty")]
    pub hover: HoverOverrides,
    #[serde(skip_serializing_if = "DescentOverrides::is_empty")]
    pub text: DescentOverrides,
    #[serde(skip_serializing_if = "DescentOverrides::is_empty")]
    pub policy: DescentOverrides,
    #[serde(skip_serializing_if = "ContrastOverrides::is_empty")]
    pub contrast: ContrastOverrides,
    #[serde(skip_serializing_if = "PageOverrides::is_empty")]
    pub page: PageOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HoverOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<HoverMode>,
}

impl HoverOverrides {
    fn is_empty(&self) -> bool {
        self.strategy.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DescentOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(skip_serializing_if = "GradientOverrides::is_empty")]
    pub gradient: GradientOverrides,
}

impl DescentOverrides {
    fn is_empty(&self) -> bool {
        self.iterations.is_none() && self.learning_rate.is_none() && self.gradient.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GradientOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub differencing: Option<Differencing>,
}

impl GradientOverrides {
    fn is_empty(&self) -> bool {
        self.step.is_none() && self.differencing.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContrastOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

impl ContrastOverrides {
    fn is_empty(&self) -> bool {
        self.target.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub darkening: Option<f64>,
}

impl PageOverrides {
    fn is_empty(&self) -> bool {
        self.darkening.is_none()
    }
}

impl PaletteConfig {
    /// Build the layered figment: defaults, optional TOML file, overrides.
    pub fn figment(path: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(PaletteConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Serialized::defaults(overrides))
    }

    /// Resolve configuration from an optional file and CLI overrides.
    ///
    /// A named file that does not exist is an error rather than an empty layer.
    pub fn resolve(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            // Surface a NotFound error for missing files
            std::fs::metadata(path)?;
        }
        let config: Self = Self::figment(path, overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, filling gaps with defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::resolve(Some(path), &ConfigOverrides::default())
    }

    /// Parse configuration from a TOML string, filling gaps with defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(PaletteConfig::default()))
            .merge(Toml::string(content))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the chain cannot run with.
    ///
    /// Contrast target, page darkening, learning rates and gradient steps
    /// must be finite; the target and steps must also be positive and the
    /// darkening non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let target = self.contrast.target;
        if !target.is_finite() || target <= 0.0 {
            return invalid(format!("contrast.target must be a positive number, got {target}"));
        }
        let darkening = self.page.darkening;
        if !darkening.is_finite() || darkening < 0.0 {
            return invalid(format!(
                "page.darkening must be a non-negative number, got {darkening}"
            ));
        }
        for (table, settings) in [("text", &self.text), ("policy", &self.policy)] {
            if !settings.learning_rate.is_finite() {
                return invalid(format!(
                    "{table}.learning_rate must be finite, got {}",
                    settings.learning_rate
                ));
            }
            let step = settings.gradient.step;
            if !step.is_finite() || step <= 0.0 {
                return invalid(format!("{table}.gradient.step must be positive, got {step}"));
            }
        }
        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Settings for the chain itself.
    pub fn chain_settings(&self) -> ChainSettings {
        ChainSettings {
            text: self.text.clone(),
            text_initial: TEXT_INITIAL_PARAMS.to_vec(),
            target_contrast: self.contrast.target,
            page_darkening: self.page.darkening,
        }
    }

    /// Build the configured hover strategy.
    pub fn hover_strategy(&self) -> Box<dyn HoverStrategy + Send + Sync> {
        match self.hover.strategy {
            HoverMode::Fixed => Box::new(FixedHover {
                policy: self.hover.fixed,
            }),
            HoverMode::Learned => Box::new(LearnedHover {
                settings: self.policy.clone(),
                initial: self.hover.initial,
            }),
        }
    }
}
