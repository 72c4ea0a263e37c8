//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{
    ConfigOverrides, ContrastOverrides, DescentOverrides, GradientOverrides, HoverMode,
    HoverOverrides, PageOverrides,
};
use crate::gradient::Differencing;

/// Hover strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Closed-form hover with a fixed policy
    Fixed,
    /// Search the hover policy per color
    Learned,
}

impl From<StrategyArg> for HoverMode {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Fixed => HoverMode::Fixed,
            StrategyArg::Learned => HoverMode::Learned,
        }
    }
}

/// Finite-difference rule selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifferencingArg {
    /// One-sided difference
    Forward,
    /// Two-sided difference
    Central,
}

impl From<DifferencingArg> for Differencing {
    fn from(arg: DifferencingArg) -> Self {
        match arg {
            DifferencingArg::Forward => Differencing::Forward,
            DifferencingArg::Central => Differencing::Central,
        }
    }
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    #[default]
    Text,
    /// CSS custom properties
    Css,
    /// JSON report
    Json,
    /// YAML report
    Yaml,
}

/// Button palette generator using finite-difference gradient descent.
#[derive(Parser, Debug)]
#[command(name = "chainhue")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base colors as "r, g, b" (0-255) or any CSS color. Several colors run in parallel.
    #[arg(value_name = "COLOR", required_unless_present_any = ["completions", "save_config"])]
    pub colors: Vec<String>,

    /// Hover derivation strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Minimum WCAG contrast ratio the text optimizer aims for (default 6.0)
    #[arg(long)]
    pub target_contrast: Option<f64>,

    /// Iteration budget for each text stage (default 160)
    #[arg(long, value_name = "N")]
    pub text_iterations: Option<usize>,

    /// Iteration budget for the learned hover policy (default 900)
    #[arg(long, value_name = "N")]
    pub policy_iterations: Option<usize>,

    /// Page background scale factor (default 0.10)
    #[arg(long)]
    pub page_darkening: Option<f64>,

    /// Finite-difference rule for every optimizer stage (default central)
    #[arg(long, value_enum)]
    pub differencing: Option<DifferencingArg>,

    /// Fail when a text/background pair misses the target contrast
    #[arg(long)]
    pub strict: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Log file path (logs go to stderr if not specified)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Convert flat CLI args to nested overrides for figment merging.
    ///
    /// Only flags that were given end up in the serialized overrides.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let gradient = || GradientOverrides {
            step: None,
            differencing: self.differencing.map(Into::into),
        };

        ConfigOverrides {
            hover: HoverOverrides {
                strategy: self.strategy.map(Into::into),
            },
            text: DescentOverrides {
                iterations: self.text_iterations,
                learning_rate: None,
                gradient: gradient(),
            },
            policy: DescentOverrides {
                iterations: self.policy_iterations,
                learning_rate: None,
                gradient: gradient(),
            },
            contrast: ContrastOverrides {
                target: self.target_contrast,
            },
            page: PageOverrides {
                darkening: self.page_darkening,
            },
        }
    }
}
