//! Fixed-budget gradient descent over small parameter vectors.
//!
//! There is no convergence test: every run spends exactly its iteration
//! budget, decaying the learning rate on a fixed schedule and optionally
//! clamping parameters into a box after each step. Runs never fail.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Color01, sigmoid_color};
use crate::gradient::FiniteDifference;
use crate::hover::HoverPolicy;
use crate::loss::{policy_loss, text_loss};

/// Initial text parameters: sigmoid(0) is mid gray.
pub const TEXT_INITIAL_PARAMS: [f64; 3] = [0.0; 3];

/// A scalar function of a parameter vector.
pub trait Objective {
    /// Evaluate the loss at `params`.
    fn loss(&self, params: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn loss(&self, params: &[f64]) -> f64 {
        self(params)
    }
}

/// Multiply the learning rate by `factor` from iteration `at` onward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LrStep {
    /// Zero-based iteration index at which the factor takes effect
    pub at: usize,
    /// Multiplicative decay factor
    pub factor: f64,
}

/// Box constraint applied to every parameter after each update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Clamp every parameter into `[lower, upper]`.
    pub fn apply(&self, params: &mut [f64]) {
        for p in params.iter_mut() {
            *p = p.clamp(self.lower, self.upper);
        }
    }
}

/// Settings for a single descent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentSettings {
    /// Fixed iteration budget
    pub iterations: usize,
    /// Learning rate before any decay
    pub learning_rate: f64,
    /// Learning-rate decay schedule
    pub schedule: Vec<LrStep>,
    /// Optional per-parameter box constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Gradient estimator
    pub gradient: FiniteDifference,
}

impl Default for DescentSettings {
    fn default() -> Self {
        Self::text()
    }
}

impl DescentSettings {
    /// Defaults for the 3-parameter sigmoid text optimizer.
    pub fn text() -> Self {
        Self {
            iterations: 160,
            learning_rate: 0.25,
            schedule: vec![
                LrStep { at: 60, factor: 0.6 },
                LrStep {
                    at: 110,
                    factor: 0.7,
                },
            ],
            bounds: None,
            gradient: FiniteDifference::default(),
        }
    }

    /// Defaults for the 4-parameter hover policy optimizer.
    pub fn policy() -> Self {
        Self {
            iterations: 900,
            learning_rate: 4.0,
            schedule: vec![
                LrStep {
                    at: 450,
                    factor: 0.6,
                },
                LrStep {
                    at: 750,
                    factor: 0.7,
                },
            ],
            bounds: Some(Bounds {
                lower: 0.35,
                upper: 1.0,
            }),
            gradient: FiniteDifference::default(),
        }
    }

    /// Learning rate in effect at iteration `iter`.
    pub fn learning_rate_at(&self, iter: usize) -> f64 {
        self.schedule
            .iter()
            .filter(|step| iter >= step.at)
            .fold(self.learning_rate, |lr, step| lr * step.factor)
    }
}

/// Raw outcome of [`minimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Descent {
    /// Final parameter vector
    pub params: Vec<f64>,
    /// Loss at the initial parameters
    pub initial_loss: f64,
    /// Loss at the final parameters
    pub loss: f64,
    /// Iterations performed
    pub iterations: usize,
}

/// Minimize `objective` from `initial` by full-batch gradient descent.
///
/// # Example
///
/// ```
/// use chainhue::optimizer::{DescentSettings, minimize};
///
/// let bowl = |x: &[f64]| (x[0] - 3.0).powi(2);
/// let settings = DescentSettings {
///     learning_rate: 0.1,
///     ..DescentSettings::text()
/// };
/// let result = minimize(&bowl, &[0.0], &settings);
/// assert!((result.params[0] - 3.0).abs() < 1e-3);
/// ```
pub fn minimize<O: Objective + ?Sized>(
    objective: &O,
    initial: &[f64],
    settings: &DescentSettings,
) -> Descent {
    let start = Instant::now();
    let mut params = initial.to_vec();
    let initial_loss = objective.loss(&params);

    for iter in 0..settings.iterations {
        let lr = settings.learning_rate_at(iter);
        let grad = settings.gradient.gradient(objective, &params);
        for (p, g) in params.iter_mut().zip(&grad) {
            *p -= lr * g;
        }
        if let Some(bounds) = settings.bounds {
            bounds.apply(&mut params);
        }
    }

    let loss = objective.loss(&params);
    debug!(
        dims = params.len(),
        iterations = settings.iterations,
        initial_loss,
        loss,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Descent finished"
    );

    Descent {
        params,
        initial_loss,
        loss,
        iterations: settings.iterations,
    }
}

/// Outcome of an optimizer run, with parameters mapped to their domain value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult<T> {
    /// Final parameter vector
    pub params: Vec<f64>,
    /// Mapped value (a color or a policy)
    pub value: T,
    /// Final loss
    pub loss: f64,
    /// Loss at the initial parameters
    pub initial_loss: f64,
}

/// Text loss over sigmoid-mapped parameters against a fixed background.
#[derive(Debug, Clone, Copy)]
pub struct TextObjective {
    pub background: Color01,
    pub target_contrast: f64,
}

impl Objective for TextObjective {
    fn loss(&self, params: &[f64]) -> f64 {
        text_loss(self.background, sigmoid_color(params), self.target_contrast)
    }
}

/// Hover-policy loss over clamp-mapped parameters against a fixed base.
#[derive(Debug, Clone, Copy)]
pub struct PolicyObjective {
    pub base: Color01,
}

impl Objective for PolicyObjective {
    fn loss(&self, params: &[f64]) -> f64 {
        policy_loss(self.base, HoverPolicy::from_params(params))
    }
}

/// Optimize a text color for `background`, starting from `initial` parameters.
pub fn optimize_text(
    background: Color01,
    initial: &[f64],
    settings: &DescentSettings,
    target_contrast: f64,
) -> OptimizationResult<Color01> {
    let objective = TextObjective {
        background,
        target_contrast,
    };
    let descent = minimize(&objective, initial, settings);
    OptimizationResult {
        value: sigmoid_color(&descent.params),
        params: descent.params,
        loss: descent.loss,
        initial_loss: descent.initial_loss,
    }
}

/// Optimize a hover-derivation policy for `base`, starting from `initial`.
pub fn optimize_policy(
    base: Color01,
    initial: HoverPolicy,
    settings: &DescentSettings,
) -> OptimizationResult<HoverPolicy> {
    let objective = PolicyObjective { base };
    let descent = minimize(&objective, &initial.to_array(), settings);
    OptimizationResult {
        value: HoverPolicy::from_params(&descent.params),
        params: descent.params,
        loss: descent.loss,
        initial_loss: descent.initial_loss,
    }
}
