//! Finite-difference gradient estimation.

use serde::{Deserialize, Serialize};

use crate::optimizer::Objective;

/// Default perturbation size along each axis.
pub const DEFAULT_STEP: f64 = 1e-3;

/// Differencing rule used to approximate each partial derivative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Differencing {
    /// `(f(x + h) - f(x)) / h`, one extra evaluation per axis
    Forward,
    /// `(f(x + h) - f(x - h)) / 2h`, two evaluations per axis
    #[default]
    Central,
}

/// Finite-difference gradient estimator with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiniteDifference {
    /// Perturbation size
    pub step: f64,
    /// Differencing rule
    pub differencing: Differencing,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            differencing: Differencing::Central,
        }
    }
}

impl FiniteDifference {
    /// Estimate the gradient of `objective` at `params`.
    ///
    /// # Example
    ///
    /// ```
    /// use chainhue::gradient::FiniteDifference;
    ///
    /// let f = |x: &[f64]| x[0] * x[0] + 3.0 * x[1];
    /// let grad = FiniteDifference::default().gradient(&f, &[2.0, 0.0]);
    /// assert!((grad[0] - 4.0).abs() < 1e-6);
    /// assert!((grad[1] - 3.0).abs() < 1e-6);
    /// ```
    pub fn gradient<O: Objective + ?Sized>(&self, objective: &O, params: &[f64]) -> Vec<f64> {
        let h = self.step;
        let mut probe = params.to_vec();

        match self.differencing {
            Differencing::Forward => {
                let base = objective.loss(params);
                (0..params.len())
                    .map(|i| {
                        probe[i] = params[i] + h;
                        let ahead = objective.loss(&probe);
                        probe[i] = params[i];
                        (ahead - base) / h
                    })
                    .collect()
            }
            Differencing::Central => (0..params.len())
                .map(|i| {
                    probe[i] = params[i] + h;
                    let ahead = objective.loss(&probe);
                    probe[i] = params[i] - h;
                    let behind = objective.loss(&probe);
                    probe[i] = params[i];
                    (ahead - behind) / (2.0 * h)
                })
                .collect(),
        }
    }
}
