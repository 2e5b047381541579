//! Penalty terms shaping each strategic party's incentives.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_THRESHOLD};
use crate::party::Position;

/// Weights for the movement cost and the closeness repulsion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyParams {
    #[serde(default = "PenaltyParams::default_alpha")]
    pub alpha: f64,
    #[serde(default = "PenaltyParams::default_beta")]
    pub beta: f64,
    #[serde(default = "PenaltyParams::default_threshold")]
    pub threshold: f64,
}

impl PenaltyParams {
    const fn default_alpha() -> f64 {
        DEFAULT_ALPHA
    }

    const fn default_beta() -> f64 {
        DEFAULT_BETA
    }

    const fn default_threshold() -> f64 {
        DEFAULT_THRESHOLD
    }

    /// `alpha * ||current - baseline||^2`.
    #[must_use]
    pub fn movement(&self, current: Position, baseline: Position) -> f64 {
        self.alpha * current.squared_distance(baseline)
    }

    /// `beta * exp(-(d - threshold)^2)` while the parties are closer than the
    /// threshold, zero otherwise.
    ///
    /// The bump is centred on the threshold, so it peaks at `beta` as the
    /// distance approaches the threshold from below and decays toward
    /// `beta * exp(-threshold^2)` at zero distance.
    #[must_use]
    pub fn closeness(&self, own: Position, rival: Position) -> f64 {
        let distance = own.distance(rival);
        if distance < self.threshold {
            let gap = distance - self.threshold;
            self.beta * (-(gap * gap)).exp()
        } else {
            0.0
        }
    }
}

impl Default for PenaltyParams {
    fn default() -> Self {
        Self {
            alpha: Self::default_alpha(),
            beta: Self::default_beta(),
            threshold: Self::default_threshold(),
        }
    }
}
