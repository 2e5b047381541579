//! Simulation configuration with per-field defaults and validation.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REPLICATIONS, DEFAULT_SEED, DEFAULT_SOCIAL_SHIFT};
use crate::error::ConfigError;
use crate::features::FeatureParams;
use crate::model::IssueOwnership;
use crate::party::{PartyPositions, default_baselines};
use crate::penalty::PenaltyParams;
use crate::solver::SolverConfig;

/// Complete configuration for one simulation run.
///
/// Every field has a default, so a partial JSON document only overrides the
/// values it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "SimulationConfig::default_replications")]
    pub replications: usize,
    /// Uniform drift added to every voter's social coordinate at load time.
    #[serde(default = "SimulationConfig::default_social_shift")]
    pub social_shift: f64,
    #[serde(default)]
    pub features: FeatureParams,
    #[serde(default)]
    pub issue: IssueOwnership,
    #[serde(default)]
    pub penalties: PenaltyParams,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default = "default_baselines")]
    pub baselines: PartyPositions,
}

impl SimulationConfig {
    const fn default_seed() -> u64 {
        DEFAULT_SEED
    }

    const fn default_replications() -> usize {
        DEFAULT_REPLICATIONS
    }

    const fn default_social_shift() -> f64 {
        DEFAULT_SOCIAL_SHIFT
    }

    /// Parse a (possibly partial) JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every invariant the simulation relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.replications == 0 {
            return Err(ConfigError::ZeroCount {
                field: "replications",
            });
        }
        if self.solver.max_iter == 0 {
            return Err(ConfigError::ZeroCount {
                field: "solver.max_iter",
            });
        }
        if self.solver.optimizer.max_iterations == 0 {
            return Err(ConfigError::ZeroCount {
                field: "solver.optimizer.max_iterations",
            });
        }

        for (field, value) in [
            ("solver.tolerance", self.solver.tolerance),
            ("features.sensitivity_floor", self.features.sensitivity_floor),
            ("solver.optimizer.initial_step", self.solver.optimizer.initial_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("penalties.alpha", self.penalties.alpha),
            ("penalties.beta", self.penalties.beta),
            ("penalties.threshold", self.penalties.threshold),
            ("issue.gamma", self.issue.gamma),
            ("solver.optimizer.xatol", self.solver.optimizer.xatol),
            ("solver.optimizer.fatol", self.solver.optimizer.fatol),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("social_shift", self.social_shift),
            ("features.salience_threshold", self.features.salience_threshold),
            ("features.salient_weight", self.features.salient_weight),
            ("features.baseline_weight", self.features.baseline_weight),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let [first, second] = self.solver.strategic;
        if first == second {
            return Err(ConfigError::SameStrategicParty { party: first });
        }

        let bounds = self.solver.bounds;
        if !bounds.lower.is_finite() || !bounds.upper.is_finite() || bounds.lower >= bounds.upper {
            return Err(ConfigError::InvertedBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }

        if let Some((party, _)) = self.baselines.iter().find(|(_, p)| !p.is_finite()) {
            return Err(ConfigError::NonFiniteBaseline { party });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            replications: Self::default_replications(),
            social_shift: Self::default_social_shift(),
            features: FeatureParams::default(),
            issue: IssueOwnership::default(),
            penalties: PenaltyParams::default(),
            solver: SolverConfig::default(),
            baselines: default_baselines(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::{PartyId, Position};

    #[test]
    fn defaults_validate() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SimulationConfig::from_json(
            r#"{"seed": 9, "penalties": {"alpha": 0.2}, "solver": {"max_iter": 7}}"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 9);
        assert!((cfg.penalties.alpha - 0.2).abs() < f64::EPSILON);
        assert!((cfg.penalties.beta - crate::constants::DEFAULT_BETA).abs() < f64::EPSILON);
        assert_eq!(cfg.solver.max_iter, 7);
        assert_eq!(cfg.replications, DEFAULT_REPLICATIONS);
        assert_eq!(cfg.baselines, default_baselines());
    }

    #[test]
    fn rejects_zero_replications() {
        let cfg = SimulationConfig {
            replications: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroCount {
                field: "replications"
            })
        );
    }

    #[test]
    fn rejects_identical_strategic_parties() {
        let mut cfg = SimulationConfig::default();
        cfg.solver.strategic = [PartyId::Cdu, PartyId::Cdu];
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::SameStrategicParty {
                party: PartyId::Cdu
            })
        );
    }

    #[test]
    fn rejects_bad_penalties_and_bounds() {
        let mut cfg = SimulationConfig::default();
        cfg.penalties.beta = -1.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Negative { .. })));

        let mut cfg = SimulationConfig::default();
        cfg.solver.bounds.lower = 10.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedBounds { .. })
        ));

        let mut cfg = SimulationConfig::default();
        cfg.solver.tolerance = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { .. })));
    }

    #[test]
    fn rejects_non_finite_baseline() {
        let mut cfg = SimulationConfig::default();
        cfg.baselines[PartyId::Fdp] = Position::new(f64::NAN, 0.0);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonFiniteBaseline {
                party: PartyId::Fdp
            })
        );
    }
}
