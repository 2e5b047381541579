//! Error types raised before a simulation starts iterating.
//!
//! Schema and weight problems abort a run immediately; optimizer trouble inside
//! the solver loop is absorbed there and never surfaces as an error.
use thiserror::Error;

use crate::party::PartyId;

/// Broad classification of panel failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelErrorKind {
    /// Required columns missing, mistyped, or out of range.
    DataSchema,
    /// Combined resampling weights cannot be normalized.
    DegenerateWeight,
}

/// Errors raised while validating and normalizing a voter panel.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("voter panel could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("row {row}: unrecognized party label `{label}`")]
    UnknownParty { row: usize, label: String },
    #[error("row {row}: adherence strength must be within [0, 1] (got {value})")]
    AdherenceOutOfRange { row: usize, value: f64 },
    #[error("row {row}: {field} must be finite (got {value})")]
    NonFiniteCoordinate {
        row: usize,
        field: &'static str,
        value: f64,
    },
    #[error("row {row}: {field} must be a non-negative number (got {value})")]
    InvalidWeight {
        row: usize,
        field: &'static str,
        value: f64,
    },
    #[error("combined weights sum to {total} across {rows} rows; normalization is undefined")]
    DegenerateWeightTotal { total: f64, rows: usize },
}

impl PanelError {
    #[must_use]
    pub const fn kind(&self) -> PanelErrorKind {
        match self {
            Self::Parse(_)
            | Self::UnknownParty { .. }
            | Self::AdherenceOutOfRange { .. }
            | Self::NonFiniteCoordinate { .. } => PanelErrorKind::DataSchema,
            Self::InvalidWeight { .. } | Self::DegenerateWeightTotal { .. } => {
                PanelErrorKind::DegenerateWeight
            }
        }
    }
}

/// Errors raised when simulation configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("{field} must be positive and finite (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be non-negative and finite (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("strategic parties must differ (both are `{party}`)")]
    SameStrategicParty { party: PartyId },
    #[error("position bounds invalid (lower {lower} >= upper {upper})")]
    InvertedBounds { lower: f64, upper: f64 },
    #[error("baseline for `{party}` must be finite")]
    NonFiniteBaseline { party: PartyId },
}

/// Any failure that prevents a simulation from being prepared.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Panel(#[from] PanelError),
}

/// Failure while loading a panel through a source and preparing a run.
#[derive(Debug, Error)]
pub enum EngineError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("panel source failed: {0}")]
    Source(#[source] E),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_schema_and_weight_errors() {
        let schema = PanelError::UnknownParty {
            row: 3,
            label: "pirates".to_string(),
        };
        assert_eq!(schema.kind(), PanelErrorKind::DataSchema);
        assert!(schema.to_string().contains("row 3"));

        let weight = PanelError::DegenerateWeightTotal {
            total: 0.0,
            rows: 2,
        };
        assert_eq!(weight.kind(), PanelErrorKind::DegenerateWeight);
    }

    #[test]
    fn simulation_error_wraps_config() {
        let err: SimulationError = ConfigError::ZeroCount {
            field: "replications",
        }
        .into();
        assert!(err.to_string().contains("replications"));
    }
}
