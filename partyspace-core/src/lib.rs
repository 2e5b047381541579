//! Partyspace Simulation Engine
//!
//! Probabilistic-voting simulation over a two-dimensional (economic, social)
//! issue space, and an alternating best-response search for where two
//! strategic parties would settle when every other party holds still.
//! This crate performs no file or terminal I/O; loaders and front-ends supply
//! raw survey rows and consume the reports.

pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod model;
pub mod numbers;
pub mod objective;
pub mod optimize;
pub mod panel;
pub mod party;
pub mod penalty;
pub mod report;
pub mod resample;
pub mod rng;
pub mod simulation;
pub mod solver;
pub mod synthetic;

// Re-export commonly used types
pub use config::SimulationConfig;
pub use error::{ConfigError, EngineError, PanelError, PanelErrorKind, SimulationError};
pub use features::{AdherenceMatrix, FeatureParams, Population, VoterFeatures};
pub use model::{IssueOwnership, PreferenceModel, softmax};
pub use objective::PartyObjective;
pub use optimize::{OptimizeOutcome, OptimizeStatus, OptimizerConfig, minimize_bounded};
pub use panel::{RawVoterRecord, Voter, VoterPanel};
pub use party::{
    Affiliation, Bounds, PARTY_COUNT, PartyId, PartyPositions, PartyTable, Position, VoteShares,
    default_baselines,
};
pub use penalty::PenaltyParams;
pub use report::{
    EquilibriumReport, ExportedVoter, PartyShareRow, PopulationExport, StrategicPartyReport,
};
pub use resample::resample;
pub use rng::SimulationRng;
pub use simulation::Simulation;
pub use solver::{
    EquilibriumOutcome, EquilibriumSolver, EquilibriumState, IterationRecord, SolverConfig,
    SolverStatus, StepRecord, StepWarning,
};
pub use synthetic::{SeededSynthetic, SyntheticPanel};

/// Trait for abstracting survey loading.
/// Platform-specific implementations should provide this
pub trait PanelSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load raw voter rows from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be read or decoded.
    fn load_records(&self) -> Result<Vec<RawVoterRecord>, Self::Error>;
}

/// Entry point binding a panel source to simulation runs.
pub struct EquilibriumEngine<S>
where
    S: PanelSource,
{
    source: S,
}

impl<S> EquilibriumEngine<S>
where
    S: PanelSource,
{
    /// Create a new engine reading from the provided source
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Load the panel and prepare a simulation for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or the rows or configuration are
    /// rejected.
    pub fn prepare(&self, config: SimulationConfig) -> Result<Simulation, EngineError<S::Error>> {
        let records = self.source.load_records().map_err(EngineError::Source)?;
        Ok(Simulation::prepare(&records, config)?)
    }

    /// Prepare, solve, and summarize in one call.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`EquilibriumEngine::prepare`].
    pub fn run(
        &self,
        config: SimulationConfig,
    ) -> Result<(Simulation, EquilibriumOutcome, EquilibriumReport), EngineError<S::Error>> {
        let simulation = self.prepare(config)?;
        let outcome = simulation.solve();
        let report = simulation.report(&outcome);
        Ok((simulation, outcome, report))
    }
}
