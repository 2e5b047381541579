//! Prepared simulation runs tying a resampled population to its solver.
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::features::Population;
use crate::model::PreferenceModel;
use crate::panel::{RawVoterRecord, VoterPanel};
use crate::report::{EquilibriumReport, PopulationExport};
use crate::resample::resample;
use crate::rng::SimulationRng;
use crate::solver::{EquilibriumOutcome, EquilibriumSolver};

/// A prepared run: validated configuration plus the resampled population and
/// its preference model, immutable once built.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    panel_size: usize,
    model: PreferenceModel,
}

impl Simulation {
    /// Validate, normalize, resample, and derive features from raw rows.
    ///
    /// # Errors
    ///
    /// Returns a configuration error, a schema error, or a weight error; all
    /// are raised before any resampling happens.
    pub fn prepare(
        records: &[RawVoterRecord],
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let panel = VoterPanel::from_records(records, config.social_shift)?;
        Self::from_panel(&panel, config)
    }

    /// Resample an already-normalized panel using the seeded resample stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the panel weights
    /// cannot back a weighted draw.
    pub fn from_panel(panel: &VoterPanel, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = SimulationRng::from_user_seed(config.seed).resample();
        let voters = resample(panel, config.replications, &mut rng)?;
        let population = Population::derive(voters, &config.features);
        log::info!(
            "prepared simulation: {} panel rows x {} replications = {} voters (seed {})",
            panel.len(),
            config.replications,
            population.len(),
            config.seed
        );
        Ok(Self::from_population(population, panel.len(), config))
    }

    /// Wrap a population that was built elsewhere, skipping resampling.
    #[must_use]
    pub fn from_population(
        population: Population,
        panel_size: usize,
        config: SimulationConfig,
    ) -> Self {
        let model = PreferenceModel::new(population, config.issue);
        Self {
            config,
            panel_size,
            model,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub const fn model(&self) -> &PreferenceModel {
        &self.model
    }

    #[must_use]
    pub const fn panel_size(&self) -> usize {
        self.panel_size
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.model.population().len()
    }

    #[must_use]
    pub const fn solver(&self) -> EquilibriumSolver<'_> {
        EquilibriumSolver::new(
            &self.model,
            self.config.penalties,
            self.config.baselines,
            self.config.solver,
        )
    }

    #[must_use]
    pub fn solve(&self) -> EquilibriumOutcome {
        self.solver().solve()
    }

    #[must_use]
    pub fn report(&self, outcome: &EquilibriumOutcome) -> EquilibriumReport {
        EquilibriumReport::from_outcome(self, outcome)
    }

    #[must_use]
    pub fn export_population(&self, outcome: &EquilibriumOutcome) -> PopulationExport {
        PopulationExport::from_outcome(self, outcome)
    }
}
