//! Summaries handed to display and visualization consumers.
use serde::{Deserialize, Serialize};

use crate::party::{Affiliation, PartyId, PartyPositions, Position, VoteShares};
use crate::simulation::Simulation;
use crate::solver::{EquilibriumOutcome, SolverStatus};

/// Vote share movement for one party.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartyShareRow {
    pub party: PartyId,
    pub initial: f64,
    #[serde(rename = "final")]
    pub final_share: f64,
    pub change: f64,
}

/// Where a strategic party ended up relative to its platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategicPartyReport {
    pub party: PartyId,
    pub baseline: Position,
    pub final_position: Position,
    pub displacement: f64,
}

/// Complete summary of one equilibrium run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumReport {
    pub seed: u64,
    pub replications: usize,
    pub panel_size: usize,
    pub population_size: usize,
    pub status: SolverStatus,
    pub iterations: usize,
    pub initial_shares: VoteShares,
    pub final_shares: VoteShares,
    pub share_changes: VoteShares,
    pub strategic: Vec<StrategicPartyReport>,
    /// Largest previous-iterate movement in the final iteration.
    pub last_step_distance: Option<f64>,
    pub warnings: usize,
}

impl EquilibriumReport {
    #[must_use]
    pub fn from_outcome(sim: &Simulation, outcome: &EquilibriumOutcome) -> Self {
        let model = sim.model();
        let config = sim.config();
        let initial_shares = model.vote_shares(&outcome.initial.positions);
        let final_shares = model.vote_shares(&outcome.terminal.positions);
        let share_changes = VoteShares::from_fn(|party| final_shares[party] - initial_shares[party]);
        let strategic = config
            .solver
            .strategic
            .iter()
            .map(|&party| {
                let baseline = config.baselines[party];
                let final_position = outcome.terminal.positions[party];
                StrategicPartyReport {
                    party,
                    baseline,
                    final_position,
                    displacement: final_position.distance(baseline),
                }
            })
            .collect();

        Self {
            seed: config.seed,
            replications: config.replications,
            panel_size: sim.panel_size(),
            population_size: sim.population_size(),
            status: outcome.status(),
            iterations: outcome.iterations(),
            initial_shares,
            final_shares,
            share_changes,
            strategic,
            last_step_distance: outcome.last_step_distance(),
            warnings: outcome.warnings(),
        }
    }

    /// One row per party in table order.
    #[must_use]
    pub fn rows(&self) -> Vec<PartyShareRow> {
        PartyId::ALL
            .into_iter()
            .map(|party| PartyShareRow {
                party,
                initial: self.initial_shares[party],
                final_share: self.final_shares[party],
                change: self.share_changes[party],
            })
            .collect()
    }
}

/// Resampled voter as exported for density/scatter rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportedVoter {
    pub econ: f64,
    pub social: f64,
    pub affiliation: Affiliation,
}

/// Resampled population plus baseline and final party positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationExport {
    pub voters: Vec<ExportedVoter>,
    pub baselines: PartyPositions,
    pub final_positions: PartyPositions,
}

impl PopulationExport {
    #[must_use]
    pub fn from_outcome(sim: &Simulation, outcome: &EquilibriumOutcome) -> Self {
        let voters = sim
            .model()
            .population()
            .voters()
            .iter()
            .map(|voter| ExportedVoter {
                econ: voter.econ_position,
                social: voter.social_position,
                affiliation: voter.affiliation,
            })
            .collect();
        Self {
            voters,
            baselines: sim.config().baselines,
            final_positions: outcome.terminal.positions,
        }
    }
}
