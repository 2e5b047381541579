//! Alternating best-response search for a two-party positioning equilibrium.
//!
//! Each iteration optimizes the first strategic party with the second held
//! fixed, then the second against the first's updated position. The state is
//! an immutable value returned from every step rather than mutated in place.
//!
//! Termination follows the reference behavior: the run is `Converged` only
//! when both parties end an iteration within `tolerance` of their *baseline*
//! positions. The distance from the previous iterate is recorded per
//! iteration as a diagnostic but does not stop the loop.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
use crate::model::PreferenceModel;
use crate::objective::PartyObjective;
use crate::optimize::{OptimizeOutcome, OptimizeStatus, OptimizerConfig, minimize_bounded};
use crate::party::{Bounds, PartyId, PartyPositions, Position};
use crate::penalty::PenaltyParams;

/// Solver tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Strategic parties in optimization order.
    #[serde(default = "SolverConfig::default_strategic")]
    pub strategic: [PartyId; 2],
    #[serde(default = "SolverConfig::default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "SolverConfig::default_max_iter")]
    pub max_iter: usize,
    #[serde(default)]
    pub bounds: Bounds,
    /// Adopt candidates from searches that hit their iteration limit.
    #[serde(default = "SolverConfig::default_accept_unconverged_steps")]
    pub accept_unconverged_steps: bool,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl SolverConfig {
    const fn default_strategic() -> [PartyId; 2] {
        [PartyId::Spd, PartyId::Cdu]
    }

    const fn default_tolerance() -> f64 {
        DEFAULT_TOLERANCE
    }

    const fn default_max_iter() -> usize {
        DEFAULT_MAX_ITER
    }

    const fn default_accept_unconverged_steps() -> bool {
        true
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategic: Self::default_strategic(),
            tolerance: Self::default_tolerance(),
            max_iter: Self::default_max_iter(),
            bounds: Bounds::default(),
            accept_unconverged_steps: Self::default_accept_unconverged_steps(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Lifecycle of an equilibrium search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    Running,
    Converged,
    /// Iteration budget spent without meeting the convergence test.
    Exhausted,
}

impl SolverStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Converged => write!(f, "converged"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Snapshot of all party positions after a number of iterations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumState {
    pub positions: PartyPositions,
    pub iteration: usize,
    pub status: SolverStatus,
}

impl EquilibriumState {
    /// Every party at its baseline, nothing iterated yet.
    #[must_use]
    pub const fn initial(baselines: PartyPositions) -> Self {
        Self {
            positions: baselines,
            iteration: 0,
            status: SolverStatus::Running,
        }
    }
}

/// Why a best-response step needed attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepWarning {
    /// The search hit its iteration limit; the candidate was adopted anyway.
    UnconvergedAdopted,
    /// The search hit its iteration limit; the previous position was kept.
    UnconvergedRejected,
    /// The search produced a non-finite or out-of-bounds candidate; the
    /// previous position was kept.
    OptimizationFailure,
}

/// One party's best-response search within an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub party: PartyId,
    pub previous: Position,
    pub adopted: Position,
    pub objective: f64,
    pub search: OptimizeOutcome,
    pub warning: Option<StepWarning>,
}

impl StepRecord {
    /// Distance moved relative to the position held before this step.
    #[must_use]
    pub fn step_distance(&self) -> f64 {
        self.adopted.distance(self.previous)
    }
}

/// Diagnostics for one full iteration (both parties).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub steps: [StepRecord; 2],
    /// Distance of each strategic party from its baseline after the iteration.
    pub baseline_distance: [f64; 2],
    pub status: SolverStatus,
}

impl IterationRecord {
    /// Largest previous-iterate movement among the strategic parties.
    #[must_use]
    pub fn max_step_distance(&self) -> f64 {
        self.steps
            .iter()
            .map(StepRecord::step_distance)
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn warnings(&self) -> usize {
        self.steps.iter().filter(|s| s.warning.is_some()).count()
    }
}

/// Terminal result of an equilibrium search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumOutcome {
    pub initial: EquilibriumState,
    pub terminal: EquilibriumState,
    pub history: Vec<IterationRecord>,
}

impl EquilibriumOutcome {
    #[must_use]
    pub const fn status(&self) -> SolverStatus {
        self.terminal.status
    }

    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.terminal.iteration
    }

    #[must_use]
    pub fn warnings(&self) -> usize {
        self.history.iter().map(IterationRecord::warnings).sum()
    }

    /// Previous-iterate movement in the final iteration, if any ran.
    #[must_use]
    pub fn last_step_distance(&self) -> Option<f64> {
        self.history.last().map(IterationRecord::max_step_distance)
    }
}

/// Alternating best-response solver over a fixed preference model.
#[derive(Debug, Clone, Copy)]
pub struct EquilibriumSolver<'a> {
    model: &'a PreferenceModel,
    penalties: PenaltyParams,
    baselines: PartyPositions,
    cfg: SolverConfig,
}

impl<'a> EquilibriumSolver<'a> {
    #[must_use]
    pub const fn new(
        model: &'a PreferenceModel,
        penalties: PenaltyParams,
        baselines: PartyPositions,
        cfg: SolverConfig,
    ) -> Self {
        Self {
            model,
            penalties,
            baselines,
            cfg,
        }
    }

    #[must_use]
    pub const fn initial_state(&self) -> EquilibriumState {
        EquilibriumState::initial(self.baselines)
    }

    /// Best response of `party` against the rest of `positions`, with the
    /// fallback policy applied.
    #[must_use]
    pub fn best_response(
        &self,
        party: PartyId,
        rival: PartyId,
        positions: &PartyPositions,
    ) -> StepRecord {
        let objective = PartyObjective::new(
            self.model,
            self.penalties,
            party,
            rival,
            self.baselines[party],
            *positions,
        );
        let previous = positions[party];
        let search = minimize_bounded(
            |candidate| objective.evaluate(candidate),
            previous,
            self.cfg.bounds,
            &self.cfg.optimizer,
        );

        let usable = search.value.is_finite()
            && search.position.is_finite()
            && self.cfg.bounds.contains(search.position);
        let warning = match search.status {
            _ if !usable => Some(StepWarning::OptimizationFailure),
            OptimizeStatus::NonFinite => Some(StepWarning::OptimizationFailure),
            OptimizeStatus::IterationLimit if self.cfg.accept_unconverged_steps => {
                Some(StepWarning::UnconvergedAdopted)
            }
            OptimizeStatus::IterationLimit => Some(StepWarning::UnconvergedRejected),
            OptimizeStatus::Converged => None,
        };

        let (adopted, value) = match warning {
            Some(StepWarning::OptimizationFailure | StepWarning::UnconvergedRejected) => {
                log::warn!(
                    "best response for {party} failed ({:?} after {} iterations); keeping {previous}",
                    search.status,
                    search.iterations
                );
                (previous, objective.evaluate(previous))
            }
            Some(StepWarning::UnconvergedAdopted) => {
                log::warn!(
                    "best response for {party} did not converge in {} iterations; adopting {}",
                    search.iterations,
                    search.position
                );
                (search.position, search.value)
            }
            None => (search.position, search.value),
        };

        StepRecord {
            party,
            previous,
            adopted,
            objective: value,
            search,
            warning,
        }
    }

    /// Advance one iteration, returning the next state and its diagnostics.
    #[must_use]
    pub fn step(&self, state: &EquilibriumState) -> (EquilibriumState, IterationRecord) {
        let [first, second] = self.cfg.strategic;

        let first_step = self.best_response(first, second, &state.positions);
        let positions = state.positions.with(first, first_step.adopted);
        let second_step = self.best_response(second, first, &positions);
        let positions = positions.with(second, second_step.adopted);

        let baseline_distance = [
            positions[first].distance(self.baselines[first]),
            positions[second].distance(self.baselines[second]),
        ];
        let iteration = state.iteration + 1;
        let status = if baseline_distance.iter().all(|d| *d < self.cfg.tolerance) {
            SolverStatus::Converged
        } else if iteration >= self.cfg.max_iter {
            SolverStatus::Exhausted
        } else {
            SolverStatus::Running
        };

        let record = IterationRecord {
            iteration,
            steps: [first_step, second_step],
            baseline_distance,
            status,
        };
        log::debug!(
            "iteration {iteration}: {first} -> {}, {second} -> {}, step {:.5}",
            positions[first],
            positions[second],
            record.max_step_distance()
        );

        let next = EquilibriumState {
            positions,
            iteration,
            status,
        };
        (next, record)
    }

    /// Iterate until the convergence test passes or the budget is spent.
    #[must_use]
    pub fn solve(&self) -> EquilibriumOutcome {
        let initial = self.initial_state();
        let mut state = initial;
        let mut history = Vec::with_capacity(self.cfg.max_iter);

        if self.cfg.max_iter == 0 {
            state.status = SolverStatus::Exhausted;
        }
        while !state.status.is_terminal() {
            let (next, record) = self.step(&state);
            history.push(record);
            state = next;
        }

        log::info!(
            "equilibrium search {} after {} iterations",
            state.status,
            state.iteration
        );
        EquilibriumOutcome {
            initial,
            terminal: state,
            history,
        }
    }
}
