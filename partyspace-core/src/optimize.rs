//! Bounded Nelder-Mead search over a two-dimensional position.
//!
//! Every trial vertex is projected into the box before it is evaluated, so the
//! returned position is always within bounds. The outcome reports explicitly
//! whether the simplex converged, ran out of iterations, or hit a non-finite
//! objective value.
use serde::{Deserialize, Serialize};

use crate::constants::{
    NM_CHI, NM_PSI, NM_RHO, NM_SIGMA, OPTIMIZER_FATOL, OPTIMIZER_INITIAL_STEP,
    OPTIMIZER_MAX_ITERATIONS, OPTIMIZER_XATOL,
};
use crate::party::{Bounds, Position};

/// Tuning for the local optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Edge length of the initial simplex.
    #[serde(default = "OptimizerConfig::default_initial_step")]
    pub initial_step: f64,
    /// Convergence tolerance on vertex spread.
    #[serde(default = "OptimizerConfig::default_xatol")]
    pub xatol: f64,
    /// Convergence tolerance on objective spread.
    #[serde(default = "OptimizerConfig::default_fatol")]
    pub fatol: f64,
    #[serde(default = "OptimizerConfig::default_max_iterations")]
    pub max_iterations: usize,
}

impl OptimizerConfig {
    const fn default_initial_step() -> f64 {
        OPTIMIZER_INITIAL_STEP
    }

    const fn default_xatol() -> f64 {
        OPTIMIZER_XATOL
    }

    const fn default_fatol() -> f64 {
        OPTIMIZER_FATOL
    }

    const fn default_max_iterations() -> usize {
        OPTIMIZER_MAX_ITERATIONS
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            initial_step: Self::default_initial_step(),
            xatol: Self::default_xatol(),
            fatol: Self::default_fatol(),
            max_iterations: Self::default_max_iterations(),
        }
    }
}

/// How a local search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeStatus {
    /// Simplex collapsed within both tolerances.
    Converged,
    /// Iteration budget spent; the best vertex is still a finite candidate.
    IterationLimit,
    /// The best vertex or its objective value is not finite.
    NonFinite,
}

/// Result of a bounded local search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizeOutcome {
    pub position: Position,
    pub value: f64,
    pub status: OptimizeStatus,
    pub iterations: usize,
    pub evaluations: usize,
}

impl OptimizeOutcome {
    #[must_use]
    pub const fn converged(&self) -> bool {
        matches!(self.status, OptimizeStatus::Converged)
    }
}

#[derive(Debug, Clone, Copy)]
struct Vertex {
    at: Position,
    value: f64,
}

struct Search<F> {
    objective: F,
    bounds: Bounds,
    evaluations: usize,
}

impl<F: FnMut(Position) -> f64> Search<F> {
    fn eval(&mut self, at: Position) -> Vertex {
        let at = self.bounds.clamp(at);
        self.evaluations += 1;
        let value = (self.objective)(at);
        // NaN sorts last so a single bad vertex is discarded first.
        let value = if value.is_nan() { f64::INFINITY } else { value };
        Vertex { at, value }
    }
}

fn affine(from: Position, toward: Position, t: f64) -> Position {
    Position::new(
        t.mul_add(toward.econ - from.econ, from.econ),
        t.mul_add(toward.social - from.social, from.social),
    )
}

/// Minimize `objective` starting at `start`, constrained to `bounds`.
pub fn minimize_bounded<F>(
    objective: F,
    start: Position,
    bounds: Bounds,
    cfg: &OptimizerConfig,
) -> OptimizeOutcome
where
    F: FnMut(Position) -> f64,
{
    let mut search = Search {
        objective,
        bounds,
        evaluations: 0,
    };

    let origin = bounds.clamp(start);
    let step = cfg.initial_step;
    // Step away from the upper bound when the start sits on it.
    let offset = |coord: f64| if coord + step > bounds.upper { -step } else { step };
    let mut simplex = [
        search.eval(origin),
        search.eval(Position::new(origin.econ + offset(origin.econ), origin.social)),
        search.eval(Position::new(origin.econ, origin.social + offset(origin.social))),
    ];

    let mut iterations = 0;
    let mut status = OptimizeStatus::IterationLimit;
    while iterations < cfg.max_iterations {
        simplex.sort_by(|a, b| a.value.total_cmp(&b.value));
        if simplex_converged(&simplex, cfg) {
            status = OptimizeStatus::Converged;
            break;
        }
        iterations += 1;

        let [best, middle, worst] = simplex;
        let centroid = affine(best.at, middle.at, 0.5);

        let reflected = search.eval(affine(centroid, worst.at, -NM_RHO));
        if reflected.value < best.value {
            let expanded = search.eval(affine(centroid, worst.at, -NM_RHO * NM_CHI));
            simplex[2] = if expanded.value < reflected.value {
                expanded
            } else {
                reflected
            };
            continue;
        }
        if reflected.value < middle.value {
            simplex[2] = reflected;
            continue;
        }

        let contracted = if reflected.value < worst.value {
            search.eval(affine(centroid, worst.at, -NM_RHO * NM_PSI))
        } else {
            search.eval(affine(centroid, worst.at, NM_PSI))
        };
        if contracted.value < reflected.value.min(worst.value) {
            simplex[2] = contracted;
            continue;
        }

        simplex[1] = search.eval(affine(best.at, middle.at, NM_SIGMA));
        simplex[2] = search.eval(affine(best.at, worst.at, NM_SIGMA));
    }

    simplex.sort_by(|a, b| a.value.total_cmp(&b.value));
    if status == OptimizeStatus::IterationLimit && simplex_converged(&simplex, cfg) {
        status = OptimizeStatus::Converged;
    }
    let best = simplex[0];
    if !best.value.is_finite() || !best.at.is_finite() {
        status = OptimizeStatus::NonFinite;
    }
    OptimizeOutcome {
        position: best.at,
        value: best.value,
        status,
        iterations,
        evaluations: search.evaluations,
    }
}

fn simplex_converged(simplex: &[Vertex; 3], cfg: &OptimizerConfig) -> bool {
    let best = simplex[0];
    simplex[1..].iter().all(|v| {
        (v.at.econ - best.at.econ).abs() <= cfg.xatol
            && (v.at.social - best.at.social).abs() <= cfg.xatol
            && (v.value - best.value).abs() <= cfg.fatol
    })
}
