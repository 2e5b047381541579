//! Centralized defaults for the positioning simulation.
//!
//! Every value here can be overridden through `SimulationConfig`; these are the
//! numbers a run uses when a configuration file leaves a field out.

// Resampling ----------------------------------------------------------------
pub const DEFAULT_SEED: u64 = 1337;
pub const DEFAULT_REPLICATIONS: usize = 100;
pub const DEFAULT_SOCIAL_SHIFT: f64 = 0.5;

// Voter features ------------------------------------------------------------
pub const SENSITIVITY_FLOOR: f64 = 0.1;
pub const SALIENCE_THRESHOLD: f64 = 5.0;
pub const SALIENT_WEIGHT: f64 = 1.0;
pub const BASELINE_SALIENCE_WEIGHT: f64 = 0.0;

// Preference model ----------------------------------------------------------
pub const DEFAULT_GAMMA: f64 = 1.0;

// Penalties -----------------------------------------------------------------
pub const DEFAULT_ALPHA: f64 = 0.01;
pub const DEFAULT_BETA: f64 = 0.05;
pub const DEFAULT_THRESHOLD: f64 = 2.0;

// Equilibrium solver --------------------------------------------------------
pub const DEFAULT_TOLERANCE: f64 = 0.01;
pub const DEFAULT_MAX_ITER: usize = 50;
pub const POSITION_LOWER_BOUND: f64 = -10.0;
pub const POSITION_UPPER_BOUND: f64 = 10.0;

// Local optimizer -----------------------------------------------------------
pub const OPTIMIZER_INITIAL_STEP: f64 = 0.5;
pub const OPTIMIZER_XATOL: f64 = 1e-4;
pub const OPTIMIZER_FATOL: f64 = 1e-7;
pub const OPTIMIZER_MAX_ITERATIONS: usize = 200;

// Nelder-Mead coefficients (reflection, expansion, contraction, shrink).
pub(crate) const NM_RHO: f64 = 1.0;
pub(crate) const NM_CHI: f64 = 2.0;
pub(crate) const NM_PSI: f64 = 0.5;
pub(crate) const NM_SIGMA: f64 = 0.5;

// Synthetic panels ----------------------------------------------------------
pub const SYNTHETIC_VOTERS_PER_PARTY: usize = 200;
pub const SYNTHETIC_FLOATING_VOTERS: usize = 150;
pub const SYNTHETIC_SPREAD: f64 = 2.0;
pub(crate) const SYNTHETIC_FLOATING_SPREAD: f64 = 4.0;
pub(crate) const SYNTHETIC_ADHERENCE_SHAPE: f64 = 2.0;
pub(crate) const SYNTHETIC_WEIGHT_RANGE: (f64, f64) = (0.5, 1.5);
pub(crate) const SYNTHETIC_LIKELIHOOD_RANGE: (f64, f64) = (0.3, 1.0);
