//! Weighted bootstrap resampling of the voter panel.
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::error::PanelError;
use crate::panel::{Voter, VoterPanel};

/// Draw `replications` bootstrap samples of the panel and concatenate them.
///
/// Each replication draws `panel.len()` voters with replacement, using the
/// combined weight as the selection probability. The result is
/// replication-major and has exactly `replications * panel.len()` entries;
/// downstream aggregation treats every draw as equally weighted.
///
/// # Errors
///
/// Returns a weight error if the panel weights cannot back a weighted draw.
pub fn resample<R>(
    panel: &VoterPanel,
    replications: usize,
    rng: &mut R,
) -> Result<Vec<Voter>, PanelError>
where
    R: Rng + ?Sized,
{
    let voters = panel.voters();
    let index = WeightedIndex::new(voters.iter().map(|v| v.combined_weight)).map_err(|_| {
        PanelError::DegenerateWeightTotal {
            total: panel.total_weight(),
            rows: voters.len(),
        }
    })?;

    let size = voters.len().saturating_mul(replications);
    let mut population = Vec::with_capacity(size);
    for _ in 0..replications {
        for _ in 0..voters.len() {
            population.push(voters[index.sample(rng)]);
        }
    }
    log::debug!(
        "resampled {} voters x {replications} replications -> {}",
        voters.len(),
        population.len()
    );
    Ok(population)
}
