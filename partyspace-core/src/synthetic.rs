//! Synthetic survey panels for demos and tests.
use rand::Rng;
use rand_distr::{Beta, Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::constants::{
    SYNTHETIC_ADHERENCE_SHAPE, SYNTHETIC_FLOATING_SPREAD, SYNTHETIC_FLOATING_VOTERS,
    SYNTHETIC_LIKELIHOOD_RANGE, SYNTHETIC_SPREAD, SYNTHETIC_VOTERS_PER_PARTY,
    SYNTHETIC_WEIGHT_RANGE,
};
use crate::PanelSource;
use crate::panel::RawVoterRecord;
use crate::party::{PartyId, PartyPositions, Position};
use crate::rng::SimulationRng;

const FLOATING_LABEL: &str = "none";

/// Shape of a generated panel: partisans clustered around each party's
/// baseline plus a diffuse block of floating voters around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPanel {
    pub voters_per_party: usize,
    pub floating_voters: usize,
    /// Standard deviation of partisans around their party's baseline.
    pub spread: f64,
}

impl Default for SyntheticPanel {
    fn default() -> Self {
        Self {
            voters_per_party: SYNTHETIC_VOTERS_PER_PARTY,
            floating_voters: SYNTHETIC_FLOATING_VOTERS,
            spread: SYNTHETIC_SPREAD,
        }
    }
}

impl SyntheticPanel {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.voters_per_party * PartyId::ALL.len() + self.floating_voters
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generate raw survey rows, clamped to the nominal `[-10, 10]` range.
    pub fn generate<R>(&self, baselines: &PartyPositions, rng: &mut R) -> Vec<RawVoterRecord>
    where
        R: Rng + ?Sized,
    {
        let partisan_noise = normal(self.spread);
        let floating_noise = normal(SYNTHETIC_FLOATING_SPREAD);
        let adherence = Beta::new(SYNTHETIC_ADHERENCE_SHAPE, SYNTHETIC_ADHERENCE_SHAPE).ok();

        let mut records = Vec::with_capacity(self.len());
        for party in PartyId::ALL {
            let center = baselines[party];
            for _ in 0..self.voters_per_party {
                let strength = adherence.as_ref().map_or(0.5, |beta| beta.sample(rng));
                records.push(record(
                    party.key(),
                    jitter(center, partisan_noise.as_ref(), rng),
                    strength,
                    rng,
                ));
            }
        }
        for _ in 0..self.floating_voters {
            let location = jitter(Position::default(), floating_noise.as_ref(), rng);
            records.push(record(FLOATING_LABEL, location, 0.0, rng));
        }
        records
    }
}

/// Panel source drawing a synthetic panel from the seed's synthetic stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeededSynthetic {
    pub shape: SyntheticPanel,
    pub baselines: PartyPositions,
    pub seed: u64,
}

impl PanelSource for SeededSynthetic {
    type Error = std::convert::Infallible;

    fn load_records(&self) -> Result<Vec<RawVoterRecord>, Self::Error> {
        let mut rng = SimulationRng::from_user_seed(self.seed).synthetic();
        Ok(self.shape.generate(&self.baselines, &mut rng))
    }
}

fn normal(std_dev: f64) -> Option<Normal<f64>> {
    Normal::new(0.0, std_dev).ok()
}

fn jitter<R>(center: Position, noise: Option<&Normal<f64>>, rng: &mut R) -> Position
where
    R: Rng + ?Sized,
{
    let Some(noise) = noise else {
        return center;
    };
    Position::new(
        (center.econ + noise.sample(rng)).clamp(-10.0, 10.0),
        (center.social + noise.sample(rng)).clamp(-10.0, 10.0),
    )
}

fn record<R>(label: &str, location: Position, adherence: f64, rng: &mut R) -> RawVoterRecord
where
    R: Rng + ?Sized,
{
    let (w_lo, w_hi) = SYNTHETIC_WEIGHT_RANGE;
    let (l_lo, l_hi) = SYNTHETIC_LIKELIHOOD_RANGE;
    RawVoterRecord {
        party: label.to_string(),
        true_weight: rng.gen_range(w_lo..w_hi),
        vote_likelihood: rng.gen_range(l_lo..=l_hi),
        econ_position: location.econ,
        social_position: location.social,
        adherence_strength: adherence.clamp(0.0, 1.0),
    }
}
