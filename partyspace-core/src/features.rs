//! Per-voter modeling parameters derived once after resampling.
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASELINE_SALIENCE_WEIGHT, SALIENCE_THRESHOLD, SALIENT_WEIGHT, SENSITIVITY_FLOOR,
};
use crate::panel::Voter;
use crate::party::{PARTY_COUNT, PartyId};

/// Parameters controlling feature derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    #[serde(default = "FeatureParams::default_sensitivity_floor")]
    pub sensitivity_floor: f64,
    #[serde(default = "FeatureParams::default_salience_threshold")]
    pub salience_threshold: f64,
    #[serde(default = "FeatureParams::default_salient_weight")]
    pub salient_weight: f64,
    #[serde(default = "FeatureParams::default_baseline_weight")]
    pub baseline_weight: f64,
}

impl FeatureParams {
    const fn default_sensitivity_floor() -> f64 {
        SENSITIVITY_FLOOR
    }

    const fn default_salience_threshold() -> f64 {
        SALIENCE_THRESHOLD
    }

    const fn default_salient_weight() -> f64 {
        SALIENT_WEIGHT
    }

    const fn default_baseline_weight() -> f64 {
        BASELINE_SALIENCE_WEIGHT
    }

    /// `max(floor, 1 - adherence)`.
    #[must_use]
    pub fn sensitivity(&self, adherence_strength: f64) -> f64 {
        self.sensitivity_floor.max(1.0 - adherence_strength)
    }

    /// Two-valued step on the social axis, elevated strictly above the threshold.
    #[must_use]
    pub fn issue_salience(&self, social_position: f64) -> f64 {
        if social_position > self.salience_threshold {
            self.salient_weight
        } else {
            self.baseline_weight
        }
    }
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            sensitivity_floor: Self::default_sensitivity_floor(),
            salience_threshold: Self::default_salience_threshold(),
            salient_weight: Self::default_salient_weight(),
            baseline_weight: Self::default_baseline_weight(),
        }
    }
}

/// Derived modeling parameters for one voter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoterFeatures {
    pub sensitivity: f64,
    pub is_floating: bool,
    pub issue_salience: f64,
}

impl VoterFeatures {
    #[must_use]
    pub fn derive(voter: &Voter, params: &FeatureParams) -> Self {
        Self {
            sensitivity: params.sensitivity(voter.adherence_strength),
            is_floating: voter.affiliation.is_floating(),
            issue_salience: params.issue_salience(voter.social_position),
        }
    }
}

/// Voter x party loyalty bonus, fixed after construction.
///
/// Entry is the voter's adherence strength for the affiliated party and zero
/// elsewhere; floating voters have an all-zero row.
#[derive(Debug, Clone, PartialEq)]
pub struct AdherenceMatrix {
    rows: Vec<[f64; PARTY_COUNT]>,
}

impl AdherenceMatrix {
    #[must_use]
    pub fn build(voters: &[Voter]) -> Self {
        let rows = voters
            .iter()
            .map(|voter| {
                let mut row = [0.0; PARTY_COUNT];
                if let Some(party) = voter.affiliation.party() {
                    row[party.index()] = voter.adherence_strength;
                }
                row
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn row(&self, voter: usize) -> &[f64; PARTY_COUNT] {
        &self.rows[voter]
    }

    #[must_use]
    pub fn get(&self, voter: usize, party: PartyId) -> f64 {
        self.rows[voter][party.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resampled voters with their derived features and adherence matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    voters: Vec<Voter>,
    features: Vec<VoterFeatures>,
    adherence: AdherenceMatrix,
}

impl Population {
    #[must_use]
    pub fn derive(voters: Vec<Voter>, params: &FeatureParams) -> Self {
        let features = voters
            .iter()
            .map(|voter| VoterFeatures::derive(voter, params))
            .collect();
        let adherence = AdherenceMatrix::build(&voters);
        Self {
            voters,
            features,
            adherence,
        }
    }

    #[must_use]
    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    #[must_use]
    pub fn features(&self) -> &[VoterFeatures] {
        &self.features
    }

    #[must_use]
    pub const fn adherence(&self) -> &AdherenceMatrix {
        &self.adherence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }
}
