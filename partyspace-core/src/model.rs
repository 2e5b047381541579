//! Probabilistic-voting model: spatial utility, partisan adherence, and an
//! issue-ownership boost, turned into vote probabilities by a softmax.
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GAMMA;
use crate::features::Population;
use crate::numbers::{mean, usize_to_f64};
use crate::party::{PARTY_COUNT, PartyId, PartyPositions, VoteShares};

/// Which party gains from issue salience, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IssueOwnership {
    #[serde(default = "IssueOwnership::default_owner")]
    pub owner: PartyId,
    #[serde(default = "IssueOwnership::default_gamma")]
    pub gamma: f64,
}

impl IssueOwnership {
    const fn default_owner() -> PartyId {
        PartyId::Afd
    }

    const fn default_gamma() -> f64 {
        DEFAULT_GAMMA
    }
}

impl Default for IssueOwnership {
    fn default() -> Self {
        Self {
            owner: Self::default_owner(),
            gamma: Self::default_gamma(),
        }
    }
}

/// Numerically stable softmax: the row maximum is subtracted before
/// exponentiating.
#[must_use]
pub fn softmax(utilities: &[f64; PARTY_COUNT]) -> [f64; PARTY_COUNT] {
    let max = utilities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out = utilities.map(|u| (u - max).exp());
    let sum: f64 = out.iter().sum();
    for p in &mut out {
        *p /= sum;
    }
    out
}

/// Vote-probability model over a fixed, resampled population.
#[derive(Debug, Clone)]
pub struct PreferenceModel {
    population: Population,
    issue: IssueOwnership,
}

impl PreferenceModel {
    #[must_use]
    pub const fn new(population: Population, issue: IssueOwnership) -> Self {
        Self { population, issue }
    }

    #[must_use]
    pub const fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub const fn issue(&self) -> IssueOwnership {
        self.issue
    }

    /// `-sensitivity * distance + adherence`, plus `gamma * salience` for the
    /// issue owner.
    #[must_use]
    pub fn utilities(&self, voter: usize, positions: &PartyPositions) -> [f64; PARTY_COUNT] {
        let location = self.population.voters()[voter].position();
        let features = &self.population.features()[voter];
        let adherence = self.population.adherence().row(voter);
        let mut utilities = [0.0; PARTY_COUNT];
        for (party, position) in positions.iter() {
            let idx = party.index();
            utilities[idx] = (-features.sensitivity).mul_add(location.distance(*position), adherence[idx]);
        }
        utilities[self.issue.owner.index()] += self.issue.gamma * features.issue_salience;
        utilities
    }

    #[must_use]
    pub fn probabilities_for(&self, voter: usize, positions: &PartyPositions) -> [f64; PARTY_COUNT] {
        softmax(&self.utilities(voter, positions))
    }

    /// Probability row for every voter, in population order.
    #[must_use]
    pub fn probabilities(&self, positions: &PartyPositions) -> Vec<[f64; PARTY_COUNT]> {
        (0..self.population.len())
            .map(|voter| self.probabilities_for(voter, positions))
            .collect()
    }

    /// Expected vote share per party: the unweighted mean probability over the
    /// population.
    #[must_use]
    pub fn vote_shares(&self, positions: &PartyPositions) -> VoteShares {
        let mut totals = [0.0; PARTY_COUNT];
        for voter in 0..self.population.len() {
            let row = self.probabilities_for(voter, positions);
            for (total, p) in totals.iter_mut().zip(row) {
                *total += p;
            }
        }
        let count = usize_to_f64(self.population.len());
        if count > 0.0 {
            for total in &mut totals {
                *total /= count;
            }
        }
        VoteShares::new(totals)
    }

    /// Expected vote share of a single party.
    #[must_use]
    pub fn vote_share(&self, party: PartyId, positions: &PartyPositions) -> f64 {
        let probabilities: Vec<f64> = (0..self.population.len())
            .map(|voter| self.probabilities_for(voter, positions)[party.index()])
            .collect();
        mean(&probabilities)
    }
}
