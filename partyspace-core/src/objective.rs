//! Scalar objective minimized by one strategic party while its rival holds still.
use crate::model::PreferenceModel;
use crate::party::{PartyId, PartyPositions, Position};
use crate::penalty::PenaltyParams;

/// `-(vote share) + movement penalty + closeness penalty` for `party`.
#[derive(Debug, Clone, Copy)]
pub struct PartyObjective<'a> {
    model: &'a PreferenceModel,
    penalties: PenaltyParams,
    party: PartyId,
    rival: PartyId,
    baseline: Position,
    positions: PartyPositions,
}

impl<'a> PartyObjective<'a> {
    /// `positions` supplies every other party's current location, including
    /// the rival; the entry for `party` itself is replaced by each candidate.
    #[must_use]
    pub const fn new(
        model: &'a PreferenceModel,
        penalties: PenaltyParams,
        party: PartyId,
        rival: PartyId,
        baseline: Position,
        positions: PartyPositions,
    ) -> Self {
        Self {
            model,
            penalties,
            party,
            rival,
            baseline,
            positions,
        }
    }

    #[must_use]
    pub const fn party(&self) -> PartyId {
        self.party
    }

    #[must_use]
    pub fn evaluate(&self, candidate: Position) -> f64 {
        let positions = self.positions.with(self.party, candidate);
        let share = self.model.vote_share(self.party, &positions);
        -share
            + self.penalties.movement(candidate, self.baseline)
            + self
                .penalties
                .closeness(candidate, positions[self.rival])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureParams, Population};
    use crate::model::IssueOwnership;
    use crate::panel::Voter;
    use crate::party::{Affiliation, default_baselines};

    fn model() -> PreferenceModel {
        let voters = vec![
            Voter {
                econ_position: -2.0,
                social_position: -1.0,
                affiliation: Affiliation::Floating,
                adherence_strength: 0.0,
                combined_weight: 0.5,
            },
            Voter {
                econ_position: 2.0,
                social_position: 3.0,
                affiliation: Affiliation::Affiliated(PartyId::Cdu),
                adherence_strength: 0.5,
                combined_weight: 0.5,
            },
        ];
        PreferenceModel::new(
            Population::derive(voters, &FeatureParams::default()),
            IssueOwnership::default(),
        )
    }

    #[test]
    fn objective_at_baseline_is_negative_share_plus_closeness() {
        let model = model();
        let baselines = default_baselines();
        let penalties = PenaltyParams::default();
        let objective = PartyObjective::new(
            &model,
            penalties,
            PartyId::Spd,
            PartyId::Cdu,
            baselines[PartyId::Spd],
            baselines,
        );
        let at_base = objective.evaluate(baselines[PartyId::Spd]);
        let share = model.vote_share(PartyId::Spd, &baselines);
        let closeness = penalties.closeness(baselines[PartyId::Spd], baselines[PartyId::Cdu]);
        assert!((at_base - (-share + closeness)).abs() < 1e-12);
    }

    #[test]
    fn moving_costs_movement_penalty() {
        let model = model();
        let baselines = default_baselines();
        let penalties = PenaltyParams {
            alpha: 1.0,
            beta: 0.0,
            threshold: 0.0,
        };
        let objective = PartyObjective::new(
            &model,
            penalties,
            PartyId::Spd,
            PartyId::Cdu,
            baselines[PartyId::Spd],
            baselines,
        );
        let far = Position::new(9.0, 9.0);
        let moved = baselines.with(PartyId::Spd, far);
        let expected = -model.vote_share(PartyId::Spd, &moved)
            + far.squared_distance(baselines[PartyId::Spd]);
        assert!((objective.evaluate(far) - expected).abs() < 1e-12);
    }
}
