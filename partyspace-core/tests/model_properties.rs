use partyspace_core::{
    Affiliation, FeatureParams, IssueOwnership, PartyId, Population, PreferenceModel,
    SimulationConfig, SimulationRng, SyntheticPanel, VoterPanel, default_baselines, resample,
};

const REPLICATIONS: usize = 4;

fn synthetic_panel(seed: u64) -> VoterPanel {
    let shape = SyntheticPanel {
        voters_per_party: 6,
        floating_voters: 8,
        spread: 2.0,
    };
    let mut rng = SimulationRng::from_user_seed(seed).synthetic();
    let records = shape.generate(&default_baselines(), &mut rng);
    VoterPanel::from_records(&records, 0.5).expect("synthetic rows validate")
}

fn model_for(panel: &VoterPanel) -> PreferenceModel {
    let mut rng = SimulationRng::from_user_seed(9).resample();
    let voters = resample(panel, REPLICATIONS, &mut rng).expect("weights are valid");
    PreferenceModel::new(
        Population::derive(voters, &FeatureParams::default()),
        IssueOwnership::default(),
    )
}

#[test]
fn normalized_weights_sum_to_one() {
    let panel = synthetic_panel(1);
    assert!((panel.total_weight() - 1.0).abs() < 1e-9);
    assert!(panel.voters().iter().all(|v| v.combined_weight >= 0.0));
}

#[test]
fn resampled_population_is_replications_times_panel() {
    let panel = synthetic_panel(2);
    let model = model_for(&panel);
    assert_eq!(model.population().len(), panel.len() * REPLICATIONS);
    assert_eq!(model.population().adherence().len(), model.population().len());
}

#[test]
fn every_probability_row_sums_to_one() {
    let panel = synthetic_panel(3);
    let model = model_for(&panel);
    let positions = default_baselines();
    for row in model.probabilities(&positions) {
        let total: f64 = row.iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "row sums to {total}");
        assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
    }
    let shares: f64 = model.vote_shares(&positions).as_array().iter().sum();
    assert!((shares - 1.0).abs() < 1e-9);
}

#[test]
fn sensitivity_never_drops_below_floor() {
    let panel = synthetic_panel(4);
    let model = model_for(&panel);
    assert!(
        model
            .population()
            .features()
            .iter()
            .all(|f| f.sensitivity >= 0.1 - 1e-12)
    );
    assert!((FeatureParams::default().sensitivity(1.0) - 0.1).abs() < 1e-12);
}

#[test]
fn floating_voters_have_zero_adherence_rows() {
    let panel = synthetic_panel(5);
    let model = model_for(&panel);
    let population = model.population();
    for (idx, voter) in population.voters().iter().enumerate() {
        let row = population.adherence().row(idx);
        match voter.affiliation {
            Affiliation::Floating => assert!(row.iter().all(|a| *a == 0.0)),
            Affiliation::Affiliated(party) => {
                for other in PartyId::ALL.into_iter().filter(|p| *p != party) {
                    assert_eq!(row[other.index()], 0.0);
                }
                assert!((row[party.index()] - voter.adherence_strength).abs() < 1e-12);
            }
        }
        assert_eq!(population.features()[idx].is_floating, voter.affiliation.is_floating());
    }
}

#[test]
fn default_config_is_valid() {
    assert!(SimulationConfig::default().validate().is_ok());
}
