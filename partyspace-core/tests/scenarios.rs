use partyspace_core::{
    Affiliation, FeatureParams, IssueOwnership, PartyId, PartyPositions, PenaltyParams,
    Population, Position, PreferenceModel, Simulation, SimulationConfig, SolverStatus, Voter,
};

/// Default salience step with a zero baseline weight.
const NEUTRAL_FEATURES: FeatureParams = FeatureParams {
    sensitivity_floor: 0.1,
    salience_threshold: 5.0,
    salient_weight: 1.0,
    baseline_weight: 0.0,
};

fn floating_voter(econ: f64, social: f64) -> Voter {
    Voter {
        econ_position: econ,
        social_position: social,
        affiliation: Affiliation::Floating,
        adherence_strength: 0.0,
        combined_weight: 1.0,
    }
}

fn single_voter_model(voter: Voter, gamma: f64) -> PreferenceModel {
    PreferenceModel::new(
        Population::derive(vec![voter], &NEUTRAL_FEATURES),
        IssueOwnership {
            owner: PartyId::Afd,
            gamma,
        },
    )
}

/// Parties not under test sit at least ten units from the origin.
fn far_positions(spd: Position, cdu: Position) -> PartyPositions {
    PartyPositions::new([
        cdu,
        spd,
        Position::new(0.0, 10.0),
        Position::new(10.0, 0.0),
        Position::new(0.0, -10.0),
        Position::new(-10.0, 0.0),
    ])
}

#[test]
fn equidistant_parties_split_the_voter_evenly() {
    let model = single_voter_model(floating_voter(0.0, 0.0), 0.0);
    let positions = far_positions(Position::new(-1.0, 0.0), Position::new(1.0, 0.0));
    let probs = model.probabilities_for(0, &positions);
    let spd = probs[PartyId::Spd.index()];
    let cdu = probs[PartyId::Cdu.index()];
    assert!((spd - cdu).abs() < 1e-12);
    assert!(spd + cdu > 0.999);
    assert!((spd - 0.5).abs() < 1e-3);
}

#[test]
fn coincident_party_wins_nearly_everything() {
    let model = single_voter_model(floating_voter(0.0, 0.0), 0.0);
    let positions = far_positions(Position::new(0.0, 0.0), Position::new(10.0, 10.0));
    assert!(model.vote_share(PartyId::Spd, &positions) > 0.99);
}

#[test]
fn salient_issue_boosts_the_owner() {
    let voter = floating_voter(0.0, 6.0);
    let positions = far_positions(Position::new(-1.0, 6.0), Position::new(1.0, 6.0));
    let without = single_voter_model(voter, 0.0).vote_share(PartyId::Afd, &positions);
    let with = single_voter_model(voter, 1.0).vote_share(PartyId::Afd, &positions);
    assert!(with > without);
}

#[test]
fn voter_above_salience_threshold_favors_owner_more() {
    // Every party sits on the threshold line, so both voters see identical distances.
    let positions = PartyPositions::new([
        Position::new(1.0, 5.0),
        Position::new(-1.0, 5.0),
        Position::new(3.0, 5.0),
        Position::new(8.0, 5.0),
        Position::new(-8.0, 5.0),
        Position::new(-12.0, 5.0),
    ]);
    let share = |social: f64| {
        single_voter_model(floating_voter(0.0, social), 1.0).vote_share(PartyId::Afd, &positions)
    };
    let below = share(4.9);
    let above = share(5.1);
    assert!(above > below, "above {above} should exceed below {below}");
}

#[test]
fn salience_does_not_fire_at_the_threshold() {
    let voter = floating_voter(0.0, 5.0);
    let positions = far_positions(Position::new(-1.0, 5.0), Position::new(1.0, 5.0));
    let without = single_voter_model(voter, 0.0).vote_share(PartyId::Afd, &positions);
    let with = single_voter_model(voter, 1.0).vote_share(PartyId::Afd, &positions);
    assert!((with - without).abs() < 1e-15);
}

#[test]
fn adherence_pulls_partisans_toward_their_party() {
    let partisan = Voter {
        affiliation: Affiliation::Affiliated(PartyId::Cdu),
        adherence_strength: 0.8,
        ..floating_voter(0.0, 0.0)
    };
    let positions = far_positions(Position::new(-1.0, 0.0), Position::new(1.0, 0.0));
    let model = single_voter_model(partisan, 0.0);
    assert!(model.vote_share(PartyId::Cdu, &positions) > model.vote_share(PartyId::Spd, &positions));
}

#[test]
fn closeness_penalty_shape() {
    let penalties = PenaltyParams {
        alpha: 0.0,
        beta: 0.05,
        threshold: 2.0,
    };
    let origin = Position::new(0.0, 0.0);

    let at_zero = penalties.closeness(origin, origin);
    assert!((at_zero - 0.05 * (-4.0_f64).exp()).abs() < 1e-15);

    let just_inside = penalties.closeness(origin, Position::new(2.0 - 1e-9, 0.0));
    assert!((just_inside - 0.05).abs() < 1e-9);

    assert_eq!(penalties.closeness(origin, Position::new(3.0, 4.0)), 0.0);
}

/// The bump peaks at `beta` only in the limit; the strict `<` makes the exact
/// threshold distance fall on the zero side.
#[test]
fn closeness_is_zero_at_exact_threshold_per_strict_formula() {
    let penalties = PenaltyParams {
        alpha: 0.0,
        beta: 0.05,
        threshold: 2.0,
    };
    let origin = Position::new(0.0, 0.0);
    assert_eq!(penalties.closeness(origin, Position::new(2.0, 0.0)), 0.0);
    assert_eq!(penalties.closeness(origin, Position::new(0.0, -2.0)), 0.0);
}

#[test]
fn movement_penalty_grows_with_distance() {
    let penalties = PenaltyParams::default();
    let baseline = Position::new(1.0, -1.0);
    assert_eq!(penalties.movement(baseline, baseline), 0.0);
    let near = penalties.movement(Position::new(2.0, -1.0), baseline);
    let far = penalties.movement(Position::new(4.0, -1.0), baseline);
    assert!(near > 0.0);
    assert!(far > near);
    assert!((far - penalties.alpha * 9.0).abs() < 1e-12);
}

fn solver_fixture(config: SimulationConfig) -> Simulation {
    let voters = [(-4.0, -2.0), (-1.0, 0.5), (1.5, 2.0), (3.0, 4.0), (0.0, 6.5)]
        .into_iter()
        .map(|(econ, social)| Voter {
            combined_weight: 0.2,
            ..floating_voter(econ, social)
        })
        .collect();
    let population = Population::derive(voters, &config.features);
    Simulation::from_population(population, 5, config)
}

#[test]
fn solver_stops_within_iteration_budget() {
    let mut config = SimulationConfig::default();
    config.solver.max_iter = 3;
    let sim = solver_fixture(config);
    let outcome = sim.solve();
    assert!(outcome.status().is_terminal());
    assert!(outcome.iterations() <= 3);
    assert_eq!(outcome.history.len(), outcome.iterations());
    for party in PartyId::ALL {
        if !sim.config().solver.strategic.contains(&party) {
            assert_eq!(outcome.terminal.positions[party], sim.config().baselines[party]);
        }
        assert!(sim.config().solver.bounds.contains(outcome.terminal.positions[party]));
    }
}

#[test]
fn stiff_movement_penalty_converges_at_baselines() {
    let mut config = SimulationConfig::default();
    config.penalties.alpha = 1.0e6;
    let sim = solver_fixture(config);
    let outcome = sim.solve();
    assert_eq!(outcome.status(), SolverStatus::Converged);
    assert_eq!(outcome.iterations(), 1);
}

#[test]
fn zero_iteration_budget_reports_baselines() {
    let mut config = SimulationConfig::default();
    config.solver.max_iter = 0;
    let sim = solver_fixture(config);
    let outcome = sim.solve();
    assert_eq!(outcome.status(), SolverStatus::Exhausted);
    assert!(outcome.history.is_empty());
    assert_eq!(outcome.terminal.positions, sim.config().baselines);
}
