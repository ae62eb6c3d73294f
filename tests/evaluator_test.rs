//! Integration tests for the guided-step evaluators.

use montessori_mult::guided::{
    EvaluatorId, GuidedSession, StepOutcome, WorkspaceSnapshot, evaluate, guided_steps,
};
use montessori_mult::scenario::{
    GoldenBeadDigits, ManipulativeKind, Place, Scenario, ScenarioGenerator,
};

fn worked_example() -> Scenario {
    Scenario::golden_beads_from_digits(
        0,
        GoldenBeadDigits {
            thousands: 2,
            hundreds: 3,
            tens: 4,
            units: 4,
        },
        3,
    )
}

/// Workspace of a learner who did 2344 × 3 correctly.
fn worked_example_workspace() -> WorkspaceSnapshot {
    WorkspaceSnapshot {
        base_thousands: 2,
        base_hundreds: 3,
        base_tens: 4,
        base_units: 4,
        copies: 3,
        unit_remainder: 2,
        unit_carry_to_tens: 1,
        tens_remainder: 3,
        tens_carry_to_hundreds: 1,
        hundreds_remainder: 0,
        hundreds_carry_to_thousands: 1,
        final_stack: vec![7, 0, 3, 2],
    }
}

/// Build the correct workspace for any scenario through the mutators.
fn solved_workspace(scenario: &Scenario) -> WorkspaceSnapshot {
    let mut ws = WorkspaceSnapshot::default();
    for column in scenario.columns() {
        ws.place_base(column.place, column.digit);
        ws.record_exchange(column.place, column.tally.remainder, column.tally.carry);
    }
    for _ in 0..scenario.multiplier() {
        ws.add_copy();
    }
    for digit in scenario.product_digits() {
        ws.push_stack_digit(digit);
    }
    ws
}

#[test]
fn test_correct_workspace_passes_every_golden_evaluator() {
    let scenario = worked_example();
    let ws = worked_example_workspace();
    for id in EvaluatorId::for_kind(ManipulativeKind::GoldenBeads) {
        assert!(evaluate(id, &ws, Some(&scenario)), "{id} failed");
    }
}

#[test]
fn test_single_field_change_fails_its_evaluator() {
    let scenario = worked_example();
    type Mutation = fn(&mut WorkspaceSnapshot);
    let cases: [(EvaluatorId, Mutation); 12] = [
        (EvaluatorId::GoldenBeadsBuildMultiplicand, |ws| ws.base_thousands += 1),
        (EvaluatorId::GoldenBeadsBuildMultiplicand, |ws| ws.base_hundreds += 1),
        (EvaluatorId::GoldenBeadsBuildMultiplicand, |ws| ws.base_tens += 1),
        (EvaluatorId::GoldenBeadsBuildMultiplicand, |ws| ws.base_units += 1),
        (EvaluatorId::GoldenBeadsMakeCopies, |ws| ws.copies += 1),
        (EvaluatorId::GoldenBeadsExchangeUnits, |ws| ws.unit_remainder += 1),
        (EvaluatorId::GoldenBeadsExchangeUnits, |ws| ws.unit_carry_to_tens += 1),
        (EvaluatorId::GoldenBeadsExchangeTens, |ws| ws.tens_remainder += 1),
        (EvaluatorId::GoldenBeadsExchangeTens, |ws| ws.tens_carry_to_hundreds += 1),
        (EvaluatorId::GoldenBeadsStackProduct, |ws| ws.hundreds_remainder += 1),
        (EvaluatorId::GoldenBeadsStackProduct, |ws| ws.hundreds_carry_to_thousands += 1),
        (EvaluatorId::GoldenBeadsStackProduct, |ws| ws.final_stack.reverse()),
    ];

    for (id, mutate) in cases {
        let mut ws = worked_example_workspace();
        mutate(&mut ws);
        assert!(!evaluate(id, &ws, Some(&scenario)), "{id} passed a wrong workspace");
    }
}

#[test]
fn test_wrong_kind_fails_closed() {
    let scenario = worked_example();
    let ws = worked_example_workspace();
    for id in EvaluatorId::for_kind(ManipulativeKind::StampGame) {
        assert!(!evaluate(id, &ws, Some(&scenario)));
    }
}

#[test]
fn test_missing_scenario_fails_closed() {
    let ws = worked_example_workspace();
    for id in EvaluatorId::ALL {
        assert!(!evaluate(id, &ws, None));
    }
}

#[test]
fn test_stack_with_missing_digit_fails() {
    let scenario = worked_example();
    let mut ws = worked_example_workspace();
    ws.final_stack.pop();
    assert!(!evaluate(EvaluatorId::GoldenBeadsStackProduct, &ws, Some(&scenario)));
}

#[test]
fn test_mutators_solve_generated_scenarios() {
    let generator = ScenarioGenerator::default();
    for kind in [ManipulativeKind::GoldenBeads, ManipulativeKind::StampGame] {
        for seed in 0..50 {
            let scenario = generator.generate(kind, Some(seed)).unwrap();
            let ws = solved_workspace(&scenario);
            for id in EvaluatorId::for_kind(kind) {
                assert!(evaluate(id, &ws, Some(&scenario)), "{id} failed for seed {seed}");
            }
        }
    }
}

#[test]
fn test_snapshot_json_defaults_missing_fields() {
    let ws: WorkspaceSnapshot = serde_json::from_str(r#"{"baseUnits": 4, "finalStack": [1, 2]}"#).unwrap();
    assert_eq!(ws.base_units, 4);
    assert_eq!(ws.copies, 0);
    assert_eq!(ws.final_stack, vec![1, 2]);
    assert_eq!(ws.exchange(Place::Units), Some((0, 0)));
}

#[test]
fn test_session_walks_steps_with_retries() {
    let scenario = worked_example();
    let mut session = GuidedSession::for_kind(ManipulativeKind::GoldenBeads);
    let mut ws = WorkspaceSnapshot::default();

    // Nothing built yet.
    let outcome = session.submit(&ws, Some(&scenario));
    assert!(matches!(outcome, StepOutcome::Retry { attempts: 1, .. }));

    ws = worked_example_workspace();
    let steps = guided_steps(ManipulativeKind::GoldenBeads).len();
    for next in 1..steps {
        assert_eq!(session.submit(&ws, Some(&scenario)), StepOutcome::Passed { next });
    }
    assert_eq!(session.submit(&ws, Some(&scenario)), StepOutcome::Completed);
    assert!(session.is_complete());
    assert_eq!(session.total_attempts(), 6);
    assert_eq!(session.submit(&ws, Some(&scenario)), StepOutcome::AlreadyComplete);

    session.restart();
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.total_attempts(), 0);
}

#[test]
fn test_retry_carries_step_nudge() {
    let scenario = worked_example();
    let mut session = GuidedSession::for_kind(ManipulativeKind::GoldenBeads);
    let expected = session.current_step().unwrap().nudge.clone();
    match session.submit(&WorkspaceSnapshot::default(), Some(&scenario)) {
        StepOutcome::Retry { nudge, .. } => assert_eq!(nudge, expected),
        other => panic!("unexpected outcome {other:?}"),
    }
}
