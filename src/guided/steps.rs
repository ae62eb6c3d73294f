//! Guided steps and the linear guided workflow.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::evaluator::{EvaluatorId, evaluate};
use super::workspace::WorkspaceSnapshot;
use crate::scenario::{ManipulativeKind, Scenario};

/// One checkpoint of the guided phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidedStep {
    pub id: String,
    /// What the learner is asked to do.
    pub prompt: String,
    /// What a correct workspace looks like, in words.
    pub expectation: String,
    /// Shown when the check passes.
    pub success_check: String,
    /// Shown when the check fails.
    pub nudge: String,
    pub evaluator_id: EvaluatorId,
}

impl GuidedStep {
    fn new(
        evaluator_id: EvaluatorId,
        prompt: &str,
        expectation: &str,
        success_check: &str,
        nudge: &str,
    ) -> Self {
        Self {
            id: evaluator_id.as_str().to_string(),
            prompt: prompt.to_string(),
            expectation: expectation.to_string(),
            success_check: success_check.to_string(),
            nudge: nudge.to_string(),
            evaluator_id,
        }
    }
}

/// The five fixed guided steps of `kind`.
pub fn guided_steps(kind: ManipulativeKind) -> Vec<GuidedStep> {
    use EvaluatorId as E;

    match kind {
        ManipulativeKind::GoldenBeads => vec![
            GuidedStep::new(
                E::GoldenBeadsBuildMultiplicand,
                "Build the multiplicand on your tray with golden beads.",
                "Thousand cubes, hundred squares, ten-bars and unit beads match each digit.",
                "Your tray shows the multiplicand.",
                "Read the number card one place at a time and count the beads for each place.",
            ),
            GuidedStep::new(
                E::GoldenBeadsMakeCopies,
                "Make as many trays as the multiplier says.",
                "The number of trays equals the multiplier.",
                "You have the right number of trays.",
                "Look at the multiplier card. That is how many trays you need.",
            ),
            GuidedStep::new(
                E::GoldenBeadsExchangeUnits,
                "Bring the unit beads below the line and exchange ten units for a ten-bar.",
                "The units left over and the ten-bars carried match the count.",
                "Units exchanged correctly.",
                "Count all the unit beads. Every ten of them becomes one ten-bar.",
            ),
            GuidedStep::new(
                E::GoldenBeadsExchangeTens,
                "Bring the ten-bars below the line, including the carried ones, and exchange.",
                "The tens left over and the hundred squares carried match the count.",
                "Tens exchanged correctly.",
                "Don't forget the ten-bar you carried from the units.",
            ),
            GuidedStep::new(
                E::GoldenBeadsStackProduct,
                "Exchange the hundreds, gather the thousands, then stack the result cards.",
                "The hundreds exchange is right and the stacked digits read the product.",
                "You found the product!",
                "Stack the cards from the thousands down to the units.",
            ),
        ],
        ManipulativeKind::StampGame => vec![
            GuidedStep::new(
                E::StampGameBuildMultiplicand,
                "Lay out the multiplicand with stamps in one column.",
                "Hundred, ten and unit stamps match each digit.",
                "Your column shows the multiplicand.",
                "Count the stamps for each place from the number card.",
            ),
            GuidedStep::new(
                E::StampGameMakeCopies,
                "Lay out as many columns as the multiplier says.",
                "The number of columns equals the multiplier.",
                "You have the right number of columns.",
                "Look at the multiplier card. That is how many columns you need.",
            ),
            GuidedStep::new(
                E::StampGameExchangeUnits,
                "Move the unit stamps below the line and exchange ten for a ten stamp.",
                "The units left over and the ten stamps carried match the count.",
                "Units exchanged correctly.",
                "Count the unit stamps. Every ten of them becomes one ten stamp.",
            ),
            GuidedStep::new(
                E::StampGameExchangeTens,
                "Move the ten stamps below the line, including the carried ones, and exchange.",
                "The tens left over and the hundred stamps carried match the count.",
                "Tens exchanged correctly.",
                "Remember the ten stamp you carried from the units.",
            ),
            GuidedStep::new(
                E::StampGameStackProduct,
                "Gather the hundreds and read the product.",
                "The hundreds count is right and the stacked digits read the product.",
                "You found the product!",
                "Count the hundred stamps, including the carried ones, then read from left to right.",
            ),
        ],
    }
}

/// Result of submitting the workspace for the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Passed; the session moved to step `next`.
    Passed { next: usize },
    /// Passed the last step.
    Completed,
    /// Failed; try again in place.
    Retry { nudge: String, attempts: u32 },
    /// The session was already complete.
    AlreadyComplete,
    /// The session has no steps and can never complete.
    NoSteps,
}

/// Linear walk through the guided steps with unlimited retries.
#[derive(Debug, Clone)]
pub struct GuidedSession {
    steps: Vec<GuidedStep>,
    current: usize,
    attempts: Vec<u32>,
    completed: bool,
}

impl GuidedSession {
    pub fn new(steps: Vec<GuidedStep>) -> Self {
        let attempts = vec![0; steps.len()];
        Self {
            steps,
            current: 0,
            attempts,
            completed: false,
        }
    }

    /// Session over the fixed steps of `kind`.
    pub fn for_kind(kind: ManipulativeKind) -> Self {
        Self::new(guided_steps(kind))
    }

    pub fn steps(&self) -> &[GuidedStep] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&GuidedStep> {
        if self.completed {
            None
        } else {
            self.steps.get(self.current)
        }
    }

    /// Attempts made on step `index`.
    pub fn attempts(&self, index: usize) -> u32 {
        self.attempts.get(index).copied().unwrap_or(0)
    }

    pub fn total_attempts(&self) -> u32 {
        self.attempts.iter().sum()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Check the workspace against the current step.
    pub fn submit(&mut self, snapshot: &WorkspaceSnapshot, scenario: Option<&Scenario>) -> StepOutcome {
        if self.steps.is_empty() {
            return StepOutcome::NoSteps;
        }
        let Some(step) = self.current_step() else {
            return StepOutcome::AlreadyComplete;
        };
        let evaluator_id = step.evaluator_id;
        let nudge = step.nudge.clone();

        self.attempts[self.current] += 1;
        let attempts = self.attempts[self.current];

        if !evaluate(evaluator_id, snapshot, scenario) {
            debug!(step = self.current, attempts, "guided step failed");
            return StepOutcome::Retry { nudge, attempts };
        }

        if self.current + 1 >= self.steps.len() {
            self.completed = true;
            info!(
                steps = self.steps.len(),
                attempts = self.total_attempts(),
                "guided segment complete"
            );
            StepOutcome::Completed
        } else {
            self.current += 1;
            StepOutcome::Passed { next: self.current }
        }
    }

    /// Start over from the first step, clearing attempt counts.
    pub fn restart(&mut self) {
        self.current = 0;
        self.attempts.iter_mut().for_each(|a| *a = 0);
        self.completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_follow_evaluator_order() {
        for kind in [ManipulativeKind::GoldenBeads, ManipulativeKind::StampGame] {
            let ids: Vec<EvaluatorId> = guided_steps(kind).iter().map(|s| s.evaluator_id).collect();
            let expected: Vec<EvaluatorId> = EvaluatorId::for_kind(kind).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_failed_submit_counts_attempts() {
        let mut session = GuidedSession::for_kind(ManipulativeKind::GoldenBeads);
        let ws = WorkspaceSnapshot::default();

        for expected in 1..=3 {
            match session.submit(&ws, None) {
                StepOutcome::Retry { attempts, .. } => assert_eq!(attempts, expected),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.attempts(0), 3);
    }

    #[test]
    fn test_empty_session_never_completes() {
        let mut session = GuidedSession::new(Vec::new());
        assert!(!session.is_complete());
        assert!(session.current_step().is_none());
        for _ in 0..3 {
            assert_eq!(
                session.submit(&WorkspaceSnapshot::default(), None),
                StepOutcome::NoSteps
            );
        }
        session.restart();
        assert!(!session.is_complete());
        assert_eq!(session.total_attempts(), 0);
    }
}
