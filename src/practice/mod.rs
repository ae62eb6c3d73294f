//! Independent practice questions.
//!
//! Each practice scenario yields one product question and one carry question
//! per place that exchanges. Scenarios come from consecutive seeds so a stored
//! `{kind, seed}` reproduces the whole set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::scenario::{ManipulativeKind, Place, Scenario, ScenarioGenerator, ScenarioRef};

/// What a practice question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuestionKind {
    Product,
    Carry { place: Place },
}

/// A single practice question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
    pub id: String,
    pub scenario: ScenarioRef,
    pub kind: QuestionKind,
    pub prompt: String,
    pub answer: u32,
}

impl PracticeQuestion {
    /// Check a typed answer. Surrounding whitespace is ignored; anything that
    /// is not a plain decimal number is wrong.
    pub fn check(&self, input: &str) -> bool {
        let input = input.trim();
        !input.is_empty()
            && input.chars().all(|c| c.is_ascii_digit())
            && input.parse::<u32>().is_ok_and(|v| v == self.answer)
    }
}

/// Questions for one scenario.
pub fn build_questions(scenario: &Scenario) -> Vec<PracticeQuestion> {
    let reference = scenario.reference();
    let prefix = format!("{}-{}", reference.kind, reference.seed);
    let (multiplicand, multiplier) = (scenario.multiplicand(), scenario.multiplier());

    let mut questions = vec![PracticeQuestion {
        id: format!("{prefix}-product"),
        scenario: reference,
        kind: QuestionKind::Product,
        prompt: format!("What is {multiplicand} × {multiplier}?"),
        answer: scenario.product(),
    }];

    for column in scenario.columns() {
        let Some(next) = column.place.next() else {
            continue;
        };
        if column.tally.carry == 0 {
            continue;
        }
        questions.push(PracticeQuestion {
            id: format!("{prefix}-carry-{}", column.place),
            scenario: reference,
            kind: QuestionKind::Carry {
                place: column.place,
            },
            prompt: format!(
                "In {multiplicand} × {multiplier}, how many {} do you carry when you exchange the {}?",
                next.name(),
                column.place.name()
            ),
            answer: column.tally.carry,
        });
    }
    questions
}

/// Generate `count` scenarios from consecutive seeds and collect their questions.
pub fn build_practice_set(
    kind: ManipulativeKind,
    base_seed: u32,
    count: usize,
    config: &GeneratorConfig,
) -> Result<Vec<PracticeQuestion>> {
    let generator = ScenarioGenerator::new(config.clone());
    let mut questions = Vec::new();
    for i in 0..count {
        let seed = base_seed.wrapping_add(i as u32);
        let scenario = generator.generate(kind, Some(seed))?;
        questions.extend(build_questions(&scenario));
    }
    debug!(%kind, base_seed, count, questions = questions.len(), "practice set built");
    Ok(questions)
}

/// Tracks answers given during practice.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    questions: Vec<PracticeQuestion>,
    results: Vec<Option<bool>>,
    attempted: u32,
}

impl PracticeSession {
    pub fn new(questions: Vec<PracticeQuestion>) -> Self {
        let results = vec![None; questions.len()];
        Self {
            questions,
            results,
            attempted: 0,
        }
    }

    pub fn questions(&self) -> &[PracticeQuestion] {
        &self.questions
    }

    /// Answer question `index`; `None` for an unknown index.
    ///
    /// A question may be answered again; its latest result counts.
    pub fn answer(&mut self, index: usize, input: &str) -> Option<bool> {
        let correct = self.questions.get(index)?.check(input);
        self.results[index] = Some(correct);
        self.attempted += 1;
        Some(correct)
    }

    /// Latest result of question `index`.
    pub fn result(&self, index: usize) -> Option<bool> {
        self.results.get(index).copied().flatten()
    }

    pub fn num_correct(&self) -> usize {
        self.results.iter().filter(|r| **r == Some(true)).count()
    }

    pub fn num_attempted(&self) -> u32 {
        self.attempted
    }

    /// Every question currently answered correctly. An empty session never
    /// completes.
    pub fn is_complete(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| *r == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::GoldenBeadDigits;

    fn worked_example() -> Scenario {
        Scenario::golden_beads_from_digits(
            11,
            GoldenBeadDigits {
                thousands: 2,
                hundreds: 3,
                tens: 4,
                units: 4,
            },
            3,
        )
    }

    #[test]
    fn test_questions_for_worked_example() {
        let questions = build_questions(&worked_example());
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0].answer, 7032);
        assert_eq!(questions[0].id, "golden-beads-11-product");
        assert!(questions[1..].iter().all(|q| q.answer == 1));
        assert_eq!(
            questions[3].kind,
            QuestionKind::Carry {
                place: Place::Hundreds
            }
        );
    }

    #[test]
    fn test_check_parses_strictly() {
        let question = &build_questions(&worked_example())[0];
        assert!(question.check("7032"));
        assert!(question.check("  7032\n"));
        assert!(!question.check("+7032"));
        assert!(!question.check("7,032"));
        assert!(!question.check(""));
        assert!(!question.check("7033"));
    }

    #[test]
    fn test_session_tracks_latest_result() {
        let mut session = PracticeSession::new(build_questions(&worked_example()));
        assert_eq!(session.answer(0, "7000"), Some(false));
        assert_eq!(session.answer(0, "7032"), Some(true));
        assert_eq!(session.answer(99, "1"), None);
        assert_eq!(session.num_attempted(), 2);
        assert_eq!(session.num_correct(), 1);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_empty_session_is_not_complete() {
        let mut session = PracticeSession::new(Vec::new());
        assert!(!session.is_complete());
        assert_eq!(session.answer(0, "1"), None);
        assert_eq!(session.num_attempted(), 0);
    }
}
