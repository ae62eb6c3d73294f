//! Pass/fail checks for guided steps.
//!
//! Every evaluator compares learner counters field by field against the
//! scenario's precomputed values. There is no partial credit, and a missing
//! scenario or one of the other kind always fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::workspace::WorkspaceSnapshot;
use crate::scenario::{
    GoldenBeadScenario, ManipulativeKind, Place, Scenario, StampGameScenario,
};

/// The ten guided-step evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluatorId {
    GoldenBeadsBuildMultiplicand,
    GoldenBeadsMakeCopies,
    GoldenBeadsExchangeUnits,
    GoldenBeadsExchangeTens,
    GoldenBeadsStackProduct,
    StampGameBuildMultiplicand,
    StampGameMakeCopies,
    StampGameExchangeUnits,
    StampGameExchangeTens,
    StampGameStackProduct,
}

impl EvaluatorId {
    pub const ALL: [EvaluatorId; 10] = [
        Self::GoldenBeadsBuildMultiplicand,
        Self::GoldenBeadsMakeCopies,
        Self::GoldenBeadsExchangeUnits,
        Self::GoldenBeadsExchangeTens,
        Self::GoldenBeadsStackProduct,
        Self::StampGameBuildMultiplicand,
        Self::StampGameMakeCopies,
        Self::StampGameExchangeUnits,
        Self::StampGameExchangeTens,
        Self::StampGameStackProduct,
    ];

    /// Evaluators of one manipulative kind, in lesson order.
    pub fn for_kind(kind: ManipulativeKind) -> impl Iterator<Item = EvaluatorId> {
        Self::ALL.into_iter().filter(move |id| id.kind() == kind)
    }

    /// Kind of scenario this evaluator accepts.
    pub fn kind(&self) -> ManipulativeKind {
        match self {
            Self::GoldenBeadsBuildMultiplicand
            | Self::GoldenBeadsMakeCopies
            | Self::GoldenBeadsExchangeUnits
            | Self::GoldenBeadsExchangeTens
            | Self::GoldenBeadsStackProduct => ManipulativeKind::GoldenBeads,
            Self::StampGameBuildMultiplicand
            | Self::StampGameMakeCopies
            | Self::StampGameExchangeUnits
            | Self::StampGameExchangeTens
            | Self::StampGameStackProduct => ManipulativeKind::StampGame,
        }
    }

    /// Wire id.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoldenBeadsBuildMultiplicand => "golden-beads-build-multiplicand",
            Self::GoldenBeadsMakeCopies => "golden-beads-make-copies",
            Self::GoldenBeadsExchangeUnits => "golden-beads-exchange-units",
            Self::GoldenBeadsExchangeTens => "golden-beads-exchange-tens",
            Self::GoldenBeadsStackProduct => "golden-beads-stack-product",
            Self::StampGameBuildMultiplicand => "stamp-game-build-multiplicand",
            Self::StampGameMakeCopies => "stamp-game-make-copies",
            Self::StampGameExchangeUnits => "stamp-game-exchange-units",
            Self::StampGameExchangeTens => "stamp-game-exchange-tens",
            Self::StampGameStackProduct => "stamp-game-stack-product",
        }
    }
}

impl fmt::Display for EvaluatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluatorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown evaluator id '{s}'"))
    }
}

type GoldenBeadCheck = fn(&WorkspaceSnapshot, &GoldenBeadScenario) -> bool;
type StampGameCheck = fn(&WorkspaceSnapshot, &StampGameScenario) -> bool;

/// A predicate bound to the scenario kind it understands.
#[derive(Clone, Copy)]
enum Predicate {
    GoldenBeads(GoldenBeadCheck),
    StampGame(StampGameCheck),
}

fn predicate(id: EvaluatorId) -> Predicate {
    use EvaluatorId as E;
    use Predicate as P;

    match id {
        E::GoldenBeadsBuildMultiplicand => P::GoldenBeads(golden::build_multiplicand),
        E::GoldenBeadsMakeCopies => P::GoldenBeads(golden::make_copies),
        E::GoldenBeadsExchangeUnits => P::GoldenBeads(golden::exchange_units),
        E::GoldenBeadsExchangeTens => P::GoldenBeads(golden::exchange_tens),
        E::GoldenBeadsStackProduct => P::GoldenBeads(golden::stack_product),
        E::StampGameBuildMultiplicand => P::StampGame(stamp::build_multiplicand),
        E::StampGameMakeCopies => P::StampGame(stamp::make_copies),
        E::StampGameExchangeUnits => P::StampGame(stamp::exchange_units),
        E::StampGameExchangeTens => P::StampGame(stamp::exchange_tens),
        E::StampGameStackProduct => P::StampGame(stamp::stack_product),
    }
}

/// Judge `snapshot` for evaluator `id`.
///
/// Returns `false` when `scenario` is absent or of the other kind.
pub fn evaluate(id: EvaluatorId, snapshot: &WorkspaceSnapshot, scenario: Option<&Scenario>) -> bool {
    let passed = match (predicate(id), scenario) {
        (Predicate::GoldenBeads(check), Some(Scenario::GoldenBeads(s))) => check(snapshot, s),
        (Predicate::StampGame(check), Some(Scenario::StampGame(s))) => check(snapshot, s),
        _ => false,
    };
    debug!(evaluator = id.as_str(), passed, "evaluated guided step");
    passed
}

fn exchange_matches(snapshot: &WorkspaceSnapshot, place: Place, remainder: u32, carry: u32) -> bool {
    snapshot.exchange(place) == Some((remainder, carry))
}

mod golden {
    use super::*;

    pub(super) fn build_multiplicand(ws: &WorkspaceSnapshot, s: &GoldenBeadScenario) -> bool {
        ws.base_thousands == s.digits.thousands
            && ws.base_hundreds == s.digits.hundreds
            && ws.base_tens == s.digits.tens
            && ws.base_units == s.digits.units
    }

    pub(super) fn make_copies(ws: &WorkspaceSnapshot, s: &GoldenBeadScenario) -> bool {
        ws.copies == s.multiplier
    }

    pub(super) fn exchange_units(ws: &WorkspaceSnapshot, s: &GoldenBeadScenario) -> bool {
        exchange_matches(ws, Place::Units, s.units.remainder, s.units.carry)
    }

    pub(super) fn exchange_tens(ws: &WorkspaceSnapshot, s: &GoldenBeadScenario) -> bool {
        exchange_matches(ws, Place::Tens, s.tens.remainder, s.tens.carry)
    }

    /// Hundreds exchange plus the stacked digits `[thousands, hundreds, tens, units]`.
    pub(super) fn stack_product(ws: &WorkspaceSnapshot, s: &GoldenBeadScenario) -> bool {
        exchange_matches(ws, Place::Hundreds, s.hundreds.remainder, s.hundreds.carry)
            && ws.final_stack
                == [
                    s.thousands.remainder,
                    s.hundreds.remainder,
                    s.tens.remainder,
                    s.units.remainder,
                ]
    }
}

mod stamp {
    use super::*;

    pub(super) fn build_multiplicand(ws: &WorkspaceSnapshot, s: &StampGameScenario) -> bool {
        ws.base_hundreds == s.digits.hundreds
            && ws.base_tens == s.digits.tens
            && ws.base_units == s.digits.units
    }

    pub(super) fn make_copies(ws: &WorkspaceSnapshot, s: &StampGameScenario) -> bool {
        ws.copies == s.multiplier
    }

    pub(super) fn exchange_units(ws: &WorkspaceSnapshot, s: &StampGameScenario) -> bool {
        exchange_matches(ws, Place::Units, s.units.remainder, s.units.carry)
    }

    pub(super) fn exchange_tens(ws: &WorkspaceSnapshot, s: &StampGameScenario) -> bool {
        exchange_matches(ws, Place::Tens, s.tens.remainder, s.tens.carry)
    }

    /// Hundreds total plus the stacked digits `[hundreds, tens, units]`.
    pub(super) fn stack_product(ws: &WorkspaceSnapshot, s: &StampGameScenario) -> bool {
        ws.hundreds_remainder == s.hundreds.remainder
            && ws.final_stack == [s.hundreds.remainder, s.tens.remainder, s.units.remainder]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::StampGameDigits;

    #[test]
    fn test_ids_round_trip_through_str() {
        for id in EvaluatorId::ALL {
            assert_eq!(id.as_str().parse::<EvaluatorId>().unwrap(), id);
            assert_eq!(serde_json::to_value(id).unwrap(), id.as_str());
        }
        assert!("golden-beads-dance".parse::<EvaluatorId>().is_err());
    }

    #[test]
    fn test_five_per_kind() {
        assert_eq!(EvaluatorId::for_kind(ManipulativeKind::GoldenBeads).count(), 5);
        assert_eq!(EvaluatorId::for_kind(ManipulativeKind::StampGame).count(), 5);
    }

    #[test]
    fn test_missing_scenario_fails_closed() {
        for id in EvaluatorId::ALL {
            assert!(!evaluate(id, &WorkspaceSnapshot::default(), None));
        }
    }

    #[test]
    fn test_stamp_game_stack() {
        let scenario = Scenario::stamp_game_from_digits(
            0,
            StampGameDigits {
                hundreds: 2,
                tens: 4,
                units: 6,
            },
            3,
        );
        // 246 × 3 = 738: units 18 → 8 carry 1, tens 13 → 3 carry 1, hundreds 7.
        let ws = WorkspaceSnapshot {
            hundreds_remainder: 7,
            final_stack: vec![7, 3, 8],
            ..Default::default()
        };
        assert!(evaluate(EvaluatorId::StampGameStackProduct, &ws, Some(&scenario)));
        assert!(!evaluate(EvaluatorId::GoldenBeadsStackProduct, &ws, Some(&scenario)));
    }
}
