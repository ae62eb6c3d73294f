//! Compile a solved scenario into a presentation script.
//!
//! Every presentation follows the same arc:
//!
//! ```text
//! problem on paper
//!   → multiplicand cards and multiplier card
//!   → build the multiplicand with material
//!   → lay it out `multiplier` times
//!   → draw the line
//!   → per place, units first:
//!       move below line → count → group → exchange → result card
//!   → stack the result cards
//!   → write the product
//! ```
//!
//! Numbers in the script are copied from the scenario, never recomputed,
//! so a script cannot disagree with the scenario it was built from.

use super::action::{
    Action, ActionKind, CardPosition, HighlightTarget, Script, StackedDigit,
};
use crate::scenario::{
    Column, GoldenBeadScenario, ManipulativeKind, Place, Scenario, StampGameScenario,
};

/// Exchange group size.
pub const EXCHANGE_QUANTITY: u32 = 10;

/// Default script id for golden-bead presentations.
pub const GOLDEN_BEAD_SCRIPT_ID: &str = "golden-beads-presentation";

/// Default script id for stamp-game presentations.
pub const STAMP_GAME_SCRIPT_ID: &str = "stamp-game-presentation";

/// Appends actions and numbers them `<id>-<ordinal>`.
struct ScriptBuilder {
    id: String,
    actions: Vec<Action>,
}

impl ScriptBuilder {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            actions: Vec::new(),
        }
    }

    fn push(&mut self, kind: ActionKind) {
        let id = format!("{}-{}", self.id, self.actions.len());
        self.actions.push(Action::new(id, kind));
    }

    fn narrate(&mut self, text: impl Into<String>) {
        self.push(ActionKind::Narrate { text: text.into() });
    }

    fn build(self) -> Script {
        Script::new(self.id, self.actions)
    }
}

/// Vocabulary and action shapes of one material.
struct Material {
    kind: ManipulativeKind,
}

impl Material {
    fn display_name(&self) -> &'static str {
        match self.kind {
            ManipulativeKind::GoldenBeads => "the golden beads",
            ManipulativeKind::StampGame => "the stamp game",
        }
    }

    fn layout_name(&self) -> &'static str {
        match self.kind {
            ManipulativeKind::GoldenBeads => "trays",
            ManipulativeKind::StampGame => "columns",
        }
    }

    /// Name of the pieces of `place`, pluralised for `count`.
    fn pieces(&self, place: Place, count: u32) -> String {
        let (one, many) = match (self.kind, place) {
            (ManipulativeKind::GoldenBeads, Place::Units) => ("unit bead", "unit beads"),
            (ManipulativeKind::GoldenBeads, Place::Tens) => ("ten-bar", "ten-bars"),
            (ManipulativeKind::GoldenBeads, Place::Hundreds) => ("hundred square", "hundred squares"),
            (ManipulativeKind::GoldenBeads, Place::Thousands) => ("thousand cube", "thousand cubes"),
            (ManipulativeKind::StampGame, Place::Units) => ("unit stamp", "unit stamps"),
            (ManipulativeKind::StampGame, Place::Tens) => ("ten stamp", "ten stamps"),
            (ManipulativeKind::StampGame, Place::Hundreds) => ("hundred stamp", "hundred stamps"),
            (ManipulativeKind::StampGame, Place::Thousands) => ("thousand stamp", "thousand stamps"),
        };
        format!("{count} {}", if count == 1 { one } else { many })
    }

    fn lay_out(&self, place: Place, count: u32) -> ActionKind {
        match self.kind {
            ManipulativeKind::GoldenBeads => ActionKind::PlaceBeads {
                tray: 0,
                place,
                count,
            },
            ManipulativeKind::StampGame => ActionKind::ShowStamp {
                column: 0,
                place,
                count,
            },
        }
    }

    fn exchange(&self, from: Place, to: Place, remainder: u32) -> ActionKind {
        match self.kind {
            ManipulativeKind::GoldenBeads => ActionKind::ExchangeBeads {
                from,
                to,
                quantity: EXCHANGE_QUANTITY,
                remainder,
            },
            ManipulativeKind::StampGame => ActionKind::Exchange {
                from,
                to,
                quantity: EXCHANGE_QUANTITY,
                remainder,
            },
        }
    }
}

/// Problem facts shared by both materials.
struct Problem {
    multiplicand: u32,
    multiplier: u32,
    product: u32,
    columns: Vec<Column>,
}

/// Build the golden-bead presentation script.
pub fn build_golden_bead_presentation_script(scenario: &GoldenBeadScenario) -> Script {
    build_golden_bead_presentation_script_with_id(scenario, GOLDEN_BEAD_SCRIPT_ID)
}

/// Build the golden-bead presentation script under a custom id.
pub fn build_golden_bead_presentation_script_with_id(
    scenario: &GoldenBeadScenario,
    script_id: &str,
) -> Script {
    let problem = Problem {
        multiplicand: scenario.multiplicand,
        multiplier: scenario.multiplier,
        product: scenario.product,
        columns: scenario.columns(),
    };
    compile_problem(
        &Material {
            kind: ManipulativeKind::GoldenBeads,
        },
        &problem,
        script_id,
    )
}

/// Build the stamp-game presentation script.
pub fn build_stamp_game_presentation_script(scenario: &StampGameScenario) -> Script {
    build_stamp_game_presentation_script_with_id(scenario, STAMP_GAME_SCRIPT_ID)
}

/// Build the stamp-game presentation script under a custom id.
pub fn build_stamp_game_presentation_script_with_id(
    scenario: &StampGameScenario,
    script_id: &str,
) -> Script {
    let problem = Problem {
        multiplicand: scenario.multiplicand,
        multiplier: scenario.multiplier,
        product: scenario.product,
        columns: scenario.columns(),
    };
    compile_problem(
        &Material {
            kind: ManipulativeKind::StampGame,
        },
        &problem,
        script_id,
    )
}

/// Compile any scenario with its kind's default script id.
pub fn compile(scenario: &Scenario) -> Script {
    match scenario {
        Scenario::GoldenBeads(s) => build_golden_bead_presentation_script(s),
        Scenario::StampGame(s) => build_stamp_game_presentation_script(s),
    }
}

/// Compile any scenario under `script_id`.
pub fn compile_with_id(scenario: &Scenario, script_id: &str) -> Script {
    match scenario {
        Scenario::GoldenBeads(s) => build_golden_bead_presentation_script_with_id(s, script_id),
        Scenario::StampGame(s) => build_stamp_game_presentation_script_with_id(s, script_id),
    }
}

fn compile_problem(material: &Material, problem: &Problem, script_id: &str) -> Script {
    let mut b = ScriptBuilder::new(script_id);
    let Problem {
        multiplicand,
        multiplier,
        product,
        ..
    } = *problem;

    // Problem on paper.
    b.narrate(format!(
        "Let's multiply {multiplicand} by {multiplier} using {}.",
        material.display_name()
    ));
    b.push(ActionKind::ShowCard {
        value: format!("{multiplicand} × {multiplier}"),
        position: CardPosition::Paper,
    });

    // Cards, highest place first.
    b.narrate(format!("First we find the cards that make {multiplicand}."));
    for column in problem.columns.iter().rev().filter(|c| c.digit > 0) {
        b.push(ActionKind::ShowCard {
            value: column.place_value.to_string(),
            position: CardPosition::Multiplicand,
        });
    }
    b.push(ActionKind::ShowCard {
        value: multiplier.to_string(),
        position: CardPosition::Multiplier,
    });
    b.push(ActionKind::Highlight {
        target: Some(HighlightTarget::MultiplierCard),
    });
    b.narrate(format!(
        "The {multiplier} tells us how many times we take {multiplicand}."
    ));

    // Build the multiplicand once.
    let pieces: Vec<String> = problem
        .columns
        .iter()
        .rev()
        .filter(|c| c.digit > 0)
        .map(|c| material.pieces(c.place, c.digit))
        .collect();
    b.narrate(format!(
        "We build {multiplicand} with {}.",
        pieces.join(", ")
    ));
    for column in problem.columns.iter().rev().filter(|c| c.digit > 0) {
        b.push(material.lay_out(column.place, column.digit));
    }

    // Lay it out `multiplier` times.
    b.push(ActionKind::Highlight {
        target: Some(HighlightTarget::Tray(0)),
    });
    b.narrate(format!(
        "We need {multiplicand} {multiplier} times, so we make {multiplier} {} that look the same.",
        material.layout_name()
    ));
    b.push(ActionKind::DuplicateTray { copies: multiplier });

    b.narrate("We draw a line. Everything we gather below the line is our answer.");
    b.push(ActionKind::PlaceDivider);

    // Place by place, units first.
    for column in &problem.columns {
        compile_column(&mut b, material, column);
    }

    // Read the answer.
    b.push(ActionKind::Highlight { target: None });
    b.narrate("Now we stack the result cards, biggest place first.");
    b.push(ActionKind::StackPlaceValues {
        digits: problem
            .columns
            .iter()
            .rev()
            .map(|c| StackedDigit {
                place: c.place,
                digit: c.tally.remainder,
            })
            .collect(),
    });
    b.push(ActionKind::WriteResult {
        value: product.to_string(),
    });
    b.push(ActionKind::Highlight {
        target: Some(HighlightTarget::Product),
    });
    b.narrate(format!("{multiplicand} × {multiplier} = {product}."));

    b.build()
}

fn compile_column(b: &mut ScriptBuilder, material: &Material, column: &Column) {
    let place = column.place;
    let tally = column.tally;

    b.push(ActionKind::Highlight {
        target: Some(HighlightTarget::Place(place)),
    });
    b.narrate(format!(
        "We bring all the {} from every {} below the line.",
        place.name(),
        material.layout_name().trim_end_matches('s')
    ));
    b.push(ActionKind::MoveBeadsBelowLine { place });
    b.push(ActionKind::CountTotal {
        place,
        total: tally.total,
    });

    if column.carry_in > 0 {
        b.narrate(format!(
            "Together with the {} we exchanged, we count {}.",
            material.pieces(place, column.carry_in),
            material.pieces(place, tally.total)
        ));
    } else {
        b.narrate(format!("We count {}.", material.pieces(place, tally.total)));
    }

    match place.next() {
        Some(next) if tally.carry > 0 => {
            b.narrate(format!(
                "Ten {} make one {}. We can make {} {} of ten.",
                place.name(),
                next.singular(),
                tally.carry,
                if tally.carry == 1 { "group" } else { "groups" }
            ));
            b.push(ActionKind::GroupForExchange {
                place,
                groups: tally.carry,
                quantity: EXCHANGE_QUANTITY,
            });
            b.push(material.exchange(place, next, tally.remainder));
            b.narrate(format!(
                "We trade {} for {}. {} left in the {}.",
                material.pieces(place, tally.exchanged),
                material.pieces(next, tally.carry),
                capitalize(&material.pieces(place, tally.remainder)),
                place.name()
            ));
        }
        _ => {
            b.narrate(format!(
                "There are fewer than ten {}, so nothing to exchange.",
                place.name()
            ));
        }
    }

    b.push(ActionKind::PlaceResultCard {
        place,
        digit: tally.remainder,
    });
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::GoldenBeadDigits;

    fn worked_example() -> GoldenBeadScenario {
        GoldenBeadScenario::solve(
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

    #[test]
    fn test_ids_are_positional() {
        let script = build_golden_bead_presentation_script(&worked_example());
        for (i, action) in script.iter().enumerate() {
            assert_eq!(action.id, format!("{GOLDEN_BEAD_SCRIPT_ID}-{i}"));
        }
    }

    #[test]
    fn test_exchanges_use_scenario_remainders() {
        let script = build_golden_bead_presentation_script(&worked_example());
        let exchanges: Vec<(Place, u32)> = script
            .iter()
            .filter_map(|a| match a.kind {
                ActionKind::ExchangeBeads { from, remainder, .. } => Some((from, remainder)),
                _ => None,
            })
            .collect();
        assert_eq!(
            exchanges,
            vec![(Place::Units, 2), (Place::Tens, 3), (Place::Hundreds, 0)]
        );
    }

    #[test]
    fn test_multiplicand_cards_come_from_columns() {
        let scenario = worked_example();
        let script = build_golden_bead_presentation_script(&scenario);
        let cards: Vec<&str> = script
            .iter()
            .filter_map(|a| match &a.kind {
                ActionKind::ShowCard {
                    value,
                    position: CardPosition::Multiplicand,
                } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(cards, vec!["2000", "300", "40", "4"]);
    }

    #[test]
    fn test_exchange_narration_counts_traded_pieces() {
        let script = build_golden_bead_presentation_script(&worked_example());
        let trades: Vec<&str> = script
            .iter()
            .filter_map(|a| a.narration())
            .filter(|n| n.starts_with("We trade "))
            .collect();
        assert_eq!(trades.len(), 3);
        assert!(trades.iter().all(|n| n.starts_with("We trade 10 ")));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("2 unit beads"), "2 unit beads");
        assert_eq!(capitalize("one"), "One");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_pieces_pluralise() {
        let material = Material {
            kind: ManipulativeKind::GoldenBeads,
        };
        assert_eq!(material.pieces(Place::Tens, 1), "1 ten-bar");
        assert_eq!(material.pieces(Place::Tens, 3), "3 ten-bars");
    }
}
