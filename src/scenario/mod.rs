//! Arithmetic problem instances for the manipulative lessons.
//!
//! A [`Scenario`] is a fully solved multiplication problem: the multiplicand
//! split into place digits, the multiplier, and for every place the
//! `{total, remainder, carry}` tally produced by the exchange procedure.
//!
//! ```text
//!   2344 × 3
//!
//!   units     4 × 3 + 0 = 12  → remainder 2, carry 1
//!   tens      4 × 3 + 1 = 13  → remainder 3, carry 1
//!   hundreds  3 × 3 + 1 = 10  → remainder 0, carry 1
//!   thousands 2 × 3 + 1 =  7  → remainder 7, carry 0
//!                                product  7032
//! ```

pub mod generator;
pub mod rng;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::Result;

pub use generator::ScenarioGenerator;
pub use rng::Mulberry32;

/// The two manipulative materials a lesson can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManipulativeKind {
    GoldenBeads,
    StampGame,
}

impl ManipulativeKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoldenBeads => "golden-beads",
            Self::StampGame => "stamp-game",
        }
    }

    /// Highest place the multiplicand (and the product) may occupy.
    pub fn top_place(&self) -> Place {
        match self {
            Self::GoldenBeads => Place::Thousands,
            Self::StampGame => Place::Hundreds,
        }
    }
}

impl fmt::Display for ManipulativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManipulativeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "golden-beads" => Ok(Self::GoldenBeads),
            "stamp-game" => Ok(Self::StampGame),
            other => Err(format!(
                "unknown manipulative kind '{other}' (expected golden-beads or stamp-game)"
            )),
        }
    }
}

/// A decimal place, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    Units,
    Tens,
    Hundreds,
    Thousands,
}

impl Place {
    /// All places, lowest first.
    pub const ALL: [Place; 4] = [Place::Units, Place::Tens, Place::Hundreds, Place::Thousands];

    /// Zero-based position (units = 0).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Numeric value of one unit of this place.
    pub fn value(&self) -> u32 {
        10u32.pow(self.index() as u32)
    }

    /// The next higher place, if any.
    pub fn next(&self) -> Option<Place> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Plural name ("tens").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Units => "units",
            Self::Tens => "tens",
            Self::Hundreds => "hundreds",
            Self::Thousands => "thousands",
        }
    }

    /// Singular name ("ten").
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Units => "unit",
            Self::Tens => "ten",
            Self::Hundreds => "hundred",
            Self::Thousands => "thousand",
        }
    }

    /// Places from units up to and including `top`.
    pub fn up_to(top: Place) -> impl DoubleEndedIterator<Item = Place> {
        Self::ALL.into_iter().take(top.index() + 1)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of multiplying one place and exchanging the overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaceTally {
    /// `digit * multiplier + carry_in`.
    pub total: u32,
    /// `total % 10`, what stays in this place.
    pub remainder: u32,
    /// `total / 10`, what moves to the next place.
    pub carry: u32,
    /// `carry * 10`, the pieces traded away for the carry.
    pub exchanged: u32,
}

impl PlaceTally {
    /// Tally one place.
    pub fn compute(digit: u32, multiplier: u32, carry_in: u32) -> Self {
        let total = digit * multiplier + carry_in;
        let carry = total / 10;
        Self {
            total,
            remainder: total % 10,
            carry,
            exchanged: carry * 10,
        }
    }
}

/// One place of a solved scenario, with the carry it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub place: Place,
    pub digit: u32,
    /// `digit` times the place value, the number on the column's card.
    pub place_value: u32,
    pub carry_in: u32,
    pub tally: PlaceTally,
}

/// Walk places `units..=top`, threading each carry into the next place.
fn collect_columns(
    top: Place,
    digit: impl Fn(Place) -> u32,
    tally: impl Fn(Place) -> PlaceTally,
) -> Vec<Column> {
    let mut carry_in = 0;
    Place::up_to(top)
        .map(|place| {
            let tally = tally(place);
            let digit = digit(place);
            let column = Column {
                place,
                digit,
                place_value: digit * place.value(),
                carry_in,
                tally,
            };
            carry_in = tally.carry;
            column
        })
        .collect()
}

/// Multiplicand digits for the golden beads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoldenBeadDigits {
    pub thousands: u32,
    pub hundreds: u32,
    pub tens: u32,
    pub units: u32,
}

impl GoldenBeadDigits {
    /// The number these digits spell.
    pub fn value(&self) -> u32 {
        self.thousands * 1000 + self.hundreds * 100 + self.tens * 10 + self.units
    }

    /// Digit at `place`.
    pub fn get(&self, place: Place) -> u32 {
        match place {
            Place::Units => self.units,
            Place::Tens => self.tens,
            Place::Hundreds => self.hundreds,
            Place::Thousands => self.thousands,
        }
    }
}

/// Multiplicand digits for the stamp game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StampGameDigits {
    pub hundreds: u32,
    pub tens: u32,
    pub units: u32,
}

impl StampGameDigits {
    /// The number these digits spell.
    pub fn value(&self) -> u32 {
        self.hundreds * 100 + self.tens * 10 + self.units
    }

    /// Digit at `place` (zero above hundreds).
    pub fn get(&self, place: Place) -> u32 {
        match place {
            Place::Units => self.units,
            Place::Tens => self.tens,
            Place::Hundreds => self.hundreds,
            Place::Thousands => 0,
        }
    }
}

/// A solved golden-bead problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldenBeadScenario {
    pub seed: u32,
    pub multiplicand: u32,
    pub multiplier: u32,
    pub digits: GoldenBeadDigits,
    pub units: PlaceTally,
    pub tens: PlaceTally,
    pub hundreds: PlaceTally,
    pub thousands: PlaceTally,
    pub product: u32,
}

impl GoldenBeadScenario {
    /// Run the exchange procedure over `digits`, units first.
    pub fn solve(seed: u32, digits: GoldenBeadDigits, multiplier: u32) -> Self {
        let units = PlaceTally::compute(digits.units, multiplier, 0);
        let tens = PlaceTally::compute(digits.tens, multiplier, units.carry);
        let hundreds = PlaceTally::compute(digits.hundreds, multiplier, tens.carry);
        let thousands = PlaceTally::compute(digits.thousands, multiplier, hundreds.carry);
        let multiplicand = digits.value();

        Self {
            seed,
            multiplicand,
            multiplier,
            digits,
            units,
            tens,
            hundreds,
            thousands,
            product: multiplicand * multiplier,
        }
    }

    /// Tally at `place`.
    pub fn tally(&self, place: Place) -> PlaceTally {
        match place {
            Place::Units => self.units,
            Place::Tens => self.tens,
            Place::Hundreds => self.hundreds,
            Place::Thousands => self.thousands,
        }
    }

    /// Every place, units first.
    pub fn columns(&self) -> Vec<Column> {
        collect_columns(Place::Thousands, |p| self.digits.get(p), |p| self.tally(p))
    }
}

/// A solved stamp-game problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampGameScenario {
    pub seed: u32,
    pub multiplicand: u32,
    pub multiplier: u32,
    pub digits: StampGameDigits,
    pub units: PlaceTally,
    pub tens: PlaceTally,
    pub hundreds: PlaceTally,
    pub product: u32,
}

impl StampGameScenario {
    /// Run the exchange procedure over `digits`, units first.
    pub fn solve(seed: u32, digits: StampGameDigits, multiplier: u32) -> Self {
        let units = PlaceTally::compute(digits.units, multiplier, 0);
        let tens = PlaceTally::compute(digits.tens, multiplier, units.carry);
        let hundreds = PlaceTally::compute(digits.hundreds, multiplier, tens.carry);
        let multiplicand = digits.value();

        Self {
            seed,
            multiplicand,
            multiplier,
            digits,
            units,
            tens,
            hundreds,
            product: multiplicand * multiplier,
        }
    }

    /// Tally at `place` (empty above hundreds).
    pub fn tally(&self, place: Place) -> PlaceTally {
        match place {
            Place::Units => self.units,
            Place::Tens => self.tens,
            Place::Hundreds => self.hundreds,
            Place::Thousands => PlaceTally::default(),
        }
    }

    /// Every place, units first.
    pub fn columns(&self) -> Vec<Column> {
        collect_columns(Place::Hundreds, |p| self.digits.get(p), |p| self.tally(p))
    }
}

/// A solved problem for one of the manipulative kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Scenario {
    GoldenBeads(GoldenBeadScenario),
    StampGame(StampGameScenario),
}

impl Scenario {
    /// Solve a golden-bead problem from fixed digits.
    pub fn golden_beads_from_digits(seed: u32, digits: GoldenBeadDigits, multiplier: u32) -> Self {
        Self::GoldenBeads(GoldenBeadScenario::solve(seed, digits, multiplier))
    }

    /// Solve a stamp-game problem from fixed digits.
    pub fn stamp_game_from_digits(seed: u32, digits: StampGameDigits, multiplier: u32) -> Self {
        Self::StampGame(StampGameScenario::solve(seed, digits, multiplier))
    }

    pub fn kind(&self) -> ManipulativeKind {
        match self {
            Self::GoldenBeads(_) => ManipulativeKind::GoldenBeads,
            Self::StampGame(_) => ManipulativeKind::StampGame,
        }
    }

    pub fn seed(&self) -> u32 {
        match self {
            Self::GoldenBeads(s) => s.seed,
            Self::StampGame(s) => s.seed,
        }
    }

    pub fn multiplicand(&self) -> u32 {
        match self {
            Self::GoldenBeads(s) => s.multiplicand,
            Self::StampGame(s) => s.multiplicand,
        }
    }

    pub fn multiplier(&self) -> u32 {
        match self {
            Self::GoldenBeads(s) => s.multiplier,
            Self::StampGame(s) => s.multiplier,
        }
    }

    pub fn product(&self) -> u32 {
        match self {
            Self::GoldenBeads(s) => s.product,
            Self::StampGame(s) => s.product,
        }
    }

    pub fn as_golden_beads(&self) -> Option<&GoldenBeadScenario> {
        match self {
            Self::GoldenBeads(s) => Some(s),
            Self::StampGame(_) => None,
        }
    }

    pub fn as_stamp_game(&self) -> Option<&StampGameScenario> {
        match self {
            Self::StampGame(s) => Some(s),
            Self::GoldenBeads(_) => None,
        }
    }

    /// Multiplicand digit at `place`.
    pub fn digit(&self, place: Place) -> u32 {
        match self {
            Self::GoldenBeads(s) => s.digits.get(place),
            Self::StampGame(s) => s.digits.get(place),
        }
    }

    /// Every place of the scenario, units first.
    pub fn columns(&self) -> Vec<Column> {
        match self {
            Self::GoldenBeads(s) => s.columns(),
            Self::StampGame(s) => s.columns(),
        }
    }

    /// The column at `place`, if the kind has that place.
    pub fn column(&self, place: Place) -> Option<Column> {
        self.columns().into_iter().find(|c| c.place == place)
    }

    /// Digits of the product from highest place to lowest, as the learner
    /// stacks them. Leading zeros are kept so the stack always spans every
    /// place of the kind.
    pub fn product_digits(&self) -> Vec<u32> {
        self.columns()
            .iter()
            .rev()
            .map(|c| c.tally.remainder)
            .collect()
    }

    /// At least one place hands a carry to the next.
    pub fn exercises_exchange(&self) -> bool {
        self.columns().iter().any(|c| c.tally.carry > 0)
    }

    /// The top place produces no carry, so the product fits the material.
    pub fn fits_width(&self) -> bool {
        self.columns().last().is_some_and(|c| c.tally.carry == 0)
    }

    /// Short stored reference from which this scenario can be regenerated.
    pub fn reference(&self) -> ScenarioRef {
        ScenarioRef {
            kind: self.kind(),
            seed: self.seed(),
        }
    }
}

/// Stored `{kind, seed}` pointer to a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRef {
    pub kind: ManipulativeKind,
    pub seed: u32,
}

impl ScenarioRef {
    pub fn new(kind: ManipulativeKind, seed: u32) -> Self {
        Self { kind, seed }
    }

    /// Regenerate the referenced scenario.
    pub fn resolve(&self, config: &GeneratorConfig) -> Result<Scenario> {
        ScenarioGenerator::new(config.clone()).generate(self.kind, Some(self.seed))
    }
}
