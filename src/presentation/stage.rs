//! Stage state: the view model derived by folding actions.
//!
//! [`StageState`] is never edited by callers. The only way to change it is
//! [`StageState::apply`], and the state after `n` actions is always the fold
//! of those `n` actions over [`StageState::default`].

use serde::Serialize;
use tracing::{trace, warn};

use crate::scenario::Place;
use crate::script::{Action, ActionKind, CardPosition, HighlightTarget, StackedDigit};

/// Upper bound on trays (or stamp columns) a stage holds. Actions addressing
/// or creating more are skipped.
pub const MAX_TRAYS: usize = 64;

/// Material counts per place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlaceCounts([u32; 4]);

impl PlaceCounts {
    pub fn get(&self, place: Place) -> u32 {
        self.0[place.index()]
    }

    pub fn set(&mut self, place: Place, count: u32) {
        self.0[place.index()] = count;
    }

    pub fn add(&mut self, place: Place, count: u32) {
        let slot = &mut self.0[place.index()];
        *slot = slot.saturating_add(count);
    }

    /// Number represented by the counts.
    pub fn value(&self) -> u32 {
        Place::ALL.iter().fold(0u32, |total, p| {
            total.saturating_add(self.get(*p).saturating_mul(p.value()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| *c == 0)
    }
}

/// A total announced for one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountedTotal {
    pub place: Place,
    pub total: u32,
}

/// Material of one place bundled for exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grouping {
    pub place: Place,
    pub groups: u32,
    pub quantity: u32,
}

/// A completed exchange, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExchangeRecord {
    pub from: Place,
    pub to: Place,
    /// What stayed in `from`.
    pub remainder: u32,
    /// Single pieces added to `to`.
    pub carry: u32,
}

/// Everything visible on the presentation stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StageState {
    /// Current narration line.
    pub narration: Option<String>,
    /// Multiplicand cards, in the order shown.
    pub multiplicand_cards: Vec<String>,
    /// Multiplier card.
    pub multiplier_card: Option<String>,
    /// Notes written on paper.
    pub paper_notes: Vec<String>,
    /// Bead trays or stamp columns above the line.
    pub trays: Vec<PlaceCounts>,
    /// Whether the separating line has been drawn.
    pub divider: bool,
    /// Material gathered below the line (the exchange board).
    pub below_line: PlaceCounts,
    /// Last announced count.
    pub counted: Option<CountedTotal>,
    /// Pending exchange grouping.
    pub grouping: Option<Grouping>,
    /// Exchanges performed so far, in order.
    pub exchanges: Vec<ExchangeRecord>,
    /// Result card per place.
    pub result_cards: [Option<u32>; 4],
    /// Final digits in presentation order.
    pub digit_stack: Vec<StackedDigit>,
    /// Written product.
    pub product: Option<String>,
    /// Highlighted element.
    pub highlight: Option<HighlightTarget>,
}

impl StageState {
    /// Apply one action.
    pub fn apply(&mut self, action: &Action) {
        trace!(id = %action.id, kind = action.kind.tag(), "apply action");
        self.apply_kind(&action.kind);
    }

    fn apply_kind(&mut self, kind: &ActionKind) {
        match kind {
            ActionKind::Narrate { text } => {
                self.narration = Some(text.clone());
            }
            ActionKind::ShowCard { value, position } => match position {
                CardPosition::Multiplicand => self.multiplicand_cards.push(value.clone()),
                CardPosition::Multiplier => self.multiplier_card = Some(value.clone()),
                CardPosition::Paper => self.paper_notes.push(value.clone()),
            },
            ActionKind::PlaceBeads { tray, place, count } => {
                self.set_tray_count(*tray, *place, *count);
            }
            ActionKind::ShowStamp {
                column,
                place,
                count,
            } => {
                self.set_tray_count(*column, *place, *count);
            }
            ActionKind::DuplicateTray { copies } => {
                if *copies as usize > MAX_TRAYS {
                    warn!(copies = *copies, max = MAX_TRAYS, "skipping duplicate beyond tray limit");
                    return;
                }
                let first = self.trays.first().copied().unwrap_or_default();
                self.trays = vec![first; *copies as usize];
            }
            ActionKind::PlaceDivider => {
                self.divider = true;
            }
            ActionKind::MoveBeadsBelowLine { place } => {
                let mut gathered = 0;
                for tray in &mut self.trays {
                    gathered = tray.get(*place).saturating_add(gathered);
                    tray.set(*place, 0);
                }
                self.below_line.add(*place, gathered);
            }
            ActionKind::CountTotal { place, total } => {
                self.counted = Some(CountedTotal {
                    place: *place,
                    total: *total,
                });
            }
            ActionKind::GroupForExchange {
                place,
                groups,
                quantity,
            } => {
                self.grouping = Some(Grouping {
                    place: *place,
                    groups: *groups,
                    quantity: *quantity,
                });
            }
            ActionKind::ExchangeBeads {
                from,
                to,
                quantity,
                remainder,
            }
            | ActionKind::Exchange {
                from,
                to,
                quantity,
                remainder,
            } => {
                self.exchange(*from, *to, *quantity, *remainder);
            }
            ActionKind::PlaceResultCard { place, digit } => {
                self.result_cards[place.index()] = Some(*digit);
            }
            ActionKind::StackPlaceValues { digits } => {
                self.digit_stack = digits.clone();
            }
            ActionKind::WriteResult { value } => {
                if is_numeric(value) {
                    self.product = Some(value.clone());
                } else {
                    trace!(%value, "ignoring non-numeric result");
                }
            }
            ActionKind::Highlight { target } => {
                self.highlight = *target;
            }
        }
    }

    fn set_tray_count(&mut self, tray: usize, place: Place, count: u32) {
        if tray >= MAX_TRAYS {
            warn!(tray, max = MAX_TRAYS, "skipping tray beyond tray limit");
            return;
        }
        if self.trays.len() <= tray {
            self.trays.resize(tray + 1, PlaceCounts::default());
        }
        self.trays[tray].set(place, count);
    }

    fn exchange(&mut self, from: Place, to: Place, quantity: u32, remainder: u32) {
        let prior_total = self.below_line.get(from);
        let carried = prior_total
            .saturating_sub(remainder)
            .checked_div(quantity)
            .unwrap_or(0);

        self.below_line
            .set(from, prior_total.saturating_sub(carried.saturating_mul(quantity)));
        self.below_line.add(to, carried);
        self.grouping = None;
        self.exchanges.push(ExchangeRecord {
            from,
            to,
            remainder: self.below_line.get(from),
            carry: carried,
        });
    }

    /// Result card at `place`.
    pub fn result_card(&self, place: Place) -> Option<u32> {
        self.result_cards[place.index()]
    }

    /// Whether nothing has been applied (or nothing visible happened).
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(kind: ActionKind) -> Action {
        Action::new("t-0", kind)
    }

    #[test]
    fn test_place_beads_creates_trays_on_demand() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::PlaceBeads {
            tray: 2,
            place: Place::Tens,
            count: 4,
        }));
        assert_eq!(stage.trays.len(), 3);
        assert_eq!(stage.trays[2].get(Place::Tens), 4);
        assert!(stage.trays[0].is_empty());
    }

    #[test]
    fn test_duplicate_without_trays_creates_empty_copies() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::DuplicateTray { copies: 3 }));
        assert_eq!(stage.trays, vec![PlaceCounts::default(); 3]);
    }

    #[test]
    fn test_duplicate_copies_first_tray() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::ShowStamp {
            column: 0,
            place: Place::Units,
            count: 7,
        }));
        stage.apply(&act(ActionKind::DuplicateTray { copies: 2 }));
        assert_eq!(stage.trays.len(), 2);
        assert_eq!(stage.trays[1].get(Place::Units), 7);
    }

    #[test]
    fn test_move_and_exchange() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::PlaceBeads {
            tray: 0,
            place: Place::Units,
            count: 4,
        }));
        stage.apply(&act(ActionKind::DuplicateTray { copies: 3 }));
        stage.apply(&act(ActionKind::MoveBeadsBelowLine { place: Place::Units }));
        assert_eq!(stage.below_line.get(Place::Units), 12);
        assert!(stage.trays.iter().all(|t| t.get(Place::Units) == 0));

        stage.apply(&act(ActionKind::ExchangeBeads {
            from: Place::Units,
            to: Place::Tens,
            quantity: 10,
            remainder: 2,
        }));
        assert_eq!(stage.below_line.get(Place::Units), 2);
        assert_eq!(stage.below_line.get(Place::Tens), 1);
        assert_eq!(
            stage.exchanges,
            vec![ExchangeRecord {
                from: Place::Units,
                to: Place::Tens,
                remainder: 2,
                carry: 1,
            }]
        );
    }

    #[test]
    fn test_exchange_with_zero_quantity_moves_nothing() {
        let mut stage = StageState::default();
        stage.below_line.set(Place::Units, 12);
        stage.apply(&act(ActionKind::Exchange {
            from: Place::Units,
            to: Place::Tens,
            quantity: 0,
            remainder: 2,
        }));
        assert_eq!(stage.below_line.get(Place::Units), 12);
        assert_eq!(stage.below_line.get(Place::Tens), 0);
    }

    #[test]
    fn test_write_result_requires_digits() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::WriteResult {
            value: "seven thousand".into(),
        }));
        assert_eq!(stage.product, None);

        stage.apply(&act(ActionKind::WriteResult {
            value: "7032".into(),
        }));
        assert_eq!(stage.product.as_deref(), Some("7032"));
    }

    #[test]
    fn test_show_card_positions() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::ShowCard {
            value: "2000".into(),
            position: CardPosition::Multiplicand,
        }));
        stage.apply(&act(ActionKind::ShowCard {
            value: "3".into(),
            position: CardPosition::Multiplier,
        }));
        stage.apply(&act(ActionKind::ShowCard {
            value: "2344 × 3".into(),
            position: CardPosition::Paper,
        }));
        assert_eq!(stage.multiplicand_cards, vec!["2000"]);
        assert_eq!(stage.multiplier_card.as_deref(), Some("3"));
        assert_eq!(stage.paper_notes, vec!["2344 × 3"]);
    }

    #[test]
    fn test_huge_counts_saturate_when_gathered() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::PlaceBeads {
            tray: 0,
            place: Place::Units,
            count: u32::MAX,
        }));
        stage.apply(&act(ActionKind::DuplicateTray { copies: 2 }));
        stage.apply(&act(ActionKind::MoveBeadsBelowLine { place: Place::Units }));
        assert_eq!(stage.below_line.get(Place::Units), u32::MAX);

        stage.apply(&act(ActionKind::MoveBeadsBelowLine { place: Place::Units }));
        assert_eq!(stage.below_line.get(Place::Units), u32::MAX);
        assert_eq!(stage.below_line.value(), u32::MAX);
    }

    #[test]
    fn test_exchange_carry_saturates_destination() {
        let mut stage = StageState::default();
        stage.below_line.set(Place::Units, 25);
        stage.below_line.set(Place::Tens, u32::MAX);
        stage.apply(&act(ActionKind::Exchange {
            from: Place::Units,
            to: Place::Tens,
            quantity: 10,
            remainder: 5,
        }));
        assert_eq!(stage.below_line.get(Place::Units), 5);
        assert_eq!(stage.below_line.get(Place::Tens), u32::MAX);
    }

    #[test]
    fn test_tray_index_beyond_limit_is_skipped() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::PlaceBeads {
            tray: usize::MAX,
            place: Place::Units,
            count: 3,
        }));
        stage.apply(&act(ActionKind::ShowStamp {
            column: MAX_TRAYS,
            place: Place::Tens,
            count: 1,
        }));
        assert!(stage.trays.is_empty());

        stage.apply(&act(ActionKind::PlaceBeads {
            tray: MAX_TRAYS - 1,
            place: Place::Units,
            count: 3,
        }));
        assert_eq!(stage.trays.len(), MAX_TRAYS);
    }

    #[test]
    fn test_duplicate_beyond_limit_is_skipped() {
        let mut stage = StageState::default();
        stage.apply(&act(ActionKind::PlaceBeads {
            tray: 0,
            place: Place::Units,
            count: 4,
        }));
        stage.apply(&act(ActionKind::DuplicateTray { copies: u32::MAX }));
        assert_eq!(stage.trays.len(), 1);

        stage.apply(&act(ActionKind::DuplicateTray {
            copies: MAX_TRAYS as u32,
        }));
        assert_eq!(stage.trays.len(), MAX_TRAYS);
    }

    #[test]
    fn test_place_counts_value() {
        let mut counts = PlaceCounts::default();
        counts.set(Place::Thousands, 7);
        counts.set(Place::Tens, 3);
        counts.set(Place::Units, 2);
        assert_eq!(counts.value(), 7032);
    }
}
