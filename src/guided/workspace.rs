//! Learner workspace during the guided phase.

use serde::{Deserialize, Serialize};

use crate::scenario::Place;

/// Flat counters describing what the learner has built so far.
///
/// Exchange fields are named after the place they leave and the place the
/// carry goes to, matching how the guided steps phrase them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceSnapshot {
    pub base_thousands: u32,
    pub base_hundreds: u32,
    pub base_tens: u32,
    pub base_units: u32,
    /// Trays (golden beads) or columns (stamp game) laid out.
    pub copies: u32,
    pub unit_remainder: u32,
    pub unit_carry_to_tens: u32,
    pub tens_remainder: u32,
    pub tens_carry_to_hundreds: u32,
    pub hundreds_remainder: u32,
    pub hundreds_carry_to_thousands: u32,
    /// Result digits stacked so far, highest place first.
    pub final_stack: Vec<u32>,
}

impl WorkspaceSnapshot {
    /// Base digit placed at `place`.
    pub fn base(&self, place: Place) -> u32 {
        match place {
            Place::Units => self.base_units,
            Place::Tens => self.base_tens,
            Place::Hundreds => self.base_hundreds,
            Place::Thousands => self.base_thousands,
        }
    }

    /// Set the base material count at `place`.
    pub fn place_base(&mut self, place: Place, count: u32) {
        match place {
            Place::Units => self.base_units = count,
            Place::Tens => self.base_tens = count,
            Place::Hundreds => self.base_hundreds = count,
            Place::Thousands => self.base_thousands = count,
        }
    }

    /// Lay out one more copy of the base.
    pub fn add_copy(&mut self) {
        self.copies += 1;
    }

    /// Take one copy away.
    pub fn remove_copy(&mut self) {
        self.copies = self.copies.saturating_sub(1);
    }

    /// Record the learner's exchange of `place`. Thousands has no exchange
    /// and is ignored.
    pub fn record_exchange(&mut self, place: Place, remainder: u32, carry: u32) {
        match place {
            Place::Units => {
                self.unit_remainder = remainder;
                self.unit_carry_to_tens = carry;
            }
            Place::Tens => {
                self.tens_remainder = remainder;
                self.tens_carry_to_hundreds = carry;
            }
            Place::Hundreds => {
                self.hundreds_remainder = remainder;
                self.hundreds_carry_to_thousands = carry;
            }
            Place::Thousands => {}
        }
    }

    /// `(remainder, carry)` entered for `place`.
    pub fn exchange(&self, place: Place) -> Option<(u32, u32)> {
        match place {
            Place::Units => Some((self.unit_remainder, self.unit_carry_to_tens)),
            Place::Tens => Some((self.tens_remainder, self.tens_carry_to_hundreds)),
            Place::Hundreds => Some((self.hundreds_remainder, self.hundreds_carry_to_thousands)),
            Place::Thousands => None,
        }
    }

    pub fn push_stack_digit(&mut self, digit: u32) {
        self.final_stack.push(digit);
    }

    pub fn clear_stack(&mut self) {
        self.final_stack.clear();
    }
}
