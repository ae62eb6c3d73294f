//! Declarative presentation actions.
//!
//! An [`Action`] is a flat, serialisable record describing one visible change
//! to the stage. Actions carry data only; the interpreter decides what each
//! one does to the stage state.

use serde::{Deserialize, Serialize};

use crate::scenario::Place;

/// Where a number card is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardPosition {
    /// Appended to the multiplicand card stack.
    Multiplicand,
    /// Replaces the multiplier card.
    Multiplier,
    /// Appended to the paper notes.
    Paper,
}

/// What a highlight points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightTarget {
    Place(Place),
    Tray(usize),
    MultiplierCard,
    Product,
}

/// One digit of the final stacked result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedDigit {
    pub place: Place,
    pub digit: u32,
}

/// The mutation an action performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionKind {
    /// Replace the narration line.
    Narrate { text: String },
    /// Show a number card at `position`.
    ShowCard { value: String, position: CardPosition },
    /// Set the bead count of one place in a tray.
    PlaceBeads { tray: usize, place: Place, count: u32 },
    /// Set the stamp count of one place in a stamp column.
    ShowStamp { column: usize, place: Place, count: u32 },
    /// Lay out `copies` trays identical to the first one.
    DuplicateTray { copies: u32 },
    /// Draw the line separating the copies from the answer area.
    PlaceDivider,
    /// Gather every tray's material of `place` below the line.
    MoveBeadsBelowLine { place: Place },
    /// Announce how much of `place` lies below the line.
    CountTotal { place: Place, total: u32 },
    /// Group the material of `place` into `groups` bundles of `quantity`.
    GroupForExchange { place: Place, groups: u32, quantity: u32 },
    /// Trade bead groups of `from` for single beads of `to`.
    ExchangeBeads {
        from: Place,
        to: Place,
        quantity: u32,
        remainder: u32,
    },
    /// Trade stamp groups of `from` for single stamps of `to`.
    Exchange {
        from: Place,
        to: Place,
        quantity: u32,
        remainder: u32,
    },
    /// Lay the result card for `place` under the line.
    PlaceResultCard { place: Place, digit: u32 },
    /// Stack the result cards, highest place first.
    StackPlaceValues { digits: Vec<StackedDigit> },
    /// Write the final answer on paper.
    WriteResult { value: String },
    /// Point at something, or clear the highlight.
    Highlight { target: Option<HighlightTarget> },
}

impl ActionKind {
    /// Wire tag of the variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Narrate { .. } => "narrate",
            Self::ShowCard { .. } => "showCard",
            Self::PlaceBeads { .. } => "placeBeads",
            Self::ShowStamp { .. } => "showStamp",
            Self::DuplicateTray { .. } => "duplicateTray",
            Self::PlaceDivider => "placeDivider",
            Self::MoveBeadsBelowLine { .. } => "moveBeadsBelowLine",
            Self::CountTotal { .. } => "countTotal",
            Self::GroupForExchange { .. } => "groupForExchange",
            Self::ExchangeBeads { .. } => "exchangeBeads",
            Self::Exchange { .. } => "exchange",
            Self::PlaceResultCard { .. } => "placeResultCard",
            Self::StackPlaceValues { .. } => "stackPlaceValues",
            Self::WriteResult { .. } => "writeResult",
            Self::Highlight { .. } => "highlight",
        }
    }
}

/// A positioned action: `<script_id>-<ordinal>` plus its mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl Action {
    pub fn new(id: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Narration text, if this is a narrate action.
    pub fn narration(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Narrate { text } => Some(text),
            _ => None,
        }
    }
}

/// An ordered, read-only sequence of actions for one presentation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: String,
    pub actions: Vec<Action>,
}

impl Script {
    pub fn new(id: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            id: id.into(),
            actions,
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Index of the last action, or `None` for an empty script.
    pub fn last_index(&self) -> Option<usize> {
        self.actions.len().checked_sub(1)
    }
}
