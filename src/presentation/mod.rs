//! Presentation replay.
//!
//! This module contains:
//! - StageState, the view model folded from actions
//! - PresentationInterpreter, the seekable cursor with autoplay
//! - Text rendering of the stage for terminals

pub mod interpreter;
pub mod stage;
pub mod text;

pub use interpreter::{AutoplayEvent, PresentationInterpreter, replay};
pub use stage::{CountedTotal, ExchangeRecord, Grouping, PlaceCounts, StageState};
pub use text::render_stage;
