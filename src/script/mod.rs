//! Presentation scripts.
//!
//! This module contains:
//! - Action and Script, the declarative wire records
//! - The compiler turning a scenario into a script

pub mod action;
pub mod compiler;

pub use action::{Action, ActionKind, CardPosition, HighlightTarget, Script, StackedDigit};
pub use compiler::{
    build_golden_bead_presentation_script, build_stamp_game_presentation_script, compile,
    compile_with_id,
};
