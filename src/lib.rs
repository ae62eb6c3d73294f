//! montessori-mult: multiplication lessons with Montessori manipulatives.
//!
//! This crate models golden-bead and stamp-game multiplication as data:
//! - Seeded scenario generation that always exercises an exchange
//! - Compilation of a scenario into a narrated presentation script
//! - Seekable replay of scripts into a stage view model
//! - Pass/fail evaluation of guided build-along steps
//! - A playback state machine sequencing lesson segments

pub mod config;
pub mod error;

pub mod guided;
pub mod lesson;
pub mod playback;
pub mod practice;
pub mod presentation;
pub mod scenario;
pub mod script;

pub use config::{GeneratorConfig, LessonConfig, PresentationConfig};
pub use error::{Error, Result};
pub use guided::{EvaluatorId, GuidedSession, WorkspaceSnapshot, evaluate};
pub use lesson::{LessonDocument, LessonObserver, LessonPlayer, Segment};
pub use playback::{PlaybackContext, PlaybackController, PlaybackEvent, PlaybackStatus};
pub use practice::{PracticeQuestion, PracticeSession, build_practice_set};
pub use presentation::{PresentationInterpreter, StageState, replay};
pub use scenario::{ManipulativeKind, Place, Scenario, ScenarioGenerator, ScenarioRef};
pub use script::{Action, ActionKind, Script, compile};
