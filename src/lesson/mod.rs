//! Lessons: persisted documents and the player that runs them.
//!
//! This module contains:
//! - LessonDocument and Segment, the JSON lesson format
//! - LessonPlayer, wiring playback to per-segment runtimes
//! - LessonObserver for progress notifications

pub mod document;
pub mod observer;
pub mod player;

pub use document::{DEFAULT_PRACTICE_SCENARIOS, LessonDocument, Segment};
pub use observer::{LessonObserver, SilentObserver};
pub use player::{GuidedRuntime, LessonPlayer, SegmentRuntime};
