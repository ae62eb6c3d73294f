//! Guided build-along phase.
//!
//! This module contains:
//! - WorkspaceSnapshot, the learner's counters
//! - The ten fixed evaluators
//! - Guided steps and the linear retry-in-place session

pub mod evaluator;
pub mod steps;
pub mod workspace;

pub use evaluator::{EvaluatorId, evaluate};
pub use steps::{GuidedSession, GuidedStep, StepOutcome, guided_steps};
pub use workspace::WorkspaceSnapshot;
