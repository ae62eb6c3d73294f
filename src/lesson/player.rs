//! Runs a lesson document segment by segment.
//!
//! The [`PlaybackController`] owns the segment index and status; the player
//! keeps one runtime for the active segment and rebuilds it whenever the
//! index moves.

use std::time::Instant;

use tracing::{info, warn};

use super::document::{LessonDocument, Segment};
use super::observer::{LessonObserver, SilentObserver};
use crate::config::LessonConfig;
use crate::error::Result;
use crate::guided::{GuidedSession, StepOutcome, WorkspaceSnapshot, guided_steps};
use crate::playback::{PlaybackContext, PlaybackController, PlaybackEvent, PlaybackStatus};
use crate::practice::{PracticeSession, build_practice_set};
use crate::presentation::{AutoplayEvent, PresentationInterpreter};
use crate::scenario::{Scenario, ScenarioGenerator, ScenarioRef};
use crate::script::{Script, compile_with_id};

/// State of a guided segment.
#[derive(Debug, Clone)]
pub struct GuidedRuntime {
    pub session: GuidedSession,
    /// `None` when the segment has no usable scenario; every step then fails.
    pub scenario: Option<Scenario>,
    pub workspace: WorkspaceSnapshot,
}

/// Runtime of the active segment.
#[derive(Debug, Clone)]
pub enum SegmentRuntime {
    Presentation(PresentationInterpreter),
    Guided(GuidedRuntime),
    Practice(PracticeSession),
}

fn resolve_logged(reference: ScenarioRef, config: &LessonConfig) -> Option<Scenario> {
    match reference.resolve(&config.generator) {
        Ok(scenario) => Some(scenario),
        Err(e) => {
            warn!(kind = %reference.kind, seed = reference.seed, error = %e, "scenario unavailable");
            None
        }
    }
}

fn build_runtime(segment: Option<&Segment>, config: &LessonConfig) -> SegmentRuntime {
    match segment {
        None => SegmentRuntime::Presentation(PresentationInterpreter::empty()),
        Some(Segment::Presentation {
            script_id, script, ..
        }) => {
            let script = Script::new(script_id.clone(), script.clone());
            let mut interpreter = PresentationInterpreter::with_config(script, &config.presentation);
            interpreter.seek(0);
            SegmentRuntime::Presentation(interpreter)
        }
        Some(Segment::Guided {
            scenario, steps, ..
        }) => {
            let steps = match (steps.is_empty(), scenario) {
                (true, Some(reference)) => guided_steps(reference.kind),
                _ => steps.clone(),
            };
            if steps.is_empty() {
                warn!("guided segment has no steps; only NEXT leaves it");
            }
            SegmentRuntime::Guided(GuidedRuntime {
                session: GuidedSession::new(steps),
                scenario: scenario.and_then(|r| resolve_logged(r, config)),
                workspace: WorkspaceSnapshot::default(),
            })
        }
        Some(Segment::Practice {
            scenario,
            scenarios,
            ..
        }) => {
            let questions = match scenario {
                Some(r) => build_practice_set(r.kind, r.seed, *scenarios, &config.generator)
                    .unwrap_or_else(|e| {
                        warn!(kind = %r.kind, seed = r.seed, error = %e, "practice set unavailable");
                        Vec::new()
                    }),
                None => Vec::new(),
            };
            if questions.is_empty() {
                warn!("practice segment has no questions; only NEXT leaves it");
            }
            SegmentRuntime::Practice(PracticeSession::new(questions))
        }
    }
}

/// Drives a [`LessonDocument`] through playback.
pub struct LessonPlayer<O: LessonObserver = SilentObserver> {
    document: LessonDocument,
    config: LessonConfig,
    playback: PlaybackController,
    runtime: SegmentRuntime,
    observer: O,
}

impl LessonPlayer {
    /// Create a player without an observer.
    pub fn new(document: LessonDocument, config: LessonConfig) -> Self {
        Self::with_observer(document, config, SilentObserver)
    }
}

impl<O: LessonObserver> LessonPlayer<O> {
    /// Create a player, idle on the first segment.
    pub fn with_observer(document: LessonDocument, config: LessonConfig, observer: O) -> Self {
        let playback = PlaybackController::new(document.len());
        let runtime = build_runtime(document.segments.first(), &config);
        let mut player = Self {
            document,
            config,
            playback,
            runtime,
            observer,
        };
        player.start_segment(0);
        player
    }

    // ========== Getters ==========

    pub fn document(&self) -> &LessonDocument {
        &self.document
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    pub fn context(&self) -> PlaybackContext {
        self.playback.context()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.playback.status()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        self.document.segments.get(self.playback.index())
    }

    pub fn runtime(&self) -> &SegmentRuntime {
        &self.runtime
    }

    pub fn interpreter(&self) -> Option<&PresentationInterpreter> {
        match &self.runtime {
            SegmentRuntime::Presentation(interpreter) => Some(interpreter),
            _ => None,
        }
    }

    /// Manual stepping through the active presentation.
    pub fn interpreter_mut(&mut self) -> Option<&mut PresentationInterpreter> {
        match &mut self.runtime {
            SegmentRuntime::Presentation(interpreter) => Some(interpreter),
            _ => None,
        }
    }

    pub fn guided(&self) -> Option<&GuidedRuntime> {
        match &self.runtime {
            SegmentRuntime::Guided(guided) => Some(guided),
            _ => None,
        }
    }

    /// The learner's workspace in a guided segment.
    pub fn workspace_mut(&mut self) -> Option<&mut WorkspaceSnapshot> {
        match &mut self.runtime {
            SegmentRuntime::Guided(guided) => Some(&mut guided.workspace),
            _ => None,
        }
    }

    pub fn practice(&self) -> Option<&PracticeSession> {
        match &self.runtime {
            SegmentRuntime::Practice(session) => Some(session),
            _ => None,
        }
    }

    // ========== Playback ==========

    /// Forward a playback event and follow the resulting segment.
    pub fn send(&mut self, event: PlaybackEvent, now: Instant) -> PlaybackContext {
        let before = self.playback.context();
        let after = self.playback.send(event);

        if after.index != before.index {
            self.end_segment(before.index);
            self.reload_runtime();
            self.start_segment(after.index);
        } else if event == PlaybackEvent::Stop {
            self.reload_runtime();
        } else if after.status == PlaybackStatus::Finished && before.status != PlaybackStatus::Finished {
            self.end_segment(after.index);
            info!(lesson = %self.document.id, "lesson finished");
        }

        if let SegmentRuntime::Presentation(interpreter) = &mut self.runtime {
            interpreter.sync_playback(after.status, now);
        }
        after
    }

    /// Drive presentation autoplay. A completed presentation sends
    /// `COMPLETE` to the controller.
    pub fn tick(&mut self, now: Instant) -> Option<AutoplayEvent> {
        if self.document.is_empty() {
            return None;
        }
        let SegmentRuntime::Presentation(interpreter) = &mut self.runtime else {
            return None;
        };
        let event = interpreter.tick(now)?;
        if let AutoplayEvent::SegmentComplete { .. } = event {
            self.send(PlaybackEvent::Complete, now);
        }
        Some(event)
    }

    // ========== Learner input ==========

    /// Submit the workspace for the current guided step.
    ///
    /// Returns `None` outside a guided segment.
    pub fn submit_guided(&mut self, now: Instant) -> Option<StepOutcome> {
        let SegmentRuntime::Guided(guided) = &mut self.runtime else {
            return None;
        };
        let index = guided.session.current_index();
        let step_id = guided.session.current_step().map(|step| step.id.clone());
        let outcome = guided.session.submit(&guided.workspace, guided.scenario.as_ref());
        let attempts = guided.session.attempts(index);

        if let Some(step_id) = step_id {
            let passed = !matches!(outcome, StepOutcome::Retry { .. });
            self.observer.on_guided_result(&step_id, passed, attempts);
        }
        if outcome == StepOutcome::Completed {
            self.finish_segment(now);
        }
        Some(outcome)
    }

    /// Answer practice question `index`. Returns `None` outside a practice
    /// segment or for an unknown question.
    pub fn answer_practice(&mut self, index: usize, input: &str, now: Instant) -> Option<bool> {
        let SegmentRuntime::Practice(session) = &mut self.runtime else {
            return None;
        };
        let correct = session.answer(index, input)?;
        let question_id = session.questions()[index].id.clone();
        let complete = session.is_complete();

        self.observer.on_practice_answer(&question_id, correct);
        if complete {
            self.finish_segment(now);
        }
        Some(correct)
    }

    /// Regenerate the active segment on a fresh random seed.
    pub fn try_again(&mut self, now: Instant) -> Result<()> {
        self.try_again_with_seed(ScenarioGenerator::random_seed(), now)
    }

    /// Regenerate the active segment on `seed`.
    ///
    /// Segments without a scenario reference are only restarted.
    pub fn try_again_with_seed(&mut self, seed: u32, now: Instant) -> Result<()> {
        let index = self.playback.index();
        let generator = &self.config.generator;
        let Some(segment) = self.document.segments.get_mut(index) else {
            return Ok(());
        };

        match segment {
            Segment::Presentation {
                script_id,
                script,
                scenario: Some(reference),
                ..
            } => {
                let fresh = ScenarioRef::new(reference.kind, seed).resolve(generator)?;
                *script = compile_with_id(&fresh, script_id).actions;
                *reference = fresh.reference();
            }
            Segment::Guided {
                scenario: Some(reference),
                ..
            }
            | Segment::Practice {
                scenario: Some(reference),
                ..
            } => {
                // Fail before touching the document if the seed is unusable.
                let fresh = ScenarioRef::new(reference.kind, seed).resolve(generator)?;
                *reference = fresh.reference();
            }
            _ => {}
        }
        info!(index, seed, segment = segment.id(), "segment regenerated");

        self.reload_runtime();
        if let SegmentRuntime::Presentation(interpreter) = &mut self.runtime {
            interpreter.sync_playback(self.playback.status(), now);
        }
        Ok(())
    }

    // ========== Internals ==========

    fn reload_runtime(&mut self) {
        self.runtime = build_runtime(self.current_segment(), &self.config);
    }

    /// Guided and practice segments finish on learner input, whatever the
    /// playback status.
    fn finish_segment(&mut self, now: Instant) {
        if self.playback.status() != PlaybackStatus::Playing {
            self.send(PlaybackEvent::Play, now);
        }
        self.send(PlaybackEvent::Complete, now);
    }

    fn start_segment(&mut self, index: usize) {
        if let Some(segment) = self.document.segments.get(index) {
            info!(index, segment = segment.id(), kind = segment.kind_name(), "segment started");
            self.observer.on_segment_start(index, segment);
        }
    }

    fn end_segment(&mut self, index: usize) {
        if let Some(segment) = self.document.segments.get(index) {
            info!(index, segment = segment.id(), "segment ended");
            self.observer.on_segment_end(index, segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::scenario::ManipulativeKind;

    fn player() -> LessonPlayer {
        let doc =
            LessonDocument::standard(ManipulativeKind::GoldenBeads, 5, &GeneratorConfig::default())
                .unwrap();
        LessonPlayer::new(doc, LessonConfig::default())
    }

    #[test]
    fn test_starts_on_first_action_of_presentation() {
        let player = player();
        let interpreter = player.interpreter().unwrap();
        assert_eq!(interpreter.cursor(), Some(0));
        assert!(!interpreter.is_playing());
    }

    #[test]
    fn test_next_loads_guided_runtime() {
        let mut player = player();
        player.send(PlaybackEvent::Next, Instant::now());
        let guided = player.guided().unwrap();
        assert!(guided.scenario.is_some());
        assert_eq!(guided.session.steps().len(), 5);
    }

    #[test]
    fn test_play_arms_and_pause_cancels_autoplay() {
        let mut player = player();
        let now = Instant::now();
        player.send(PlaybackEvent::Play, now);
        assert!(player.interpreter().unwrap().is_playing());
        player.send(PlaybackEvent::Pause, now);
        assert!(!player.interpreter().unwrap().is_playing());
    }

    #[test]
    fn test_try_again_replaces_practice_seed() {
        let mut player = player();
        let now = Instant::now();
        player.send(PlaybackEvent::SetIndex { index: 2 }, now);
        player.try_again_with_seed(1234, now).unwrap();
        assert_eq!(player.current_segment().unwrap().scenario().unwrap().seed, 1234);
        assert_eq!(player.practice().unwrap().questions()[0].scenario.seed, 1234);
    }
}
