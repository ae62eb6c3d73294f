//! Cursor-driven replay of a presentation script.
//!
//! ## Seeking
//!
//! ```text
//! actions:  [0] [1] [2] [3] [4] [5] [6]
//!                        ▲ cursor (applied = 4)
//!
//! seek(6): apply [4] [5] [6] on top of the current stage
//! seek(1): most actions cannot be undone (an exchange forgets how much
//!          material it started with), so rebuild from the empty stage
//!          and apply [0] [1]
//! ```
//!
//! Either path yields `fold(StageState::default(), actions[..=target])`, so
//! the stage at an index never depends on how the cursor got there.
//!
//! ## Autoplay
//!
//! Autoplay is a deadline on a monotonic clock. The host loop calls
//! [`PresentationInterpreter::tick`] with the current instant; each expired
//! deadline advances the cursor by one and re-arms the timer. Arriving at the
//! last action raises [`AutoplayEvent::SegmentComplete`] once.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::stage::StageState;
use crate::config::PresentationConfig;
use crate::playback::PlaybackStatus;
use crate::script::{Action, Script};

/// Fold `script.actions[..=index]` over an empty stage.
///
/// `index` is clamped to the last action; an empty script gives an empty
/// stage.
pub fn replay(script: &Script, index: usize) -> StageState {
    let Some(last) = script.last_index() else {
        return StageState::default();
    };
    script.actions[..=index.min(last)]
        .iter()
        .fold(StageState::default(), |mut stage, action| {
            stage.apply(action);
            stage
        })
}

/// What an autoplay tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayEvent {
    /// The cursor moved to `index`.
    Advanced { index: usize },
    /// The cursor is on the last action; raised once per arrival.
    SegmentComplete { index: usize },
}

#[derive(Debug, Clone)]
struct AutoplayTimer {
    interval: Duration,
    deadline: Option<Instant>,
    completion_sent: bool,
}

/// Replays a script into a [`StageState`] at a movable cursor.
#[derive(Debug, Clone)]
pub struct PresentationInterpreter {
    script: Script,
    stage: StageState,
    /// Number of actions folded into `stage`.
    applied: usize,
    autoplay: AutoplayTimer,
}

impl PresentationInterpreter {
    /// Create an interpreter with the default autoplay interval.
    pub fn new(script: Script) -> Self {
        Self::with_config(script, &PresentationConfig::default())
    }

    /// Create an interpreter with a configured autoplay interval.
    pub fn with_config(script: Script, config: &PresentationConfig) -> Self {
        Self {
            script,
            stage: StageState::default(),
            applied: 0,
            autoplay: AutoplayTimer {
                interval: config.autoplay_interval(),
                deadline: None,
                completion_sent: false,
            },
        }
    }

    /// Placeholder interpreter for a segment without a script.
    pub fn empty() -> Self {
        Self::new(Script::default())
    }

    // ========== Getters ==========

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn stage(&self) -> &StageState {
        &self.stage
    }

    /// Number of actions in the script.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Number of actions folded into the current stage.
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    /// Index of the last applied action, `None` before the first seek.
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// The action at the cursor.
    pub fn current_action(&self) -> Option<&Action> {
        self.cursor().and_then(|i| self.script.get(i))
    }

    /// Whether the cursor sits on the last action (always true when empty).
    pub fn is_at_end(&self) -> bool {
        self.applied >= self.script.len()
    }

    // ========== Seeking ==========

    /// Move the cursor to `target`, clamped to the script.
    pub fn seek(&mut self, target: usize) -> &StageState {
        let Some(last) = self.script.last_index() else {
            return &self.stage;
        };
        let target = target.min(last);

        if target + 1 < self.applied {
            debug!(
                script = %self.script.id,
                target,
                applied = self.applied,
                "backward seek, rebuilding stage"
            );
            self.stage = StageState::default();
            self.applied = 0;
        }

        for action in &self.script.actions[self.applied..=target] {
            self.stage.apply(action);
        }
        self.applied = target + 1;
        trace!(script = %self.script.id, cursor = target, "seek");

        if !self.is_at_end() {
            self.autoplay.completion_sent = false;
        }
        &self.stage
    }

    /// Advance one action.
    pub fn step_forward(&mut self) -> &StageState {
        let next = self.next_index();
        self.seek(next)
    }

    /// Go back one action (stays on the first).
    pub fn step_back(&mut self) -> &StageState {
        let previous = self.cursor().unwrap_or(0).saturating_sub(1);
        self.seek(previous)
    }

    /// Clear the stage back to nothing applied.
    pub fn reset(&mut self) {
        self.stage = StageState::default();
        self.applied = 0;
        self.autoplay.completion_sent = false;
    }

    fn next_index(&self) -> usize {
        self.cursor().map_or(0, |c| c + 1)
    }

    // ========== Autoplay ==========

    /// Arm the autoplay timer if it is not already running.
    pub fn play(&mut self, now: Instant) {
        if self.autoplay.deadline.is_none() {
            self.autoplay.deadline = Some(now + self.autoplay.interval);
            debug!(script = %self.script.id, "autoplay armed");
        }
    }

    /// Cancel the autoplay timer.
    pub fn pause(&mut self) {
        if self.autoplay.deadline.take().is_some() {
            debug!(script = %self.script.id, "autoplay cancelled");
        }
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.deadline.is_some()
    }

    /// Arm or cancel the timer to match a playback status.
    pub fn sync_playback(&mut self, status: PlaybackStatus, now: Instant) {
        if status == PlaybackStatus::Playing {
            self.play(now);
        } else {
            self.pause();
        }
    }

    /// Fire the timer if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<AutoplayEvent> {
        let deadline = self.autoplay.deadline?;
        if now < deadline {
            return None;
        }

        if self.is_at_end() {
            self.autoplay.deadline = None;
            return self.signal_complete();
        }

        let next = self.next_index();
        self.seek(next);

        if self.is_at_end() {
            self.autoplay.deadline = None;
            return self.signal_complete();
        }

        self.autoplay.deadline = Some(now + self.autoplay.interval);
        Some(AutoplayEvent::Advanced { index: next })
    }

    fn signal_complete(&mut self) -> Option<AutoplayEvent> {
        if self.autoplay.completion_sent {
            return None;
        }
        self.autoplay.completion_sent = true;
        let index = self.cursor().unwrap_or(0);
        debug!(script = %self.script.id, index, "segment complete");
        Some(AutoplayEvent::SegmentComplete { index })
    }
}
