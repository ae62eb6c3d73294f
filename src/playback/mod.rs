//! Lesson playback state machine.
//!
//! ```text
//!            PLAY               COMPLETE (last segment)
//!   Idle ───────────▶ Playing ─────────────────────────▶ Finished
//!    ▲ ▲               │   ▲                               │
//!    │ │         PAUSE │   │ PLAY                          │
//!    │ │               ▼   │                               │
//!    │ │              Paused                               │
//!    │ └── COMPLETE (more segments): index + 1 ◀── Playing │
//!    └──────────────── STOP (from any state) ──────────────┘
//!
//!   NEXT / PREV / SET_INDEX move the clamped index and land in Idle.
//! ```
//!
//! `Finished` only leaves through `STOP`; every other event is ignored there.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Playback status of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Finished,
}

impl PlaybackStatus {
    /// Get the status name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

/// Intents accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackEvent {
    Play,
    Pause,
    Complete,
    Next,
    Prev,
    SetIndex { index: i64 },
    Stop,
}

/// Snapshot of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackContext {
    /// Active segment, always within `[0, max(total - 1, 0)]`.
    pub index: usize,
    /// Number of segments, fixed at construction.
    pub total: usize,
    pub status: PlaybackStatus,
}

/// Finite-state machine sequencing the segments of a lesson.
///
/// # Example
///
/// ```
/// use montessori_mult::playback::{PlaybackController, PlaybackEvent, PlaybackStatus};
///
/// let mut playback = PlaybackController::new(3);
/// playback.send(PlaybackEvent::Play);
/// assert_eq!(playback.status(), PlaybackStatus::Playing);
///
/// playback.send(PlaybackEvent::Complete);
/// assert_eq!(playback.index(), 1);
/// assert_eq!(playback.status(), PlaybackStatus::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct PlaybackController {
    context: PlaybackContext,
}

impl PlaybackController {
    /// Create a controller for `total` segments, idle on the first.
    pub fn new(total: usize) -> Self {
        Self {
            context: PlaybackContext {
                index: 0,
                total,
                status: PlaybackStatus::Idle,
            },
        }
    }

    pub fn context(&self) -> PlaybackContext {
        self.context
    }

    pub fn index(&self) -> usize {
        self.context.index
    }

    pub fn total(&self) -> usize {
        self.context.total
    }

    pub fn status(&self) -> PlaybackStatus {
        self.context.status
    }

    /// Highest valid index.
    pub fn max_index(&self) -> usize {
        self.context.total.saturating_sub(1)
    }

    fn clamp(&self, index: i64) -> usize {
        let max = self.max_index() as i64;
        index.clamp(0, max) as usize
    }

    /// Apply an event and return the resulting context.
    ///
    /// Events that are not valid in the current state leave it unchanged.
    pub fn send(&mut self, event: PlaybackEvent) -> PlaybackContext {
        let before = self.context;
        let next = self.transition(event);

        match next {
            Some(context) => {
                debug!(
                    ?event,
                    from = before.status.as_str(),
                    to = context.status.as_str(),
                    index = context.index,
                    "playback transition"
                );
                self.context = context;
            }
            None => {
                trace!(?event, status = before.status.as_str(), "playback event ignored");
            }
        }
        self.context
    }

    fn transition(&self, event: PlaybackEvent) -> Option<PlaybackContext> {
        use PlaybackEvent as E;
        use PlaybackStatus as S;

        let ctx = self.context;
        let to = |index: usize, status: PlaybackStatus| PlaybackContext {
            index,
            status,
            ..ctx
        };

        match (ctx.status, event) {
            (_, E::Stop) => Some(to(ctx.index, S::Idle)),
            (S::Finished, _) => None,

            (S::Idle | S::Paused, E::Play) => Some(to(ctx.index, S::Playing)),
            (S::Playing, E::Pause) => Some(to(ctx.index, S::Paused)),
            (S::Playing, E::Complete) => {
                if ctx.index >= self.max_index() {
                    Some(to(ctx.index, S::Finished))
                } else {
                    Some(to(ctx.index + 1, S::Idle))
                }
            }

            (_, E::Next) => Some(to(self.clamp(ctx.index as i64 + 1), S::Idle)),
            (_, E::Prev) => Some(to(self.clamp(ctx.index as i64 - 1), S::Idle)),
            (_, E::SetIndex { index }) => Some(to(self.clamp(index), S::Idle)),

            (_, E::Play | E::Pause | E::Complete) => None,
        }
    }
}
