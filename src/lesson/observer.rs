//! Lesson progress notifications.

use super::document::Segment;

/// Receives fire-and-forget notifications from a
/// [`LessonPlayer`](super::LessonPlayer). Nothing an observer does can affect
/// playback.
pub trait LessonObserver {
    /// A segment became active.
    fn on_segment_start(&mut self, index: usize, segment: &Segment);

    /// The active segment was left, or the lesson finished on it.
    fn on_segment_end(&mut self, index: usize, segment: &Segment);

    /// A guided step was submitted.
    fn on_guided_result(&mut self, step_id: &str, passed: bool, attempts: u32);

    /// A practice question was answered.
    fn on_practice_answer(&mut self, question_id: &str, correct: bool);
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl LessonObserver for SilentObserver {
    fn on_segment_start(&mut self, _index: usize, _segment: &Segment) {}
    fn on_segment_end(&mut self, _index: usize, _segment: &Segment) {}
    fn on_guided_result(&mut self, _step_id: &str, _passed: bool, _attempts: u32) {}
    fn on_practice_answer(&mut self, _question_id: &str, _correct: bool) {}
}
