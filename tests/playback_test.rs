//! Integration tests for PlaybackController.

use montessori_mult::playback::{PlaybackController, PlaybackEvent, PlaybackStatus};

const ALL_EVENTS: [PlaybackEvent; 6] = [
    PlaybackEvent::Play,
    PlaybackEvent::Pause,
    PlaybackEvent::Complete,
    PlaybackEvent::Next,
    PlaybackEvent::Prev,
    PlaybackEvent::SetIndex { index: 0 },
];

fn finished(total: usize) -> PlaybackController {
    let mut playback = PlaybackController::new(total);
    playback.send(PlaybackEvent::SetIndex {
        index: total as i64 - 1,
    });
    playback.send(PlaybackEvent::Play);
    playback.send(PlaybackEvent::Complete);
    assert_eq!(playback.status(), PlaybackStatus::Finished);
    playback
}

#[test]
fn test_starts_idle_at_zero() {
    let playback = PlaybackController::new(4);
    let ctx = playback.context();
    assert_eq!(ctx.index, 0);
    assert_eq!(ctx.total, 4);
    assert_eq!(ctx.status, PlaybackStatus::Idle);
}

#[test]
fn test_set_index_clamps() {
    let total = 5;
    let mut playback = PlaybackController::new(total);

    playback.send(PlaybackEvent::SetIndex { index: -5 });
    assert_eq!(playback.index(), 0);

    playback.send(PlaybackEvent::SetIndex {
        index: total as i64 + 10,
    });
    assert_eq!(playback.index(), total - 1);
    assert_eq!(playback.status(), PlaybackStatus::Idle);
}

#[test]
fn test_next_and_prev_clamp_at_ends() {
    let mut playback = PlaybackController::new(2);
    playback.send(PlaybackEvent::Prev);
    assert_eq!(playback.index(), 0);
    playback.send(PlaybackEvent::Next);
    playback.send(PlaybackEvent::Next);
    assert_eq!(playback.index(), 1);
}

#[test]
fn test_navigation_while_playing_lands_idle() {
    let mut playback = PlaybackController::new(3);
    playback.send(PlaybackEvent::Play);
    let ctx = playback.send(PlaybackEvent::Next);
    assert_eq!(ctx.index, 1);
    assert_eq!(ctx.status, PlaybackStatus::Idle);
}

#[test]
fn test_complete_walks_through_segments() {
    let mut playback = PlaybackController::new(3);
    for expected in 1..3 {
        playback.send(PlaybackEvent::Play);
        let ctx = playback.send(PlaybackEvent::Complete);
        assert_eq!(ctx.index, expected);
        assert_eq!(ctx.status, PlaybackStatus::Idle);
    }
    playback.send(PlaybackEvent::Play);
    let ctx = playback.send(PlaybackEvent::Complete);
    assert_eq!(ctx.index, 2);
    assert_eq!(ctx.status, PlaybackStatus::Finished);
}

#[test]
fn test_finished_ignores_everything_but_stop() {
    for event in ALL_EVENTS {
        let mut playback = finished(3);
        let before = playback.context();
        assert_eq!(playback.send(event), before, "{event:?} left finished");
    }

    let mut playback = finished(3);
    let ctx = playback.send(PlaybackEvent::Stop);
    assert_eq!(ctx.status, PlaybackStatus::Idle);
    assert_eq!(ctx.index, 2);
}

#[test]
fn test_stop_from_every_state() {
    let mut playback = PlaybackController::new(3);
    playback.send(PlaybackEvent::Play);
    playback.send(PlaybackEvent::Stop);
    assert_eq!(playback.status(), PlaybackStatus::Idle);

    playback.send(PlaybackEvent::Play);
    playback.send(PlaybackEvent::Pause);
    playback.send(PlaybackEvent::Stop);
    assert_eq!(playback.status(), PlaybackStatus::Idle);
}

#[test]
fn test_invalid_events_are_noops() {
    let mut playback = PlaybackController::new(3);
    let idle = playback.context();
    assert_eq!(playback.send(PlaybackEvent::Pause), idle);
    assert_eq!(playback.send(PlaybackEvent::Complete), idle);

    playback.send(PlaybackEvent::Play);
    let playing = playback.context();
    assert_eq!(playback.send(PlaybackEvent::Play), playing);

    playback.send(PlaybackEvent::Pause);
    let paused = playback.context();
    assert_eq!(playback.send(PlaybackEvent::Pause), paused);
    assert_eq!(playback.send(PlaybackEvent::Complete), paused);
}

#[test]
fn test_index_always_in_bounds() {
    let total = 4;
    let mut playback = PlaybackController::new(total);
    let events = [
        PlaybackEvent::Next,
        PlaybackEvent::SetIndex { index: 99 },
        PlaybackEvent::Play,
        PlaybackEvent::Complete,
        PlaybackEvent::Prev,
        PlaybackEvent::SetIndex { index: i64::MIN },
        PlaybackEvent::Next,
        PlaybackEvent::Next,
        PlaybackEvent::Next,
        PlaybackEvent::Next,
        PlaybackEvent::Stop,
    ];
    for event in events {
        let ctx = playback.send(event);
        assert!(ctx.index < total);
        assert_eq!(ctx.total, total);
    }
}

#[test]
fn test_events_parse_from_json() {
    let events: Vec<PlaybackEvent> =
        serde_json::from_str(r#"[{"type": "PLAY"}, {"type": "SET_INDEX", "index": -3}, {"type": "STOP"}]"#)
            .unwrap();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::Play,
            PlaybackEvent::SetIndex { index: -3 },
            PlaybackEvent::Stop,
        ]
    );
}
