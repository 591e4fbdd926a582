use std::path::PathBuf;
use std::time::Duration;

use super::mock::{Call, MockTransport};
use super::*;
use crate::library::Track;

fn t(name: &str, secs: u64) -> Track {
    Track {
        path: PathBuf::from(format!("/music/{name}.mp3")),
        title: name.into(),
        duration: Duration::from_secs(secs),
        display: name.into(),
    }
}

fn player_with(tracks: Vec<Track>) -> Player<MockTransport> {
    let mut player = Player::new(MockTransport::new(), 2, 0.5);
    player.queue_tracks(tracks);
    player
}

#[test]
fn next_and_prev_wrap_modulo_playlist_length() {
    let mut player = player_with(vec![t("a", 10), t("b", 10), t("c", 10)]);

    player.play_index(2).unwrap();
    player.next().unwrap();
    assert_eq!(player.current_index(), Some(0));

    player.prev().unwrap();
    assert_eq!(player.current_index(), Some(2));
    assert_eq!(player.status(), Status::Playing);
}

#[test]
fn next_and_prev_on_empty_playlist_are_no_ops() {
    let mut player = player_with(vec![]);

    player.next().unwrap();
    player.prev().unwrap();

    assert_eq!(player.current_index(), None);
    assert_eq!(player.status(), Status::Stopped);
    assert!(player.transport().loaded_paths().is_empty());
}

#[test]
fn toggle_on_empty_playlist_reports_empty() {
    let mut player = player_with(vec![]);
    assert!(matches!(player.toggle(), Err(PlayerError::EmptyPlaylist)));
    assert_eq!(player.status(), Status::Stopped);
}

#[test]
fn paused_implies_playing_after_every_transition() {
    let mut player = player_with(vec![t("a", 10), t("b", 10)]);

    let transitions: Vec<fn(&mut Player<MockTransport>)> = vec![
        |p| drop(p.toggle()),
        |p| drop(p.toggle()),
        |p| drop(p.next()),
        |p| drop(p.seek_by(2)),
        |p| p.stop(),
        |p| drop(p.toggle()),
        |p| drop(p.prev()),
    ];
    for step in transitions {
        step(&mut player);
        if player.status().is_paused() {
            assert!(player.status().is_playing());
        }
    }
}

#[test]
fn pause_then_resume_preserves_position() {
    let mut player = player_with(vec![t("a", 30)]);
    player.play_current().unwrap();

    player.transport_mut().position = Duration::from_secs(10);
    player.tick_progress();
    assert_eq!(player.elapsed(), Duration::from_secs(10));

    player.toggle().unwrap();
    assert_eq!(player.status(), Status::Paused);

    // Position keeps drifting in the mock, but a paused track must not
    // move the displayed time.
    player.transport_mut().position = Duration::from_secs(12);
    player.tick_progress();
    assert_eq!(player.elapsed(), Duration::from_secs(10));

    player.toggle().unwrap();
    assert_eq!(player.status(), Status::Playing);
    assert!(player.transport().calls.contains(&Call::Resume));
}

#[test]
fn stop_resets_displayed_time() {
    let mut player = player_with(vec![t("a", 30)]);
    player.play_current().unwrap();
    player.transport_mut().position = Duration::from_secs(7);
    player.tick_progress();

    player.stop();
    assert_eq!(player.status(), Status::Stopped);
    assert_eq!(player.elapsed(), Duration::ZERO);
}

#[test]
fn removing_entry_before_current_decrements_current() {
    let mut player = player_with(vec![t("a", 10), t("b", 10), t("c", 10)]);
    player.play_index(2).unwrap();

    player.remove(0);
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.current_track().unwrap().title, "c");
    // Removing a non-playing entry must not interrupt playback.
    assert_eq!(player.status(), Status::Playing);
}

#[test]
fn removing_current_last_entry_clamps_to_new_last() {
    let mut player = player_with(vec![t("a", 10), t("b", 10), t("c", 10)]);
    player.play_index(2).unwrap();

    player.remove(2);
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.status(), Status::Stopped);
}

#[test]
fn removing_playing_entry_stops_playback_first() {
    let mut player = player_with(vec![t("a", 10), t("b", 10)]);
    player.play_index(0).unwrap();

    player.remove(0);
    assert_eq!(player.status(), Status::Stopped);
    assert!(player.transport().calls.contains(&Call::Stop));
    assert_eq!(player.current_index(), Some(0));
    assert_eq!(player.current_track().unwrap().title, "b");
}

#[test]
fn removing_last_remaining_entry_force_stops() {
    let mut player = player_with(vec![t("a", 10)]);
    player.play_current().unwrap();

    player.remove(0);
    assert!(player.is_empty());
    assert_eq!(player.current_index(), None);
    assert_eq!(player.status(), Status::Stopped);
}

#[test]
fn clear_stops_and_empties() {
    let mut player = player_with(vec![t("a", 10), t("b", 10)]);
    player.play_current().unwrap();

    player.clear();
    assert!(player.is_empty());
    assert_eq!(player.status(), Status::Stopped);
    assert_eq!(player.elapsed(), Duration::ZERO);
}

#[test]
fn forward_seek_past_duration_acts_as_next_track() {
    let mut player = player_with(vec![t("a", 30), t("b", 20)]);
    player.play_index(0).unwrap();

    player.transport_mut().position = Duration::from_secs(28);
    player.tick_progress();

    player.seek_by(5).unwrap();
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.status(), Status::Playing);
    assert_eq!(
        player.transport().loaded_paths().last().copied(),
        Some(std::path::Path::new("/music/b.mp3"))
    );
}

#[test]
fn backward_seek_clamps_to_zero() {
    let mut player = player_with(vec![t("a", 30)]);
    player.play_current().unwrap();
    player.transport_mut().position = Duration::from_secs(3);
    player.tick_progress();

    player.seek_by(-10).unwrap();
    assert_eq!(player.elapsed(), Duration::ZERO);
    assert_eq!(player.transport().last_play_offset(), Some(Duration::ZERO));
    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn seek_while_paused_keeps_paused() {
    let mut player = player_with(vec![t("a", 30)]);
    player.play_current().unwrap();
    player.toggle().unwrap();

    player.seek_by(5).unwrap();
    assert_eq!(player.status(), Status::Paused);
    assert_eq!(player.elapsed(), Duration::from_secs(5));
    assert_eq!(player.transport().calls.last(), Some(&Call::Pause));
}

#[test]
fn seek_while_stopped_is_a_no_op() {
    let mut player = player_with(vec![t("a", 30)]);
    player.seek_by(5).unwrap();
    assert!(player.transport().last_play_offset().is_none());
}

#[test]
fn natural_end_advances_to_next_track() {
    let mut player = player_with(vec![t("a", 30), t("b", 20)]);
    player.play_index(0).unwrap();

    player.transport_mut().busy = false;
    player.tick_end_check().unwrap();
    // One idle poll is not enough: right after a seek or load the
    // transport can look idle for a moment.
    assert_eq!(player.current_index(), Some(0));

    player.transport_mut().busy = false;
    player.tick_end_check().unwrap();
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.status(), Status::Playing);
}

#[test]
fn busy_report_resets_the_idle_debounce() {
    let mut player = player_with(vec![t("a", 30), t("b", 20)]);
    player.play_index(0).unwrap();

    player.transport_mut().busy = false;
    player.tick_end_check().unwrap();
    player.transport_mut().busy = true;
    player.tick_end_check().unwrap();
    player.transport_mut().busy = false;
    player.tick_end_check().unwrap();

    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn natural_end_of_last_track_finishes() {
    let mut player = player_with(vec![t("a", 30)]);
    player.play_current().unwrap();

    player.transport_mut().busy = false;
    player.tick_end_check().unwrap();
    player.tick_end_check().unwrap();

    assert_eq!(player.status(), Status::Finished);
    assert_eq!(player.elapsed(), Duration::from_secs(30));
    assert_eq!(player.progress(), 1.0);

    // Finished is terminal until restarted: no further auto-advance.
    let loads_before = player.transport().loaded_paths().len();
    player.tick_end_check().unwrap();
    player.tick_end_check().unwrap();
    assert_eq!(player.status(), Status::Finished);
    assert_eq!(player.transport().loaded_paths().len(), loads_before);
}

#[test]
fn end_detection_is_ignored_while_paused() {
    let mut player = player_with(vec![t("a", 30), t("b", 20)]);
    player.play_index(0).unwrap();
    player.toggle().unwrap();

    player.transport_mut().busy = false;
    player.tick_end_check().unwrap();
    player.tick_end_check().unwrap();

    assert_eq!(player.status(), Status::Paused);
    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn toggle_from_finished_restarts_current_track() {
    let mut player = player_with(vec![t("a", 30)]);
    player.play_current().unwrap();
    player.transport_mut().busy = false;
    player.tick_end_check().unwrap();
    player.tick_end_check().unwrap();
    assert_eq!(player.status(), Status::Finished);

    player.toggle().unwrap();
    assert_eq!(player.status(), Status::Playing);
    assert_eq!(player.elapsed(), Duration::ZERO);
}

#[test]
fn adding_same_path_twice_grows_playlist_by_one() {
    let mut player = player_with(vec![]);
    assert_eq!(player.queue_tracks(vec![t("a", 10)]), 1);
    assert_eq!(player.queue_tracks(vec![t("a", 10)]), 0);
    assert_eq!(player.len(), 1);

    // Duplicates inside one batch collapse too.
    assert_eq!(player.queue_tracks(vec![t("b", 10), t("b", 10)]), 1);
    assert_eq!(player.len(), 2);
}

#[test]
fn add_tracks_autoplays_first_new_entry_when_idle() {
    let mut player = player_with(vec![t("a", 10)]);
    let added = player.add_tracks(vec![t("b", 10), t("c", 10)]).unwrap();

    assert_eq!(added, 2);
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.current_track().unwrap().title, "b");
    assert_eq!(player.status(), Status::Playing);
}

#[test]
fn add_tracks_never_interrupts_active_playback() {
    let mut player = player_with(vec![t("a", 10)]);
    player.play_current().unwrap();
    let loads_before = player.transport().loaded_paths().len();

    player.add_tracks(vec![t("b", 10)]).unwrap();
    assert_eq!(player.current_index(), Some(0));
    assert_eq!(player.transport().loaded_paths().len(), loads_before);
}

#[test]
fn volume_bounds_reach_the_backend() {
    let mut player = player_with(vec![t("a", 10)]);

    player.set_volume_percent(0.0);
    assert_eq!(player.transport().last_volume(), Some(0.0));

    player.set_volume_percent(100.0);
    assert_eq!(player.transport().last_volume(), Some(1.0));

    player.set_volume(2.5);
    assert_eq!(player.transport().last_volume(), Some(1.0));
    assert_eq!(player.volume(), 1.0);
}

#[test]
fn volume_change_does_not_touch_playback_state() {
    let mut player = player_with(vec![t("a", 10)]);
    player.play_current().unwrap();
    player.toggle().unwrap();

    player.set_volume_percent(30.0);
    assert_eq!(player.status(), Status::Paused);
}

#[test]
fn load_failure_leaves_state_unchanged() {
    let mut player = player_with(vec![t("a", 10), t("b", 10)]);
    player.play_index(0).unwrap();

    player
        .transport_mut()
        .fail_loads
        .push(PathBuf::from("/music/b.mp3"));

    assert!(matches!(
        player.play_index(1),
        Err(PlayerError::Load(_))
    ));
    assert_eq!(player.current_index(), Some(0));
    assert_eq!(player.status(), Status::Playing);
}

#[test]
fn tick_progress_clamps_to_track_duration() {
    let mut player = player_with(vec![t("a", 30)]);
    player.play_current().unwrap();

    player.transport_mut().position = Duration::from_secs(45);
    player.tick_progress();
    assert_eq!(player.elapsed(), Duration::from_secs(30));
    assert_eq!(player.progress(), 1.0);
}

#[test]
fn zero_duration_tracks_still_report_progress_position() {
    let mut player = player_with(vec![t("a", 0)]);
    player.play_current().unwrap();

    player.transport_mut().position = Duration::from_secs(4);
    player.tick_progress();
    assert_eq!(player.elapsed(), Duration::from_secs(4));
    assert_eq!(player.progress(), 0.0);
}
