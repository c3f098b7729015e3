//! gui/update/playback.rs
//! GUI -> playback controller bridge.
//!
//! - GUI never touches rodio/symphonia directly.
//! - All state changes go through `Player::dispatch`.

use iced::Task;

use super::super::state::{Message, MuPlayer};
use crate::core::playback::PlayerEvent;
use crate::core::player::Action;

pub(crate) fn drain_events(state: &mut MuPlayer) -> Task<Message> {
    let drained: Vec<PlayerEvent> = {
        // Receiver::try_recv only needs &self, so borrow() is enough.
        let rx = state.playback_events.borrow();
        rx.try_iter().collect()
    };

    for ev in drained {
        state.player.dispatch(Action::Engine(ev));
    }

    Task::none()
}

pub(crate) fn previous(state: &mut MuPlayer) -> Task<Message> {
    state.player.dispatch(Action::Previous);
    follow_playing_row(state);
    Task::none()
}

pub(crate) fn next(state: &mut MuPlayer) -> Task<Message> {
    state.player.dispatch(Action::Next);
    follow_playing_row(state);
    Task::none()
}

pub(crate) fn stop(state: &mut MuPlayer) -> Task<Message> {
    state.player.dispatch(Action::Stop);
    state.seek_preview = None;
    Task::none()
}

pub(crate) fn toggle_play_pause(state: &mut MuPlayer) -> Task<Message> {
    state.player.dispatch(Action::TogglePlayPause);
    Task::none()
}

/// Scrubber moved: preview only (no engine command).
/// Ignored until the engine has reported a length to seek within.
pub(crate) fn seek_preview(state: &mut MuPlayer, secs: f32) -> Task<Message> {
    if state.player.can_seek() {
        state.seek_preview = Some(secs.max(0.0));
    }
    Task::none()
}

/// Scrubber released: hand the last preview to the controller.
pub(crate) fn seek_commit(state: &mut MuPlayer) -> Task<Message> {
    let Some(secs) = state.seek_preview.take() else {
        return Task::none();
    };

    state.player.dispatch(Action::SeekTo(secs.round() as u64));
    Task::none()
}

pub(crate) fn set_volume(state: &mut MuPlayer, volume: u8) -> Task<Message> {
    state.player.dispatch(Action::SetVolume(i32::from(volume)));
    Task::none()
}

pub(crate) fn toggle_mute(state: &mut MuPlayer) -> Task<Message> {
    state.player.dispatch(Action::ToggleMute);
    Task::none()
}

// Keep the browser highlight on the track that is now loaded.
fn follow_playing_row(state: &mut MuPlayer) {
    if let Some(row) = state.player.playing_row() {
        state.highlighted = Some(row);
    }
}
