//! gui/update/mod.rs
//! Update logic (router).
//! Turns `Message` events into controller actions and window tasks.

use iced::Task;

use super::state::{Message, MuPlayer};

mod browser;
mod playback;
mod window;

pub(crate) fn update(state: &mut MuPlayer, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // Transport
        Message::Previous => playback::previous(state),
        Message::Stop => playback::stop(state),
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Next => playback::next(state),

        // Seek: preview vs commit
        Message::SeekPreview(secs) => playback::seek_preview(state, secs),
        Message::SeekCommit => playback::seek_commit(state),

        Message::SetVolume(v) => playback::set_volume(state, v),
        Message::ToggleMute => playback::toggle_mute(state),

        // Browser
        Message::Highlight(i) => browser::highlight(state, i),
        Message::Open(i) => browser::open(state, i),
        Message::NavigateHome => browser::home(state),
        Message::Refresh => browser::refresh(state),
        Message::NavigateUp => browser::up(state),

        // Window
        Message::Window(id, event) => window::window_event(state, id, event),
        Message::MonitorSize(id, size) => window::monitor_size(state, id, size),
    }
}
