//! GUI state + messages.
//! Pure data definitions used by update + view.

use std::cell::RefCell;
use std::sync::mpsc::Receiver;

use iced::{Size, Task, window};

use crate::core::library::home_dir;
use crate::core::playback::{PlaybackHandle, PlayerEvent, start_playback};
use crate::core::player::Player;
use crate::core::settings::{SettingsStore, WindowGeometry};

/// Used until the first Opened/Resized event tells us the real size.
pub(crate) const FALLBACK_SIZE: Size = Size::new(1024.0, 768.0);

/// App state
pub(crate) struct MuPlayer {
    /// Playback controller; owns folder listing, flags, settings.
    pub player: Player<PlaybackHandle>,
    /// Engine -> GUI events, drained on every tick.
    pub playback_events: RefCell<Receiver<PlayerEvent>>,

    /// Single-clicked row in the browser.
    pub highlighted: Option<usize>,
    /// Scrubber position while the user drags it (seconds).
    pub seek_preview: Option<f32>,

    /// Live window geometry, written to settings on exit.
    pub geometry: WindowGeometry,
}

impl MuPlayer {
    pub(crate) fn new(store: SettingsStore) -> (Self, Task<Message>) {
        let (handle, events) = start_playback();
        let player = Player::new(handle, store, home_dir());

        let geometry = player.settings().geometry.unwrap_or(WindowGeometry {
            width: FALLBACK_SIZE.width,
            height: FALLBACK_SIZE.height,
            x: None,
            y: None,
        });

        let state = Self {
            player,
            playback_events: RefCell::new(events),
            highlighted: None,
            seek_preview: None,
            geometry,
        };

        (state, Task::none())
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    TickPlayback,

    // Transport
    Previous,
    Stop,
    TogglePlayPause,
    Next,

    // Scrubber: preview while dragging, commit on release
    SeekPreview(f32),
    SeekCommit,

    // Volume
    SetVolume(u8),
    ToggleMute,

    // Browser
    Highlight(usize),
    Open(usize),
    NavigateHome,
    Refresh,
    NavigateUp,

    // Window
    Window(window::Id, window::Event),
    MonitorSize(window::Id, Option<Size>),
}
