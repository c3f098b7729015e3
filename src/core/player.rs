//! core/player.rs
//! Playback controller: the one place `PlaybackState` changes.
//!
//! - GUI turns clicks into `Action`s and calls `dispatch`.
//! - Engine events come in as `Action::Engine(..)`.
//! - Side effects go out as `PlayerCommand`s through the `Engine` trait,
//!   and as settings writes.
//!
//! States:
//! - Stopped: `selected == None`, not playing
//! - Loaded:  `selected == Some(i)`, playing or paused
//!
//! `selected` indexes the playlist: the listing the track was picked from.
//! Browsing elsewhere keeps the playlist, so skipping stays in that folder.

use std::path::PathBuf;

use super::library::{list_dir, resolve_location};
use super::playback::{Engine, MediaStatus, PlayerCommand, PlayerEvent};
use super::settings::{MAX_VOLUME, Settings, SettingsStore, WindowGeometry};
use super::types::Entry;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open a browser row (index into `entries()`).
    Select(usize),
    TogglePlayPause,
    Stop,
    Next,
    Previous,
    /// Scrubber released at this many seconds.
    SeekTo(u64),
    /// Any integer; clamped to 0..=100.
    SetVolume(i32),
    ToggleMute,
    NavigateHome,
    NavigateUp,
    Refresh,
    Engine(PlayerEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_folder: PathBuf,
    pub selected: Option<usize>,
    pub is_playing: bool,
    pub is_muted: bool,
    pub volume: u8,
    pub current_secs: u64,
    pub length_secs: u64,
    /// File name of the loaded track, empty when stopped.
    pub title: String,
}

#[derive(Debug, Clone)]
struct Playlist {
    folder: PathBuf,
    entries: Vec<Entry>,
}

pub struct Player<E: Engine> {
    engine: E,
    store: SettingsStore,
    settings: Settings,
    home: PathBuf,

    state: PlaybackState,
    entries: Vec<Entry>,
    playlist: Option<Playlist>,
    /// `Load`s sent that the engine has not answered (Loaded/Invalid) yet.
    /// Events seen meanwhile belong to the previous source.
    pending_loads: usize,
}

impl<E: Engine> Player<E> {
    /// Load settings, settle on a usable folder, list it, and push the
    /// stored volume to the engine.
    pub fn new(engine: E, store: SettingsStore, home: PathBuf) -> Self {
        let settings = store.load();

        let state = PlaybackState {
            current_folder: settings.location.clone(),
            selected: None,
            is_playing: false,
            is_muted: false,
            volume: settings.volume.min(MAX_VOLUME),
            current_secs: 0,
            length_secs: 0,
            title: String::new(),
        };

        let mut player = Self {
            engine,
            store,
            settings,
            home,
            state,
            entries: Vec::new(),
            playlist: None,
            pending_loads: 0,
        };

        player.relist();
        player.send_volume();

        tracing::info!(
            folder = %player.state.current_folder.display(),
            volume = player.state.volume,
            "player ready"
        );

        player
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Rows of the browsed folder.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_loaded(&self) -> bool {
        self.state.selected.is_some()
    }

    pub fn can_previous(&self) -> bool {
        self.state.selected.is_some_and(|i| i > 0)
    }

    /// Seeking needs a loaded track with a known length.
    pub fn can_seek(&self) -> bool {
        self.is_loaded() && self.state.length_secs > 0
    }

    pub fn can_next(&self) -> bool {
        match (self.state.selected, &self.playlist) {
            (Some(i), Some(p)) => i + 1 < p.entries.len(),
            _ => false,
        }
    }

    /// Browser row of the loaded track, if the browser shows its folder.
    pub fn playing_row(&self) -> Option<usize> {
        let playlist = self.playlist.as_ref()?;
        if playlist.folder == self.state.current_folder {
            self.state.selected
        } else {
            None
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Select(i) => self.select(i),
            Action::TogglePlayPause => self.toggle_play_pause(),
            Action::Stop => self.stop(),
            Action::Next => self.next(),
            Action::Previous => self.previous(),
            Action::SeekTo(secs) => self.seek_to(secs),
            Action::SetVolume(v) => self.set_volume(v),
            Action::ToggleMute => self.toggle_mute(),
            Action::NavigateHome => {
                self.state.current_folder = self.home.clone();
                self.relist();
            }
            Action::NavigateUp => {
                if let Some(parent) = self.state.current_folder.parent() {
                    self.state.current_folder = parent.to_path_buf();
                }
                self.relist();
            }
            Action::Refresh => self.relist(),
            Action::Engine(event) => self.handle_event(event),
        }
    }

    /// Remember the window geometry and write settings out.
    pub fn save_geometry(&mut self, geometry: WindowGeometry) {
        self.settings.geometry = Some(geometry);
        self.persist();
    }

    pub fn shutdown(&self) {
        self.engine.send(PlayerCommand::Shutdown);
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    // Transitions

    fn select(&mut self, index: usize) {
        let Some(entry) = self.entries.get(index) else {
            return;
        };

        if entry.is_dir() {
            let path = entry.path.clone();
            self.enter_dir(path);
        } else {
            let playlist = Playlist {
                folder: self.state.current_folder.clone(),
                entries: self.entries.clone(),
            };
            self.load_track(playlist, index);
        }
    }

    fn skip_to(&mut self, index: usize) {
        let Some(playlist) = self.playlist.clone() else {
            return;
        };
        let Some(entry) = playlist.entries.get(index) else {
            return;
        };

        if entry.is_dir() {
            let path = entry.path.clone();
            self.enter_dir(path);
        } else {
            self.load_track(playlist, index);
        }
    }

    fn enter_dir(&mut self, path: PathBuf) {
        if self.is_loaded() {
            self.stop();
        }
        self.state.current_folder = path;
        self.relist();
    }

    fn load_track(&mut self, playlist: Playlist, index: usize) {
        let entry = &playlist.entries[index];
        tracing::info!(path = %entry.path.display(), "playing");

        self.engine.send(PlayerCommand::Load(entry.path.clone()));
        self.engine.send(PlayerCommand::Play);
        self.pending_loads += 1;

        self.state.selected = Some(index);
        self.state.title = entry.name.clone();
        self.state.is_playing = true;
        self.state.current_secs = 0;
        self.state.length_secs = 0;
        self.playlist = Some(playlist);
    }

    fn toggle_play_pause(&mut self) {
        if !self.is_loaded() {
            return;
        }

        if self.state.is_playing {
            self.engine.send(PlayerCommand::Pause);
        } else {
            self.engine.send(PlayerCommand::Play);
        }
        self.state.is_playing = !self.state.is_playing;
    }

    fn stop(&mut self) {
        if !self.is_loaded() {
            return;
        }

        self.engine.send(PlayerCommand::Stop);

        self.state.selected = None;
        self.state.is_playing = false;
        self.state.title.clear();
        self.state.current_secs = 0;
        self.state.length_secs = 0;
        self.playlist = None;
    }

    fn next(&mut self) {
        if !self.can_next() {
            return;
        }
        if let Some(i) = self.state.selected {
            self.skip_to(i + 1);
        }
    }

    fn previous(&mut self) {
        if !self.can_previous() {
            return;
        }
        if let Some(i) = self.state.selected {
            self.skip_to(i - 1);
        }
    }

    fn seek_to(&mut self, secs: u64) {
        if !self.is_loaded() {
            return;
        }
        self.engine.send(PlayerCommand::Seek(secs.saturating_mul(1000)));
    }

    fn set_volume(&mut self, volume: i32) {
        let volume = volume.clamp(0, i32::from(MAX_VOLUME)) as u8;

        self.state.volume = volume;
        self.send_volume();

        self.settings.volume = volume;
        self.persist();
    }

    fn toggle_mute(&mut self) {
        self.state.is_muted = !self.state.is_muted;
        self.engine.send(PlayerCommand::SetMuted(self.state.is_muted));
    }

    fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::MediaStatus(MediaStatus::Loaded) => {
                self.pending_loads = self.pending_loads.saturating_sub(1);
            }
            PlayerEvent::MediaStatus(MediaStatus::Invalid) => {
                self.pending_loads = self.pending_loads.saturating_sub(1);
                tracing::warn!(title = %self.state.title, "engine could not load track");
            }
            // Late ticks from a stopped or replaced track are stale.
            PlayerEvent::DurationChanged(_)
            | PlayerEvent::PositionChanged(_)
            | PlayerEvent::MediaStatus(MediaStatus::EndOfMedia)
                if !self.is_loaded() || self.pending_loads > 0 =>
            {
                tracing::debug!(?event, pending = self.pending_loads, "dropping stale event");
            }
            PlayerEvent::DurationChanged(ms) => self.state.length_secs = ms / 1000,
            PlayerEvent::PositionChanged(ms) => self.state.current_secs = ms / 1000,
            PlayerEvent::MediaStatus(MediaStatus::EndOfMedia) => {
                if !self.state.is_playing {
                    return;
                }
                if self.can_next() {
                    self.next();
                } else {
                    tracing::info!("end of folder, stopping");
                    self.stop();
                }
            }
            PlayerEvent::Error(e) => {
                tracing::warn!(error = %e, "playback error");
            }
        }
    }

    // Helpers

    /// Re-list the current folder, falling back to home when it is gone.
    fn relist(&mut self) {
        let resolved = resolve_location(&self.state.current_folder, &self.home);
        if resolved != self.state.current_folder {
            tracing::info!(
                from = %self.state.current_folder.display(),
                to = %resolved.display(),
                "folder unavailable, falling back to home"
            );
            self.state.current_folder = resolved;
        }

        self.entries = match list_dir(&self.state.current_folder) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "listing failed");
                Vec::new()
            }
        };

        self.remember_location();
    }

    fn remember_location(&mut self) {
        if self.settings.location == self.state.current_folder {
            return;
        }
        self.settings.location = self.state.current_folder.clone();
        self.persist();
    }

    fn send_volume(&self) {
        let fraction = f32::from(self.state.volume) / f32::from(MAX_VOLUME);
        self.engine.send(PlayerCommand::SetVolume(fraction));
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }
}
