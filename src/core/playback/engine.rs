//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per current track)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvent back via a channel.
//! No Iced imports.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::decoder::open_source_at_ms;
use super::{EngineError, MediaStatus, PlayerCommand, PlayerEvent};

const TICK_MS: u64 = 200;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    // Current playback
    sink: Option<Sink>,
    current_path: Option<PathBuf>,
    /// Offset of the current sink from the start of the track (after a seek).
    base_ms: u64,
    playing: bool,

    volume: f32,
    muted: bool,

    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>) -> Result<Self, EngineError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;

        Ok(Self {
            stream,
            sink: None,
            current_path: None,
            base_ms: 0,
            playing: false,
            volume: 1.0,
            muted: false,
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
        tracing::debug!("playback engine stopped");
    }

    /// Returns true on shutdown.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        tracing::debug!(?cmd, "engine command");

        match cmd {
            PlayerCommand::Load(path) => {
                if let Err(e) = self.load(path) {
                    self.emit(PlayerEvent::MediaStatus(MediaStatus::Invalid));
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::Play => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.playing = true;
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.playing = false;
                }
            }
            PlayerCommand::Stop => self.stop_internal(),
            PlayerCommand::Seek(ms) => {
                if let Err(e) = self.seek(ms) {
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                self.apply_gain();
            }
            PlayerCommand::SetMuted(muted) => {
                self.muted = muted;
                self.apply_gain();
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };

        let position_ms = self.base_ms + sink.get_pos().as_millis() as u64;
        let drained = sink.empty();
        self.emit(PlayerEvent::PositionChanged(position_ms));

        if drained && self.playing {
            self.emit(PlayerEvent::MediaStatus(MediaStatus::EndOfMedia));
            self.stop_internal();
        }
    }

    fn load(&mut self, path: PathBuf) -> Result<(), EngineError> {
        self.stop_internal();

        let (source, duration_ms) = open_source_at_ms(&path, 0, self.event_tx.clone())?;

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(source);

        self.sink = Some(sink);
        self.current_path = Some(path);
        self.base_ms = 0;
        self.apply_gain();

        // Loaded first: the controller drops times until the load is answered.
        self.emit(PlayerEvent::MediaStatus(MediaStatus::Loaded));
        if let Some(ms) = duration_ms {
            self.emit(PlayerEvent::DurationChanged(ms));
        }
        self.emit(PlayerEvent::PositionChanged(0));

        Ok(())
    }

    /// Reopen the current file at `ms`; keeps the play/pause state.
    fn seek(&mut self, ms: u64) -> Result<(), EngineError> {
        let Some(path) = self.current_path.clone() else {
            return Ok(());
        };

        let (source, _) = open_source_at_ms(&path, ms, self.event_tx.clone())?;

        let sink = Sink::connect_new(self.stream.mixer());
        if !self.playing {
            sink.pause();
        }
        sink.append(source);

        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.base_ms = ms;
        self.apply_gain();
        self.emit(PlayerEvent::PositionChanged(ms));

        Ok(())
    }

    fn apply_gain(&self) {
        if let Some(sink) = &self.sink {
            sink.set_volume(if self.muted { 0.0 } else { self.volume });
        }
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_path = None;
        self.base_ms = 0;
        self.playing = false;
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.event_tx.send(event);
    }
}
