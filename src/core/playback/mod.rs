//! core/playback/mod.rs
//! Playback engine boundary: commands in, events out.
//!
//! The controller only ever sees the `Engine` trait, so it can be driven
//! by the real rodio thread or by a recorder in tests.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use thiserror::Error;

mod decoder;
mod engine;

pub use engine::PlaybackEngine;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    Output(String),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unrecognized format: {0}")]
    Probe(String),
    #[error("no supported audio track found")]
    NoTrack,
    #[error("decoder init failed: {0}")]
    Decoder(String),
    #[error("seek failed: {0}")]
    Seek(String),
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Anything that accepts playback commands.
pub trait Engine {
    /// Best-effort send. Implementations must not block the caller.
    fn send(&self, cmd: PlayerCommand);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Replace the current source. Playback stays paused until `Play`.
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(u64),      // ms
    SetVolume(f32), // 0.0..=1.0
    SetMuted(bool),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Loaded,
    EndOfMedia,
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    DurationChanged(u64), // ms
    PositionChanged(u64), // ms
    MediaStatus(MediaStatus),
    Error(String),
}

#[derive(Clone)]
pub struct PlaybackHandle {
    command_tx: Sender<PlayerCommand>,
}

impl Engine for PlaybackHandle {
    /// If the engine thread died, the command is dropped.
    fn send(&self, cmd: PlayerCommand) {
        let _ = self.command_tx.send(cmd);
    }
}

/// Spawns the playback thread and returns:
/// - PlaybackHandle (given to the controller)
/// - Receiver<PlayerEvent> (drained by the GUI tick)
pub fn start_playback() -> (PlaybackHandle, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    let spawned = thread::Builder::new()
        .name("playback".into())
        .spawn(move || {
            let mut engine = match PlaybackEngine::new(event_tx.clone()) {
                Ok(e) => e,
                Err(e) => {
                    tracing::error!(error = %e, "playback engine failed to start");
                    let _ = event_tx.send(PlayerEvent::Error(e.to_string()));
                    return;
                }
            };

            engine.run(command_rx);
        });

    if let Err(e) = spawned {
        tracing::error!(error = %e, "failed to spawn playback thread");
    }

    (PlaybackHandle { command_tx }, event_rx)
}
