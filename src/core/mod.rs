//! core/mod.rs
//!
//! The brain of the app:
//! - List a folder for the browser (filesystem)
//! - Drive the playback state machine
//! - Own the audio engine thread
//! - Persist settings
//!
//! No iced imports in here: everything is testable without a window.

pub mod library;
pub mod playback;
pub mod player;
pub mod settings;
pub mod types;
