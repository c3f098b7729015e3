//! Mu Player
//!
//! # What this program is
//! A small desktop audio player (built with `iced`): browse folders, double
//! click a song to play it, skip through the rest of the folder.
//!
//! # How it fits together
//! - `core::library` lists a folder (directories first, then audio files)
//! - `core::player` is the playback state machine; every click becomes an
//!   `Action`, engine events come back as actions too
//! - `core::playback` owns rodio/symphonia on its own thread
//! - `core::settings` persists location, volume and window geometry
//! - `gui` is state + messages + update + view, nothing else
//!
//! # Concurrency model
//! - All state changes happen in `update()` on the UI thread.
//! - The engine thread reports position/duration/end-of-media through a
//!   channel that a 200 ms tick drains.

mod core;
mod gui;
mod logging;

use iced::window::Position;
use iced::{Point, Size};

use crate::core::settings::SettingsStore;

fn main() -> iced::Result {
    if let Err(e) = logging::init_logging() {
        eprintln!("logging unavailable: {e:#}");
    }

    let store = SettingsStore::default_location();
    tracing::info!(path = %store.path().display(), "settings file");

    // Geometry is needed before the window exists; the player loads the rest.
    let geometry = store.load().geometry;

    let mut app = iced::application(
        move || gui::MuPlayer::new(store.clone()),
        gui::update,
        gui::view,
    )
    .title(gui::title)
    .subscription(gui::subscription)
    .exit_on_close_request(false);

    if let Some(g) = geometry {
        app = app.window_size(Size::new(g.width, g.height));
        if let (Some(x), Some(y)) = (g.x, g.y) {
            app = app.position(Position::Specific(Point::new(x, y)));
        }
    }

    app.run()
}
