//! gui/update/window.rs
//! Window geometry tracking + save-on-exit.
//!
//! First run has no stored geometry: once the window opens we ask for
//! the monitor size and resize to 2/3 of it.

use iced::{Size, Task, window};

use super::super::state::{Message, MuPlayer};
use super::super::util::default_window_size;

pub(crate) fn window_event(
    state: &mut MuPlayer,
    id: window::Id,
    event: window::Event,
) -> Task<Message> {
    match event {
        window::Event::Opened { position, size } => {
            state.geometry.width = size.width;
            state.geometry.height = size.height;
            if let Some(p) = position {
                state.geometry.x = Some(p.x);
                state.geometry.y = Some(p.y);
            }

            if state.player.settings().geometry.is_none() {
                return window::monitor_size(id).map(move |size| Message::MonitorSize(id, size));
            }
            Task::none()
        }
        window::Event::Resized(size) => {
            state.geometry.width = size.width;
            state.geometry.height = size.height;
            Task::none()
        }
        window::Event::Moved(p) => {
            state.geometry.x = Some(p.x);
            state.geometry.y = Some(p.y);
            Task::none()
        }
        window::Event::CloseRequested => {
            tracing::info!(geometry = ?state.geometry, "closing, saving window geometry");
            state.player.save_geometry(state.geometry);
            state.player.shutdown();
            iced::exit()
        }
        _ => Task::none(),
    }
}

pub(crate) fn monitor_size(
    state: &mut MuPlayer,
    id: window::Id,
    size: Option<Size>,
) -> Task<Message> {
    let Some(screen) = size else {
        return Task::none();
    };

    let target = default_window_size(screen);
    state.geometry.width = target.width;
    state.geometry.height = target.height;

    window::resize(id, target)
}
