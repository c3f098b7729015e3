//! gui/subscription.rs
//! Poll playback events by emitting a periodic TickPlayback message,
//! and listen to window events for geometry tracking.

use iced::{Subscription, time, window};
use std::time::Duration;

use super::state::{Message, MuPlayer};

const TICK_MS: u64 = 200;

pub(crate) fn subscription(state: &MuPlayer) -> Subscription<Message> {
    let windows = window::events().map(|(id, event)| Message::Window(id, event));

    if !state.player.is_loaded() {
        return windows;
    }

    Subscription::batch([
        windows,
        time::every(Duration::from_millis(TICK_MS)).map(|_| Message::TickPlayback),
    ])
}
