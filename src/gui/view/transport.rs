//! Top bar: transport buttons + scrubber.
//!
//! Emits only Messages (no rodio, no decoding).

use iced::widget::{button, container, row, slider, text};
use iced::{Alignment, Length};

use super::super::state::{Message, MuPlayer};
use super::super::util::format_time;
use super::constants::{SPACER_LARGE, SPACER_SMALL};

pub(crate) fn transport_bar(state: &MuPlayer) -> iced::widget::Container<'_, Message> {
    let player = &state.player;
    let ps = player.state();
    let loaded = player.is_loaded();

    // Disabled exactly when the action would do nothing.
    let prev_btn =
        button(text("⏮")).on_press_maybe(player.can_previous().then_some(Message::Previous));
    let stop_btn = button(text("⏹")).on_press_maybe(loaded.then_some(Message::Stop));
    let play_label = if ps.is_playing { "⏸" } else { "▶" };
    let play_btn =
        button(text(play_label)).on_press_maybe(loaded.then_some(Message::TogglePlayPause));
    let next_btn = button(text("⏭")).on_press_maybe(player.can_next().then_some(Message::Next));

    // --- scrubber ---
    // slider needs a sane range; until the length is known, freeze it at 0..=1
    let length = ps.length_secs as f32;
    let (max, value) = if player.can_seek() {
        let value = state.seek_preview.unwrap_or(ps.current_secs as f32);
        (length, value.min(length))
    } else {
        (1.0, 0.0)
    };

    let scrubber = slider(0.0..=max, value, Message::SeekPreview)
        .on_release(Message::SeekCommit)
        .width(Length::Fill);

    // Show the dragged position while seeking.
    let shown_secs = state
        .seek_preview
        .map_or(ps.current_secs, |s| s.round() as u64);

    let buttons = row![prev_btn, stop_btn, play_btn, next_btn]
        .spacing(8)
        .align_y(Alignment::Center);

    let time = row![
        text(format_time(shown_secs)).size(13),
        scrubber,
        text(format_time(ps.length_secs)).size(13),
    ]
    .spacing(SPACER_SMALL)
    .align_y(Alignment::Center)
    .width(Length::Fill);

    let bar = row![buttons, time]
        .spacing(SPACER_LARGE)
        .align_y(Alignment::Center);

    container(bar)
}
