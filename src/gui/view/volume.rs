//! Right column: mute toggle + vertical volume slider.

use iced::widget::{Column, button, column, text, vertical_slider};
use iced::{Alignment, Length};

use super::super::state::{Message, MuPlayer};
use super::constants::VOLUME_H;

pub(crate) fn volume_column(state: &MuPlayer) -> Column<'_, Message> {
    let ps = state.player.state();

    let mute_label = if ps.is_muted { "🔇" } else { "🔊" };
    let mute_btn = button(text(mute_label)).on_press(Message::ToggleMute);

    let slider = vertical_slider(0..=100u8, ps.volume, Message::SetVolume)
        .height(Length::Fixed(VOLUME_H));

    column![mute_btn, slider, text(ps.volume.to_string()).size(12)]
        .spacing(8)
        .align_x(Alignment::Center)
}
