//! Folder browser: nav bar (home / refresh / up / location) + entry list.

use iced::widget::{
    Column, button, column, container, mouse_area, row, scrollable, text, tooltip,
};
use iced::{Alignment, Length};

use super::super::state::{Message, MuPlayer};
use super::super::util::elide_left;
use super::constants::{
    CHAR_W, MIN_WIDTH, NAV_RESERVED_W, ROW_H, ROW_HPAD, ROW_TEXT, SPACER_MEDIUM,
};

pub(crate) fn build_browser(state: &MuPlayer) -> Column<'_, Message> {
    column![nav_bar(state), entry_list(state).height(Length::Fill)].spacing(8)
}

fn nav_bar(state: &MuPlayer) -> iced::widget::Row<'_, Message> {
    let location = state.player.state().current_folder.display().to_string();

    // Character budget from an assumed glyph width, not measured text.
    let max_w = (state.geometry.width - NAV_RESERVED_W).max(MIN_WIDTH);
    let label = elide_left(&location, (max_w / CHAR_W) as usize);

    let location_label = tooltip(
        text(label),
        container(text(location)).padding(6).style(container::rounded_box),
        tooltip::Position::Bottom,
    );

    row![
        button(text("⌂")).on_press(Message::NavigateHome),
        button(text("⟳")).on_press(Message::Refresh),
        button(text("↑")).on_press(Message::NavigateUp),
        location_label,
    ]
    .spacing(SPACER_MEDIUM)
    .align_y(Alignment::Center)
}

fn entry_list(state: &MuPlayer) -> iced::widget::Scrollable<'_, Message> {
    let entries = state.player.entries();

    if entries.is_empty() {
        return scrollable(column![text("No folders or audio files here.").size(ROW_TEXT)]);
    }

    let playing = state.player.playing_row();
    let mut col = column![].spacing(1);

    for (i, entry) in entries.iter().enumerate() {
        let marker = if playing == Some(i) { "▶ " } else { "   " };
        let suffix = if entry.is_dir() { "/" } else { "" };
        let label = format!("{marker}{}{suffix}", entry.name);

        let mut cell = container(text(label).size(ROW_TEXT))
            .padding([0.0, ROW_HPAD])
            .height(Length::Fixed(ROW_H))
            .width(Length::Fill)
            .align_y(Alignment::Center);

        if state.highlighted == Some(i) {
            cell = cell.style(container::rounded_box);
        }

        let row_widget = mouse_area(cell)
            .on_press(Message::Highlight(i))
            .on_double_click(Message::Open(i));

        col = col.push(row_widget);
    }

    scrollable(col)
}
