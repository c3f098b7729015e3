//! GUI renderer (reads state, produces widgets; no mutation).

mod browser;
mod constants;
mod transport;
mod volume;

use iced::widget::{column, row};
use iced::{Element, Length};

use super::state::{Message, MuPlayer};
use constants::{PADDING, SPACING};

pub(crate) fn view(state: &MuPlayer) -> Element<'_, Message> {
    let top = transport::transport_bar(state);

    let body = row![
        browser::build_browser(state).width(Length::Fill),
        volume::volume_column(state),
    ]
    .spacing(SPACING)
    .height(Length::Fill);

    column![top, body].spacing(SPACING).padding(PADDING).into()
}
