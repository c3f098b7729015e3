//! gui/update/browser.rs
//! Folder browser: highlight, open, and navigation buttons.

use iced::Task;

use super::super::state::{Message, MuPlayer};
use crate::core::player::Action;

pub(crate) fn highlight(state: &mut MuPlayer, i: usize) -> Task<Message> {
    if i < state.player.entries().len() {
        state.highlighted = Some(i);
    }
    Task::none()
}

/// Double click: enter a folder or play a file.
pub(crate) fn open(state: &mut MuPlayer, i: usize) -> Task<Message> {
    let folder_before = state.player.state().current_folder.clone();

    state.player.dispatch(Action::Select(i));

    if state.player.state().current_folder == folder_before {
        state.highlighted = Some(i);
    } else {
        state.highlighted = None;
    }
    Task::none()
}

pub(crate) fn home(state: &mut MuPlayer) -> Task<Message> {
    navigate(state, Action::NavigateHome)
}

pub(crate) fn refresh(state: &mut MuPlayer) -> Task<Message> {
    navigate(state, Action::Refresh)
}

pub(crate) fn up(state: &mut MuPlayer) -> Task<Message> {
    navigate(state, Action::NavigateUp)
}

fn navigate(state: &mut MuPlayer, action: Action) -> Task<Message> {
    state.player.dispatch(action);
    state.highlighted = state.player.playing_row();
    tracing::debug!(folder = %state.player.state().current_folder.display(), "browsing");
    Task::none()
}
