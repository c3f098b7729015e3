//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use iced::Size;

pub(crate) const APP_NAME: &str = "Mu Player";

/// Seconds -> "hh:mm:ss".
pub(crate) fn format_time(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// "Mu Player", or "Mu Player - <name>" with the last extension dropped.
pub(crate) fn window_title(track: &str) -> String {
    if track.is_empty() {
        return APP_NAME.to_string();
    }

    let name = track.rsplit_once('.').map_or(track, |(stem, _)| stem);
    format!("{APP_NAME} - {name}")
}

/// Keep the end of `s` (the interesting part of a path), prefixing "…"
/// when it has to be cut to `max_chars`.
pub(crate) fn elide_left(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let tail: String = s.chars().skip(count - (max_chars - 1)).collect();
    format!("…{tail}")
}

/// First-run window size: 2/3 of the screen.
pub(crate) fn default_window_size(screen: Size) -> Size {
    Size::new(screen.width * 2.0 / 3.0, screen.height * 2.0 / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(3725), "01:02:05");
        assert_eq!(format_time(100 * 3600), "100:00:00");
    }

    #[test]
    fn title_drops_only_the_last_extension() {
        assert_eq!(window_title(""), "Mu Player");
        assert_eq!(window_title("song.mp3"), "Mu Player - song");
        assert_eq!(window_title("live.at.home.flac"), "Mu Player - live.at.home");
        assert_eq!(window_title("noext"), "Mu Player - noext");
    }

    #[test]
    fn elides_from_the_left() {
        assert_eq!(elide_left("/home/me", 20), "/home/me");
        assert_eq!(elide_left("/home/me/music", 8), "…e/music");
        assert_eq!(elide_left("/home/me/music", 8).chars().count(), 8);
        assert_eq!(elide_left("/ñäö/ü", 3), "…/ü");
        assert_eq!(elide_left("abc", 0), "");
    }

    #[test]
    fn default_size_is_two_thirds_of_screen() {
        let size = default_window_size(Size::new(1920.0, 1080.0));
        assert_eq!(size, Size::new(1280.0, 720.0));
    }
}
