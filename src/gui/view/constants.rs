//! View constants (layout/sizing).

pub(crate) const PADDING: f32 = 12.0;
pub(crate) const SPACING: f32 = 12.0;

pub(crate) const SPACER_LARGE: f32 = 30.0;
pub(crate) const SPACER_SMALL: f32 = 6.0;
pub(crate) const SPACER_MEDIUM: f32 = 12.0;

pub(crate) const MIN_WIDTH: f32 = 300.0;

pub(crate) const ROW_TEXT: f32 = 14.0;
pub(crate) const ROW_H: f32 = 24.0;
pub(crate) const ROW_HPAD: f32 = 8.0;

/// Average glyph width assumed when eliding the location label. A guess
/// for the default font at default size: wide glyphs (CJK, `W`) can still
/// overflow and narrow ones leave slack. The tooltip always has the full path.
pub(crate) const CHAR_W: f32 = 7.5;
/// Width taken by the three nav buttons + mute column next to the label.
pub(crate) const NAV_RESERVED_W: f32 = 220.0;

pub(crate) const VOLUME_H: f32 = 160.0;
