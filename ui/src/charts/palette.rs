//! Fixed series palette and accent colours.

pub const PALETTE: [&str; 7] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7f50", "#a2d5f2", "#f7a072", "#b28dff",
];

pub const BAND_FILL: &str = "#d0e0ff";
pub const BAND_LINE: &str = "#3366cc";
pub const ROC_STROKE: &str = "#ff7300";
pub const COMBO_LINE: &str = "#ff0000";
pub const SCATTER_FILL: &str = "#8884d8";
pub const GRID: &str = "#e3e6ee";
pub const AXIS_TEXT: &str = "#5c6370";
pub const INK: &str = "#1f2430";

/// Series colour by position; wraps around the palette.
pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
