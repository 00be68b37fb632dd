use ratatui::style::Color;

pub const COLOR_BG: Color = Color::Rgb(30, 30, 46);
pub const COLOR_PANEL_BG: Color = Color::Rgb(24, 24, 36);
pub const COLOR_SELECTED_BG: Color = Color::Rgb(69, 71, 90);
pub const COLOR_BORDER: Color = Color::Rgb(49, 50, 68);
pub const COLOR_TEXT_PRIMARY: Color = Color::Rgb(205, 214, 244);
pub const COLOR_TEXT_SECONDARY: Color = Color::Rgb(166, 173, 200);
pub const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
pub const COLOR_OBSERVING: Color = Color::Rgb(166, 227, 161);
pub const COLOR_OFF: Color = Color::Rgb(243, 139, 168);

pub const TITLE_INDEX: &str = "Catalog";
pub const NO_MEDIA: &str = "(no image)";
pub const SENTINEL_LOADING: &str = "Loading more...";
pub const SENTINEL_WAITING: &str = "Loading catalog...";
pub const SENTINEL_END: &str = "End of feed";

pub const HINTS_INDEX: &str = "j/k move  Enter open  q quit";
pub const HINTS_DETAIL: &str = "j/k move  Enter remember  Esc back  q quit";
