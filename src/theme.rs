use ratatui::style::Color;

/// A color theme applied to all visual elements.
///
/// Every entity is drawn as a solid two-column block, so each field is the
/// block color for that entity.
#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    /// Background color for empty play-area cells.
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_label: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic blue snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::White,
    snake_body: Color::Blue,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_value: Color::White,
    hud_label: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "Ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    hud_value: Color::Cyan,
    hud_label: Color::DarkGray,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Neon magenta/yellow theme.
pub const THEME_NEON: Theme = Theme {
    name: "Neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Magenta,
    hud_value: Color::Magenta,
    hud_label: Color::DarkGray,
    menu_title: Color::Magenta,
    menu_footer: Color::DarkGray,
};

/// All available themes in cycle order.
pub static THEMES: [Theme; 3] = [THEME_CLASSIC, THEME_OCEAN, THEME_NEON];

#[must_use]
pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

/// Looks a theme up by case-insensitive name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

/// The theme after `current` in cycle order, wrapping at the end.
#[must_use]
pub fn next(current: &Theme) -> &'static Theme {
    let index = THEMES
        .iter()
        .position(|theme| theme.name == current.name)
        .unwrap_or(0);
    &THEMES[(index + 1) % THEMES.len()]
}
