use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::game::Game;
use crate::theme::Theme;

const FIELD_SEPARATOR: &str = "  ";

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    /// Pre-formatted debug string; `None` hides the debug row.
    pub debug_line: Option<String>,
}

/// Renders the status row (and the optional debug row) at the bottom of
/// `area` and returns what is left above it for the play field.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &Game, info: &HudInfo<'_>) -> Rect {
    let debug_height = u16::from(info.debug_line.is_some());
    let [play_area, status_area, debug_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(debug_height),
    ])
    .areas(area);

    let state = game.state();
    let fields = [
        ("Score", state.score.to_string()),
        ("Best", game.best_score().to_string()),
        ("Length", state.snake.len().to_string()),
        ("Tick", format!("{} ms", state.tick_interval_ms)),
        ("Theme", info.theme.name.to_owned()),
    ];

    frame.render_widget(
        Paragraph::new(status_line(&fields, usize::from(status_area.width), info.theme))
            .alignment(Alignment::Center),
        status_area,
    );

    if let Some(debug_line) = &info.debug_line {
        frame.render_widget(
            Paragraph::new(Line::from(debug_line.as_str()))
                .alignment(Alignment::Left)
                .style(Style::default().fg(info.theme.hud_label)),
            debug_area,
        );
    }

    play_area
}

/// Builds `Label value` pairs, dropping trailing pairs that would not fit in
/// `available_width` terminal columns.
fn status_line(fields: &[(&str, String)], available_width: usize, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(fields.len() * 3);
    let mut used = 0;

    for (label, value) in fields {
        let separator = if spans.is_empty() { "" } else { FIELD_SEPARATOR };
        let width = separator.width() + label.width() + 1 + value.width();
        if used + width > available_width {
            break;
        }
        used += width;

        if !separator.is_empty() {
            spans.push(Span::raw(separator));
        }
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(theme.hud_label),
        ));
        spans.push(Span::styled(
            value.clone(),
            Style::default()
                .fg(theme.hud_value)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}
