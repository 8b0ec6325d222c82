use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::theme::Theme;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, best_score: u32, theme: &Theme) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let title = Style::default()
        .fg(theme.menu_title)
        .add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(theme.menu_footer);

    let lines = vec![
        Line::styled("S N A K E", title),
        Line::from(""),
        Line::from(format!("Best this session: {best_score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Play"),
        Line::from("[T] Theme   [Q] Quit"),
        Line::from(""),
        Line::styled("Edges wrap around; only your body is deadly", hint),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" toroid-snake ")),
        popup,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(Style::default().fg(theme.menu_title)),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[R] Restart"),
        Line::from("[T] Theme"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);

    popup
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::centered_popup;

    #[test]
    fn popup_stays_inside_its_area() {
        let area = Rect::new(4, 2, 40, 20);
        let popup = centered_popup(area, 70, 50);

        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert!(popup.width > 0 && popup.height > 0);
    }
}
