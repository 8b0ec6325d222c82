use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::game::{Game, GameStatus};
use crate::grid::{GridSize, Position};
use crate::theme::Theme;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_pause_menu, render_start_menu};

/// Terminal columns per grid cell; two keeps cells roughly square.
pub const CELL_WIDTH: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_HEAD: &str = "▓▓";

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, game: &Game, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, game, hud_info);
    let theme = hud_info.theme;
    let grid = game.config().grid;

    let Some(board) = board_rect(play_area, grid) else {
        render_too_small(frame, play_area, grid, theme);
        return;
    };

    let block = Block::bordered()
        .title(" toroid-snake ")
        .border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(board);
    frame.render_widget(block, board);
    frame.render_widget(Block::new().style(Style::new().bg(theme.play_bg)), inner);

    render_food(frame, inner, grid, game.state().food, theme);
    render_snake(frame, inner, game, theme);

    match game.status() {
        GameStatus::Ready => render_start_menu(frame, board, game.best_score(), theme),
        GameStatus::Paused => render_pause_menu(frame, board, theme),
        GameStatus::Playing => {}
    }
}

/// Bordered board rectangle centered in `area`, or `None` when it does not
/// fit.
#[must_use]
pub fn board_rect(area: Rect, grid: GridSize) -> Option<Rect> {
    let width = grid.side().checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let height = grid.side().checked_add(2)?;
    if width > area.width || height > area.height {
        return None;
    }

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    })
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize, theme: &Theme) {
    let needed_width = u32::from(grid.side()) * u32::from(CELL_WIDTH) + 2;
    let needed_height = u32::from(grid.side()) + 3;
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {needed_width}x{needed_height}")),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.menu_title)),
        area,
    );
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, food: Position, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, grid, food) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_CELL,
        Style::new().fg(theme.food).bg(theme.play_bg),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, game: &Game, theme: &Theme) {
    let grid = game.config().grid;
    let snake = &game.state().snake;
    let length = snake.len();

    let buffer = frame.buffer_mut();
    // Tail first so the head wins if two segments ever share a cell.
    for (index, segment) in snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                GLYPH_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index + 1 == length {
            (GLYPH_CELL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_CELL, Style::new().fg(theme.snake_body))
        };

        buffer.set_string(x, y, glyph, style.bg(theme.play_bg));
    }
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
