//! Terminal UI rendering with ratatui

use crate::board::{Cell, BOARD_WIDTH};
use crate::game::Snapshot;
use crate::leaderboard::Leaderboard;
use crate::settings::{KeyBindings, Settings, MAX_NAME_LEN};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Board(10*2 + 2 for borders) + sidebar(22)
const GAME_WIDTH: u16 = 44;
/// Board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

const ACCENT: Color = Color::Rgb(244, 114, 182);

/// Render the name entry screen
pub fn render_name_entry(frame: &mut Frame, name: &str) {
    let area = center_rect(frame.area(), 44, 12);

    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let display = if name.is_empty() {
        Span::styled("Your name", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(name.to_string(), Style::default().fg(Color::Green).bold())
    };

    let lines = vec![
        Line::raw(""),
        Line::styled(
            "Enter your name to start playing...",
            Style::default().fg(ACCENT),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            display,
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::raw(""),
        Line::styled(
            format!("max {} characters", MAX_NAME_LEN),
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
        Line::styled(
            "Enter=Play | Tab=Leaderboard | Esc=Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the board, the falling piece and the sidebar
pub fn render_game(
    frame: &mut Frame,
    snapshot: &Snapshot,
    player: &str,
    settings: &Settings,
    paused: bool,
) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2),
            Constraint::Min(20),
        ])
        .split(game_area);

    render_board(frame, layout[0], snapshot, settings);
    render_stats(frame, layout[1], snapshot, player, &settings.keys);

    if snapshot.is_over() {
        render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!("Score: {}", snapshot.score),
            "Enter=Again | Tab=Scores",
        );
    } else if paused {
        let hint = format!("{} to resume", settings.keys.pause.label());
        render_overlay(frame, area, "PAUSED", "", &hint);
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Color at a board coordinate, with the falling piece drawn over the settled `cell`
fn cell_color(snapshot: &Snapshot, x: i32, y: i32, cell: Cell) -> Option<Color> {
    if let Some(piece) = snapshot.active_piece {
        if piece.block_positions().any(|pos| pos == (x, y)) {
            return Some(piece.color());
        }
    }
    match cell {
        Cell::Filled(color) => Some(color),
        Cell::Empty => None,
    }
}

/// Sidebar control lines built from the configured bindings
fn controls_hint(keys: &KeyBindings) -> [String; 3] {
    [
        format!("{}/{} move", keys.move_left.label(), keys.move_right.label()),
        format!("{} rotate  {} drop", keys.rotate.label(), keys.soft_drop.label()),
        format!("{} pause  {} quit", keys.pause.label(), keys.quit.label()),
    ]
}

fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .board
        .rows()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, &cell)| match cell_color(snapshot, x as i32, y as i32, cell) {
                    Some(color) => Span::styled(block_char, Style::default().fg(color)),
                    None => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    player: &str,
    keys: &KeyBindings,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let mut lines = vec![
        label("PLAYER"),
        Line::styled(player.to_string(), Style::default().fg(ACCENT).bold()),
        Line::raw(""),
        label("SCORE"),
        Line::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        ),
        Line::raw(""),
        label("LINES"),
        Line::styled(format!("{}", snapshot.lines), Style::default().fg(Color::Cyan)),
        Line::raw(""),
        label("SPEED"),
        Line::styled(
            format!("{}ms", snapshot.drop_interval.as_millis()),
            Style::default().fg(Color::Green),
        ),
        Line::raw(""),
    ];
    lines.extend(
        controls_hint(keys)
            .into_iter()
            .map(|hint| Line::styled(hint, Style::default().fg(Color::DarkGray))),
    );

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the top scores of this session; `highlight` marks the latest entry
pub fn render_leaderboard(frame: &mut Frame, leaderboard: &Leaderboard, highlight: Option<usize>) {
    let area = center_rect(frame.area(), 40, 16);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" LEADERBOARD ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::raw("")];
    if leaderboard.is_empty() {
        lines.push(Line::styled(
            "No scores yet",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (rank, entry) in leaderboard.entries().iter().enumerate() {
        let style = if highlight == Some(rank) {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::styled(
            format!("{:>2}. {:<16} {:>8}", rank + 1, entry.name, entry.score),
            style,
        ));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Tab=Close",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, detail: &str, hint: &str) {
    let popup_area = center_rect(area, 28, 6);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::styled(detail, Style::default().fg(Color::White)),
        Line::raw(""),
        Line::styled(hint, Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_HEIGHT;
    use crate::game::Game;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_center_rect() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(center_rect(outer, 20, 10), Rect::new(40, 15, 20, 10));
        // Clamped when the terminal is too small
        assert_eq!(center_rect(Rect::new(0, 0, 10, 5), 20, 10), Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn test_falling_piece_drawn_over_board() {
        let mut game = Game::with_seed(8);
        game.advance();
        let snapshot = game.snapshot();
        let piece = snapshot.active_piece.unwrap();
        let (x, y) = piece.block_positions().next().unwrap();
        assert_eq!(cell_color(&snapshot, x, y, Cell::Empty), Some(piece.color()));
        assert_eq!(cell_color(&snapshot, 0, BOARD_HEIGHT as i32 - 1, Cell::Empty), None);
        assert_eq!(
            cell_color(&snapshot, 0, 0, Cell::Filled(Color::Red)),
            Some(Color::Red)
        );
    }

    #[test]
    fn test_controls_hint_follows_bindings() {
        let defaults = controls_hint(&KeyBindings::default());
        assert_eq!(defaults[0], "Left/a/Right/d move");
        assert_eq!(defaults[2], "p/Esc pause  q quit");

        let settings = Settings::from_toml("[keys]\nrotate = \"x\"\npause = \"Space\"\n");
        let hint = controls_hint(&settings.keys);
        assert_eq!(hint[1], "x rotate  Down/s drop");
        assert_eq!(hint[2], "Space pause  q quit");
    }

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut game = Game::with_seed(8);
        game.advance();
        let settings = Settings::default();
        let mut leaderboard = Leaderboard::new();
        leaderboard.record("rain", 400);

        terminal
            .draw(|frame| {
                render_game(frame, &game.snapshot(), "rain", &settings, true);
                render_leaderboard(frame, &leaderboard, Some(0));
            })
            .unwrap();
        terminal.draw(|frame| render_name_entry(frame, "")).unwrap();
    }
}
