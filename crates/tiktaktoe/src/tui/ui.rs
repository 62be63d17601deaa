//! Stateless rendering for the game screen.

use super::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tiktaktoe_core::{Cell, PlayerKind, Position, Side};

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Draws the whole screen and returns the area of each cell, by index.
pub fn draw(frame: &mut Frame, app: &App) -> [Rect; 9] {
    let [title_area, body, status_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(BOARD_HEIGHT + 2),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    let [board_area, side_area] =
        Layout::horizontal([Constraint::Min(BOARD_WIDTH + 2), Constraint::Length(26)])
            .areas(body);
    let cells = draw_board(frame, board_area, app);
    draw_sidebar(frame, side_area, app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, status_area);

    let help = Paragraph::new(
        "1-9 / arrows+Enter / click: move   x,o: switch player   r: new game   c: clear scores   q: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, help_area);

    if let Some(message) = app.popup() {
        draw_popup(frame, body, message);
    }

    cells
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) -> [Rect; 9] {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
    let row_constraints = [
        Constraint::Length(CELL_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(CELL_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(CELL_HEIGHT),
    ];
    let rows = Layout::vertical(row_constraints).split(board_area);

    let mut cells = [Rect::default(); 9];
    for row in 0..3 {
        let cols = Layout::horizontal([
            Constraint::Length(CELL_WIDTH),
            Constraint::Length(1),
            Constraint::Length(CELL_WIDTH),
            Constraint::Length(1),
            Constraint::Length(CELL_WIDTH),
        ])
        .split(rows[row * 2]);

        for col in 0..3 {
            let index = row * 3 + col;
            cells[index] = cols[col * 2];
            if let Some(pos) = Position::from_index(index) {
                draw_cell(frame, cols[col * 2], app, pos);
            }
            if col < 2 {
                draw_separator_vertical(frame, cols[col * 2 + 1]);
            }
        }
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
    cells
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, pos: Position) {
    let (symbol, base_style) = match app.session().state().board().get(pos) {
        Cell::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Occupied(side) => (side.to_string(), side_style(side)),
    };

    let style = if pos == app.cursor() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(symbol, style)),
        Line::from(""),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).style(style),
        area,
    );
}

fn side_style(side: Side) -> Style {
    let color = match side {
        Side::X => Color::Blue,
        Side::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let scores = session.scoreboard();
    let state = session.state();

    let kind_label = |side: Side| -> Span<'static> {
        let kind = session.players().kind(side);
        let style = match kind {
            PlayerKind::Human => Style::default().fg(Color::Green),
            PlayerKind::Computer => Style::default().fg(Color::Magenta),
        };
        Span::styled(kind.label(), style)
    };

    let turn = if state.is_active() {
        Line::from(vec![
            Span::raw("To move: "),
            Span::styled(state.to_move().to_string(), side_style(state.to_move())),
        ])
    } else {
        Line::from("Game over")
    };

    let lines = vec![
        Line::from(Span::styled("Players", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![Span::styled("X ", side_style(Side::X)), kind_label(Side::X)]),
        Line::from(vec![Span::styled("O ", side_style(Side::O)), kind_label(Side::O)]),
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("X wins  {}", scores.wins(Side::X))),
        Line::from(format!("O wins  {}", scores.wins(Side::O))),
        Line::from(format!("Draws   {}", scores.draws())),
        Line::from(""),
        turn,
    ];

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Game"));
    frame.render_widget(panel, area);
}

fn draw_popup(frame: &mut Frame, area: Rect, message: &str) {
    let popup_area = center_rect(area, (message.len() as u16).saturating_add(8), 3);
    frame.render_widget(Clear, popup_area);
    let popup = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(popup, popup_area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    centered
}
