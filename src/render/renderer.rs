use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Board, Cell, Food, GameState};
use crate::metrics::GameMetrics;

/// Columns taken by one board cell
const CELL_WIDTH: usize = 2;
const HEADER_ROWS: usize = 3;
const FOOTER_ROWS: usize = 3;
/// Narrowest pane the game over text fits in
const BANNER_WIDTH: u16 = 32;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Terminal columns and rows needed to show `board` whole: two columns per
    /// cell plus the border, and the header and footer rows
    pub fn required_size(board: &Board) -> (u16, u16) {
        let columns = board.width() * CELL_WIDTH + 2;
        let rows = board.height() + 2 + HEADER_ROWS + FOOTER_ROWS;
        (
            u16::try_from(columns).unwrap_or(u16::MAX),
            u16::try_from(rows).unwrap_or(u16::MAX),
        )
    }

    pub fn fits(board: &Board, area: Rect) -> bool {
        let (columns, rows) = Self::required_size(board);
        area.width >= columns && area.height >= rows
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_ROWS as u16), // Header
                Constraint::Min(0),                     // Game area
                Constraint::Length(FOOTER_ROWS as u16), // Footer
            ])
            .split(area);

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        if !Self::fits(&state.board, area) {
            frame.render_widget(self.render_too_small(&state.board, area), chunks[1]);
        } else if state.is_over() {
            let banner_width = Self::required_size(&state.board).0.max(BANNER_WIDTH);
            frame.render_widget(self.render_game_over(state), centered(chunks[1], banner_width));
        } else {
            let grid_width = Self::required_size(&state.board).0;
            frame.render_widget(self.render_grid(state), centered(chunks[1], grid_width));
        }

        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    fn render_too_small(&self, board: &Board, area: Rect) -> Paragraph<'_> {
        let (columns, rows) = Self::required_size(board);
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "need {columns}x{rows}, have {}x{}",
                area.width, area.height
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let board = &state.board;
        let mut lines = Vec::with_capacity(board.height());

        for y in 0..board.height() {
            let spans: Vec<Span> = (0..board.width())
                .map(|x| self.cell_span(state, Cell::new(x as i32, y as i32)))
                .collect();
            lines.push(Line::from(spans));
        }

        let title = if state.is_paused() {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn cell_span(&self, state: &GameState, cell: Cell) -> Span<'static> {
        if cell == state.snake.head() {
            Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.snake.contains(cell) {
            Span::styled("□ ", Style::default().fg(Color::Green))
        } else if let Some(food) = state.board.food_at(cell) {
            food_span(food)
        } else if state.board.is_wall(cell) {
            Span::styled("▓▓", Style::default().fg(Color::Gray))
        } else {
            Span::styled(". ", Style::default().fg(Color::DarkGray))
        }
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Turns: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.turns.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Apples: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} (+{})", metrics.apples_eaten, metrics.growth_eaten),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if state.is_paused() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let cause = state
            .collision
            .map(|collision| format!("The snake {}", collision.describe()))
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to exit",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
        ];

        if state.board.variant().supports_pause() {
            spans.push(Span::styled("P", Style::default().fg(Color::Magenta)));
            spans.push(Span::raw(" to pause | "));
        }

        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A full-height slice of `area`, `width` columns wide and horizontally centered
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Bigger apples get louder glyphs
fn food_span(food: &Food) -> Span<'static> {
    let (glyph, color) = match food.size {
        0 | 1 => ("o ", Color::Red),
        2 => ("O ", Color::LightRed),
        _ => ("@ ", Color::Magenta),
    };

    Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, CollisionType, Direction, Snake, Status, Variant};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(state: &GameState) -> String {
        screen_sized(state, &GameMetrics::new(), 80, 24)
    }

    fn screen_sized(state: &GameState, metrics: &GameMetrics, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let renderer = Renderer::new();

        terminal
            .draw(|frame| renderer.render(frame, state, metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state(variant: Variant) -> GameState {
        let mut board = Board::new(20, 10, variant);
        board.place_food(Food::new(Cell::new(10, 5), 3));
        GameState::new(board, Snake::new(Cell::new(3, 1), Direction::Right, 3))
    }

    #[test]
    fn test_running_game_shows_board() {
        let text = screen(&state(Variant::Walled));

        assert!(text.contains("Score: 3"));
        assert!(text.contains("Snake"));
        assert!(text.contains("■"));
        assert!(text.contains("□"));
        assert!(text.contains("@"));
        assert!(text.contains("▓"));
        assert!(!text.contains("to pause"));
    }

    #[test]
    fn test_paused_game_is_marked() {
        let mut state = state(Variant::Classic);
        state.toggle_pause();

        let text = screen(&state);
        assert!(text.contains("PAUSED"));
        assert!(text.contains("to pause"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = state(Variant::Classic);
        state.status = Status::Over;
        state.collision = Some(CollisionType::SelfCollision);

        let text = screen(&state);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("bit its own tail"));
        assert!(text.contains("Final Score: 3"));
        assert!(!text.contains("■"));
    }

    #[test]
    fn test_apples_and_growth_in_header() {
        let mut metrics = GameMetrics::new();
        metrics.on_food_eaten(Food::new(Cell::new(4, 1), 3));
        metrics.on_food_eaten(Food::new(Cell::new(6, 1), 2));

        let text = screen_sized(&state(Variant::Walled), &metrics, 80, 24);
        assert!(text.contains("Apples: 2 (+5)"));
    }

    #[test]
    fn test_required_size() {
        let board = Board::new(20, 10, Variant::Classic);
        assert_eq!(Renderer::required_size(&board), (42, 18));

        let area = Rect::new(0, 0, 80, 24);
        assert!(Renderer::fits(&board, area));
        assert!(Renderer::fits(&Board::new(39, 16, Variant::Classic), area));
        assert!(!Renderer::fits(&Board::new(40, 10, Variant::Classic), area));
        assert!(!Renderer::fits(&Board::new(20, 19, Variant::Classic), area));
    }

    #[test]
    fn test_widest_fitting_board_shows_far_edge() {
        let state = GameState::new(
            Board::new(39, 10, Variant::Classic),
            Snake::new(Cell::new(38, 5), Direction::Right, 3),
        );

        let text = screen_sized(&state, &GameMetrics::new(), 80, 24);
        assert!(text.contains("■"));
        assert!(!text.contains("too small"));
    }

    #[test]
    fn test_board_wider_than_terminal_is_not_clipped() {
        let state = GameState::new(
            Board::new(60, 10, Variant::Classic),
            Snake::new(Cell::new(50, 5), Direction::Right, 3),
        );

        let text = screen_sized(&state, &GameMetrics::new(), 80, 24);
        assert!(text.contains("Terminal too small"));
        assert!(text.contains("need 122x18, have 80x24"));
        assert!(!text.contains("□"));
    }
}
