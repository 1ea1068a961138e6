use anyhow::{Context, Result, ensure};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::{Action, Board, Direction, GameConfig, GameEngine, GameState, Status};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Time between two snake moves
const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (columns, rows) = terminal::size().context("Failed to read terminal size")?;
        check_terminal_size(&self.state.board, columns, rows)?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        log::info!(
            "session ended: score {}, {} turns, {} apples (+{} growth) in {}",
            self.state.score(),
            self.state.turns,
            self.metrics.apples_eaten,
            self.metrics.growth_eaten,
            self.metrics.format_time()
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = tick_timer();

        loop {
            self.draw(terminal)?;

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        // The game over banner waits for one more key
        if self.state.is_over() {
            self.should_quit = true;
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.pending_direction = Some(direction);
            }
            KeyAction::TogglePause => {
                if self.state.toggle_pause() {
                    log::debug!("pause toggled, now {:?}", self.state.status);
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if self.state.status != Status::Running {
            return;
        }

        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(&mut self.state, action);

        if let Some(food) = result.info.eaten {
            self.metrics.on_food_eaten(food);
        }

        if result.terminated {
            self.metrics.on_game_over();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Refuse boards the terminal cannot show in full
fn check_terminal_size(board: &Board, columns: u16, rows: u16) -> Result<()> {
    let (need_columns, need_rows) = Renderer::required_size(board);
    ensure!(
        columns >= need_columns && rows >= need_rows,
        "a {}x{} board needs a terminal of at least {}x{}, this one is {}x{}",
        board.width(),
        board.height(),
        need_columns,
        need_rows,
        columns,
        rows
    );
    Ok(())
}

/// Game clock. The first move comes one interval after the first frame.
fn tick_timer() -> Interval {
    let mut timer = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
