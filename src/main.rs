//! BLOCKFALL - a neon falling-block puzzle for the terminal

mod board;
mod game;
mod input;
mod leaderboard;
mod piece;
mod score;
mod settings;
mod shape;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Action, Game};
use input::InputHandler;
use leaderboard::Leaderboard;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use settings::{Settings, MAX_NAME_LEN};
use std::{
    io::{self, stdout},
    sync::mpsc::{self, Receiver, Sender},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Which screen the application is on
enum Screen {
    NameEntry {
        name: String,
    },
    Playing {
        game: Game,
        paused: bool,
        /// When the tick driver last advanced the game
        last_tick: Instant,
    },
}

/// Application state around the engine: screens, tick driver, score sink
struct App {
    screen: Screen,
    player: String,
    settings: Settings,
    input: InputHandler,
    leaderboard: Leaderboard,
    show_leaderboard: bool,
    /// Rank of the most recent result, for highlighting
    last_rank: Option<usize>,
    score_tx: Sender<u64>,
    score_rx: Receiver<u64>,
}

impl App {
    fn new(settings: Settings) -> Self {
        let (score_tx, score_rx) = mpsc::channel();
        Self {
            screen: Screen::NameEntry {
                name: settings.player.last_name.clone(),
            },
            player: String::new(),
            input: InputHandler::from_settings(&settings),
            settings,
            leaderboard: Leaderboard::new(),
            show_leaderboard: false,
            last_rank: None,
            score_tx,
            score_rx,
        }
    }

    fn start_game(&mut self) {
        let mut game = Game::new();
        let tx = self.score_tx.clone();
        game.on_game_over(move |score| {
            let _ = tx.send(score);
        });
        game.spawn();

        tracing::info!("Starting game for {}", self.player);
        self.show_leaderboard = false;
        self.screen = Screen::Playing {
            game,
            paused: false,
            last_tick: Instant::now(),
        };
    }

    fn render(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::NameEntry { name } => ui::render_name_entry(frame, name),
            Screen::Playing { game, paused, .. } => {
                ui::render_game(frame, &game.snapshot(), &self.player, &self.settings, *paused)
            }
        }
        if self.show_leaderboard {
            ui::render_leaderboard(frame, &self.leaderboard, self.last_rank);
        }
    }

    /// Handle a key press; returns false when the app should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return false;
        }
        if key.code == KeyCode::Tab {
            let game_running = matches!(&self.screen, Screen::Playing { game, .. } if !game.is_over());
            if !game_running {
                self.show_leaderboard = !self.show_leaderboard;
            }
            return true;
        }

        match &mut self.screen {
            Screen::NameEntry { name } => match key.code {
                KeyCode::Esc => return false,
                KeyCode::Enter => {
                    let trimmed = name.trim();
                    if !trimmed.is_empty() {
                        self.player = trimmed.to_string();
                        self.settings.player.last_name = self.player.clone();
                        self.start_game();
                    }
                }
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(c) if !c.is_control() && name.chars().count() < MAX_NAME_LEN => {
                    name.push(c);
                }
                _ => {}
            },
            Screen::Playing {
                game,
                paused,
                last_tick,
            } => {
                if game.is_over() {
                    match key.code {
                        KeyCode::Enter => self.start_game(),
                        _ => {
                            if self.input.action_for(key) == Some(Action::Quit) {
                                return false;
                            }
                        }
                    }
                    return true;
                }

                match self.input.action_for(key) {
                    Some(Action::Quit) => return false,
                    Some(Action::Pause) => {
                        *paused = !*paused;
                        if !*paused {
                            *last_tick = Instant::now();
                        }
                    }
                    Some(action) if !*paused => game.process_action(action),
                    _ => {}
                }
            }
        }
        true
    }

    /// Tick driver: advance once the current drop interval has elapsed
    fn tick(&mut self) {
        if let Screen::Playing {
            game,
            paused,
            last_tick,
        } = &mut self.screen
        {
            if !*paused && !game.is_over() && last_tick.elapsed() >= game.drop_interval() {
                game.advance();
                *last_tick = Instant::now();
            }
        }

        while let Ok(score) = self.score_rx.try_recv() {
            self.last_rank = self.leaderboard.record(&self.player, score);
            tracing::info!(
                "{} finished with {} (rank {:?})",
                self.player,
                score,
                self.last_rank.map(|rank| rank + 1)
            );
        }
    }
}

/// Get the log directory, creating it if needed
fn log_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Stdout belongs to the terminal UI, so logs go to a file
    let dir = log_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        dir.join(&log_file).display()
    );

    let mut app = App::new(Settings::load());

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = app.settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        println!("\nThanks for playing BLOCKFALL!");
        if let Some(best) = app.leaderboard.best() {
            println!("Best this session: {} by {}", best.score, best.name);
        }
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                    tracing::info!("Quitting");
                    return Ok(());
                }
            }
        }

        app.tick();
    }
}
