use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::rngs::ThreadRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use typr::{
    config::{Difficulty, Mode, SessionConfig, DURATION_CHOICES, WORD_TARGET_CHOICES},
    history::FileKvStore,
    runtime::{CrosstermEventSource, Runner, TrainerEvent},
    theme::Theme,
    trainer::Trainer,
    ui::{HistoryView, ResultsView, TypingView, IDLE_HINT, PASTE_HINT},
};

/// interactive typing speed trainer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed trainer with live per-character feedback, timed and word-count sessions, difficulty-tagged passages, and a persisted history of recent results."
)]
pub struct Cli {
    /// test mode
    #[clap(short, long, value_enum, default_value_t = Mode::Timed)]
    mode: Mode,

    /// countdown length for timed mode (15/30/60/120)
    #[clap(short, long, default_value_t = 60)]
    seconds: u32,

    /// word count for words mode (10/25/50/100)
    #[clap(short, long, default_value_t = 25)]
    words: usize,

    /// passage difficulty
    #[clap(short, long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
}

impl Cli {
    fn to_session_config(&self) -> Result<SessionConfig, typr::config::ConfigError> {
        let config = SessionConfig {
            mode: self.mode,
            difficulty: self.difficulty,
            ..Default::default()
        };
        config.with_duration(self.seconds)?.with_word_target(self.words)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Typing,
    Results,
    History,
}

pub struct App {
    pub trainer: Trainer<FileKvStore, ThreadRng>,
    pub screen: Screen,
    pub theme: Theme,
    hint: &'static str,
    /// screen to return to when leaving the history view
    history_from: Screen,
}

impl App {
    pub fn new(config: SessionConfig) -> Self {
        let store = FileKvStore::new();
        let theme = Theme::load(&store);
        Self {
            trainer: Trainer::new(config, store, rand::thread_rng()),
            screen: Screen::Typing,
            theme,
            hint: IDLE_HINT,
            history_from: Screen::Typing,
        }
    }

    fn draw(&self, f: &mut Frame) {
        let palette = self.theme.palette();
        match self.screen {
            Screen::Typing => f.render_widget(
                TypingView {
                    session: &self.trainer.session,
                    hint: self.hint,
                    palette,
                },
                f.area(),
            ),
            Screen::Results => match self.trainer.session.last_result() {
                Some(record) => f.render_widget(ResultsView { record, palette }, f.area()),
                None => f.render_widget(
                    TypingView {
                        session: &self.trainer.session,
                        hint: self.hint,
                        palette,
                    },
                    f.area(),
                ),
            },
            Screen::History => f.render_widget(
                HistoryView {
                    records: &self.trainer.history(),
                    palette,
                },
                f.area(),
            ),
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        let _ = self.theme.save(self.trainer.store());
    }

    fn reset_keep_text(&mut self) {
        self.trainer.request_reset();
        self.hint = IDLE_HINT;
        self.screen = Screen::Typing;
    }

    fn new_text(&mut self) {
        self.trainer.request_new_text();
        self.hint = IDLE_HINT;
        self.screen = Screen::Typing;
    }

    fn open_history(&mut self) {
        self.history_from = self.screen;
        self.screen = Screen::History;
    }

    fn cycle_mode(&mut self) {
        let next = match self.trainer.config().mode {
            Mode::Timed => Mode::Words,
            Mode::Words => Mode::Timed,
        };
        self.trainer.set_mode(next);
        self.reset_hint();
    }

    fn cycle_difficulty(&mut self) {
        let next = match self.trainer.config().difficulty {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        };
        self.trainer.set_difficulty(next);
        self.reset_hint();
    }

    fn cycle_duration(&mut self) {
        let next = next_choice(&DURATION_CHOICES, self.trainer.config().duration_secs);
        // drawn from the enumerated set, cannot be rejected
        let _ = self.trainer.set_duration(next);
        self.reset_hint();
    }

    fn cycle_word_target(&mut self) {
        let next = next_choice(&WORD_TARGET_CHOICES, self.trainer.config().word_target);
        let _ = self.trainer.set_word_target(next);
        self.reset_hint();
    }

    fn reset_hint(&mut self) {
        self.hint = IDLE_HINT;
        self.screen = Screen::Typing;
    }
}

fn next_choice<T: Copy + PartialEq>(choices: &[T], current: T) -> T {
    let idx = choices.iter().position(|c| *c == current).unwrap_or(0);
    choices[(idx + 1) % choices.len()]
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match cli.to_session_config() {
        Ok(config) => config,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, e).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    loop {
        terminal.draw(|f| app.draw(f))?;

        match runner.next_event() {
            TrainerEvent::Tick => {
                if app.trainer.on_tick() {
                    app.screen = Screen::Results;
                }
            }
            TrainerEvent::Resize => {}
            TrainerEvent::Paste(_) => {
                // rejected unconditionally; never admitted into the session
                app.trainer.paste_attempted();
                if app.trainer.take_paste_notice() {
                    app.hint = PASTE_HINT;
                }
            }
            TrainerEvent::Key(key) => {
                if is_quit(&key) {
                    return Ok(());
                }
                handle_key(app, key);
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match app.screen {
        Screen::Typing => handle_typing_key(app, key),
        Screen::Results => handle_results_key(app, key),
        Screen::History => handle_history_key(app, key),
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Backspace => app.trainer.backspace(),
        KeyCode::Left => app.reset_keep_text(),
        KeyCode::Right => app.new_text(),
        KeyCode::Tab => app.cycle_mode(),
        KeyCode::Char('d') if ctrl => app.cycle_difficulty(),
        KeyCode::Char('s') if ctrl => app.cycle_duration(),
        KeyCode::Char('w') if ctrl => app.cycle_word_target(),
        KeyCode::Char('t') if ctrl => app.toggle_theme(),
        KeyCode::Char('y') if ctrl => app.open_history(),
        KeyCode::Char(c) if !ctrl => {
            app.hint = IDLE_HINT;
            if app.trainer.type_char(c) {
                app.screen = Screen::Results;
            }
        }
        _ => {}
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.reset_keep_text(),
        KeyCode::Char('n') => app.new_text(),
        KeyCode::Char('h') => app.open_history(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('m') => app.cycle_mode(),
        KeyCode::Char('d') => app.cycle_difficulty(),
        KeyCode::Char('s') => app.cycle_duration(),
        KeyCode::Char('w') => app.cycle_word_target(),
        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') => app.trainer.clear_history(),
        KeyCode::Char('b') | KeyCode::Backspace => app.screen = app.history_from,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App {
        // App::new would touch the real config dir; build one on a temp store
        let dir = tempfile::tempdir().unwrap().into_path();
        let store = FileKvStore::with_dir(dir);
        let theme = Theme::load(&store);
        App {
            trainer: Trainer::new(SessionConfig::default(), store, rand::thread_rng()),
            screen: Screen::Typing,
            theme,
            hint: IDLE_HINT,
            history_from: Screen::Typing,
        }
    }

    #[test]
    fn cli_defaults_build_a_valid_config() {
        let cli = Cli::parse_from(["typr"]);
        let config = cli.to_session_config().unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn cli_rejects_out_of_enum_seconds() {
        let cli = Cli::parse_from(["typr", "--seconds", "42"]);
        assert!(cli.to_session_config().is_err());
    }

    #[test]
    fn cli_parses_words_mode() {
        let cli = Cli::parse_from(["typr", "-m", "words", "-w", "50", "-d", "hard"]);
        let config = cli.to_session_config().unwrap();
        assert_eq!(config.mode, Mode::Words);
        assert_eq!(config.word_target, 50);
        assert_eq!(config.difficulty, Difficulty::Hard);
    }

    #[test]
    fn next_choice_cycles_and_wraps() {
        assert_eq!(next_choice(&DURATION_CHOICES, 15), 30);
        assert_eq!(next_choice(&DURATION_CHOICES, 120), 15);
        assert_eq!(next_choice(&WORD_TARGET_CHOICES, 100), 10);
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        assert!(is_quit(&key(KeyCode::Esc)));
        assert!(is_quit(&ctrl_key('c')));
        assert!(!is_quit(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn typing_keys_feed_the_session() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.trainer.session.typed, "x");
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.trainer.session.typed, "");
    }

    #[test]
    fn tab_toggles_mode_and_resets() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.trainer.config().mode, Mode::Words);
        assert_eq!(app.trainer.session.typed, "");
    }

    #[test]
    fn ctrl_s_cycles_duration() {
        let mut app = test_app();
        handle_key(&mut app, ctrl_key('s'));
        assert_eq!(app.trainer.config().duration_secs, 120);
        handle_key(&mut app, ctrl_key('s'));
        assert_eq!(app.trainer.config().duration_secs, 15);
    }

    #[test]
    fn history_screen_returns_where_it_came_from() {
        let mut app = test_app();
        app.open_history();
        assert_eq!(app.screen, Screen::History);
        handle_key(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.screen, Screen::Typing);
    }
}
