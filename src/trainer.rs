//! Command surface of the engine: owns the session, the passage generator's
//! RNG, and the history log, and turns the presentation layer's discrete
//! commands into state-machine transitions.

use crate::config::{ConfigError, Difficulty, Mode, SessionConfig};
use crate::history::{History, KvStore, ResultRecord};
use crate::session::Session;
use crate::text_bank;
use rand::Rng;

#[derive(Debug)]
pub struct Trainer<S: KvStore, R: Rng> {
    pub session: Session,
    history: History<S>,
    rng: R,
    paste_rejected: bool,
}

impl<S: KvStore, R: Rng> Trainer<S, R> {
    pub fn new(config: SessionConfig, store: S, mut rng: R) -> Self {
        let target = text_bank::generate(&config, &mut rng);
        Self {
            session: Session::new(config, target),
            history: History::new(store),
            rng,
            paste_rejected: false,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.session.config
    }

    fn reset_with_new_text(&mut self) {
        let target = text_bank::generate(&self.session.config, &mut self.rng);
        self.session.reset(Some(target));
    }

    /// Every configuration command regenerates the target under the new
    /// parameters and drops back to Idle.
    pub fn set_mode(&mut self, mode: Mode) {
        self.session.config.mode = mode;
        self.reset_with_new_text();
    }

    pub fn set_duration(&mut self, secs: u32) -> Result<(), ConfigError> {
        self.session.config = self.session.config.with_duration(secs)?;
        self.reset_with_new_text();
        Ok(())
    }

    pub fn set_word_target(&mut self, words: usize) -> Result<(), ConfigError> {
        self.session.config = self.session.config.with_word_target(words)?;
        self.reset_with_new_text();
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.session.config.difficulty = difficulty;
        self.reset_with_new_text();
    }

    /// Fresh passage under the current configuration.
    pub fn request_new_text(&mut self) {
        self.reset_with_new_text();
    }

    /// Back to Idle keeping the current passage.
    pub fn request_reset(&mut self) {
        self.session.reset(None);
    }

    /// Full replacement of the typed text; the only command that can start
    /// or finish a session. Returns true when it finished one.
    pub fn input_changed(&mut self, typed: String) -> bool {
        match self.session.on_input(typed) {
            Some(record) => {
                self.record_result(record);
                true
            }
            None => false,
        }
    }

    /// Single-keystroke convenience for the TUI; appends to the current
    /// typed text and routes through [`Trainer::input_changed`].
    pub fn type_char(&mut self, c: char) -> bool {
        if !self.session.input_enabled() {
            return false;
        }
        let mut typed = self.session.typed.clone();
        typed.push(c);
        self.input_changed(typed)
    }

    pub fn backspace(&mut self) {
        if !self.session.input_enabled() || self.session.typed.is_empty() {
            return;
        }
        let mut typed = self.session.typed.clone();
        typed.pop();
        self.input_changed(typed);
    }

    /// Periodic timer tick. Returns true when a timed session expired.
    pub fn on_tick(&mut self) -> bool {
        match self.session.on_tick() {
            Some(record) => {
                self.record_result(record);
                true
            }
            None => false,
        }
    }

    fn record_result(&mut self, record: ResultRecord) {
        // persistence failures are not worth interrupting the session for
        let _ = self.history.append(record);
    }

    pub fn history(&self) -> Vec<ResultRecord> {
        self.history.list()
    }

    pub fn clear_history(&mut self) {
        let _ = self.history.clear();
    }

    pub fn store(&self) -> &S {
        self.history.store()
    }

    /// Paste never reaches the typed text; remember that it happened so the
    /// UI can show the advisory.
    pub fn paste_attempted(&mut self) {
        if self.session.input_enabled() {
            self.paste_rejected = true;
        }
    }

    pub fn take_paste_notice(&mut self) -> bool {
        std::mem::take(&mut self.paste_rejected)
    }
}
