//! Session lifecycle state machine.
//!
//! A session moves Idle → Running → Finished and never backwards; only an
//! explicit reset returns it to Idle. Elapsed time is always rederived from
//! the wall clock rather than accumulated, so ticks and input events can
//! interleave in any order without drift.

use crate::compare::{self, Comparison};
use crate::config::{Mode, SessionConfig};
use crate::history::ResultRecord;
use crate::metrics::{self, Metrics};
use crate::util::format_mm_ss;
use chrono::Local;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// One typing test against a fixed target passage.
#[derive(Debug)]
pub struct Session {
    pub config: SessionConfig,
    pub target: String,
    pub typed: String,
    pub phase: Phase,
    pub started_at: Option<SystemTime>,
    pub elapsed_secs: f64,
    pub comparison: Comparison,
    last_result: Option<ResultRecord>,
}

impl Session {
    pub fn new(config: SessionConfig, target: String) -> Self {
        let comparison = compare::compare(&target, "");
        Self {
            config,
            target,
            typed: String::new(),
            phase: Phase::Idle,
            started_at: None,
            elapsed_secs: 0.0,
            comparison,
            last_result: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Finished is terminal for input; everything before it accepts keys.
    pub fn input_enabled(&self) -> bool {
        self.phase != Phase::Finished
    }

    pub fn correct_chars(&self) -> usize {
        self.comparison.correct
    }

    pub fn incorrect_chars(&self) -> usize {
        self.comparison.incorrect
    }

    pub fn total_typed_chars(&self) -> usize {
        self.comparison.total_typed
    }

    fn target_len(&self) -> usize {
        self.comparison.verdicts.len()
    }

    fn refresh_elapsed(&mut self) {
        if let Some(started) = self.started_at {
            self.elapsed_secs = started.elapsed().unwrap_or_default().as_secs_f64();
        }
    }

    /// Seconds left on the countdown. Only meaningful in timed mode; shows
    /// the full configured duration while idle.
    pub fn seconds_remaining(&self) -> Option<f64> {
        match self.config.mode {
            Mode::Timed => {
                Some((self.config.duration_secs as f64 - self.elapsed_secs).max(0.0))
            }
            Mode::Words => None,
        }
    }

    /// mm:ss display value: countdown for timed mode, count-up for words.
    pub fn timer_display(&self) -> String {
        match self.seconds_remaining() {
            Some(remaining) => format_mm_ss(remaining),
            None => format_mm_ss(self.elapsed_secs),
        }
    }

    /// Current metrics snapshot, recomputed in full from elapsed time and
    /// the latest comparison.
    pub fn metrics(&self) -> Metrics {
        metrics::compute(
            self.elapsed_secs,
            self.comparison.correct,
            self.comparison.incorrect,
            self.comparison.total_typed,
            self.typed.chars().count(),
            self.target_len(),
        )
    }

    /// Applies a full replacement of the typed text. The first character
    /// starts the session; the comparator's completion conditions may finish
    /// it, in which case the final record is returned.
    pub fn on_input(&mut self, typed: String) -> Option<ResultRecord> {
        if self.phase == Phase::Finished {
            return None;
        }
        if self.phase == Phase::Idle {
            // the clock starts with the first character, not the first event
            if typed.is_empty() {
                return None;
            }
            self.phase = Phase::Running;
            self.started_at = Some(SystemTime::now());
        }

        self.typed = typed;
        self.refresh_elapsed();
        self.comparison = compare::compare(&self.target, &self.typed);

        if self.completion_reached() {
            return Some(self.finish());
        }
        None
    }

    fn completion_reached(&self) -> bool {
        match self.config.mode {
            // enough whitespace-delimited words entered
            Mode::Words => compare::typed_words(&self.typed) >= self.config.word_target,
            // passage exhausted before the countdown ran out;
            // finishing early here is deliberate
            Mode::Timed => self.typed.chars().count() >= self.target_len(),
        }
    }

    /// Advances the countdown. A tick arriving after the session left
    /// Running is a safe no-op.
    pub fn on_tick(&mut self) -> Option<ResultRecord> {
        if self.phase != Phase::Running {
            return None;
        }
        self.refresh_elapsed();
        if self.config.mode == Mode::Timed
            && self.elapsed_secs >= self.config.duration_secs as f64
        {
            return Some(self.finish());
        }
        None
    }

    fn finish(&mut self) -> ResultRecord {
        self.phase = Phase::Finished;
        let m = self.metrics();
        let time_sec = match self.config.mode {
            Mode::Timed => self.elapsed_secs.min(self.config.duration_secs as f64),
            Mode::Words => self.elapsed_secs,
        };
        let record = ResultRecord {
            date: Local::now(),
            mode: self.config.mode,
            difficulty: self.config.difficulty,
            duration_seconds: self.config.duration_secs,
            word_target: self.config.word_target,
            wpm: m.wpm_rounded(),
            accuracy: m.accuracy_int(),
            errors: m.errors,
            time_sec: time_sec.round() as u32,
            chars: self.comparison.total_typed,
        };
        self.last_result = Some(record.clone());
        record
    }

    /// Returns to Idle, clearing all typing state. Keeps the current target
    /// unless a replacement is supplied.
    pub fn reset(&mut self, new_target: Option<String>) {
        if let Some(target) = new_target {
            self.target = target;
        }
        self.typed.clear();
        self.phase = Phase::Idle;
        self.started_at = None;
        self.elapsed_secs = 0.0;
        self.comparison = compare::compare(&self.target, "");
        self.last_result = None;
    }

    /// Final snapshot of the most recently finished session, if any.
    pub fn last_result(&self) -> Option<&ResultRecord> {
        self.last_result.as_ref()
    }
}
