use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Durations (in seconds) a timed session may be configured with.
pub const DURATION_CHOICES: [u32; 4] = [15, 30, 60, 120];

/// Word counts a words session may be configured with.
pub const WORD_TARGET_CHOICES: [usize; 4] = [10, 25, 50, 100];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// run against a countdown; the session ends when time expires
    /// or the passage is exhausted, whichever comes first
    Timed,
    /// type until a fixed number of words has been entered
    Words,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Rejected configuration values. Out-of-enum durations and word targets are
/// refused at this boundary before they can reach a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedDuration(u32),
    UnsupportedWordTarget(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedDuration(secs) => {
                write!(f, "unsupported duration {}s (choose one of {:?})", secs, DURATION_CHOICES)
            }
            ConfigError::UnsupportedWordTarget(words) => {
                write!(
                    f,
                    "unsupported word target {} (choose one of {:?})",
                    words, WORD_TARGET_CHOICES
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parameters of a single test. Immutable while a session runs; the trainer
/// regenerates the target text and resets to idle on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
    pub duration_secs: u32,
    pub word_target: usize,
    pub difficulty: Difficulty,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Timed,
            duration_secs: 60,
            word_target: 25,
            difficulty: Difficulty::Medium,
        }
    }
}

impl SessionConfig {
    pub fn with_duration(mut self, secs: u32) -> Result<Self, ConfigError> {
        if !DURATION_CHOICES.contains(&secs) {
            return Err(ConfigError::UnsupportedDuration(secs));
        }
        self.duration_secs = secs;
        Ok(self)
    }

    pub fn with_word_target(mut self, words: usize) -> Result<Self, ConfigError> {
        if !WORD_TARGET_CHOICES.contains(&words) {
            return Err(ConfigError::UnsupportedWordTarget(words));
        }
        self.word_target = words;
        Ok(self)
    }
}
