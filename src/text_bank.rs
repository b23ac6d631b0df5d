//! Difficulty-tagged sample corpora and target-passage synthesis.
//!
//! Generation is random but deliberately takes the RNG as a parameter so
//! tests can seed it and assert on exact output; production callers pass
//! `rand::thread_rng()`.

use crate::config::{Difficulty, Mode, SessionConfig};
use rand::seq::SliceRandom;
use rand::Rng;

/// Extra words appended past the configured target in words mode so the
/// test is never starved of target characters near the end.
const WORDS_MARGIN: usize = 20;

/// Sentences joined for a timed passage before any length hedge.
const TIMED_BASE_SENTENCES: usize = 3;

const EASY: [&str; 4] = [
    "the quiet cat sat near the warm fire and watched the rain fall outside",
    "short words come fast when the hands are calm and the eyes stay ahead",
    "a walk in the park is a fine way to end a long and busy day",
    "keep your pace slow and even and the right keys will find themselves",
];

const MEDIUM: [&str; 4] = [
    "Accuracy beats raw speed; a steady rhythm carries you further than bursts ever will.",
    "Practice rewards patience, and consistent sessions build habits that survive pressure.",
    "Keep your wrists relaxed, your eyes on the next word, and let the fingers follow.",
    "The clock matters less than control, even when the countdown is ticking away.",
];

const HARD: [&str; 4] = [
    "Precision matters: numbers (like 3.14), semicolons; and commas punish careless typing.",
    "Developers juggle APIs, caching layers, and edge cases without breaking their flow.",
    "When pressure rises, correct mistakes quickly & keep a clean, deliberate cadence.",
    "Symbols such as {braces}, [brackets], and \"quotes\" demand precise finger travel.",
];

/// Sample corpus for one difficulty level.
pub fn sentences(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Synthesizes a target passage long enough for the configured session.
///
/// Words mode keeps appending random sentences (with replacement) until the
/// word count exceeds `word_target + WORDS_MARGIN`. Timed mode joins a fixed
/// base count and hedges with one extra sentence for sessions of a minute or
/// more. Only a lower length bound is guaranteed.
pub fn generate<R: Rng>(config: &SessionConfig, rng: &mut R) -> String {
    let bank = sentences(config.difficulty);
    let pick = |rng: &mut R| -> &'static str {
        // bank is a non-empty static array, choose cannot fail
        bank.choose(rng).copied().unwrap_or(bank[0])
    };

    let mut text = String::new();
    match config.mode {
        Mode::Words => {
            let need = config.word_target + WORDS_MARGIN;
            while word_count(&text) <= need {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(pick(rng));
            }
        }
        Mode::Timed => {
            let mut count = TIMED_BASE_SENTENCES;
            if config.duration_secs >= 60 {
                count += 1;
            }
            for i in 0..count {
                if i > 0 {
                    text.push(' ');
                }
                text.push_str(pick(rng));
            }
        }
    }

    text.trim().to_string()
}
