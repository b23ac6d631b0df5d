//! Derived session metrics. Pure functions of elapsed time and the current
//! comparison counts, recomputed fully on every tick and input event so they
//! can never drift from the state they describe.

/// Floor applied to elapsed time so wpm stays finite at t≈0.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub wpm: f64,
    /// percentage in [0, 100]
    pub accuracy: f64,
    pub errors: usize,
    /// percentage of the target covered by the typed text, in [0, 100]
    pub progress: f64,
}

impl Metrics {
    /// wpm as shown to the user
    pub fn wpm_rounded(&self) -> u32 {
        self.wpm.round() as u32
    }

    /// accuracy as shown to the user (truncated, so 2/3 correct reads 66%)
    pub fn accuracy_int(&self) -> u32 {
        self.accuracy.floor() as u32
    }

    pub fn progress_int(&self) -> u32 {
        self.progress.floor() as u32
    }
}

/// Computes wpm (5-chars-per-word convention), accuracy, error count and
/// progress from the current counts.
pub fn compute(
    elapsed_secs: f64,
    correct: usize,
    incorrect: usize,
    total_typed: usize,
    typed_len: usize,
    target_len: usize,
) -> Metrics {
    let elapsed = elapsed_secs.max(MIN_ELAPSED_SECS);

    let wpm = ((correct as f64 / 5.0) / (elapsed / 60.0)).max(0.0);

    let accuracy = if total_typed == 0 {
        100.0
    } else {
        ((correct as f64 / total_typed as f64) * 100.0).clamp(0.0, 100.0)
    };

    let progress = if target_len == 0 {
        0.0
    } else {
        ((typed_len as f64 / target_len as f64) * 100.0).clamp(0.0, 100.0)
    };

    Metrics {
        wpm,
        accuracy,
        errors: incorrect,
        progress,
    }
}
