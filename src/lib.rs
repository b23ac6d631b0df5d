// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod compare;
pub mod config;
pub mod history;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod text_bank;
pub mod theme;
pub mod trainer;
pub mod ui;
pub mod util;

/// Interval of the periodic timer that refreshes time-dependent state
/// while a session is running.
pub const TICK_RATE_MS: u64 = 250;
