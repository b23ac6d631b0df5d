//! Terminal event pump.
//!
//! The trainer reacts to two kinds of stimulus: discrete terminal events
//! and the periodic tick that keeps the clock moving while the keyboard
//! is silent. [`Runner`] merges both into one stream by waiting on an
//! event source for at most one tick interval and manufacturing a
//! [`TrainerEvent::Tick`] when nothing arrives in time.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::TICK_RATE_MS;

/// Everything the trainer loop reacts to.
#[derive(Clone, Debug)]
pub enum TrainerEvent {
    Key(KeyEvent),
    /// Bracketed-paste payload. The trainer refuses it wholesale.
    Paste(String),
    Resize,
    Tick,
}

/// Where events come from. Production uses crossterm; headless tests
/// feed a plain channel instead.
pub trait TrainerEventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError>;
}

fn translate(ev: CtEvent) -> Option<TrainerEvent> {
    match ev {
        CtEvent::Key(key) => Some(TrainerEvent::Key(key)),
        CtEvent::Paste(data) => Some(TrainerEvent::Paste(data)),
        CtEvent::Resize(..) => Some(TrainerEvent::Resize),
        _ => None,
    }
}

/// Reads crossterm events on a background thread and forwards the ones
/// the trainer cares about. The thread exits when the receiver is
/// dropped or the terminal read fails.
pub struct CrosstermEventSource {
    rx: Receiver<TrainerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if let Some(ev) = translate(ev) {
                    if tx.send(ev).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainerEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-backed source for driving the loop from tests.
pub struct TestEventSource {
    rx: Receiver<TrainerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TrainerEvent>) -> Self {
        Self { rx }
    }
}

impl TrainerEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Pulls the next stimulus for the trainer, one call per loop iteration.
pub struct Runner<E: TrainerEventSource> {
    source: E,
    tick_every: Duration,
}

impl<E: TrainerEventSource> Runner<E> {
    /// Runner at the standard quarter-second tick cadence.
    pub fn new(source: E) -> Self {
        Self::with_tick_interval(source, Duration::from_millis(TICK_RATE_MS))
    }

    /// Shorter intervals keep headless tests fast.
    pub fn with_tick_interval(source: E, tick_every: Duration) -> Self {
        Self { source, tick_every }
    }

    /// Next event from the source, or a tick if it stays quiet for one
    /// interval. A closed source keeps ticking rather than wedging the
    /// loop.
    pub fn next_event(&self) -> TrainerEvent {
        match self.source.recv_timeout(self.tick_every) {
            Ok(ev) => ev,
            Err(_) => TrainerEvent::Tick,
        }
    }
}
