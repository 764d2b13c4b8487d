use chrono::{DateTime, Utc};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Wall-clock source for start/end markers and history dates.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Identifies one deferred mismatch clear. Only honoured while the engine is still on the same game generation and
/// the same pair is still face up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearToken {
    pub generation: u64,
    pub pair: [usize; 2],
}

/// One-shot timer queue of the host event loop. When `delay` has elapsed the host hands `token` back to
/// `MemoryGame::clear_mismatch`.
///
/// There is no cancellation: a token that outlived its game is ignored on delivery.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, token: ClearToken);
}
