use chrono::{DateTime, Utc};
use core::cell::{Cell, RefCell};
use core::time::Duration;
use std::rc::Rc;

use crate::*;

/// Fixed instant `ms` milliseconds after an arbitrary epoch.
pub(crate) fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
}

/// `[1-1, 1-2, 2-1, 2-2]`: pairs at (0, 1) and (2, 3).
pub(crate) fn two_pair_board() -> Board {
    Board::from_cards(vec![
        CATALOG[0].card(1),
        CATALOG[0].card(2),
        CATALOG[1].card(1),
        CATALOG[1].card(2),
    ])
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ManualClock {
    offset: Rc<Cell<i64>>,
}

impl ManualClock {
    pub(crate) fn advance(&self, ms: i64) {
        self.offset.set(self.offset.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        at(self.offset.get())
    }
}

/// Timer queue the test drives by hand, standing in for the host event loop.
#[derive(Clone, Debug, Default)]
pub(crate) struct ManualScheduler {
    queue: Rc<RefCell<Vec<(Duration, ClearToken)>>>,
}

impl ManualScheduler {
    pub(crate) fn pending(&self) -> Vec<(Duration, ClearToken)> {
        self.queue.borrow().clone()
    }

    pub(crate) fn take(&self) -> Vec<ClearToken> {
        self.queue
            .borrow_mut()
            .drain(..)
            .map(|(_, token)| token)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, token: ClearToken) {
        self.queue.borrow_mut().push((delay, token));
    }
}
