use chrono::{DateTime, Utc};
use core::time::Duration;
use gloo::timers::callback::Timeout;
use memento_core::{ClearToken, Clock, Scheduler};
use yew::Callback;

/// Browser wall clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

/// Runs mismatch clears on the browser event loop and posts the token back to the component.
pub struct TimeoutScheduler {
    callback: Callback<ClearToken>,
}

impl TimeoutScheduler {
    pub fn new(callback: Callback<ClearToken>) -> Self {
        Self { callback }
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&mut self, delay: Duration, token: ClearToken) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let callback = self.callback.clone();
        log::trace!("clear of {:?} due in {}ms", token.pair, millis);
        // never cancelled, the engine ignores tokens that outlived their game
        Timeout::new(millis, move || callback.emit(token)).forget();
    }
}

/// Helper function to use JavaScript's Math.random
pub fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
