//! One-second countdown ticks
//!
//! A `Ticker` is the scheduled task behind one live countdown. It stamps
//! every tick with the token it was started for and stops when dropped.

use crate::game::session::TimerToken;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Everything the event loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One line of player input
    Input(String),
    /// One period of a countdown elapsed
    Tick(TimerToken),
    /// The input source is exhausted
    InputClosed,
}

/// A running countdown task
#[derive(Debug)]
pub struct Ticker {
    token: TimerToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start sending `Event::Tick(token)` every `period`, first one after a full period
    pub fn spawn(token: TimerToken, period: Duration, tx: UnboundedSender<Event>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick(token)).is_err() {
                    break;
                }
            }
        });
        Ticker { token, handle }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    /// Stop ticking; equivalent to dropping the ticker
    pub fn cancel(self) {}
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
