//! Single-threaded event loop
//!
//! Player input and countdown ticks arrive on one queue and are applied to
//! the engine one at a time, so two events never interleave mid-transition.
//! After every event the loop re-syncs its ticker with the engine's live
//! countdown: a resolved round, a completed session or a new round all
//! retire the old ticker before a new one can start.

use crate::game::engine::{GameEngine, Transition};
use crate::game::ticker::{Event, Ticker};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Whether the loop keeps running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Presentation-side reactions to events
pub trait EventHandler {
    /// Apply one line of player input to the engine
    fn on_input(&mut self, engine: &mut GameEngine, line: &str) -> Flow;

    /// Called after every accepted timer tick
    fn on_tick(&mut self, _engine: &GameEngine, _transition: &Transition) -> Flow {
        Flow::Continue
    }
}

pub struct EventLoop {
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    ticker: Option<Ticker>,
    period: Duration,
}

impl EventLoop {
    /// Event loop with one-second ticks
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        let (tx, rx) = unbounded_channel();
        EventLoop {
            tx,
            rx,
            ticker: None,
            period,
        }
    }

    /// Sender for feeding events from other tasks
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Token of the running ticker, if any
    pub fn running_timer(&self) -> Option<crate::game::TimerToken> {
        self.ticker.as_ref().map(Ticker::token)
    }

    /// Keep exactly one ticker alive for the engine's live countdown
    pub fn sync_timer(&mut self, engine: &GameEngine) {
        match engine.active_timer() {
            Some(token) if self.running_timer() == Some(token) => {}
            Some(token) => {
                self.ticker = Some(Ticker::spawn(token, self.period, self.tx.clone()));
            }
            None => self.ticker = None,
        }
    }

    /// Process events until the handler quits or input closes
    pub async fn run<H: EventHandler>(&mut self, engine: &mut GameEngine, handler: &mut H) {
        self.sync_timer(engine);
        while let Some(event) = self.rx.recv().await {
            let flow = match event {
                Event::Input(line) => handler.on_input(engine, &line),
                Event::Tick(token) => match engine.tick(token) {
                    Ok(transition) => handler.on_tick(engine, &transition),
                    Err(_) => Flow::Continue,
                },
                Event::InputClosed => Flow::Quit,
            };
            self.sync_timer(engine);
            if flow == Flow::Quit {
                break;
            }
        }
        self.ticker = None;
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward every line of `reader` as `Event::Input`, then `Event::InputClosed`
pub fn spawn_line_reader<R>(reader: R, tx: UnboundedSender<Event>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    })
}
