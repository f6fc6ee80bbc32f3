use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::monitor::Ticker;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// A sampling period elapsed. The receiver reads the clock itself when it
    /// gets to sampling, so time spent queued behind a redraw is counted.
    Tick,
    Resize,
}

/// Terminal input merged with the sampling cadence on one channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let task = tokio::spawn(async move {
            let mut input = EventStream::new();
            let mut ticker = Ticker::new(tick_rate);

            loop {
                let event = tokio::select! {
                    read = input.next() => match read {
                        Some(Ok(raw)) => translate(raw),
                        // Input closed or broken: nothing more can arrive.
                        Some(Err(_)) | None => break,
                    },
                    _ = ticker.tick() => Some(Event::Tick),
                };

                if let Some(event) = event
                    && tx.send(event).is_err()
                {
                    break;
                }
            }
        });

        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Only key presses and resizes matter; mouse, focus and paste are dropped.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}
