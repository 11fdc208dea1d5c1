use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::{FutureExt, StreamExt};
use habitpro_types::ContactRecord;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::admin::{FetchFailure, LoginOutcome};
use crate::identity::IdentityError;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Quit,
    // Async operation results
    LoginFinished { result: Result<LoginOutcome, IdentityError> },
    ContactsLoaded { generation: u64, records: Vec<ContactRecord> },
    ContactsFailed { generation: u64, failure: FetchFailure },
    SessionCleared,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // Terminal input and the UI tick share one channel with task results
        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

            loop {
                let tick_delay = tick_interval.tick();
                let event_delay = reader.next().fuse();

                tokio::select! {
                    _ = tick_delay => {
                        if tx_clone.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    maybe_event = event_delay => {
                        match maybe_event {
                            Some(Ok(CrosstermEvent::Key(key))) => {
                                if key.kind == event::KeyEventKind::Press
                                    && tx_clone.send(AppEvent::Key(key)).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => {
                                if tx_clone.send(AppEvent::Quit).is_err() {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
        });

        Self { rx, tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// Get a sender for dispatching async results back to the event loop
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }
}
