use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use lobby_logging::{lobby_error, lobby_warn, set_active_year};

use crate::{Aggregator, EngineConfig, FetchError, GalleryLoad, GallerySession};

enum EngineCommand {
    LoadYear { year: i32 },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GalleryLoaded(GalleryLoad),
    CacheCleared,
}

/// Runs a [`GallerySession`] on a worker thread.
///
/// Commands are handled one at a time in submission order, so each year is
/// fetched at most once even when requested repeatedly.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, FetchError> {
        let aggregator = Aggregator::from_config(&config)?;
        Ok(Self::with_aggregator(aggregator, config.gallery_limit))
    }

    pub fn with_aggregator(aggregator: Aggregator, limit: usize) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    lobby_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut session = GallerySession::new(aggregator, limit);
            while let Ok(command) = cmd_rx.recv() {
                let event = handle_command(&runtime, &mut session, command);
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load_year(&self, year: i32) {
        if self.cmd_tx.send(EngineCommand::LoadYear { year }).is_err() {
            lobby_warn!("Engine stopped, dropping load of {}", year);
        }
    }

    pub fn reset(&self) {
        if self.cmd_tx.send(EngineCommand::Reset).is_err() {
            lobby_warn!("Engine stopped, dropping cache reset");
        }
    }

    /// Blocks until the next event. `None` means the worker has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    session: &mut GallerySession,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::LoadYear { year } => {
            set_active_year(Some(year));
            let load = runtime.block_on(session.load_year(year));
            set_active_year(None);
            EngineEvent::GalleryLoaded(load)
        }
        EngineCommand::Reset => {
            session.reset();
            EngineEvent::CacheCleared
        }
    }
}
