//! Async adapter between the external collaborators and the presentation.
//!
//! The page driver and the connectivity monitor push [`LoadEvent`]s through a
//! cloneable [`EventSink`]. A single worker task owns the
//! [`LoadStateMachine`], applies one event at a time and publishes every new
//! state in two ways:
//!
//! - a `watch` cell holding the latest snapshot, for renderers that only care
//!   about "now";
//! - a `broadcast` channel delivering every published state in order, for
//!   observers that need the full sequence.
//!
//! The snapshot cell is replaced before the broadcast is sent, so a
//! subscriber that receives a state always finds the cell at least that far.
//! Requires a running Tokio runtime.

use tokio::{
    sync::{
        broadcast::{self, error::RecvError, error::TryRecvError},
        mpsc, watch,
    },
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    config::LoadConfig,
    error::AdapterError,
    event::LoadEvent,
    machine::{LoadStateMachine, Transition},
    state::LoadState,
};

#[derive(Debug)]
enum Command {
    Event(LoadEvent),
    Shutdown,
}

/// Sending half handed to the page driver and the connectivity monitor.
///
/// Cheap to clone (wraps an unbounded sender). Sending never blocks.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<Command>,
}

impl EventSink {
    /// Fails only once the adapter worker has stopped.
    pub fn send(&self, event: LoadEvent) -> Result<(), AdapterError> {
        self.tx
            .send(Command::Event(event))
            .map_err(|_| AdapterError::Closed)
    }

    pub fn load_started(&self) -> Result<(), AdapterError> {
        self.send(LoadEvent::LoadStarted)
    }

    pub fn load_progressed(&self, fraction: f64) -> Result<(), AdapterError> {
        self.send(LoadEvent::progressed(fraction))
    }

    pub fn load_finished(&self) -> Result<(), AdapterError> {
        self.send(LoadEvent::LoadFinished)
    }

    pub fn load_failed(&self, message: impl Into<String>) -> Result<(), AdapterError> {
        self.send(LoadEvent::failed(message))
    }

    pub fn connectivity_lost(&self) -> Result<(), AdapterError> {
        self.send(LoadEvent::ConnectivityLost)
    }

    pub fn connectivity_restored(&self) -> Result<(), AdapterError> {
        self.send(LoadEvent::ConnectivityRestored)
    }

    /// Edge event from a boolean reachability signal.
    pub fn connectivity_changed(&self, online: bool) -> Result<(), AdapterError> {
        if online {
            self.connectivity_restored()
        } else {
            self.connectivity_lost()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Ordered stream of published states.
pub struct LoadStateSubscription {
    rx: broadcast::Receiver<LoadState>,
}

impl LoadStateSubscription {
    /// Next published state; `None` once the adapter has shut down.
    ///
    /// A subscriber that falls behind by more than the configured buffer
    /// skips the missed states.
    pub async fn recv(&mut self) -> Option<LoadState> {
        loop {
            match self.rx.recv().await {
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "load state subscriber lagged behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<LoadState> {
        loop {
            match self.rx.try_recv() {
                Ok(state) => return Some(state),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "load state subscriber lagged behind");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

/// Handle to the running adapter worker.
pub struct LoadStateAdapter {
    sink: EventSink,
    snapshot: watch::Receiver<LoadState>,
    updates: broadcast::Sender<LoadState>,
    worker: JoinHandle<LoadState>,
}

impl LoadStateAdapter {
    pub fn spawn(config: &LoadConfig) -> Self {
        Self::spawn_with(LoadStateMachine::from_config(config), config.event_buffer)
    }

    /// Spawns the worker around an existing machine.
    ///
    /// `event_buffer` is clamped to at least one slot.
    pub fn spawn_with(machine: LoadStateMachine, event_buffer: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot) = watch::channel(machine.current().clone());
        let (updates, _) = broadcast::channel(event_buffer.max(1));

        let worker = Worker {
            rx,
            machine,
            snapshot: snapshot_tx,
            updates: updates.clone(),
        };

        Self {
            sink: EventSink { tx },
            snapshot,
            updates,
            worker: tokio::spawn(worker.run()),
        }
    }

    pub fn sink(&self) -> EventSink {
        self.sink.clone()
    }

    /// Latest published state.
    pub fn snapshot(&self) -> LoadState {
        self.snapshot.borrow().clone()
    }

    /// Latest-value cell; use `changed()` to wait for the next state.
    pub fn watch(&self) -> watch::Receiver<LoadState> {
        self.snapshot.clone()
    }

    /// Every state published from now on, in order.
    pub fn subscribe(&self) -> LoadStateSubscription {
        LoadStateSubscription {
            rx: self.updates.subscribe(),
        }
    }

    /// Processes every event sent before this call, stops the worker and
    /// returns the final state. Sinks still held elsewhere start failing.
    pub async fn shutdown(self) -> Result<LoadState, AdapterError> {
        let Self {
            sink,
            updates,
            worker,
            ..
        } = self;
        // The worker may already be gone if it was stopped before; the join
        // below still yields its final state.
        let _ = sink.tx.send(Command::Shutdown);
        drop(sink);
        drop(updates);
        Ok(worker.await?)
    }
}

struct Worker {
    rx: mpsc::UnboundedReceiver<Command>,
    machine: LoadStateMachine,
    snapshot: watch::Sender<LoadState>,
    updates: broadcast::Sender<LoadState>,
}

impl Worker {
    async fn run(mut self) -> LoadState {
        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Event(event) => self.handle(event),
                Command::Shutdown => break,
            }
        }
        self.rx.close();
        info!(
            state = %self.machine.current(),
            attempts = self.machine.attempt(),
            "load state worker stopped"
        );
        self.machine.current().clone()
    }

    fn handle(&mut self, event: LoadEvent) {
        match self.machine.apply(event) {
            Transition::Changed { to, .. } => {
                info!(state = %to, attempt = self.machine.attempt(), "publishing load state");
                self.snapshot.send_replace(to.clone());
                // No subscribers is fine; the snapshot cell still has the state.
                let _ = self.updates.send(to);
            }
            Transition::Unchanged => {
                debug!(state = %self.machine.current(), "load state unchanged");
            }
            Transition::Ignored(_) => {}
        }
    }
}
