//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! The bridge owns a worker thread that runs the initialization routine once.
//! Dropping the bridge (unmounting) cancels the routine and joins the thread,
//! which closes the node connection.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::domain::ConsoleLine;
use crate::infrastructure::runtime::worker::{connect_and_init, run_routine};
use crate::infrastructure::substrate::{AccountId32, ProviderConfig};

/// What the initialization routine connects to and reads
#[derive(Debug, Clone)]
pub struct InitRequest {
    pub endpoint: ProviderConfig,
    pub address: AccountId32,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Successfully connected to a node
    Connected {
        endpoint: String,
        chain: Option<String>,
    },
    /// A console line produced by the routine
    Console(ConsoleLine),
    /// Routine finished all reads
    Finished,
    /// Error occurred
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    evt_rx: Receiver<RuntimeEvent>,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl RuntimeBridge {
    /// Spawn the worker thread and start the initialization routine
    pub fn mount(request: InitRequest) -> anyhow::Result<Self> {
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let worker = thread::Builder::new()
            .name("chainpeek-init".into())
            .spawn(move || {
                let rt = match Runtime::new() {
                    Ok(rt) => rt,
                    Err(err) => {
                        error!("failed to create Tokio runtime: {err}");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Failed to create Tokio runtime: {err}"),
                        });
                        return;
                    }
                };
                let sink = evt_tx.clone();
                rt.block_on(run_routine(
                    connect_and_init(request, move |evt| {
                        let _ = sink.send(evt);
                    }),
                    &evt_tx,
                    token,
                ));
                debug!("init worker exiting");
            })?;

        Ok(Self {
            evt_rx,
            cancel,
            worker: Some(worker),
        })
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        self.evt_rx.try_iter().collect()
    }

    /// Cancel the routine if it is still running
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("init worker panicked");
            }
        }
    }
}
