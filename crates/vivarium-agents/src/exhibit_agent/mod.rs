// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The exhibit agent: stage transitions on a background thread.
//!
//! Staging an exhibit is fire-and-forget for the rest of the system. The
//! habitat records the index and sends a request; this agent's worker
//! thread performs the transition on its own schedule and announces
//! progress on an event bus that nobody is required to watch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use vivarium_core::event::EventBus;
use vivarium_data::stage::ExhibitDirector;
use vivarium_data::DEFAULT_EXHIBIT;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for the exhibit agent.
#[derive(Debug, Clone)]
pub struct ExhibitAgentConfig {
    /// Number of exhibits in the lineup, numbered from 1.
    pub exhibit_count: i32,
    /// How long one staged transition takes end to end.
    pub transition_duration: Duration,
    /// Maximum number of buffered requests.
    /// If the buffer is full, new requests are dropped.
    pub request_buffer_size: usize,
}

impl Default for ExhibitAgentConfig {
    fn default() -> Self {
        Self {
            exhibit_count: 3,
            transition_duration: Duration::from_millis(25),
            request_buffer_size: 8,
        }
    }
}

/// A request for the worker to bring an exhibit on stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhibitRequest {
    /// The lineup index of the exhibit to stage.
    pub index: i32,
}

/// Progress announcements from the exhibit worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhibitEvent {
    /// The worker began transitioning to the exhibit at `index`.
    TransitionStarted {
        /// The lineup index being staged.
        index: i32,
    },
    /// The exhibit at `index` is now fully on stage.
    TransitionCompleted {
        /// The lineup index now on stage.
        index: i32,
    },
}

/// Runs exhibit transitions on a dedicated background thread.
///
/// Requests arrive through [`ExhibitDirectorHandle`] clones. A burst of
/// requests collapses to the newest one; only the exhibit asked for last
/// ends up on stage.
pub struct ExhibitAgent {
    config: ExhibitAgentConfig,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
    request_tx: Sender<ExhibitRequest>,
    events: EventBus<ExhibitEvent>,
}

impl ExhibitAgent {
    /// Creates a new exhibit agent.
    pub fn new(config: ExhibitAgentConfig) -> (Self, Receiver<ExhibitRequest>) {
        let (tx, rx) = crossbeam_channel::bounded(config.request_buffer_size);
        let agent = Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
            request_tx: tx,
            events: EventBus::new(),
        };
        (agent, rx)
    }

    /// Starts the exhibit worker thread.
    pub fn start(&mut self, request_rx: Receiver<ExhibitRequest>) {
        if self.running.load(Ordering::SeqCst) {
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let events = self.events.sender();
        let transition_duration = self.config.transition_duration;

        let handle = thread::spawn(move || {
            let publish = |event: ExhibitEvent| {
                if events.send(event).is_err() {
                    log::error!("Exhibit event bus is closed; dropping event.");
                }
            };

            log::info!("Exhibit agent thread started.");

            while running.load(Ordering::Relaxed) {
                let request = match request_rx.recv_timeout(POLL_INTERVAL) {
                    Ok(request) => request,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                // A burst of requests collapses to the newest one.
                let mut latest = request;
                while let Ok(newer) = request_rx.try_recv() {
                    latest = newer;
                }

                log::info!("Exhibit transition to {} started.", latest.index);
                publish(ExhibitEvent::TransitionStarted {
                    index: latest.index,
                });
                thread::sleep(transition_duration);
                publish(ExhibitEvent::TransitionCompleted {
                    index: latest.index,
                });
                log::info!("Exhibit transition to {} completed.", latest.index);
            }
            log::info!("Exhibit agent thread stopped.");
        });

        self.handle = Some(handle);
    }

    /// Stops the exhibit worker thread.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Returns a cloneable director handle that feeds this agent.
    pub fn director(&self) -> ExhibitDirectorHandle {
        ExhibitDirectorHandle {
            request_tx: self.request_tx.clone(),
            exhibit_count: self.config.exhibit_count,
        }
    }

    /// The bus on which transition events are announced.
    pub fn events(&self) -> &EventBus<ExhibitEvent> {
        &self.events
    }
}

impl Drop for ExhibitAgent {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A cloneable [`ExhibitDirector`] backed by an [`ExhibitAgent`].
///
/// Requests never block the caller. Indices outside the lineup fall back
/// to exhibit [`DEFAULT_EXHIBIT`]; a full buffer drops the request.
#[derive(Debug, Clone)]
pub struct ExhibitDirectorHandle {
    request_tx: Sender<ExhibitRequest>,
    exhibit_count: i32,
}

impl ExhibitDirector for ExhibitDirectorHandle {
    fn request_exhibit(&self, index: i32) {
        let index = if (1..=self.exhibit_count).contains(&index) {
            index
        } else {
            log::warn!(
                "Exhibit {index} is not in the lineup (1..={}); staging exhibit {DEFAULT_EXHIBIT} instead.",
                self.exhibit_count
            );
            DEFAULT_EXHIBIT
        };
        match self.request_tx.try_send(ExhibitRequest { index }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                log::warn!("Exhibit request buffer is full; dropping request for exhibit {index}.");
            }
            Err(TrySendError::Disconnected(_)) => {
                log::error!("Exhibit worker is gone; request for exhibit {index} was dropped.");
            }
        }
    }
}
