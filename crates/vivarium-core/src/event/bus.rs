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

use log;

/// A thread-safe broadcast point for one kind of event.
///
/// The bus is generic over the event type `T` it transports, which keeps
/// `vivarium-core` decoupled from the concrete event enums defined by the
/// agent crates. Senders are cheap clones; the owner of the bus holds the
/// receiving end and drains it at its own pace.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Creates a bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Sends an event, logging an error if the receiving side is gone.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Event bus send failed: {e}; the receiving side is gone.");
        }
    }

    /// Clones the sending half for use by other subsystems.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// The receiving half, for the bus owner to drain.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }
}

impl<T: Clone + Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::{SendError, TryRecvError};
    use std::{thread, time::Duration};

    /// A local, self-contained event enum mimicking the staging lifecycle
    /// events carried by the real buses, without the dependency.
    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Staged { index: i32 },
        SessionEnded,
    }

    #[test]
    fn event_bus_creation() {
        let bus = EventBus::<TestEvent>::new();
        let _sender = bus.sender();
        assert!(bus.receiver().is_empty());
    }

    #[test]
    fn send_receive_in_order() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();

        sender
            .send(TestEvent::Staged { index: 2 })
            .expect("Send should succeed");
        sender
            .send(TestEvent::SessionEnded)
            .expect("Send should succeed");

        let receiver = bus.receiver();
        assert_eq!(
            receiver.recv_timeout(Duration::from_millis(100)),
            Ok(TestEvent::Staged { index: 2 })
        );
        assert_eq!(
            receiver.recv_timeout(Duration::from_millis(100)),
            Ok(TestEvent::SessionEnded)
        );
        assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn send_from_thread() {
        let bus = EventBus::<TestEvent>::new();
        let sender_clone = bus.sender();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            sender_clone
                .send(TestEvent::Staged { index: 1 })
                .expect("Send from thread failed");
        });

        match bus.receiver().recv_timeout(Duration::from_secs(1)) {
            Ok(received) => assert_eq!(received, TestEvent::Staged { index: 1 }),
            Err(e) => panic!("Failed to receive event from thread: {e:?}"),
        }

        handle.join().expect("Thread join failed");
    }

    #[test]
    fn send_error_on_receiver_drop() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();

        drop(bus);

        match sender.send(TestEvent::SessionEnded) {
            Err(SendError(_)) => { /* This is the expected outcome */ }
            Ok(()) => panic!("Send unexpectedly succeeded after receiver drop"),
        }
    }
}
