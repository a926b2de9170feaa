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

/// A broadcast-style notification channel.
///
/// Publishing never blocks. Any number of subscribers may hold a receiver; since
/// the underlying flume channel is multi-consumer, each notification is delivered
/// to exactly one of them, so a bus normally has a single listener (a UI layout
/// system, the application loop) that fans out further if it needs to.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Publishes a notification.
    ///
    /// The bus owns a receiver, so sending can only fail after the bus is dropped;
    /// publishing through a cloned sender in that state is logged, not propagated.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing a notification.");
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to publish notification: {e}.");
        }
    }

    /// Returns a sender that publishes onto this bus.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a receiver for this bus.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        self.receiver.clone()
    }

    /// Removes and returns every notification currently queued, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Number of notifications waiting to be received.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` when no notification is waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
