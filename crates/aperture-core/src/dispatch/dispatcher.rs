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

use super::{PlatformEvent, SizeEvent};
use crate::config::DispatcherConfig;
use crate::context::WindowContext;
use crate::window::{WindowId, WindowRegistry};
use std::collections::VecDeque;

/// A cloneable handle for posting raw events to a [`MainDispatcher`].
///
/// Safe to move to other threads; events are picked up at the next frame.
#[derive(Debug, Clone)]
pub struct PlatformEventSender {
    inner: flume::Sender<PlatformEvent>,
}

impl PlatformEventSender {
    /// Queues an event for the next [`MainDispatcher::dispatch_frame`].
    ///
    /// Returns `false` if the dispatcher has been dropped.
    pub fn post(&self, event: PlatformEvent) -> bool {
        match self.inner.send(event) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to post platform event: {e}");
                false
            }
        }
    }
}

/// A read-only view of the events still queued behind the one being handled.
#[derive(Debug, Clone, Copy)]
pub struct PendingEvents<'a> {
    queue: &'a VecDeque<PlatformEvent>,
}

impl<'a> PendingEvents<'a> {
    /// Wraps a queue remainder.
    pub fn new(queue: &'a VecDeque<PlatformEvent>) -> Self {
        Self { queue }
    }

    /// Iterates the remaining events in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &'a PlatformEvent> {
        self.queue.iter()
    }

    /// The payload of the last queued size change for `window`, if any.
    pub fn last_size_change_for(&self, window: WindowId) -> Option<&'a SizeEvent> {
        self.queue
            .iter()
            .rev()
            .filter(|event| event.window == window)
            .find_map(|event| event.kind.as_size_change())
    }

    /// Number of remaining events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing remains.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Collects raw platform events and delivers them to windows once per frame.
///
/// Producers post through a [`PlatformEventSender`]. The owning thread calls
/// [`dispatch_frame`](Self::dispatch_frame) at the start of each frame.
#[derive(Debug)]
pub struct MainDispatcher {
    sender: flume::Sender<PlatformEvent>,
    receiver: flume::Receiver<PlatformEvent>,
    resident: VecDeque<PlatformEvent>,
}

impl MainDispatcher {
    /// Creates a dispatcher.
    pub fn new(config: &DispatcherConfig) -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            sender,
            receiver,
            resident: VecDeque::with_capacity(config.initial_capacity),
        }
    }

    /// Returns a new handle for posting events.
    pub fn sender(&self) -> PlatformEventSender {
        PlatformEventSender {
            inner: self.sender.clone(),
        }
    }

    /// Posts an event from the owning thread.
    pub fn post(&self, event: PlatformEvent) {
        // The dispatcher holds a receiver, so the channel cannot be disconnected.
        let _ = self.sender.send(event);
    }

    /// Number of events waiting for the next frame.
    pub fn pending_len(&self) -> usize {
        self.resident.len() + self.receiver.len()
    }

    /// Returns `true` if no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.pending_len() == 0
    }

    /// Delivers every event posted since the last call.
    ///
    /// Events are handed to their window in arrival order. Each window then
    /// closes its frame, even if it received nothing. Destroyed windows are
    /// dropped from `windows` afterwards.
    ///
    /// ## Returns
    ///
    /// The number of events taken from the queue.
    pub fn dispatch_frame(
        &mut self,
        windows: &mut WindowRegistry,
        ctx: &mut WindowContext<'_>,
    ) -> usize {
        self.resident.extend(self.receiver.try_iter());
        let mut processed = 0;

        while let Some(event) = self.resident.pop_front() {
            processed += 1;
            let pending = PendingEvents::new(&self.resident);
            match windows.get_mut(event.window) {
                Some(window) => window.handle_event(&event, &pending, ctx),
                None => log::warn!(
                    "Dropping {:?} for unknown window {}.",
                    event.kind,
                    event.window
                ),
            }
        }

        for window in windows.iter_mut() {
            window.finish_event_handling_on_current_frame();
        }
        windows.remove_destroyed();

        if processed > 0 {
            log::trace!("Dispatched {processed} platform event(s).");
        }
        processed
    }
}

impl Default for MainDispatcher {
    fn default() -> Self {
        Self::new(&DispatcherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::PlatformEventKind;
    use crate::window::FullscreenMode;

    fn size(width: f32) -> SizeEvent {
        SizeEvent {
            width,
            height: 100.0,
            surface_width: width,
            surface_height: 100.0,
            surface_scale: 1.0,
            dpi: 96.0,
            fullscreen: FullscreenMode::Windowed,
        }
    }

    #[test]
    fn pending_lookahead_finds_last_size_for_window() {
        // Arrange
        let a = WindowId(1);
        let b = WindowId(2);
        let queue: VecDeque<_> = [
            PlatformEvent::new(a, 0, PlatformEventKind::WindowSizeChanged(size(10.0))),
            PlatformEvent::new(b, 0, PlatformEventKind::WindowSizeChanged(size(20.0))),
            PlatformEvent::new(a, 0, PlatformEventKind::WindowFocusChanged(true)),
            PlatformEvent::new(a, 0, PlatformEventKind::WindowSizeChanged(size(30.0))),
            PlatformEvent::new(b, 0, PlatformEventKind::WindowSizeChanged(size(40.0))),
        ]
        .into_iter()
        .collect();

        // Act
        let pending = PendingEvents::new(&queue);

        // Assert
        assert_eq!(pending.last_size_change_for(a).map(|s| s.width), Some(30.0));
        assert_eq!(pending.last_size_change_for(b).map(|s| s.width), Some(40.0));
        assert!(pending.last_size_change_for(WindowId(3)).is_none());
        assert_eq!(pending.len(), 5);
    }

    #[test]
    fn pending_len_counts_channel_backlog() {
        let dispatcher = MainDispatcher::default();
        let sender = dispatcher.sender();
        assert!(dispatcher.is_empty());

        sender.post(PlatformEvent::new(
            WindowId(1),
            0,
            PlatformEventKind::WindowCaptureLost,
        ));
        dispatcher.post(PlatformEvent::new(
            WindowId(1),
            1,
            PlatformEventKind::WindowFocusChanged(false),
        ));

        assert_eq!(dispatcher.pending_len(), 2);
    }

    #[test]
    fn sender_reports_dropped_dispatcher() {
        let sender = MainDispatcher::default().sender();
        assert!(!sender.post(PlatformEvent::new(
            WindowId(1),
            0,
            PlatformEventKind::WindowDestroyed,
        )));
    }

    #[test]
    fn posting_from_another_thread() {
        let dispatcher = MainDispatcher::default();
        let sender = dispatcher.sender();

        let handle = std::thread::spawn(move || {
            for t in 0..4 {
                sender.post(PlatformEvent::new(
                    WindowId(1),
                    t,
                    PlatformEventKind::WindowCaptureLost,
                ));
            }
        });
        handle.join().unwrap();

        assert_eq!(dispatcher.pending_len(), 4);
    }
}
