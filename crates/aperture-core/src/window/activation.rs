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

//! Cursor capture bookkeeping and the reactivation gate.
//!
//! When the operating system takes the cursor capture away (alt-tab, a modal
//! dialog, a debugger break), the native cursor goes back to its default state.
//! The window must not fight that immediately: it waits for the user to come back
//! and interact, then re-applies what the application last asked for. The click
//! that brings the window back must not leak into the application, neither its
//! press nor its matching release.

use crate::dispatch::PlatformEventKind;
use serde::{Deserialize, Serialize};

/// How the cursor is bound to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorCapture {
    /// The cursor moves freely.
    #[default]
    Off,
    /// The cursor is confined to the window frame. Not supported by the window
    /// core; requests for it are ignored.
    Frame,
    /// The cursor is hidden and pinned; movement is reported as relative deltas.
    Pinning,
}

/// The state of an [`ActivationGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPhase {
    /// Input flows normally.
    Normal,
    /// Capture was lost; the next qualifying input restores it.
    WaitingForReactivation,
}

/// What the window should do with an input event after the gate saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Translate and forward the event.
    Forward,
    /// Drop the event.
    Swallow,
    /// Drop the event and re-apply the requested cursor capture and visibility.
    Restore,
}

/// Per-window activation state.
#[derive(Debug, Clone)]
pub struct ActivationGate {
    phase: ActivationPhase,
    skip_next_mouse_up: bool,
    cursor_capture: CursorCapture,
    cursor_visible: bool,
}

impl ActivationGate {
    /// Creates a gate in [`ActivationPhase::Normal`] with the given requested
    /// cursor state.
    pub fn new(cursor_capture: CursorCapture, cursor_visible: bool) -> Self {
        Self {
            phase: ActivationPhase::Normal,
            skip_next_mouse_up: false,
            cursor_capture,
            cursor_visible,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> ActivationPhase {
        self.phase
    }

    /// Returns `true` while waiting for reactivation.
    pub fn is_waiting(&self) -> bool {
        self.phase == ActivationPhase::WaitingForReactivation
    }

    /// Returns `true` if the next mouse-button release will be dropped.
    pub fn skips_next_mouse_up(&self) -> bool {
        self.skip_next_mouse_up
    }

    /// The capture mode last requested by the application.
    pub fn cursor_capture(&self) -> CursorCapture {
        self.cursor_capture
    }

    /// The visibility last requested by the application.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Records a capture request. Returns `true` if it differs from the current one.
    pub fn request_capture(&mut self, mode: CursorCapture) -> bool {
        if self.cursor_capture == mode {
            return false;
        }
        self.cursor_capture = mode;
        true
    }

    /// Records a visibility request. Returns `true` if it differs from the current one.
    pub fn request_visibility(&mut self, visible: bool) -> bool {
        if self.cursor_visible == visible {
            return false;
        }
        self.cursor_visible = visible;
        true
    }

    /// The platform released the cursor capture.
    pub fn on_capture_lost(&mut self) {
        log::debug!("Cursor capture lost, waiting for input to reactivate.");
        self.phase = ActivationPhase::WaitingForReactivation;
    }

    /// Decides the fate of a focused input event.
    pub fn filter(&mut self, kind: &PlatformEventKind) -> GateDecision {
        if self.skip_next_mouse_up && matches!(kind, PlatformEventKind::MouseButtonUp(_)) {
            self.skip_next_mouse_up = false;
            return GateDecision::Swallow;
        }

        if !self.is_waiting() {
            return GateDecision::Forward;
        }

        match kind {
            // Hovering back over the window is not a reactivation.
            PlatformEventKind::MouseMove(_) => GateDecision::Swallow,
            PlatformEventKind::MouseButtonDown(_) => {
                self.skip_next_mouse_up = true;
                self.reactivate()
            }
            _ => self.reactivate(),
        }
    }

    fn reactivate(&mut self) -> GateDecision {
        log::debug!(
            "Reactivating input, restoring capture {:?} and visibility {}.",
            self.cursor_capture,
            self.cursor_visible
        );
        self.phase = ActivationPhase::Normal;
        GateDecision::Restore
    }
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::new(CursorCapture::Off, true)
    }
}
