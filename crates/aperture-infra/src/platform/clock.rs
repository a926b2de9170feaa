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

//! Monotonic timestamps for raw platform events.

use aperture_core::input::TimestampUnit;
use std::time::{Duration, Instant};

/// Produces raw event timestamps counted from the moment it was created.
///
/// The unit must match the
/// [`WindowConfig::timestamp_unit`](aperture_core::WindowConfig::timestamp_unit)
/// of the windows receiving the events.
#[derive(Debug, Clone, Copy)]
pub struct PlatformClock {
    origin: Instant,
    unit: TimestampUnit,
}

impl PlatformClock {
    /// Starts a clock counting in `unit`.
    pub fn new(unit: TimestampUnit) -> Self {
        Self {
            origin: Instant::now(),
            unit,
        }
    }

    /// The unit timestamps are expressed in.
    pub fn unit(&self) -> TimestampUnit {
        self.unit
    }

    /// The current timestamp.
    pub fn now(&self) -> u64 {
        self.ticks(self.origin.elapsed())
    }

    /// Converts an elapsed duration to ticks, saturating at `u64::MAX`.
    pub fn ticks(&self, elapsed: Duration) -> u64 {
        let ticks = match self.unit {
            TimestampUnit::Milliseconds => elapsed.as_millis(),
            TimestampUnit::Microseconds => elapsed.as_micros(),
        };
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }
}

impl Default for PlatformClock {
    fn default() -> Self {
        Self::new(TimestampUnit::default())
    }
}
