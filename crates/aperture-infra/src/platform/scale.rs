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


//! The surface scale shared between a window backend and its event translation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// The render surface scale last requested for a window.
///
/// The backend writes it when the application changes the scale, and
/// [`WinitEventState`](crate::WinitEventState) reads it when it reports a
/// native resize. Both therefore agree on the scale before the core commits it.
#[derive(Debug, Clone)]
pub struct SurfaceScale(Arc<AtomicU32>);

impl SurfaceScale {
    /// Creates a handle holding `scale`.
    pub fn new(scale: f32) -> Self {
        Self(Arc::new(AtomicU32::new(scale.to_bits())))
    }

    /// The requested scale.
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Records a new requested scale, visible through every clone.
    pub fn set(&self, scale: f32) {
        self.0.store(scale.to_bits(), Ordering::Release);
    }
}

impl Default for SurfaceScale {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_scale() {
        let scale = SurfaceScale::default();
        let shared = scale.clone();

        scale.set(0.5);

        assert_eq!(shared.get(), 0.5);
    }
}
