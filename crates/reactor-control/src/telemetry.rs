// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Telemetry History
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed-capacity ring buffer of telemetry samples. The physics loop
//! pushes the last completed tick's sample; plotting/logging collaborators
//! read chronological views at their own pace, so slow I/O never blocks
//! physics.

use serde::{Deserialize, Serialize};

use reactor_types::state::TelemetrySample;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryHistory {
    samples: Vec<TelemetrySample>,
    capacity: usize,
    head: usize,
    count: usize,
}

impl TelemetryHistory {
    pub fn new(capacity: usize) -> Self {
        TelemetryHistory {
            samples: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            count: 0,
        }
    }

    pub fn push(&mut self, sample: TelemetrySample) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.head] = sample;
        }
        self.head = (self.head + 1) % self.capacity;
        if self.count < self.capacity {
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn latest(&self) -> Option<&TelemetrySample> {
        if self.count == 0 {
            return None;
        }
        let idx = if self.head == 0 { self.capacity - 1 } else { self.head - 1 };
        self.samples.get(idx.min(self.samples.len() - 1))
    }

    /// Samples in chronological order (oldest to newest).
    pub fn view(&self) -> Vec<TelemetrySample> {
        let mut out = Vec::with_capacity(self.count);
        if self.count < self.capacity {
            out.extend_from_slice(&self.samples[..self.count]);
        } else {
            out.extend_from_slice(&self.samples[self.head..]);
            out.extend_from_slice(&self.samples[..self.head]);
        }
        out
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.head = 0;
        self.count = 0;
    }
}
