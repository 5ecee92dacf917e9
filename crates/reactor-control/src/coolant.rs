// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Coolant Flow Controller
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coolant flow control. The mode is a tagged variant, never a flag plus a
//! separately stored value. In automatic mode the flow target follows a
//! tanh-shaped map of thermal power so fast power swings cannot command a
//! thermal-shock step; in manual mode the operator value is clamped into
//! the valid range. The actual flow always ramps toward the active target
//! at a bounded rate, so mode transitions never step the flow.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use reactor_types::config::FlowParams;

/// Flow control mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlowMode {
    /// Power-mapped target.
    Automatic,
    /// Operator-specified rate [kg/s], clamped to the valid range.
    Manual { rate_kg_s: f64 },
}

#[derive(Debug, Clone)]
pub struct CoolantFlowController {
    params: FlowParams,
    mode: FlowMode,
    rate_kg_s: f64,
}

impl CoolantFlowController {
    pub fn new(params: FlowParams, initial_rate_kg_s: f64) -> Self {
        let rate = initial_rate_kg_s.clamp(params.min_kg_s, params.max_kg_s);
        CoolantFlowController {
            params,
            mode: FlowMode::Automatic,
            rate_kg_s: rate,
        }
    }

    /// Switch modes. A manual rate outside the valid range clamps with a
    /// warning; a non-finite rate is rejected and the mode is unchanged.
    pub fn set_mode(&mut self, mode: FlowMode) {
        match mode {
            FlowMode::Automatic => {
                if self.mode != FlowMode::Automatic {
                    info!("coolant flow control: automatic");
                }
                self.mode = FlowMode::Automatic;
            }
            FlowMode::Manual { rate_kg_s } => {
                if !rate_kg_s.is_finite() {
                    warn!("rejecting non-finite manual flow rate {rate_kg_s}");
                    return;
                }
                let clamped = rate_kg_s.clamp(self.params.min_kg_s, self.params.max_kg_s);
                if clamped != rate_kg_s {
                    warn!(
                        "manual flow {rate_kg_s} kg/s outside [{}, {}], clamping",
                        self.params.min_kg_s, self.params.max_kg_s
                    );
                }
                self.mode = FlowMode::Manual { rate_kg_s: clamped };
            }
        }
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    /// Current actual flow [kg/s].
    pub fn rate(&self) -> f64 {
        self.rate_kg_s
    }

    /// Automatic power-to-flow map: smooth, monotone, bounded.
    ///
    /// `min + (max − min)·tanh(g·P/P_scale)/tanh(g)` spans the full range
    /// as power goes 0 → P_scale and saturates smoothly beyond it.
    pub fn automatic_target(&self, power_mw: f64) -> f64 {
        let p = &self.params;
        let x = (power_mw.abs() / p.power_scale_mw).min(1.0);
        let shape = (p.tanh_gain * x).tanh() / p.tanh_gain.tanh();
        p.min_kg_s + (p.max_kg_s - p.min_kg_s) * shape
    }

    /// Ramp the actual flow toward the active target over `dt` seconds.
    pub fn advance(&mut self, power_mw: f64, dt: f64) {
        let target = match self.mode {
            FlowMode::Automatic => self.automatic_target(power_mw),
            FlowMode::Manual { rate_kg_s } => rate_kg_s,
        };
        let max_delta = self.params.ramp_kg_s2 * dt;
        let error = target - self.rate_kg_s;
        self.rate_kg_s += error.clamp(-max_delta, max_delta);
        self.rate_kg_s = self.rate_kg_s.clamp(self.params.min_kg_s, self.params.max_kg_s);
    }
}
