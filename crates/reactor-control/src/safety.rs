// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Safety Supervisor
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two-state safety supervisor. Evaluated before the rod actuator and the
//! reactivity model each tick, so SCRAM dominates any controller output.
//! SCRAM assertion is an expected, logged safety event, never an error;
//! only an explicit unlock returns to `Normal`, and unlocking does not
//! touch the physics state.

use log::warn;
use serde::{Deserialize, Serialize};

use reactor_types::config::SafetyParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyState {
    Normal,
    ScramActive,
}

#[derive(Debug, Clone)]
pub struct SafetySupervisor {
    params: SafetyParams,
    state: SafetyState,
}

impl SafetySupervisor {
    pub fn new(params: SafetyParams) -> Self {
        SafetySupervisor {
            params,
            state: SafetyState::Normal,
        }
    }

    /// Check temperature limits; trips into `ScramActive` when exceeded.
    /// Idempotent: re-tripping while active changes nothing.
    pub fn evaluate(&mut self, fuel_temp_k: f64, coolant_temp_k: f64) -> SafetyState {
        if self.state == SafetyState::Normal {
            if fuel_temp_k > self.params.fuel_temp_limit_k {
                warn!(
                    "fuel temperature SCRAM: {fuel_temp_k:.1} K > {:.1} K",
                    self.params.fuel_temp_limit_k
                );
                self.state = SafetyState::ScramActive;
            } else if coolant_temp_k > self.params.coolant_temp_limit_k {
                warn!(
                    "coolant temperature SCRAM: {coolant_temp_k:.1} K > {:.1} K",
                    self.params.coolant_temp_limit_k
                );
                self.state = SafetyState::ScramActive;
            }
        }
        self.state
    }

    /// External SCRAM request. Idempotent.
    pub fn request_scram(&mut self) {
        if self.state == SafetyState::Normal {
            warn!("external SCRAM request");
            self.state = SafetyState::ScramActive;
        }
    }

    /// Explicit unlock back to `Normal`. The physics state is untouched:
    /// precursors and poisons keep evolving and the rods must be withdrawn
    /// again from 0 by a fresh control action.
    pub fn clear_scram(&mut self) {
        self.state = SafetyState::Normal;
    }

    pub fn is_scram_active(&self) -> bool {
        self.state == SafetyState::ScramActive
    }

    pub fn state(&self) -> SafetyState {
        self.state
    }
}
