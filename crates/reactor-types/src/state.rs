// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The 15-field reactor state vector and the per-tick derived quantities.

use serde::{Deserialize, Serialize};

use crate::config::InitialCondition;
use crate::constants::{BETA, BETA_I, LAMBDA_I, NUM_GROUPS};

/// Complete integrated state of the reactor session.
///
/// Mutated exclusively by the simulation driver, once per tick. All
/// concentration and density fields are non-negative; `rod_position` stays
/// in [0, 100] (% withdrawn, 0 = fully inserted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactorState {
    /// Neutron density [#/cc].
    pub neutron_density: f64,
    /// Delayed-neutron precursor concentrations per group [#/cc].
    pub precursors: [f64; NUM_GROUPS],
    /// Fuel temperature [K].
    pub fuel_temp_k: f64,
    /// Coolant temperature [K].
    pub coolant_temp_k: f64,
    /// Control rod position [% withdrawn].
    pub rod_position_pct: f64,
    /// I-135 density [atoms/cc].
    pub i135: f64,
    /// Xe-135 density [atoms/cc].
    pub xe135: f64,
    /// Nd-149 density [atoms/cc].
    pub nd149: f64,
    /// Pm-149 density [atoms/cc].
    pub pm149: f64,
    /// Sm-149 density [atoms/cc].
    pub sm149: f64,
}

impl ReactorState {
    /// Build the session-start state from a configured initial condition.
    ///
    /// Precursors start in equilibrium with the source level,
    /// `C_i = β_i·n₀ / (λ_i·Λ)`, so a critical core holds steady from the
    /// first tick. Poisons start at zero (fresh core).
    pub fn from_initial(initial: &InitialCondition, neutron_lifetime_s: f64) -> Self {
        let n0 = initial.neutron_density;
        let mut precursors = [0.0; NUM_GROUPS];
        for g in 0..NUM_GROUPS {
            precursors[g] = BETA_I[g] * n0 / (LAMBDA_I[g] * neutron_lifetime_s);
        }
        ReactorState {
            neutron_density: n0,
            precursors,
            fuel_temp_k: initial.fuel_temp_k,
            coolant_temp_k: initial.coolant_temp_k,
            rod_position_pct: initial.rod_position_pct,
            i135: 0.0,
            xe135: 0.0,
            nd149: 0.0,
            pm149: 0.0,
            sm149: 0.0,
        }
    }
}

/// Itemized reactivity balance, recomputed fresh each tick.
/// All fields are absolute Δk/k; `total` is always the sum of the others.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReactivityComponents {
    /// Rod worth integral: 0 at full insertion, the configured total worth
    /// at full withdrawal.
    pub rod: f64,
    /// Constant shutdown margin (negative).
    pub excess: f64,
    pub fuel_temp: f64,
    pub coolant_temp: f64,
    pub xenon: f64,
    pub samarium: f64,
    pub total: f64,
}

impl ReactivityComponents {
    /// Total reactivity in dollars (ρ/β).
    pub fn total_dollars(&self) -> f64 {
        self.total / BETA
    }
}

/// One telemetry sample of the last completed tick.
///
/// Field order and units are part of the external contract and must stay
/// stable across a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub time_s: f64,
    pub neutron_density: f64,
    pub power_mw: f64,
    pub rho_rod: f64,
    pub rho_excess: f64,
    pub rho_fuel_temp: f64,
    pub rho_coolant_temp: f64,
    pub rho_xenon: f64,
    pub rho_samarium: f64,
    pub rho_total: f64,
    pub rho_total_dollars: f64,
    pub fuel_temp_k: f64,
    pub coolant_temp_k: f64,
    pub coolant_flow_kg_s: f64,
    pub rod_position_pct: f64,
    pub xe135: f64,
    pub sm149: f64,
}

/// Per-tick output for the physical-model shim. The core exposes nothing
/// else to hardware; device-specific encodings (PWM, servo angles) are the
/// shim's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareFrame {
    pub power_mw: f64,
    pub rod_position_pct: f64,
    pub scram_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReactorConfig;

    #[test]
    fn test_initial_precursor_equilibrium() {
        let cfg = ReactorConfig::default();
        let state = ReactorState::from_initial(&cfg.initial, cfg.physics.neutron_lifetime_s);
        // dC_i/dt = β_i/Λ·n − λ_i·C_i must vanish at the initial condition
        for g in 0..NUM_GROUPS {
            let rate = BETA_I[g] / cfg.physics.neutron_lifetime_s * state.neutron_density
                - LAMBDA_I[g] * state.precursors[g];
            assert!(
                rate.abs() < 1e-9 * state.precursors[g].max(1.0),
                "group {g} not in equilibrium: {rate}"
            );
        }
    }

    #[test]
    fn test_initial_state_fresh_core() {
        let cfg = ReactorConfig::default();
        let state = ReactorState::from_initial(&cfg.initial, cfg.physics.neutron_lifetime_s);
        assert_eq!(state.i135, 0.0);
        assert_eq!(state.xe135, 0.0);
        assert_eq!(state.nd149, 0.0);
        assert_eq!(state.pm149, 0.0);
        assert_eq!(state.sm149, 0.0);
        assert_eq!(state.rod_position_pct, 0.0);
    }

    #[test]
    fn test_components_total_dollars() {
        let comps = ReactivityComponents {
            total: BETA,
            ..Default::default()
        };
        assert!((comps.total_dollars() - 1.0).abs() < 1e-12);
    }
}
