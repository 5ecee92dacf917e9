// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Reactivity Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pure reactivity balance: rod worth, temperature feedback, poison
//! absorption and the fixed shutdown margin. Deterministic and
//! side-effect free; an out-of-range rod position is clamped, never fatal.

use std::f64::consts::PI;

use reactor_types::config::PhysicsParams;
use reactor_types::constants::{
    ETA_SURVIVAL, NU_PER_FISSION, SIGMA_A_SM149, SIGMA_A_XE135, SIGMA_FISSION,
};
use reactor_types::state::ReactivityComponents;

/// Integral rod worth at position `h` [% withdrawn], in Δk/k.
///
/// The differential worth is sinusoidal, peaking at 50% travel, so the
/// integral is `W_tot/2 · (1 − cos(πh/100))`: zero at full insertion, the
/// configured total worth at full withdrawal, monotone in between.
pub fn rod_worth(physics: &PhysicsParams, rod_position_pct: f64) -> f64 {
    let h = rod_position_pct.clamp(0.0, 100.0);
    physics.rod_worth() * 0.5 * (1.0 - (PI * h / 100.0).cos())
}

/// Xenon-135 poison reactivity [Δk/k], always ≤ 0.
pub fn xenon_reactivity(xe135: f64) -> f64 {
    -(SIGMA_A_XE135 * ETA_SURVIVAL * xe135) / (NU_PER_FISSION * SIGMA_FISSION)
}

/// Samarium-149 poison reactivity [Δk/k], always ≤ 0.
pub fn samarium_reactivity(sm149: f64) -> f64 {
    -(SIGMA_A_SM149 * ETA_SURVIVAL * sm149) / (NU_PER_FISSION * SIGMA_FISSION)
}

/// Evaluate the full itemized reactivity balance.
///
/// `total` is always the fresh sum of the components; nothing here is
/// persisted between ticks.
pub fn evaluate(
    physics: &PhysicsParams,
    rod_position_pct: f64,
    fuel_temp_k: f64,
    coolant_temp_k: f64,
    xe135: f64,
    sm149: f64,
) -> ReactivityComponents {
    let rod = rod_worth(physics, rod_position_pct);
    let excess = -physics.shutdown_margin();
    let fuel_temp = physics.alpha_fuel_per_k * (fuel_temp_k - physics.reference_temp_k);
    let coolant_temp = physics.alpha_coolant_per_k * (coolant_temp_k - physics.reference_temp_k);
    let xenon = xenon_reactivity(xe135);
    let samarium = samarium_reactivity(sm149);
    ReactivityComponents {
        rod,
        excess,
        fuel_temp,
        coolant_temp,
        xenon,
        samarium,
        total: rod + excess + fuel_temp + coolant_temp + xenon + samarium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_types::config::ReactorConfig;
    use reactor_types::constants::BETA;

    fn physics() -> PhysicsParams {
        ReactorConfig::default().physics
    }

    #[test]
    fn test_rod_worth_endpoints() {
        let p = physics();
        assert!(rod_worth(&p, 0.0).abs() < 1e-18, "zero at full insertion");
        let full = rod_worth(&p, 100.0);
        assert!(
            (full - p.rod_worth()).abs() < 1e-15,
            "full withdrawal yields total worth: {full}"
        );
    }

    #[test]
    fn test_rod_worth_half_travel() {
        let p = physics();
        // Symmetric sinusoidal differential worth → half the worth at 50%
        let half = rod_worth(&p, 50.0);
        assert!((half - 0.5 * p.rod_worth()).abs() < 1e-15);
    }

    #[test]
    fn test_rod_worth_clamps_out_of_range() {
        let p = physics();
        assert_eq!(rod_worth(&p, -20.0), rod_worth(&p, 0.0));
        assert_eq!(rod_worth(&p, 140.0), rod_worth(&p, 100.0));
    }

    #[test]
    fn test_temperature_feedback_sign() {
        let p = physics();
        let hot = evaluate(&p, 0.0, p.reference_temp_k + 100.0, p.reference_temp_k + 50.0, 0.0, 0.0);
        assert!(hot.fuel_temp < 0.0);
        assert!(hot.coolant_temp < 0.0);
        let ref_t = evaluate(&p, 0.0, p.reference_temp_k, p.reference_temp_k, 0.0, 0.0);
        assert_eq!(ref_t.fuel_temp, 0.0);
        assert_eq!(ref_t.coolant_temp, 0.0);
    }

    #[test]
    fn test_poison_reactivity_negative_and_ordered() {
        let rho_xe = xenon_reactivity(1.0e15);
        let rho_sm = samarium_reactivity(1.0e15);
        assert!(rho_xe < 0.0);
        assert!(rho_sm < 0.0);
        // Same density, but Xe-135 absorbs far more strongly
        assert!(rho_xe < rho_sm);
    }

    #[test]
    fn test_total_is_component_sum() {
        let p = physics();
        let c = evaluate(&p, 37.5, 900.0, 550.0, 2.0e14, 5.0e13);
        let sum = c.rod + c.excess + c.fuel_temp + c.coolant_temp + c.xenon + c.samarium;
        assert!((c.total - sum).abs() < 1e-18);
    }

    #[test]
    fn test_critical_position_mid_travel() {
        // With $0.1 total worth and $0.05 margin, criticality sits at 50%
        let p = physics();
        let c = evaluate(&p, 50.0, p.reference_temp_k, p.reference_temp_k, 0.0, 0.0);
        assert!(
            c.total.abs() < 1e-12 * BETA,
            "expected critical at 50%: {} $",
            c.total / BETA
        );
    }
}
