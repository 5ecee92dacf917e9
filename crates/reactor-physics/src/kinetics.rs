// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Point Kinetics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Six-group point-kinetics rate equations and the inhour relation.
//!
//! dn/dt = ((ρ−β)/Λ)·n + Σ λ_i·C_i
//! dC_i/dt = (β_i/Λ)·n − λ_i·C_i

use reactor_types::constants::{BETA, BETA_I, LAMBDA_I, NUM_GROUPS};

/// Neutron density rate [#/cc·s] for reactivity `rho` [Δk/k].
pub fn neutron_rate(rho: f64, neutron_lifetime_s: f64, n: f64, precursors: &[f64; NUM_GROUPS]) -> f64 {
    let mut delayed = 0.0;
    for g in 0..NUM_GROUPS {
        delayed += LAMBDA_I[g] * precursors[g];
    }
    (rho - BETA) / neutron_lifetime_s * n + delayed
}

/// Precursor concentration rate [#/cc·s] for group `g`.
pub fn precursor_rate(g: usize, neutron_lifetime_s: f64, n: f64, c_g: f64) -> f64 {
    BETA_I[g] / neutron_lifetime_s * n - LAMBDA_I[g] * c_g
}

/// Inhour relation: the reactivity that sustains a pure exponential
/// `n ∝ exp(ωt)` with inverse period `omega` [1/s].
///
/// ρ(ω) = ωΛ + Σ ωβ_i / (ω + λ_i)
pub fn inhour_reactivity(omega: f64, neutron_lifetime_s: f64) -> f64 {
    let mut rho = omega * neutron_lifetime_s;
    for g in 0..NUM_GROUPS {
        rho += omega * BETA_I[g] / (omega + LAMBDA_I[g]);
    }
    rho
}

/// Stable (asymptotic) inverse period ω for a positive reactivity [Δk/k],
/// solved from the inhour relation by bisection. The dominant root is the
/// unique positive one; ρ(ω) is strictly increasing for ω > 0.
pub fn stable_inverse_period(rho: f64, neutron_lifetime_s: f64) -> f64 {
    assert!(rho > 0.0, "stable period is defined for supercritical ρ");
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    while inhour_reactivity(hi, neutron_lifetime_s) < rho {
        hi *= 2.0;
    }
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if inhour_reactivity(mid, neutron_lifetime_s) < rho {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
