// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Poison Chains
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fission-product poison chains: I-135 → Xe-135 and
//! Nd-149 → Pm-149 → Sm-149. Production is proportional to the flux proxy
//! η·n; these terms evolve on hour-to-day timescales and share the
//! kinetics substep without forcing finer subdivision.

use reactor_types::constants::{
    ETA_SURVIVAL, GAMMA_I135, GAMMA_ND149, GAMMA_XE135, LAMBDA_I135, LAMBDA_ND149, LAMBDA_PM149,
    LAMBDA_XE135, SIGMA_A_PM149, SIGMA_A_SM149, SIGMA_A_XE135, SIGMA_FISSION,
};

/// I-135 rate [atoms/cc·s]: fission production minus decay to Xe-135.
pub fn i135_rate(n: f64, i135: f64) -> f64 {
    GAMMA_I135 * SIGMA_FISSION * (ETA_SURVIVAL * n) - LAMBDA_I135 * i135
}

/// Xe-135 rate [atoms/cc·s]: direct yield plus iodine decay, minus its own
/// decay and flux-dependent burnout.
pub fn xe135_rate(n: f64, i135: f64, xe135: f64) -> f64 {
    GAMMA_XE135 * SIGMA_FISSION * (ETA_SURVIVAL * n) + LAMBDA_I135 * i135
        - LAMBDA_XE135 * xe135
        - SIGMA_A_XE135 * (ETA_SURVIVAL * n) * xe135
}

/// Nd-149 rate [atoms/cc·s]: fission production minus decay to Pm-149.
pub fn nd149_rate(n: f64, nd149: f64) -> f64 {
    GAMMA_ND149 * SIGMA_FISSION * (ETA_SURVIVAL * n) - LAMBDA_ND149 * nd149
}

/// Pm-149 rate [atoms/cc·s]: neodymium decay in, decay to Sm-149 and
/// absorption out.
pub fn pm149_rate(n: f64, nd149: f64, pm149: f64) -> f64 {
    LAMBDA_ND149 * nd149 - LAMBDA_PM149 * pm149 - SIGMA_A_PM149 * (ETA_SURVIVAL * n) * pm149
}

/// Sm-149 rate [atoms/cc·s]: promethium decay in; absorption is the only
/// loss (Sm-149 is effectively stable).
pub fn sm149_rate(n: f64, pm149: f64, sm149: f64) -> f64 {
    LAMBDA_PM149 * pm149 - SIGMA_A_SM149 * (ETA_SURVIVAL * n) * sm149
}
