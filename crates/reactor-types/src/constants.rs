// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Nuclear data for the point-kinetics model: 6-group U-235 delayed-neutron
//! parameters, fission-product chain data, and fission energetics.
//!
//! Reactor-specific parameters (rod worth, feedback coefficients, geometry)
//! live in [`crate::config`]; only isotope-level data belongs here.

/// Number of delayed-neutron precursor groups.
pub const NUM_GROUPS: usize = 6;

/// Delayed-neutron fractions β_i per group (U-235, thermal fission).
pub const BETA_I: [f64; NUM_GROUPS] = [0.000215, 0.001424, 0.001274, 0.002568, 0.000748, 0.000273];

/// Precursor decay constants λ_i per group [1/s].
pub const LAMBDA_I: [f64; NUM_GROUPS] = [0.0124, 0.0305, 0.111, 0.301, 1.14, 3.01];

/// Total delayed-neutron fraction β = Σβ_i.
pub const BETA: f64 = 0.000215 + 0.001424 + 0.001274 + 0.002568 + 0.000748 + 0.000273;

/// Thermal neutron speed [cm/s].
pub const NEUTRON_SPEED: f64 = 2200.0e3;

/// Energy release per fission [J] (~200 MeV).
pub const ENERGY_PER_FISSION: f64 = 3.204e-11;

/// Macroscopic fission cross section of the core [1/cm].
pub const SIGMA_FISSION: f64 = 0.0065;

/// Neutrons per fission for U-235.
pub const NU_PER_FISSION: f64 = 2.43;

/// Neutron survival factor: effective flux proxy is η·n.
pub const ETA_SURVIVAL: f64 = 0.6;

// ── I-135 → Xe-135 chain ─────────────────────────────────────────────

/// I-135 cumulative fission yield.
pub const GAMMA_I135: f64 = 0.061;
/// Xe-135 direct fission yield.
pub const GAMMA_XE135: f64 = 0.003;
/// I-135 decay constant [1/s] (half-life ~6.6 h).
pub const LAMBDA_I135: f64 = 2.87e-5;
/// Xe-135 decay constant [1/s] (half-life ~9.2 h).
pub const LAMBDA_XE135: f64 = 2.09e-5;
/// Xe-135 microscopic absorption cross section [cm²] (2.6 Mb).
pub const SIGMA_A_XE135: f64 = 2.6e6 * 1e-24;

// ── Nd-149 → Pm-149 → Sm-149 chain ───────────────────────────────────

/// Nd-149 fission yield.
pub const GAMMA_ND149: f64 = 0.011;
/// Nd-149 decay constant [1/s] (half-life ~1.73 h).
pub const LAMBDA_ND149: f64 = 9.67e-5;
/// Pm-149 decay constant [1/s] (half-life ~53.1 h).
pub const LAMBDA_PM149: f64 = 1.46e-6;
/// Pm-149 microscopic absorption cross section [cm²] (1400 b).
pub const SIGMA_A_PM149: f64 = 1400.0 * 1e-24;
/// Sm-149 microscopic absorption cross section [cm²] (40.8 kb).
/// Sm-149 is effectively stable; absorption is its only loss term.
pub const SIGMA_A_SM149: f64 = 40800.0 * 1e-24;
