// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Thermal-Hydraulics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lumped two-node thermal model: fuel and coolant, coupled through a
//! flow-dependent heat-transfer coefficient. Co-integrated with kinetics
//! on the same substep grid.

use reactor_types::config::ThermalParams;
use reactor_types::constants::{ENERGY_PER_FISSION, NEUTRON_SPEED, SIGMA_FISSION};

/// UO₂ density [g/cc].
const FUEL_DENSITY: f64 = 12.5;
/// Water density [g/cc] (lumped, temperature dependence neglected).
const COOLANT_DENSITY: f64 = 1.0;
/// Dittus-Boelter-like flow exponent for the heat-transfer correlation.
const FLOW_EXPONENT: f64 = 0.8;

/// Fission power deposited in the fuel [W] for neutron density `n` [#/cc].
pub fn thermal_power_w(thermal: &ThermalParams, n: f64) -> f64 {
    thermal.core_volume_cc * thermal.fuel_volume_fraction * (n * NEUTRON_SPEED) * SIGMA_FISSION
        * ENERGY_PER_FISSION
}

pub fn thermal_power_mw(thermal: &ThermalParams, n: f64) -> f64 {
    thermal_power_w(thermal, n) / 1.0e6
}

/// UO₂ specific heat [J/g·K], linear in temperature.
pub fn fuel_heat_capacity(fuel_temp_k: f64) -> f64 {
    0.2455 + 5.86e-5 * (fuel_temp_k - 273.15)
}

/// Water specific heat [J/g·K], weakly temperature dependent.
pub fn coolant_heat_capacity(coolant_temp_k: f64) -> f64 {
    4.2 - 0.0005 * (coolant_temp_k - 273.15)
}

/// Heat-transfer coefficient [W/cm²·K], monotone in coolant flow:
/// `h = h₀·(ṁ/ṁ₀)^0.8`.
pub fn heat_transfer_coeff(thermal: &ThermalParams, flow_kg_s: f64) -> f64 {
    thermal.h0_w_per_cm2_k * (flow_kg_s / thermal.reference_flow_kg_s).powf(FLOW_EXPONENT)
}

/// Fuel temperature rate [K/s].
pub fn fuel_temp_rate(
    thermal: &ThermalParams,
    n: f64,
    fuel_temp_k: f64,
    coolant_temp_k: f64,
    flow_kg_s: f64,
) -> f64 {
    let q = thermal_power_w(thermal, n);
    let h = heat_transfer_coeff(thermal, flow_kg_s);
    let fuel_mass_g = FUEL_DENSITY * thermal.fuel_volume_fraction * thermal.core_volume_cc;
    (q - thermal.contact_area_cm2 * h * (fuel_temp_k - coolant_temp_k))
        / (fuel_mass_g * fuel_heat_capacity(fuel_temp_k))
}

/// Coolant temperature rate [K/s]. The flow term exchanges coolant at the
/// inlet temperature; the lumped coolant mass covers the whole loop
/// inventory.
pub fn coolant_temp_rate(
    thermal: &ThermalParams,
    fuel_temp_k: f64,
    coolant_temp_k: f64,
    flow_kg_s: f64,
) -> f64 {
    let h = heat_transfer_coeff(thermal, flow_kg_s);
    let cp = coolant_heat_capacity(coolant_temp_k);
    let flow_g_s = flow_kg_s * 1.0e3;
    let coolant_mass_g = COOLANT_DENSITY * thermal.core_volume_cc;
    (thermal.contact_area_cm2 * h * (fuel_temp_k - coolant_temp_k)
        + cp * (thermal.inlet_temp_k - coolant_temp_k) * flow_g_s)
        / (coolant_mass_g * cp)
}
