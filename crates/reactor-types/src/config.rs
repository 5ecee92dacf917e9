// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::BETA;
use crate::error::{ReactorError, ReactorResult};

/// Top-level simulator configuration.
/// Maps 1:1 to default_config.json at the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactorConfig {
    pub name: String,
    /// Outer control tick [s]. Nominal 0.005.
    pub tick_seconds: f64,
    /// Record a telemetry sample every this many ticks.
    pub telemetry_interval_ticks: u64,
    pub physics: PhysicsParams,
    pub thermal: ThermalParams,
    pub control: ControlParams,
    pub safety: SafetyParams,
    pub solver: SolverParams,
    pub initial: InitialCondition,
}

/// Reactivity-model parameters. All reactivities are held in absolute Δk/k
/// internally; the dollar-denominated fields here are divided by β on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Prompt-neutron generation time Λ [s].
    pub neutron_lifetime_s: f64,
    /// Total rod worth from fully inserted to fully withdrawn [$].
    pub rod_worth_dollars: f64,
    /// Constant shutdown margin subtracted from the reactivity balance [$].
    /// With the sinusoidal worth curve this places criticality mid-travel.
    pub shutdown_margin_dollars: f64,
    /// Fuel temperature coefficient [Δk/k per K], negative.
    pub alpha_fuel_per_k: f64,
    /// Coolant temperature coefficient [Δk/k per K], negative.
    pub alpha_coolant_per_k: f64,
    /// Reference temperature for both feedback terms [K].
    pub reference_temp_k: f64,
}

impl PhysicsParams {
    /// Total rod worth in Δk/k.
    pub fn rod_worth(&self) -> f64 {
        self.rod_worth_dollars * BETA
    }

    /// Shutdown margin in Δk/k.
    pub fn shutdown_margin(&self) -> f64 {
        self.shutdown_margin_dollars * BETA
    }
}

/// Thermal-hydraulics parameters (lumped fuel + coolant nodes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalParams {
    /// Core volume [cc].
    pub core_volume_cc: f64,
    /// Fuel volume fraction of the core.
    pub fuel_volume_fraction: f64,
    /// Fuel-to-coolant contact area [cm²].
    pub contact_area_cm2: f64,
    /// Coolant inlet temperature [K].
    pub inlet_temp_k: f64,
    /// Baseline heat-transfer coefficient h₀ [W/cm²·K] at the reference flow.
    pub h0_w_per_cm2_k: f64,
    /// Reference coolant flow for the Dittus-Boelter-like correlation [kg/s].
    pub reference_flow_kg_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlParams {
    /// Maximum rod travel rate [%/s].
    pub rod_rate_pct_s: f64,
    pub pid: PidGains,
    pub flow: FlowParams,
}

/// Power-controller gains: MW error in, rod position command [%] out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Anti-windup clamp on the integral term contribution [%].
    pub integral_limit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowParams {
    /// Lower bound of the valid coolant flow range [kg/s].
    pub min_kg_s: f64,
    /// Upper bound of the valid coolant flow range [kg/s].
    pub max_kg_s: f64,
    /// Bounded ramp rate toward the active flow target [kg/s per s].
    pub ramp_kg_s2: f64,
    /// Steepness of the tanh power-to-flow map.
    pub tanh_gain: f64,
    /// Power at which the automatic map approaches its upper bound [MW].
    pub power_scale_mw: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyParams {
    /// Fuel temperature SCRAM setpoint [K].
    pub fuel_temp_limit_k: f64,
    /// Coolant temperature SCRAM setpoint [K].
    pub coolant_temp_limit_k: f64,
}

/// Stiff-solver tuning. Conservative defaults validated by the
/// steady-state invariance test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverParams {
    /// Newton relative convergence tolerance per substep.
    pub newton_rel_tol: f64,
    /// Newton iteration cap per substep attempt.
    pub newton_max_iter: usize,
    /// Initial subdivision of the outer tick.
    pub min_substeps: usize,
    /// Maximum substep halvings before declaring divergence.
    pub max_halvings: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialCondition {
    /// Source-level neutron density [#/cc]. Precursors start in equilibrium
    /// with this value.
    pub neutron_density: f64,
    pub fuel_temp_k: f64,
    pub coolant_temp_k: f64,
    /// Initial rod position [% withdrawn].
    pub rod_position_pct: f64,
    pub coolant_flow_kg_s: f64,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        ReactorConfig {
            name: "SCPN-PK-Trainer".to_string(),
            tick_seconds: 0.005,
            telemetry_interval_ticks: 100,
            physics: PhysicsParams {
                neutron_lifetime_s: 1.0e-4,
                rod_worth_dollars: 0.1,
                shutdown_margin_dollars: 0.05,
                alpha_fuel_per_k: -7.0e-8,
                alpha_coolant_per_k: -2.0e-8,
                reference_temp_k: 450.0,
            },
            thermal: ThermalParams {
                core_volume_cc: 3.0e6,
                fuel_volume_fraction: 0.4,
                contact_area_cm2: 4.0e5,
                inlet_temp_k: 450.0,
                h0_w_per_cm2_k: 1.5,
                reference_flow_kg_s: 1000.0,
            },
            control: ControlParams {
                rod_rate_pct_s: 10.0,
                pid: PidGains {
                    kp: 0.05,
                    ki: 0.02,
                    kd: 0.0,
                    integral_limit: 50.0,
                },
                flow: FlowParams {
                    min_kg_s: 200.0,
                    max_kg_s: 1200.0,
                    ramp_kg_s2: 100.0,
                    tanh_gain: 2.0,
                    power_scale_mw: 600.0,
                },
            },
            safety: SafetyParams {
                fuel_temp_limit_k: 1700.0,
                coolant_temp_limit_k: 700.0,
            },
            solver: SolverParams {
                newton_rel_tol: 1.0e-10,
                newton_max_iter: 25,
                min_substeps: 4,
                max_halvings: 8,
            },
            initial: InitialCondition {
                neutron_density: 1.0e3,
                fuel_temp_k: 450.0,
                coolant_temp_k: 450.0,
                rod_position_pct: 0.0,
                coolant_flow_kg_s: 200.0,
            },
        }
    }
}

impl ReactorConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> ReactorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Fail fast on physically impossible constants or a malformed initial
    /// condition. Must pass before the first tick executes.
    pub fn validate(&self) -> ReactorResult<()> {
        fn require(cond: bool, msg: &str) -> ReactorResult<()> {
            if cond {
                Ok(())
            } else {
                Err(ReactorError::ConfigError(msg.to_string()))
            }
        }

        require(
            self.tick_seconds.is_finite() && self.tick_seconds > 0.0,
            "tick_seconds must be finite and > 0",
        )?;
        require(self.telemetry_interval_ticks > 0, "telemetry_interval_ticks must be > 0")?;

        let p = &self.physics;
        require(
            p.neutron_lifetime_s.is_finite() && p.neutron_lifetime_s > 0.0,
            "neutron_lifetime_s must be finite and > 0",
        )?;
        require(p.rod_worth_dollars > 0.0, "rod_worth_dollars must be > 0")?;
        require(
            p.shutdown_margin_dollars >= 0.0,
            "shutdown_margin_dollars must be >= 0",
        )?;
        require(
            p.alpha_fuel_per_k <= 0.0 && p.alpha_coolant_per_k <= 0.0,
            "temperature coefficients must be non-positive",
        )?;
        require(p.reference_temp_k > 0.0, "reference_temp_k must be > 0")?;

        let t = &self.thermal;
        require(t.core_volume_cc > 0.0, "core_volume_cc must be > 0")?;
        require(
            t.fuel_volume_fraction > 0.0 && t.fuel_volume_fraction < 1.0,
            "fuel_volume_fraction must be in (0, 1)",
        )?;
        require(t.contact_area_cm2 > 0.0, "contact_area_cm2 must be > 0")?;
        require(t.inlet_temp_k > 0.0, "inlet_temp_k must be > 0")?;
        require(t.h0_w_per_cm2_k > 0.0, "h0_w_per_cm2_k must be > 0")?;
        require(t.reference_flow_kg_s > 0.0, "reference_flow_kg_s must be > 0")?;

        let c = &self.control;
        require(c.rod_rate_pct_s > 0.0, "rod_rate_pct_s must be > 0")?;
        require(
            c.pid.kp.is_finite() && c.pid.ki.is_finite() && c.pid.kd.is_finite(),
            "PID gains must be finite",
        )?;
        require(c.pid.integral_limit > 0.0, "integral_limit must be > 0")?;
        require(
            c.flow.min_kg_s > 0.0 && c.flow.max_kg_s > c.flow.min_kg_s,
            "flow bounds must satisfy 0 < min < max",
        )?;
        require(c.flow.ramp_kg_s2 > 0.0, "ramp_kg_s2 must be > 0")?;
        require(c.flow.tanh_gain > 0.0, "tanh_gain must be > 0")?;
        require(c.flow.power_scale_mw > 0.0, "power_scale_mw must be > 0")?;

        let s = &self.safety;
        require(
            s.fuel_temp_limit_k > t.inlet_temp_k,
            "fuel_temp_limit_k must exceed inlet_temp_k",
        )?;
        require(
            s.coolant_temp_limit_k > t.inlet_temp_k,
            "coolant_temp_limit_k must exceed inlet_temp_k",
        )?;
        require(
            s.fuel_temp_limit_k > s.coolant_temp_limit_k,
            "fuel limit must exceed coolant limit",
        )?;

        let sv = &self.solver;
        require(
            sv.newton_rel_tol.is_finite() && sv.newton_rel_tol > 0.0,
            "newton_rel_tol must be finite and > 0",
        )?;
        require(sv.newton_max_iter > 0, "newton_max_iter must be > 0")?;
        require(sv.min_substeps > 0, "min_substeps must be > 0")?;

        let i = &self.initial;
        require(
            i.neutron_density.is_finite() && i.neutron_density >= 0.0,
            "initial neutron_density must be finite and >= 0",
        )?;
        require(
            i.fuel_temp_k > 0.0 && i.coolant_temp_k > 0.0,
            "initial temperatures must be > 0",
        )?;
        require(
            (0.0..=100.0).contains(&i.rod_position_pct),
            "initial rod_position_pct must be in [0, 100]",
        )?;
        require(
            i.coolant_flow_kg_s >= c.flow.min_kg_s && i.coolant_flow_kg_s <= c.flow.max_kg_s,
            "initial coolant_flow_kg_s must be inside the flow bounds",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/reactor-types/ at compile time,
    /// so we go up 2 levels to reach the workspace root.
    fn workspace_path(relative: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(relative)
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_default_config_validates() {
        ReactorConfig::default().validate().unwrap();
    }

    #[test]
    fn test_load_default_config_file() {
        let cfg = ReactorConfig::from_file(&workspace_path("default_config.json")).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.name, "SCPN-PK-Trainer");
        assert!((cfg.tick_seconds - 0.005).abs() < 1e-12);
        assert!((cfg.control.flow.max_kg_s - 1200.0).abs() < 1e-9);
        assert!((cfg.physics.rod_worth_dollars - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = ReactorConfig::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: ReactorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.name, cfg2.name);
        assert!((cfg.physics.neutron_lifetime_s - cfg2.physics.neutron_lifetime_s).abs() < 1e-18);
        assert!((cfg.solver.newton_rel_tol - cfg2.solver.newton_rel_tol).abs() < 1e-18);
    }

    #[test]
    fn test_rejects_zero_lifetime() {
        let mut cfg = ReactorConfig::default();
        cfg.physics.neutron_lifetime_s = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_positive_feedback() {
        let mut cfg = ReactorConfig::default();
        cfg.physics.alpha_fuel_per_k = 1.0e-8;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_flow_bounds() {
        let mut cfg = ReactorConfig::default();
        cfg.control.flow.min_kg_s = 1500.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_rod_out_of_travel() {
        let mut cfg = ReactorConfig::default();
        cfg.initial.rod_position_pct = 120.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_dollar_conversions() {
        let p = ReactorConfig::default().physics;
        assert!((p.rod_worth() - 0.1 * crate::constants::BETA).abs() < 1e-15);
        assert!((p.shutdown_margin() - 0.05 * crate::constants::BETA).abs() < 1e-15);
    }
}
