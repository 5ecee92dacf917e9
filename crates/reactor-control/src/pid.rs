// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — PID Power Controller
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PID controller on thermal power: MW error in, rod-position command [%]
//! out, saturated to the rod travel range with conditional-integration
//! anti-windup. The driver ignores this controller entirely while SCRAM
//! is active.

use reactor_types::config::PidGains;

/// Rod command lower/upper saturation [% withdrawn].
const OUT_MIN: f64 = 0.0;
const OUT_MAX: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct PowerPid {
    gains: PidGains,
    integral: f64,
    last_error: f64,
    primed: bool,
}

impl PowerPid {
    pub fn new(gains: PidGains) -> Self {
        PowerPid {
            gains,
            integral: 0.0,
            last_error: 0.0,
            primed: false,
        }
    }

    /// One controller step. `setpoint_mw` and `power_mw` in megawatts,
    /// `dt` in seconds. Returns the commanded rod position [%].
    pub fn step(&mut self, setpoint_mw: f64, power_mw: f64, dt: f64) -> f64 {
        let error = setpoint_mw - power_mw;
        let derivative = if self.primed { (error - self.last_error) / dt } else { 0.0 };
        self.last_error = error;
        self.primed = true;

        let candidate_integral = (self.integral + error * dt)
            .clamp(-self.gains.integral_limit / self.gains.ki.abs().max(1e-12),
                   self.gains.integral_limit / self.gains.ki.abs().max(1e-12));

        let raw = self.gains.kp * error
            + self.gains.ki * candidate_integral
            + self.gains.kd * derivative;

        // Conditional integration: freeze the integral while the output is
        // saturated and the error would push it further into the limit.
        let saturated_high = raw > OUT_MAX && error > 0.0;
        let saturated_low = raw < OUT_MIN && error < 0.0;
        if !(saturated_high || saturated_low) {
            self.integral = candidate_integral;
        }

        raw.clamp(OUT_MIN, OUT_MAX)
    }

    /// Clear accumulated state. Called on (re)enable so a stale integral
    /// cannot kick the rods on mode entry.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
        self.primed = false;
    }
}
