// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Rod Actuator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rate-limited control rod drive. Whatever the upstream command asks for,
//! the actual position slews at most `rate_pct_s` per second and stays in
//! [0, 100], so no command can insert reactivity instantaneously.

use log::warn;

/// Control rod drive tracking a commanded target position.
#[derive(Debug, Clone)]
pub struct RodActuator {
    target_pct: f64,
    rate_pct_s: f64,
}

impl RodActuator {
    pub fn new(initial_target_pct: f64, rate_pct_s: f64) -> Self {
        RodActuator {
            target_pct: initial_target_pct.clamp(0.0, 100.0),
            rate_pct_s,
        }
    }

    /// Commanded target [%]. Out-of-range values clamp with a warning;
    /// non-finite values are rejected.
    pub fn set_target(&mut self, target_pct: f64) {
        if !target_pct.is_finite() {
            warn!("rejecting non-finite rod target {target_pct}");
            return;
        }
        if !(0.0..=100.0).contains(&target_pct) {
            warn!("rod target {target_pct}% outside [0, 100], clamping");
        }
        self.target_pct = target_pct.clamp(0.0, 100.0);
    }

    pub fn target(&self) -> f64 {
        self.target_pct
    }

    /// Advance the actual position toward the target over `dt` seconds.
    pub fn advance(&self, current_pct: f64, dt: f64) -> f64 {
        let max_travel = self.rate_pct_s * dt;
        let error = self.target_pct - current_pct;
        let moved = current_pct + error.clamp(-max_travel, max_travel);
        moved.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_travel() {
        let mut rod = RodActuator::new(0.0, 10.0);
        rod.set_target(100.0);
        // 10%/s at 5 ms ticks: 0.05% per tick
        let pos = rod.advance(0.0, 0.005);
        assert!((pos - 0.05).abs() < 1e-12, "one tick of travel: {pos}");
    }

    #[test]
    fn test_no_overshoot_near_target() {
        let mut rod = RodActuator::new(0.0, 10.0);
        rod.set_target(0.03);
        let pos = rod.advance(0.0, 0.005);
        assert!((pos - 0.03).abs() < 1e-12, "must stop at target: {pos}");
    }

    #[test]
    fn test_insertion_direction() {
        let mut rod = RodActuator::new(0.0, 10.0);
        rod.set_target(0.0);
        let pos = rod.advance(50.0, 0.005);
        assert!(pos < 50.0);
        assert!((pos - 49.95).abs() < 1e-12);
    }

    #[test]
    fn test_command_clamped_to_travel() {
        let mut rod = RodActuator::new(0.0, 10.0);
        rod.set_target(250.0);
        assert_eq!(rod.target(), 100.0);
        rod.set_target(-40.0);
        assert_eq!(rod.target(), 0.0);
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let mut rod = RodActuator::new(35.0, 10.0);
        rod.set_target(f64::NAN);
        assert_eq!(rod.target(), 35.0);
        rod.set_target(f64::INFINITY);
        assert_eq!(rod.target(), 35.0);
    }

    #[test]
    fn test_full_stroke_time() {
        let mut rod = RodActuator::new(0.0, 10.0);
        rod.set_target(100.0);
        let mut pos = 0.0;
        let mut ticks = 0;
        while pos < 100.0 && ticks < 10_000 {
            pos = rod.advance(pos, 0.005);
            ticks += 1;
        }
        // 100% at 10%/s = 10 s = 2000 ticks of 5 ms
        assert_eq!(ticks, 2000);
    }
}
