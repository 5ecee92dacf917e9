// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Coupled Stiff Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Implicit coupled integrator for kinetics + thermal-hydraulics + poisons.
//!
//! The prompt-neutron generation time (1e-4 s) sits orders of magnitude
//! below the outer control tick, so each tick is advanced by backward-Euler
//! substeps solved with damped Newton iteration (finite-difference Jacobian,
//! dense LU). Substeps halve on non-convergence up to a bounded number of
//! attempts; exhaustion or any non-finite value surfaces as
//! `IntegrationDivergence`. Rod position and coolant flow are frozen inputs
//! for the duration of one tick.

use ndarray::{Array1, Array2};

use reactor_types::config::{ReactorConfig, SolverParams};
use reactor_types::config::{PhysicsParams, ThermalParams};
use reactor_types::constants::NUM_GROUPS;
use reactor_types::error::{ReactorError, ReactorResult};
use reactor_types::state::{ReactivityComponents, ReactorState};

use crate::{kinetics, poisons, reactivity, thermal};

/// Integrated fields: n, C1..C6, T_fuel, T_coolant, I, Xe, Nd, Pm, Sm.
/// The rod position is actuator state, not an ODE unknown.
pub const STATE_DIM: usize = 14;

const IDX_N: usize = 0;
const IDX_C0: usize = 1;
const IDX_T_FUEL: usize = 7;
const IDX_T_COOLANT: usize = 8;
const IDX_I135: usize = 9;
const IDX_XE135: usize = 10;
const IDX_ND149: usize = 11;
const IDX_PM149: usize = 12;
const IDX_SM149: usize = 13;

/// Relative perturbation for finite-difference Jacobian columns.
const FD_EPS: f64 = 1.0e-7;
/// Negative excursions beyond this relative tolerance are a solver fault,
/// not roundoff, and must not be silently floored.
const NEGATIVE_REL_TOL: f64 = 1.0e-6;

/// Time-derivative provider for the full coupled system.
#[derive(Debug, Clone)]
pub struct ReactorDynamics {
    pub physics: PhysicsParams,
    pub thermal: ThermalParams,
}

impl ReactorDynamics {
    pub fn new(config: &ReactorConfig) -> Self {
        ReactorDynamics {
            physics: config.physics.clone(),
            thermal: config.thermal.clone(),
        }
    }

    /// Itemized reactivity for a reactor state.
    pub fn reactivity(&self, state: &ReactorState) -> ReactivityComponents {
        reactivity::evaluate(
            &self.physics,
            state.rod_position_pct,
            state.fuel_temp_k,
            state.coolant_temp_k,
            state.xe135,
            state.sm149,
        )
    }

    /// Thermal power [MW] for a reactor state.
    pub fn power_mw(&self, state: &ReactorState) -> f64 {
        thermal::thermal_power_mw(&self.thermal, state.neutron_density)
    }

    /// Full derivative vector at `y` with frozen rod position and flow.
    fn derivatives(&self, y: &Array1<f64>, rod_pct: f64, flow_kg_s: f64, out: &mut Array1<f64>) {
        let comps = reactivity::evaluate(
            &self.physics,
            rod_pct,
            y[IDX_T_FUEL],
            y[IDX_T_COOLANT],
            y[IDX_XE135],
            y[IDX_SM149],
        );

        let n = y[IDX_N];
        let mut precursors = [0.0; NUM_GROUPS];
        for g in 0..NUM_GROUPS {
            precursors[g] = y[IDX_C0 + g];
        }

        out[IDX_N] = kinetics::neutron_rate(
            comps.total,
            self.physics.neutron_lifetime_s,
            n,
            &precursors,
        );
        for g in 0..NUM_GROUPS {
            out[IDX_C0 + g] =
                kinetics::precursor_rate(g, self.physics.neutron_lifetime_s, n, precursors[g]);
        }
        out[IDX_T_FUEL] =
            thermal::fuel_temp_rate(&self.thermal, n, y[IDX_T_FUEL], y[IDX_T_COOLANT], flow_kg_s);
        out[IDX_T_COOLANT] =
            thermal::coolant_temp_rate(&self.thermal, y[IDX_T_FUEL], y[IDX_T_COOLANT], flow_kg_s);
        out[IDX_I135] = poisons::i135_rate(n, y[IDX_I135]);
        out[IDX_XE135] = poisons::xe135_rate(n, y[IDX_I135], y[IDX_XE135]);
        out[IDX_ND149] = poisons::nd149_rate(n, y[IDX_ND149]);
        out[IDX_PM149] = poisons::pm149_rate(n, y[IDX_ND149], y[IDX_PM149]);
        out[IDX_SM149] = poisons::sm149_rate(n, y[IDX_PM149], y[IDX_SM149]);
    }
}

fn pack(state: &ReactorState) -> Array1<f64> {
    let mut y = Array1::zeros(STATE_DIM);
    y[IDX_N] = state.neutron_density;
    for g in 0..NUM_GROUPS {
        y[IDX_C0 + g] = state.precursors[g];
    }
    y[IDX_T_FUEL] = state.fuel_temp_k;
    y[IDX_T_COOLANT] = state.coolant_temp_k;
    y[IDX_I135] = state.i135;
    y[IDX_XE135] = state.xe135;
    y[IDX_ND149] = state.nd149;
    y[IDX_PM149] = state.pm149;
    y[IDX_SM149] = state.sm149;
    y
}

fn unpack(y: &Array1<f64>, state: &mut ReactorState) {
    state.neutron_density = y[IDX_N];
    for g in 0..NUM_GROUPS {
        state.precursors[g] = y[IDX_C0 + g];
    }
    state.fuel_temp_k = y[IDX_T_FUEL];
    state.coolant_temp_k = y[IDX_T_COOLANT];
    state.i135 = y[IDX_I135];
    state.xe135 = y[IDX_XE135];
    state.nd149 = y[IDX_ND149];
    state.pm149 = y[IDX_PM149];
    state.sm149 = y[IDX_SM149];
}

/// Gaussian elimination with partial pivoting for the Newton update.
/// Returns `None` on a numerically singular pivot.
fn gauss_solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    for col in 0..n {
        // Pivot search
        let mut pivot_row = col;
        let mut pivot_mag = a[[col, col]].abs();
        for row in (col + 1)..n {
            let mag = a[[row, col]].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = row;
            }
        }
        if !pivot_mag.is_finite() || pivot_mag < 1e-300 {
            return None;
        }
        if pivot_row != col {
            for k in 0..n {
                let tmp = a[[col, k]];
                a[[col, k]] = a[[pivot_row, k]];
                a[[pivot_row, k]] = tmp;
            }
            b.swap(col, pivot_row);
        }

        // Eliminate below
        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in (row + 1)..n {
            sum -= a[[row, k]] * x[k];
        }
        x[row] = sum / a[[row, row]];
    }
    Some(x)
}

/// Stiffness-tolerant fixed-tick integrator.
#[derive(Debug, Clone)]
pub struct CoupledSolver {
    params: SolverParams,
}

impl CoupledSolver {
    pub fn new(params: SolverParams) -> Self {
        CoupledSolver { params }
    }

    /// Advance the coupled state by one outer tick of length `dt` [s].
    ///
    /// Either completes in full or fails with `IntegrationDivergence`
    /// leaving the state untouched; there is no partial-tick state.
    pub fn advance_tick(
        &self,
        dynamics: &ReactorDynamics,
        state: &mut ReactorState,
        flow_kg_s: f64,
        dt: f64,
        time_s: f64,
    ) -> ReactorResult<()> {
        let rod_pct = state.rod_position_pct;
        let mut y = pack(state);
        let mut remaining = dt;
        let mut h = dt / self.params.min_substeps as f64;
        let mut halvings = 0usize;

        while remaining > 1e-15 * dt {
            let step = h.min(remaining);
            match self.backward_euler_step(dynamics, &y, rod_pct, flow_kg_s, step) {
                Some(y_new) => {
                    let y_checked = self.check_step(&y, y_new, time_s)?;
                    y = y_checked;
                    remaining -= step;
                }
                None => {
                    halvings += 1;
                    if halvings > self.params.max_halvings {
                        return Err(ReactorError::IntegrationDivergence {
                            time_s,
                            message: format!(
                                "Newton failed to converge after {halvings} substep halvings"
                            ),
                        });
                    }
                    h *= 0.5;
                }
            }
        }

        unpack(&y, state);
        Ok(())
    }

    /// One backward-Euler substep solved by Newton iteration:
    /// find x with x − y − h·f(x) = 0. Returns `None` on non-convergence,
    /// which the caller answers with substep halving.
    fn backward_euler_step(
        &self,
        dynamics: &ReactorDynamics,
        y: &Array1<f64>,
        rod_pct: f64,
        flow_kg_s: f64,
        h: f64,
    ) -> Option<Array1<f64>> {
        let mut fx = Array1::zeros(STATE_DIM);
        dynamics.derivatives(y, rod_pct, flow_kg_s, &mut fx);

        // Explicit predictor as the Newton starting point
        let mut x: Array1<f64> = y + &(h * &fx);

        for _ in 0..self.params.newton_max_iter {
            if x.iter().any(|v| !v.is_finite()) {
                return None;
            }
            dynamics.derivatives(&x, rod_pct, flow_kg_s, &mut fx);

            // Residual r = x − y − h·f(x)
            let mut r = Array1::zeros(STATE_DIM);
            for i in 0..STATE_DIM {
                r[i] = x[i] - y[i] - h * fx[i];
            }

            // Newton matrix A = I − h·J_f, J_f by forward differences
            let mut a = Array2::zeros((STATE_DIM, STATE_DIM));
            let mut f_pert = Array1::zeros(STATE_DIM);
            for j in 0..STATE_DIM {
                let dx = FD_EPS * x[j].abs().max(1.0);
                let mut x_pert = x.clone();
                x_pert[j] += dx;
                dynamics.derivatives(&x_pert, rod_pct, flow_kg_s, &mut f_pert);
                for i in 0..STATE_DIM {
                    a[[i, j]] = -h * (f_pert[i] - fx[i]) / dx;
                }
                a[[j, j]] += 1.0;
            }

            let delta = gauss_solve(a, -r)?;

            let mut max_rel = 0.0_f64;
            for i in 0..STATE_DIM {
                x[i] += delta[i];
                let rel = delta[i].abs() / x[i].abs().max(1.0);
                if rel > max_rel {
                    max_rel = rel;
                }
            }
            if max_rel <= self.params.newton_rel_tol {
                return Some(x);
            }
        }
        None
    }

    /// Post-substep validation: no non-finite values, no physically negative
    /// concentrations beyond roundoff (those are floored to zero), positive
    /// temperatures.
    fn check_step(
        &self,
        y_prev: &Array1<f64>,
        mut y_new: Array1<f64>,
        time_s: f64,
    ) -> ReactorResult<Array1<f64>> {
        let diverged = |message: String| ReactorError::IntegrationDivergence { time_s, message };

        for i in 0..STATE_DIM {
            if !y_new[i].is_finite() {
                return Err(diverged(format!("non-finite value in state index {i}")));
            }
        }
        if y_new[IDX_T_FUEL] <= 0.0 || y_new[IDX_T_COOLANT] <= 0.0 {
            return Err(diverged("non-physical temperature".to_string()));
        }

        for i in 0..STATE_DIM {
            if i == IDX_T_FUEL || i == IDX_T_COOLANT {
                continue;
            }
            if y_new[i] < 0.0 {
                let scale = y_prev[i].abs().max(1.0);
                if y_new[i] < -NEGATIVE_REL_TOL * scale {
                    return Err(diverged(format!(
                        "negative concentration in state index {i}: {}",
                        y_new[i]
                    )));
                }
                y_new[i] = 0.0;
            }
        }
        Ok(y_new)
    }
}
