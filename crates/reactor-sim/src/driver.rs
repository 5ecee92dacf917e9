// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Simulation Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The fixed-tick simulation loop. Each tick runs the same sequence:
//! drain the command snapshot, evaluate safety, slew the rod actuator,
//! advance the coupled physics with rod and flow frozen, then step the
//! controllers to produce next tick's targets. The sequence plus the
//! queued command model makes every session bitwise reproducible from the
//! same config and command timeline.

use log::{error, info};

use reactor_control::coolant::CoolantFlowController;
use reactor_control::pid::PowerPid;
use reactor_control::rod::RodActuator;
use reactor_control::safety::SafetySupervisor;
use reactor_control::telemetry::TelemetryHistory;
use reactor_physics::solver::{CoupledSolver, ReactorDynamics};
use reactor_types::config::ReactorConfig;
use reactor_types::error::{ReactorError, ReactorResult};
use reactor_types::state::{HardwareFrame, ReactorState, TelemetrySample};

use crate::command::{Command, CommandQueue, PowerMode};

/// Telemetry ring capacity: ~5 minutes of samples at the nominal
/// 0.5 s recording interval.
const HISTORY_CAPACITY: usize = 600;

pub struct ReactorSimulation {
    config: ReactorConfig,
    dynamics: ReactorDynamics,
    solver: CoupledSolver,
    state: ReactorState,
    rod: RodActuator,
    pid: PowerPid,
    power_mode: PowerMode,
    coolant: CoolantFlowController,
    safety: SafetySupervisor,
    history: TelemetryHistory,
    queue: CommandQueue,
    time_s: f64,
    tick_count: u64,
    paused: bool,
    /// Set on the first integration failure; every later `step` call
    /// replays the same error until the session is rebuilt.
    failed: Option<(f64, String)>,
}

impl ReactorSimulation {
    /// Build a session from a validated configuration.
    pub fn new(config: ReactorConfig) -> ReactorResult<Self> {
        let state = ReactorState::from_initial(&config.initial, config.physics.neutron_lifetime_s);
        Self::with_state(config, state)
    }

    /// Build a session from an explicit starting state (checkpoint restore).
    pub fn with_state(config: ReactorConfig, state: ReactorState) -> ReactorResult<Self> {
        config.validate()?;
        info!("starting session '{}'", config.name);
        let dynamics = ReactorDynamics::new(&config);
        let solver = CoupledSolver::new(config.solver.clone());
        let rod = RodActuator::new(state.rod_position_pct, config.control.rod_rate_pct_s);
        let pid = PowerPid::new(config.control.pid.clone());
        let coolant =
            CoolantFlowController::new(config.control.flow.clone(), config.initial.coolant_flow_kg_s);
        let safety = SafetySupervisor::new(config.safety.clone());
        Ok(ReactorSimulation {
            config,
            dynamics,
            solver,
            state,
            rod,
            pid,
            power_mode: PowerMode::Manual,
            coolant,
            safety,
            history: TelemetryHistory::new(HISTORY_CAPACITY),
            queue: CommandQueue::new(),
            time_s: 0.0,
            tick_count: 0,
            paused: false,
            failed: None,
        })
    }

    /// Validate and enqueue an operator command for the next tick.
    pub fn submit(&mut self, command: Command) -> ReactorResult<()> {
        self.queue.submit(command)
    }

    /// Advance one control tick.
    ///
    /// Commands are consumed even while paused, so SCRAM and Resume stay
    /// reachable, but the physics only advances when running. A failed
    /// session stays failed.
    pub fn step(&mut self) -> ReactorResult<()> {
        if let Some((time_s, message)) = &self.failed {
            return Err(ReactorError::IntegrationDivergence {
                time_s: *time_s,
                message: message.clone(),
            });
        }

        for command in self.queue.drain_snapshot() {
            self.apply(command);
        }
        if self.paused {
            return Ok(());
        }

        let dt = self.config.tick_seconds;

        // Safety first: a trip this tick must already dominate the actuator
        self.safety
            .evaluate(self.state.fuel_temp_k, self.state.coolant_temp_k);
        if self.safety.is_scram_active() {
            self.rod.set_target(0.0);
        }

        // The slewed rod position is this tick's frozen solver input, but it
        // only becomes state if the whole tick commits
        let rod_before_pct = self.state.rod_position_pct;
        self.state.rod_position_pct = self.rod.advance(rod_before_pct, dt);

        let flow_kg_s = self.coolant.rate();
        if let Err(err) = self
            .solver
            .advance_tick(&self.dynamics, &mut self.state, flow_kg_s, dt, self.time_s)
        {
            self.state.rod_position_pct = rod_before_pct;
            if let ReactorError::IntegrationDivergence { time_s, message } = &err {
                error!("integration diverged at t={time_s:.3} s: {message}");
                self.failed = Some((*time_s, message.clone()));
            }
            return Err(err);
        }
        self.time_s += dt;
        self.tick_count += 1;

        // Controllers produce next tick's targets from the new state
        let power_mw = self.dynamics.power_mw(&self.state);
        if let PowerMode::Automatic { setpoint_mw } = self.power_mode {
            if !self.safety.is_scram_active() {
                let command_pct = self.pid.step(setpoint_mw, power_mw, dt);
                self.rod.set_target(command_pct);
            }
        }
        self.coolant.advance(power_mw, dt);

        if self.tick_count % self.config.telemetry_interval_ticks == 0 {
            let sample = self.sample();
            self.history.push(sample);
        }
        Ok(())
    }

    /// Advance `ticks` control ticks, stopping at the first failure.
    pub fn run_ticks(&mut self, ticks: u64) -> ReactorResult<()> {
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(())
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::RodTarget { percent } => self.rod.set_target(percent),
            Command::PowerControl(mode) => {
                if let PowerMode::Automatic { setpoint_mw } = mode {
                    info!("power control: automatic, setpoint {setpoint_mw} MW");
                    self.pid.reset();
                }
                self.power_mode = mode;
            }
            Command::CoolantFlow(mode) => self.coolant.set_mode(mode),
            Command::Scram => self.safety.request_scram(),
            Command::ClearScram => {
                self.safety.clear_scram();
                // The scram interval left a stale controller state behind
                self.pid.reset();
            }
            Command::Pause => self.paused = true,
            Command::Resume => self.paused = false,
        }
    }

    /// Telemetry sample of the current state.
    pub fn sample(&self) -> TelemetrySample {
        let comps = self.dynamics.reactivity(&self.state);
        TelemetrySample {
            time_s: self.time_s,
            neutron_density: self.state.neutron_density,
            power_mw: self.dynamics.power_mw(&self.state),
            rho_rod: comps.rod,
            rho_excess: comps.excess,
            rho_fuel_temp: comps.fuel_temp,
            rho_coolant_temp: comps.coolant_temp,
            rho_xenon: comps.xenon,
            rho_samarium: comps.samarium,
            rho_total: comps.total,
            rho_total_dollars: comps.total_dollars(),
            fuel_temp_k: self.state.fuel_temp_k,
            coolant_temp_k: self.state.coolant_temp_k,
            coolant_flow_kg_s: self.coolant.rate(),
            rod_position_pct: self.state.rod_position_pct,
            xe135: self.state.xe135,
            sm149: self.state.sm149,
        }
    }

    /// Per-tick output for the physical-model shim.
    pub fn hardware_frame(&self) -> HardwareFrame {
        HardwareFrame {
            power_mw: self.dynamics.power_mw(&self.state),
            rod_position_pct: self.state.rod_position_pct,
            scram_active: self.safety.is_scram_active(),
        }
    }

    pub fn state(&self) -> &ReactorState {
        &self.state
    }

    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_scram_active(&self) -> bool {
        self.safety.is_scram_active()
    }

    pub fn is_failed(&self) -> bool {
        self.failed.is_some()
    }

    pub fn power_mw(&self) -> f64 {
        self.dynamics.power_mw(&self.state)
    }

    pub fn history(&self) -> &TelemetryHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_control::coolant::FlowMode;

    fn critical_config() -> ReactorConfig {
        let mut cfg = ReactorConfig::default();
        cfg.initial.rod_position_pct = 50.0;
        cfg
    }

    #[test]
    fn test_tick_advances_time() {
        let mut sim = ReactorSimulation::new(ReactorConfig::default()).unwrap();
        sim.run_ticks(10).unwrap();
        assert!((sim.time_s() - 0.05).abs() < 1e-12);
        assert_eq!(sim.tick_count(), 10);
    }

    #[test]
    fn test_pause_freezes_physics() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        sim.submit(Command::Pause).unwrap();
        sim.run_ticks(50).unwrap();
        assert_eq!(sim.time_s(), 0.0);
        assert!(sim.is_paused());
        sim.submit(Command::Resume).unwrap();
        sim.run_ticks(50).unwrap();
        assert_eq!(sim.tick_count(), 50);
    }

    #[test]
    fn test_invalid_command_leaves_session_running() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        let err = sim.submit(Command::RodTarget { percent: f64::NAN }).unwrap_err();
        assert!(matches!(err, ReactorError::InvalidCommand(_)));
        sim.run_ticks(10).unwrap();
        assert_eq!(sim.tick_count(), 10);
    }

    #[test]
    fn test_scram_forces_rod_insertion() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        sim.submit(Command::Scram).unwrap();
        // An operator withdrawal request during SCRAM must not win
        sim.submit(Command::RodTarget { percent: 100.0 }).unwrap();
        sim.run_ticks(200).unwrap();
        assert!(sim.is_scram_active());
        assert!(
            sim.state().rod_position_pct < 50.0,
            "rods must drive inward under SCRAM: {}",
            sim.state().rod_position_pct
        );
        assert!(sim.hardware_frame().scram_active);
    }

    #[test]
    fn test_scram_overrides_pid_rod_command() {
        let mut cfg = critical_config();
        cfg.control.pid.kp = 5.0;
        let mut sim = ReactorSimulation::new(cfg).unwrap();
        sim.submit(Command::PowerControl(crate::command::PowerMode::Automatic {
            setpoint_mw: 500.0,
        }))
        .unwrap();
        sim.run_ticks(10).unwrap();
        assert_eq!(sim.rod.target(), 100.0, "saturated PID commands full withdrawal");
        sim.submit(Command::Scram).unwrap();
        sim.run_ticks(10).unwrap();
        assert_eq!(sim.rod.target(), 0.0, "SCRAM must pin the rod target at 0");
    }

    #[test]
    fn test_clear_scram_does_not_withdraw_rods() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        sim.submit(Command::Scram).unwrap();
        sim.run_ticks(2100).unwrap(); // full insertion takes 5 s = 1000 ticks
        assert_eq!(sim.state().rod_position_pct, 0.0);
        sim.submit(Command::ClearScram).unwrap();
        sim.run_ticks(10).unwrap();
        assert!(!sim.is_scram_active());
        assert_eq!(sim.state().rod_position_pct, 0.0);
    }

    #[test]
    fn test_telemetry_recorded_at_interval() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        sim.run_ticks(250).unwrap();
        // interval 100: samples at ticks 100 and 200
        assert_eq!(sim.history().len(), 2);
        let latest = sim.history().latest().unwrap();
        assert!((latest.time_s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_session_stays_failed() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        sim.state.fuel_temp_k = f64::NAN;
        assert!(sim.step().is_err());
        assert!(sim.is_failed());
        let err = sim.step().unwrap_err();
        assert!(matches!(err, ReactorError::IntegrationDivergence { .. }));
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn test_failed_tick_leaves_rod_unmoved() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        sim.submit(Command::RodTarget { percent: 100.0 }).unwrap();
        sim.state.fuel_temp_k = f64::NAN;
        let err = sim.step().unwrap_err();
        assert!(matches!(err, ReactorError::IntegrationDivergence { .. }));
        // A tick either commits in full or not at all: the actuator slew
        // must not survive the failed integration
        assert_eq!(sim.state().rod_position_pct, 50.0);
    }

    #[test]
    fn test_manual_flow_command_applies() {
        let mut sim = ReactorSimulation::new(critical_config()).unwrap();
        sim.submit(Command::CoolantFlow(FlowMode::Manual { rate_kg_s: 800.0 }))
            .unwrap();
        sim.run_ticks(2000).unwrap(); // 600 kg/s at 100 kg/s² = 6 s
        assert!((sim.coolant.rate() - 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejected_config_surfaces_on_construction() {
        let mut cfg = ReactorConfig::default();
        cfg.physics.neutron_lifetime_s = -1.0;
        assert!(matches!(
            ReactorSimulation::new(cfg),
            Err(ReactorError::ConfigError(_))
        ));
    }
}
