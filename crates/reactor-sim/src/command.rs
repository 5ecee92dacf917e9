// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Operator Commands
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Operator command surface. Commands are validated on submission, queued,
//! and drained as a snapshot at the start of each tick, so mid-tick input
//! can never produce a half-applied physics step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use reactor_control::coolant::FlowMode;
use reactor_types::error::{ReactorError, ReactorResult};

/// Power control mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PowerMode {
    /// Operator drives the rod target directly.
    Manual,
    /// PID holds thermal power at the setpoint by commanding the rod.
    Automatic { setpoint_mw: f64 },
}

/// One operator action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Commanded rod position [% withdrawn]. Out-of-range values clamp at
    /// the actuator; only non-finite values are rejected here.
    RodTarget { percent: f64 },
    PowerControl(PowerMode),
    CoolantFlow(FlowMode),
    Scram,
    ClearScram,
    Pause,
    Resume,
}

impl Command {
    /// Submission-time validation. Range clamping is the receiving
    /// subsystem's job; this only rejects values no subsystem can accept.
    pub fn validate(&self) -> ReactorResult<()> {
        match *self {
            Command::RodTarget { percent } if !percent.is_finite() => Err(
                ReactorError::InvalidCommand(format!("non-finite rod target {percent}")),
            ),
            Command::PowerControl(PowerMode::Automatic { setpoint_mw })
                if !setpoint_mw.is_finite() || setpoint_mw < 0.0 =>
            {
                Err(ReactorError::InvalidCommand(format!(
                    "power setpoint must be finite and >= 0, got {setpoint_mw}"
                )))
            }
            Command::CoolantFlow(FlowMode::Manual { rate_kg_s }) if !rate_kg_s.is_finite() => {
                Err(ReactorError::InvalidCommand(format!(
                    "non-finite coolant flow rate {rate_kg_s}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// FIFO of validated commands awaiting the next tick.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        CommandQueue::default()
    }

    /// Validate and enqueue. An invalid command never enters the queue.
    pub fn submit(&mut self, command: Command) -> ReactorResult<()> {
        command.validate()?;
        self.pending.push_back(command);
        Ok(())
    }

    /// Take everything queued so far, in submission order. Commands
    /// submitted after this call wait for the next tick.
    pub fn drain_snapshot(&mut self) -> Vec<Command> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
