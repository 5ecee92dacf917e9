// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Simulation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Top-level simulation driver: operator command queue and the fixed-tick
//! loop that sequences safety, actuation, physics and control.

pub mod command;
pub mod driver;

pub use command::{Command, CommandQueue, PowerMode};
pub use driver::ReactorSimulation;
