// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Reactor Control
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Control systems modules: rod actuator, coolant flow controller, PID
//! power controller, safety supervisor, circular telemetry buffers.

pub mod coolant;
pub mod pid;
pub mod rod;
pub mod safety;
pub mod telemetry;
