// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Reactor Physics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physics engine: reactivity balance, point kinetics, lumped
//! thermal-hydraulics, fission-product poison chains, and the implicit
//! coupled solver that advances them on a shared time base.

pub mod kinetics;
pub mod poisons;
pub mod reactivity;
pub mod solver;
pub mod thermal;
