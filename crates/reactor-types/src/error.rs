// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReactorError {
    /// The stiff solver failed to converge or produced a non-finite value.
    /// Fatal: the session must be aborted, never repaired.
    #[error("Integration diverged at t={time_s:.6} s: {message}")]
    IntegrationDivergence { time_s: f64, message: String },

    /// A command carried a value that cannot be clamped into range
    /// (typically non-finite). Non-fatal at the session level.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ReactorResult<T> = Result<T, ReactorError>;
