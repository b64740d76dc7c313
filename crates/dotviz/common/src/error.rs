// Dotviz
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Diagnostic taxonomy for the defensive computation layer
//!
//! Every failure the core recovers from is classified here. Diagnostics are
//! informational: they are logged or carried alongside a fallback value, and
//! never alter control flow or escape to a caller as an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Classification of a recovered failure
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("computation failure: {reason}")]
    ComputationFailure { reason: String },

    #[error("resource exhaustion: {reason}")]
    ResourceExhaustion { reason: String },
}

/// A recovered failure with the call-site context it occurred in
///
/// Produced whenever a subsystem substitutes a fallback for bad input or a
/// failed unit of work. Consumers may inspect it, but nothing in the core
/// branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub context: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn invalid_input(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            kind: DiagnosticKind::InvalidInput { reason: reason.into() },
        }
    }

    pub fn computation_failure(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            kind: DiagnosticKind::ComputationFailure { reason: reason.into() },
        }
    }

    pub fn resource_exhaustion(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            kind: DiagnosticKind::ResourceExhaustion { reason: reason.into() },
        }
    }

    /// Logs the diagnostic at warn level and returns it
    ///
    /// The single funnel through which recovery paths report what they
    /// replaced. Logging is the only side effect.
    pub fn emit(self) -> Self {
        warn!(context = %self.context, "{}", self.kind);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.context, self.kind)
    }
}

/// Result of a guarded computation
///
/// `Ok` carries the computed value. `Recovered` carries the caller-supplied
/// fallback together with the diagnostic describing what went wrong. Both
/// arms hold a usable value, so a caller that does not care about the
/// distinction can just take `value()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Computed<T> {
    Ok(T),
    Recovered { value: T, diagnostic: Diagnostic },
}

impl<T> Computed<T> {
    /// Consumes the result, yielding the value from either arm
    pub fn value(self) -> T {
        match self {
            Computed::Ok(value) => value,
            Computed::Recovered { value, .. } => value,
        }
    }

    /// Borrows the value from either arm
    pub fn as_value(&self) -> &T {
        match self {
            Computed::Ok(value) => value,
            Computed::Recovered { value, .. } => value,
        }
    }

    /// True if the computation fell back to the recovery path
    pub fn is_recovered(&self) -> bool {
        matches!(self, Computed::Recovered { .. })
    }

    /// The diagnostic, if the computation was recovered
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Computed::Ok(_) => None,
            Computed::Recovered { diagnostic, .. } => Some(diagnostic),
        }
    }
}
