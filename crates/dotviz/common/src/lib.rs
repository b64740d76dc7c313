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

//! Shared types for the Dotviz defensive computation layer
//!
//! This crate holds what both the core subsystems and their consumers need:
//! the diagnostic taxonomy used by every recovery path, and the strongly
//! typed records produced by the validation boundary.

pub mod error;
pub mod records;

// Re-export main components for easier access
pub use error::{Computed, Diagnostic, DiagnosticKind};
pub use records::{ValidatedEntity, ValidatedPoint};
