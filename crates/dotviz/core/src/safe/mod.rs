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

//! Safe numeric and collection primitives
//!
//! This module is the foundation of the defensive layer:
//! - Numeric wrapping with finite-or-fallback semantics
//! - Validated array snapshots with per-element failure isolation
//! - Total-ordering-safe aggregates and a run-and-recover funnel
//!
//! No operation in this family panics or returns NaN/Infinity to a caller.

pub mod array; // Validated sequence snapshots
pub mod math; // Aggregates and guarded computation
pub mod number; // Finite-or-fallback numeric wrapping

// Re-export main components for easier access
pub use array::SafeArray;
pub use dotviz_common::Computed;
pub use number::SafeNumber;
