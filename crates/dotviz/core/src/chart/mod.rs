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

//! Chart-safe geometry primitives
//!
//! Everything rendering code derives from validated data lives here:
//! - Linear scale functions with a zero-span guard
//! - Evenly spaced axis tick sequences
//! - SVG path description strings
//!
//! All three consume SafeNumber-coerced bounds and pre-validated points, so
//! a chart never receives NaN/Infinity coordinates.

pub mod path; // Path description strings
pub mod scale; // Linear interpolation
pub mod ticks; // Axis tick sequences

// Re-export main components for easier access
pub use path::build_path;
pub use scale::LinearScale;
pub use ticks::generate_ticks;
