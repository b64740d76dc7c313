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

//! Validated boundary records
//!
//! These types are only ever constructed by the validation boundary in
//! `dotviz-core`. Once one exists, every numeric field is finite and every
//! string field is non-empty, so downstream numeric code never re-checks
//! shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A 2D coordinate whose components are both finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatedPoint {
    pub x: f64,
    pub y: f64,
}

impl ValidatedPoint {
    /// Constructs a point only if both coordinates are finite
    pub fn new(x: f64, y: f64) -> Option<Self> {
        if x.is_finite() && y.is_finite() { Some(Self { x, y }) } else { None }
    }
}

/// An entity record with a validated identity and position
///
/// Fields beyond the required ones are preserved verbatim in `extra` so a
/// consumer can still reach sport-specific attributes (jersey number, role)
/// without the core caring about their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedEntity {
    pub id: String,
    pub name: String,
    pub position: ValidatedPoint,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
