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

//! Validation boundary: raw JSON in, strongly typed records out
//!
//! This is where parse-don't-validate happens. Arbitrary untyped input is
//! decoded exactly once into `ValidatedPoint`/`ValidatedEntity`; elements
//! that fail any structural or finiteness check are dropped. Downstream
//! numeric code (SafeMath, chart primitives) always runs on the output of
//! these filters, never on raw input.

use serde_json::{Map, Value};
use tracing::debug;

use dotviz_common::{ValidatedEntity, ValidatedPoint};

use crate::safe::array::SafeArray;
use crate::safe::number::SafeNumber;

/// Decodes `{x, y}` objects with finite coordinates
///
/// Non-array input yields an empty vector. Coordinates are coerced through
/// SafeNumber, so numeric strings survive but NaN and missing fields do not.
pub fn chart_points(input: &Value) -> Vec<ValidatedPoint> {
    SafeArray::from_value(input, decode_point).into_vec()
}

/// Decodes `[x, y]` coordinate pairs with finite components
pub fn coordinate_pairs(input: &Value) -> Vec<ValidatedPoint> {
    SafeArray::from_value(input, |element| {
        let pair = element.as_array()?;
        if pair.len() < 2 {
            return None;
        }
        let x = coerce_finite(&pair[0])?;
        let y = coerce_finite(&pair[1])?;
        ValidatedPoint::new(x, y)
    })
    .into_vec()
}

/// Decodes entity records with a validated identity and nested position
///
/// `id` and `name` must be non-empty strings and `position` must carry
/// finite x/y. Any other fields on the record are preserved in `extra`.
pub fn entities(input: &Value) -> Vec<ValidatedEntity> {
    let decoded = SafeArray::from_value(input, decode_entity).into_vec();
    debug!(count = decoded.len(), "validated entity records");
    decoded
}

fn decode_point(element: &Value) -> Option<ValidatedPoint> {
    let object = element.as_object()?;
    let x = coerce_finite(object.get("x")?)?;
    let y = coerce_finite(object.get("y")?)?;
    ValidatedPoint::new(x, y)
}

fn decode_entity(element: &Value) -> Option<ValidatedEntity> {
    let object = element.as_object()?;
    let id = non_empty_string(object.get("id")?)?;
    let name = non_empty_string(object.get("name")?)?;
    let position = decode_point(object.get("position")?)?;

    let extra: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "id" | "name" | "position"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Some(ValidatedEntity { id, name, position, extra })
}

fn coerce_finite(value: &Value) -> Option<f64> {
    let coerced = SafeNumber::coerce(value, 0.0);
    coerced.is_valid().then(|| coerced.value())
}

fn non_empty_string(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
