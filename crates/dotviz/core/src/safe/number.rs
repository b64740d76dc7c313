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

//! Finite-or-fallback numeric wrapping
//!
//! `SafeNumber` is the single place where untrusted numbers enter the
//! computation layer. The stored value is always finite: if the input cannot
//! be coerced to a finite f64, a caller-supplied fallback is stored instead
//! and the instance is flagged invalid. Arithmetic never panics and never
//! produces NaN/Infinity; any non-finite intermediate is replaced by zero.

use serde_json::Value;
use tracing::warn;

/// A numeric value guaranteed finite, with validity flags from coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeNumber {
    value: f64,       // Always finite
    is_valid: bool,   // Whether the source input coerced to a finite number
    is_integer: bool, // Whether the stored value has no fractional part
}

impl SafeNumber {
    /// Wraps a raw f64, substituting `fallback` if it is not finite
    ///
    /// A non-finite fallback is itself replaced by zero, so the stored value
    /// is finite no matter what the caller passes.
    pub fn new(input: f64, fallback: f64) -> Self {
        if input.is_finite() {
            Self::finite(input, true)
        } else {
            warn!(input = %input, "non-finite number replaced by fallback");
            Self::finite(Self::sanitize_fallback(fallback), false)
        }
    }

    /// Wraps a raw f64 with the default fallback of zero
    pub fn of(input: f64) -> Self {
        Self::new(input, 0.0)
    }

    /// Coerces an arbitrary JSON value, substituting `fallback` on failure
    ///
    /// Coercion rules: numbers pass through, strings are trimmed and parsed,
    /// booleans map to 1/0, everything else (null, arrays, objects) is
    /// invalid. The result is valid only if coercion yields a finite f64.
    pub fn coerce(input: &Value, fallback: f64) -> Self {
        match Self::coerce_raw(input) {
            Some(n) if n.is_finite() => Self::finite(n, true),
            _ => Self::finite(Self::sanitize_fallback(fallback), false),
        }
    }

    fn coerce_raw(input: &Value) -> Option<f64> {
        match input {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    fn sanitize_fallback(fallback: f64) -> f64 {
        if fallback.is_finite() { fallback } else { 0.0 }
    }

    fn finite(value: f64, is_valid: bool) -> Self {
        debug_assert!(value.is_finite());
        Self {
            value,
            is_valid,
            is_integer: value.fract() == 0.0,
        }
    }

    /// The wrapped value, always finite
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Always true for the stored value; kept for record completeness
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }

    pub fn is_integer(&self) -> bool {
        self.is_integer
    }

    /// Returns a new instance holding `self + rhs`, guarded against overflow
    pub fn add(&self, rhs: f64) -> Self {
        self.apply("add", self.value + Self::of(rhs).value())
    }

    /// Returns a new instance holding `self - rhs`
    pub fn sub(&self, rhs: f64) -> Self {
        self.apply("sub", self.value - Self::of(rhs).value())
    }

    /// Returns a new instance holding `self * rhs`
    pub fn mul(&self, rhs: f64) -> Self {
        self.apply("mul", self.value * Self::of(rhs).value())
    }

    /// Returns a new instance holding `self / rhs`
    ///
    /// Division by (coerced) zero yields zero, flagged invalid, with a
    /// warning logged. The result is never NaN or Infinity.
    pub fn div(&self, rhs: f64) -> Self {
        let divisor = Self::of(rhs).value();
        if divisor == 0.0 {
            warn!(dividend = self.value, "division by zero yields fallback of 0");
            return Self::finite(0.0, false);
        }
        self.apply("div", self.value / divisor)
    }

    fn apply(&self, op: &str, result: f64) -> Self {
        if result.is_finite() {
            Self::finite(result, self.is_valid)
        } else {
            warn!(op, lhs = self.value, "non-finite arithmetic result replaced by 0");
            Self::finite(0.0, false)
        }
    }
}

impl From<f64> for SafeNumber {
    fn from(input: f64) -> Self {
        Self::of(input)
    }
}
