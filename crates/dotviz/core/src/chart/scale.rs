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

//! Linear scale mapping between a data domain and a pixel range
//!
//! `f(v) = range_min + ((v - domain_min) / domain_span) * range_span`, with
//! `domain_span` forced to 1 when the computed span is zero so the mapping
//! never divides by zero. Both bounds pairs are coerced through SafeNumber
//! at construction, so a scale built from garbage still maps every input to
//! a finite output.

use crate::safe::number::SafeNumber;

/// Affine mapping from a numeric domain onto a numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_span: f64, // Never zero
    range_min: f64,
    range_span: f64,
}

impl LinearScale {
    /// Builds a scale from `(min, max)` domain and range bounds
    ///
    /// Non-finite bounds fall back to zero before the spans are computed.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let domain_min = SafeNumber::of(domain.0).value();
        let domain_max = SafeNumber::of(domain.1).value();
        let range_min = SafeNumber::of(range.0).value();
        let range_max = SafeNumber::of(range.1).value();

        let span = domain_max - domain_min;
        Self {
            domain_min,
            domain_span: if span == 0.0 { 1.0 } else { span },
            range_min,
            range_span: range_max - range_min,
        }
    }

    /// Maps a domain value into the range, always returning a finite number
    pub fn map(&self, value: f64) -> f64 {
        let v = SafeNumber::of(value).value();
        let mapped = self.range_min + ((v - self.domain_min) / self.domain_span) * self.range_span;
        SafeNumber::of(mapped).value()
    }

    /// Maps a range value back into the domain
    pub fn invert(&self, value: f64) -> f64 {
        let v = SafeNumber::of(value).value();
        if self.range_span == 0.0 {
            return self.domain_min;
        }
        let inverted = self.domain_min + ((v - self.range_min) / self.range_span) * self.domain_span;
        SafeNumber::of(inverted).value()
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_min + self.domain_span)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_min + self.range_span)
    }
}
