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

//! Axis tick sequence generation

use tracing::warn;

use crate::safe::number::SafeNumber;

const MIN_TICK_COUNT: usize = 2;
const MAX_TICK_COUNT: usize = 20;

/// Generates `count` evenly spaced tick values from `min` to `max` inclusive
///
/// `count` is clamped to `[2, 20]`. A degenerate axis (`max <= min` after
/// coercion) yields the single-element sequence `[min]`. The last tick is
/// pinned to `max` exactly so floating point drift never shortens the axis.
pub fn generate_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let min = SafeNumber::of(min).value();
    let max = SafeNumber::of(max).value();

    if max <= min {
        return vec![min];
    }

    // Finite bounds can still have a span that overflows f64; interior
    // ticks would be non-finite, so fall back to the bounds alone
    let span = max - min;
    if !span.is_finite() {
        warn!(min, max, "tick span overflows, emitting bounds only");
        return vec![min, max];
    }

    let count = count.clamp(MIN_TICK_COUNT, MAX_TICK_COUNT);
    let step = span / (count - 1) as f64;

    let mut ticks: Vec<f64> = (0..count).map(|i| min + step * i as f64).collect();
    ticks[count - 1] = max;
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_spacing_inclusive_of_bounds() {
        let ticks = generate_ticks(0.0, 100.0, 5);
        assert_eq!(ticks, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_inverted_bounds_yield_single_tick() {
        assert_eq!(generate_ticks(100.0, 0.0, 5), vec![100.0]);
        assert_eq!(generate_ticks(5.0, 5.0, 5), vec![5.0]);
    }

    #[test]
    fn test_count_is_clamped() {
        assert_eq!(generate_ticks(0.0, 10.0, 0).len(), 2);
        assert_eq!(generate_ticks(0.0, 10.0, 1).len(), 2);
        assert_eq!(generate_ticks(0.0, 10.0, 500).len(), 20);
    }

    #[test]
    fn test_last_tick_is_exactly_max() {
        let ticks = generate_ticks(0.0, 0.3, 7);
        assert_eq!(*ticks.last().unwrap(), 0.3);
        assert_eq!(ticks[0], 0.0);
    }

    #[test]
    fn test_overflowing_span_yields_finite_ticks() {
        // Both bounds are valid f64 values, but their span is not
        let ticks = generate_ticks(-f64::MAX, f64::MAX, 5);
        assert_eq!(ticks, vec![-f64::MAX, f64::MAX]);
        assert!(ticks.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn test_non_finite_bounds_are_coerced() {
        // NaN bounds coerce to zero, giving a degenerate axis
        assert_eq!(generate_ticks(f64::NAN, f64::NAN, 5), vec![0.0]);
        let ticks = generate_ticks(0.0, f64::INFINITY, 5);
        assert!(ticks.iter().all(|t| t.is_finite()));
    }
}
