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

//! Stateless numeric aggregates and the run-and-recover funnel
//!
//! Aggregates filter their input to finite values first; entries that are
//! NaN or infinite are excluded from the reduction, not treated as zero.
//! An input that is empty after filtering yields the caller's fallback.
//!
//! `calculate` is the single funnel through which risky computations pass:
//! a fallible unit of work either succeeds or is recovered into the caller's
//! fallback with a diagnostic attached.

use std::fmt;

use dotviz_common::{Computed, Diagnostic};

use crate::safe::number::SafeNumber;

/// Minimum of the finite values in `values`, or `fallback` if none remain
pub fn min(values: &[f64], fallback: f64) -> f64 {
    reduce_finite(values, fallback, f64::min)
}

/// Maximum of the finite values in `values`, or `fallback` if none remain
pub fn max(values: &[f64], fallback: f64) -> f64 {
    reduce_finite(values, fallback, f64::max)
}

/// Arithmetic mean of the finite values in `values`, or `fallback` if none remain
pub fn average(values: &[f64], fallback: f64) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return SafeNumber::new(fallback, 0.0).value();
    }
    let sum: f64 = finite.iter().sum();
    SafeNumber::of(sum).div(finite.len() as f64).value()
}

fn reduce_finite(values: &[f64], fallback: f64, combine: fn(f64, f64) -> f64) -> f64 {
    let result = values.iter().copied().filter(|v| v.is_finite()).reduce(combine);
    match result {
        Some(v) => v,
        None => SafeNumber::new(fallback, 0.0).value(),
    }
}

/// Euclidean distance between two points, always finite
///
/// Both coordinates of both points are coerced through SafeNumber before the
/// computation, so NaN/Infinity inputs contribute zero rather than poisoning
/// the result.
pub fn distance(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let dx = SafeNumber::of(p2.0).sub(SafeNumber::of(p1.0).value()).value();
    let dy = SafeNumber::of(p2.1).sub(SafeNumber::of(p1.1).value()).value();
    SafeNumber::of((dx * dx + dy * dy).sqrt()).value()
}

/// Executes a fallible unit of work, recovering failure into `fallback`
///
/// On success the value is returned as `Computed::Ok`. On failure the
/// caller's fallback is returned as `Computed::Recovered` together with a
/// diagnostic carrying `context`; the diagnostic is logged and never thrown.
pub fn calculate<T, E, F>(op: F, fallback: T, context: &str) -> Computed<T>
where
    F: FnOnce() -> Result<T, E>,
    E: fmt::Display,
{
    match op() {
        Ok(value) => Computed::Ok(value),
        Err(err) => Computed::Recovered {
            value: fallback,
            diagnostic: Diagnostic::computation_failure(context, err.to_string()).emit(),
        },
    }
}

/// Like [`calculate`], for work that may produce no value at all
pub fn calculate_optional<T, F>(op: F, fallback: T, context: &str) -> Computed<T>
where
    F: FnOnce() -> Option<T>,
{
    match op() {
        Some(value) => Computed::Ok(value),
        None => Computed::Recovered {
            value: fallback,
            diagnostic: Diagnostic::computation_failure(context, "computation produced no value").emit(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_filters_non_finite_entries() {
        assert_eq!(min(&[f64::NAN, 5.0, 3.0], 0.0), 3.0);
        assert_eq!(min(&[f64::INFINITY, 2.0], 0.0), 2.0);
    }

    #[test]
    fn test_min_of_empty_returns_fallback() {
        assert_eq!(min(&[], -1.0), -1.0);
        assert_eq!(min(&[f64::NAN, f64::INFINITY], 9.0), 9.0);
    }

    #[test]
    fn test_max_excludes_rather_than_zeroes() {
        // A NaN treated as zero would change this result
        assert_eq!(max(&[-5.0, f64::NAN, -3.0], 0.0), -3.0);
    }

    #[test]
    fn test_average_of_finite_values() {
        assert_eq!(average(&[2.0, 4.0, 6.0], 0.0), 4.0);
        assert_eq!(average(&[2.0, f64::NAN, 4.0], 0.0), 3.0);
        assert_eq!(average(&[], 1.5), 1.5);
    }

    #[test]
    fn test_distance_is_always_finite() {
        assert_eq!(distance((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert!(distance((f64::NAN, 0.0), (3.0, f64::INFINITY)).is_finite());
    }

    #[test]
    fn test_calculate_success_path() {
        let result = calculate(|| Ok::<_, String>(21 * 2), 0, "doubling");
        assert!(!result.is_recovered());
        assert_eq!(result.value(), 42);
    }

    #[test]
    fn test_calculate_recovers_failures_with_fallback() {
        let result = calculate(|| Err::<i32, _>("exploded"), -1, "risky_op");
        assert!(result.is_recovered());
        let diag = result.diagnostic().cloned();
        assert_eq!(result.value(), -1);
        assert!(diag.is_some_and(|d| d.context == "risky_op"));
    }

    #[test]
    fn test_calculate_optional_recovers_missing_value() {
        let result = calculate_optional(|| None::<u32>, 7, "lookup");
        assert!(result.is_recovered());
        assert_eq!(result.value(), 7);
    }
}
