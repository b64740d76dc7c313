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

//! Validated sequence snapshots with per-element failure isolation
//!
//! `SafeArray` filters arbitrary input into an immutable snapshot that never
//! contains holes. Every transformation returns a new snapshot; a failing
//! per-element step (a closure returning `None`) drops that single element
//! rather than aborting the whole operation.

use serde_json::Value;
use tracing::{debug, warn};

use crate::safe::number::SafeNumber;

/// An immutable, hole-free ordered sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SafeArray<T> {
    items: Vec<T>,
}

impl<T> SafeArray<T> {
    /// Wraps an already-typed sequence
    ///
    /// Rust's type system rules out null/undefined holes for owned values,
    /// so no further filtering is needed here.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Builds a snapshot from optional slots, dropping the empty ones
    pub fn from_options(items: impl IntoIterator<Item = Option<T>>) -> Self {
        Self {
            items: items.into_iter().flatten().collect(),
        }
    }

    /// Decodes a JSON value element by element
    ///
    /// Non-array input yields an empty snapshot. Elements the decoder
    /// rejects are dropped; the rest keep their original order.
    pub fn from_value(input: &Value, decode: impl Fn(&Value) -> Option<T>) -> Self {
        let Some(elements) = input.as_array() else {
            warn!("expected an array, got non-array input; treating as empty");
            return Self { items: Vec::new() };
        };

        let items: Vec<T> = elements.iter().filter_map(&decode).collect();
        if items.len() < elements.len() {
            debug!(dropped = elements.len() - items.len(), "dropped undecodable elements");
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Index access; any out-of-range (including negative) index yields None
    pub fn at(&self, index: i64) -> Option<&T> {
        usize::try_from(index).ok().and_then(|i| self.items.get(i))
    }

    /// Maps each element, dropping elements the closure fails on
    ///
    /// A `None` from the closure discards that slot entirely; the result
    /// never contains placeholder values.
    pub fn map<U>(&self, f: impl Fn(&T) -> Option<U>) -> SafeArray<U> {
        let mapped: Vec<U> = self.items.iter().filter_map(&f).collect();
        if mapped.len() < self.items.len() {
            debug!(dropped = self.items.len() - mapped.len(), "map dropped failing elements");
        }
        SafeArray { items: mapped }
    }

    /// Keeps elements the predicate accepts; a failing predicate drops its element
    pub fn filter(&self, pred: impl Fn(&T) -> Option<bool>) -> SafeArray<T>
    where
        T: Clone,
    {
        SafeArray {
            items: self.items.iter().filter(|item| pred(item).unwrap_or(false)).cloned().collect(),
        }
    }

    /// Folds the sequence; a failing step keeps the prior accumulator
    pub fn reduce<A>(&self, initial: A, step: impl Fn(A, &T) -> Option<A>) -> A
    where
        A: Clone,
    {
        self.items.iter().fold(initial, |acc, item| {
            let prior = acc.clone();
            step(acc, item).unwrap_or(prior)
        })
    }

    /// Scans for the first accepted element; failing predicate calls are skipped
    pub fn find(&self, pred: impl Fn(&T) -> Option<bool>) -> Option<&T> {
        self.items.iter().find(|item| pred(item).unwrap_or(false))
    }

    /// Returns the sub-sequence `[start, end)`, bounds clamped to the snapshot
    pub fn slice(&self, start: usize, end: usize) -> SafeArray<T>
    where
        T: Clone,
    {
        let start = start.min(self.items.len());
        let end = end.clamp(start, self.items.len());
        SafeArray {
            items: self.items[start..end].to_vec(),
        }
    }
}

impl SafeArray<f64> {
    /// Builds a numeric snapshot, dropping NaN slots
    ///
    /// The default rule mirrors the untyped boundary: absent and NaN slots
    /// are holes and are removed. Infinities survive here; aggregate code
    /// filters to finite values where that matters.
    pub fn from_f64s(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            items: values.into_iter().filter(|v| !v.is_nan()).collect(),
        }
    }

    /// Decodes a JSON array into finite numbers via SafeNumber coercion
    pub fn numbers(input: &Value) -> Self {
        Self::from_value(input, |element| {
            let coerced = SafeNumber::coerce(element, 0.0);
            coerced.is_valid().then(|| coerced.value())
        })
    }
}

impl<'a, T> IntoIterator for &'a SafeArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
