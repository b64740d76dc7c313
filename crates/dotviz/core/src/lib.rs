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

//! Dotviz core: defensive computation for rendering pipelines
//!
//! This crate lets chart and board rendering code consume untrusted, possibly
//! malformed numeric and collection data without crashing. It provides:
//! - Safe numeric and array wrappers that never panic or surface NaN/Infinity
//! - Chart primitives (linear scales, axis ticks, path strings) built on them
//! - A validation boundary decoding raw JSON into strongly typed records
//! - Count- and byte-bounded caches with dependency-based invalidation
//! - A virtual-scroll visible-range calculator for large lists
//! - A batch processor throttling bursty producers into a bounded-rate consumer

pub mod batch;
pub mod cache;
pub mod chart;
pub mod safe;
pub mod scroll;
pub mod validate;

// Re-export main components for easier access
pub use batch::{BatchConfig, BatchOutcome, BatchProcessor};
pub use cache::{CacheConfig, CacheStats, IntelligentCache, MemoConfig, Memoizer, SerdeSizeEstimator, SizeEstimator};
pub use chart::{LinearScale, build_path, generate_ticks};
pub use safe::{Computed, SafeArray, SafeNumber};
pub use scroll::{ScrollItem, ViewportState, VisibleRange, calculate_visible_items};
pub use validate::{chart_points, coordinate_pairs, entities};
