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

//! Virtual-scroll visible-range calculation
//!
//! Maps a scroll offset and variable item heights onto the index range a
//! viewport should render. Stateless: the caller owns both the item list and
//! the viewport state. Invalid heights fall back to the viewport's default
//! item height, and an empty or all-invalid list yields a zero-valued range
//! rather than an error.

use crate::safe::number::SafeNumber;

/// Height used when neither the item nor the viewport supplies a valid one
const FALLBACK_ITEM_HEIGHT: f64 = 40.0;

/// One entry of a virtualized list
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollItem<T> {
    pub id: String,
    pub height: Option<f64>,
    pub data: T,
}

/// Scroll and viewport geometry, owned by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scroll_top: f64,
    pub container_height: f64,
    pub item_height: f64, // Default height for items without a valid one
    pub overscan: usize,
}

/// The index range a viewport should render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize,
    pub total_height: f64,
    pub offset_y: f64, // Cumulative height of every item before start_index
}

impl VisibleRange {
    fn zero() -> Self {
        Self {
            start_index: 0,
            end_index: 0,
            total_height: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Computes the visible index range for a scrolled virtualized list
///
/// The start index is the first item whose cumulative offset plus height
/// exceeds the scroll offset, backed off by `overscan` (clamped to 0). The
/// end index accumulates visible height from the start until it exceeds the
/// container height, then extends forward by `overscan` (clamped to the last
/// index).
pub fn calculate_visible_items<T>(items: &[ScrollItem<T>], state: &ViewportState) -> VisibleRange {
    if items.is_empty() {
        return VisibleRange::zero();
    }

    let scroll_top = SafeNumber::of(state.scroll_top).value().max(0.0);
    let container_height = SafeNumber::of(state.container_height).value().max(0.0);
    let heights: Vec<f64> = items.iter().map(|item| effective_height(item.height, state.item_height)).collect();
    let total_height: f64 = heights.iter().sum();
    let last_index = items.len() - 1;

    // First item that extends past the scroll offset
    let mut cumulative = 0.0;
    let mut start_index = last_index;
    for (i, height) in heights.iter().enumerate() {
        if cumulative + height > scroll_top {
            start_index = i;
            break;
        }
        cumulative += height;
    }
    start_index = start_index.saturating_sub(state.overscan);

    // Accumulate visible height from the start until the viewport is filled
    let mut visible = 0.0;
    let mut end_index = last_index;
    for (i, height) in heights.iter().enumerate().skip(start_index) {
        visible += height;
        if visible > container_height {
            end_index = i;
            break;
        }
    }
    end_index = (end_index + state.overscan).min(last_index);

    let offset_y: f64 = heights[..start_index].iter().sum();

    VisibleRange {
        start_index,
        end_index,
        total_height,
        offset_y,
    }
}

fn effective_height(height: Option<f64>, default_height: f64) -> f64 {
    match height {
        Some(h) if h.is_finite() && h > 0.0 => h,
        _ => {
            let default = SafeNumber::of(default_height).value();
            if default > 0.0 { default } else { FALLBACK_ITEM_HEIGHT }
        }
    }
}
