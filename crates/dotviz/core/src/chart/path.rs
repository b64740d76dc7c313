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

//! SVG path description strings from possibly-invalid coordinates
//!
//! Invalid points are dropped, not substituted: the emitted path is the path
//! of the valid points only, in their original order, in the
//! `"M x y L x y ..."` token format.

use std::fmt::Write;

/// Builds a path description, dropping any point with a non-finite coordinate
///
/// Zero valid points yield an empty string. Otherwise the first valid point
/// becomes a move command and every later valid point a line command.
pub fn build_path(points: impl IntoIterator<Item = (f64, f64)>) -> String {
    let mut path = String::new();
    for (x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let command = if path.is_empty() { 'M' } else { 'L' };
        if !path.is_empty() {
            path.push(' ');
        }
        // Writing to a String cannot fail
        let _ = write!(path, "{command} {x} {y}");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_then_line_commands() {
        let path = build_path(vec![(0.0, 0.0), (20.0, 10.0), (40.0, 5.0)]);
        assert_eq!(path, "M 0 0 L 20 10 L 40 5");
    }

    #[test]
    fn test_invalid_points_are_dropped_not_substituted() {
        let with_invalid = build_path(vec![(0.0, 0.0), (f64::NAN, 20.0), (20.0, 10.0)]);
        let valid_only = build_path(vec![(0.0, 0.0), (20.0, 10.0)]);
        assert_eq!(with_invalid, valid_only);
    }

    #[test]
    fn test_leading_invalid_point_shifts_move_command() {
        let path = build_path(vec![(f64::INFINITY, 0.0), (5.0, 5.0), (6.0, 6.0)]);
        assert_eq!(path, "M 5 5 L 6 6");
    }

    #[test]
    fn test_no_valid_points_yields_empty_path() {
        assert_eq!(build_path(vec![]), "");
        assert_eq!(build_path(vec![(f64::NAN, f64::NAN)]), "");
    }

    #[test]
    fn test_single_valid_point_is_a_bare_move() {
        assert_eq!(build_path(vec![(1.5, 2.5)]), "M 1.5 2.5");
    }
}
