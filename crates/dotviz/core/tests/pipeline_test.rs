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

// End-to-end pipeline: raw untrusted JSON through validation, safe
// aggregates, chart primitives, and the dependency-tagged cache.

use dotviz_core::cache::{CacheConfig, IntelligentCache};
use dotviz_core::chart::{LinearScale, build_path, generate_ticks};
use dotviz_core::safe::math;
use dotviz_core::validate;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_chart_pipeline_survives_malformed_input() {
    init_tracing();
    // Raw feed with the usual damage: wrong types, nulls, NaN-ish strings
    let raw = json!([
        {"x": 1, "y": 10},
        {"x": "invalid", "y": 20},
        null,
        {"x": 4, "y": 40},
        {"x": 2, "y": "25"},
        "garbage"
    ]);

    // Step 1: validate once at the boundary
    let points = validate::chart_points(&raw);
    assert_eq!(points.len(), 3);

    // Step 2: safe aggregates over the validated coordinates
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let y_min = math::min(&ys, 0.0);
    let y_max = math::max(&ys, 1.0);
    assert_eq!((y_min, y_max), (10.0, 40.0));

    // Step 3: derived chart geometry
    let scale = LinearScale::new((y_min, y_max), (300.0, 0.0));
    assert_eq!(scale.map(y_min), 300.0);
    assert_eq!(scale.map(y_max), 0.0);

    let ticks = generate_ticks(y_min, y_max, 4);
    assert_eq!(ticks.first(), Some(&10.0));
    assert_eq!(ticks.last(), Some(&40.0));

    let path = build_path(points.iter().map(|p| (p.x, scale.map(p.y))));
    assert!(path.starts_with("M "));
    assert_eq!(path.matches('L').count(), 2);

    // Step 4: cache the derived path, keyed by dataset, tagged for invalidation
    let cache: IntelligentCache<String> = IntelligentCache::new(CacheConfig::default());
    cache.set("path:match42", path.clone(), &["dataset:match42"]);
    assert_eq!(cache.get("path:match42"), Some(path));

    // Upstream dataset changes: derived results vanish without key knowledge
    let removed = cache.invalidate_by_dependency("dataset:match42");
    assert_eq!(removed, 1);
    assert_eq!(cache.get("path:match42"), None);
}

#[test]
fn test_empty_validated_dataset_produces_empty_outputs() {
    init_tracing();
    // All-garbage input: every stage still returns a usable value, letting
    // the consumer show its "not enough data" placeholder
    let raw = json!([null, "x", {"x": "a", "y": "b"}, 42]);

    let points = validate::chart_points(&raw);
    assert!(points.is_empty());

    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    assert_eq!(math::average(&ys, 0.0), 0.0);
    assert_eq!(build_path(points.iter().map(|p| (p.x, p.y))), "");
    assert_eq!(generate_ticks(math::min(&ys, 0.0), math::max(&ys, 0.0), 5), vec![0.0]);
}

#[test]
fn test_entity_board_pipeline() {
    init_tracing();
    let raw = json!([
        {"id": "p1", "name": "Alice", "position": {"x": 10, "y": 20}, "role": "GK"},
        {"id": "p2", "name": "Bob", "position": {"x": 30, "y": 60}},
        {"id": "", "name": "Ghost", "position": {"x": 0, "y": 0}},
        {"id": "p4", "name": "Broken", "position": {"x": "NaN", "y": 1}}
    ]);

    let entities = validate::entities(&raw);
    assert_eq!(entities.len(), 2);

    let spread = math::distance(
        (entities[0].position.x, entities[0].position.y),
        (entities[1].position.x, entities[1].position.y),
    );
    assert!((spread - (20.0f64 * 20.0 + 40.0 * 40.0).sqrt()).abs() < 1e-9);
    assert_eq!(entities[0].extra.get("role"), Some(&json!("GK")));
}
