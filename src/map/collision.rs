// Per-tile collision metadata and the greedy edge merger

use super::{MapError, TileMap};
use glam::Vec2;
use std::collections::HashMap;

/// Local edge segments per tile type, in pixel coordinates within the tile.
/// Local y is measured downward from the tile's top edge.
pub type CollisionRules = HashMap<u32, Vec<(Vec2, Vec2)>>;

/// Two same-slope segments merge when their endpoints are at most one
/// diagonal grid step apart (sqrt(2) px), squared here to skip the sqrt.
const MERGE_DISTANCE_SQUARED: f32 = 2.0 + 1e-3;

/// Slope tolerance for treating two edges as collinear, in radians.
const SLOPE_TOLERANCE: f32 = 1e-6;

/// A world-space collision segment. Start and end are just the two ends of
/// the line, not a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    fn slope(&self) -> f32 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Tack `other` onto this segment if it continues it with no kink or
    /// gap: equal slope within tolerance, and a pair of endpoints within one
    /// diagonal step. On success the two outer points describe the segment.
    pub fn extend_if_possible(&mut self, other: &LineSegment) -> bool {
        if (self.slope() - other.slope()).abs() > SLOPE_TOLERANCE {
            return false;
        }

        if self.start.distance_squared(other.start) <= MERGE_DISTANCE_SQUARED {
            self.start = other.end;
            true
        } else if self.end.distance_squared(other.start) <= MERGE_DISTANCE_SQUARED {
            self.end = other.end;
            true
        } else if self.end.distance_squared(other.end) <= MERGE_DISTANCE_SQUARED {
            self.end = other.start;
            true
        } else if self.start.distance_squared(other.end) <= MERGE_DISTANCE_SQUARED {
            self.start = other.start;
            true
        } else {
            false
        }
    }
}

/// Parse a collision-description text: one line per tile type, in the form
/// `tileId x1xy1,x2xy2 [x1xy1,x2xy2 ...]`. Tile id 0 implicitly has no
/// segments; blank lines and `#` comments are skipped.
pub fn parse_collision_rules(text: &str) -> Result<CollisionRules, MapError> {
    let mut rules = CollisionRules::new();
    rules.insert(0, Vec::new());

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = idx + 1;

        let mut cols = line.split_whitespace();
        let Some(id_token) = cols.next() else {
            continue;
        };
        let tile_id: u32 = id_token.parse().map_err(|_| MapError::BadCollisionEntry {
            line_no,
            token: id_token.to_string(),
        })?;

        let mut segments = Vec::new();
        for pair in cols {
            segments.push(parse_edge_pair(pair, line_no)?);
        }
        rules.insert(tile_id, segments);
    }

    Ok(rules)
}

fn parse_edge_pair(token: &str, line_no: usize) -> Result<(Vec2, Vec2), MapError> {
    let bad = || MapError::BadCollisionEntry {
        line_no,
        token: token.to_string(),
    };

    let (start, end) = token.split_once(',').ok_or_else(bad)?;
    let parse_point = |s: &str| -> Result<Vec2, MapError> {
        let (x, y) = s.split_once('x').ok_or_else(bad)?;
        Ok(Vec2::new(
            x.parse().map_err(|_| bad())?,
            y.parse().map_err(|_| bad())?,
        ))
    };
    Ok((parse_point(start)?, parse_point(end)?))
}

/// Try to extend an existing segment with the new edge; append it as a new
/// segment when nothing matches. The goal is as few segments as possible.
pub fn add_or_extend(segments: &mut Vec<LineSegment>, edge: LineSegment) {
    for existing in segments.iter_mut() {
        if existing.extend_if_possible(&edge) {
            return;
        }
    }
    segments.push(edge);
}

/// Translate every occupied cell's local edges into world pixels and merge
/// them greedily. O(tiles × existing-segments).
pub fn merge_world_edges(map: &TileMap, rules: &CollisionRules) -> Vec<LineSegment> {
    let tw = map.tile_width() as f32;
    let th = map.tile_height() as f32;
    let empty = Vec::new();

    let mut segments = Vec::new();
    for (x, y, tile_id) in map.occupied_cells() {
        for &(local_start, local_end) in rules.get(&tile_id).unwrap_or(&empty) {
            // Local y counts down from the tile's top edge
            let origin = Vec2::new(x as f32 * tw, y as f32 * th + th);
            let edge = LineSegment::new(
                origin + Vec2::new(local_start.x, -local_start.y),
                origin + Vec2::new(local_end.x, -local_end.y),
            );
            add_or_extend(&mut segments, edge);
        }
    }
    segments
}

/// Full static geometry for a map: the merged per-tile edges plus four
/// boundary edges enclosing the map extents. The boundary is four separate
/// edges rather than a box so bodies stay on the inside.
pub fn build_collision_segments(map: &TileMap, rules: &CollisionRules) -> Vec<LineSegment> {
    let mut segments = merge_world_edges(map, rules);

    let w = map.pixel_width();
    let h = map.pixel_height();
    segments.push(LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(w, 0.0)));
    segments.push(LineSegment::new(Vec2::new(0.0, h), Vec2::new(w, h)));
    segments.push(LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, h)));
    segments.push(LineSegment::new(Vec2::new(w, 0.0), Vec2::new(w, h)));

    log::info!(
        "built {} collision segments for {}x{} map",
        segments.len(),
        map.width_in_tiles(),
        map.height_in_tiles()
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> LineSegment {
        LineSegment::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    /// Total covered length, independent of segment identity
    fn coverage(segments: &[LineSegment]) -> f32 {
        segments.iter().map(|s| s.length()).sum()
    }

    #[test]
    fn test_extend_end_to_start() {
        let mut a = seg(0.0, 32.0, 31.0, 32.0);
        assert!(a.extend_if_possible(&seg(32.0, 32.0, 63.0, 32.0)));
        assert_eq!(a, seg(0.0, 32.0, 63.0, 32.0));
    }

    #[test]
    fn test_extend_start_to_end() {
        // New edge sits just before the existing one
        let mut a = seg(32.0, 32.0, 63.0, 32.0);
        assert!(a.extend_if_possible(&seg(0.0, 32.0, 31.0, 32.0)));
        assert_eq!(a, seg(0.0, 32.0, 63.0, 32.0));
    }

    #[test]
    fn test_no_merge_different_slope() {
        let mut a = seg(0.0, 0.0, 31.0, 0.0);
        assert!(!a.extend_if_possible(&seg(31.0, 0.0, 31.0, 31.0)));
        assert!(!a.extend_if_possible(&seg(32.0, 1.0, 63.0, 2.0)));
    }

    #[test]
    fn test_no_merge_opposite_direction() {
        // Same line, opposite winding: atan2 slopes differ by pi
        let mut a = seg(0.0, 0.0, 31.0, 0.0);
        assert!(!a.extend_if_possible(&seg(63.0, 0.0, 32.0, 0.0)));
    }

    #[test]
    fn test_no_merge_gap_too_wide() {
        let mut a = seg(0.0, 0.0, 31.0, 0.0);
        assert!(!a.extend_if_possible(&seg(34.0, 0.0, 63.0, 0.0)));
    }

    #[test]
    fn test_diagonal_step_merges() {
        let mut a = seg(0.0, 0.0, 31.0, 31.0);
        assert!(a.extend_if_possible(&seg(32.0, 32.0, 63.0, 63.0)));
        assert_eq!(a, seg(0.0, 0.0, 63.0, 63.0));
    }

    #[test]
    fn test_parse_rules() {
        let rules = parse_collision_rules("3 0x0,31x0\n4 0x0,29x0 29x0,29x31\n").unwrap();
        assert_eq!(rules[&3], vec![(Vec2::new(0.0, 0.0), Vec2::new(31.0, 0.0))]);
        assert_eq!(rules[&4].len(), 2);
        assert!(rules[&0].is_empty());
    }

    #[test]
    fn test_parse_rules_skips_comments() {
        let rules = parse_collision_rules("# floor tile\n\n7 0x0,31x0\n").unwrap();
        assert_eq!(rules[&7].len(), 1);
    }

    #[test]
    fn test_parse_rules_malformed_pair() {
        assert!(matches!(
            parse_collision_rules("3 0x0-31x0\n"),
            Err(MapError::BadCollisionEntry { line_no: 1, .. })
        ));
        assert!(matches!(
            parse_collision_rules("x 0x0,31x0\n"),
            Err(MapError::BadCollisionEntry { .. })
        ));
    }

    #[test]
    fn test_row_of_tiles_merges_to_one_segment() {
        // Five floor tiles in a row, each with a top edge: minimal cover is
        // a single segment
        let map = TileMap::parse("5 1 32 32\n3 3 3 3 3\n").unwrap();
        let rules = parse_collision_rules("3 0x0,31x0\n").unwrap();
        let segments = merge_world_edges(&map, &rules);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], seg(0.0, 32.0, 159.0, 32.0));
    }

    #[test]
    fn test_column_of_tiles_merges_vertical_edge() {
        let map = TileMap::parse("1 3 32 32\n4 \n4\n4\n").unwrap();
        let rules = parse_collision_rules("4 29x0,29x31\n").unwrap();
        let segments = merge_world_edges(&map, &rules);
        assert_eq!(segments.len(), 1);
        assert_relative_eq!(segments[0].length(), 95.0);
    }

    #[test]
    fn test_corner_stays_two_segments() {
        // An L of floor + wall must not collapse into one segment
        let map = TileMap::parse("2 1 32 32\n3 4\n").unwrap();
        let rules = parse_collision_rules("3 0x0,31x0\n4 0x0,0x31\n").unwrap();
        let segments = merge_world_edges(&map, &rules);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_merge_is_order_independent_in_coverage() {
        let edges = [
            seg(0.0, 0.0, 31.0, 0.0),
            seg(32.0, 0.0, 63.0, 0.0),
            seg(64.0, 0.0, 95.0, 0.0),
            seg(96.0, 0.0, 127.0, 0.0),
        ];

        // Forward, reverse, and interleaved insertion all cover the same set
        let orders: [&[usize]; 3] = [&[0, 1, 2, 3], &[3, 2, 1, 0], &[1, 3, 0, 2]];
        let coverages: Vec<f32> = orders
            .iter()
            .map(|order| {
                let mut segments = Vec::new();
                for &i in order.iter() {
                    add_or_extend(&mut segments, edges[i]);
                }
                coverage(&segments)
            })
            .collect();

        assert_relative_eq!(coverages[0], coverages[1], epsilon = 1e-3);
        assert_relative_eq!(coverages[0], coverages[2], epsilon = 1e-3);
    }

    #[test]
    fn test_unknown_tile_id_has_no_edges() {
        let map = TileMap::parse("1 1 32 32\n9\n").unwrap();
        let rules = parse_collision_rules("3 0x0,31x0\n").unwrap();
        assert!(merge_world_edges(&map, &rules).is_empty());
    }

    #[test]
    fn test_boundary_edges_enclose_map() {
        let map = TileMap::parse("4 2 32 32\n0 0 0 0\n0 0 0 0\n").unwrap();
        let segments = build_collision_segments(&map, &CollisionRules::new());
        assert_eq!(segments.len(), 4);
        assert!(segments.contains(&seg(0.0, 0.0, 128.0, 0.0)));
        assert!(segments.contains(&seg(0.0, 64.0, 128.0, 64.0)));
        assert!(segments.contains(&seg(0.0, 0.0, 0.0, 64.0)));
        assert!(segments.contains(&seg(128.0, 0.0, 128.0, 64.0)));
    }
}
