// Tile map loading and collision-edge extraction

mod collision;
mod tilemap;

pub use collision::{
    build_collision_segments, merge_world_edges, parse_collision_rules, CollisionRules,
    LineSegment,
};
pub use tilemap::TileMap;

/// Errors raised while loading a map or its collision description.
/// A missing or malformed file propagates to process exit.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("map file has no header line")]
    MissingHeader,

    #[error("malformed header: {0:?}")]
    MalformedHeader(String),

    #[error("map row {row}: expected {expected} tiles, found {found}")]
    RowMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("map has {found} rows, header says {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("bad tile id {token:?} on line {line_no}")]
    BadTileId { line_no: usize, token: String },

    #[error("malformed collision entry {token:?} on line {line_no}")]
    BadCollisionEntry { line_no: usize, token: String },
}
