// Plain-text tile grid loading

use super::MapError;
use std::path::Path;

/// A grid-based level: each cell references a tile type id, 0 = empty.
///
/// The file format is a header line `width height tile_width tile_height`
/// followed by `height` rows of whitespace-separated tile ids, listed
/// top-to-bottom. In memory the grid is addressed with y = 0 at the bottom,
/// matching the physics world.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_width: u32,
    tile_height: u32,
    /// Row-major, row 0 at the bottom
    tiles: Vec<u32>,
}

impl TileMap {
    /// Load a map from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(&path)?;
        let map = Self::parse(&text)?;
        log::info!(
            "loaded map {} ({}x{} tiles, {}x{} px)",
            path.as_ref().display(),
            map.width,
            map.height,
            map.pixel_width(),
            map.pixel_height()
        );
        Ok(map)
    }

    /// Parse a map from its text form.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header) = lines.next().ok_or(MapError::MissingHeader)?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(MapError::MalformedHeader(header.to_string()));
        }
        let parse_dim = |s: &str| {
            s.parse::<u32>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| MapError::MalformedHeader(header.to_string()))
        };
        let width = parse_dim(fields[0])? as usize;
        let height = parse_dim(fields[1])? as usize;
        let tile_width = parse_dim(fields[2])?;
        let tile_height = parse_dim(fields[3])?;

        // Rows come top-to-bottom; fill the grid bottom-up.
        let mut tiles = vec![0u32; width * height];
        let mut rows_read = 0;
        for (line_no, line) in lines {
            if rows_read == height {
                return Err(MapError::RowCount {
                    expected: height,
                    found: rows_read + 1,
                });
            }
            let y = height - 1 - rows_read;
            let mut found = 0;
            for (x, token) in line.split_whitespace().enumerate() {
                if x < width {
                    tiles[y * width + x] =
                        token.parse().map_err(|_| MapError::BadTileId {
                            line_no,
                            token: token.to_string(),
                        })?;
                }
                found += 1;
            }
            if found != width {
                return Err(MapError::RowMismatch {
                    row: rows_read + 1,
                    expected: width,
                    found,
                });
            }
            rows_read += 1;
        }
        if rows_read != height {
            return Err(MapError::RowCount {
                expected: height,
                found: rows_read,
            });
        }

        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            tiles,
        })
    }

    /// Tile id at grid position (x, y), y = 0 at the bottom.
    pub fn tile_at(&self, x: usize, y: usize) -> u32 {
        self.tiles[y * self.width + x]
    }

    pub fn width_in_tiles(&self) -> usize {
        self.width
    }

    pub fn height_in_tiles(&self) -> usize {
        self.height
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Map width in pixels
    pub fn pixel_width(&self) -> f32 {
        (self.width as u32 * self.tile_width) as f32
    }

    /// Map height in pixels
    pub fn pixel_height(&self) -> f32 {
        (self.height as u32 * self.tile_height) as f32
    }

    /// Iterate over occupied cells as (x, y, tile_id)
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                let id = self.tile_at(x, y);
                (id != 0).then_some((x, y, id))
            })
        })
    }
}
