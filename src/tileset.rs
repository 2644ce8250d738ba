use std::path::PathBuf;

use macroquad::math::{Rect, UVec2};

/// An atlas-backed tileset owning the gids `[first_gid, first_gid + tile_count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    /// First gid this tileset owns.
    pub first_gid: u32,
    /// Reference as written in the map, `None` for an embedded tileset.
    pub source: Option<String>,
    /// Where the descriptor was read from (the map itself when embedded).
    pub source_path: PathBuf,
    /// Atlas image, resolved against the map's base directory.
    pub image_source: Option<PathBuf>,
    /// Tile width and height in pixels.
    pub tile_size: UVec2,
    /// Number of tiles, and so of gids, the tileset owns.
    pub tile_count: u32,
    /// Atlas row width in tiles. May be 0 when the document omits it.
    pub columns: u32,
}

impl TileSet {
    /// Whether `gid` falls in this tileset's range.
    #[inline]
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && u64::from(gid) < self.end_gid()
    }

    /// Last gid owned, `None` for an empty tileset.
    pub fn last_gid(&self) -> Option<u32> {
        (self.tile_count > 0).then(|| (self.end_gid() - 1) as u32)
    }

    /// Pixel rectangle of `local_id` in the atlas. `None` for ids outside the
    /// tileset or when `columns` is 0.
    pub fn tile_rect(&self, local_id: i64) -> Option<Rect> {
        if self.columns == 0 || local_id < 0 || local_id >= i64::from(self.tile_count) {
            return None;
        }
        let cols = i64::from(self.columns);
        let col = (local_id % cols) as f32;
        let row = (local_id / cols) as f32;
        let (tw, th) = (self.tile_size.x as f32, self.tile_size.y as f32);
        Some(Rect::new(col * tw, row * th, tw, th))
    }

    #[inline]
    fn end_gid(&self) -> u64 {
        u64::from(self.first_gid) + u64::from(self.tile_count)
    }
}
