use macroquad::math::{IVec2, UVec2};

/// One cell of a tile layer.
///
/// Parsing only sets the gid; the tileset index and local id are written
/// by [`resolve_gids`](crate::resolve_gids), which starts every pass from a
/// clean slate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    gid: u32,
    resolved: Option<Resolved>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resolved {
    tileset_id: usize,
    local_id: i64,
}

impl Tile {
    pub(crate) fn new(gid: u32) -> Self {
        Tile {
            gid,
            resolved: None,
        }
    }

    /// Raw global id as written in the layer data.
    #[inline]
    pub fn gid(&self) -> u32 {
        self.gid
    }

    /// Gid 0 is "no tile".
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gid == 0
    }

    /// `true` once the resolver has assigned a tileset and local id.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Index into [`Map::tilesets`](crate::Map::tilesets).
    #[inline]
    pub fn tileset_id(&self) -> Option<usize> {
        self.resolved.map(|r| r.tileset_id)
    }

    /// Offset of the tile inside its tileset's atlas. Negative for gids that
    /// fell back to a tileset they are not part of.
    #[inline]
    pub fn local_id(&self) -> Option<i64> {
        self.resolved.map(|r| r.local_id)
    }

    pub(crate) fn clear(&mut self) {
        self.resolved = None;
    }

    pub(crate) fn assign(&mut self, tileset_id: usize, local_id: i64) {
        self.resolved = Some(Resolved {
            tileset_id,
            local_id,
        });
    }
}

/// A grid of tiles, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// Layer id from the document, 0 when absent.
    pub id: i32,
    /// Width and height in tiles.
    pub size: UVec2,
    /// Exactly `size.x * size.y` tiles, or empty when the layer had no CSV data.
    pub data: Vec<Tile>,
}

impl TileLayer {
    /// `false` when the layer's data was missing or not CSV encoded.
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    /// Tile at cell `(x, y)`, `None` out of bounds or when the grid is unset.
    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        let idx = y as usize * self.size.x as usize + x as usize;
        self.data.get(idx)
    }

    /// Tiles with their `(x, y)` cell, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32, &Tile)> + '_ {
        let width = self.size.x.max(1) as usize;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, tile)| ((idx % width) as u32, (idx / width) as u32, tile))
    }
}

/// A positioned entity in an object layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Object {
    /// Object id from the document, 0 when absent.
    pub id: i32,
    /// Set for tile objects, `None` for plain shapes.
    pub gid: Option<u32>,
    /// Top-left corner in pixels.
    pub pos: IVec2,
    /// Width and height in pixels, 0 when absent.
    pub size: UVec2,
}

/// An `<objectgroup>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLayer {
    /// Layer id from the document, 0 when absent.
    pub id: i32,
    /// In document order.
    pub objects: Vec<Object>,
}
