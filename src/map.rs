use std::path::{Path, PathBuf};

use macroquad::math::{vec2, Rect, UVec2, Vec2};

use crate::config::LoadOptions;
use crate::error::MapError;
use crate::layer::{ObjectLayer, Tile, TileLayer};
use crate::loader::tmx_loader::{parse_map, parse_map_file};
use crate::resolve::resolve_gids;
use crate::tileset::TileSet;

/// A fully loaded map. Owns all of its layers and tilesets.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    /// Width and height in tiles.
    pub size: UVec2,
    /// Tile width and height in pixels.
    pub tile_size: UVec2,
    /// Tile layers in document order.
    pub tile_layers: Vec<TileLayer>,
    /// Object layers in document order.
    pub object_layers: Vec<ObjectLayer>,
    /// In declaration order, which the gid lookup relies on.
    pub tilesets: Vec<TileSet>,
}

impl Map {
    /// Loads a .tmx file and every tileset it references, then resolves gids.
    /// References are resolved against the map's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Like [`Map::load`], with explicit [`LoadOptions`].
    pub fn load_with(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Self, MapError> {
        let path = path.as_ref();
        log::info!("Loading map {}", path.display());

        let mut map = parse_map_file(path, opts)?;
        resolve_gids(&mut map, opts.gid_policy)?;

        log::info!(
            "Loaded map {} ({}x{}, {} tile layers, {} object layers, {} tilesets)",
            path.display(),
            map.size.x,
            map.size.y,
            map.tile_layers.len(),
            map.object_layers.len(),
            map.tilesets.len()
        );
        Ok(map)
    }

    /// Loads a map document held in memory. External tilesets resolve against
    /// `opts.base_dir`, or the working directory when unset.
    pub fn from_str(text: &str, opts: &LoadOptions) -> Result<Self, MapError> {
        let base_dir = opts.base_dir.clone().unwrap_or_else(|| PathBuf::from("./"));
        let mut map = parse_map(text, Path::new("<inline>"), &base_dir)?;
        resolve_gids(&mut map, opts.gid_policy)?;
        Ok(map)
    }

    /// Atlas image paths in tileset order, for handing to texture loading.
    pub fn image_sources(&self) -> impl Iterator<Item = &Path> + '_ {
        self.tilesets
            .iter()
            .filter_map(|ts| ts.image_source.as_deref())
    }

    /// Owning tileset and local id for a resolved, non-empty tile.
    #[inline]
    pub fn ts_for_tile(&self, tile: &Tile) -> Option<(&TileSet, i64)> {
        if tile.is_empty() {
            return None;
        }
        let ts = self.tilesets.get(tile.tileset_id()?)?;
        Some((ts, tile.local_id()?))
    }

    /// Atlas source rectangle for the tile at `(x, y)` of a tile layer.
    pub fn tile_source(&self, layer: usize, x: u32, y: u32) -> Option<(&TileSet, Rect)> {
        let tile = self.tile_layers.get(layer)?.get(x, y)?;
        let (ts, local) = self.ts_for_tile(tile)?;
        Some((ts, ts.tile_rect(local)?))
    }

    /// Top-left pixel position of cell `(x, y)`.
    #[inline]
    pub fn tile_world_pos(&self, x: u32, y: u32) -> Vec2 {
        vec2(
            x as f32 * self.tile_size.x as f32,
            y as f32 * self.tile_size.y as f32,
        )
    }
}
