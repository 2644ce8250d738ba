#![warn(missing_docs)]

//! Tiled TMX/TSX loader for Macroquad.
//!
//! Loading is two passes. The parse pass reads the `.tmx` document and every
//! `.tsx` it references into a [`Map`] whose tiles only carry their raw gid.
//! The resolve pass ([`resolve_gids`]) then maps each gid to the tileset that
//! owns it and the tile's index inside that tileset's atlas.
//!
//! ```no_run
//! use macroquad_tmx::Map;
//!
//! let map = Map::load("map/map.tmx")?;
//! for (x, y, tile) in map.tile_layers[0].tiles() {
//!     if let Some((tileset, rect)) = map.tile_source(0, x, y) {
//!         // draw `rect` of `tileset.image_source` at map.tile_world_pos(x, y)
//!         let _ = (tileset, rect, tile);
//!     }
//! }
//! # Ok::<(), macroquad_tmx::MapError>(())
//! ```

mod config;
mod error;
mod layer;
mod loader {
    pub(crate) mod attrs;
    pub mod tmx_loader;
    pub mod tsx_loader;
}
mod map;
mod resolve;
mod tileset;

pub use config::{GidPolicy, LoadOptions};
pub use error::MapError;
pub use layer::{Object, ObjectLayer, Tile, TileLayer};
pub use loader::tmx_loader::parse_map;
pub use loader::tsx_loader::load_tileset;
pub use map::Map;
pub use resolve::{resolve_gids, tileset_for_gid};
pub use tileset::TileSet;
