use std::path::{Path, PathBuf};

use macroquad::math::uvec2;
use roxmltree::{Document, Node};

use super::attrs::{child, int_or_zero};
use crate::error::MapError;
use crate::tileset::TileSet;

/// Loads the external tileset `source` (relative to `base_dir`) that owns
/// gids starting at `first_gid`.
///
/// Every call reads and parses the file again; nothing is cached.
pub fn load_tileset(first_gid: u32, source: &str, base_dir: &Path) -> Result<TileSet, MapError> {
    let ts_path = base_dir.join(source);
    let txt = std::fs::read_to_string(&ts_path).map_err(|source| MapError::Io {
        path: ts_path.clone(),
        source,
    })?;
    let doc = Document::parse(&txt).map_err(|source| MapError::Xml {
        path: ts_path.clone(),
        source,
    })?;

    let root = doc.root_element();
    if !root.has_tag_name("tileset") {
        return Err(MapError::UnexpectedRoot {
            path: ts_path,
            expected: "tileset",
            found: root.tag_name().name().to_owned(),
        });
    }

    let tileset = tileset_from_node(root, first_gid, Some(source.to_owned()), ts_path, base_dir)?;
    log::debug!(
        "Loaded tileset {} (first gid {}, {} tiles, {} columns)",
        source,
        tileset.first_gid,
        tileset.tile_count,
        tileset.columns
    );
    Ok(tileset)
}

/// Reads a `<tileset>` element, either the root of a .tsx document or one
/// embedded in a map.
pub(crate) fn tileset_from_node(
    node: Node,
    first_gid: u32,
    source: Option<String>,
    source_path: PathBuf,
    base_dir: &Path,
) -> Result<TileSet, MapError> {
    let image_source = child(node, "image")
        .and_then(|image| image.attribute("source"))
        .map(|image| base_dir.join(image));

    Ok(TileSet {
        first_gid,
        source,
        source_path,
        image_source,
        tile_size: uvec2(
            int_or_zero(node, "tilewidth")?,
            int_or_zero(node, "tileheight")?,
        ),
        tile_count: int_or_zero(node, "tilecount")?,
        columns: int_or_zero(node, "columns")?,
    })
}
