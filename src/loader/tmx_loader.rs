// The parse phase: .tmx text -> Map with every tile still unresolved.
use std::path::{Path, PathBuf};

use macroquad::math::{ivec2, uvec2};
use roxmltree::{Document, Node};

use super::attrs::{child, int_or_zero, opt_int};
use super::tsx_loader::{load_tileset, tileset_from_node};
use crate::config::LoadOptions;
use crate::error::MapError;
use crate::layer::{Object, ObjectLayer, Tile, TileLayer};
use crate::map::Map;
use crate::tileset::TileSet;

/// Kinds of `<map>` children the loader understands.
#[derive(Debug, Clone, Copy)]
pub(crate) enum MapElement<'a, 'input> {
    TileLayer(Node<'a, 'input>),
    ObjectGroup(Node<'a, 'input>),
    Tileset(Node<'a, 'input>),
    /// Text, comments and tags we don't read.
    Ignored,
}

impl<'a, 'input> MapElement<'a, 'input> {
    pub(crate) fn classify(node: Node<'a, 'input>) -> Self {
        if !node.is_element() {
            return MapElement::Ignored;
        }
        match node.tag_name().name() {
            "layer" => MapElement::TileLayer(node),
            "objectgroup" => MapElement::ObjectGroup(node),
            "tileset" => MapElement::Tileset(node),
            _ => MapElement::Ignored,
        }
    }
}

/// Parses a map document. `origin` names the document in errors; tileset and
/// image references resolve against `base_dir`.
pub fn parse_map(text: &str, origin: &Path, base_dir: &Path) -> Result<Map, MapError> {
    let doc = Document::parse(text).map_err(|source| MapError::Xml {
        path: origin.to_path_buf(),
        source,
    })?;

    let root = doc.root_element();
    if !root.has_tag_name("map") {
        return Err(MapError::UnexpectedRoot {
            path: origin.to_path_buf(),
            expected: "map",
            found: root.tag_name().name().to_owned(),
        });
    }

    let mut map = Map {
        size: uvec2(int_or_zero(root, "width")?, int_or_zero(root, "height")?),
        tile_size: uvec2(
            int_or_zero(root, "tilewidth")?,
            int_or_zero(root, "tileheight")?,
        ),
        tile_layers: Vec::new(),
        object_layers: Vec::new(),
        tilesets: Vec::new(),
    };

    for node in root.children() {
        match MapElement::classify(node) {
            MapElement::TileLayer(node) => map.tile_layers.push(parse_tile_layer(node)?),
            MapElement::ObjectGroup(node) => map.object_layers.push(parse_object_layer(node)?),
            MapElement::Tileset(node) => {
                map.tilesets.push(parse_tileset_ref(node, origin, base_dir)?)
            }
            MapElement::Ignored => {}
        }
    }

    Ok(map)
}

/// Reads a map file and runs [`parse_map`] on it.
pub(crate) fn parse_map_file(path: &Path, opts: &LoadOptions) -> Result<Map, MapError> {
    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&txt, path, &opts.base_dir_for(path))
}

fn parse_tileset_ref(node: Node, origin: &Path, base_dir: &Path) -> Result<TileSet, MapError> {
    let first_gid = int_or_zero(node, "firstgid")?;
    match node.attribute("source") {
        Some(source) => load_tileset(first_gid, source, base_dir),
        None => {
            log::debug!("Embedded tileset at first gid {first_gid}");
            tileset_from_node(node, first_gid, None, PathBuf::from(origin), base_dir)
        }
    }
}

pub(crate) fn parse_tile_layer(node: Node) -> Result<TileLayer, MapError> {
    let id = int_or_zero(node, "id")?;
    let size = uvec2(int_or_zero(node, "width")?, int_or_zero(node, "height")?);

    let data = match child(node, "data") {
        Some(data) if is_csv(data) => {
            let tiles = parse_csv(id, data.text().unwrap_or(""))?;
            let expected = size.x as usize * size.y as usize;
            if tiles.len() != expected {
                return Err(MapError::InvalidLayerSize {
                    layer: id,
                    width: size.x,
                    height: size.y,
                    expected,
                    actual: tiles.len(),
                });
            }
            tiles
        }
        Some(data) => {
            log::warn!(
                "Tile layer {id}: unsupported encoding {:?}, leaving it empty",
                data.attribute("encoding").unwrap_or("xml")
            );
            Vec::new()
        }
        None => {
            log::warn!("Tile layer {id} has no <data>, leaving it empty");
            Vec::new()
        }
    };

    log::debug!("Parsed tile layer {id} ({}x{}, {} tiles)", size.x, size.y, data.len());
    Ok(TileLayer { id, size, data })
}

fn is_csv(data: Node) -> bool {
    data.attribute("encoding")
        .is_some_and(|enc| enc.eq_ignore_ascii_case("csv"))
}

/// Splits CSV tile data into unresolved tiles, in document order.
fn parse_csv(layer: i32, text: &str) -> Result<Vec<Tile>, MapError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse()
                .map(Tile::new)
                .map_err(|source| MapError::InvalidTileGid {
                    layer,
                    token: token.to_owned(),
                    source,
                })
        })
        .collect()
}

pub(crate) fn parse_object_layer(node: Node) -> Result<ObjectLayer, MapError> {
    let id = int_or_zero(node, "id")?;
    let objects = node
        .children()
        .filter(|c| c.is_element() && c.has_tag_name("object"))
        .map(parse_object)
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Parsed object layer {id} ({} objects)", objects.len());
    Ok(ObjectLayer { id, objects })
}

fn parse_object(node: Node) -> Result<Object, MapError> {
    Ok(Object {
        id: int_or_zero(node, "id")?,
        gid: opt_int(node, "gid")?,
        pos: ivec2(int_or_zero(node, "x")?, int_or_zero(node, "y")?),
        size: uvec2(int_or_zero(node, "width")?, int_or_zero(node, "height")?),
    })
}
