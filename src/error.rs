use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can make a map load fail.
///
/// Any of these aborts the whole load; a partially built [`Map`](crate::Map)
/// is never handed back.
#[derive(Debug, Error)]
pub enum MapError {
    /// A map, tileset or options file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML in {}: {source}", path.display())]
    Xml {
        /// Document that failed to parse.
        path: PathBuf,
        /// Parser error, with position.
        #[source]
        source: roxmltree::Error,
    },

    /// The document parsed, but its root is not the element we expected.
    #[error("expected <{expected}> as root of {}, found <{found}>", path.display())]
    UnexpectedRoot {
        /// Offending document.
        path: PathBuf,
        /// Root tag the loader wanted.
        expected: &'static str,
        /// Root tag the document has.
        found: String,
    },

    /// An attribute that must hold an integer holds something else.
    #[error("attribute `{attribute}` on <{element}> is not an integer: {value:?}")]
    InvalidAttribute {
        /// Tag of the element carrying the attribute.
        element: String,
        /// Attribute name.
        attribute: &'static str,
        /// Raw attribute text.
        value: String,
        /// Why the text is not an integer.
        #[source]
        source: ParseIntError,
    },

    /// A CSV token in a tile layer is not a valid gid.
    #[error("tile layer {layer}: invalid gid token {token:?}")]
    InvalidTileGid {
        /// Id of the tile layer.
        layer: i32,
        /// Trimmed CSV token.
        token: String,
        /// Why the token is not a gid.
        #[source]
        source: ParseIntError,
    },

    /// A tile layer's CSV data does not hold exactly `width * height` gids.
    #[error(
        "tile layer {layer}: expected {expected} tiles for {width}x{height}, CSV data holds {actual}"
    )]
    InvalidLayerSize {
        /// Id of the tile layer.
        layer: i32,
        /// Layer width in tiles.
        width: u32,
        /// Layer height in tiles.
        height: u32,
        /// `width * height`.
        expected: usize,
        /// Number of CSV tokens found.
        actual: usize,
    },

    /// Only raised under [`GidPolicy::Strict`](crate::GidPolicy::Strict).
    #[error("tile layer {layer}: gid {gid} at index {index} is not owned by any tileset")]
    UnmatchedGid {
        /// Id of the tile layer.
        layer: i32,
        /// Row-major index of the tile in the layer.
        index: usize,
        /// The unowned gid.
        gid: u32,
    },

    /// A [`LoadOptions`](crate::LoadOptions) file could not be deserialized.
    #[error("invalid load options in {}: {source}", path.display())]
    Config {
        /// Options file, `<inline>` for a string.
        path: PathBuf,
        /// Deserialization error.
        #[source]
        source: serde_json::Error,
    },
}
