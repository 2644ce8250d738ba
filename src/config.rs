use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::MapError;

/// What the gid resolver does with tiles no tileset claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GidPolicy {
    /// Every tile gets an index: unmatched gids (including 0) fall back to
    /// tileset 0 with `local_id = gid - tilesets[0].first_gid`.
    #[default]
    Fallback,
    /// Gid 0 stays an explicit empty tile and any other unmatched gid fails
    /// the load.
    Strict,
}

/// Knobs for [`Map::load_with`](crate::Map::load_with).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Directory that tileset and image references are resolved against.
    /// Defaults to the map document's parent directory.
    pub base_dir: Option<PathBuf>,
    /// How the resolver treats gids outside every tileset.
    pub gid_policy: GidPolicy,
}

impl LoadOptions {
    /// Resolve references against `dir` instead of the map's directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Use `policy` for the resolve pass.
    pub fn with_gid_policy(mut self, policy: GidPolicy) -> Self {
        self.gid_policy = policy;
        self
    }

    /// Reads options from JSON; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|source| MapError::Config {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Like [`LoadOptions::from_json_str`], reading the JSON from `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&txt).map_err(|source| MapError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Base directory for a map living at `map_path`.
    pub(crate) fn base_dir_for(&self, map_path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.clone(),
            None => map_path
                .parent()
                .map(|d| d.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./")),
        }
    }
}
