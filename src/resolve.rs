use crate::config::GidPolicy;
use crate::error::MapError;
use crate::map::Map;
use crate::tileset::TileSet;

/// Index of the first tileset, in declaration order, whose range holds `gid`.
pub fn tileset_for_gid(tilesets: &[TileSet], gid: u32) -> Option<usize> {
    tilesets.iter().position(|ts| ts.contains(gid))
}

/// Second load pass: assigns a tileset index and local id to every tile of
/// every tile layer.
///
/// Must run after all tilesets are known, since a tile may reference a
/// tileset declared further down the document. With [`GidPolicy::Fallback`]
/// this never fails. Every pass first clears earlier results, so the map can
/// be resolved again, e.g. with `Fallback` after a `Strict` pass failed.
pub fn resolve_gids(map: &mut Map, policy: GidPolicy) -> Result<(), MapError> {
    let tilesets = &map.tilesets;
    let tile_layers = &mut map.tile_layers;

    for tile in tile_layers.iter_mut().flat_map(|l| l.data.iter_mut()) {
        tile.clear();
    }

    if tilesets.is_empty() {
        if policy == GidPolicy::Strict {
            for layer in tile_layers.iter() {
                let stray = layer.data.iter().enumerate().find(|(_, t)| !t.is_empty());
                if let Some((index, tile)) = stray {
                    return Err(MapError::UnmatchedGid {
                        layer: layer.id,
                        index,
                        gid: tile.gid(),
                    });
                }
            }
        }
        if tile_layers.iter().any(|l| l.has_data()) {
            log::warn!("Map has no tilesets, tiles stay unresolved");
        }
        return Ok(());
    }

    let mut fallbacks = 0usize;
    for layer in tile_layers.iter_mut() {
        for (index, tile) in layer.data.iter_mut().enumerate() {
            let tileset_id = match tileset_for_gid(tilesets, tile.gid()) {
                Some(id) => id,
                None => match policy {
                    GidPolicy::Fallback => {
                        if !tile.is_empty() {
                            fallbacks += 1;
                        }
                        0
                    }
                    GidPolicy::Strict if tile.is_empty() => continue,
                    GidPolicy::Strict => {
                        return Err(MapError::UnmatchedGid {
                            layer: layer.id,
                            index,
                            gid: tile.gid(),
                        });
                    }
                },
            };
            let local_id = i64::from(tile.gid()) - i64::from(tilesets[tileset_id].first_gid);
            tile.assign(tileset_id, local_id);
        }
    }

    if fallbacks > 0 {
        log::warn!("{fallbacks} tile(s) reference gids outside every tileset, assigned to tileset 0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Tile, TileLayer};
    use macroquad::math::uvec2;
    use std::path::PathBuf;

    fn tileset(first_gid: u32, tile_count: u32) -> TileSet {
        TileSet {
            first_gid,
            source: None,
            source_path: PathBuf::from("test.tmx"),
            image_source: None,
            tile_size: uvec2(8, 8),
            tile_count,
            columns: 2,
        }
    }

    fn map(gids: &[u32], tilesets: Vec<TileSet>) -> Map {
        Map {
            size: uvec2(gids.len() as u32, 1),
            tile_size: uvec2(8, 8),
            tile_layers: vec![TileLayer {
                id: 1,
                size: uvec2(gids.len() as u32, 1),
                data: gids.iter().copied().map(Tile::new).collect(),
            }],
            object_layers: Vec::new(),
            tilesets,
        }
    }

    fn resolved(map: &Map) -> Vec<(Option<usize>, Option<i64>)> {
        map.tile_layers[0]
            .data
            .iter()
            .map(|t| (t.tileset_id(), t.local_id()))
            .collect()
    }

    #[test]
    fn gids_map_to_owning_tileset() {
        let mut m = map(&[1, 4, 5, 10, 11], vec![tileset(1, 4), tileset(5, 8)]);
        resolve_gids(&mut m, GidPolicy::Fallback).unwrap();
        assert_eq!(
            resolved(&m),
            [
                (Some(0), Some(0)),
                (Some(0), Some(3)),
                (Some(1), Some(0)),
                (Some(1), Some(5)),
                (Some(1), Some(6)),
            ]
        );
    }

    #[test]
    fn zero_gid_falls_back_to_first_tileset() {
        let mut m = map(&[0], vec![tileset(3, 4), tileset(7, 4)]);
        resolve_gids(&mut m, GidPolicy::Fallback).unwrap();
        assert_eq!(resolved(&m), [(Some(0), Some(-3))]);
    }

    #[test]
    fn unmatched_gid_falls_back_to_first_tileset() {
        let mut m = map(&[99], vec![tileset(1, 4)]);
        resolve_gids(&mut m, GidPolicy::Fallback).unwrap();
        assert_eq!(resolved(&m), [(Some(0), Some(98))]);
    }

    #[test]
    fn declaration_order_wins_on_overlap() {
        let mut m = map(&[6], vec![tileset(5, 4), tileset(1, 10)]);
        resolve_gids(&mut m, GidPolicy::Fallback).unwrap();
        assert_eq!(resolved(&m), [(Some(0), Some(1))]);
    }

    #[test]
    fn strict_keeps_empty_tiles_unresolved() {
        let mut m = map(&[0, 2], vec![tileset(1, 4)]);
        resolve_gids(&mut m, GidPolicy::Strict).unwrap();
        assert_eq!(resolved(&m), [(None, None), (Some(0), Some(1))]);
    }

    #[test]
    fn strict_rejects_unmatched_gid() {
        let mut m = map(&[1, 0, 42], vec![tileset(1, 4)]);
        let err = resolve_gids(&mut m, GidPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            MapError::UnmatchedGid { layer: 1, index: 2, gid: 42 }
        ));
    }

    #[test]
    fn no_tilesets_leaves_tiles_unresolved() {
        let mut m = map(&[0, 3], Vec::new());
        resolve_gids(&mut m, GidPolicy::Fallback).unwrap();
        assert_eq!(resolved(&m), [(None, None), (None, None)]);

        let mut m = map(&[0, 3], Vec::new());
        assert!(resolve_gids(&mut m, GidPolicy::Strict).is_err());

        let mut m = map(&[0, 0], Vec::new());
        assert!(resolve_gids(&mut m, GidPolicy::Strict).is_ok());
    }

    #[test]
    fn fallback_after_failed_strict_pass() {
        let mut m = map(&[1, 9], vec![tileset(1, 2)]);
        assert!(resolve_gids(&mut m, GidPolicy::Strict).is_err());

        resolve_gids(&mut m, GidPolicy::Fallback).unwrap();
        assert_eq!(resolved(&m), [(Some(0), Some(0)), (Some(0), Some(8))]);
    }

    #[test]
    fn strict_pass_clears_earlier_fallback_results() {
        let mut m = map(&[0, 2], vec![tileset(1, 4)]);
        resolve_gids(&mut m, GidPolicy::Fallback).unwrap();
        assert_eq!(resolved(&m)[0], (Some(0), Some(-1)));

        resolve_gids(&mut m, GidPolicy::Strict).unwrap();
        assert_eq!(resolved(&m), [(None, None), (Some(0), Some(1))]);
    }

    #[test]
    fn tileset_for_gid_scans_in_order() {
        let sets = [tileset(1, 4), tileset(5, 4)];
        assert_eq!(tileset_for_gid(&sets, 0), None);
        assert_eq!(tileset_for_gid(&sets, 4), Some(0));
        assert_eq!(tileset_for_gid(&sets, 5), Some(1));
        assert_eq!(tileset_for_gid(&sets, 9), None);
    }
}
