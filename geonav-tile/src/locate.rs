use crate::{Tile, TileGrid, TileParseError};
use float_ord::FloatOrd;
use geonav_core::{PixelPoint, SceneRetrieval};
use log::debug;

/// A relocalization result: the map tile the query frame was matched to,
/// with the retrieval engine's error score for the match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMatch {
    pub tile: Tile,
    pub error: f64,
}

/// Relocalizes a frame on the map near a previously known position.
///
/// The tile containing `last_known` anchors the search; the retrieval
/// engine is then queried with a filter that admits only that tile and its
/// 8-connected neighbors, and the lowest-error candidate is decoded back
/// into its map tile. Restricting candidates this way improves precision
/// and query time over searching the entire tile database.
///
/// Returns `Ok(None)` when the engine yields no candidate inside the
/// neighborhood, or when `last_known` lies off the gridded map; neither
/// case guesses a tile. Candidate identifiers that fail to decode surface
/// as a [`TileParseError`], since they indicate a database that does not
/// belong to this grid.
pub fn locate_near<F, R>(
    engine: &R,
    frame: &F,
    grid: &TileGrid,
    last_known: PixelPoint,
    limit: usize,
) -> Result<Option<TileMatch>, TileParseError>
where
    R: SceneRetrieval<F>,
{
    let Some(anchor) = grid.tile_containing(last_known).copied() else {
        debug!(
            "last known position ({}, {}) is off the gridded map",
            last_known.x, last_known.y
        );
        return Ok(None);
    };

    let filter = |id: &str| {
        Tile::from_identifier(id)
            .map(|tile| anchor.is_near_or_equal(&tile))
            .unwrap_or(false)
    };
    let candidates = engine.query(frame, &filter, limit);

    let Some(best) = candidates.into_iter().min_by_key(|m| FloatOrd(m.error)) else {
        debug!(
            "no retrieval candidate near tile {}-{}",
            anchor.row(),
            anchor.col()
        );
        return Ok(None);
    };

    let tile = Tile::from_identifier(&best.id)?;
    Ok(Some(TileMatch {
        tile,
        error: best.error,
    }))
}
