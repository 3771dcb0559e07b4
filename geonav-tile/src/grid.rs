use geonav_core::PixelPoint;
use image::GenericImageView;
use thiserror::Error;

/// Identifier prefix shared by every tile.
const TILE_PREFIX: &str = "tile";

/// A malformed tile identifier. No fallback tile is ever guessed from a
/// bad identifier; the error is surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileParseError {
    #[error("identifier `{0}` does not have the form tile_<row>-<col>_<x0>-<y0>-<x1>-<y1>")]
    MalformedIdentifier(String),
    #[error("identifier contains a non-numeric field: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),
}

/// Errors building a tile grid from map dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileGridError {
    #[error("tile count along the minimum dimension must be nonzero")]
    ZeroGranularity,
    #[error("a {width}x{height} map cannot fit {tiles} tiles along its minimum dimension")]
    MapTooSmall { width: u32, height: u32, tiles: u32 },
}

/// One square sub-region of the map image, identified by its grid row and
/// column and by its pixel bounding box. Tiles are created by
/// [`TileGrid::from_dimensions`] and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    row: u32,
    col: u32,
    start_x: u32,
    start_y: u32,
    end_x: u32,
    end_y: u32,
}

impl Tile {
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    /// Top-left corner of the tile's pixel bounding box.
    pub fn start(&self) -> PixelPoint {
        PixelPoint::new(self.start_x as f64, self.start_y as f64)
    }

    /// Bottom-right corner of the tile's pixel bounding box.
    pub fn end(&self) -> PixelPoint {
        PixelPoint::new(self.end_x as f64, self.end_y as f64)
    }

    /// Center of the tile's pixel bounding box.
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            (self.start_x + self.end_x) as f64 / 2.0,
            (self.start_y + self.end_y) as f64 / 2.0,
        )
    }

    /// Encodes the tile's full identity into its identifier:
    /// `tile_<row>-<col>_<x0>-<y0>-<x1>-<y1>`. The encoding is the exact
    /// inverse of [`Tile::from_identifier`].
    pub fn identifier(&self) -> String {
        format!(
            "{}_{}-{}_{}-{}-{}-{}",
            TILE_PREFIX, self.row, self.col, self.start_x, self.start_y, self.end_x, self.end_y
        )
    }

    /// Decodes an identifier produced by [`Tile::identifier`].
    ///
    /// Retrieval engines key their databases by training-image path, so a
    /// leading directory and a trailing file extension around the
    /// identifier are accepted and ignored.
    pub fn from_identifier(id: &str) -> Result<Tile, TileParseError> {
        let malformed = || TileParseError::MalformedIdentifier(id.to_string());

        let name = id.rsplit(['/', '\\']).next().ok_or_else(malformed)?;
        let stem = name.split('.').next().ok_or_else(malformed)?;

        let mut sections = stem.split('_');
        let (prefix, row_col, bounds) = match (
            sections.next(),
            sections.next(),
            sections.next(),
            sections.next(),
        ) {
            (Some(prefix), Some(row_col), Some(bounds), None) => (prefix, row_col, bounds),
            _ => return Err(malformed()),
        };
        if prefix != TILE_PREFIX {
            return Err(malformed());
        }

        let row_col = parse_fields::<2>(row_col).ok_or_else(malformed)??;
        let bounds = parse_fields::<4>(bounds).ok_or_else(malformed)??;

        Ok(Tile {
            row: row_col[0],
            col: row_col[1],
            start_x: bounds[0],
            start_y: bounds[1],
            end_x: bounds[2],
            end_y: bounds[3],
        })
    }

    /// Whether the point lies within the tile's closed bounding box. The
    /// box corners are normalized first, so they may be given in either
    /// order; points exactly on an edge are contained.
    pub fn contains(&self, point: PixelPoint) -> bool {
        let min_x = self.start_x.min(self.end_x) as f64;
        let max_x = self.start_x.max(self.end_x) as f64;
        let min_y = self.start_y.min(self.end_y) as f64;
        let max_y = self.start_y.max(self.end_y) as f64;

        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    }

    /// Whether the two tiles are the same tile or 8-connected neighbors,
    /// i.e. their grid positions differ by at most one row and at most one
    /// column (Chebyshev distance ≤ 1). Symmetric in its arguments.
    pub fn is_near_or_equal(&self, other: &Tile) -> bool {
        self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

/// Whether the tile named by `id` contains the point. Identifier-level
/// counterpart of [`Tile::contains`] for working directly with retrieval
/// database keys.
pub fn identifier_contains(id: &str, point: PixelPoint) -> Result<bool, TileParseError> {
    Ok(Tile::from_identifier(id)?.contains(point))
}

/// Whether the tiles named by the two identifiers are the same tile or
/// 8-connected neighbors. Identifier-level counterpart of
/// [`Tile::is_near_or_equal`].
pub fn identifiers_near_or_equal(a: &str, b: &str) -> Result<bool, TileParseError> {
    Ok(Tile::from_identifier(a)?.is_near_or_equal(&Tile::from_identifier(b)?))
}

/// Parses `N` dash-separated unsigned fields, e.g. `"3-1"` or
/// `"300-100-400-200"`. Returns `None` on a wrong field count.
fn parse_fields<const N: usize>(section: &str) -> Option<Result<[u32; N], TileParseError>> {
    let mut fields = [0u32; N];
    let mut split = section.split('-');
    for field in &mut fields {
        match split.next()?.parse() {
            Ok(value) => *field = value,
            Err(e) => return Some(Err(e.into())),
        }
    }
    if split.next().is_some() {
        return None;
    }
    Some(Ok(fields))
}

/// A fixed grid partition of a map image into square tiles, built once per
/// (map, granularity) pair and never mutated at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    rows: u32,
    cols: u32,
    tile_size: u32,
}

impl TileGrid {
    /// Partitions a map of the given pixel dimensions into square tiles.
    ///
    /// The tile size is `min(width, height) / tiles_along_min_dimension`;
    /// the grid then holds `floor(width / size)` columns by
    /// `floor(height / size)` rows of tiles starting at the top-left
    /// corner. Pixels beyond the last whole tile in either direction are
    /// not covered.
    pub fn from_dimensions(
        width: u32,
        height: u32,
        tiles_along_min_dimension: u32,
    ) -> Result<Self, TileGridError> {
        if tiles_along_min_dimension == 0 {
            return Err(TileGridError::ZeroGranularity);
        }
        let tile_size = width.min(height) / tiles_along_min_dimension;
        if tile_size == 0 {
            return Err(TileGridError::MapTooSmall {
                width,
                height,
                tiles: tiles_along_min_dimension,
            });
        }

        let cols = width / tile_size;
        let rows = height / tile_size;
        let mut tiles = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let start_x = col * tile_size;
                let start_y = row * tile_size;
                tiles.push(Tile {
                    row,
                    col,
                    start_x,
                    start_y,
                    end_x: start_x + tile_size,
                    end_y: start_y + tile_size,
                });
            }
        }

        Ok(Self {
            tiles,
            rows,
            cols,
            tile_size,
        })
    }

    /// Partitions a loaded map image. See [`TileGrid::from_dimensions`].
    pub fn from_image(
        map: &image::DynamicImage,
        tiles_along_min_dimension: u32,
    ) -> Result<Self, TileGridError> {
        let (width, height) = map.dimensions();
        Self::from_dimensions(width, height, tiles_along_min_dimension)
    }

    /// Looks up the tile named by an identifier. Returns `None` when the
    /// identifier decodes to a tile that does not belong to this grid
    /// (for example, one built at a different granularity).
    pub fn get(&self, id: &str) -> Result<Option<&Tile>, TileParseError> {
        let decoded = Tile::from_identifier(id)?;
        if decoded.row >= self.rows || decoded.col >= self.cols {
            return Ok(None);
        }
        let tile = &self.tiles[(decoded.row * self.cols + decoded.col) as usize];
        Ok((*tile == decoded).then_some(tile))
    }

    /// The first tile whose bounding box contains the point, if the point
    /// lies on the gridded portion of the map. Tiles sharing an edge both
    /// contain points exactly on it; the lower row/column wins.
    pub fn tile_containing(&self, point: PixelPoint) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.contains(point))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Identifiers of every tile in the grid, in row-major order.
    pub fn identifiers(&self) -> impl Iterator<Item = String> + '_ {
        self.tiles.iter().map(Tile::identifier)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Side length of every tile, in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}
