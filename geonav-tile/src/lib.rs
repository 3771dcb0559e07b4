//! A tile index over a reference map image.
//!
//! A map image is partitioned once into a fixed grid of square tiles. Each
//! tile's grid position and pixel bounding box are encoded losslessly into
//! a textual identifier, which doubles as the database key under which the
//! tile's image is registered with a scene-retrieval engine. At query time
//! the grid answers adjacency and containment questions about identifiers,
//! letting a relocalization query restrict its candidate set to the
//! neighborhood of the last known position instead of searching the whole
//! map.
//!
//! The grid is immutable after construction and safe to query from
//! multiple threads.

mod export;
mod grid;
mod locate;

pub use export::*;
pub use grid::*;
pub use locate::*;
