use crate::TileGrid;
use image::DynamicImage;
use log::info;
use std::path::Path;
use thiserror::Error;

/// Errors writing training tiles to disk.
#[derive(Debug, Error)]
pub enum TileExportError {
    #[error("failed to create the training directory: {0}")]
    CreateDirectory(#[from] std::io::Error),
    #[error("failed to encode a tile image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Crops every tile of the grid out of the map image and writes it into
/// `directory` as a PNG named by the tile's identifier.
///
/// A scene-retrieval engine trained on this directory will key its
/// database entries by these file names, which is what lets query results
/// be decoded back into map tiles.
pub fn export_training_tiles(
    map: &DynamicImage,
    grid: &TileGrid,
    directory: &Path,
) -> Result<(), TileExportError> {
    std::fs::create_dir_all(directory)?;

    let size = grid.tile_size();
    let mut written = 0usize;
    for tile in grid.tiles() {
        let view = map.crop_imm(tile.start().x as u32, tile.start().y as u32, size, size);
        let path = directory.join(format!("{}.png", tile.identifier()));
        view.save(&path)?;
        written += 1;
    }

    info!("wrote {} training tiles to {}", written, directory.display());
    Ok(())
}
