//! Favicon builder: packs three downscaled renditions of the favicon
//! master (16/32/48 bounding boxes) into a single multi-resolution
//! `favicon.ico`, using the `ico` crate for the container format.
//!
//! Each rendition is derived from a fresh copy of the original decode so
//! resizes never compound, and none of them upscales a small master.

use crate::config::FAVICON_ICO_SIZES;
use crate::error::AssetError;
use crate::image_processor::fit_within;
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Build `favicon.ico` in `output_dir` from a single master image.
///
/// Returns the path of the written file.
pub async fn create_favicon(input: &Path, output_dir: &Path) -> Result<PathBuf, AssetError> {
    let bytes = fs::read(input).await?;
    let original = image::load_from_memory(&bytes)?;

    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for size in FAVICON_ICO_SIZES {
        let scaled = fit_within(&original, (size, size));
        debug!(
            "Favicon entry {}x{} from {}",
            scaled.width(),
            scaled.height(),
            input.display()
        );
        let rgba = scaled.to_rgba8();
        let icon = IconImage::from_rgba_data(rgba.width(), rgba.height(), rgba.into_raw());
        icon_dir.add_entry(IconDirEntry::encode(&icon)?);
    }

    let mut encoded = Vec::new();
    icon_dir.write(&mut encoded)?;

    let favicon_path = output_dir.join("favicon.ico");
    fs::write(&favicon_path, encoded).await?;
    Ok(favicon_path)
}
