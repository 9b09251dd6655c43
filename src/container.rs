//! Windows ICO packaging: one icon container holding several frame sizes.

use std::path::Path;

use crate::error::IconError;

/// Frame sizes embedded in the ICO, largest first.
pub const ICO_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

/// Build a multi-size ICO at `dest` from the raster at `source`.
///
/// Each frame is a Lanczos3 resample of the source, so the source should
/// be at least as large as the biggest frame.
#[cfg(feature = "ico")]
pub fn build_icon_container(source: &Path, dest: &Path) -> Result<(), IconError> {
    use std::fs::File;
    use std::io::BufWriter;

    let img = image::open(source).map_err(|e| IconError::OpenRaster {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);

    for size in ICO_SIZES {
        let resized = img.resize_exact(size, size, image::imageops::FilterType::Lanczos3);
        let rgba = resized.to_rgba8();
        let icon_image = ico::IconImage::from_rgba_data(size, size, rgba.into_raw());
        let entry = ico::IconDirEntry::encode(&icon_image).map_err(|e| IconError::Encode {
            path: dest.to_path_buf(),
            reason: format!("frame {}x{}: {}", size, size, e),
        })?;
        icon_dir.add_entry(entry);
        tracing::debug!(event = "ico_frame", size = size);
    }

    let file = File::create(dest).map_err(|e| IconError::Encode {
        path: dest.to_path_buf(),
        reason: e.to_string(),
    })?;
    icon_dir
        .write(BufWriter::new(file))
        .map_err(|e| IconError::Encode {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        })?;

    println!("Generated {} ({} sizes)", dest.display(), ICO_SIZES.len());
    Ok(())
}

#[cfg(not(feature = "ico"))]
pub fn build_icon_container(_source: &Path, _dest: &Path) -> Result<(), IconError> {
    Err(IconError::MissingCapability(crate::capability::ICO))
}
