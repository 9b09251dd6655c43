//! File names and locations of the icon assets.

use std::path::{Path, PathBuf};

/// Source SVG file name.
pub const SOURCE_NAME: &str = "appicon.svg";

/// Main raster file name (rendered at [`MAIN_SIZE`]).
pub const MAIN_NAME: &str = "appicon.png";

/// Size of the main raster.
pub const MAIN_SIZE: u32 = 512;

/// Extra rasters rendered directly from the SVG.
pub const EXTRA_SIZES: [u32; 3] = [256, 128, 64];

/// Subdirectory holding the Windows assets.
pub const WINDOWS_DIR: &str = "windows";

/// ICO file name inside [`WINDOWS_DIR`].
pub const ICO_NAME: &str = "icon.ico";

/// Suffix appended to the main raster name for its backup.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Asset directory used when none is given: `build/` next to the crate manifest.
pub fn default_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("build")
}

/// Every path the generator reads or writes, derived from one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLayout {
    dir: PathBuf,
}

impl IconLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        IconLayout { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn source(&self) -> PathBuf {
        self.dir.join(SOURCE_NAME)
    }

    pub fn main_raster(&self) -> PathBuf {
        self.dir.join(MAIN_NAME)
    }

    /// Path of the extra raster for `size`, e.g. `icon_256.png`.
    pub fn sized_raster(&self, size: u32) -> PathBuf {
        self.dir.join(format!("icon_{}.png", size))
    }

    pub fn windows_dir(&self) -> PathBuf {
        self.dir.join(WINDOWS_DIR)
    }

    pub fn ico(&self) -> PathBuf {
        self.windows_dir().join(ICO_NAME)
    }

    pub fn backup(&self) -> PathBuf {
        self.dir.join(format!("{}{}", MAIN_NAME, BACKUP_SUFFIX))
    }

    /// All rasters in generation order, paired with their size.
    pub fn rasters(&self) -> Vec<(PathBuf, u32)> {
        let mut rasters = vec![(self.main_raster(), MAIN_SIZE)];
        rasters.extend(EXTRA_SIZES.iter().map(|&size| (self.sized_raster(size), size)));
        rasters
    }
}

impl Default for IconLayout {
    fn default() -> Self {
        Self::new(default_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_relative_to_dir() {
        let layout = IconLayout::new("/assets");
        assert_eq!(layout.source(), Path::new("/assets/appicon.svg"));
        assert_eq!(layout.main_raster(), Path::new("/assets/appicon.png"));
        assert_eq!(layout.ico(), Path::new("/assets/windows/icon.ico"));
        assert_eq!(layout.backup(), Path::new("/assets/appicon.png.backup"));
    }

    #[test]
    fn sized_raster_encodes_size() {
        let layout = IconLayout::new("/assets");
        assert_eq!(layout.sized_raster(128), Path::new("/assets/icon_128.png"));
    }

    #[test]
    fn rasters_start_with_main() {
        let layout = IconLayout::new("/assets");
        let sizes: Vec<u32> = layout.rasters().into_iter().map(|(_, s)| s).collect();
        assert_eq!(sizes, vec![512, 256, 128, 64]);
    }

    #[test]
    fn default_dir_is_build_under_manifest() {
        assert!(default_dir().ends_with("build"));
    }
}
