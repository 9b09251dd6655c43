//! Error type shared by every step of icon generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for icon generation.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("capability '{0}' is not compiled in")]
    MissingCapability(&'static str),

    #[error("invalid icon size {0}: must be positive")]
    InvalidSize(u32),

    #[error("failed to read '{}': {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },

    #[error("failed to parse SVG '{}': {reason}", path.display())]
    ParseSvg { path: PathBuf, reason: String },

    #[error("failed to allocate a {size}x{size} canvas for '{}'", path.display())]
    Render { path: PathBuf, size: u32 },

    #[error("failed to encode '{}': {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("failed to open raster '{}': {reason}", path.display())]
    OpenRaster { path: PathBuf, reason: String },

    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("backup failed for '{}': {source}", path.display())]
    Backup { path: PathBuf, source: io::Error },
}
