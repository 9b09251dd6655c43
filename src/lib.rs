//! Generate application icon assets from a single SVG source.
//!
//! The pipeline renders the SVG to PNG rasters at 512, 256, 128 and 64
//! pixels, packs a Windows ICO with frames from 256 down to 16 pixels, and
//! keeps a one-time backup of the main raster.

pub mod backup;
pub mod capability;
pub mod container;
mod error;
mod generator;
pub mod layout;
pub mod render;

pub use backup::BackupOutcome;
pub use capability::Capabilities;
pub use error::IconError;
pub use generator::{IconGenerator, Outcome, Report};
pub use layout::IconLayout;
