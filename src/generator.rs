//! The end-to-end run: SVG to PNG rasters, ICO, then backup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::{self, BackupOutcome};
use crate::capability::{self, Capabilities};
use crate::container;
use crate::error::IconError;
use crate::layout::IconLayout;
use crate::render;

/// What a generator run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every asset was written.
    Generated(Report),
    /// The source SVG was not found; nothing was written.
    MissingSource(PathBuf),
    /// Rendering backends are not compiled in; nothing was written.
    MissingCapabilities(Vec<&'static str>),
}

/// Files produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// PNG rasters with their edge length, main raster first.
    pub rasters: Vec<(PathBuf, u32)>,
    pub ico: PathBuf,
    pub backup: BackupOutcome,
}

impl Report {
    /// Print the list of generated files.
    pub fn print_summary(&self) {
        println!("\nIcon generation complete!");
        println!("\nGenerated files:");
        for (path, _) in &self.rasters {
            println!("   - {}", path.display());
        }
        println!("   - {}", self.ico.display());
        println!("\nRebuild the application to pick up the new icon.");
    }
}

/// Runs the SVG -> PNG -> ICO pipeline over one asset directory.
#[derive(Debug, Clone)]
pub struct IconGenerator {
    layout: IconLayout,
    capabilities: Capabilities,
}

impl IconGenerator {
    /// Create a generator for `layout` using the capabilities of this build.
    pub fn new(layout: IconLayout) -> Self {
        Self::with_capabilities(layout, Capabilities::detect())
    }

    pub fn with_capabilities(layout: IconLayout, capabilities: Capabilities) -> Self {
        IconGenerator {
            layout,
            capabilities,
        }
    }

    pub fn layout(&self) -> &IconLayout {
        &self.layout
    }

    /// Generate every asset.
    ///
    /// Missing capabilities and a missing source SVG are reported through
    /// [`Outcome`] before anything touches the filesystem. Any other failure
    /// is returned as an error, possibly after earlier assets were written.
    pub fn run(&self) -> Result<Outcome, IconError> {
        // Step 1: Capability probe
        if !self.capabilities.is_complete() {
            let missing = self.capabilities.missing();
            tracing::warn!(event = "capabilities_missing", missing = ?missing);
            capability::print_guidance(&missing);
            return Ok(Outcome::MissingCapabilities(missing));
        }

        // Step 2: Locate the source
        let source = self.layout.source();
        if !source.exists() {
            eprintln!("Error: cannot find {}", source.display());
            return Ok(Outcome::MissingSource(source));
        }

        tracing::info!(event = "generate_start", dir = %self.layout.dir().display());
        println!("Generating icon files...\n");

        // Step 3: Rasters, each rendered straight from the SVG
        let rasters = self.layout.rasters();
        for (path, size) in &rasters {
            render::rasterize(&source, path, *size)?;
        }

        // Step 4: Windows ICO from the main raster
        let windows_dir = self.layout.windows_dir();
        ensure_dir(&windows_dir)?;

        println!("\nGenerating Windows ICO file...");
        let main_raster = self.layout.main_raster();
        let ico = self.layout.ico();
        container::build_icon_container(&main_raster, &ico)?;

        // Step 5: One-time backup of the main raster
        let backup = backup::backup_once(&main_raster, &self.layout.backup())?;
        if let BackupOutcome::Created(path) = &backup {
            println!("Backed up original icon: {}", path.display());
        }

        let report = Report {
            rasters,
            ico,
            backup,
        };
        report.print_summary();

        Ok(Outcome::Generated(report))
    }
}

fn ensure_dir(path: &Path) -> Result<(), IconError> {
    fs::create_dir_all(path).map_err(|e| IconError::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}
