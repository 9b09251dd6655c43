//! Startup probe for the optional rendering backends.

/// Feature name for SVG rasterization.
pub const SVG: &str = "svg";

/// Feature name for raster resampling and ICO encoding.
pub const ICO: &str = "ico";

/// Which rendering backends this build carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub svg: bool,
    pub ico: bool,
}

impl Capabilities {
    /// Report the capabilities compiled into this binary.
    pub fn detect() -> Self {
        Capabilities {
            svg: cfg!(feature = "svg"),
            ico: cfg!(feature = "ico"),
        }
    }

    /// Names of the features that are not available.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.svg {
            missing.push(SVG);
        }
        if !self.ico {
            missing.push(ICO);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.svg && self.ico
    }
}

/// Print installation guidance for the given missing features.
pub fn print_guidance(missing: &[&str]) {
    println!("Missing icon backends: {}", missing.join(", "));
    println!("Reinstall with the required features enabled:");
    println!("   cargo install appicon-gen --features {}", missing.join(","));
    println!();
}
