//! SVG rasterization.

use std::path::Path;

use crate::error::IconError;

/// Render the SVG at `source` into a `size`x`size` PNG at `dest`.
///
/// The drawing is scaled uniformly to fit and centered, so non-square
/// sources still produce a square raster. An existing `dest` is overwritten.
#[cfg(feature = "svg")]
pub fn rasterize(source: &Path, dest: &Path, size: u32) -> Result<(), IconError> {
    use std::fs;

    if size == 0 {
        return Err(IconError::InvalidSize(size));
    }

    let data = fs::read(source).map_err(|e| IconError::ReadSource {
        path: source.to_path_buf(),
        source: e,
    })?;

    let tree = resvg::usvg::Tree::from_data(&data, &svg_options(source)).map_err(|e| {
        IconError::ParseSvg {
            path: source.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    let pixmap = render_square(&tree, size).ok_or_else(|| IconError::Render {
        path: dest.to_path_buf(),
        size,
    })?;

    pixmap.save_png(dest).map_err(|e| IconError::Encode {
        path: dest.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!(event = "rasterized", dest = %dest.display(), size = size);
    println!("Generated {} ({}x{})", dest.display(), size, size);
    Ok(())
}

#[cfg(not(feature = "svg"))]
pub fn rasterize(_source: &Path, _dest: &Path, _size: u32) -> Result<(), IconError> {
    Err(IconError::MissingCapability(crate::capability::SVG))
}

/// Parse options for `source`: system fonts for `<text>`, and relative
/// `href`s resolved against the SVG's own directory.
#[cfg(feature = "svg")]
fn svg_options(source: &Path) -> resvg::usvg::Options<'static> {
    let mut opt = resvg::usvg::Options::default();
    opt.resources_dir = std::fs::canonicalize(source)
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));
    load_fonts(opt.fontdb_mut());
    tracing::debug!(event = "svg_fonts", faces = opt.fontdb.len());
    opt
}

/// Load system fonts. fontdb maps the generic families to Arial and Times
/// New Roman; when those are absent, fall back to the first installed face.
#[cfg(feature = "svg")]
fn load_fonts(db: &mut resvg::usvg::fontdb::Database) {
    use resvg::usvg::fontdb::{Family, Query};

    db.load_system_fonts();

    let fallback = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());
    let Some(fallback) = fallback else {
        return;
    };

    let resolves = |db: &resvg::usvg::fontdb::Database, family: Family<'_>| {
        db.query(&Query {
            families: &[family],
            ..Query::default()
        })
        .is_some()
    };
    if !resolves(db, Family::SansSerif) {
        db.set_sans_serif_family(fallback.clone());
    }
    if !resolves(db, Family::Serif) {
        db.set_serif_family(fallback);
    }
}

#[cfg(feature = "svg")]
fn render_square(tree: &resvg::usvg::Tree, size: u32) -> Option<resvg::tiny_skia::Pixmap> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;

    let target = size as f32;
    let svg_size = tree.size();
    let scale = (target / svg_size.width()).min(target / svg_size.height());
    let dx = (target - svg_size.width() * scale) / 2.0;
    let dy = (target - svg_size.height() * scale) / 2.0;

    let transform = resvg::tiny_skia::Transform::from_translate(dx, dy).pre_scale(scale, scale);
    resvg::render(tree, transform, &mut pixmap.as_mut());
    Some(pixmap)
}

#[cfg(all(test, feature = "svg"))]
mod tests {
    use super::*;
    use resvg::tiny_skia::Pixmap;
    use std::fs;
    use tempfile::tempdir;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">
  <rect x="10" y="10" width="80" height="80" fill="#3366cc"/>
</svg>"##;

    const WIDE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
  <rect width="200" height="100" fill="#cc3333"/>
</svg>"##;

    #[test]
    fn rasterize_produces_requested_size() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("icon.svg");
        fs::write(&svg, SQUARE_SVG).unwrap();

        for size in [512, 64] {
            let png = dir.path().join(format!("icon_{}.png", size));
            rasterize(&svg, &png, size).unwrap();

            let pixmap = Pixmap::load_png(&png).unwrap();
            assert_eq!(pixmap.width(), size);
            assert_eq!(pixmap.height(), size);
        }
    }

    #[test]
    fn rasterize_draws_content() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("icon.svg");
        let png = dir.path().join("icon.png");
        fs::write(&svg, SQUARE_SVG).unwrap();

        rasterize(&svg, &png, 100).unwrap();

        let pixmap = Pixmap::load_png(&png).unwrap();
        let center = pixmap.pixel(50, 50).unwrap();
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!(center.alpha(), 255);
        assert_eq!(corner.alpha(), 0);
    }

    #[test]
    fn non_square_source_gives_square_raster() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("wide.svg");
        let png = dir.path().join("wide.png");
        fs::write(&svg, WIDE_SVG).unwrap();

        rasterize(&svg, &png, 64).unwrap();

        let pixmap = Pixmap::load_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (64, 64));
        // letterboxed: top row empty, middle row filled
        assert_eq!(pixmap.pixel(32, 0).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(32, 32).unwrap().alpha(), 255);
    }

    fn opaque_pixels(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[test]
    fn rasterize_draws_text_with_system_fonts() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("text.svg");
        let png = dir.path().join("text.png");
        fs::write(
            &svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <text x="5" y="80" font-family="sans-serif" font-size="80">Ag</text>
</svg>"#,
        )
        .unwrap();

        if svg_options(&svg).fontdb.is_empty() {
            eprintln!("no system fonts installed, skipping text rendering check");
            return;
        }

        rasterize(&svg, &png, 100).unwrap();

        let pixmap = Pixmap::load_png(&png).unwrap();
        assert!(opaque_pixels(&pixmap) > 0, "text was not rendered");
    }

    #[test]
    fn generic_sans_serif_resolves_when_fonts_exist() {
        use resvg::usvg::fontdb::{Family, Query};

        let dir = tempdir().unwrap();
        let opt = svg_options(&dir.path().join("icon.svg"));
        if opt.fontdb.is_empty() {
            return;
        }

        let query = Query {
            families: &[Family::SansSerif],
            ..Query::default()
        };
        assert!(opt.fontdb.query(&query).is_some());
    }

    #[test]
    fn relative_image_resolves_next_to_source() {
        let dir = tempdir().unwrap();
        let mut inner = Pixmap::new(10, 10).unwrap();
        inner.fill(resvg::tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        inner.save_png(dir.path().join("inner.png")).unwrap();

        let svg = dir.path().join("with_image.svg");
        let png = dir.path().join("with_image.png");
        fs::write(
            &svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="10" height="10">
  <image href="inner.png" x="0" y="0" width="10" height="10"/>
</svg>"#,
        )
        .unwrap();

        // the test process runs from the crate root, not from `dir`
        assert_ne!(
            std::env::current_dir().unwrap().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );

        rasterize(&svg, &png, 10).unwrap();

        let pixmap = Pixmap::load_png(&png).unwrap();
        assert_eq!(opaque_pixels(&pixmap), 100);
        let center = pixmap.pixel(5, 5).unwrap();
        assert_eq!((center.red(), center.alpha()), (255, 255));
    }

    #[test]
    fn options_resolve_resources_from_source_dir() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("icon.svg");
        fs::write(&svg, SQUARE_SVG).unwrap();

        let opt = svg_options(&svg);

        assert_eq!(opt.resources_dir, Some(dir.path().canonicalize().unwrap()));
    }

    #[test]
    fn rasterize_overwrites_existing_output() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("icon.svg");
        let png = dir.path().join("icon.png");
        fs::write(&svg, SQUARE_SVG).unwrap();
        fs::write(&png, b"stale").unwrap();

        rasterize(&svg, &png, 32).unwrap();

        assert!(Pixmap::load_png(&png).is_ok());
    }

    #[test]
    fn missing_source_errors() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("icon.png");

        let result = rasterize(&dir.path().join("absent.svg"), &png, 64);

        assert!(matches!(result, Err(IconError::ReadSource { .. })));
        assert!(!png.exists());
    }

    #[test]
    fn corrupt_source_errors() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("broken.svg");
        let png = dir.path().join("icon.png");
        fs::write(&svg, "this is not svg").unwrap();

        let result = rasterize(&svg, &png, 64);

        assert!(matches!(result, Err(IconError::ParseSvg { .. })));
        assert!(!png.exists());
    }

    #[test]
    fn zero_size_is_rejected() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("icon.svg");
        fs::write(&svg, SQUARE_SVG).unwrap();

        let result = rasterize(&svg, &dir.path().join("icon.png"), 0);

        assert!(matches!(result, Err(IconError::InvalidSize(0))));
    }
}
