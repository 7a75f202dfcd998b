use ext_icon_gen::config::{self, IconStyle};
use ext_icon_gen::font_source::{FontSource, DEFAULT_FONT_SCALE};
use ext_icon_gen::icon_gen::{
    ensure_output_dir, icon_path, render_icon, render_icon_png, write_icon,
};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SIZES: [u32; 4] = [16, 32, 48, 128];
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// First installed font from the usual locations, if any
fn find_system_font() -> Option<PathBuf> {
    std::iter::once(config::DEFAULT_FONT_PATH)
        .chain(config::SYSTEM_FONT_PATHS.iter().copied())
        .map(PathBuf::from)
        .find(|path| {
            !matches!(
                FontSource::resolve(Some(path.as_path()), &[]),
                FontSource::NoFont
            )
        })
}

/// Bounding box (min_x, min_y, max_x, max_y) of every non-background pixel
fn mark_bounds(img: &RgbaImage, background: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
    img.enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel != background)
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

#[test]
fn test_no_font_circle_respects_margin() {
    let style = IconStyle::default();

    for size in SIZES {
        let img = render_icon(size, &style, &FontSource::NoFont);
        let margin = size / 4;
        let mid = size / 2;

        assert_eq!(img.dimensions(), (size, size));

        // Corners stay background
        assert_eq!(*img.get_pixel(0, 0), RED);
        assert_eq!(*img.get_pixel(size - 1, size - 1), RED);

        // Filled at the center and up to the margin on each side
        assert_eq!(*img.get_pixel(mid, mid), WHITE);
        assert_eq!(*img.get_pixel(margin, mid), WHITE);
        assert_eq!(*img.get_pixel(size - margin - 1, mid), WHITE);
        assert_eq!(*img.get_pixel(mid, margin), WHITE);

        // Nothing drawn inside the margin
        assert_eq!(*img.get_pixel(margin - 1, mid), RED);
        assert_eq!(*img.get_pixel(size - margin, mid), RED);
        assert_eq!(*img.get_pixel(mid, margin - 1), RED);

        // Round, not square: the inset box corner is outside the circle
        assert_eq!(*img.get_pixel(margin, margin), RED);
    }
}

#[test]
fn test_no_font_circle_is_centered() {
    let img = render_icon(128, &IconStyle::default(), &FontSource::NoFont);

    let (x0, y0, x1, y1) = mark_bounds(&img, RED).expect("Circle should be visible");
    assert_eq!((x0, y0, x1, y1), (32, 32, 95, 95));
}

#[test]
fn test_png_bytes_decode_to_requested_size() {
    for size in SIZES {
        let png = render_icon_png(size, &IconStyle::default(), &FontSource::NoFont)
            .expect("Failed to encode icon");

        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));

        let decoded = image::load_from_memory(&png).expect("Icon should decode as PNG");
        assert_eq!((decoded.width(), decoded.height()), (size, size));
    }
}

#[test]
fn test_rendering_is_repeatable() {
    let style = IconStyle::default();
    let first = render_icon_png(48, &style, &FontSource::NoFont).unwrap();
    let second = render_icon_png(48, &style, &FontSource::NoFont).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_write_icon_overwrites_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let dir = temp_dir.path().join("icons");

    ensure_output_dir(&dir).unwrap();
    // Second call on an existing directory is a no-op
    ensure_output_dir(&dir).unwrap();

    let path = icon_path(&dir, 32);
    assert_eq!(path, dir.join("icon-32.png"));

    std::fs::write(&path, b"stale").unwrap();
    write_icon(32, &IconStyle::default(), &FontSource::NoFont, &path).unwrap();
    write_icon(32, &IconStyle::default(), &FontSource::NoFont, &path).unwrap();

    let icon = image::open(&path).expect("Stale contents should be replaced");
    assert_eq!((icon.width(), icon.height()), (32, 32));
}

#[test]
fn test_write_icon_fails_without_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("missing").join("icon-16.png");

    let err = write_icon(16, &IconStyle::default(), &FontSource::NoFont, &path).unwrap_err();
    assert!(err.to_string().contains("Failed to write icon"));
}

#[test]
fn test_font_scale_per_tier() {
    let Some(font_path) = find_system_font() else {
        println!("No system font installed, skipping");
        return;
    };

    let specific = FontSource::resolve(Some(font_path.as_path()), &[]);
    assert!(matches!(specific, FontSource::Specific { .. }));
    assert_eq!(specific.path(), Some(font_path.as_path()));
    // One third of the size, never below 12
    assert_eq!(specific.scale_for(16).unwrap().y, 12.0);
    assert_eq!(specific.scale_for(48).unwrap().y, 16.0);
    assert_eq!(specific.scale_for(128).unwrap().y, 42.0);

    let fallback = FontSource::resolve(Some(Path::new("/nonexistent/font.ttf")), &[font_path]);
    assert!(matches!(fallback, FontSource::Default { .. }));
    assert_eq!(fallback.scale_for(16).unwrap().y, DEFAULT_FONT_SCALE);
    assert_eq!(fallback.scale_for(128).unwrap().y, DEFAULT_FONT_SCALE);
}

#[test]
fn test_text_glyph_is_centered() {
    let Some(font_path) = find_system_font() else {
        println!("No system font installed, skipping");
        return;
    };

    let font = FontSource::resolve(Some(font_path.as_path()), &[]);
    let style = IconStyle {
        glyph: "A".to_string(),
        ..IconStyle::default()
    };

    let img = render_icon(128, &style, &font);
    assert_eq!(*img.get_pixel(0, 0), RED);
    assert_eq!(*img.get_pixel(127, 127), RED);

    let (x0, y0, x1, y1) = mark_bounds(&img, RED).expect("Glyph should be visible");
    let center_x = (x0 + x1) as f32 / 2.0;
    let center_y = (y0 + y1) as f32 / 2.0;
    assert!((center_x - 63.5).abs() <= 2.0, "glyph center x = {center_x}");
    assert!((center_y - 63.5).abs() <= 2.0, "glyph center y = {center_y}");
}
