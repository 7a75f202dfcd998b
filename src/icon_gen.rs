use crate::config::{IconConfig, IconStyle};
use crate::font_source::FontSource;
use crate::manifest_json;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageBuffer, ImageEncoder, Rgba, RgbaImage,
};
use log::debug;
use rusttype::{point, Font, PositionedGlyph, Rect, Scale};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Generate every icon listed in the config and report each file on stdout
pub fn generate_icons(config: &IconConfig) -> Result<()> {
    config.validate()?;

    ensure_output_dir(&config.output_directory)?;

    // Resolved once, shared by every size
    let font = FontSource::resolve(config.font_path.as_deref(), &config.fallback_fonts);
    debug!("Using font source {font:?}");

    let mut written = Vec::with_capacity(config.icon_sizes.len());
    for &size in &config.icon_sizes {
        let output_path = icon_path(&config.output_directory, size);
        write_icon(size, &config.style, &font, &output_path)?;
        println!("Created icon: {}", output_path.display());
        written.push((size, output_path));
    }

    if let Some(manifest_path) = &config.manifest_path {
        manifest_json::write_manifest_icons(manifest_path, &written)?;
        println!("Created manifest: {}", manifest_path.display());
    }

    println!("All icons created successfully!");
    Ok(())
}

/// Create the output directory if it is missing. Existing contents are left alone.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Can't create output directory {}", dir.display()))
}

pub fn icon_path(dir: &Path, size: u32) -> PathBuf {
    dir.join(format!("icon-{size}.png"))
}

/// Render one icon and write it as PNG, replacing any existing file
pub fn write_icon(size: u32, style: &IconStyle, font: &FontSource, path: &Path) -> Result<()> {
    let png = render_icon_png(size, style, font)?;
    std::fs::write(path, png)
        .with_context(|| format!("Failed to write icon {}", path.display()))?;
    Ok(())
}

/// Render an icon straight to PNG bytes without touching the filesystem
pub fn render_icon_png(size: u32, style: &IconStyle, font: &FontSource) -> Result<Vec<u8>> {
    let canvas = render_icon(size, style, font);
    encode_png(&canvas)
}

/// Draw a `size`×`size` icon: solid background plus either the centered glyph
/// or, without a font, a circle inset by `size / 4` on each side.
pub fn render_icon(size: u32, style: &IconStyle, font: &FontSource) -> RgbaImage {
    let mut canvas = ImageBuffer::from_pixel(size, size, style.background);

    match (font.font(), font.scale_for(size)) {
        (Some(font), Some(scale)) => draw_centered_text(
            &mut canvas,
            font,
            scale,
            &style.glyph,
            style.foreground,
        ),
        _ => draw_circle(&mut canvas, size / 4, style.foreground),
    }

    canvas
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_png(canvas.as_raw(), &mut buf, canvas.width(), canvas.height())?;
    Ok(buf)
}

fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image_data, width, height, ColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(())
}

/// Union of the pixel bounding boxes of laid out glyphs
fn measure_text(glyphs: &[PositionedGlyph<'_>]) -> Option<Rect<i32>> {
    glyphs
        .iter()
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .reduce(|acc, bb| Rect {
            min: point(acc.min.x.min(bb.min.x), acc.min.y.min(bb.min.y)),
            max: point(acc.max.x.max(bb.max.x), acc.max.y.max(bb.max.y)),
        })
}

fn draw_centered_text(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    scale: Scale,
    text: &str,
    color: Rgba<u8>,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    let Some(bounds) = measure_text(&glyphs) else {
        debug!("Glyph {text:?} has no visible outline, nothing drawn");
        return;
    };

    let (width, height) = canvas.dimensions();
    let offset_x = (width as i32 - bounds.width()) / 2 - bounds.min.x;
    let offset_y = (height as i32 - bounds.height()) / 2 - bounds.min.y;

    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };

        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32 + offset_x;
            let y = bb.min.y + gy as i32 + offset_y;
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                return;
            }

            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            *pixel = blend(*pixel, color, coverage);
        });
    }
}

/// Fill the circle inscribed in the square `[margin, size - margin]`
fn draw_circle(canvas: &mut RgbaImage, margin: u32, color: Rgba<u8>) {
    let size = canvas.width().min(canvas.height());
    let center = size as f32 / 2.0;
    let radius = size.saturating_sub(margin * 2) as f32 / 2.0;

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        if dx * dx + dy * dy <= radius * radius {
            *pixel = color;
        }
    }
}

fn blend(under: Rgba<u8>, over: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let coverage = coverage.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - coverage) + b as f32 * coverage).round() as u8;

    Rgba([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
        under[3].max(over[3]),
    ])
}
