use ext_icon_gen::{config, icon_gen::icon_path};
use image::{io::Reader as ImageReader, DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};

fn load_icon(path: &Path) -> anyhow::Result<DynamicImage> {
    Ok(ImageReader::open(path)?.decode()?)
}

/// Any pixel differing from the corner counts; glyphs may be hollow at the center
fn has_mark(img: &RgbaImage) -> bool {
    let background = *img.get_pixel(0, 0);
    img.pixels().any(|pixel| *pixel != background)
}

fn main() {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_OUTPUT_DIR));

    println!("Checking icons in: {}", dir.display());

    let mut failures = 0;
    for size in config::DEFAULT_SIZES {
        let path = icon_path(&dir, size);

        let img = match load_icon(&path) {
            Ok(img) => img,
            Err(err) => {
                println!("✗ {}: {err}", path.display());
                failures += 1;
                continue;
            }
        };

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        if (width, height) != (size, size) {
            println!(
                "✗ {}: expected {size}x{size}, found {width}x{height}",
                path.display()
            );
            failures += 1;
            continue;
        }

        let mark = if has_mark(&rgba_img) {
            "mark visible"
        } else {
            "no mark"
        };

        println!("✓ {}: {width}x{height}, {mark}", path.display());
    }

    if failures > 0 {
        println!("\n{failures} icon(s) missing or invalid");
        std::process::exit(1);
    }

    println!("\n✓ All icons present");
}
