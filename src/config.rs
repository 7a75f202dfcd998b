use anyhow::Result;
use image::Rgba;
use std::{collections::HashSet, path::PathBuf, str::FromStr};

/// Sizes required by browser extension manifests.
pub const DEFAULT_SIZES: [u32; 4] = [16, 32, 48, 128];

/// Largest accepted icon size in pixels
pub const MAX_ICON_SIZE: u32 = 4096;

pub const DEFAULT_OUTPUT_DIR: &str = "./icons";

pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/TTF/arial.ttf";

pub const DEFAULT_BACKGROUND: &str = "#FF0000";

pub const DEFAULT_FOREGROUND: &str = "#FFFFFF";

/// Target/dart emoji.
pub const DEFAULT_GLYPH: &str = "\u{1F3AF}";

/// Fonts tried, in order, when the preferred font can't be loaded.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Colors and glyph shared by every icon of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconStyle {
    pub background: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub glyph: String,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            background: Rgba([255, 0, 0, 255]),
            foreground: Rgba([255, 255, 255, 255]),
            glyph: DEFAULT_GLYPH.to_string(),
        }
    }
}

/// Everything a generation run needs, passed explicitly to the generator.
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// Icon sizes in pixels, generated in this order
    pub icon_sizes: Vec<u32>,
    pub output_directory: PathBuf,
    /// Preferred font, rendered at a size derived from the icon size
    pub font_path: Option<PathBuf>,
    /// Default-font tier; empty means the circle placeholder is used
    /// whenever the preferred font is unavailable
    pub fallback_fonts: Vec<PathBuf>,
    pub style: IconStyle,
    /// Optional `icons` manifest fragment written after the icons
    pub manifest_path: Option<PathBuf>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            icon_sizes: DEFAULT_SIZES.to_vec(),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            font_path: Some(PathBuf::from(DEFAULT_FONT_PATH)),
            fallback_fonts: system_font_paths(),
            style: IconStyle::default(),
            manifest_path: None,
        }
    }
}

impl IconConfig {
    /// Check the configuration before anything touches the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.icon_sizes.is_empty() {
            anyhow::bail!("At least one icon size is required");
        }

        let mut seen = HashSet::new();
        for &size in &self.icon_sizes {
            if size == 0 {
                anyhow::bail!("Icon sizes must be positive");
            }
            if size > MAX_ICON_SIZE {
                anyhow::bail!("Icon size {size} exceeds the maximum of {MAX_ICON_SIZE}");
            }
            if !seen.insert(size) {
                anyhow::bail!("Icon size {size} is listed more than once");
            }
        }

        Ok(())
    }
}

pub fn system_font_paths() -> Vec<PathBuf> {
    SYSTEM_FONT_PATHS.iter().map(PathBuf::from).collect()
}

/// Parse a CSS color into an opaque RGBA pixel
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let parsed = css_color::Srgb::from_str(color).map_err(|_| {
        anyhow::anyhow!("Invalid color {color:?}, expected CSS syntax such as #FF0000")
    })?;

    Ok(Rgba([
        (parsed.red * 255.).round() as u8,
        (parsed.green * 255.).round() as u8,
        (parsed.blue * 255.).round() as u8,
        255,
    ]))
}
