use anyhow::{Context, Result};
use log::debug;
use rusttype::{Font, Scale};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Pixel height used for the default-font tier, which doesn't follow the icon size
pub const DEFAULT_FONT_SCALE: f32 = 10.0;

/// Smallest pixel height used with the preferred font
pub const MIN_FONT_SCALE: u32 = 12;

/// Where glyph outlines for a run come from
pub enum FontSource {
    /// The requested font file, scaled with the icon
    Specific { path: PathBuf, font: Font<'static> },
    /// A generic system font at a fixed size
    Default { path: PathBuf, font: Font<'static> },
    /// No usable font; icons get the circle placeholder
    NoFont,
}

impl FontSource {
    /// Resolve the font for a run. Any failure on a tier moves on to the next one,
    /// so this never fails.
    pub fn resolve(requested: Option<&Path>, fallbacks: &[PathBuf]) -> Self {
        if let Some(path) = requested {
            match load_font(path) {
                Ok(font) => {
                    return FontSource::Specific {
                        path: path.to_path_buf(),
                        font,
                    }
                }
                Err(err) => debug!("Preferred font unavailable: {err:#}"),
            }
        }

        for path in fallbacks {
            match load_font(path) {
                Ok(font) => {
                    return FontSource::Default {
                        path: path.clone(),
                        font,
                    }
                }
                Err(err) => debug!("Default font candidate skipped: {err:#}"),
            }
        }

        debug!("No usable font found, icons will use the circle placeholder");
        FontSource::NoFont
    }

    pub fn font(&self) -> Option<&Font<'static>> {
        match self {
            FontSource::Specific { font, .. } | FontSource::Default { font, .. } => Some(font),
            FontSource::NoFont => None,
        }
    }

    /// Glyph scale for an icon of `size` pixels
    pub fn scale_for(&self, size: u32) -> Option<Scale> {
        match self {
            FontSource::Specific { .. } => {
                Some(Scale::uniform((size / 3).max(MIN_FONT_SCALE) as f32))
            }
            FontSource::Default { .. } => Some(Scale::uniform(DEFAULT_FONT_SCALE)),
            FontSource::NoFont => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FontSource::Specific { path, .. } | FontSource::Default { path, .. } => Some(path),
            FontSource::NoFont => None,
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Specific { path, .. } => {
                f.debug_tuple("Specific").field(&path.display()).finish()
            }
            FontSource::Default { path, .. } => {
                f.debug_tuple("Default").field(&path.display()).finish()
            }
            FontSource::NoFont => f.write_str("NoFont"),
        }
    }
}

fn load_font(path: &Path) -> Result<Font<'static>> {
    let data =
        std::fs::read(path).with_context(|| format!("Can't read font {}", path.display()))?;

    Font::try_from_vec(data).with_context(|| format!("Not a usable font: {}", path.display()))
}
