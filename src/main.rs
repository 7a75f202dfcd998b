use anyhow::Result;
use clap::Parser;
use ext_icon_gen::{
    config::{self, IconConfig, IconStyle},
    icon_gen,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(
    name = "ext-icon-gen",
    about = "Generate placeholder PNG icons for a browser extension"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = config::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Icon sizes to generate, in order.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        default_values_t = config::DEFAULT_SIZES
    )]
    sizes: Vec<u32>,

    /// Preferred font file, scaled to a third of the icon size.
    #[clap(long, value_name = "PATH", default_value = config::DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Font used when the preferred font can't be loaded. Repeat to try several;
    /// replaces the built-in list of system fonts.
    #[clap(long, value_name = "PATH")]
    fallback_font: Vec<PathBuf>,

    /// Skip the system font fallback and draw a circle when the preferred font is missing
    #[clap(long)]
    no_system_fonts: bool,

    /// Background color (CSS color format)
    #[clap(long, default_value = config::DEFAULT_BACKGROUND)]
    background: String,

    /// Glyph color (CSS color format)
    #[clap(long, default_value = config::DEFAULT_FOREGROUND)]
    foreground: String,

    /// Text drawn in the middle of each icon
    #[clap(long, default_value = config::DEFAULT_GLYPH)]
    glyph: String,

    /// Also write a manifest.json `icons` fragment to this file
    #[clap(long, value_name = "FILE")]
    manifest: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<IconConfig> {
        let fallback_fonts = if self.no_system_fonts {
            Vec::new()
        } else if self.fallback_font.is_empty() {
            config::system_font_paths()
        } else {
            self.fallback_font
        };

        Ok(IconConfig {
            icon_sizes: self.sizes,
            output_directory: self.output,
            font_path: Some(self.font),
            fallback_fonts,
            style: IconStyle {
                background: config::parse_color(&self.background)?,
                foreground: config::parse_color(&self.foreground)?,
                glyph: self.glyph,
            },
            manifest_path: self.manifest,
        })
    }
}

fn main() -> Result<()> {
    // Diagnostics go to stderr, stdout only carries the progress lines
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    icon_gen::generate_icons(&args.into_config()?)
}
