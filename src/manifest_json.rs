//! `icons` fragment for a WebExtension `manifest.json`
//!
//! Only the fragment is produced, ready to be pasted into (or merged with) the
//! extension's manifest. The manifest itself is never read or validated.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
};

/// Root of the fragment: `{"icons": {"16": "icons/icon-16.png", ...}}`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestIcons {
    /// Icon paths keyed by their size, as the manifest expects
    pub icons: BTreeMap<String, String>,
}

impl ManifestIcons {
    /// Build the fragment with paths relative to `base` where possible
    pub fn new(base: &Path, icons: &[(u32, PathBuf)]) -> Self {
        let icons = icons
            .iter()
            .map(|(size, path)| (size.to_string(), manifest_relative_path(base, path)))
            .collect();

        Self { icons }
    }
}

/// Write the fragment next to the manifest at `manifest_path`
pub fn write_manifest_icons(manifest_path: &Path, icons: &[(u32, PathBuf)]) -> Result<()> {
    let base = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    let fragment = ManifestIcons::new(base, icons);

    let json =
        serde_json::to_string_pretty(&fragment).context("Failed to serialize icons manifest")?;

    std::fs::write(manifest_path, json).with_context(|| {
        format!(
            "Failed to write icons manifest {}",
            manifest_path.display()
        )
    })?;

    Ok(())
}

/// Manifest paths always use forward slashes and never start with `./`
fn manifest_relative_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);

    relative
        .components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}
