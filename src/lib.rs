//! Placeholder icon generation for browser extensions.

pub mod config;
pub mod font_source;
pub mod icon_gen;
pub mod manifest_json;
