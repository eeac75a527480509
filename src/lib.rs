//! postpress: a markdown-to-JSON content compiler for static sites
//!
//! This crate scans a content directory for markdown files, parses their
//! YAML front matter, renders the bodies to HTML, canonicalizes image upload
//! paths (writing them back to the sources) and emits one aggregated,
//! date-sorted JSON artifact for a front end to consume.

pub mod commands;
pub mod compiler;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::Path;

/// The main postpress application
#[derive(Clone)]
pub struct Postpress {
    /// Tool configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory scanned for markdown sources
    pub content_dir: std::path::PathBuf,
    /// Path of the JSON artifact
    pub output_file: std::path::PathBuf,
}

impl Postpress {
    /// Create a new instance from a base directory, loading postpress.yml
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("postpress.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let output_file = base_dir.join(&config.output_file);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            output_file,
        })
    }

    /// Compile the content tree and write the artifact
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Delete the output artifact
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a scaffolded post
    pub fn new_post(&self, title: &str, path: Option<&str>) -> Result<()> {
        commands::new::run(self, title, path)
    }
}
