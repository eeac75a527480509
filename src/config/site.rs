//! Tool configuration (postpress.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration; every key in postpress.yml is optional
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory scanned for markdown sources, relative to the base dir
    pub content_dir: String,

    /// Path of the JSON artifact, relative to the base dir
    pub output_file: String,

    /// Prefix image references are normalized under
    pub uploads_dir: String,

    /// Pretty-print the artifact
    pub pretty: bool,

    /// Glob patterns, relative to the content dir, excluded from the scan
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Filename pattern for `postpress new`
    pub new_post_name: String,

    /// Any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "posts".to_string(),
            output_file: "posts.json".to_string(),
            uploads_dir: "/static/bloguploads".to_string(),
            pretty: true,
            ignore: Vec::new(),
            new_post_name: ":title.md".to_string(),
            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
