//! Initialize a postpress working directory

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Scaffold a working directory: content dir, config file, sample post.
/// Existing files are left alone.
pub fn run(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;

    let config_path = target_dir.join("postpress.yml");
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let sample_path = target_dir.join("posts").join("hello-world.md");
    if !sample_path.exists() {
        let sample = format!(
            "---\ntitle: Hello World\ndate: {}\n---\n\nWelcome! Edit or delete this post, then run `postpress build`.\n",
            chrono::Local::now().format("%Y-%m-%d")
        );
        fs::write(&sample_path, sample)?;
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# postpress configuration

# Directory scanned for markdown sources
content_dir: posts

# Path of the generated JSON artifact
output_file: posts.json

# Prefix image references are normalized under
uploads_dir: /static/bloguploads

# Pretty-print the artifact
pretty: true

# Glob patterns (relative to content_dir) excluded from the scan
ignore: []

# Filename pattern for `postpress new` (:title, :year, :month, :day)
new_post_name: :title.md
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_scaffolds_working_directory() {
        let tmp = tempfile::tempdir().unwrap();
        run(tmp.path()).unwrap();

        assert!(tmp.path().join("posts/hello-world.md").exists());
        let config = SiteConfig::load(tmp.path().join("postpress.yml")).unwrap();
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.new_post_name, ":title.md");
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("postpress.yml");
        fs::write(&config_path, "content_dir: articles\n").unwrap();

        run(tmp.path()).unwrap();

        let config = SiteConfig::load(&config_path).unwrap();
        assert_eq!(config.content_dir, "articles");
    }
}
