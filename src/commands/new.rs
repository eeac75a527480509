//! Create a new markdown post

use anyhow::Result;
use std::fs;

use crate::content::FrontMatter;
use crate::Postpress;

/// Create a scaffolded post under the content directory
pub fn run(app: &Postpress, title: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();

    // Generate filename
    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        let slug = slug::slugify(title);

        app.config
            .new_post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = app.content_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Serializing through FrontMatter keeps titles with YAML-special
    // characters valid
    let fm = FrontMatter {
        title: Some(title.to_string()),
        date: Some(now.format("%Y-%m-%d").to_string()),
        ..Default::default()
    };
    let content = format!("{}\n", fm.to_block()?);
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
