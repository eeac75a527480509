//! The compiled post record

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A compiled post, one element of the output artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title, "Untitled" when the source carries none
    pub title: String,

    /// Publication date; null in the artifact when absent or unparseable
    pub date: Option<NaiveDateTime>,

    /// Canonicalized upload path of the cover image
    pub image: Option<String>,

    /// Rendered HTML body
    pub content: String,

    /// Identifier derived from the source path, unique per file
    pub slug: String,
}

/// Derive a slug from a content-root-relative path: separators become `/`,
/// the markdown extension is stripped (case-insensitively).
pub fn slug_for(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let mut slug = parts.join("/");

    let lower = slug.to_ascii_lowercase();
    for ext in [".md", ".markdown"] {
        if lower.ends_with(ext) {
            slug.truncate(slug.len() - ext.len());
            break;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_slug_from_nested_path() {
        assert_eq!(slug_for(&PathBuf::from("2024/06/trip.md")), "2024/06/trip");
        assert_eq!(slug_for(&PathBuf::from("about.md")), "about");
    }

    #[test]
    fn test_slug_strips_extension_case_insensitively() {
        assert_eq!(slug_for(&PathBuf::from("Note.MD")), "Note");
        assert_eq!(slug_for(&PathBuf::from("deep/nested/page.Markdown")), "deep/nested/page");
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let post = Post {
            title: "Untitled".to_string(),
            date: None,
            image: None,
            content: "<p>hi</p>".to_string(),
            slug: "hi".to_string(),
        };

        let value = serde_json::to_value(&post).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert!(object["date"].is_null());
        assert!(object["image"].is_null());
        assert_eq!(object["slug"], "hi");
    }
}
