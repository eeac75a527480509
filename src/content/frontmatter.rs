//! Front-matter parsing and re-serialization

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Failure to interpret a fenced metadata block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Custom deserializer that accepts any YAML scalar where a string is
/// expected. Unquoted dates frequently scan as numbers (`date: 2024`).
fn string_or_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarOrNone;

    impl<'de> Visitor<'de> for ScalarOrNone {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a scalar value or nothing")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarOrNone)
}

/// Front-matter data from a content file
///
/// Only `title`, `date` and `image` are interpreted; everything else is kept
/// in `extra`, in file order, and written back untouched when the block is
/// re-serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "string_or_scalar", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Additional fields, passed through unused
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front matter from file content.
    /// Returns (front_matter, body); a file without a fenced block (or with
    /// an unterminated opening fence) is all body. A closed fence that does
    /// not hold valid YAML is an error.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start();

        let Some(after_open) = content.strip_prefix("---") else {
            return Ok((Self::default(), content));
        };
        // The opening fence must end its own line
        let Some(after_open) = strip_line_break(after_open) else {
            return Ok((Self::default(), content));
        };

        // A fence closed on the very next line is an empty block
        if let Some(rest) = after_open.strip_prefix("---") {
            if rest.is_empty() {
                return Ok((Self::default(), ""));
            }
            if let Some(body) = strip_line_break(rest) {
                return Ok((Self::default(), body));
            }
        }

        let mut search_from = 0;
        let (block, body) = loop {
            let Some(pos) = after_open[search_from..].find("\n---") else {
                // Unterminated fence: the whole file is body
                return Ok((Self::default(), content));
            };
            let newline = search_from + pos;
            let after_fence = &after_open[newline + 4..];
            if after_fence.is_empty() {
                break (&after_open[..newline], "");
            }
            if let Some(body) = strip_line_break(after_fence) {
                break (&after_open[..newline], body);
            }
            // A line that merely starts with --- (e.g. a heading underline);
            // keep scanning for the real fence
            search_from = newline + 4;
        };

        if block.trim().is_empty() {
            return Ok((Self::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(block)?;
        Ok((fm, body))
    }

    /// Serialize back to a fenced block for rewriting a source file
    pub fn to_block(&self) -> Result<String, FrontMatterError> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n", yaml))
    }

    /// Parse the date field into a sortable timestamp
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

/// Parse a date string in the formats content files actually use
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d",
        "%Y/%m/%d",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_front_matter() {
        let content = r#"---
title: Spring Trip
date: 2024-06-01
image: images/trip.png
draft: true
---

This is the body.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Spring Trip".to_string()));
        assert_eq!(fm.date, Some("2024-06-01".to_string()));
        assert_eq!(fm.image, Some("images/trip.png".to_string()));
        assert!(fm.extra.contains_key("draft"));
        assert!(body.contains("This is the body."));
    }

    #[test]
    fn test_no_front_matter() {
        let content = "# Just Markdown\n\nNo metadata here.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.date, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_unterminated_fence_is_body() {
        let content = "---\ntitle: Oops\n\nNever closed.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block() {
        let content = "---\n---\nBody.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, "Body.\n");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody.\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_numeric_date_scalar() {
        let content = "---\ntitle: Year Note\ndate: 2024\n---\nBody.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.date, Some("2024".to_string()));
        // Not a recognized format, so it carries no sort timestamp
        assert_eq!(fm.parse_date(), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let date_only = FrontMatter {
            date: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        let dt = date_only.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-06-01 00:00:00");

        let with_time = FrontMatter {
            date: Some("2024-06-01 10:30:00".to_string()),
            ..Default::default()
        };
        let dt = with_time.parse_date().unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");

        let rfc3339 = FrontMatter {
            date: Some("2024-06-01T10:30:00Z".to_string()),
            ..Default::default()
        };
        assert!(rfc3339.parse_date().is_some());

        let garbage = FrontMatter {
            date: Some("next tuesday".to_string()),
            ..Default::default()
        };
        assert_eq!(garbage.parse_date(), None);
    }

    #[test]
    fn test_to_block_round_trip() {
        let content = "---\ntitle: Keep Me\nauthor: someone\ntags:\n- a\n- b\n---\nBody.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();

        let block = fm.to_block().unwrap();
        // Absent fields stay absent
        assert!(!block.contains("image"));
        assert!(!block.contains("date"));

        let (reparsed, _) = FrontMatter::parse(&format!("{}Body.\n", block)).unwrap();
        assert_eq!(reparsed.title, Some("Keep Me".to_string()));
        let keys: Vec<&String> = reparsed.extra.keys().collect();
        assert_eq!(keys, ["author", "tags"]);
    }

    #[test]
    fn test_crlf_fences() {
        let content = "---\r\ntitle: Windows File\r\n---\r\nBody.\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Windows File".to_string()));
        assert_eq!(body, "Body.\r\n");
    }
}
