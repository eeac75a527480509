//! Content module - front matter, markdown rendering, and the post record

mod frontmatter;
mod markdown;
mod post;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use markdown::MarkdownRenderer;
pub use post::{slug_for, Post};
