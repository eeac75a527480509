//! The content compiler - turns a markdown tree into one JSON artifact
//!
//! Everything up to `emit` is read-only: `compile` parses, renders and sorts
//! without touching the filesystem, recording the source rewrites it would
//! make. `apply_rewrites` performs them as a separate, logged step, so the
//! pipeline itself can run without write permission.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{slug_for, FrontMatter, MarkdownRenderer, Post};
use crate::Postpress;

/// Compiles the content tree into post records
pub struct ContentCompiler<'a> {
    app: &'a Postpress,
    renderer: MarkdownRenderer,
    ignore: Vec<glob::Pattern>,
}

/// A recorded front-matter rewrite, applied after the read pipeline
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// Source file to rewrite
    pub path: PathBuf,
    /// Full replacement file content: new front matter, unchanged body
    pub content: String,
    /// The canonical image value the file will carry
    pub image: String,
}

/// Result of a read-only compile pass
#[derive(Debug, Default)]
pub struct Compilation {
    /// Compiled records, sorted for emission
    pub posts: Vec<Post>,
    /// Source files whose image reference needs canonicalizing
    pub rewrites: Vec<Rewrite>,
    /// Files excluded because they failed to parse
    pub skipped: usize,
}

impl<'a> ContentCompiler<'a> {
    /// Create a new compiler over the application's resolved paths
    pub fn new(app: &'a Postpress) -> Self {
        let ignore = app
            .config
            .ignore
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    tracing::warn!("Skipping invalid ignore pattern {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();

        Self {
            app,
            renderer: MarkdownRenderer::new(),
            ignore,
        }
    }

    /// Enumerate markdown sources under the content root, sorted so output
    /// order never depends on what the directory listing happens to yield
    pub fn scan(&self) -> Vec<PathBuf> {
        let root = &self.app.content_dir;
        if !root.exists() {
            tracing::warn!("Content directory {:?} does not exist, nothing to compile", root);
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .map(|e| e.into_path())
            .filter(|path| !self.is_ignored(path))
            .collect();

        files.sort();
        files
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.app.content_dir).unwrap_or(path);
        self.ignore.iter().any(|pattern| pattern.matches_path(relative))
    }

    /// The read-only pipeline: parse, normalize, render, sort.
    /// A file that fails to parse is logged and excluded; the batch goes on.
    pub fn compile(&self) -> Result<Compilation> {
        let files = self.scan();
        if files.is_empty() {
            tracing::warn!("No markdown files found under {:?}", self.app.content_dir);
        }

        let mut compilation = Compilation::default();
        for path in &files {
            match self.compile_file(path) {
                Ok((post, rewrite)) => {
                    compilation.posts.push(post);
                    if let Some(rewrite) = rewrite {
                        compilation.rewrites.push(rewrite);
                    }
                }
                Err(e) => {
                    tracing::error!("Skipping {:?}: {:#}", path, e);
                    compilation.skipped += 1;
                }
            }
        }

        // Newest first. Sources are pre-sorted by path and the sort is
        // stable, so date ties and undated records stay in path order,
        // undated ones at the end.
        compilation.posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(compilation)
    }

    /// Compile a single source file into a record, plus the rewrite to
    /// record when its image reference is not in canonical form
    fn compile_file(&self, path: &Path) -> Result<(Post, Option<Rewrite>)> {
        let raw = fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        let (mut fm, body) = FrontMatter::parse(&raw)
            .with_context(|| format!("invalid front matter in {:?}", path))?;

        let date = fm.parse_date();
        if date.is_none() {
            if let Some(d) = &fm.date {
                tracing::warn!("Unrecognized date {:?} in {:?}, sorting it last", d, path);
            }
        }

        let mut rewrite = None;
        if let Some(image) = &fm.image {
            let normalized = normalize_image_path(image, &self.app.config.uploads_dir);
            if *image != normalized {
                fm.image = Some(normalized.clone());
                rewrite = Some(Rewrite {
                    path: path.to_path_buf(),
                    content: format!("{}{}", fm.to_block()?, body),
                    image: normalized,
                });
            }
        }

        let relative = path.strip_prefix(&self.app.content_dir).unwrap_or(path);
        let post = Post {
            title: fm.title.clone().unwrap_or_else(|| "Untitled".to_string()),
            date,
            image: fm.image.clone(),
            content: self.renderer.render(body),
            slug: slug_for(relative),
        };

        Ok((post, rewrite))
    }

    /// The isolated side-effect step: write canonicalized front matter back
    /// to the source files. A failed write aborts the run.
    pub fn apply_rewrites(&self, rewrites: &[Rewrite]) -> Result<()> {
        for rewrite in rewrites {
            tracing::info!("Rewriting image reference in {:?} -> {}", rewrite.path, rewrite.image);
            fs::write(&rewrite.path, &rewrite.content)
                .with_context(|| format!("failed to rewrite {:?}", rewrite.path))?;
        }
        Ok(())
    }

    /// Serialize the records to the output artifact, creating parent
    /// directories as needed. Failure here is fatal to the run.
    pub fn emit(&self, posts: &[Post]) -> Result<()> {
        let output = &self.app.output_file;
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create output directory {:?}", parent))?;
            }
        }

        let json = if self.app.config.pretty {
            serde_json::to_string_pretty(posts)?
        } else {
            serde_json::to_string(posts)?
        };
        fs::write(output, json).with_context(|| format!("failed to write {:?}", output))?;

        Ok(())
    }

    /// Full batch: compile, write back image references, emit the artifact
    pub fn run(&self) -> Result<Compilation> {
        let compilation = self.compile()?;
        self.apply_rewrites(&compilation.rewrites)?;
        self.emit(&compilation.posts)?;
        Ok(compilation)
    }
}

/// Check if a file is a markdown file (extension case-insensitive)
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// Reduce an image reference to its basename under the uploads prefix
pub fn normalize_image_path(image: &str, uploads_dir: &str) -> String {
    let name = image.trim().rsplit(['/', '\\']).next().unwrap_or(image);
    format!("{}/{}", uploads_dir.trim_end_matches('/'), name)
}
