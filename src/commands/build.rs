//! Compile the content tree into the JSON artifact

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::compiler::ContentCompiler;
use crate::Postpress;

/// Run the content compiler once
pub fn run(app: &Postpress) -> Result<()> {
    let start = std::time::Instant::now();

    let compiler = ContentCompiler::new(app);
    let compilation = compiler.run()?;

    if compilation.skipped > 0 {
        tracing::warn!("{} file(s) skipped because they failed to parse", compilation.skipped);
    }
    if !compilation.rewrites.is_empty() {
        tracing::info!("Canonicalized {} image reference(s)", compilation.rewrites.len());
    }

    let duration = start.elapsed();
    tracing::info!(
        "Compiled {} posts to {:?} in {:.2}s",
        compilation.posts.len(),
        app.output_file,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch the content directory and recompile on changes
pub fn watch(app: &Postpress) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&app.content_dir, notify::RecursiveMode::Recursive)?;

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", app.content_dir);

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("Content changed, recompiling...");
                    if let Err(e) = run(app) {
                        tracing::error!("Compilation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_builds_artifact_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("first.md"),
            "---\ntitle: First\ndate: 2024-06-01\n---\n# Hi\n\nThere\n",
        )
        .unwrap();

        let app = Postpress::new(tmp.path()).unwrap();
        run(&app).unwrap();

        let json = fs::read_to_string(tmp.path().join("posts.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let posts = value.as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["slug"], "first");
        let content = posts[0]["content"].as_str().unwrap();
        assert!(content.contains("<h1>Hi</h1>"));
        assert!(content.contains("<p>There</p>"));
    }
}
