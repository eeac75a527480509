//! List compiled posts

use anyhow::Result;

use crate::compiler::ContentCompiler;
use crate::Postpress;

/// Print the post table without writing anything: the read-only pipeline
/// only, no source rewrites and no artifact
pub fn run(app: &Postpress) -> Result<()> {
    let compiler = ContentCompiler::new(app);
    let compilation = compiler.compile()?;

    println!("Posts ({}):", compilation.posts.len());
    for post in &compilation.posts {
        let date = post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "no date".to_string());
        println!("  {} - {} [{}]", date, post.title, post.slug);
    }

    if !compilation.rewrites.is_empty() {
        println!(
            "{} image reference(s) not yet canonical; `postpress build` will rewrite them",
            compilation.rewrites.len()
        );
    }

    Ok(())
}
