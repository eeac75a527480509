//! CLI entry point for postpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postpress")]
#[command(version)]
#[command(about = "Compile a markdown content tree into a JSON post index", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a working directory with a config file and sample post
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new markdown post
    New {
        /// Title of the new post
        title: String,

        /// Path for the new post, relative to the content directory
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Compile the content tree into the JSON artifact
    #[command(alias = "b")]
    Build {
        /// Watch for file changes and recompile
        #[arg(short, long)]
        watch: bool,

        /// Content directory (overrides the configured one)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Output file (overrides the configured one)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List compiled posts without writing anything
    List,

    /// Delete the output artifact
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postpress=debug,info"
    } else {
        "postpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing postpress in {:?}", target_dir);
            postpress::commands::init::run(&target_dir)?;
            println!("Initialized postpress working directory in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let app = postpress::Postpress::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            app.new_post(&title, path.as_deref())?;
        }

        Commands::Build {
            watch,
            content,
            output,
        } => {
            let mut app = postpress::Postpress::new(&base_dir)?;
            if let Some(dir) = content {
                app.content_dir = if dir.is_absolute() { dir } else { app.base_dir.join(dir) };
            }
            if let Some(file) = output {
                app.output_file = if file.is_absolute() { file } else { app.base_dir.join(file) };
            }

            tracing::info!("Compiling content...");
            postpress::commands::build::run(&app)?;
            println!("Build complete!");

            if watch {
                tracing::info!("Watching for file changes...");
                postpress::commands::build::watch(&app)?;
            }
        }

        Commands::List => {
            let app = postpress::Postpress::new(&base_dir)?;
            postpress::commands::list::run(&app)?;
        }

        Commands::Clean => {
            let app = postpress::Postpress::new(&base_dir)?;
            tracing::info!("Cleaning output artifact...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("postpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
