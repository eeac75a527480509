//! Remove the output artifact

use anyhow::Result;
use std::fs;

use crate::Postpress;

/// Delete the output artifact if present
pub fn run(app: &Postpress) -> Result<()> {
    if app.output_file.exists() {
        fs::remove_file(&app.output_file)?;
        tracing::info!("Deleted: {:?}", app.output_file);
    }

    Ok(())
}
