//! Measure - on-disk size of an existing tree

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::Context;
use crate::ui;

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let size = treefill::measure_tree(path)
        .with_context(|| format!("Could not measure {}", path.display()))?;

    if ctx.quiet {
        println!("{}", size.bytes);
        return Ok(());
    }

    ui::header("Tree Size");
    ui::kv("Path", &path.display().to_string());
    ui::kv("Files", &size.files.to_string());
    ui::kv("Total size", &ui::format_size_exact(size.bytes));
    Ok(())
}
