//! Plan - show what a config would produce, without side effects

use anyhow::{Context as _, Result};
use treefill::{ColorMode, SourceImage, images_that_fit};

use crate::Context;
use crate::cli::PlanArgs;
use crate::config::GeneratorConfig;
use crate::ui;

/// Worst-case numbers for a config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub estimated_file_size: u64,
    pub max_directories: u64,
    /// Bytes needed to give every directory its minimum at full cap
    pub minimum_bytes: u64,
    /// Variants the budget can hold
    pub budget_images: u64,
}

impl Plan {
    pub fn new(config: &GeneratorConfig, estimated_file_size: u64) -> Self {
        let max_directories = reachable_directories(
            config.max_branch_depth,
            config.max_leaf_per_branch,
            config.max_directories,
        );
        Self {
            estimated_file_size,
            max_directories,
            minimum_bytes: max_directories
                .saturating_mul(config.minimum_images_per_directory as u64)
                .saturating_mul(estimated_file_size),
            budget_images: images_that_fit(config.target_bytes, estimated_file_size),
        }
    }

    /// Whether the budget covers every minimum even at full size
    pub fn minimums_covered(&self, target_bytes: u64) -> bool {
        self.minimum_bytes <= target_bytes
    }
}

/// Most directories the shape can produce: a full tree, capped
fn reachable_directories(max_depth: u32, max_children: u32, cap: usize) -> u64 {
    let cap = cap as u64;
    let mut total = 1u64;
    let mut level = 1u64;
    for _ in 0..max_depth {
        level = level.saturating_mul(u64::from(max_children));
        total = total.saturating_add(level);
        if total >= cap {
            return cap;
        }
    }
    total.min(cap)
}

pub fn run(_ctx: &Context, args: PlanArgs) -> Result<()> {
    let (config, config_path) = GeneratorConfig::resolve(args.config.as_deref())?;
    let source_path = config.source_path();
    let source = SourceImage::open(&source_path)
        .with_context(|| format!("Cannot load source image '{}'", source_path.display()))?;

    let plan = Plan::new(&config, source.estimated_file_size());

    ui::header("Generation Plan");
    ui::kv("Config", &config_path.display().to_string());
    ui::kv(
        "Source image",
        &format!(
            "{} ({}x{}, {:?})",
            source_path.display(),
            source.width(),
            source.height(),
            source.color()
        ),
    );
    ui::kv("Estimated variant size", &ui::format_size_exact(plan.estimated_file_size));
    ui::kv("Directories (at most)", &plan.max_directories.to_string());
    ui::kv("Minimum size needed", &ui::format_size_exact(plan.minimum_bytes));
    ui::kv("Target size", &ui::format_size_exact(config.target_bytes));
    ui::kv("Images the target holds", &plan.budget_images.to_string());

    println!();
    if let Err(e) = ColorMode::from_color_type(source.color()) {
        ui::error(&format!("Source image cannot be used: {e}"));
    } else if plan.minimums_covered(config.target_bytes) {
        ui::success("Target size covers the minimum for every directory");
    } else {
        ui::warn("Target size may run out before every directory gets its minimum");
        ui::dim("Directories created first are filled first.");
    }

    Ok(())
}
