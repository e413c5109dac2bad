//! Generate - build a random tree and fill it with image variants
//!
//! Steps:
//! 1. Load config, word list and source image (any failure aborts before
//!    the filesystem is touched)
//! 2. Build the directory tree
//! 3. Fill it up to the target size and measure the result once

use anyhow::{Context as _, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use treefill::{BmpEncoder, MinimumPhase, SourceImage, Summary};

use crate::Context;
use crate::cli::GenerateArgs;
use crate::config::GeneratorConfig;
use crate::progress::FillBar;
use crate::ui;
use crate::words::load_words;

pub fn run(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let (config, config_path) = GeneratorConfig::resolve(args.config.as_deref())?;
    let words = load_words(&args.words)?;

    let chatty = !ctx.quiet && !args.json;
    if chatty {
        ui::header("imgforest");
        ui::kv("Config", &config_path.display().to_string());
    }

    let summary = generate(&config, &words, args.seed, chatty)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !ctx.quiet {
        report(&summary, config.max_directories);
    }

    Ok(())
}

/// Load the source image, then build and fill the tree described by `config`.
///
/// Nothing is created on disk unless the source image loads.
pub fn generate(
    config: &GeneratorConfig,
    words: &[String],
    seed: Option<u64>,
    chatty: bool,
) -> Result<Summary> {
    let source_path = config.source_path();
    let source = SourceImage::open(&source_path)
        .with_context(|| format!("Cannot load source image '{}'", source_path.display()))?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let root = config.root_path();
    if chatty {
        ui::kv("Target size", &ui::format_size_exact(config.target_bytes));
        ui::kv("Source image", &source_path.display().to_string());
        ui::kv("Root directory", &root.display().to_string());
        ui::kv(
            "Max depth / leaves per branch",
            &format!("{} / {}", config.max_branch_depth, config.max_leaf_per_branch),
        );
        ui::kv(
            "Minimum images per directory",
            &config.minimum_images_per_directory.to_string(),
        );
        ui::kv("Max directories", &config.max_directories.to_string());
        ui::kv("Words loaded", &words.len().to_string());
        ui::kv(
            "Estimated variant size",
            &ui::format_size(source.estimated_file_size()),
        );
        if let Some(seed) = seed {
            ui::kv("Seed", &seed.to_string());
        }
        println!();
    }
    log::debug!(
        "max_path_length = {} (not enforced)",
        config.max_path_length
    );

    if chatty {
        ui::step(1, 2, "Building directory tree...");
    }
    let tree = treefill::build_tree(&root, &config.shape(), words, &mut rng)
        .with_context(|| format!("Failed to build tree at {}", root.display()))?;
    if chatty {
        ui::dim(&format!("Created {} directories", tree.len()));
        if tree.failed > 0 {
            ui::warn(&format!("  {} directories could not be created", tree.failed));
        }
        if tree.cap_reached {
            ui::dim(&format!(
                "Reached maximum directory limit of {} - continuing with image creation",
                config.max_directories
            ));
        }
        ui::step(2, 2, "Filling with image variants...");
    }

    let mut bar = FillBar::new(config.target_bytes, !chatty);
    treefill::fill_tree(
        &tree,
        &source,
        &BmpEncoder,
        config.minimum_images_per_directory,
        config.target_bytes,
        &mut rng,
        &mut bar,
    )
    .context("Failed to fill tree")
}

fn report(summary: &Summary, max_directories: usize) {
    println!();
    ui::success("Tree generation complete!");
    ui::kv("Directories", &summary.directories_created.to_string());
    ui::kv("Images", &summary.images_created.to_string());
    ui::kv(
        "Images per directory",
        &format!(
            "min {}, max {}, avg {:.1}",
            summary.per_directory.min, summary.per_directory.max, summary.per_directory.avg
        ),
    );
    ui::kv("Estimated size", &ui::format_size_exact(summary.estimated_bytes));
    ui::kv("Final size", &ui::format_size_exact(summary.measured_bytes));
    ui::kv("Target size", &ui::format_size_exact(summary.byte_budget));
    ui::kv("Efficiency", &format!("{:.1}%", summary.efficiency()));
    ui::kv(
        "Max directories",
        &format!(
            "{} (reached: {})",
            max_directories,
            if summary.cap_reached { "yes" } else { "no" }
        ),
    );

    if let MinimumPhase::BudgetExhausted { directories_served } = summary.minimum_phase {
        println!();
        ui::warn(&format!(
            "Target size reached while ensuring minimums: {} of {} directories got their minimum",
            directories_served, summary.directories_created
        ));
    }
}
