//! Progress indicators for imgforest.
//!
//! Drives an indicatif byte bar from the fill's estimated totals.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use treefill::{FillState, Phase, ProgressCallback, Summary};

use crate::ui::truncate_path;

/// Log a progress line every this many images
const LOG_EVERY: u64 = 200;

pub struct FillBar {
    pb: ProgressBar,
    byte_budget: u64,
    last_logged: u64,
}

impl FillBar {
    pub fn new(byte_budget: u64, quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(byte_budget)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}",
                )
                .unwrap()
                .progress_chars("=>-"),
        );

        Self {
            pb,
            byte_budget,
            last_logged: 0,
        }
    }
}

impl ProgressCallback for FillBar {
    fn on_phase(&mut self, phase: Phase, state: &FillState) {
        let msg = match phase {
            Phase::Minimum => "minimum images".to_string(),
            Phase::Overflow => format!("filling ({} images so far)", state.images_created),
            Phase::Measure => "measuring tree...".to_string(),
        };
        self.pb.set_message(msg);
    }

    fn on_images(&mut self, directory: &Path, _written: usize, state: &FillState) {
        self.pb
            .set_position(state.estimated_bytes.min(self.byte_budget));
        self.pb.set_message(format!(
            "{} images  {}",
            state.images_created,
            truncate_path(&directory.to_string_lossy(), 40)
        ));

        if state.images_created / LOG_EVERY > self.last_logged / LOG_EVERY {
            log::info!(
                "Progress: {} images created, {}/{} bytes",
                state.images_created,
                state.estimated_bytes,
                self.byte_budget
            );
            self.last_logged = state.images_created;
        }
    }

    fn on_complete(&mut self, _summary: &Summary) {
        self.pb.finish_and_clear();
    }
}
