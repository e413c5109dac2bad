//! Budgeted fill of a built tree: minimum guarantee first, then overflow

use rand::Rng;
use std::path::PathBuf;

use crate::error::Result;
use crate::estimate::{images_that_fit, measure_tree};
use crate::types::{
    BuiltTree, DirectoryStats, FillState, MinimumPhase, Phase, ProgressCallback, Summary,
};
use crate::variant::{SourceImage, VariantEncoder, generate_batch};

/// Most variants generated in a single batch
pub const BATCH_SIZE: usize = 20;

/// Upper bound on the overflow phase's candidate pool
pub const MAX_CANDIDATES: usize = 1000;

/// Extra candidates drawn beyond the estimated number of remaining images
pub const CANDIDATE_SLACK: usize = 10;

/// Fills directories with variants of one source image up to a byte budget.
///
/// All accounting uses the source's estimated file size; nothing written
/// during the fill is measured.
pub struct Filler<'a, E: VariantEncoder + ?Sized> {
    source: &'a SourceImage,
    encoder: &'a E,
    batch_size: usize,
    max_candidates: usize,
}

impl<'a, E: VariantEncoder + ?Sized> Filler<'a, E> {
    pub fn new(source: &'a SourceImage, encoder: &'a E) -> Self {
        Self {
            source,
            encoder,
            batch_size: BATCH_SIZE,
            max_candidates: MAX_CANDIDATES,
        }
    }

    /// Override the batch cap (at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Override the overflow candidate pool cap (at least 1)
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    fn file_size(&self) -> u64 {
        self.source.estimated_file_size()
    }

    /// Run both fill phases over `directories` and return the accounting.
    pub fn fill<R, P>(
        &self,
        directories: &[PathBuf],
        min_per_directory: usize,
        byte_budget: u64,
        rng: &mut R,
        progress: &mut P,
    ) -> Result<FillState>
    where
        R: Rng + ?Sized,
        P: ProgressCallback + ?Sized,
    {
        let mut state = FillState::new(directories.len());

        let needed = (directories.len() as u64)
            .saturating_mul(min_per_directory as u64)
            .saturating_mul(self.file_size());
        log::info!(
            "Ensuring each directory has at least {} images (estimated {} bytes needed)",
            min_per_directory,
            needed
        );

        progress.on_phase(Phase::Minimum, &state);
        self.fill_minimums(directories, min_per_directory, byte_budget, &mut state, rng, progress)?;
        log::info!(
            "Minimum images phase complete: {} bytes, {} images",
            state.estimated_bytes,
            state.images_created
        );

        progress.on_phase(Phase::Overflow, &state);
        self.fill_overflow(directories, byte_budget, &mut state, rng, progress)?;

        Ok(state)
    }

    /// Phase A: give each directory its minimum, in order, while budget lasts.
    fn fill_minimums<R, P>(
        &self,
        directories: &[PathBuf],
        min_per_directory: usize,
        byte_budget: u64,
        state: &mut FillState,
        rng: &mut R,
        progress: &mut P,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
        P: ProgressCallback + ?Sized,
    {
        let file_size = self.file_size();

        for (index, directory) in directories.iter().enumerate() {
            let mut remaining = min_per_directory;

            while remaining > 0 && state.estimated_bytes < byte_budget {
                let fits = images_that_fit(state.remaining(byte_budget), file_size).max(1);
                let batch = self.batch_size.min(remaining).min(clamp_usize(fits));

                let written =
                    generate_batch(self.source, directory, batch, self.encoder, rng)?;
                let produced = written.len();
                for variant in &written {
                    state.record(index, variant.estimated_size);
                    remaining -= 1;
                    if state.estimated_bytes >= byte_budget {
                        break;
                    }
                }
                progress.on_images(directory, produced, state);

                if produced < batch {
                    log::warn!(
                        "Giving up on {} after a failed write ({} images short)",
                        directory.display(),
                        remaining
                    );
                    break;
                }
            }

            if state.estimated_bytes >= byte_budget {
                if index + 1 < directories.len() || remaining > 0 {
                    let directories_served = state.per_directory[..=index]
                        .iter()
                        .filter(|&&n| n >= min_per_directory as u64)
                        .count();
                    state.minimum_phase = MinimumPhase::BudgetExhausted { directories_served };
                }
                break;
            }
        }

        Ok(())
    }

    /// Phase B: spend what is left on a pre-drawn pool of random directories.
    fn fill_overflow<R, P>(
        &self,
        directories: &[PathBuf],
        byte_budget: u64,
        state: &mut FillState,
        rng: &mut R,
        progress: &mut P,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
        P: ProgressCallback + ?Sized,
    {
        let file_size = self.file_size();
        let estimated = images_that_fit(state.remaining(byte_budget), file_size);
        if estimated == 0 || directories.is_empty() {
            return Ok(());
        }

        let pool = clamp_usize(estimated)
            .saturating_add(CANDIDATE_SLACK)
            .min(self.max_candidates);
        let candidates = draw_candidates(directories.len(), pool, rng);

        let mut cursor = 0;
        while state.estimated_bytes < byte_budget && cursor < candidates.len() {
            let index = candidates[cursor];
            let directory = &directories[index];

            let capacity = clamp_usize(images_that_fit(state.remaining(byte_budget), file_size));
            let batch = self.batch_size.min(capacity).min(candidates.len() - cursor);
            if batch == 0 {
                break;
            }

            let written = generate_batch(self.source, directory, batch, self.encoder, rng)?;
            let produced = written.len();
            let mut full = false;
            for variant in &written {
                state.record(index, variant.estimated_size);
                if state.estimated_bytes + file_size > byte_budget {
                    full = true;
                    break;
                }
            }
            progress.on_images(directory, produced, state);

            if full {
                log::info!(
                    "Stopping to avoid exceeding target size ({} bytes)",
                    state.estimated_bytes
                );
                break;
            }
            if produced < batch {
                log::warn!("Overflow fill stopped after a failed write in {}", directory.display());
                break;
            }
            cursor += 1;
        }

        if cursor >= candidates.len() && state.estimated_bytes + file_size <= byte_budget {
            log::info!(
                "Candidate pool exhausted with {} bytes of budget left",
                state.remaining(byte_budget)
            );
        }

        Ok(())
    }
}

/// Pick `count` directory indices uniformly, with replacement
fn draw_candidates<R: Rng + ?Sized>(directories: usize, count: usize, rng: &mut R) -> Vec<usize> {
    (0..count).map(|_| rng.gen_range(0..directories)).collect()
}

fn clamp_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Fill a built tree and measure the result once.
///
/// This is the whole fill half of a run: both phases over `tree`'s
/// directories, then a single recursive size measurement of its root.
pub fn fill_tree<E, R, P>(
    tree: &BuiltTree,
    source: &SourceImage,
    encoder: &E,
    min_per_directory: usize,
    byte_budget: u64,
    rng: &mut R,
    progress: &mut P,
) -> Result<Summary>
where
    E: VariantEncoder + ?Sized,
    R: Rng + ?Sized,
    P: ProgressCallback + ?Sized,
{
    let directories = tree.paths();
    let state = Filler::new(source, encoder).fill(
        &directories,
        min_per_directory,
        byte_budget,
        rng,
        progress,
    )?;

    progress.on_phase(Phase::Measure, &state);
    let measured_bytes = match tree.root() {
        Some(root) => measure_tree(root)?.bytes,
        None => 0,
    };

    let summary = summarize(tree, &state, source.estimated_file_size(), byte_budget, measured_bytes);
    progress.on_complete(&summary);
    Ok(summary)
}

fn summarize(
    tree: &BuiltTree,
    state: &FillState,
    estimated_file_size: u64,
    byte_budget: u64,
    measured_bytes: u64,
) -> Summary {
    Summary {
        directories_created: tree.len(),
        images_created: state.images_created,
        estimated_bytes: state.estimated_bytes,
        measured_bytes,
        byte_budget,
        estimated_file_size,
        per_directory: DirectoryStats::from_counts(&state.per_directory),
        minimum_phase: state.minimum_phase,
        cap_reached: tree.cap_reached,
    }
}
