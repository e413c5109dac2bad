//! # treefill
//!
//! Synthesizes large randomized directory trees full of near-duplicate images,
//! for stress-testing backup systems, file indexers and sync clients against
//! realistic directory shapes and a target data volume.
//!
//! A run has two halves:
//! - **Build**: grow a breadth-first tree under a depth limit and a global
//!   directory cap, naming each directory from a few random words
//! - **Fill**: write one-pixel variants of a source image, first giving every
//!   directory its minimum in build order, then spending what is left of the
//!   byte budget on randomly chosen directories
//!
//! Sizes are accounted with a per-file estimate derived once from the source
//! image, so the fill never stats what it writes. The tree is measured for
//! real exactly once, at the end.
//!
//! ## Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use std::path::Path;
//! use treefill::{BmpEncoder, NoProgress, SourceImage, TreeShape};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let words = vec!["amber".to_string(), "basalt".to_string()];
//! let shape = TreeShape {
//!     max_depth: 4,
//!     max_children_per_node: 3,
//!     max_directories: 200,
//! };
//!
//! let tree = treefill::build_tree(Path::new("/tmp/forest"), &shape, &words, &mut rng)?;
//! let source = SourceImage::open(Path::new("source.png"))?;
//! let summary = treefill::fill_tree(
//!     &tree,
//!     &source,
//!     &BmpEncoder,
//!     5,
//!     1024 * 1024 * 1024,
//!     &mut rng,
//!     &mut NoProgress,
//! )?;
//! println!("{} images, {} bytes on disk", summary.images_created, summary.measured_bytes);
//! # Ok::<(), treefill::Error>(())
//! ```

mod builder;
mod error;
mod estimate;
mod filler;
mod naming;
mod types;
mod variant;

pub use builder::build_tree;
pub use error::{Error, Result};
pub use estimate::{
    INFLATION_FACTOR, TreeSize, estimate_file_size, images_that_fit, measure_tree,
};
pub use filler::{BATCH_SIZE, CANDIDATE_SLACK, Filler, MAX_CANDIDATES, fill_tree};
pub use naming::{MAX_NAME_WORDS, directory_name};
pub use types::{
    BuiltTree, DirectoryNode, DirectoryStats, FillState, MinimumPhase, NoProgress, Phase,
    ProgressCallback, Summary, TreeShape, Variant,
};
pub use variant::{
    BmpEncoder, ColorMode, NAME_LEN, PixelValue, SourceImage, VariantEncoder, generate_batch,
    variant_file_name,
};
