//! Data types for the treefill crate

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bounds on the shape of a generated tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeShape {
    /// Deepest level that may receive children (root is depth 0)
    pub max_depth: u32,
    /// Upper bound of the uniform child count drawn per node
    pub max_children_per_node: u32,
    /// Global cap on directories, root included
    pub max_directories: usize,
}

/// A directory created by the tree builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub path: PathBuf,
    pub depth: u32,
}

/// Result of building a tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuiltTree {
    /// Every created directory in breadth-first creation order, root first
    pub directories: Vec<DirectoryNode>,
    /// Number of child directories that could not be created
    pub failed: u64,
    /// Whether the directory cap stopped the expansion
    pub cap_reached: bool,
}

impl BuiltTree {
    /// Root directory of the tree, if one was created
    pub fn root(&self) -> Option<&Path> {
        self.directories.first().map(|d| d.path.as_path())
    }

    /// Directory paths in creation order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.directories.iter().map(|d| d.path.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Deepest level actually reached
    pub fn depth_reached(&self) -> u32 {
        self.directories.iter().map(|d| d.depth).max().unwrap_or(0)
    }
}

/// One image variant written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub path: PathBuf,
    /// Accounted size; always the estimated file size, never measured
    pub estimated_size: u64,
}

/// Fill phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Every directory receives its minimum, in build order
    Minimum,
    /// Remaining budget goes to randomly chosen directories
    Overflow,
    /// Final on-disk measurement
    Measure,
}

/// How the minimum phase ended
///
/// Neither outcome is an error; a budget that runs out simply leaves later
/// directories short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum MinimumPhase {
    /// Every directory got its minimum
    #[default]
    AllMet,
    /// The budget ran out first; counts the directories that did get their minimum
    BudgetExhausted { directories_served: usize },
}

/// Running accounting for a fill
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillState {
    /// Sum of estimated sizes of all variants written
    pub estimated_bytes: u64,
    pub images_created: u64,
    /// Images per directory, indexed like the directory list
    pub per_directory: Vec<u64>,
    pub minimum_phase: MinimumPhase,
}

impl FillState {
    /// Fresh state for `directories` directories
    pub fn new(directories: usize) -> Self {
        Self {
            per_directory: vec![0; directories],
            ..Default::default()
        }
    }

    /// Account for one written variant in directory `index`
    pub fn record(&mut self, index: usize, estimated_size: u64) {
        self.estimated_bytes += estimated_size;
        self.images_created += 1;
        self.per_directory[index] += 1;
    }

    /// Bytes left before the budget is reached
    pub fn remaining(&self, byte_budget: u64) -> u64 {
        byte_budget.saturating_sub(self.estimated_bytes)
    }
}

/// Min/max/average images per directory
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub min: u64,
    pub max: u64,
    pub avg: f64,
}

impl DirectoryStats {
    pub fn from_counts(counts: &[u64]) -> Self {
        if counts.is_empty() {
            return Self::default();
        }
        let total: u64 = counts.iter().sum();
        Self {
            min: counts.iter().copied().min().unwrap_or(0),
            max: counts.iter().copied().max().unwrap_or(0),
            avg: total as f64 / counts.len() as f64,
        }
    }
}

/// Final report of a generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub directories_created: usize,
    pub images_created: u64,
    pub estimated_bytes: u64,
    /// On-disk size of the whole tree, measured once after filling
    pub measured_bytes: u64,
    pub byte_budget: u64,
    pub estimated_file_size: u64,
    pub per_directory: DirectoryStats,
    pub minimum_phase: MinimumPhase,
    pub cap_reached: bool,
}

impl Summary {
    /// Measured size as a percentage of the budget
    pub fn efficiency(&self) -> f64 {
        if self.byte_budget == 0 {
            0.0
        } else {
            (self.measured_bytes as f64 / self.byte_budget as f64) * 100.0
        }
    }
}

/// Callback trait for fill progress updates
pub trait ProgressCallback {
    /// Called when a phase starts
    fn on_phase(&mut self, phase: Phase, state: &FillState);

    /// Called after each batch with the updated totals
    fn on_images(&mut self, directory: &Path, written: usize, state: &FillState);

    /// Called once the run is complete
    fn on_complete(&mut self, summary: &Summary);
}

/// A no-op progress callback for when progress isn't needed
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_phase(&mut self, _phase: Phase, _state: &FillState) {}
    fn on_images(&mut self, _directory: &Path, _written: usize, _state: &FillState) {}
    fn on_complete(&mut self, _summary: &Summary) {}
}
