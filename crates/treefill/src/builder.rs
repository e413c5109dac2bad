//! Breadth-first directory tree construction under a depth limit and a global cap

use rand::Rng;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::naming::directory_name;
use crate::types::{BuiltTree, DirectoryNode, TreeShape};

/// Grow a random directory tree below `root`.
///
/// The root is created if absent and counts toward `shape.max_directories`.
/// Nodes are expanded in FIFO order, so shallow branches are filled before the
/// cap truncates deeper ones. A child that cannot be created is logged and its
/// branch dropped; only a failure to create the root is an error.
pub fn build_tree<R: Rng + ?Sized>(
    root: &Path,
    shape: &TreeShape,
    words: &[String],
    rng: &mut R,
) -> Result<BuiltTree> {
    if shape.max_children_per_node == 0 {
        return Err(Error::InvalidParameter(
            "max children per node must be at least 1".to_string(),
        ));
    }
    if shape.max_directories == 0 {
        return Err(Error::InvalidParameter(
            "max directories must be at least 1".to_string(),
        ));
    }

    fs::create_dir_all(root).map_err(|source| Error::RootCreation {
        path: root.to_path_buf(),
        source,
    })?;

    let mut tree = BuiltTree {
        directories: vec![DirectoryNode {
            path: root.to_path_buf(),
            depth: 0,
        }],
        ..Default::default()
    };
    let mut queue: VecDeque<(PathBuf, u32)> = VecDeque::from([(root.to_path_buf(), 0)]);
    let mut created = 1usize;

    while created < shape.max_directories {
        let Some((path, depth)) = queue.pop_front() else {
            break;
        };
        if depth >= shape.max_depth {
            continue;
        }

        let children = rng.gen_range(1..=shape.max_children_per_node);
        for index in 0..children {
            if created >= shape.max_directories {
                break;
            }

            let child = path.join(directory_name(words, depth, index, rng));
            if let Err(e) = fs::create_dir_all(&child) {
                log::warn!("Error creating directory {}: {}", child.display(), e);
                tree.failed += 1;
                continue;
            }

            tree.directories.push(DirectoryNode {
                path: child.clone(),
                depth: depth + 1,
            });
            queue.push_back((child, depth + 1));
            created += 1;
        }
    }

    tree.cap_reached = created >= shape.max_directories;
    log::info!(
        "Created {} directories ({} failed, cap {})",
        tree.len(),
        tree.failed,
        if tree.cap_reached { "reached" } else { "not reached" }
    );

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};
    use tempfile::TempDir;

    fn words() -> Vec<String> {
        ["oak", "pine", "birch", "cedar", "maple", "elm"]
            .iter()
            .map(|w| (*w).to_string())
            .collect()
    }

    fn shape(max_depth: u32, max_children_per_node: u32, max_directories: usize) -> TreeShape {
        TreeShape {
            max_depth,
            max_children_per_node,
            max_directories,
        }
    }

    #[test]
    fn test_directory_cap_respected() {
        for seed in 0..20 {
            let tmp = TempDir::new().unwrap();
            let root = tmp.path().join("root");
            let mut rng = StdRng::seed_from_u64(seed);

            let tree = build_tree(&root, &shape(6, 5, 25), &words(), &mut rng).unwrap();

            assert!(tree.len() <= 25, "seed {seed}: {} directories", tree.len());
            let on_disk = walkdir::WalkDir::new(&root)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_dir())
                .count();
            assert_eq!(on_disk, tree.len());
        }
    }

    #[test]
    fn test_depth_bound() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        let mut rng = StdRng::seed_from_u64(42);

        let tree = build_tree(&root, &shape(3, 4, 10_000), &words(), &mut rng).unwrap();

        assert!(!tree.cap_reached);
        for node in &tree.directories {
            assert!(node.depth <= 3);
            let rel = node.path.strip_prefix(&root).unwrap();
            assert_eq!(rel.components().count() as u32, node.depth);
        }
        // Every node above the depth limit gets at least one child
        assert_eq!(tree.depth_reached(), 3);
    }

    #[test]
    fn test_breadth_first_order() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        let mut rng = StdRng::seed_from_u64(5);

        let tree = build_tree(&root, &shape(4, 3, 60), &words(), &mut rng).unwrap();

        assert_eq!(tree.root(), Some(root.as_path()));
        let depths: Vec<u32> = tree.directories.iter().map(|d| d.depth).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]), "{depths:?}");
    }

    #[test]
    fn test_sibling_names_unique() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        let mut rng = StdRng::seed_from_u64(9);
        let one_word = vec!["x".to_string()];

        let tree = build_tree(&root, &shape(3, 6, 500), &one_word, &mut rng).unwrap();

        let mut by_parent: HashMap<PathBuf, HashSet<String>> = HashMap::new();
        for node in tree.directories.iter().skip(1) {
            let parent = node.path.parent().unwrap().to_path_buf();
            let name = node.path.file_name().unwrap().to_string_lossy().to_string();
            assert!(by_parent.entry(parent).or_default().insert(name));
        }
    }

    #[test]
    fn test_root_only() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        let mut rng = StdRng::seed_from_u64(0);

        let tree = build_tree(&root, &shape(0, 5, 1), &words(), &mut rng).unwrap();

        assert_eq!(tree.len(), 1);
        assert!(tree.cap_reached);
        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_depth_zero_without_cap() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        let mut rng = StdRng::seed_from_u64(0);

        let tree = build_tree(&root, &shape(0, 5, 100), &words(), &mut rng).unwrap();

        assert_eq!(tree.len(), 1);
        assert!(!tree.cap_reached);
    }

    #[test]
    fn test_empty_word_list() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        let mut rng = StdRng::seed_from_u64(2);

        let tree = build_tree(&root, &shape(1, 2, 100), &[], &mut rng).unwrap();

        assert!((2..=3).contains(&tree.len()));
        for (i, node) in tree.directories.iter().skip(1).enumerate() {
            let name = node.path.file_name().unwrap().to_string_lossy().to_string();
            assert_eq!(name, format!("0_{i}"));
        }
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");

        let first = build_tree(&root, &shape(3, 3, 40), &words(), &mut StdRng::seed_from_u64(77))
            .unwrap();
        let second = build_tree(&root, &shape(3, 3, 40), &words(), &mut StdRng::seed_from_u64(77))
            .unwrap();

        assert_eq!(first.directories, second.directories);
        assert_eq!(second.failed, 0);
    }

    #[test]
    fn test_failed_child_is_pruned() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        fs::create_dir(&root).unwrap();

        // With no words the only child is always named "0_0"
        fs::write(root.join("0_0"), b"not a directory").unwrap();

        let tree = build_tree(&root, &shape(2, 1, 100), &[], &mut StdRng::seed_from_u64(13))
            .unwrap();

        assert_eq!(tree.failed, 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_invalid_shape() {
        let tmp = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let result = build_tree(tmp.path(), &shape(2, 0, 10), &words(), &mut rng);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));

        let result = build_tree(tmp.path(), &shape(2, 2, 0), &words(), &mut rng);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
