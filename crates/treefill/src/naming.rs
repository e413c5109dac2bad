//! Directory name synthesis

use rand::Rng;
use rand::seq::SliceRandom;

/// Most words drawn for one directory name
pub const MAX_NAME_WORDS: usize = 3;

/// Build a directory name from 1-3 random words plus a `_<depth>_<index>` suffix.
///
/// Words are sampled without replacement, so a short list yields at most
/// `words.len()` words. The suffix keeps siblings distinct even when the word
/// samples collide, and is the whole name when `words` is empty.
pub fn directory_name<R: Rng + ?Sized>(
    words: &[String],
    depth: u32,
    index: u32,
    rng: &mut R,
) -> String {
    let wanted = rng.gen_range(1..=MAX_NAME_WORDS);
    let picked: Vec<&str> = words
        .choose_multiple(rng, wanted.min(words.len()))
        .map(String::as_str)
        .collect();

    if picked.is_empty() {
        format!("{depth}_{index}")
    } else {
        format!("{}_{depth}_{index}", picked.join("_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_name_has_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = words(&["alpha", "beta", "gamma", "delta"]);

        for _ in 0..50 {
            let name = directory_name(&list, 2, 5, &mut rng);
            assert!(name.ends_with("_2_5"), "{name}");

            let prefix = name.trim_end_matches("_2_5");
            let parts: Vec<&str> = prefix.split('_').collect();
            assert!((1..=MAX_NAME_WORDS).contains(&parts.len()));
            let unique: HashSet<&str> = parts.iter().copied().collect();
            assert_eq!(unique.len(), parts.len(), "words repeated in {name}");
            assert!(parts.iter().all(|p| list.iter().any(|w| w == p)));
        }
    }

    #[test]
    fn test_empty_word_list() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(directory_name(&[], 0, 1, &mut rng), "0_1");
        assert_eq!(directory_name(&[], 3, 0, &mut rng), "3_0");
    }

    #[test]
    fn test_single_word_list() {
        let mut rng = StdRng::seed_from_u64(3);
        let list = words(&["solo"]);
        for _ in 0..10 {
            assert_eq!(directory_name(&list, 1, 0, &mut rng), "solo_1_0");
        }
    }

    #[test]
    fn test_siblings_unique_with_colliding_words() {
        let mut rng = StdRng::seed_from_u64(11);
        let list = words(&["same"]);
        let names: HashSet<String> = (0..8)
            .map(|i| directory_name(&list, 1, i, &mut rng))
            .collect();
        assert_eq!(names.len(), 8);
    }
}
