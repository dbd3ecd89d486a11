//! Case permutation stage

use super::{LineSink, MutationSet};
use crate::error::Result;

/// Every upper/lower casing of the ASCII letters in `base`
///
/// Other characters never branch, so a word with `a` ASCII letters yields
/// exactly `2^a` distinct strings. The all-lowercase form comes first.
pub fn permute(base: &str) -> Vec<String> {
    let mut variants = vec![String::with_capacity(base.len())];

    for c in base.chars() {
        if c.is_ascii_alphabetic() {
            let lower = c.to_ascii_lowercase();
            let upper = c.to_ascii_uppercase();
            let mut next = Vec::with_capacity(variants.len() * 2);
            for prefix in variants {
                let mut with_upper = prefix.clone();
                with_upper.push(upper);
                let mut with_lower = prefix;
                with_lower.push(lower);
                next.push(with_lower);
                next.push(with_upper);
            }
            variants = next;
        } else {
            for prefix in variants.iter_mut() {
                prefix.push(c);
            }
        }
    }

    variants
}

/// Seed a keyword's mutation set with its case variants, writing each once
pub fn seed(base: &str, sink: &mut dyn LineSink) -> Result<MutationSet> {
    let mut set = MutationSet::new();
    for variant in permute(base) {
        sink.write_line(&variant)?;
        set.insert(variant);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutate::MemorySink;

    #[test]
    fn test_go2_has_four_variants() {
        let mut variants = permute("go2");
        variants.sort();
        assert_eq!(variants, vec!["GO2", "Go2", "gO2", "go2"]);
    }

    #[test]
    fn test_cardinality_is_power_of_two() {
        assert_eq!(permute("admin").len(), 32);
        assert_eq!(permute("p@ss-w0rd").len(), 1 << 6);
        assert_eq!(permute("123!").len(), 1);
    }

    #[test]
    fn test_non_ascii_letters_do_not_branch() {
        let variants = permute("çá");
        assert_eq!(variants, vec!["çá"]);
    }

    #[test]
    fn test_seed_writes_each_variant_once() {
        let mut sink = MemorySink::new();
        let set = seed("ab", &mut sink).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(sink.lines(), &["ab", "aB", "Ab", "AB"]);
    }
}
