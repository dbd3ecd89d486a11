//! Character-to-symbol/number substitution stage

use super::{LineSink, MutationSet};
use crate::error::Result;
use crate::types::MutationConfig;

/// A character position whose letter has substitute glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformableIndex {
    pub position: usize,
    pub glyphs: Vec<char>,
}

/// Positions (in chars) of `base` that the transformation table covers
pub fn transformable_positions(base: &str, config: &MutationConfig) -> Vec<TransformableIndex> {
    base.chars()
        .enumerate()
        .filter(|(_, c)| c.is_ascii_alphabetic())
        .filter_map(|(position, c)| {
            config.glyphs_for(c).map(|glyphs| TransformableIndex {
                position,
                glyphs: glyphs.to_vec(),
            })
        })
        .collect()
}

/// Expand every mutation in `set` over all glyph choices at `positions`
///
/// Each position is varied independently (original char or one of its
/// glyphs) as a cartesian product over the base mutations taken before the
/// stage starts. Only mutations new to the set are written.
pub fn apply(
    mut set: MutationSet,
    positions: &[TransformableIndex],
    sink: &mut dyn LineSink,
) -> Result<MutationSet> {
    if positions.is_empty() {
        return Ok(set);
    }

    let bases: Vec<Vec<char>> = set.iter().map(|w| w.chars().collect()).collect();

    for base in bases {
        let options: Vec<Vec<char>> = positions
            .iter()
            .map(|t| {
                let mut choices = Vec::with_capacity(t.glyphs.len() + 1);
                choices.push(base[t.position]);
                choices.extend(t.glyphs.iter().copied());
                choices
            })
            .collect();

        let mut picks = vec![0usize; positions.len()];
        let mut word = base.clone();
        loop {
            for (slot, t) in positions.iter().enumerate() {
                word[t.position] = options[slot][picks[slot]];
            }
            let candidate: String = word.iter().collect();
            if !set.contains(&candidate) {
                sink.write_line(&candidate)?;
                set.insert(candidate);
            }

            if !advance(&mut picks, &options) {
                break;
            }
        }
    }

    Ok(set)
}

/// Odometer step over the choice lists; `false` once every combination is done
fn advance(picks: &mut [usize], options: &[Vec<char>]) -> bool {
    for slot in (0..picks.len()).rev() {
        picks[slot] += 1;
        if picks[slot] < options[slot].len() {
            return true;
        }
        picks[slot] = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutate::{case, MemorySink};
    use std::collections::BTreeMap;

    fn config_with(table: &[(char, &[char])]) -> MutationConfig {
        MutationConfig {
            transformations: table
                .iter()
                .map(|(k, v)| (*k, v.to_vec()))
                .collect::<BTreeMap<_, _>>(),
            ..Default::default()
        }
    }

    #[test]
    fn test_positions() {
        let config = config_with(&[('a', &['@', '4']), ('t', &['7'])]);
        let positions = transformable_positions("cat", &config);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].position, 1);
        assert_eq!(positions[1].glyphs, vec!['7']);
    }

    #[test]
    fn test_cat_multiplicity() {
        let config = config_with(&[('a', &['@', '4'])]);
        let mut sink = MemorySink::new();
        let set = case::seed("cat", &mut sink).unwrap();
        let positions = transformable_positions("cat", &config);
        let set = apply(set, &positions, &mut sink).unwrap();

        // 8 case variants, each with 3 choices at position 1 (a/A share a slot)
        assert_eq!(set.len(), 2 * 4 * 2);
        for word in ["cat", "c@t", "c4t", "C@T", "cAt"] {
            assert!(set.contains(word), "missing {}", word);
        }
        assert_eq!(sink.lines().len(), set.len());
    }

    #[test]
    fn test_no_positions_is_noop() {
        let config = config_with(&[('z', &['2'])]);
        let mut sink = MemorySink::new();
        let set = case::seed("cat", &mut sink).unwrap();
        let written = sink.lines().len();
        let set = apply(set, &transformable_positions("cat", &config), &mut sink).unwrap();
        assert_eq!(set.len(), 8);
        assert_eq!(sink.lines().len(), written);
    }

    #[test]
    fn test_glyph_equal_to_case_form_is_merged() {
        let config = config_with(&[('a', &['A', '4'])]);
        let mut sink = MemorySink::new();
        let set = case::seed("a", &mut sink).unwrap();
        let set = apply(set, &transformable_positions("a", &config), &mut sink).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "A", "4"]);
        assert_eq!(sink.lines(), &["a", "A", "4"]);
    }
}
