//! Padding stage: common tokens appended after and prepended before mutations

use super::{LineSink, MutationSet};
use crate::error::Result;
use crate::types::MutationConfig;

/// Which side of the mutation a token goes on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingSide {
    After,
    Before,
}

impl std::fmt::Display for PaddingSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaddingSide::After => write!(f, "after"),
            PaddingSide::Before => write!(f, "before"),
        }
    }
}

impl PaddingSide {
    /// Sides enabled by the config, `After` first
    pub fn enabled(config: &MutationConfig) -> Vec<PaddingSide> {
        let mut sides = Vec::with_capacity(2);
        if config.common_paddings_after {
            sides.push(PaddingSide::After);
        }
        if config.common_paddings_before {
            sides.push(PaddingSide::Before);
        }
        sides
    }

    /// Whether the underscore-joined form is skipped for `token`
    ///
    /// A token already touching the mutation with `_` would double it.
    pub fn skips_underscore(&self, token: &str) -> bool {
        match self {
            PaddingSide::After => token.starts_with('_'),
            PaddingSide::Before => token.ends_with('_'),
        }
    }

    fn join(&self, word: &str, token: &str, underscore: bool) -> String {
        let sep = if underscore { "_" } else { "" };
        match self {
            PaddingSide::After => format!("{}{}{}", word, sep, token),
            PaddingSide::Before => format!("{}{}{}", token, sep, word),
        }
    }
}

/// Pad every mutation on one side with every token
pub fn pad_side(
    set: &MutationSet,
    side: PaddingSide,
    tokens: &[String],
    sink: &mut dyn LineSink,
) -> Result<u64> {
    let mut written = 0;
    for word in set.iter() {
        for token in tokens {
            sink.write_line(&side.join(word, token, false))?;
            written += 1;
            if !side.skips_underscore(token) {
                sink.write_line(&side.join(word, token, true))?;
                written += 1;
            }
        }
    }
    Ok(written)
}

/// Run each enabled side over the same set; padded strings are output only
pub fn apply(set: &MutationSet, config: &MutationConfig, sink: &mut dyn LineSink) -> Result<u64> {
    let tokens = config.padding_vocabulary();
    let mut written = 0;
    for side in PaddingSide::enabled(config) {
        let n = pad_side(set, side, &tokens, sink)?;
        tracing::debug!(side = %side, lines = n, "Padding applied");
        written += n;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutate::MemorySink;

    fn set_of(items: &[&str]) -> MutationSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_leading_underscore_not_doubled() {
        let mut sink = MemorySink::new();
        pad_side(&set_of(&["root"]), PaddingSide::After, &tokens(&["_admin"]), &mut sink).unwrap();
        assert_eq!(sink.lines(), &["root_admin"]);
    }

    #[test]
    fn test_before_checks_trailing_underscore() {
        let mut sink = MemorySink::new();
        pad_side(&set_of(&["root"]), PaddingSide::Before, &tokens(&["adm_", "_x"]), &mut sink).unwrap();
        assert_eq!(sink.lines(), &["adm_root", "_xroot", "_x_root"]);
    }

    #[test]
    fn test_both_sides_scan_the_same_set() {
        let config = MutationConfig {
            common_paddings: Vec::new(),
            custom_paddings: tokens(&["!"]),
            custom_paddings_only: true,
            common_paddings_after: true,
            common_paddings_before: true,
            ..Default::default()
        };
        let mut sink = MemorySink::new();
        let written = apply(&set_of(&["a"]), &config, &mut sink).unwrap();
        assert_eq!(written, 4);
        assert_eq!(sink.lines(), &["a!", "a_!", "!a", "!_a"]);
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut sink = MemorySink::new();
        let written = apply(&set_of(&["a"]), &MutationConfig::default(), &mut sink).unwrap();
        assert_eq!(written, 0);
        assert!(sink.lines().is_empty());
    }
}
