//! Mutation driver: runs the stages for one keyword at a time

use std::time::Instant;

use super::sink::{CountingSink, LineSink};
use super::{case, estimator, numbering, padding, substitution, years};
use crate::error::Result;
use crate::types::{Keyword, MutationConfig, SizeEstimate};

/// Mutation engine bound to one validated configuration
#[derive(Debug, Clone)]
pub struct MutationEngine {
    config: MutationConfig,
}

impl MutationEngine {
    /// Validate and normalize `config`; fails fast on broken invariants
    pub fn new(config: MutationConfig) -> Result<Self> {
        Ok(Self {
            config: config.normalized()?,
        })
    }

    /// The normalized configuration in use
    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Exact lines and bytes [`generate`](Self::generate) will write for `keyword`
    pub fn estimate(&self, keyword: &Keyword) -> Result<SizeEstimate> {
        estimator::estimate(keyword, &self.config)
    }

    /// Combined estimate for a batch of keywords
    pub fn estimate_all(&self, keywords: &[Keyword]) -> Result<SizeEstimate> {
        keywords.iter().try_fold(SizeEstimate::default(), |total, keyword| {
            Ok(total + self.estimate(keyword)?)
        })
    }

    /// Run every stage for `keyword`, writing each mutation to `sink`
    ///
    /// Returns the number of lines written. All per-keyword state is dropped
    /// on return. The sink is not flushed here.
    pub fn generate(&self, keyword: &Keyword, sink: &mut dyn LineSink) -> Result<u64> {
        let start = Instant::now();
        let base = keyword.base();
        let mut sink = CountingSink::new(sink);

        let set = case::seed(&base, &mut sink)?;
        tracing::debug!(keyword = %keyword, mutations = set.len(), "Case permutations produced");

        let positions = substitution::transformable_positions(&base, &self.config);
        let set = substitution::apply(set, &positions, &mut sink)?;
        tracing::debug!(
            keyword = %keyword,
            transformable = positions.len(),
            mutations = set.len(),
            "Substitutions applied"
        );

        if let Some(level) = self.config.append_numbering {
            let n = numbering::apply(&set, level, self.config.numbering_limit, &mut sink)?;
            tracing::debug!(keyword = %keyword, level = level, lines = n, "Numbering appended");
        }

        let set = if self.config.years.is_empty() {
            set
        } else {
            let set = years::apply(set, &self.config.years, &self.config.year_separators, &mut sink)?;
            tracing::debug!(keyword = %keyword, mutations = set.len(), "Years appended");
            set
        };

        if self.config.padding_enabled() {
            padding::apply(&set, &self.config, &mut sink)?;
        }

        let measured = sink.measured();
        tracing::info!(
            keyword = %keyword,
            lines = measured.count,
            bytes = measured.size_bytes,
            duration_ms = %start.elapsed().as_millis(),
            "Keyword mutation completed"
        );

        Ok(measured.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PsudohashError;
    use crate::mutate::MemorySink;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = MutationConfig {
            append_numbering: Some(0),
            ..Default::default()
        };
        assert!(matches!(MutationEngine::new(config), Err(PsudohashError::Config { .. })));
    }

    #[test]
    fn test_generate_matches_estimate_for_defaults() {
        let engine = MutationEngine::new(MutationConfig::default()).unwrap();
        let keyword = Keyword::new("Secret").unwrap();

        let mut sink = CountingSink::new(MemorySink::new());
        let written = engine.generate(&keyword, &mut sink).unwrap();

        assert_eq!(sink.measured(), engine.estimate(&keyword).unwrap());
        assert_eq!(written, sink.measured().count);
    }

    #[test]
    fn test_keywords_do_not_leak_state() {
        let engine = MutationEngine::new(MutationConfig {
            years: vec!["2020".to_string()],
            ..Default::default()
        })
        .unwrap();
        let keyword = Keyword::new("ab").unwrap();

        let mut first = MemorySink::new();
        engine.generate(&keyword, &mut first).unwrap();
        let mut second = MemorySink::new();
        engine.generate(&keyword, &mut second).unwrap();
        assert_eq!(first.lines(), second.lines());
    }

    #[test]
    fn test_estimate_all_sums() {
        let engine = MutationEngine::new(MutationConfig::default()).unwrap();
        let a = Keyword::new("a").unwrap();
        let b = Keyword::new("bob").unwrap();
        let total = engine.estimate_all(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(total, engine.estimate(&a).unwrap() + engine.estimate(&b).unwrap());
    }
}
