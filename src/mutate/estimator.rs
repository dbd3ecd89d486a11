//! Output size estimator
//!
//! Predicts the exact number of lines and bytes the pipeline writes for a
//! keyword without building any mutation. The mutation set is tracked only
//! as a `(count, byte total)` pair; every stage's contribution is derived
//! from that pair in closed form.
//!
//! Byte sizes count each line's UTF-8 length plus one byte for `\n`.

use std::collections::HashSet;

use super::numbering::digits;
use crate::error::{PsudohashError, Result};
use crate::types::{Keyword, MutationConfig, SizeEstimate};

/// Aggregate shape of a mutation set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetModel {
    /// Number of distinct mutations
    pub count: u64,
    /// Sum of their UTF-8 lengths (no terminators)
    pub bytes: u64,
}

impl SetModel {
    /// Lines written when every mutation of the set is output once
    fn as_lines(&self) -> Result<SizeEstimate> {
        Ok(SizeEstimate::new(self.count, add(self.bytes, self.count)?))
    }
}

/// Estimate the output of the full pipeline for one keyword
///
/// `config` must already be normalized (see [`MutationConfig::normalized`]).
pub fn estimate(keyword: &Keyword, config: &MutationConfig) -> Result<SizeEstimate> {
    let base = keyword.base();

    let mut set = base_model(&base, config)?;
    let mut total = set.as_lines()?;

    if let Some(level) = config.append_numbering {
        total = sum(total, numbering(set, level, config.numbering_limit)?)?;
    }

    if !config.years.is_empty() {
        let (lines, grown) = years(set, &config.years, &config.year_separators)?;
        total = sum(total, lines)?;
        set = grown;
    }

    if config.padding_enabled() {
        total = sum(total, padding(set, config)?)?;
    }

    Ok(total)
}

/// Case permutations and substitutions as one product over char positions
///
/// Each position contributes its distinct choices: `{c}` for non letters,
/// `{c, C}` for ASCII letters, plus configured glyphs for transformable ones.
pub fn base_model(base: &str, config: &MutationConfig) -> Result<SetModel> {
    let mut model = SetModel { count: 1, bytes: 0 };

    for c in base.chars() {
        let mut choices = vec![c];
        if c.is_ascii_alphabetic() {
            choices.push(c.to_ascii_uppercase());
            choices.push(c.to_ascii_lowercase());
            if let Some(glyphs) = config.glyphs_for(c) {
                choices.extend_from_slice(glyphs);
            }
        }
        let distinct: HashSet<char> = choices.into_iter().collect();

        let n = distinct.len() as u64;
        let b: u64 = distinct.iter().map(|ch| ch.len_utf8() as u64).sum();

        // bytes' = bytes * n + count * b
        model = SetModel {
            bytes: add(mul(model.bytes, n)?, mul(model.count, b)?)?,
            count: mul(model.count, n)?,
        };
    }

    Ok(model)
}

/// Numbering lines, one digit class at a time
///
/// A counter with `d` digits emits at widths `d` and `d+1..=level`, so with
/// `m = level - d` extra widths its width sum is `(m + 1)·d + m(m + 1)/2`.
/// Every emission is a pair `w + n` and `w + "_" + n`.
pub fn numbering(set: SetModel, level: u32, limit: u32) -> Result<SizeEstimate> {
    let mut total = SizeEstimate::default();
    let mut low: u64 = 1;

    for d in 1..=digits(limit) {
        let high = (low * 10 - 1).min(limit as u64);
        let counters = high - low + 1;
        let extra = level.saturating_sub(d) as u64;
        let emissions = extra + 1;
        let width_sum = add(mul(emissions, d as u64)?, triangular(extra)?)?;

        // per counter: each emission costs 2S + N(2w + 3) bytes
        let lines = mul(mul(set.count, 2)?, emissions)?;
        let bytes = add(
            mul(add(mul(set.bytes, 2)?, mul(set.count, 3)?)?, emissions)?,
            mul(mul(set.count, 2)?, width_sum)?,
        )?;
        total = sum(total, SizeEstimate::new(mul(lines, counters)?, mul(bytes, counters)?))?;

        low *= 10;
    }

    Ok(total)
}

/// `m(m + 1)/2` without overflowing on the intermediate product
fn triangular(m: u64) -> Result<u64> {
    if m % 2 == 0 {
        mul(m / 2, m + 1)
    } else {
        mul(m, (m + 1) / 2)
    }
}

/// Year lines plus the grown set they leave behind
///
/// Every `(year, separator, form)` writes one line per mutation. The set only
/// grows by the distinct suffixes, since equal suffixes give equal strings.
pub fn years(set: SetModel, years: &[String], separators: &[String]) -> Result<(SizeEstimate, SetModel)> {
    let mut lines = SizeEstimate::default();
    let mut suffixes: HashSet<String> = HashSet::new();

    for year in years {
        for sep in separators {
            for form in [year.as_str(), &year[2..]] {
                let suffix = format!("{}{}", sep, form);
                let bytes = add(set.bytes, mul(set.count, suffix.len() as u64 + 1)?)?;
                lines = sum(lines, SizeEstimate::new(set.count, bytes))?;
                suffixes.insert(suffix);
            }
        }
    }

    let distinct = suffixes.len() as u64;
    let suffix_bytes: u64 = suffixes.iter().map(|s| s.len() as u64).sum();
    let grown = SetModel {
        count: add(set.count, mul(set.count, distinct)?)?,
        bytes: add(
            add(set.bytes, mul(set.bytes, distinct)?)?,
            mul(set.count, suffix_bytes)?,
        )?,
    };

    Ok((lines, grown))
}

/// Padding lines for each enabled side; both sides scan the same set
pub fn padding(set: SetModel, config: &MutationConfig) -> Result<SizeEstimate> {
    let tokens = config.padding_vocabulary();
    let mut total = SizeEstimate::default();
    if config.common_paddings_after {
        total = sum(total, padded_side(set, &tokens, |t| t.starts_with('_'))?)?;
    }
    if config.common_paddings_before {
        total = sum(total, padded_side(set, &tokens, |t| t.ends_with('_'))?)?;
    }
    Ok(total)
}

/// One side: the joined form always, the `_`-joined form unless skipped
fn padded_side(set: SetModel, tokens: &[String], skips_underscore: impl Fn(&str) -> bool) -> Result<SizeEstimate> {
    let mut total = SizeEstimate::default();
    for token in tokens {
        let len = token.len() as u64;
        let joined = add(set.bytes, mul(set.count, len + 1)?)?;
        total = sum(total, SizeEstimate::new(set.count, joined))?;
        if !skips_underscore(token.as_str()) {
            let underscored = add(set.bytes, mul(set.count, len + 2)?)?;
            total = sum(total, SizeEstimate::new(set.count, underscored))?;
        }
    }
    Ok(total)
}

fn overflow() -> PsudohashError {
    PsudohashError::config("Estimated output size overflows 64-bit counters; reduce the configuration")
}

fn add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or_else(overflow)
}

fn mul(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b).ok_or_else(overflow)
}

fn sum(a: SizeEstimate, b: SizeEstimate) -> Result<SizeEstimate> {
    Ok(SizeEstimate::new(add(a.count, b.count)?, add(a.size_bytes, b.size_bytes)?))
}
