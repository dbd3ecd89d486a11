//! Numbering stage: zero-padded counters appended to each mutation

use super::{LineSink, MutationSet};
use crate::error::Result;

/// Decimal `k` left-padded with zeros to `width` (never truncated)
pub fn zero_pad(k: u32, width: usize) -> String {
    format!("{:0width$}", k, width = width)
}

/// Number of decimal digits of `k`
pub fn digits(k: u32) -> u32 {
    k.checked_ilog10().map_or(1, |d| d + 1)
}

/// Padded counters in emission order (level by level, counter by counter)
///
/// A counter is emitted at level 1 and then only at levels wider than its
/// own digit count; narrower levels would repeat its last emitted string.
/// Strings are produced lazily, one per step.
pub fn suffixes(level: u32, limit: u32) -> impl Iterator<Item = String> {
    (1..=level).flat_map(move |width| {
        (1..=limit)
            .filter(move |&k| width == 1 || width > digits(k))
            .map(move |k| zero_pad(k, width as usize))
    })
}

/// Write `w + n` and `w + "_" + n` for every mutation and padded counter
///
/// Numbered strings are output only; they do not join the mutation set.
pub fn apply(set: &MutationSet, level: u32, limit: u32, sink: &mut dyn LineSink) -> Result<u64> {
    let mut written = 0;

    for word in set.iter() {
        for n in suffixes(level, limit) {
            sink.write_line(&format!("{}{}", word, n))?;
            sink.write_line(&format!("{}_{}", word, n))?;
            written += 2;
        }
    }

    Ok(written)
}
