//! Year stage: full and short years behind each separator

use super::{LineSink, MutationSet};
use crate::error::Result;

/// The two forms of a year: `1999` and `99`
pub fn year_forms(year: &str) -> [&str; 2] {
    [year, &year[2..]]
}

/// Append every `separator + year` form to the mutations present on entry
///
/// All `2 × years × separators` lines are written per mutation; the new
/// strings then join the set, where coinciding short forms merge.
pub fn apply(
    mut set: MutationSet,
    years: &[String],
    separators: &[String],
    sink: &mut dyn LineSink,
) -> Result<MutationSet> {
    let snapshot = set.len();

    for index in 0..snapshot {
        let word = match set.get(index) {
            Some(w) => w.to_string(),
            None => break,
        };
        for year in years {
            for sep in separators {
                for form in year_forms(year) {
                    let mutation = format!("{}{}{}", word, sep, form);
                    sink.write_line(&mutation)?;
                    set.insert(mutation);
                }
            }
        }
    }

    Ok(set)
}
