//! Core types and structures for psudohash

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::{Add, AddAssign};

use crate::config::{default_common_paddings, default_transformations, default_year_separators};
use crate::error::{PsudohashError, Result};
use crate::{config_error, validation_error};

/// Smallest year accepted by the year stage
pub const MIN_YEAR: u32 = 1000;
/// Largest year accepted by the year stage
pub const MAX_YEAR: u32 = 3200;
/// Default max counter value per numbering level
pub const DEFAULT_NUMBERING_LIMIT: u32 = 50;

/// Letter -> substitute glyphs, keyed by lowercase ASCII letter
pub type TransformationTable = BTreeMap<char, Vec<char>>;

/// Resolved mutation settings shared by the estimator and the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub transformations: TransformationTable,
    /// Digit-padding level; `None` disables the numbering stage
    pub append_numbering: Option<u32>,
    pub numbering_limit: u32,
    /// Four digit year strings; empty disables the year stage
    pub years: Vec<String>,
    pub year_separators: Vec<String>,
    /// Built-in padding vocabulary
    pub common_paddings: Vec<String>,
    /// User supplied padding tokens, added to the built-in vocabulary
    pub custom_paddings: Vec<String>,
    pub common_paddings_before: bool,
    pub common_paddings_after: bool,
    pub custom_paddings_only: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            transformations: default_transformations(),
            append_numbering: None,
            numbering_limit: DEFAULT_NUMBERING_LIMIT,
            years: Vec::new(),
            year_separators: default_year_separators(),
            common_paddings: default_common_paddings(),
            custom_paddings: Vec::new(),
            common_paddings_before: false,
            common_paddings_after: false,
            custom_paddings_only: false,
        }
    }
}

impl MutationConfig {
    /// Whether any padding direction is enabled
    pub fn padding_enabled(&self) -> bool {
        self.common_paddings_before || self.common_paddings_after
    }

    /// Padding tokens in effect, deduplicated in first-seen order
    pub fn padding_vocabulary(&self) -> Vec<String> {
        let builtin: &[String] = if self.custom_paddings_only {
            &[]
        } else {
            &self.common_paddings
        };
        dedup_ordered(builtin.iter().chain(self.custom_paddings.iter()).cloned())
    }

    /// Glyphs configured for a (case-insensitive) ASCII letter
    pub fn glyphs_for(&self, c: char) -> Option<&[char]> {
        self.transformations
            .get(&c.to_ascii_lowercase())
            .map(Vec::as_slice)
            .filter(|glyphs| !glyphs.is_empty())
    }

    /// Check invariants and return a copy with every ordered set deduplicated
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;

        let mut config = self.clone();
        for glyphs in config.transformations.values_mut() {
            *glyphs = dedup_ordered(std::mem::take(glyphs));
        }
        config.years = dedup_ordered(std::mem::take(&mut config.years));
        config.year_separators = dedup_ordered(std::mem::take(&mut config.year_separators));
        config.common_paddings = dedup_ordered(std::mem::take(&mut config.common_paddings));
        config.custom_paddings = dedup_ordered(std::mem::take(&mut config.custom_paddings));
        Ok(config)
    }

    /// Validate the configuration invariants
    pub fn validate(&self) -> Result<()> {
        self.validate_transformations()?;
        self.validate_numbering()?;
        self.validate_years()?;
        self.validate_paddings()?;
        Ok(())
    }

    fn validate_transformations(&self) -> Result<()> {
        for key in self.transformations.keys() {
            if !key.is_ascii_lowercase() {
                return Err(config_error!(
                    "Transformation key '{}' must be a lowercase ASCII letter",
                    key
                ));
            }
        }
        Ok(())
    }

    fn validate_numbering(&self) -> Result<()> {
        if self.append_numbering == Some(0) {
            return Err(PsudohashError::config("Numbering level must be > 0"));
        }
        if self.numbering_limit == 0 {
            return Err(PsudohashError::config("Numbering limit must be > 0"));
        }
        Ok(())
    }

    fn validate_years(&self) -> Result<()> {
        if self.years.is_empty() {
            return Ok(());
        }
        if self.year_separators.is_empty() {
            return Err(PsudohashError::config(
                "Years are enabled but no year separators are configured",
            ));
        }
        for year in &self.years {
            if !is_valid_year(year) {
                return Err(config_error!(
                    "Illegal year '{}'. Acceptable years range: {} - {}",
                    year, MIN_YEAR, MAX_YEAR
                ));
            }
        }
        Ok(())
    }

    fn validate_paddings(&self) -> Result<()> {
        let wants_padding = self.custom_paddings_only || !self.custom_paddings.is_empty();
        if wants_padding && !self.padding_enabled() {
            return Err(PsudohashError::config(
                "Custom paddings require paddings before or after to be enabled",
            ));
        }
        if self.custom_paddings_only && self.custom_paddings.is_empty() {
            return Err(PsudohashError::config(
                "Custom-paddings-only mode needs at least one custom padding",
            ));
        }
        if self.padding_enabled() {
            if let Some(empty) = self.padding_vocabulary().iter().find(|v| v.is_empty()) {
                return Err(config_error!("Padding tokens cannot be empty (got {:?})", empty));
            }
        }
        Ok(())
    }
}

/// A year string is exactly four ASCII digits within the accepted range
pub fn is_valid_year(year: &str) -> bool {
    year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && year
            .parse::<u32>()
            .map_or(false, |y| (MIN_YEAR..=MAX_YEAR).contains(&y))
}

fn dedup_ordered<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + std::hash::Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// A validated keyword to mutate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keyword(String);

impl Keyword {
    /// Accept a keyword; empty and purely numeric input is rejected
    pub fn new(raw: &str) -> Result<Self> {
        let word = raw.trim();
        if word.is_empty() {
            return Err(PsudohashError::validation("Keyword cannot be empty"));
        }
        if word.chars().all(char::is_numeric) {
            return Err(validation_error!("Unable to mutate digit-only keyword '{}'", word));
        }
        Ok(Self(word.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase base that every mutation starts from
    pub fn base(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Keyword {
    type Error = PsudohashError;

    fn try_from(value: String) -> Result<Self> {
        Keyword::new(&value)
    }
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        keyword.0
    }
}

/// Predicted (or measured) output volume
///
/// `size_bytes` counts every line's UTF-8 length plus one byte for its `\n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEstimate {
    pub count: u64,
    pub size_bytes: u64,
}

impl SizeEstimate {
    pub fn new(count: u64, size_bytes: u64) -> Self {
        Self { count, size_bytes }
    }

    /// Human readable size: plain bytes up to 100 000, megabytes above
    pub fn human_size(&self) -> String {
        if self.size_bytes > 100_000 {
            format!("{:.1} MB", self.size_bytes as f64 / 1_000_000.0)
        } else {
            format!("{} bytes", self.size_bytes)
        }
    }
}

impl Add for SizeEstimate {
    type Output = SizeEstimate;

    fn add(self, rhs: SizeEstimate) -> SizeEstimate {
        SizeEstimate {
            count: self.count + rhs.count,
            size_bytes: self.size_bytes + rhs.size_bytes,
        }
    }
}

impl AddAssign for SizeEstimate {
    fn add_assign(&mut self, rhs: SizeEstimate) {
        *self = *self + rhs;
    }
}
