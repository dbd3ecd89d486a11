//! Configuration layer: built-in defaults, JSON config files and input parsing

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{PsudohashError, Result};
use crate::validation_error;
use crate::types::{is_valid_year, Keyword, MutationConfig, TransformationTable, MAX_YEAR, MIN_YEAR};

/// Environment variable naming a default config file
pub const CONFIG_ENV_VAR: &str = "PSUDOHASH_CONFIG";

/// Default character-to-symbol/number substitutions
pub const DEFAULT_TRANSFORMATIONS: &[(char, &[char])] = &[
    ('a', &['@', '4']),
    ('b', &['8']),
    ('e', &['3']),
    ('g', &['9', '6']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['7']),
];

/// Separators placed between a mutation and an appended year
pub const DEFAULT_YEAR_SEPARATORS: &[&str] = &["", "_", "-", "@"];

/// Common padding values seen in leaked password corpora
pub const COMMON_PADDINGS: &[&str] = &[
    // Digit runs
    "1", "12", "123", "1234", "12345", "123456", "0", "00", "000", "01",
    "007", "11", "111", "69", "77", "88", "99", "321", "4321",
    // Symbols
    "!", "!!", "!!!", "@", "#", "$", "*", "?", ".", "!@#", "!@#$",
    // Digits + symbols
    "1!", "123!", "1234!", "!1", "@123", "#1",
    // Words
    "admin", "_admin", "root", "pass", "_pass", "pwd", "test", "_test",
    "dev", "_dev", "user", "_user", "love", "qwerty",
];

/// Build the default transformation table
pub fn default_transformations() -> TransformationTable {
    DEFAULT_TRANSFORMATIONS
        .iter()
        .map(|(letter, glyphs)| (*letter, glyphs.to_vec()))
        .collect::<BTreeMap<_, _>>()
}

pub fn default_year_separators() -> Vec<String> {
    DEFAULT_YEAR_SEPARATORS.iter().map(|s| s.to_string()).collect()
}

pub fn default_common_paddings() -> Vec<String> {
    COMMON_PADDINGS.iter().map(|s| s.to_string()).collect()
}

impl MutationConfig {
    /// Load a config file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PsudohashError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            PsudohashError::parse(e.to_string(), Some(content))
        })
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PsudohashError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            PsudohashError::internal(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            PsudohashError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }

    /// Config file named by `PSUDOHASH_CONFIG`, if set
    pub fn env_path() -> Option<PathBuf> {
        std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }
}

/// Parse comma separated keywords, skipping empty entries
pub fn parse_keywords(input: &str) -> Result<Vec<Keyword>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(Keyword::new)
        .collect()
}

/// Parse a year spec: `2022`, `1990,2017,2022` or an inclusive range `1990-2000`
pub fn parse_years(input: &str) -> Result<Vec<String>> {
    let input = input.trim();
    let range = Regex::new(r"^(\d{4})-(\d{4})$")
        .map_err(|e| PsudohashError::internal(e.to_string()))?;

    if let Some(caps) = range.captures(input) {
        let start = &caps[1];
        let end = &caps[2];
        if !is_valid_year(start) || !is_valid_year(end) {
            return Err(illegal_years());
        }
        let (start, end): (u32, u32) = match (start.parse(), end.parse()) {
            (Ok(s), Ok(e)) => (s, e),
            _ => return Err(illegal_years()),
        };
        if start >= end {
            return Err(validation_error!(
                "Year range start {} must be lower than end {}",
                start, end
            ));
        }
        return Ok((start..=end).map(|y| y.to_string()).collect());
    }

    let years: Vec<String> = input.split(',').map(|y| y.trim().to_string()).collect();
    if years.iter().any(|y| !is_valid_year(y)) {
        return Err(illegal_years());
    }
    Ok(years)
}

fn illegal_years() -> PsudohashError {
    validation_error!(
        "Illegal year(s) input. Acceptable years range: {} - {}",
        MIN_YEAR, MAX_YEAR
    )
}

/// Parse comma separated custom padding tokens
pub fn parse_paddings(input: &str) -> Vec<String> {
    input
        .split(',')
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Load padding tokens from a file (one per line, blank lines skipped)
pub fn load_paddings(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PsudohashError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = default_transformations();
        assert_eq!(table.get(&'a'), Some(&vec!['@', '4']));
        assert_eq!(table.len(), 8);
        assert!(MutationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_keywords() {
        let words = parse_keywords("admin, test,,Root ").unwrap();
        let words: Vec<_> = words.iter().map(|k| k.as_str()).collect();
        assert_eq!(words, vec!["admin", "test", "Root"]);

        assert!(parse_keywords("admin,2024").is_err());
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("2022").unwrap(), vec!["2022"]);
        assert_eq!(parse_years("1990, 2017").unwrap(), vec!["1990", "2017"]);
        assert_eq!(parse_years("1998-2001").unwrap(), vec!["1998", "1999", "2000", "2001"]);
        assert!(parse_years("2001-1998").is_err());
        assert!(parse_years("999").is_err());
        assert!(parse_years("1990-3300").is_err());
        assert!(parse_years("1990,").is_err());
    }

    #[test]
    fn test_parse_paddings() {
        assert_eq!(parse_paddings("!,_admin,,"), vec!["!", "_admin"]);
    }

    #[test]
    fn test_config_file_round_trip_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "years": ["2020"], "append_numbering": 2 }"#).unwrap();

        let config = MutationConfig::load(&path).unwrap();
        assert_eq!(config.years, vec!["2020"]);
        assert_eq!(config.append_numbering, Some(2));
        assert_eq!(config.numbering_limit, 50);
        assert_eq!(config.transformations, default_transformations());

        let saved = dir.path().join("nested").join("saved.json");
        config.save(&saved).unwrap();
        assert_eq!(MutationConfig::load(&saved).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            MutationConfig::load(&path),
            Err(PsudohashError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_paddings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paddings.txt");
        std::fs::write(&path, "123\n\n !\n_admin\n").unwrap();
        assert_eq!(load_paddings(&path).unwrap(), vec!["123", "!", "_admin"]);
    }
}
