//! psudohash - keyword mutation wordlist generator
//!
//! Expands keywords into password candidates (case permutations, character
//! substitutions, numbering, years and common paddings) and predicts the
//! exact size of the output before generating it.

pub mod config;
pub mod error;
pub mod mutate;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{PsudohashError, Result};
pub use types::{Keyword, MutationConfig, SizeEstimate, TransformationTable};

// Re-export main functionality
pub use mutate::{CountingSink, FileSink, LineSink, MemorySink, MutationEngine, MutationSet};
pub use report::RunSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

/// Predict lines and bytes that [`generate`] writes for `keyword`
pub fn estimate(keyword: &Keyword, config: &MutationConfig) -> Result<SizeEstimate> {
    MutationEngine::new(config.clone())?.estimate(keyword)
}

/// Run the full mutation pipeline for `keyword` into `sink`
pub fn generate(keyword: &Keyword, config: &MutationConfig, sink: &mut dyn LineSink) -> Result<u64> {
    MutationEngine::new(config.clone())?.generate(keyword, sink)
}
