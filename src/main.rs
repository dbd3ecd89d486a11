//! psudohash - keyword mutation wordlist generator
//!
//! Builds password-candidate wordlists from keywords, shows the exact output
//! size up front and asks for consent before writing anything.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use psudohash::{
    config::{load_paddings, parse_keywords, parse_paddings, parse_years},
    CountingSink, FileSink, Keyword, LineSink, MutationConfig, MutationEngine, PsudohashError,
    Result, RunSummary, SizeEstimate,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "psudohash")]
#[command(version)]
#[command(about = "Keyword mutation wordlist generator")]
#[command(after_help = "Output syntax:\n    <permutation> [numbering] ([separator] [year]) [common_paddings]\n\n\
Examples:\n    psudohash -w example --cpa\n    psudohash -w test,example --cpa -a 3 -y 1990-2022")]
struct Cli {
    /// Comma separated keywords to mutate
    #[arg(short, long, value_name = "WORDS")]
    words: String,

    /// Output wordlist file
    #[arg(short, long, default_value = "outfile.txt", value_name = "FILENAME")]
    output: PathBuf,

    /// Single, comma separated or range of years (2022 | 1990,2017 | 1990-2000)
    #[arg(short, long, value_name = "YEARS")]
    years: Option<String>,

    /// Append numbering; LEVEL is the minimum digit width to zero-pad to
    #[arg(short = 'a', long, value_name = "LEVEL")]
    append_numbering: Option<u32>,

    /// Max counter value for numbering (default 50)
    #[arg(short = 'n', long, value_name = "LIMIT", requires = "append_numbering")]
    numbering_limit: Option<u32>,

    /// Comma separated values added to the common paddings
    #[arg(short = 'p', long, value_name = "VALUES")]
    append_padding: Option<String>,

    /// Prepend common paddings to each mutation
    #[arg(long = "cpb")]
    common_paddings_before: bool,

    /// Append common paddings to each mutation
    #[arg(long = "cpa")]
    common_paddings_after: bool,

    /// Use only the values given with --append-padding
    #[arg(long = "cpo")]
    custom_paddings_only: bool,

    /// Skip character substitutions (such as 'a' -> '4')
    #[arg(long)]
    no_transformations: bool,

    /// Replace the built-in common paddings with a file (one per line)
    #[arg(long, value_name = "FILE")]
    padding_file: Option<PathBuf>,

    /// JSON config file (defaults to $PSUDOHASH_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON run summary
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Do not ask for consent before generating
    #[arg(long)]
    yes: bool,

    /// Only print errors and the final line
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Initialize the library
    if let Err(e) = psudohash::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }
}

/// Main workflow: configure, estimate, confirm, generate
fn run(cli: &Cli) -> Result<()> {
    if !cli.quiet {
        println!("🔑 psudohash - keyword mutation wordlist generator");
        println!("═══════════════════════════════════════════════════");
        println!();
    }

    let keywords = parse_keywords(&cli.words)?;
    if keywords.is_empty() {
        return Err(PsudohashError::cli("No keywords provided, nothing to do."));
    }

    let engine = MutationEngine::new(build_config(cli)?)?;

    if !cli.quiet {
        println!("📐 Calculating output length and size...");
    }
    let estimate = engine.estimate_all(&keywords)?;

    if !cli.yes {
        confirm_or_abort(ask_for_consent(estimate.count, &estimate.human_size())?)?;
    }

    let mut sink = FileSink::create(&cli.output)?;
    let mut summary = RunSummary::new(keywords.clone(), cli.output.clone(), estimate);

    for keyword in &keywords {
        let written = mutate_keyword(&engine, keyword, &mut sink, cli.quiet)?;
        summary.record(written);
    }
    sink.flush()?;
    summary.finish();

    if !summary.matches_estimate() {
        tracing::warn!(
            estimated = summary.estimated.count,
            written = summary.written.count,
            "Written output differs from estimate"
        );
    }

    if let Some(path) = &cli.summary {
        summary.save(path)?;
    }

    println!();
    println!(
        "✅ Completed! {} words saved in {} ({:.2}s)",
        summary.written.count,
        cli.output.display(),
        summary.elapsed().num_milliseconds() as f64 / 1000.0
    );

    Ok(())
}

/// Merge config file, padding file and CLI flags
fn build_config(cli: &Cli) -> Result<MutationConfig> {
    let mut config = match cli.config.clone().or_else(MutationConfig::env_path) {
        Some(path) => MutationConfig::load(&path)?,
        None => MutationConfig::default(),
    };

    if cli.no_transformations {
        config.transformations.clear();
    }
    if let Some(years) = &cli.years {
        config.years = parse_years(years)?;
    }
    if let Some(level) = cli.append_numbering {
        config.append_numbering = Some(level);
    }
    if let Some(limit) = cli.numbering_limit {
        config.numbering_limit = limit;
    }
    if let Some(path) = &cli.padding_file {
        config.common_paddings = load_paddings(path)?;
    }
    if let Some(values) = &cli.append_padding {
        config.custom_paddings.extend(parse_paddings(values));
    }
    config.common_paddings_before |= cli.common_paddings_before;
    config.common_paddings_after |= cli.common_paddings_after;
    config.custom_paddings_only |= cli.custom_paddings_only;

    Ok(config)
}

fn ask_for_consent(count: u64, size: &str) -> Result<bool> {
    let message = format!(
        "⚠️  This operation will produce {} words, {}. Are you sure you want to proceed?",
        count, size
    );
    inquire::Confirm::new(&message)
        .with_default(false)
        .prompt()
        .map_err(|e| PsudohashError::cli(format!("Consent prompt failed: {} (use --yes to skip it)", e)))
}

/// A declined prompt ends the run with an error so nothing counts as generated
fn confirm_or_abort(accepted: bool) -> Result<()> {
    if accepted {
        Ok(())
    } else {
        Err(PsudohashError::cli("Consent declined, nothing was generated. Aborting."))
    }
}

/// Generate one keyword with a progress bar sized by its estimate
fn mutate_keyword(
    engine: &MutationEngine,
    keyword: &Keyword,
    sink: &mut FileSink,
    quiet: bool,
) -> Result<SizeEstimate> {
    let expected = engine.estimate(keyword)?;

    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        println!("🔧 Mutating keyword: {}", keyword);
        let bar = ProgressBar::new(expected.count);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {eta}")
        {
            bar.set_style(style.progress_chars("█▓▒░-"));
        }
        bar
    };

    let written = generate_with_progress(engine, keyword, sink, &bar)?;
    bar.finish_and_clear();

    if !quiet {
        println!("   └─ {} words, {}", written.count, written.human_size());
    }
    Ok(written)
}

/// Run one keyword through `sink`, leaving `bar` at the number of lines written
fn generate_with_progress(
    engine: &MutationEngine,
    keyword: &Keyword,
    sink: &mut dyn LineSink,
    bar: &ProgressBar,
) -> Result<SizeEstimate> {
    let mut counting = CountingSink::new(ProgressSink::new(sink, bar));
    engine.generate(keyword, &mut counting)?;
    counting.flush()?;
    Ok(counting.measured())
}

/// Sink adapter advancing a progress bar in batches
struct ProgressSink<'a> {
    inner: &'a mut dyn LineSink,
    bar: &'a ProgressBar,
    pending: u64,
}

impl<'a> ProgressSink<'a> {
    const BATCH: u64 = 4096;

    fn new(inner: &'a mut dyn LineSink, bar: &'a ProgressBar) -> Self {
        Self { inner, bar, pending: 0 }
    }
}

impl LineSink for ProgressSink<'_> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner.write_line(line)?;
        self.pending += 1;
        if self.pending == Self::BATCH {
            self.bar.inc(self.pending);
            self.pending = 0;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.bar.inc(self.pending);
        self.pending = 0;
        self.inner.flush()
    }
}
