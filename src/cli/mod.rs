//! Command-line interface for ref-loader.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **load**: Load a reference FASTA and summarize the chromosomes kept
//! - **fetch**: Print the sequence (or a slice) of one chromosome
//! - **extract**: Write each loaded chromosome to its own FASTA file
//!
//! ## Usage
//!
//! ```text
//! # Summarize chr1..chr22, chrX and chrY
//! ref-loader load hg38.fa
//!
//! # JSON output with MD5 checksums
//! ref-loader load hg38.fa --md5 --format json
//!
//! # Bases 10000..10100 of chr7
//! ref-loader fetch hg38.fa chr7 --start 10000 --end 10100
//!
//! # One normalized FASTA per chromosome
//! ref-loader extract hg38.fa --output chromosomes/
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::core::filter::ChromosomeFilter;
use crate::core::index::ReferenceIndex;
use crate::parsing::fasta::{LoaderConfig, ReferenceLoader, DEFAULT_MAX_SEQUENCE_LENGTH};

pub mod extract;
pub mod fetch;
pub mod load;

#[derive(Parser)]
#[command(name = "ref-loader")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Load reference genome chromosomes from FASTA")]
#[command(
    long_about = "ref-loader reads a reference genome FASTA in a single pass and keeps the primary chromosomes in memory.\n\nSequences are uppercased and stored per chromosome. By default only chr1..chr22, chrX and chrY are kept; use --chromosomes, --chromosomes-file or --all-chromosomes to change that."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a reference and summarize its chromosomes
    Load(load::LoadArgs),

    /// Print the sequence of one chromosome
    Fetch(fetch::FetchArgs),

    /// Write each chromosome to its own FASTA file
    Extract(extract::ExtractArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Options shared by every command that loads a reference
#[derive(Args)]
pub struct ReferenceArgs {
    /// Reference FASTA file (uncompressed)
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Chromosomes to load (comma-separated or repeated), e.g. 'chr1,chrM'
    ///
    /// When no selection is given, chr1..chr22, chrX and chrY are loaded.
    #[arg(
        long,
        num_args = 1..,
        value_delimiter = ',',
        conflicts_with_all = ["chromosomes_file", "all_chromosomes"]
    )]
    pub chromosomes: Option<Vec<String>>,

    /// File with chromosome names to load (one per line)
    #[arg(long, conflicts_with = "all_chromosomes")]
    pub chromosomes_file: Option<PathBuf>,

    /// Load every record in the file
    #[arg(long)]
    pub all_chromosomes: bool,

    /// Maximum number of bases in a single chromosome
    #[arg(long, default_value_t = DEFAULT_MAX_SEQUENCE_LENGTH)]
    pub max_length: usize,
}

impl ReferenceArgs {
    /// Build the loader configuration from the command-line options
    pub fn loader_config(&self) -> anyhow::Result<LoaderConfig> {
        let filter = if self.all_chromosomes {
            ChromosomeFilter::All
        } else if let Some(names) = &self.chromosomes {
            ChromosomeFilter::allow_list(names.iter().cloned())
        } else if let Some(path) = &self.chromosomes_file {
            ChromosomeFilter::allow_list(read_chromosome_names(path)?)
        } else {
            ChromosomeFilter::Canonical
        };

        Ok(LoaderConfig::default()
            .with_filter(filter)
            .with_max_sequence_length(self.max_length))
    }

    /// Load the reference with the configured filter
    pub fn load(&self) -> anyhow::Result<ReferenceIndex> {
        let config = self.loader_config()?;
        let index = ReferenceLoader::new(config)
            .load(&self.reference)
            .with_context(|| format!("loading {}", self.reference.display()))?;
        Ok(index)
    }
}

/// Read chromosome names, one per line. Blank lines and `#` comments are skipped.
fn read_chromosome_names(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading chromosome list {}", path.display()))?;

    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        anyhow::bail!("No chromosome names found in {}", path.display());
    }
    Ok(names)
}
