use clap::Args;

use crate::cli::{OutputFormat, ReferenceArgs};
use crate::core::index::ReferenceIndex;

/// Bases per line when printing FASTA
const LINE_WIDTH: usize = 60;

#[derive(Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Chromosome to print, e.g. 'chr7'
    #[arg(required = true)]
    pub chromosome: String,

    /// 0-based start position (inclusive)
    #[arg(long, default_value = "0")]
    pub start: usize,

    /// 0-based end position (exclusive, defaults to the chromosome end)
    #[arg(long)]
    pub end: Option<usize>,
}

/// Slice `[start, end)` of a loaded chromosome
pub fn fetch<'a>(
    index: &'a ReferenceIndex,
    chromosome: &str,
    start: usize,
    end: Option<usize>,
) -> anyhow::Result<&'a [u8]> {
    let sequence = index.sequence_for(chromosome).ok_or_else(|| {
        anyhow::anyhow!(
            "Chromosome '{chromosome}' not loaded (available: {})",
            index.chromosomes().join(", ")
        )
    })?;

    let end = end.unwrap_or(sequence.len());
    sequence.subsequence(start, end).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid range {start}-{end} for '{chromosome}' of length {}",
            sequence.len()
        )
    })
}

pub fn run(args: FetchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let index = args.reference.load()?;
    let bases = fetch(&index, &args.chromosome, args.start, args.end)?;
    let end = args.start + bases.len();

    if verbose {
        eprintln!("Fetched {} bases from {}", bases.len(), args.chromosome);
    }

    let text = String::from_utf8_lossy(bases);
    match format {
        OutputFormat::Text => {
            println!(">{}:{}-{}", args.chromosome, args.start, end);
            for line in bases.chunks(LINE_WIDTH) {
                println!("{}", String::from_utf8_lossy(line));
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "chromosome": args.chromosome,
                "start": args.start,
                "end": end,
                "sequence": text,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("{}\t{}\t{}\t{}", args.chromosome, args.start, end, text);
        }
    }

    Ok(())
}
