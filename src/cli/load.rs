use clap::Args;
use serde::Serialize;

use crate::cli::{OutputFormat, ReferenceArgs};
use crate::core::index::ReferenceIndex;

#[derive(Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Compute MD5 checksums of the loaded sequences
    #[arg(long)]
    pub md5: bool,
}

/// Per-chromosome line of the load summary
#[derive(Debug, Clone, Serialize)]
pub struct ChromosomeSummary {
    pub name: String,
    pub length: usize,
    pub gc_fraction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

/// Summarize every chromosome of an index, in file order
pub fn summarize(index: &ReferenceIndex, with_md5: bool) -> Vec<ChromosomeSummary> {
    index
        .iter()
        .map(|(name, seq)| ChromosomeSummary {
            name: name.to_string(),
            length: seq.len(),
            gc_fraction: seq.gc_fraction(),
            md5: with_md5.then(|| seq.md5()),
        })
        .collect()
}

pub fn run(args: LoadArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let index = args.reference.load()?;

    if verbose {
        eprintln!(
            "Loaded {} chromosomes ({} bases) from {}",
            index.len(),
            index.total_bases(),
            args.reference.reference.display()
        );
    }

    let summary = summarize(&index, args.md5);

    match format {
        OutputFormat::Text => print_text_summary(&args, &index, &summary),
        OutputFormat::Json => print_json_summary(&args, &index, &summary)?,
        OutputFormat::Tsv => print_tsv_summary(&summary, args.md5),
    }

    Ok(())
}

fn print_text_summary(args: &LoadArgs, index: &ReferenceIndex, summary: &[ChromosomeSummary]) {
    println!("Reference: {}", args.reference.reference.display());
    println!("  Chromosomes: {}", index.len());
    println!("  Total bases: {}", index.total_bases());
    println!("{}", "=".repeat(60));

    for chrom in summary {
        print!(
            "{:<8} {:>11} bases  GC {:>6.2}%",
            chrom.name,
            chrom.length,
            chrom.gc_fraction * 100.0
        );
        if let Some(md5) = &chrom.md5 {
            print!("  {md5}");
        }
        println!();
    }
}

fn print_json_summary(
    args: &LoadArgs,
    index: &ReferenceIndex,
    summary: &[ChromosomeSummary],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "reference": args.reference.reference.display().to_string(),
        "chromosome_count": index.len(),
        "total_bases": index.total_bases(),
        "chromosomes": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &[ChromosomeSummary], with_md5: bool) {
    if with_md5 {
        println!("name\tlength\tgc_fraction\tmd5");
    } else {
        println!("name\tlength\tgc_fraction");
    }
    for chrom in summary {
        print!("{}\t{}\t{:.4}", chrom.name, chrom.length, chrom.gc_fraction);
        if let Some(md5) = &chrom.md5 {
            print!("\t{md5}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::fasta::ReferenceLoader;

    #[test]
    fn test_summarize_in_file_order() {
        let index = ReferenceLoader::default()
            .load_reader(&b">chr2\nGGCC\n>chr1\nacgt\n"[..])
            .unwrap();

        let summary = summarize(&index, true);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].name, "chr2");
        assert_eq!(summary[0].length, 4);
        assert!((summary[0].gc_fraction - 1.0).abs() < f64::EPSILON);
        assert_eq!(summary[1].name, "chr1");
        assert_eq!(
            summary[1].md5.as_deref(),
            Some("f1f8f4bf413b16ad135722aa4591043e")
        );
    }

    #[test]
    fn test_summarize_without_md5() {
        let index = ReferenceLoader::default()
            .load_reader(&b">chrX\nAT\n"[..])
            .unwrap();
        let summary = summarize(&index, false);
        assert!(summary[0].md5.is_none());
        assert!(summary[0].gc_fraction.abs() < f64::EPSILON);
    }
}
