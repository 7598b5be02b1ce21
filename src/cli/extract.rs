use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use noodles::fasta;

use crate::cli::{OutputFormat, ReferenceArgs};
use crate::core::sequence::ChromosomeSequence;

#[derive(Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Output directory, one `<chromosome>.fa` per loaded chromosome
    #[arg(short, long, required = true)]
    pub output: PathBuf,
}

/// Write one chromosome as a single-record FASTA file
pub fn write_chromosome(path: &Path, name: &str, sequence: &ChromosomeSequence) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = fasta::io::Writer::new(BufWriter::new(file));

    let record = fasta::Record::new(
        fasta::record::Definition::new(name, None),
        fasta::record::Sequence::from(sequence.as_bytes().to_vec()),
    );
    writer
        .write_record(&record)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// File name for a chromosome, rejecting names that would escape the output directory
fn output_path(dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        anyhow::bail!("Chromosome name '{name}' cannot be used as a file name");
    }
    Ok(dir.join(format!("{name}.fa")))
}

pub fn run(args: ExtractArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let index = args.reference.load()?;
    create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    let mut written = Vec::with_capacity(index.len());
    for (name, sequence) in index.iter() {
        let path = output_path(&args.output, name)?;
        write_chromosome(&path, name, sequence)?;
        if verbose {
            eprintln!("Wrote {name} ({} bases) to {}", sequence.len(), path.display());
        }
        written.push((name, sequence.len(), path));
    }

    match format {
        OutputFormat::Text => {
            println!(
                "Extracted {} chromosomes to {}",
                written.len(),
                args.output.display()
            );
        }
        OutputFormat::Json => {
            let files: Vec<_> = written
                .iter()
                .map(|(name, length, path)| {
                    serde_json::json!({
                        "chromosome": name,
                        "length": length,
                        "path": path.display().to_string(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
        OutputFormat::Tsv => {
            println!("chromosome\tlength\tpath");
            for (name, length, path) in &written {
                println!("{name}\t{length}\t{}", path.display());
            }
        }
    }

    Ok(())
}
