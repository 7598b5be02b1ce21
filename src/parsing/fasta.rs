//! Streaming loader for reference FASTA files.
//!
//! Reads the file in a single forward pass, keeps the records accepted by a
//! [`ChromosomeFilter`], uppercases their bases and stores each one as a
//! right-sized [`ChromosomeSequence`] in a [`ReferenceIndex`].
//!
//! Only plain-text FASTA is supported. Records are not validated beyond the
//! header marker: lines are copied as-is apart from case folding and line
//! terminator removal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::filter::ChromosomeFilter;
use crate::core::index::ReferenceIndex;
use crate::core::sequence::ChromosomeSequence;

/// First byte of a FASTA header line
pub const HEADER_MARKER: u8 = b'>';

/// Initial scratch buffer size (1 MiB)
pub const DEFAULT_INITIAL_CAPACITY: usize = 1 << 20;

/// Largest record accepted by default, in bases
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 300_000_000;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot open reference file {}: {source}", path.display())]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chromosome '{chromosome}' exceeds the maximum sequence length of {capacity} bases")]
    CapacityExceeded { chromosome: String, capacity: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings for a [`ReferenceLoader`]
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Which records to keep
    pub filter: ChromosomeFilter,
    /// Scratch buffer size reserved before the first record
    pub initial_capacity: usize,
    /// Upper bound on the number of bases in a single record
    pub max_sequence_length: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            filter: ChromosomeFilter::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn with_filter(mut self, filter: ChromosomeFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_sequence_length(mut self, max: usize) -> Self {
        self.max_sequence_length = max;
        self
    }
}

/// Single-pass FASTA loader.
///
/// Owns the scratch buffer records are accumulated in. The buffer is reused
/// across records and across loads, so one loader must not be shared between
/// concurrent loads; give each thread its own.
#[derive(Debug)]
pub struct ReferenceLoader {
    config: LoaderConfig,
    scratch: Vec<u8>,
}

impl Default for ReferenceLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl ReferenceLoader {
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            scratch: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a FASTA file into a new index.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::UnreadableInput` if the file cannot be opened,
    /// `LoadError::CapacityExceeded` if an accepted record is longer than
    /// the configured maximum, or `LoadError::Io` if reading fails midway.
    pub fn load(&mut self, path: &Path) -> Result<ReferenceIndex, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::UnreadableInput {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Loading reference genome");
        self.load_reader(BufReader::new(file))
    }

    /// Load FASTA records from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::CapacityExceeded` if an accepted record is longer
    /// than the configured maximum, or `LoadError::Io` if reading fails.
    pub fn load_reader<R: BufRead>(&mut self, mut reader: R) -> Result<ReferenceIndex, LoadError> {
        let mut index = ReferenceIndex::new();
        let mut line = Vec::new();

        let mut has_line = read_line(&mut reader, &mut line)?;
        while has_line {
            if let Some(name) = header_name(&line) {
                if self.config.filter.accepts(&name) {
                    // Leaves the next header (if any) in `line`, so it is
                    // examined without reading another line.
                    has_line = self.accumulate(&mut reader, &mut line, &name)?;
                    self.commit(&mut index, name);
                    continue;
                }
                debug!(chromosome = %name, "Skipping record");
            }
            has_line = read_line(&mut reader, &mut line)?;
        }

        info!(
            chromosomes = index.len(),
            bases = index.total_bases(),
            "Finished loading reference genome"
        );
        Ok(index)
    }

    /// Read sequence lines into the scratch buffer until the next header or
    /// end of input. Returns `false` at end of input.
    fn accumulate<R: BufRead>(
        &mut self,
        reader: &mut R,
        line: &mut Vec<u8>,
        chromosome: &str,
    ) -> Result<bool, LoadError> {
        self.scratch.clear();
        if self.scratch.capacity() == 0 {
            let initial = self
                .config
                .initial_capacity
                .min(self.config.max_sequence_length);
            self.scratch.reserve_exact(initial);
        }

        loop {
            if !read_line(reader, line)? {
                return Ok(false);
            }
            if line.first() == Some(&HEADER_MARKER) {
                return Ok(true);
            }

            let needed = self.scratch.len() + line.len();
            if needed > self.config.max_sequence_length {
                return Err(LoadError::CapacityExceeded {
                    chromosome: chromosome.to_string(),
                    capacity: self.config.max_sequence_length,
                });
            }
            self.grow_to(needed);
            self.scratch.extend(line.iter().map(u8::to_ascii_uppercase));
        }
    }

    /// Make room for `needed` bases, doubling capacity but never reserving
    /// past the configured maximum.
    fn grow_to(&mut self, needed: usize) {
        let capacity = self.scratch.capacity();
        if needed <= capacity {
            return;
        }
        let target = needed
            .max(capacity.saturating_mul(2))
            .min(self.config.max_sequence_length);
        self.scratch.reserve_exact(target - self.scratch.len());
    }

    fn commit(&mut self, index: &mut ReferenceIndex, name: String) {
        let sequence = ChromosomeSequence::from_bases(&self.scratch);
        info!(chromosome = %name, bases = sequence.len(), "Extracted chromosome");
        if index.insert(name.clone(), sequence) {
            warn!(chromosome = %name, "Duplicate chromosome, replacing earlier record");
        }
        self.scratch.clear();
    }
}

/// Load a FASTA file with the default configuration.
///
/// # Errors
///
/// See [`ReferenceLoader::load`].
pub fn load_reference(path: &Path) -> Result<ReferenceIndex, LoadError> {
    ReferenceLoader::default().load(path)
}

/// Read one line into `buf` without its `\n` / `\r\n` terminator.
/// Returns `false` at end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}

/// Identifier of a header line (the text after `>`), or `None` for other lines
fn header_name(line: &[u8]) -> Option<String> {
    match line.split_first() {
        Some((&HEADER_MARKER, name)) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(content: &str) -> ReferenceIndex {
        ReferenceLoader::default()
            .load_reader(content.as_bytes())
            .unwrap()
    }

    fn bases<'a>(index: &'a ReferenceIndex, name: &str) -> &'a [u8] {
        index.sequence_for(name).unwrap().as_bytes()
    }

    #[test]
    fn test_load_example_reference() {
        let index = load_str(">chr1\nacgt\nACGT\n>chr10\nTTTT\n>chrX\nGGCC\n");

        assert_eq!(bases(&index, "chr1"), b"ACGTACGT");
        assert_eq!(bases(&index, "chrX"), b"GGCC");
        // The canonical filter only checks the first character after `chr`
        assert_eq!(bases(&index, "chr10"), b"TTTT");
        assert_eq!(index.chromosomes(), ["chr1", "chr10", "chrX"]);
    }

    #[test]
    fn test_mixed_case_is_uppercased() {
        let index = load_str(">chr2\nacgtACGT\n");
        assert_eq!(bases(&index, "chr2"), b"ACGTACGT");
    }

    #[test]
    fn test_length_is_sum_of_lines() {
        let index = load_str(">chr3\nACGTA\nCG\n\nTTTTTTT\n");
        let seq = index.sequence_for("chr3").unwrap();
        assert_eq!(seq.len(), 5 + 2 + 7);
        assert!(seq.as_bytes().iter().all(u8::is_ascii_uppercase));
    }

    #[test]
    fn test_rejected_record_is_fully_skipped() {
        let index = load_str(">chrM\nAAAA\nAAAA\n>chr2\nCC\n>chrUn_KI270302v1\nGG\n");

        assert!(!index.contains("chrM"));
        assert!(!index.contains("chrUn_KI270302v1"));
        assert_eq!(bases(&index, "chr2"), b"CC");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_lines_before_first_header_are_ignored() {
        let index = load_str("ACGT\n\n>chr1\nGG\n");
        assert_eq!(index.len(), 1);
        assert_eq!(bases(&index, "chr1"), b"GG");
    }

    #[test]
    fn test_empty_record_is_sentinel_only() {
        let index = load_str(">chr1\n>chr2\nAC\n");
        let chr1 = index.sequence_for("chr1").unwrap();
        assert!(chr1.is_empty());
        assert_eq!(chr1.as_bytes_with_sentinel(), b"\0");
        assert_eq!(bases(&index, "chr2"), b"AC");
    }

    #[test]
    fn test_header_at_end_of_input() {
        let index = load_str(">chr1\nAC\n>chrY");
        assert_eq!(bases(&index, "chr1"), b"AC");
        assert!(index.sequence_for("chrY").unwrap().is_empty());
    }

    #[test]
    fn test_missing_trailing_newline_and_crlf() {
        let index = load_str(">chr1\r\nac\r\ngt");
        assert_eq!(bases(&index, "chr1"), b"ACGT");
    }

    #[test]
    fn test_non_nucleotide_characters_are_kept() {
        let index = load_str(">chr1\nnnRy-*\n");
        assert_eq!(bases(&index, "chr1"), b"NNRY-*");
    }

    #[test]
    fn test_duplicate_identifier_last_wins() {
        let index = load_str(">chr1\nAAAA\n>chr2\nC\n>chr1\nTT\n");
        assert_eq!(bases(&index, "chr1"), b"TT");
        assert_eq!(index.chromosomes(), ["chr1", "chr2"]);
    }

    #[test]
    fn test_allow_list_filter() {
        let config = LoaderConfig::default().with_filter(ChromosomeFilter::allow_list(["chrM"]));
        let index = ReferenceLoader::new(config)
            .load_reader(&b">chr1\nAC\n>chrM\ngatc\n"[..])
            .unwrap();
        assert_eq!(index.chromosomes(), ["chrM"]);
        assert_eq!(bases(&index, "chrM"), b"GATC");
    }

    #[test]
    fn test_all_filter_keeps_description_headers() {
        let config = LoaderConfig::default().with_filter(ChromosomeFilter::All);
        let index = ReferenceLoader::new(config)
            .load_reader(&b">chr1 AC:CM000663.2\nAC\n"[..])
            .unwrap();
        assert_eq!(bases(&index, "chr1 AC:CM000663.2"), b"AC");
    }

    #[test]
    fn test_capacity_exceeded() {
        let config = LoaderConfig::default().with_max_sequence_length(5);
        let result = ReferenceLoader::new(config).load_reader(&b">chr1\nACG\nTAC\n"[..]);
        match result {
            Err(LoadError::CapacityExceeded {
                chromosome,
                capacity,
            }) => {
                assert_eq!(chromosome, "chr1");
                assert_eq!(capacity, 5);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_capacity_exactly_at_limit() {
        let config = LoaderConfig::default().with_max_sequence_length(6);
        let index = ReferenceLoader::new(config)
            .load_reader(&b">chr1\nACG\nTAC\n"[..])
            .unwrap();
        assert_eq!(bases(&index, "chr1"), b"ACGTAC");
    }

    #[test]
    fn test_rejected_record_is_not_bounded_by_capacity() {
        let config = LoaderConfig::default().with_max_sequence_length(2);
        let index = ReferenceLoader::new(config)
            .load_reader(&b">chrM\nACGTACGT\n>chr1\nAC\n"[..])
            .unwrap();
        assert_eq!(bases(&index, "chr1"), b"AC");
    }

    #[test]
    fn test_scratch_grows_past_initial_capacity() {
        let config = LoaderConfig::default().with_initial_capacity(2);
        let body = "ACGTACGTAC\n".repeat(100);
        let index = ReferenceLoader::new(config)
            .load_reader(format!(">chr1\n{body}").as_bytes())
            .unwrap();
        assert_eq!(index.sequence_for("chr1").unwrap().len(), 1000);
    }

    #[test]
    fn test_loader_reuse_is_idempotent() {
        let content = b">chr1\nacgt\n>chrM\nAA\n>chr2\nGGCC\nTT\n";
        let mut loader = ReferenceLoader::default();
        let first = loader.load_reader(&content[..]).unwrap();
        let second = loader.load_reader(&content[..]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.chromosomes(), second.chromosomes());
    }

    #[test]
    fn test_load_file() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chr1\nACGTACGT\nACGT\n>chr2\nGGGG\n").unwrap();
        temp.flush().unwrap();

        let index = load_reference(temp.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.sequence_for("chr1").unwrap().len(), 12);
        assert_eq!(index.sequence_for("chr2").unwrap().len(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_reference(Path::new("/nonexistent/reference.fa"));
        assert!(matches!(result, Err(LoadError::UnreadableInput { .. })));
    }

    #[test]
    fn test_load_empty_file() {
        let index = load_str("");
        assert!(index.is_empty());
    }
}
