//! Core data types for loaded reference genomes.
//!
//! - [`ChromosomeSequence`]: Uppercase, sentinel-terminated bases of one chromosome
//! - [`ReferenceIndex`]: Chromosome name to sequence map, in file order
//! - [`ChromosomeFilter`]: Rule deciding which FASTA records are loaded
//!
//! ## Chromosome Naming
//!
//! The default filter expects UCSC-style names:
//!
//! | Name | Kept |
//! |------|------|
//! | chr1 .. chr22 | yes |
//! | chrX, chrY | yes |
//! | chrM | no |
//! | chrUn_*, *_random, *_alt | no |
//! | 1, X, MT (NCBI style) | no |
//!
//! Use [`ChromosomeFilter::AllowList`] or [`ChromosomeFilter::All`] for other
//! naming conventions.
//!
//! [`ChromosomeSequence`]: sequence::ChromosomeSequence
//! [`ReferenceIndex`]: index::ReferenceIndex
//! [`ChromosomeFilter`]: filter::ChromosomeFilter
//! [`ChromosomeFilter::AllowList`]: filter::ChromosomeFilter::AllowList
//! [`ChromosomeFilter::All`]: filter::ChromosomeFilter::All

pub mod filter;
pub mod index;
pub mod sequence;
