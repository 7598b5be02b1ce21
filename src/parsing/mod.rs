//! Readers that build a [`ReferenceIndex`](crate::core::index::ReferenceIndex).
//!
//! ## Example
//!
//! ```rust,no_run
//! use ref_loader::parsing::fasta::{LoaderConfig, ReferenceLoader};
//! use ref_loader::ChromosomeFilter;
//! use std::path::Path;
//!
//! // Load chr1..chr22, chrX and chrY
//! let index = ref_loader::load_reference(Path::new("hg38.fa")).unwrap();
//!
//! // Or choose the chromosomes explicitly
//! let config = LoaderConfig::default()
//!     .with_filter(ChromosomeFilter::allow_list(["chrM", "chrX"]));
//! let index = ReferenceLoader::new(config).load(Path::new("hg38.fa")).unwrap();
//! ```

pub mod fasta;
