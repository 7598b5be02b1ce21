//! # ref-loader
//!
//! A library for loading the chromosomes of a reference genome into memory.
//!
//! Downstream analyses often need random access to the bases of any chromosome
//! by name. `ref-loader` reads a reference FASTA once, keeps the chromosomes
//! selected by a [`ChromosomeFilter`], and stores each as an uppercase,
//! right-sized [`ChromosomeSequence`] in a [`ReferenceIndex`].
//!
//! ## Features
//!
//! - **Single pass**: Records are recognized and filtered while streaming;
//!   skipped records are never buffered
//! - **Case folding**: Soft-masked (lowercase) bases are stored uppercase
//! - **Explicit filtering**: The chromosome selection is a named value, not a
//!   hard-coded comparison
//! - **Bounded memory**: A single scratch buffer is reused across records and
//!   a record longer than the configured maximum is an error, never truncated
//! - **Shared reads**: The loaded index is immutable and can be read from any
//!   number of threads
//!
//! ## Example
//!
//! ```rust,no_run
//! use ref_loader::load_reference;
//! use std::path::Path;
//!
//! let index = load_reference(Path::new("hg38.fa")).unwrap();
//!
//! for name in index.chromosomes() {
//!     let seq = index.sequence_for(name).unwrap();
//!     println!("{name}: {} bases", seq.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequence, index and filter types
//! - [`parsing`]: The streaming FASTA loader
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;

// Re-export commonly used types for convenience
pub use crate::core::filter::ChromosomeFilter;
pub use crate::core::index::ReferenceIndex;
pub use crate::core::sequence::ChromosomeSequence;
pub use crate::parsing::fasta::{load_reference, LoadError, LoaderConfig, ReferenceLoader};
