//! # seqidx - Indexed access to FASTA record files
//!
//! seqidx reads line-oriented sequence files in which every record is exactly
//! one header line followed by exactly one body line, and answers positional,
//! identifier, composition and metadata queries over them.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`store`] - The record store: open-time validation and all retrieval operations
//! - [`index`] - Sidecar offset index (building, writing, loading)
//! - [`query`] - Composition and metadata pattern compilation
//! - [`output`] - Console formatting
//! - [`utils`] - Grammar checks, identifier extraction, configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use seqidx::index::build::build_index_file;
//! use seqidx::store::RecordStore;
//! use std::path::Path;
//!
//! build_index_file(Path::new("16S.fasta"), Path::new("16S.fasta.idx"), true)?;
//!
//! let mut store = RecordStore::open("16S.fasta")?;
//! store.set_index_file("16S.fasta.idx")?;
//! let record = store.get_by_id("NR_118889.1", true)?;
//! println!("{}", record);
//! ```
//!
//! ## Indexed lookups
//!
//! The offset index only relocates where a lookup starts scanning. Matching is
//! still a forward substring search for `>` + identifier, so indexed and
//! sequential lookups return the same record whenever the indexed offset
//! precedes the header.

pub mod index;
pub mod output;
pub mod query;
pub mod store;
pub mod utils;
