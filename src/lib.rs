//! # svtrack
//!
//! A small Rust library for reading BED-like tabular files that describe
//! genomic structural-variant (SV) intervals, and for decoding the SV
//! metadata embedded in track names.
//!
//! ## Overview
//!
//! This library provides a single record type, [`Track`], and one linear
//! parsing pass per file. A track file opens with a `#`-prefixed header
//! line naming its columns; the header drives where the optional `SVLEN`,
//! `SVTYPE`, and `SEQ` columns live, so files may order them freely after
//! the mandatory chromosome/begin/end triple.
//!
//! ## Features
//!
//! - **Header-Mapped Columns:** optional columns are addressed by name
//!   through the file's own header, never by hard-coded position
//! - **Typed Errors:** every parse failure is surfaced to the caller with
//!   the line and field that caused it; nothing is silently defaulted
//! - **Compact Chromosome Codes:** `chr1`..`chr22`, `chrX`, and `chrY`
//!   round-trip exactly through a one-byte code
//! - **Multiple Reading Modes:** buffered streaming by default, with
//!   optional memory-mapped and gzip-compressed input
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! svtrack = "0.1"
//!
//! # Optional features
//! svtrack = { version = "0.1", features = ["compression", "mmap"] }
//! ```
//!
//! ## Reading a Track File
//!
//! ```rust,no_run
//! use svtrack::Reader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut reader = Reader::from_path("data/tracks.bed")?;
//!
//!     for record in reader.records() {
//!         let record = record?;
//!         println!(
//!             "{}:{}-{} {}",
//!             record.chrom, record.begin, record.end, record.svtype
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Or load everything at once, all-or-nothing:
//!
//! ```rust,no_run
//! use svtrack::load_tracks;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tracks = load_tracks("data/tracks.bed")?;
//!     println!("loaded {} tracks", tracks.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding a Track Name
//!
//! Track names carry coordinates in the form `<label>@<chrom>_<begin>_<end>`:
//!
//! ```rust
//! use svtrack::Track;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let track = Track::from_name("label@chr7_100_200")?;
//!     assert_eq!(track.chrom.to_string(), "chr7");
//!     assert_eq!(track.begin, 100);
//!     assert_eq!(track.end, 200);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The reader either yields a complete, correctly populated record or
//! reports precisely which line and field failed:
//!
//! ```rust,no_run
//! use svtrack::Reader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut reader = Reader::from_path("data/tracks.bed")?;
//!
//!     for record in reader.records() {
//!         match record {
//!             Ok(track) => println!("{track}"),
//!             Err(e) => eprintln!("skipping record: {e}"),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `compression`: Enable gzip support (adds `flate2` dependency)
//! - `mmap`: Enable memory-mapped file support (adds `memmap2` dependency)
//!
//! ## License
//!
//! See LICENSE file for details.

#![cfg_attr(doc, warn(missing_docs))]

pub mod chrom;
pub mod reader;
pub mod svtype;
pub mod track;

pub use chrom::Chrom;
pub use reader::{load_tracks, Header, Reader, ReaderBuilder, ReaderError, ReaderMode, ReaderResult};
pub use svtype::SvType;
pub use track::Track;
