//! Discovery and scanning pipeline
//!
//! - [`discover`] turns the collaboration-score table into candidate
//!   repositories using both languages of a retained pair.
//! - [`Scanner`] fetches, filters, extracts and scores candidates in
//!   parallel, then aggregates accepted records per language pair.

mod discover;
mod scan;

pub use discover::discover;
pub use scan::{scan, ProgressCallback, ScanReport, Scanner, DEFAULT_WORKERS, MAX_WORKERS};
