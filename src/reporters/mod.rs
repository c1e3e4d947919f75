//! Output reporters for gitcollab scan results
//!
//! Supports:
//! - `csv` - The per-repository detail table and per-pair summary table
//! - `text` - Terminal table of pair summaries

mod csv;
mod text;

pub use self::csv::{
    write_detail, write_detail_csv, write_summary, write_summary_csv, DETAIL_HEADERS,
    SUMMARY_HEADERS,
};
pub use text::render_summaries;

/// Round to the 4 decimals used in every output table
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
