// src/output/mod.rs
// =============================================================================
// This module writes results to disk.
//
// Submodules:
// - markdown: Combined and per-page case study documents
// - table: Tabular results (listing cards, extracted case info)
// =============================================================================

mod markdown;
mod table;

pub use markdown::{save_case_pages, write_case_studies};
pub use table::write_csv;

// Local time stamp used in output file names, e.g. 20240131_094500
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}
