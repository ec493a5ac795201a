// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - crawl: Depth-first crawl of the case study pages, written to Markdown
// - listing: Paginated scrape of the customer listing, written to CSV
// - enrich: Fill in company details in a CSV dataset using AI APIs
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::crawl::{
    DEFAULT_DELAY, DEFAULT_LISTING_DELAY, DEFAULT_LISTING_URL, DEFAULT_MAX_DEPTH, DEFAULT_ORIGIN,
    DEFAULT_SEED_URL,
};
use crate::enrich::{EnrichMode, DEFAULT_LOOKUP_DELAY};

#[derive(Parser, Debug)]
#[command(
    name = "case-harvest",
    version = "0.1.0",
    about = "Harvest vendor case studies and enrich company datasets",
    long_about = "case-harvest crawls a vendor's customer case study pages into a Markdown \
                  report, scrapes the paginated customer listing, and enriches CSV company \
                  datasets with parent company, NAICS and revenue data."
)]
pub struct Cli {
    /// Log debug output (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl case study pages and save them as Markdown
    ///
    /// Example: case-harvest crawl https://www.kinaxis.com/en/customers
    Crawl {
        /// Page to start from (depth 0)
        #[arg(default_value = DEFAULT_SEED_URL)]
        seed_url: String,

        /// Only links starting with this prefix are followed
        #[arg(long, default_value = DEFAULT_ORIGIN)]
        origin: String,

        /// Deepest link level that is still fetched (the seed is 0)
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,

        /// Pause before each newly discovered page, in milliseconds
        #[arg(long, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
        delay_ms: u64,

        /// Directory the report files are written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Extract customer/solution facts from each case study with OpenAI
        #[arg(long)]
        extract: bool,

        /// Also save each case study to its own Markdown file
        #[arg(long)]
        save_pages: bool,

        /// Print the harvested records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scrape the paginated customer listing into a CSV file
    ///
    /// Example: case-harvest listing --output cards.csv
    Listing {
        /// First listing page
        #[arg(default_value = DEFAULT_LISTING_URL)]
        url: String,

        /// Pause between listing pages, in milliseconds
        #[arg(long, default_value_t = DEFAULT_LISTING_DELAY.as_millis() as u64)]
        delay_ms: u64,

        /// CSV file to write
        #[arg(long, default_value = "kinaxis_case_studies.csv")]
        output: PathBuf,
    },

    /// Enrich a company CSV with Perplexity and OpenAI
    ///
    /// Needs PERPLEXITY_API_KEY and OPENAI_API_KEY (a .env file works too)
    ///
    /// Example: case-harvest enrich comp_missing.csv --mode missing
    Enrich {
        /// Input CSV with an initial_company_name column
        input: PathBuf,

        /// Which enrichment pass to run
        #[arg(long, value_enum, default_value_t = EnrichMode::Missing)]
        mode: EnrichMode,

        /// Output CSV (defaults to a name chosen by the mode)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pause after each company lookup, in milliseconds
        #[arg(long, default_value_t = DEFAULT_LOOKUP_DELAY.as_millis() as u64)]
        delay_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::parse_from(["case-harvest", "crawl"]);
        match cli.command {
            Commands::Crawl {
                seed_url,
                origin,
                max_depth,
                delay_ms,
                extract,
                ..
            } => {
                assert_eq!(seed_url, DEFAULT_SEED_URL);
                assert_eq!(origin, DEFAULT_ORIGIN);
                assert_eq!(max_depth, 3);
                assert_eq!(delay_ms, 1000);
                assert!(!extract);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_enrich_mode_flag() {
        let cli = Cli::parse_from(["case-harvest", "-v", "enrich", "in.csv", "--mode", "naics"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Enrich { input, mode, output, .. } => {
                assert_eq!(input, PathBuf::from("in.csv"));
                assert_eq!(mode, EnrichMode::Naics);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_enrich_requires_input() {
        assert!(Cli::try_parse_from(["case-harvest", "enrich"]).is_err());
    }
}
