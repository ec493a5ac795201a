// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env and set up logging
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = nothing harvested, 2 = error)
// =============================================================================

mod cli;
mod crawl;
mod enrich;
mod extract;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use crawl::{listing_headers, scrape_listing, CaseStudyRecord, CrawlConfig, Crawler, HttpFetcher};
use enrich::{
    enrich_dataset, AiCompanyLookup, CaseInfoExtractor, CaseStudyInfo, Dataset, EnrichMode,
    OpenAIClient, PerplexityClient, CASE_INFO_HEADER,
};

#[tokio::main]
async fn main() {
    // A missing .env file is fine: keys may already be in the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only carries the report
fn init_logging(verbose: bool) {
    let default = if verbose {
        "case_harvest=debug"
    } else {
        "case_harvest=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl {
            seed_url,
            origin,
            max_depth,
            delay_ms,
            output_dir,
            extract,
            save_pages,
            json,
        } => {
            let config = CrawlConfig {
                origin,
                max_depth,
                delay: Duration::from_millis(delay_ms),
            };
            let options = CrawlOutput {
                dir: output_dir,
                extract,
                save_pages,
                json,
            };
            handle_crawl(&seed_url, config, options).await
        }
        Commands::Listing {
            url,
            delay_ms,
            output,
        } => handle_listing(&url, Duration::from_millis(delay_ms), &output).await,
        Commands::Enrich {
            input,
            mode,
            output,
            delay_ms,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(mode.default_output()));
            handle_enrich(&input, mode, &output, Duration::from_millis(delay_ms)).await
        }
    }
}

// What the crawl command writes besides the combined report
struct CrawlOutput {
    dir: PathBuf,
    extract: bool,
    save_pages: bool,
    json: bool,
}

// Handles the 'crawl' subcommand
async fn handle_crawl(seed_url: &str, config: CrawlConfig, options: CrawlOutput) -> Result<i32> {
    println!("🔍 Crawling case studies from: {}", seed_url);
    println!("📊 Max crawl depth: {}", config.max_depth);

    // Fail before crawling if the API key is missing
    let extractor = if options.extract {
        Some(CaseInfoExtractor::new(OpenAIClient::from_env()?))
    } else {
        None
    };

    std::fs::create_dir_all(&options.dir)
        .with_context(|| format!("Failed to create {}", options.dir.display()))?;

    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let mut crawler = Crawler::new(fetcher, config);
    crawler.crawl(seed_url, 0).await;

    println!("📄 Visited {} page(s)", crawler.visited().len());
    println!("📚 Found {} case stud(ies)", crawler.records().len());
    let records = crawler.into_records();

    let report = output::write_case_studies(&options.dir, &records)?;
    println!("✅ Results saved to {}", report.display());

    if options.save_pages {
        for path in output::save_case_pages(&options.dir, &records) {
            println!("   Content saved to {}", path.display());
        }
    }

    if let Some(extractor) = extractor {
        let infos = extract_case_info(&extractor, &records).await;
        let path = options
            .dir
            .join(format!("extracted_data_{}.csv", output::timestamp()));
        output::write_csv(&path, &CASE_INFO_HEADER, &infos)?;
        println!("✅ Extracted data saved to {}", path.display());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    Ok(if records.is_empty() { 1 } else { 0 })
}

// Runs the case info extraction for every record, skipping failures
async fn extract_case_info(
    extractor: &CaseInfoExtractor,
    records: &[CaseStudyRecord],
) -> Vec<CaseStudyInfo> {
    let mut infos = Vec::new();

    for case in records {
        match extractor.extract(case).await {
            Ok(info) => infos.push(info),
            Err(e) => warn!(url = %case.url, error = %e, "Error extracting information"),
        }
    }

    infos
}

// Handles the 'listing' subcommand
async fn handle_listing(url: &str, delay: Duration, output_path: &Path) -> Result<i32> {
    println!("🔍 Scraping customer listing: {}", url);

    let fetcher =
        HttpFetcher::with_headers(listing_headers()).context("Failed to create HTTP client")?;
    let cards = scrape_listing(&fetcher, url, delay).await;

    if cards.is_empty() {
        println!("⚠️  No case studies were found.");
        return Ok(1);
    }

    output::write_csv(
        output_path,
        &["company_name", "description", "page_number"],
        &cards,
    )?;

    println!("\n✅ Scraping completed successfully!");
    println!("📋 Total case studies found: {}", cards.len());
    println!("\nCase Studies Overview:");
    for card in &cards {
        let preview: String = card.description.chars().take(100).collect();
        println!("\nCompany: {}", card.company_name);
        println!("Description: {}...", preview);
        println!("{}", "-".repeat(80));
    }
    println!("\nSaved to {}", output_path.display());

    Ok(0)
}

// Handles the 'enrich' subcommand
async fn handle_enrich(
    input: &Path,
    mode: EnrichMode,
    output_path: &Path,
    delay: Duration,
) -> Result<i32> {
    let lookup = AiCompanyLookup::new(PerplexityClient::from_env()?, OpenAIClient::from_env()?);

    let mut dataset = Dataset::read(input)?;
    if dataset.is_empty() {
        println!("⚠️  {} has no rows", input.display());
        return Ok(1);
    }
    println!("📄 Loaded {} compan(ies) from {}", dataset.len(), input.display());

    let looked_up = enrich_dataset(&mut dataset, mode, &lookup, delay).await?;
    dataset.write(output_path)?;

    println!("🌐 Looked up {} compan(ies)", looked_up);
    println!(
        "✅ Successfully updated company information and saved to {}",
        output_path.display()
    );

    Ok(if looked_up == 0 { 1 } else { 0 })
}
