// src/enrich/lookup.rs
// =============================================================================
// This module runs an enrichment pass over a dataset.
//
// How it works:
// 1. For each row the mode selects, ask Perplexity about the company
// 2. Ask OpenAI to turn that answer into JSON
// 3. Write the mode's columns back into the row
// 4. Sleep a fixed delay before the next lookup
//
// A lookup never fails: any API error gives the "Not Available" record.
// =============================================================================

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use super::company::{CompanyInfo, INITIAL_COMPANY_NAME};
use super::dataset::Dataset;
use super::error;
use super::mode::EnrichMode;
use super::openai::OpenAIClient;
use super::perplexity::PerplexityClient;

pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_secs(1);

// Best-effort company lookup
#[async_trait]
pub trait CompanyLookup: Send + Sync {
    async fn lookup(&self, mode: EnrichMode, company: &str) -> CompanyInfo;
}

// Perplexity for research, OpenAI for structuring
pub struct AiCompanyLookup {
    perplexity: PerplexityClient,
    openai: OpenAIClient,
}

impl AiCompanyLookup {
    pub fn new(perplexity: PerplexityClient, openai: OpenAIClient) -> Self {
        Self { perplexity, openai }
    }

    async fn try_lookup(&self, mode: EnrichMode, company: &str) -> error::Result<CompanyInfo> {
        let answer = self.perplexity.ask(&mode.search_request(company)).await?;
        let mut info: CompanyInfo = self
            .openai
            .structure(&mode.structure_request(company, &answer))
            .await?;

        if mode == EnrichMode::Missing {
            info.initial_company_name = Some(company.to_string());
        }

        Ok(info)
    }
}

#[async_trait]
impl CompanyLookup for AiCompanyLookup {
    async fn lookup(&self, mode: EnrichMode, company: &str) -> CompanyInfo {
        match self.try_lookup(mode, company).await {
            Ok(info) => info,
            Err(e) => {
                warn!(company, error = %e, "Error processing company data");
                let mut info = CompanyInfo::unavailable(mode.columns());
                if mode == EnrichMode::Missing {
                    info.initial_company_name = Some(company.to_string());
                }
                info
            }
        }
    }
}

// Runs one pass over the dataset and returns how many rows were looked up
pub async fn enrich_dataset<L: CompanyLookup>(
    dataset: &mut Dataset,
    mode: EnrichMode,
    lookup: &L,
    delay: Duration,
) -> Result<usize> {
    if !dataset.has_column(INITIAL_COMPANY_NAME) {
        bail!("Dataset has no '{}' column", INITIAL_COMPANY_NAME);
    }

    let mut looked_up = 0;

    for row in 0..dataset.len() {
        if !mode.needs_lookup(|column| dataset.get(row, column)) {
            continue;
        }

        let company = dataset.get(row, INITIAL_COMPANY_NAME).trim().to_string();
        info!(company = %company, "Querying information");

        let found = lookup.lookup(mode, &company).await;
        for column in mode.columns() {
            if mode.should_write(dataset.get(row, column)) {
                dataset.set(row, column, found.column(column).unwrap_or_default());
            }
        }

        looked_up += 1;
        tokio::time::sleep(delay).await;
    }

    Ok(looked_up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::company::*;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Answers every lookup with the same record and remembers who was asked
    struct FixedLookup {
        info: CompanyInfo,
        asked: Mutex<Vec<String>>,
    }

    impl FixedLookup {
        fn new(info: CompanyInfo) -> Self {
            Self {
                info,
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompanyLookup for FixedLookup {
        async fn lookup(&self, _mode: EnrichMode, company: &str) -> CompanyInfo {
            self.asked.lock().unwrap().push(company.to_string());
            self.info.clone()
        }
    }

    fn dataset(csv_text: &str) -> Dataset {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        std::fs::write(&path, csv_text).unwrap();
        Dataset::read(&path).unwrap()
    }

    #[tokio::test]
    async fn test_missing_mode_only_touches_unresolved_rows() {
        let mut data = dataset(
            "initial_company_name,original_company_name,revenue_2023_usd\n\
             Tesla,Tesla Inc.,96 M\n\
             Acme,Not Available,\n",
        );
        let lookup = FixedLookup::new(CompanyInfo {
            initial_company_name: Some("Acme".into()),
            original_company_name: Some("Acme Corporation".into()),
            revenue: Some("12 M".into()),
            ..Default::default()
        });

        let count = enrich_dataset(&mut data, EnrichMode::Missing, &lookup, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(*lookup.asked.lock().unwrap(), vec!["Acme"]);
        assert_eq!(data.get(0, ORIGINAL_COMPANY_NAME), "Tesla Inc.");
        assert_eq!(data.get(1, ORIGINAL_COMPANY_NAME), "Acme Corporation");
        assert_eq!(data.get(1, REVENUE_2023_USD), "12 M");
        // Columns the answer left out are written empty and added to the header
        assert!(data.has_column(INDUSTRY_NAICS_5));
        assert_eq!(data.get(1, PARENT_COMPANY), "");
    }

    #[tokio::test]
    async fn test_naics_mode_fills_only_gaps() {
        let mut data = dataset(
            "initial_company_name,industry_naics_3_digit,industry_naics_4_digit,industry_naics_5_digit,revenue_2023_usd\n\
             Acme,336 - Kept,Not Available,,50 M\n",
        );
        let lookup = FixedLookup::new(CompanyInfo {
            naics_3: Some("999 - Replaced".into()),
            naics_4: Some("3361 - Motor Vehicle Manufacturing".into()),
            naics_5: Some("33611 - Automobile Manufacturing".into()),
            revenue: Some("60 M (2022)".into()),
            ..Default::default()
        });

        enrich_dataset(&mut data, EnrichMode::Naics, &lookup, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(data.get(0, INDUSTRY_NAICS_3), "336 - Kept");
        assert_eq!(data.get(0, INDUSTRY_NAICS_4), "3361 - Motor Vehicle Manufacturing");
        assert_eq!(data.get(0, INDUSTRY_NAICS_5), "33611 - Automobile Manufacturing");
        assert_eq!(data.get(0, REVENUE_2023_USD), "50 M");
    }

    #[tokio::test]
    async fn test_dataset_without_name_column_is_rejected() {
        let mut data = dataset("company\nAcme\n");
        let lookup = FixedLookup::new(CompanyInfo::default());
        let result = enrich_dataset(&mut data, EnrichMode::Correct, &lookup, Duration::ZERO).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_api_failure_gives_sentinel_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let lookup = AiCompanyLookup::new(
            PerplexityClient::new("p").with_base_url(server.uri()),
            OpenAIClient::new("o").with_base_url(server.uri()),
        );
        let info = lookup.lookup(EnrichMode::Correct, "Acme").await;

        assert_eq!(info, CompanyInfo::unavailable(EnrichMode::Correct.columns()));
        assert_eq!(info.column(REVENUE_2023_USD), Some(NOT_AVAILABLE));
    }

    #[tokio::test]
    async fn test_lookup_chains_both_apis() {
        let perplexity = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Official Name: Acme Corporation"}}]
            })))
            .expect(1)
            .mount(&perplexity)
            .await;

        let openai = MockServer::start().await;
        let structured = json!({
            "original_company_name": "Acme Corporation",
            "parent_company_country": "US",
            "revenue_2023_usd": "12 M"
        });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": structured.to_string()}}]
            })))
            .expect(1)
            .mount(&openai)
            .await;

        let lookup = AiCompanyLookup::new(
            PerplexityClient::new("p").with_base_url(perplexity.uri()),
            OpenAIClient::new("o").with_base_url(openai.uri()),
        );
        let info = lookup.lookup(EnrichMode::Missing, "Acme").await;

        assert_eq!(info.initial_company_name.as_deref(), Some("Acme"));
        assert_eq!(info.column(ORIGINAL_COMPANY_NAME), Some("Acme Corporation"));
        assert_eq!(info.column(PARENT_COMPANY_COUNTRY), Some("US"));
    }
}
