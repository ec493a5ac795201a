// src/enrich/mode.rs
// =============================================================================
// The three enrichment passes over a company dataset.
//
// - missing: rows without a resolved company name get the full record
// - correct: fix official names, parent country and revenue
// - naics:   fill in missing NAICS codes and revenue
//
// Each mode decides which rows need a lookup, what to ask Perplexity, how to
// ask OpenAI to structure the answer, and which columns it may write.
// =============================================================================

use clap::ValueEnum;

use super::company::{
    is_missing, INDUSTRY_NAICS_3, INDUSTRY_NAICS_4, INDUSTRY_NAICS_5, INITIAL_COMPANY_NAME,
    NOT_APPLICABLE, ORIGINAL_COMPANY_NAME, PARENT_COMPANY, PARENT_COMPANY_COUNTRY,
    REVENUE_2023_USD,
};
use super::openai::StructureRequest;
use super::perplexity::SearchRequest;
use crate::enrich::chat::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnrichMode {
    /// Look up the full record for rows whose company name is unresolved
    Missing,
    /// Re-check official name, parent country and revenue
    Correct,
    /// Fill in missing NAICS codes and revenue
    Naics,
}

impl EnrichMode {
    // Columns this mode looks up and writes back
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EnrichMode::Missing => &[
                INITIAL_COMPANY_NAME,
                ORIGINAL_COMPANY_NAME,
                PARENT_COMPANY,
                PARENT_COMPANY_COUNTRY,
                INDUSTRY_NAICS_3,
                INDUSTRY_NAICS_4,
                INDUSTRY_NAICS_5,
                REVENUE_2023_USD,
            ],
            EnrichMode::Correct => &[
                ORIGINAL_COMPANY_NAME,
                PARENT_COMPANY_COUNTRY,
                REVENUE_2023_USD,
            ],
            EnrichMode::Naics => &[
                INDUSTRY_NAICS_3,
                INDUSTRY_NAICS_4,
                INDUSTRY_NAICS_5,
                REVENUE_2023_USD,
            ],
        }
    }

    // Whether a row needs a lookup; `cell` reads a column of that row
    pub fn needs_lookup<'a>(self, cell: impl Fn(&str) -> &'a str) -> bool {
        match self {
            EnrichMode::Missing => {
                let name = cell(ORIGINAL_COMPANY_NAME).trim();
                is_missing(name) || name == NOT_APPLICABLE
            }
            EnrichMode::Correct => {
                let revenue = cell(REVENUE_2023_USD);
                is_missing(cell(ORIGINAL_COMPANY_NAME))
                    || is_missing(revenue)
                    || !revenue.trim().ends_with('M')
            }
            EnrichMode::Naics => {
                is_missing(cell(INDUSTRY_NAICS_4))
                    || is_missing(cell(INDUSTRY_NAICS_5))
                    || is_missing(cell(REVENUE_2023_USD))
            }
        }
    }

    // Whether a looked-up value replaces what the cell already holds
    //
    // The NAICS pass only fills gaps; the other passes overwrite
    pub fn should_write(self, current: &str) -> bool {
        match self {
            EnrichMode::Missing | EnrichMode::Correct => true,
            EnrichMode::Naics => is_missing(current),
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            EnrichMode::Missing => "company_info_updated.csv",
            EnrichMode::Correct => "company_info_corrected.csv",
            EnrichMode::Naics => "company_info_naics_revenue_updated.csv",
        }
    }

    // Research question for Perplexity
    pub fn search_request(self, company: &str) -> SearchRequest {
        match self {
            EnrichMode::Missing => {
                let mut request = SearchRequest::new(
                    "Be precise and concise.",
                    format!(
                        "For {company}, provide ONLY these details in a structured format:\n\
                         1. Original/Parent company name\n\
                         2. Parent company's country of headquarters\n\
                         3. Industry classification:\n\
                         \x20   - NAICS 3-digit code\n\
                         \x20   - NAICS 4-digit code\n\
                         \x20   - NAICS 5-digit code\n\
                         4. Annual revenue in USD (2023 or most recent)\n\n\
                         Format response as:\n\
                         Original Company: [name]\n\
                         Parent Company: [name]\n\
                         Country: [country]\n\
                         NAICS-3: [code]\n\
                         NAICS-4: [code]\n\
                         NAICS-5: [code]\n\
                         Revenue: [amount in USD]\n\n\
                         If any information is unavailable, write 'Not Available'."
                    ),
                    0.2,
                );
                request.search_domain_filter = Some(vec!["perplexity.ai".to_string()]);
                request.return_images = Some(false);
                request.return_related_questions = Some(false);
                request.top_k = Some(0);
                request.stream = Some(false);
                request.presence_penalty = Some(0.0);
                request.frequency_penalty = Some(1.0);
                request
            }
            EnrichMode::Correct => SearchRequest::new(
                "You are a corporate information specialist focused on providing accurate \
                 company names and revenue data.",
                format!(
                    "For {company}, provide ONLY these details with high focus on accuracy:\n\
                     1. Official/Legal company name (full correct name)\n\
                     2. Parent company's country of headquarters\n\
                     3. Revenue in USD for 2023 (if not available, most recent year)\n\n\
                     Format response as:\n\
                     Official Name: [exact legal name]\n\
                     Country: [country]\n\
                     Revenue: [amount in USD with year]\n\n\
                     Be precise with company names and revenue figures.\n\
                     If any information is unavailable, write 'Not Available'."
                ),
                0.1,
            ),
            EnrichMode::Naics => SearchRequest::new(
                "You are a corporate information specialist focused on providing accurate \
                 NAICS classifications and revenue data.",
                format!(
                    "For {company}, provide these details with high focus on accuracy:\n\
                     1. NAICS codes with descriptions:\n\
                     \x20  - Exact 3-digit code and description\n\
                     \x20  - Exact 4-digit code and description\n\
                     \x20  - Exact 5-digit code and description\n\
                     2. Revenue:\n\
                     \x20  - Most recent annual revenue (specify year)\n\
                     \x20  - If 2023 not available, provide latest year\n\
                     \x20  - Convert all amounts to USD\n\n\
                     Format response as:\n\
                     NAICS-3: [code] - [description]\n\
                     NAICS-4: [code] - [description]\n\
                     NAICS-5: [code] - [description]\n\
                     Revenue: [amount] USD ([year])\n\n\
                     Be precise with NAICS codes and ensure each level is correct and properly nested.\n\
                     If any information is unavailable, write 'Not Available'."
                ),
                0.1,
            ),
        }
    }

    // Request asking OpenAI to turn the research answer into JSON
    pub fn structure_request(self, company: &str, answer: &str) -> StructureRequest {
        let (model, temperature, system) = match self {
            EnrichMode::Missing => ("gpt-4o", 0.2, MISSING_SYSTEM_PROMPT),
            EnrichMode::Correct => ("gpt-4", 0.1, CORRECT_SYSTEM_PROMPT),
            EnrichMode::Naics => ("gpt-4o", 0.1, NAICS_SYSTEM_PROMPT),
        };

        let user = format!(
            "Convert this company information for {company} into the specified JSON format:\n\n{answer}\n"
        );

        StructureRequest::new(model, temperature)
            .message(Message::system(system))
            .message(Message::user(user))
    }
}

const MISSING_SYSTEM_PROMPT: &str = r#"You are a data structuring assistant. Convert the provided company information into a specific JSON format.
Follow these rules strictly:
- All company names should be official legal names
- NAICS codes should include descriptions
- Revenue should be in million USD with M suffix
- Use "Not Available" for missing information
- Parent company should be ultimate parent, or same as original if independent

Example output:
initial_company_name: Tesla

{
    "initial_company_name": "Tesla",
    "original_company_name": "Tesla, Inc.",
    "parent_company": "Tesla, Inc.",
    "parent_company_country": "US",
    "industry_naics_3_digit": "336 - Transportation Equipment Manufacturing",
    "industry_naics_4_digit": "3361 - Motor Vehicle Manufacturing",
    "industry_naics_5_digit": "33611 - Automobile and Light Duty Motor Vehicle Manufacturing",
    "revenue_2023_usd": "96,773 M"
}
"#;

const CORRECT_SYSTEM_PROMPT: &str = r#"You are a data structuring assistant specializing in company information.
Convert the provided company information into a specific JSON format.
Follow these rules strictly:
- Company names must be official legal names
- Revenue should be in million USD with M suffix
- Use "Not Available" for missing information
- If revenue year is not 2023, include the year in parentheses

Example output:
{
    "original_company_name": "Tesla, Inc.",
    "parent_company_country": "US",
    "revenue_2023_usd": "96,773 M"
}
"#;

const NAICS_SYSTEM_PROMPT: &str = r#"You are a data structuring assistant specializing in industry classification.
Convert the provided company information into a specific JSON format.
Follow these rules strictly:
- NAICS codes must include the code and its description, properly nested
- Revenue should be in million USD with M suffix, with the year in parentheses if not 2023
- Use "Not Available" for missing information

Example output:
{
    "industry_naics_3_digit": "336 - Transportation Equipment Manufacturing",
    "industry_naics_4_digit": "3361 - Motor Vehicle Manufacturing",
    "industry_naics_5_digit": "33611 - Automobile and Light Duty Motor Vehicle Manufacturing",
    "revenue_latest": "96,773 M"
}
"#;
