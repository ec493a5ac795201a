// src/enrich/mod.rs
// =============================================================================
// This module enriches company data with two AI APIs.
//
// Submodules:
// - chat: Chat completion wire types shared by both APIs
// - perplexity: Search-grounded research answers
// - openai: JSON structuring of those answers
// - company: The company record and its "Not Available" sentinel
// - mode: The three enrichment passes
// - dataset: CSV dataset held in memory
// - lookup: Runs a pass over a dataset
// - case_info: Structured facts from harvested case studies
// =============================================================================

mod case_info;
mod chat;
mod company;
mod dataset;
mod error;
mod lookup;
mod mode;
mod openai;
mod perplexity;

pub use case_info::{CaseInfoExtractor, CaseStudyInfo, CASE_INFO_HEADER};
pub use dataset::Dataset;
pub use lookup::{enrich_dataset, AiCompanyLookup, DEFAULT_LOOKUP_DELAY};
pub use mode::EnrichMode;
pub use openai::OpenAIClient;
pub use perplexity::PerplexityClient;
