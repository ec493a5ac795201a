// src/enrich/case_info.rs
// Structured facts pulled out of a harvested case study by a chat model.

use serde::{Deserialize, Deserializer, Serialize};

use super::chat::Message;
use super::company::lenient_string;
use super::error::Result;
use super::openai::{OpenAIClient, StructureRequest};
use crate::crawl::CaseStudyRecord;

pub const CASE_INFO_MODEL: &str = "gpt-3.5-turbo";

// CSV column order of the extracted data file
pub const CASE_INFO_HEADER: [&str; 5] =
    ["customer", "solution", "adoption_period", "published_at", "url"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseStudyInfo {
    // Customer company described by the case study
    #[serde(deserialize_with = "text_or_empty")]
    pub customer: String,
    // Vendor solution or tool the customer adopted
    #[serde(deserialize_with = "text_or_empty")]
    pub solution: String,
    // When the solution was adopted
    #[serde(deserialize_with = "text_or_empty")]
    pub adoption_period: String,
    // When the case study was published
    #[serde(deserialize_with = "text_or_empty")]
    pub published_at: String,
    // Source page; always taken from the crawl, never from the model
    #[serde(deserialize_with = "text_or_empty")]
    pub url: String,
}

// A null or unquoted answer still fills the cell; null writes an empty one
fn text_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn prompt(content: &str) -> String {
    format!(
        "Extract the following information from the text below.\n\n\
         Text:\n{content}\n\n\
         Information to extract (JSON format):\n\
         {{\n\
         \x20 \"customer\": \"\",\n\
         \x20 \"solution\": \"\",\n\
         \x20 \"adoption_period\": \"\",\n\
         \x20 \"published_at\": \"\"\n\
         }}"
    )
}

pub struct CaseInfoExtractor {
    openai: OpenAIClient,
}

impl CaseInfoExtractor {
    pub fn new(openai: OpenAIClient) -> Self {
        Self { openai }
    }

    pub async fn extract(&self, case: &CaseStudyRecord) -> Result<CaseStudyInfo> {
        let request = StructureRequest::new(CASE_INFO_MODEL, 0.0)
            .without_json_mode()
            .max_tokens(500)
            .message(Message::user(prompt(&case.content)));

        let mut info: CaseStudyInfo = self.openai.structure(&request).await?;
        info.url = case.url.clone();
        Ok(info)
    }
}
