// src/enrich/company.rs
// =============================================================================
// The company record the enrichment fills in.
//
// Every field is optional: the structuring model may leave keys out, and the
// different enrichment modes only ask for some of them. A field the APIs
// could not answer holds the sentinel "Not Available".
// =============================================================================

use serde::{Deserialize, Deserializer};

pub const NOT_AVAILABLE: &str = "Not Available";
pub const NOT_APPLICABLE: &str = "Not applicable";

// Dataset column names
pub const INITIAL_COMPANY_NAME: &str = "initial_company_name";
pub const ORIGINAL_COMPANY_NAME: &str = "original_company_name";
pub const PARENT_COMPANY: &str = "parent_company";
pub const PARENT_COMPANY_COUNTRY: &str = "parent_company_country";
pub const INDUSTRY_NAICS_3: &str = "industry_naics_3_digit";
pub const INDUSTRY_NAICS_4: &str = "industry_naics_4_digit";
pub const INDUSTRY_NAICS_5: &str = "industry_naics_5_digit";
pub const REVENUE_2023_USD: &str = "revenue_2023_usd";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub initial_company_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub original_company_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub parent_company: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub parent_company_country: Option<String>,
    #[serde(rename = "industry_naics_3_digit", deserialize_with = "lenient_string")]
    pub naics_3: Option<String>,
    #[serde(rename = "industry_naics_4_digit", deserialize_with = "lenient_string")]
    pub naics_4: Option<String>,
    #[serde(rename = "industry_naics_5_digit", deserialize_with = "lenient_string")]
    pub naics_5: Option<String>,
    // The NAICS prompt asks for `revenue_latest`; it lands in the same column
    #[serde(
        rename = "revenue_2023_usd",
        alias = "revenue_latest",
        deserialize_with = "lenient_string"
    )]
    pub revenue: Option<String>,
}

impl CompanyInfo {
    // Value for a dataset column, if this record has one
    pub fn column(&self, column: &str) -> Option<&str> {
        let value = match column {
            INITIAL_COMPANY_NAME => &self.initial_company_name,
            ORIGINAL_COMPANY_NAME => &self.original_company_name,
            PARENT_COMPANY => &self.parent_company,
            PARENT_COMPANY_COUNTRY => &self.parent_company_country,
            INDUSTRY_NAICS_3 => &self.naics_3,
            INDUSTRY_NAICS_4 => &self.naics_4,
            INDUSTRY_NAICS_5 => &self.naics_5,
            REVENUE_2023_USD => &self.revenue,
            _ => return None,
        };
        value.as_deref()
    }

    fn column_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        match column {
            INITIAL_COMPANY_NAME => Some(&mut self.initial_company_name),
            ORIGINAL_COMPANY_NAME => Some(&mut self.original_company_name),
            PARENT_COMPANY => Some(&mut self.parent_company),
            PARENT_COMPANY_COUNTRY => Some(&mut self.parent_company_country),
            INDUSTRY_NAICS_3 => Some(&mut self.naics_3),
            INDUSTRY_NAICS_4 => Some(&mut self.naics_4),
            INDUSTRY_NAICS_5 => Some(&mut self.naics_5),
            REVENUE_2023_USD => Some(&mut self.revenue),
            _ => None,
        }
    }

    // The fallback record: every listed column set to "Not Available"
    pub fn unavailable(columns: &[&str]) -> Self {
        let mut info = Self::default();
        for column in columns {
            if let Some(slot) = info.column_mut(column) {
                *slot = Some(NOT_AVAILABLE.to_string());
            }
        }
        info
    }
}

// True when a dataset cell has no usable value
pub fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NOT_AVAILABLE
}

// Accepts strings, numbers and booleans; null becomes None
//
// Models do not always quote revenue figures or codes
pub(super) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.trim().to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_structured_answer() {
        let info: CompanyInfo = serde_json::from_value(json!({
            "initial_company_name": "Tesla",
            "original_company_name": "Tesla, Inc.",
            "parent_company": "Tesla, Inc.",
            "parent_company_country": "US",
            "industry_naics_3_digit": "336 - Transportation Equipment Manufacturing",
            "industry_naics_4_digit": 3361,
            "industry_naics_5_digit": null,
            "revenue_2023_usd": "96,773 M"
        }))
        .unwrap();

        assert_eq!(info.column(ORIGINAL_COMPANY_NAME), Some("Tesla, Inc."));
        assert_eq!(info.column(INDUSTRY_NAICS_4), Some("3361"));
        assert_eq!(info.column(INDUSTRY_NAICS_5), None);
        assert_eq!(info.column(REVENUE_2023_USD), Some("96,773 M"));
        assert_eq!(info.column("unknown"), None);
    }

    #[test]
    fn test_revenue_latest_alias() {
        let info: CompanyInfo =
            serde_json::from_value(json!({"revenue_latest": "1,200 M (2022)"})).unwrap();
        assert_eq!(info.revenue.as_deref(), Some("1,200 M (2022)"));
        assert_eq!(info.original_company_name, None);
    }

    #[test]
    fn test_unavailable_sets_only_listed_columns() {
        let info = CompanyInfo::unavailable(&[ORIGINAL_COMPANY_NAME, REVENUE_2023_USD]);
        assert_eq!(info.column(ORIGINAL_COMPANY_NAME), Some(NOT_AVAILABLE));
        assert_eq!(info.column(REVENUE_2023_USD), Some(NOT_AVAILABLE));
        assert_eq!(info.column(PARENT_COMPANY), None);
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("Not Available"));
        assert!(!is_missing("Not applicable"));
        assert!(!is_missing("Tesla"));
    }
}
