// file: src/models/record.rs
// description: fixed-schema result rows for the email and review recipes
// reference: column names match the published CSV headers

use serde::{Deserialize, Serialize};

/// A result row with a closed, ordered column set.
pub trait Record: Serialize {
    const COLUMNS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    #[serde(rename = "FROM")]
    pub from: String,
    #[serde(rename = "TO")]
    pub to: String,
    #[serde(rename = "SUMMARY")]
    pub summary: String,
    #[serde(rename = "SUMMARY(Translated)")]
    pub translated_summary: String,
}

impl Record for EmailRecord {
    const COLUMNS: &'static [&'static str] = &["FROM", "TO", "SUMMARY", "SUMMARY(Translated)"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "Original Product")]
    pub original_product: String,
    #[serde(rename = "Guessed Product")]
    pub guessed_product: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    #[serde(rename = "Review")]
    pub review: String,
    #[serde(rename = "Reply")]
    pub reply: String,
}

impl Record for ReviewRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Original Product",
        "Guessed Product",
        "Sentiment",
        "Review",
        "Reply",
    ];
}
