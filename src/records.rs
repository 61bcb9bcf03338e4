// 🏦 Record Types - Bank Records Before and After Enrichment
// Serde renames map each field to the exact sink column name, so the CSV
// writer and the SQLite table share one source of truth for headers.

use serde::{Deserialize, Serialize};

/// One bank as extracted from the source table: name plus USD market cap.
///
/// Invariants: `name` is non-empty, `market_cap_usd` is finite and
/// non-negative. Rows that cannot satisfy these never become records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "MC_USD_Billion")]
    pub market_cap_usd: f64,
}

/// A `BankRecord` extended with the three converted market-cap columns.
/// This is the pipeline's terminal value, consumed by both sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBank {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "MC_USD_Billion")]
    pub market_cap_usd: f64,

    #[serde(rename = "MC_GBP_Billion")]
    pub market_cap_gbp: f64,

    #[serde(rename = "MC_EUR_Billion")]
    pub market_cap_eur: f64,

    #[serde(rename = "MC_INR_Billion")]
    pub market_cap_inr: f64,
}
