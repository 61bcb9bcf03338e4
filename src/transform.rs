// 📊 Record Enricher - Currency Conversion Pass
// Pure with respect to its inputs: records in, enriched records out, order
// preserved. The three required rates are validated before any conversion.

use crate::rates::ExchangeRates;
use crate::records::{BankRecord, EnrichedBank};
use anyhow::Result;

/// Round to 2 decimal places, ties away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Append GBP, EUR, and INR market caps to every record.
///
/// Fails before converting anything if the rate map lacks a required code.
/// Re-running with the same rate map reproduces the same derived values.
pub fn transform(records: Vec<BankRecord>, rates: &ExchangeRates) -> Result<Vec<EnrichedBank>> {
    let gbp = rates.require("GBP")?;
    let eur = rates.require("EUR")?;
    let inr = rates.require("INR")?;

    let enriched = records
        .into_iter()
        .map(|record| EnrichedBank {
            market_cap_gbp: round2(record.market_cap_usd * gbp),
            market_cap_eur: round2(record.market_cap_usd * eur),
            market_cap_inr: round2(record.market_cap_usd * inr),
            name: record.name,
            market_cap_usd: record.market_cap_usd,
        })
        .collect();

    Ok(enriched)
}
