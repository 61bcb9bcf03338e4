// 💱 Rate Table Loader - Currency Code → Multiplier Map
// Loaded once from a two-column CSV at the start of the Transform step,
// read-only afterwards.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,

    #[serde(rename = "Rate")]
    rate: f64,
}

/// Exchange-rate map keyed by currency code. Keys are unique; a duplicate
/// code in the source CSV keeps the last occurrence.
#[derive(Debug, Clone)]
pub struct ExchangeRates {
    rates: HashMap<String, f64>,
}

impl ExchangeRates {
    pub fn from_path(path: &Path) -> Result<Self> {
        let rdr = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open exchange-rate CSV {}", path.display()))?;
        Self::from_csv(rdr)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let mut rates = HashMap::new();

        for result in rdr.deserialize() {
            let row: RateRow = result.context("Failed to deserialize exchange-rate row")?;
            rates.insert(row.currency, row.rate);
        }

        Ok(ExchangeRates { rates })
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Look up a rate that the pipeline cannot run without.
    pub fn require(&self, code: &str) -> Result<f64> {
        match self.rate(code) {
            Some(rate) => Ok(rate),
            None => bail!("Required currency code {:?} missing from exchange-rate CSV", code),
        }
    }
}
