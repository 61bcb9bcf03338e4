// 🌐 Row Extractor - Scrape the Largest-Banks Table
// Fetches the archived page and walks the first table body, turning each
// qualifying row into a BankRecord. Rows without a usable name are skipped
// with a run-log diagnostic; a bad market-cap cell aborts the run.

use crate::records::BankRecord;
use crate::runlog::RunLog;
use anyhow::{bail, Context, Result};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Fetch the raw HTML of the source page. Single blocking GET, no retries.
pub fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("Mozilla/5.0 (compatible; banks-etl/1.0)")
        .build()
        .context("Failed to build HTTP client")?;

    let body = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Source page returned an error status: {}", url))?
        .text()
        .context("Failed to read response body")?;

    Ok(body)
}

/// Extract bank records from the first `<tbody>` of the page, in row order.
///
/// Per row: the name is the text of the first anchor in the second cell that
/// does not wrap an image (anchors wrapping images are the flag icons), and
/// the market cap is the third cell parsed as a number with commas removed.
pub fn extract(html: &str, log: &RunLog) -> Result<Vec<BankRecord>> {
    let document = Html::parse_document(html);

    let tbody_selector = Selector::parse("tbody").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let selectors = RowSelectors::new();

    // Only the first table body is authoritative; later tables are ignored.
    let tbody = match document.select(&tbody_selector).next() {
        Some(tbody) => tbody,
        None => bail!("Source page contains no table body"),
    };

    let mut records = Vec::new();

    for row in tbody.select(&row_selector) {
        match extract_row(row, &selectors)? {
            RowOutcome::Record(record) => records.push(record),
            RowOutcome::TooFewCells => {
                log.append(&format!(
                    "Skipping row with fewer than 3 cells: {}",
                    collapse_whitespace(&row.html())
                ))?;
            }
            RowOutcome::NoName => {
                log.append(&format!(
                    "Skipping row without a qualifying bank name: {}",
                    collapse_whitespace(&row.html())
                ))?;
            }
        }
    }

    Ok(records)
}

/// What one table row produced. Both skip variants exclude the row from the
/// output and cost one run-log diagnostic.
enum RowOutcome {
    Record(BankRecord),
    /// Header, footer, or structurally malformed row.
    TooFewCells,
    /// No anchor in the second cell carried a usable name.
    NoName,
}

struct RowSelectors {
    cell: Selector,
    anchor: Selector,
    image: Selector,
}

impl RowSelectors {
    fn new() -> Self {
        RowSelectors {
            cell: Selector::parse("td").unwrap(),
            anchor: Selector::parse("a").unwrap(),
            image: Selector::parse("img").unwrap(),
        }
    }
}

/// One row of the table. An unparseable market-cap cell is fatal; every
/// other shortfall is a skip.
fn extract_row(row: ElementRef, selectors: &RowSelectors) -> Result<RowOutcome> {
    let cells: Vec<ElementRef> = row.select(&selectors.cell).collect();
    if cells.len() < 3 {
        return Ok(RowOutcome::TooFewCells);
    }

    // Second cell: the first anchor that does not wrap an image carries the
    // bank name. Anchors wrapping images are the flag icons.
    let name = cells[1]
        .select(&selectors.anchor)
        .find(|anchor| anchor.select(&selectors.image).next().is_none())
        .map(|anchor| anchor.text().collect::<String>().trim().to_string());

    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(RowOutcome::NoName),
    };

    // Third cell: market cap in billions, thousands separators removed.
    let raw_cap = cells[2].text().collect::<String>();
    let cleaned = raw_cap.trim().replace(',', "");
    let market_cap_usd: f64 = cleaned.parse().with_context(|| {
        format!(
            "Failed to parse market cap {:?} for bank {:?}",
            raw_cap.trim(),
            name
        )
    })?;

    if !market_cap_usd.is_finite() || market_cap_usd < 0.0 {
        bail!(
            "Market cap for bank {:?} is not a finite non-negative number: {}",
            name,
            market_cap_usd
        );
    }

    Ok(RowOutcome::Record(BankRecord {
        name,
        market_cap_usd,
    }))
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
