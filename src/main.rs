use anyhow::{Context, Result};
use rusqlite::Connection;

use banks_etl::{
    extract, fetch_page, fixed_queries, load_to_csv, load_to_db, run_query, transform,
    verify_count, EnrichedBank, EtlConfig, ExchangeRates, RunLog,
};

fn main() -> Result<()> {
    run_etl(&EtlConfig::default())
}

fn run_etl(config: &EtlConfig) -> Result<()> {
    println!("🏦 Largest Banks ETL - Web Table → CSV + SQLite");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let log = RunLog::new(&config.log_path);
    log.append("Preliminaries complete. Initiating ETL process")?;

    // 1. Extract
    println!("\n🌐 Fetching source page...");
    let html = fetch_page(&config.url)?;
    let records = extract(&html, &log)?;
    println!("✓ Extracted {} bank records", records.len());
    log.append("Data extraction complete")?;

    // 2. Transform
    println!("\n💱 Applying exchange rates...");
    let rates = ExchangeRates::from_path(&config.rate_csv)?;
    let banks = transform(records, &rates)?;
    log.append("Data transformation complete")?;
    print_records(&banks);

    // 3. Load to CSV
    println!("\n📂 Writing {}...", config.output_csv.display());
    load_to_csv(&banks, &config.output_csv)?;
    log.append("Data saved to CSV file")?;

    // 4. Load to SQLite
    println!("\n💾 Loading table {}...", config.table_name);
    let conn = Connection::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
    log.append("SQL Connection initiated.")?;
    load_to_db(&conn, &config.table_name, &banks)?;
    let count = verify_count(&conn, &config.table_name)?;
    println!("✓ Table {} holds {} rows", config.table_name, count);
    log.append("Data loaded to Database as table. Running the query")?;

    // 5. Verification queries
    for query in fixed_queries(&config.table_name) {
        run_query(&conn, &query)?;
    }

    log.append("ETL process completed successfully")?;
    println!("\n🎉 ETL run complete");

    Ok(())
}

fn print_records(banks: &[EnrichedBank]) {
    println!(
        "{:<40} {:>14} {:>14} {:>14} {:>14}",
        "Name", "MC_USD_Billion", "MC_GBP_Billion", "MC_EUR_Billion", "MC_INR_Billion"
    );
    for bank in banks {
        println!(
            "{:<40} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            bank.name,
            bank.market_cap_usd,
            bank.market_cap_gbp,
            bank.market_cap_eur,
            bank.market_cap_inr
        );
    }
}
