// Largest Banks ETL - Core Library
// Exposes the pipeline stages for use in the binary and tests

pub mod config;
pub mod extract;
pub mod load;
pub mod rates;
pub mod records;
pub mod runlog;
pub mod transform;

// Re-export commonly used types
pub use config::EtlConfig;
pub use extract::{extract, fetch_page};
pub use load::{fixed_queries, load_to_csv, load_to_db, run_query, verify_count, QueryOutput};
pub use rates::ExchangeRates;
pub use records::{BankRecord, EnrichedBank};
pub use runlog::RunLog;
pub use transform::transform;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
