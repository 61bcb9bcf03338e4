// ⚙️ Pipeline Configuration - Fixed Deployment Constants
// All paths, the source URL, and the table name for one run, passed into the
// pipeline entry point instead of living as module-level globals.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EtlConfig {
    /// Archived source page holding the largest-banks table
    pub url: String,

    /// Input CSV with `Currency,Rate` exchange-rate rows
    pub rate_csv: PathBuf,

    /// Flat-file sink for the enriched record set
    pub output_csv: PathBuf,

    /// File-backed SQLite database
    pub db_path: PathBuf,

    /// Relational table name (created or replaced each run)
    pub table_name: String,

    /// Append-only run log
    pub log_path: PathBuf,
}

impl Default for EtlConfig {
    fn default() -> Self {
        EtlConfig {
            url: "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks".to_string(),
            rate_csv: PathBuf::from("./exchange_rate.csv"),
            output_csv: PathBuf::from("./Largest_banks_data.csv"),
            db_path: PathBuf::from("./Banks.db"),
            table_name: "Largest_banks".to_string(),
            log_path: PathBuf::from("./code_log.txt"),
        }
    }
}
