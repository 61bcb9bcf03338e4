// 💾 Sink Writer + Query Runner - CSV File, SQLite Table, Fixed Queries
// The flat-file sink overwrites its target; the relational sink drops and
// recreates the table each run. The query runner echoes each statement and
// its result rows to the operator, the run's verification step.

use crate::records::EnrichedBank;
use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use std::path::Path;

/// Sink column names, shared by the CSV header and the table schema.
const COLUMNS: [&str; 5] = [
    "Name",
    "MC_USD_Billion",
    "MC_GBP_Billion",
    "MC_EUR_Billion",
    "MC_INR_Billion",
];

/// Write the enriched records as delimited text, one header row then one row
/// per record in pipeline order. Any existing file at `path` is replaced.
/// The header is written even when the record set is empty.
pub fn load_to_csv(records: &[EnrichedBank], path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open output CSV {}", path.display()))?;

    wtr.write_record(COLUMNS)
        .context("Failed to write CSV header")?;

    for record in records {
        wtr.serialize(record)
            .context("Failed to serialize record to CSV")?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to flush output CSV {}", path.display()))?;

    Ok(())
}

/// Create or replace `table` and insert one row per record, in order.
pub fn load_to_db(conn: &Connection, table: &str, records: &[EnrichedBank]) -> Result<()> {
    conn.execute(&format!("DROP TABLE IF EXISTS {}", table), [])
        .with_context(|| format!("Failed to drop table {}", table))?;

    conn.execute(
        &format!(
            "CREATE TABLE {} (
                Name TEXT NOT NULL,
                MC_USD_Billion REAL NOT NULL,
                MC_GBP_Billion REAL NOT NULL,
                MC_EUR_Billion REAL NOT NULL,
                MC_INR_Billion REAL NOT NULL
            )",
            table
        ),
        [],
    )
    .with_context(|| format!("Failed to create table {}", table))?;

    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {} (
            Name, MC_USD_Billion, MC_GBP_Billion, MC_EUR_Billion, MC_INR_Billion
        ) VALUES (?1, ?2, ?3, ?4, ?5)",
        table
    ))?;

    for record in records {
        stmt.execute(params![
            record.name,
            record.market_cap_usd,
            record.market_cap_gbp,
            record.market_cap_eur,
            record.market_cap_inr,
        ])
        .with_context(|| format!("Failed to insert row for bank {:?}", record.name))?;
    }

    Ok(())
}

pub fn verify_count(conn: &Connection, table: &str) -> Result<i64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table),
        [],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// The three verification queries, run in this order after the load.
pub fn fixed_queries(table: &str) -> [String; 3] {
    [
        format!("SELECT * FROM {}", table),
        format!("SELECT AVG(MC_GBP_Billion) FROM {}", table),
        format!("SELECT Name FROM {} LIMIT 5", table),
    ]
}

/// Captured result of one read query: the statement, its column names, and
/// every row rendered as display strings.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    pub statement: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryOutput {
    /// Echo the statement, then the column header, then each row.
    pub fn print(&self) {
        println!("\n{}", self.statement);
        println!("{}", self.columns.join(" | "));
        for row in &self.rows {
            println!("{}", row.join(" | "));
        }
    }
}

/// Execute one read-only statement, print its output, and return the
/// captured result set.
pub fn run_query(conn: &Connection, sql: &str) -> Result<QueryOutput> {
    let mut stmt = conn
        .prepare(sql)
        .with_context(|| format!("Failed to prepare query: {}", sql))?;

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();

    let rows = stmt
        .query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(display_value(row.get_ref(i)?));
            }
            Ok(values)
        })?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to run query: {}", sql))?;

    let output = QueryOutput {
        statement: sql.to_string(),
        columns,
        rows,
    };
    output.print();

    Ok(output)
}

fn display_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} byte blob>", b.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TABLE: &str = "Largest_banks";

    fn bank(name: &str, usd: f64) -> EnrichedBank {
        EnrichedBank {
            name: name.to_string(),
            market_cap_usd: usd,
            market_cap_gbp: usd * 0.8,
            market_cap_eur: usd * 0.93,
            market_cap_inr: usd * 82.95,
        }
    }

    #[test]
    fn test_load_to_db_and_verify_count() {
        let conn = Connection::open_in_memory().unwrap();
        let banks = vec![bank("A", 100.0), bank("B", 200.0)];

        load_to_db(&conn, TABLE, &banks).unwrap();

        assert_eq!(verify_count(&conn, TABLE).unwrap(), 2);
    }

    #[test]
    fn test_load_replaces_existing_table() {
        let conn = Connection::open_in_memory().unwrap();

        load_to_db(&conn, TABLE, &vec![bank("Old", 1.0), bank("Stale", 2.0)]).unwrap();
        load_to_db(&conn, TABLE, &vec![bank("New", 3.0)]).unwrap();

        assert_eq!(
            verify_count(&conn, TABLE).unwrap(),
            1,
            "Reload should replace the table, not append to it"
        );

        let output = run_query(&conn, &format!("SELECT Name FROM {}", TABLE)).unwrap();
        assert_eq!(output.rows, vec![vec!["New".to_string()]]);
    }

    #[test]
    fn test_select_all_returns_five_columns() {
        let conn = Connection::open_in_memory().unwrap();
        load_to_db(&conn, TABLE, &vec![bank("A", 100.0)]).unwrap();

        let [select_all, _, _] = fixed_queries(TABLE);
        let output = run_query(&conn, &select_all).unwrap();

        assert_eq!(
            output.columns,
            vec![
                "Name",
                "MC_USD_Billion",
                "MC_GBP_Billion",
                "MC_EUR_Billion",
                "MC_INR_Billion"
            ]
        );
        assert_eq!(output.rows.len(), 1);
    }

    #[test]
    fn test_average_gbp_query() {
        let conn = Connection::open_in_memory().unwrap();
        // GBP caps are 8.0 and 16.0, average 12.0
        load_to_db(&conn, TABLE, &vec![bank("A", 10.0), bank("B", 20.0)]).unwrap();

        let [_, avg_query, _] = fixed_queries(TABLE);
        let output = run_query(&conn, &avg_query).unwrap();

        let avg: f64 = output.rows[0][0].parse().unwrap();
        assert!((avg - 12.0).abs() < 1e-9, "Expected average 12.0, got {}", avg);
    }

    #[test]
    fn test_top_five_names_in_insertion_order() {
        let conn = Connection::open_in_memory().unwrap();
        let banks: Vec<EnrichedBank> = (1..=7).map(|i| bank(&format!("Bank{}", i), i as f64)).collect();
        load_to_db(&conn, TABLE, &banks).unwrap();

        let [_, _, top_five] = fixed_queries(TABLE);
        let output = run_query(&conn, &top_five).unwrap();

        let names: Vec<&str> = output.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(
            names,
            vec!["Bank1", "Bank2", "Bank3", "Bank4", "Bank5"],
            "Query should return exactly 5 names in insertion order"
        );
    }

    #[test]
    fn test_csv_header_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Largest_banks_data.csv");

        fs::write(&path, "stale contents from a previous run\n").unwrap();

        load_to_csv(&vec![bank("Example Bank", 1234.5)], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(
            lines[0],
            "Name,MC_USD_Billion,MC_GBP_Billion,MC_EUR_Billion,MC_INR_Billion",
            "Header row must use the sink column names"
        );
        assert_eq!(lines.len(), 2, "Header plus one record; old contents gone");
        assert!(lines[1].starts_with("Example Bank,1234.5"));
    }

    #[test]
    fn test_csv_header_written_for_empty_record_set() {
        // A run where every source row is skipped still produces the header,
        // matching the relational sink's unconditional table creation.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Largest_banks_data.csv");

        load_to_csv(&[], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.lines().next(),
            Some("Name,MC_USD_Billion,MC_GBP_Billion,MC_EUR_Billion,MC_INR_Billion"),
            "Header row must be present even with zero records"
        );
        assert_eq!(contents.lines().count(), 1);
    }
}
