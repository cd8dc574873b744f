// 🗄️ Record Store - SWIFT codes in SQLite
// Flat table keyed by code; branches are a computed view over the 8-char prefix

use crate::error::{Result, SwiftError};
use crate::model::{SwiftCodeDetails, SwiftRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const SELECT_COLUMNS: &str =
    "SELECT swift_code, bank_name, address, country_iso2, country_name, is_headquarter
     FROM swift_codes";

/// Open (or create) a database file and make sure the schema exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for crash recovery; in-memory databases answer "memory" and stay as they are
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS swift_codes (
            swift_code TEXT PRIMARY KEY NOT NULL,
            bank_name TEXT NOT NULL,
            address TEXT NOT NULL,
            country_iso2 TEXT NOT NULL,
            country_name TEXT NOT NULL,
            is_headquarter INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_swift_country ON swift_codes(country_iso2)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_swift_prefix ON swift_codes(substr(swift_code, 1, 8))",
        [],
    )?;

    Ok(())
}

fn row_to_record(row: &Row) -> rusqlite::Result<SwiftRecord> {
    Ok(SwiftRecord {
        swift_code: row.get(0)?,
        bank_name: row.get(1)?,
        address: row.get(2)?,
        country_iso2: row.get(3)?,
        country_name: row.get(4)?,
        is_headquarter: row.get(5)?,
    })
}

/// Persist a record. Fails with `DuplicateKey` if the code is already stored.
pub fn insert_swift_code(conn: &Connection, record: &SwiftRecord) -> Result<()> {
    let result = conn.execute(
        "INSERT INTO swift_codes (
            swift_code, bank_name, address, country_iso2, country_name, is_headquarter
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.swift_code,
            record.bank_name,
            record.address,
            record.country_iso2,
            record.country_name,
            record.is_headquarter,
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(SwiftError::DuplicateKey(record.swift_code.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn get_swift_code(conn: &Connection, swift_code: &str) -> Result<SwiftRecord> {
    let sql = format!("{} WHERE swift_code = ?1", SELECT_COLUMNS);
    conn.query_row(&sql, params![swift_code], row_to_record)
        .optional()?
        .ok_or_else(|| SwiftError::NotFound(swift_code.to_string()))
}

/// Non-headquarters records sharing the first 8 characters of `hq`, by code.
pub fn get_branches(conn: &Connection, hq: &SwiftRecord) -> Result<Vec<SwiftRecord>> {
    let sql = format!(
        "{} WHERE substr(swift_code, 1, 8) = ?1
            AND is_headquarter = 0
            AND swift_code <> ?2
         ORDER BY swift_code ASC",
        SELECT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let branches = stmt
        .query_map(params![hq.prefix(), hq.swift_code], row_to_record)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(branches)
}

/// Lookup by code. Headquarters come back with their branches, recomputed on
/// every call; branches come back with `branches: None`.
pub fn get_swift_code_details(conn: &Connection, swift_code: &str) -> Result<SwiftCodeDetails> {
    let record = get_swift_code(conn, swift_code)?;

    let branches = if record.is_headquarter {
        Some(get_branches(conn, &record)?)
    } else {
        None
    };

    Ok(SwiftCodeDetails { record, branches })
}

/// All records for one country, ordered by code ascending.
pub fn get_swift_codes_by_country(
    conn: &Connection,
    country_iso2: &str,
) -> Result<Vec<SwiftRecord>> {
    let sql = format!(
        "{} WHERE country_iso2 = ?1 ORDER BY swift_code ASC",
        SELECT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let records = stmt
        .query_map(params![country_iso2], row_to_record)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(records)
}

/// Remove one record. Branches of a deleted headquarters are left in place.
pub fn delete_swift_code(conn: &Connection, swift_code: &str) -> Result<()> {
    let deleted = conn.execute(
        "DELETE FROM swift_codes WHERE swift_code = ?1",
        params![swift_code],
    )?;

    if deleted == 0 {
        return Err(SwiftError::NotFound(swift_code.to_string()));
    }
    Ok(())
}

pub fn count_swift_codes(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM swift_codes", [], |row| row.get(0))?;
    Ok(count)
}
