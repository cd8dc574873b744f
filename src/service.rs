// 🧭 Query/Command Service - the operations behind the HTTP boundary
// Validates writes, normalises lookups, delegates to the record store

use crate::db;
use crate::error::{Result, SwiftError};
use crate::importer::{self, ImportReport};
use crate::model::{CountrySwiftCodes, NewSwiftCode, SwiftCodeDetails, SwiftRecord};
use crate::validator::{validate_country_iso2, validate_record};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Shared handle to the record store. Cheap to clone; every clone talks to
/// the same connection. Each operation is a single store call, atomicity is
/// left to SQLite.
#[derive(Clone)]
pub struct SwiftService {
    db: Arc<Mutex<Connection>>,
}

impl SwiftService {
    /// Wrap a connection whose schema is already set up.
    pub fn new(conn: Connection) -> Self {
        SwiftService {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// In-memory store with the schema created. Handy for tests and demos.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        db::setup_database(&conn)?;
        Ok(SwiftService::new(conn))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| SwiftError::LockPoisoned)
    }

    /// Bulk-load a dataset through the importer.
    pub fn import_dataset(&self, path: &Path) -> Result<ImportReport> {
        let conn = self.conn()?;
        importer::import_dataset(&conn, path)
    }

    /// Startup load: imports `path` when it exists, otherwise does nothing.
    /// An unreadable file or a header lacking required columns is an error.
    pub fn preload(&self, path: &Path) -> Result<Option<ImportReport>> {
        if !path.exists() {
            info!(path = %path.display(), "no dataset found, skipping import");
            return Ok(None);
        }

        let report = self.import_dataset(path)?;
        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            invalid = report.invalid,
            "preloaded SWIFT dataset"
        );
        Ok(Some(report))
    }

    /// Validate and store a new code. The stored record is returned.
    pub fn create(&self, input: &NewSwiftCode) -> Result<SwiftRecord> {
        let record = input.to_record();
        validate_record(&record).map_err(SwiftError::Validation)?;

        let conn = self.conn()?;
        db::insert_swift_code(&conn, &record)?;
        info!(code = %record.swift_code, "SWIFT code created");

        Ok(record)
    }

    /// Lookup by code; headquarters carry their branches.
    pub fn get_by_code(&self, swift_code: &str) -> Result<SwiftCodeDetails> {
        let code = normalize(swift_code);
        let conn = self.conn()?;
        db::get_swift_code_details(&conn, &code)
    }

    /// All codes for a country, ordered by code. The ISO2 code is checked
    /// before the store is touched.
    pub fn list_by_country(&self, country_iso2: &str) -> Result<CountrySwiftCodes> {
        let iso2 = normalize(country_iso2);
        validate_country_iso2(&iso2)?;

        let conn = self.conn()?;
        let records = db::get_swift_codes_by_country(&conn, &iso2)?;
        Ok(CountrySwiftCodes::new(&iso2, records))
    }

    pub fn delete(&self, swift_code: &str) -> Result<()> {
        let code = normalize(swift_code);
        let conn = self.conn()?;
        db::delete_swift_code(&conn, &code)?;
        info!(%code, "SWIFT code deleted");
        Ok(())
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self.conn()?;
        db::count_swift_codes(&conn)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}
