// SWIFT Code Registry - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod countries;
pub mod db;
pub mod error;
pub mod importer;
pub mod model;
pub mod service;
pub mod validator;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::Config;
pub use db::{
    count_swift_codes, delete_swift_code, get_branches, get_swift_code, get_swift_code_details,
    get_swift_codes_by_country, insert_swift_code, open_database, setup_database,
};
pub use error::{Result, SwiftError};
pub use importer::{
    import_dataset, import_from_reader, import_workbook, DatasetFormat, ImportReport,
    REQUIRED_COLUMNS,
};
pub use model::{CountrySwiftCodes, NewSwiftCode, SwiftCodeDetails, SwiftRecord};
pub use service::SwiftService;
pub use validator::{
    is_headquarter_code, parse_code, validate_country_iso2, validate_record, CodeParts,
    ValidationError, ValidationResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
