// ⚙️ Configuration - environment variables with defaults
// A `.env` file in the working directory is honoured

use std::path::PathBuf;

pub const ENV_DATABASE_PATH: &str = "SWIFT_DATABASE_PATH";
pub const ENV_DATA_FILE: &str = "SWIFT_DATA_FILE";
pub const ENV_BIND_ADDR: &str = "SWIFT_BIND_ADDR";

pub const DEFAULT_DATABASE_PATH: &str = "swift_codes.db";
pub const DEFAULT_DATA_FILE: &str = "data/Interns_2025_SWIFT_CODES.xlsx";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Dataset imported at startup when present.
    pub data_file: PathBuf,
    pub bind_addr: String,
}

impl Config {
    /// Load from the process environment after reading `.env`, if any.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Config {
            database_path: PathBuf::from(get(ENV_DATABASE_PATH, DEFAULT_DATABASE_PATH)),
            data_file: PathBuf::from(get(ENV_DATA_FILE, DEFAULT_DATA_FILE)),
            bind_addr: get(ENV_BIND_ADDR, DEFAULT_BIND_ADDR),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from_lookup(|_| None)
    }
}
