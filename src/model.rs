// 🏦 SWIFT Record - the single persisted entity
// Plus the request/response shapes built around it

use crate::validator::is_headquarter_code;
use serde::{Deserialize, Serialize};

/// A SWIFT/BIC code with its bank details. `swift_code` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftRecord {
    #[serde(rename = "swiftCode")]
    pub swift_code: String,

    #[serde(rename = "bankName")]
    pub bank_name: String,

    pub address: String,

    #[serde(rename = "countryISO2")]
    pub country_iso2: String,

    /// Stored upper-cased.
    #[serde(rename = "countryName")]
    pub country_name: String,

    /// Derived from `swift_code`, see [`is_headquarter_code`].
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
}

impl SwiftRecord {
    /// Build a record in canonical form, deriving `is_headquarter` from the code.
    /// Code, country ISO2 and country name are upper-cased; all fields trimmed.
    pub fn new(
        swift_code: &str,
        bank_name: &str,
        address: &str,
        country_iso2: &str,
        country_name: &str,
    ) -> Self {
        let swift_code = swift_code.trim().to_ascii_uppercase();
        let is_headquarter = is_headquarter_code(&swift_code);

        SwiftRecord {
            swift_code,
            bank_name: bank_name.trim().to_string(),
            address: address.trim().to_string(),
            country_iso2: country_iso2.trim().to_ascii_uppercase(),
            country_name: country_name.trim().to_uppercase(),
            is_headquarter,
        }
    }

    /// Bulk-dataset normalisation: every text field upper-cased.
    pub fn from_dataset_row(
        swift_code: &str,
        bank_name: &str,
        address: &str,
        country_iso2: &str,
        country_name: &str,
    ) -> Self {
        SwiftRecord::new(
            swift_code,
            &bank_name.to_uppercase(),
            &address.to_uppercase(),
            country_iso2,
            country_name,
        )
    }

    /// The 8-character bank + country + location prefix.
    pub fn prefix(&self) -> &str {
        self.swift_code.get(..8).unwrap_or(&self.swift_code)
    }
}

// ============================================================================
// CREATE INPUT
// ============================================================================

/// Body of a create request. Missing string fields deserialize as empty so
/// the validator, not the JSON extractor, reports them by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSwiftCode {
    #[serde(rename = "swiftCode", default)]
    pub swift_code: String,

    #[serde(rename = "bankName", default)]
    pub bank_name: String,

    #[serde(default)]
    pub address: String,

    #[serde(rename = "countryISO2", default)]
    pub country_iso2: String,

    #[serde(rename = "countryName", default)]
    pub country_name: String,

    /// Optional. When given it must agree with the code.
    #[serde(rename = "isHeadquarter", default)]
    pub is_headquarter: Option<bool>,
}

impl NewSwiftCode {
    /// Canonical record for this input. A caller-supplied headquarters flag
    /// is carried through as-is so validation can reject a contradiction.
    pub fn to_record(&self) -> SwiftRecord {
        let mut record = SwiftRecord::new(
            &self.swift_code,
            &self.bank_name,
            &self.address,
            &self.country_iso2,
            &self.country_name,
        );
        if let Some(flag) = self.is_headquarter {
            record.is_headquarter = flag;
        }
        record
    }
}

// ============================================================================
// QUERY RESULTS
// ============================================================================

/// Result of a lookup by code. `branches` is present only for headquarters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwiftCodeDetails {
    #[serde(flatten)]
    pub record: SwiftRecord,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<SwiftRecord>>,
}

/// All codes registered for one country, ordered by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySwiftCodes {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,

    #[serde(rename = "countryName", skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,

    #[serde(rename = "swiftCodes")]
    pub swift_codes: Vec<SwiftRecord>,
}

impl CountrySwiftCodes {
    pub fn new(country_iso2: &str, swift_codes: Vec<SwiftRecord>) -> Self {
        CountrySwiftCodes {
            country_iso2: country_iso2.to_string(),
            country_name: swift_codes.first().map(|r| r.country_name.clone()),
            swift_codes,
        }
    }
}
