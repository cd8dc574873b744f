// 📐 Code Validator - SWIFT/BIC format rules
// Pure functions: decompose a code, validate a record's fields

use crate::countries::is_known_country;
use crate::model::SwiftRecord;
use serde::Serialize;
use thiserror::Error;

/// Branch suffix that marks an 11-character code as a headquarters.
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// Length of the bank + country + location prefix shared by an HQ and its branches.
pub const PREFIX_LEN: usize = 8;

pub const MIN_CODE_LEN: usize = 8;
pub const MAX_CODE_LEN: usize = 11;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single failed rule. `field` uses the wire name (`swiftCode`, `bankName`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

// ============================================================================
// CODE DECOMPOSITION
// ============================================================================

/// Structural decomposition of a SWIFT code (`BBBBCCLLbbb`), canonical uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeParts {
    pub bank_code: String,
    pub country_code: String,
    pub location: String,
    /// Empty when the code is 8 characters long.
    pub branch: String,
}

impl CodeParts {
    pub fn is_headquarter(&self) -> bool {
        headquarter_rule(&self.code())
    }

    /// The full canonical code the parts were split from.
    pub fn code(&self) -> String {
        format!("{}{}", self.prefix(), self.branch)
    }

    /// First 8 characters: the key that links branches to their headquarters.
    pub fn prefix(&self) -> String {
        format!("{}{}{}", self.bank_code, self.country_code, self.location)
    }
}

/// Split a code into its segments, checking the rules in order:
/// length and charset, bank, country, location, branch.
pub fn parse_code(code: &str) -> Result<CodeParts, ValidationError> {
    let code = code.trim().to_ascii_uppercase();
    let len = code.len();

    if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
        return Err(invalid_code(format!(
            "must be {}-{} characters long, got {}",
            MIN_CODE_LEN, MAX_CODE_LEN, len
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid_code("must contain only letters and digits"));
    }

    // All ASCII from here on, byte slicing is safe.
    let bank_code = &code[0..4];
    if !bank_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid_code(format!(
            "bank code '{}' (characters 1-4) must be letters",
            bank_code
        )));
    }

    let country_code = &code[4..6];
    if !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid_code(format!(
            "country code '{}' (characters 5-6) must be letters",
            country_code
        )));
    }
    if !is_known_country(country_code) {
        return Err(invalid_code(format!(
            "country code '{}' (characters 5-6) is not an ISO 3166 country",
            country_code
        )));
    }

    let location = &code[6..8];
    if !location.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid_code(format!(
            "location code '{}' (characters 7-8) must be letters or digits",
            location
        )));
    }

    let branch = &code[8..];
    if !branch.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid_code(format!(
            "branch code '{}' (characters 9-11) must be letters or digits",
            branch
        )));
    }

    Ok(CodeParts {
        bank_code: bank_code.to_string(),
        country_code: country_code.to_string(),
        location: location.to_string(),
        branch: branch.to_string(),
    })
}

fn invalid_code(message: impl Into<String>) -> ValidationError {
    ValidationError::new("swiftCode", message)
}

/// Headquarters iff the code is 8 characters or ends in `XXX`. The same rule
/// backs [`CodeParts::is_headquarter`], so 9 and 10 character codes ending in
/// `XXX` are headquarters on both paths.
pub fn is_headquarter_code(code: &str) -> bool {
    headquarter_rule(&code.trim().to_ascii_uppercase())
}

fn headquarter_rule(canonical: &str) -> bool {
    canonical.len() == MIN_CODE_LEN || canonical.ends_with(HEADQUARTER_SUFFIX)
}

// ============================================================================
// FIELD VALIDATION
// ============================================================================

/// Exactly two uppercase ASCII letters.
pub fn validate_country_iso2(iso2: &str) -> Result<(), ValidationError> {
    if iso2.len() == 2 && iso2.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "countryISO2",
            format!("must be exactly 2 uppercase letters, got '{}'", iso2),
        ))
    }
}

/// Validate a complete record. Collects every failing field rather than
/// stopping at the first.
///
/// Policy for `countryISO2` disagreeing with the country embedded in the
/// code: rejected. Likewise `isHeadquarter` must equal the value derived
/// from the code.
pub fn validate_record(record: &SwiftRecord) -> ValidationResult {
    let mut errors = Vec::new();

    let parts = match parse_code(&record.swift_code) {
        Ok(parts) => Some(parts),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    if parts.is_some() && record.swift_code != record.swift_code.to_ascii_uppercase() {
        errors.push(invalid_code("must be uppercase"));
    }

    for (field, value) in [
        ("bankName", &record.bank_name),
        ("address", &record.address),
        ("countryName", &record.country_name),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        }
    }

    let iso2_ok = match validate_country_iso2(&record.country_iso2) {
        Ok(()) => true,
        Err(e) => {
            errors.push(e);
            false
        }
    };

    if let Some(parts) = parts {
        if iso2_ok && parts.country_code != record.country_iso2 {
            errors.push(ValidationError::new(
                "countryISO2",
                format!(
                    "'{}' does not match country segment '{}' of SWIFT code",
                    record.country_iso2, parts.country_code
                ),
            ));
        }

        if record.is_headquarter != parts.is_headquarter() {
            errors.push(ValidationError::new(
                "isHeadquarter",
                format!(
                    "must be {} for SWIFT code {}",
                    parts.is_headquarter(),
                    record.swift_code
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
