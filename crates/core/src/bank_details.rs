//! Bank-detail annotation attached to imported statement lines.
//!
//! The annotation is a closed struct: unknown keys are rejected when the
//! payload is deserialized, so a typo never lands in the database.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bank-detail validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankDetailsError {
    /// IFSC code is not 4 letters, a zero, then 6 alphanumerics.
    #[error("invalid IFSC code '{0}'")]
    InvalidIfsc(String),

    /// Relationship manager email is malformed.
    #[error("invalid email '{0}'")]
    InvalidEmail(String),

    /// Relationship manager mobile number is malformed.
    #[error("invalid mobile number '{0}'")]
    InvalidMobile(String),

    /// Bank account has no bank name.
    #[error("bank name is required")]
    BlankBankName,
}

/// Contact and account details for the bank behind a statement line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BankDetails {
    /// Account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_no: Option<String>,
    /// IFSC branch code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    /// Relationship manager designation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_manager: Option<String>,
    /// Relationship manager name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rm_name: Option<String>,
    /// Relationship manager email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rm_email: Option<String>,
    /// Relationship manager mobile number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rm_mobile: Option<String>,
    /// Branch name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

impl BankDetails {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|field| field.is_none())
    }

    fn fields(&self) -> [&Option<String>; 7] {
        [
            &self.account_no,
            &self.ifsc_code,
            &self.relationship_manager,
            &self.rm_name,
            &self.rm_email,
            &self.rm_mobile,
            &self.branch_name,
        ]
    }

    /// Trims every field, drops blanks, upper-cases the IFSC code and checks
    /// the formatted fields.
    pub fn validate(self) -> Result<Self, BankDetailsError> {
        let details = Self {
            account_no: clean(self.account_no),
            ifsc_code: clean(self.ifsc_code).map(|code| code.to_ascii_uppercase()),
            relationship_manager: clean(self.relationship_manager),
            rm_name: clean(self.rm_name),
            rm_email: clean(self.rm_email),
            rm_mobile: clean(self.rm_mobile),
            branch_name: clean(self.branch_name),
        };

        if let Some(code) = &details.ifsc_code
            && !is_valid_ifsc(code)
        {
            return Err(BankDetailsError::InvalidIfsc(code.clone()));
        }
        if let Some(email) = &details.rm_email
            && !is_valid_email(email)
        {
            return Err(BankDetailsError::InvalidEmail(email.clone()));
        }
        if let Some(mobile) = &details.rm_mobile
            && !is_valid_mobile(mobile)
        {
            return Err(BankDetailsError::InvalidMobile(mobile.clone()));
        }

        Ok(details)
    }
}

/// A bank account as registered by the finance team. The bank name is the
/// natural key; saving an existing name overwrites its details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    /// Bank name, unique.
    pub bank_name: String,
    /// Account and contact details.
    #[serde(default)]
    pub details: BankDetails,
}

impl BankAccount {
    /// Trims the name and validates the details.
    pub fn validate(self) -> Result<Self, BankDetailsError> {
        let bank_name = self.bank_name.trim().to_string();
        if bank_name.is_empty() {
            return Err(BankDetailsError::BlankBankName);
        }
        Ok(Self {
            bank_name,
            details: self.details.validate()?,
        })
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_valid_ifsc(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 11
        && bytes[..4].iter().all(u8::is_ascii_alphabetic)
        && bytes[4] == b'0'
        && bytes[5..].iter().all(u8::is_ascii_alphanumeric)
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn is_valid_mobile(mobile: &str) -> bool {
    let digits = mobile.trim_start_matches('+');
    let count = digits.chars().filter(char::is_ascii_digit).count();
    digits
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && (10..=15).contains(&count)
}
