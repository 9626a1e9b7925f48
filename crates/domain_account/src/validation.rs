//! Account validation rules
//!
//! This module checks every field constraint of an account and its owned
//! addresses before anything reaches storage.
//!
//! # Validation Rules
//!
//! ## Account
//! - Account reference ID: 6-255 characters
//! - First and last name: 2-200 characters
//! - Email address: 3-200 characters, valid syntax
//!
//! ## Address
//! - Line 1 and city: 2-200 characters
//! - Line 2 and province: at most 200 characters
//! - State: 1-2 characters
//! - Postal code: 5-10 characters
//! - Country: 1-200 characters
//!
//! Field lengths are declared on the types with `validator` derives. Email
//! syntax is checked twice: once by `validator`'s own email rule and once by a
//! stricter shape rule (dotted domain, alphabetic top-level label, no quotes
//! or non-ASCII in the local part). The shape rule's patterns are compiled
//! once per process on first use.

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::account::Account;

const EMAIL_SHAPE_CODE: &str = "email_shape";
const EMAIL_SHAPE_MESSAGE: &str = "Invalid e-mail address.";

/// Field name of the email address in violation reports
pub const EMAIL_FIELD: &str = "email_address";

/// Compiled patterns for the email shape rule
struct EmailRules {
    local_part: Regex,
    domain_label: Regex,
    top_level_label: Regex,
}

impl EmailRules {
    fn compile() -> Self {
        Self {
            local_part: Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
                .expect("Invalid regex"),
            domain_label: Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
                .expect("Invalid regex"),
            top_level_label: Regex::new(r"^[A-Za-z]{2,63}$").expect("Invalid regex"),
        }
    }

    fn accepts(&self, value: &str) -> bool {
        let Some((local, domain)) = value.rsplit_once('@') else {
            return false;
        };
        if !self.local_part.is_match(local) {
            return false;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        let Some((top_level, rest)) = labels.split_last() else {
            return false;
        };
        !rest.is_empty()
            && rest.iter().all(|label| self.domain_label.is_match(label))
            && self.top_level_label.is_match(top_level)
    }
}

static EMAIL_RULES: Lazy<EmailRules> = Lazy::new(EmailRules::compile);

/// Stricter email syntax rule used alongside `validator`'s email check
pub fn validate_email_shape(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RULES.accepts(value) {
        return Ok(());
    }
    let mut error = ValidationError::new(EMAIL_SHAPE_CODE);
    error.message = Some(Cow::Borrowed(EMAIL_SHAPE_MESSAGE));
    Err(error)
}

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path of the field, e.g. `addresses[0].city`
    pub field: String,
    /// Human readable message
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Transient constraint report for one account
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Records a violation
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Returns true if any constraint is violated
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns true if the email address broke any of its constraints
    pub fn has_email_violation(&self) -> bool {
        self.violations.iter().any(|v| v.field == EMAIL_FIELD)
    }

    /// Violations in detection order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the first violation detected, if any
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Renders every violation as `field: message`
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    fn absorb(&mut self, prefix: Option<&str>, errors: ValidationErrors) {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        // HashMap order is random; keep reports stable
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, field_errors) in fields {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, field),
                None => field.to_string(),
            };
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                self.add(path.clone(), message);
            }
        }
    }
}

/// Validator for account aggregates
///
/// # Examples
///
/// ```rust
/// use domain_account::{Account, Address, AccountValidator};
///
/// let account = Account::new(
///     "Minimal",
///     "CreateAccount",
///     "dukefirst.last@enjoy.com",
///     vec![Address::new("100", "Food Forest City", "FL", "33000", "US")],
/// )
/// .with_account_ref_id("REF-000001");
///
/// assert!(!AccountValidator::validate(&account));
/// ```
pub struct AccountValidator;

impl AccountValidator {
    /// Checks every constraint of the account and its addresses
    ///
    /// # Returns
    ///
    /// `true` if any constraint is violated
    pub fn validate(account: &Account) -> bool {
        Self::report(account).has_violations()
    }

    /// Builds the full constraint report for an account
    pub fn report(account: &Account) -> ValidationReport {
        let mut report = ValidationReport::default();

        if account.account_ref_id.is_none() {
            report.add("account_ref_id", "Account reference ID is required");
        }
        if let Err(errors) = account.validate() {
            report.absorb(None, errors);
        }

        for (index, address) in account.addresses.iter().enumerate() {
            if let Err(errors) = address.validate() {
                report.absorb(Some(&format!("addresses[{}]", index)), errors);
            }
        }

        report
    }
}
