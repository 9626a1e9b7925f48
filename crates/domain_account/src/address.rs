//! Address types
//!
//! Addresses have no lifecycle of their own: they are created, updated and
//! deleted only through the owning [`Account`](crate::account::Account).

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::AddressId;

/// A postal address owned by exactly one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Address {
    /// Storage-assigned identity, `None` until first persisted
    pub id: Option<AddressId>,
    #[validate(length(min = 2, max = 200, message = "Address must be between 2 and 200 characters"))]
    pub line1: String,
    #[validate(length(max = 200, message = "Address must be between 2 and 200 characters"))]
    pub line2: Option<String>,
    #[validate(length(min = 2, max = 200, message = "City must be between 2 and 200 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 2, message = "State only allows an abbreviation of 2 characters"))]
    pub state: String,
    #[validate(length(max = 200, message = "Province must be between 0 and 200 characters"))]
    pub province: Option<String>,
    #[validate(length(min = 5, max = 10, message = "Postal Code must be between 5 and 10 numbers"))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 200, message = "Country must be between 1 and 200 characters"))]
    pub country: String,
}

impl Address {
    /// Creates a new, unpersisted address
    pub fn new(
        line1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            line1: line1.into(),
            line2: None,
            city: city.into(),
            state: state.into(),
            province: None,
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }

    /// Sets the storage identity
    pub fn with_id(mut self, id: AddressId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the second address line
    pub fn with_line2(mut self, line2: impl Into<String>) -> Self {
        self.line2 = Some(line2.into());
        self
    }

    /// Sets the province
    pub fn with_province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    /// Returns true once storage has assigned an identity
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns true if `other` denotes the same member of an address set.
    ///
    /// Persisted addresses are the same member when their ids match.
    /// Otherwise the full contents must match.
    pub fn same_member(&self, other: &Address) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Formats address for display
    pub fn format(&self) -> String {
        let mut lines = vec![self.line1.clone()];
        if let Some(l2) = self.line2.as_deref().filter(|l| !l.is_empty()) {
            lines.push(l2.to_string());
        }
        lines.push(format!("{}, {} {}", self.city, self.state, self.postal_code));
        if let Some(province) = self.province.as_deref().filter(|p| !p.is_empty()) {
            lines.push(province.to_string());
        }
        lines.push(self.country.clone());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food_forest() -> Address {
        Address::new("100", "Food Forest City", "FL", "33000", "US")
    }

    #[test]
    fn test_new_address_is_unpersisted() {
        let address = food_forest();
        assert!(!address.is_persisted());
        assert!(address.line2.is_none());
    }

    #[test]
    fn test_same_member_by_id() {
        let a = food_forest().with_id(AddressId::new(100));
        let mut b = food_forest().with_id(AddressId::new(100));
        b.line1 = "1001 New Lane".to_string();
        assert!(a.same_member(&b));
    }

    #[test]
    fn test_same_member_by_content_when_unpersisted() {
        assert!(food_forest().same_member(&food_forest()));
        assert!(!food_forest().same_member(&food_forest().with_line2("Suite #100")));
    }

    #[test]
    fn test_persisted_and_unpersisted_are_distinct_members() {
        let persisted = food_forest().with_id(AddressId::new(1));
        assert!(!persisted.same_member(&food_forest()));
    }

    #[test]
    fn test_format_skips_empty_optional_lines() {
        let address = food_forest().with_line2("").with_province("");
        assert_eq!(address.format(), "100\nFood Forest City, FL 33000\nUS");
    }

    #[test]
    fn test_format_includes_second_line() {
        let address = food_forest().with_line2("Suite #100");
        assert!(address.format().contains("Suite #100"));
    }
}
