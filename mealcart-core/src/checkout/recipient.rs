//! Delivery recipient captured on the address step.

use thiserror::Error;

/// Maximum number of digits in a phone number.
pub const MAX_PHONE_DIGITS: usize = 10;

/// Why an address form cannot be turned into a [`RecipientInfo`].
///
/// This never reaches the checkout session: without a valid recipient the
/// address step simply does not advance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipientError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("phone must not be empty")]
    EmptyPhone,

    #[error("phone must contain digits only")]
    NonDigitPhone,

    #[error("phone has {0} digits, at most {max} are allowed", max = MAX_PHONE_DIGITS)]
    PhoneTooLong(usize),

    #[error("address must not be empty")]
    EmptyAddress,
}

/// Who receives the order and where.
///
/// Only constructible through [`RecipientInfo::new`], so every instance has
/// a non-blank name and address and a phone of 1 to 10 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipientInfo {
    name: String,
    phone: String,
    address: String,
}

impl RecipientInfo {
    /// Validate the address form. Name and address are trimmed.
    pub fn new(
        name: impl AsRef<str>,
        phone: impl AsRef<str>,
        address: impl AsRef<str>,
    ) -> Result<Self, RecipientError> {
        let name = name.as_ref().trim();
        let phone = phone.as_ref();
        let address = address.as_ref().trim();

        if name.is_empty() {
            return Err(RecipientError::EmptyName);
        }
        if phone.is_empty() {
            return Err(RecipientError::EmptyPhone);
        }
        if !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(RecipientError::NonDigitPhone);
        }
        if phone.len() > MAX_PHONE_DIGITS {
            return Err(RecipientError::PhoneTooLong(phone.len()));
        }
        if address.is_empty() {
            return Err(RecipientError::EmptyAddress);
        }

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Clean raw phone input the way the address form does while typing.
///
/// Input longer than ten characters is refused (`None`), never truncated.
/// Otherwise non-digits are dropped.
pub fn sanitize_phone_input(raw: &str) -> Option<String> {
    if raw.chars().count() > MAX_PHONE_DIGITS {
        return None;
    }
    Some(raw.chars().filter(char::is_ascii_digit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_recipient() {
        let recipient = RecipientInfo::new("  Asha ", "9999999999", " 12 MG Road ").unwrap();
        assert_eq!(recipient.name(), "Asha");
        assert_eq!(recipient.phone(), "9999999999");
        assert_eq!(recipient.address(), "12 MG Road");
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        assert_eq!(
            RecipientInfo::new("   ", "123", "X"),
            Err(RecipientError::EmptyName)
        );
        assert_eq!(
            RecipientInfo::new("A", "", "X"),
            Err(RecipientError::EmptyPhone)
        );
        assert_eq!(
            RecipientInfo::new("A", "123", "\n"),
            Err(RecipientError::EmptyAddress)
        );
    }

    #[test]
    fn test_phone_rules() {
        assert_eq!(
            RecipientInfo::new("A", "99999-9999", "X"),
            Err(RecipientError::NonDigitPhone)
        );
        assert_eq!(
            RecipientInfo::new("A", "12345678901", "X"),
            Err(RecipientError::PhoneTooLong(11))
        );
        assert!(RecipientInfo::new("A", "1", "X").is_ok());
    }

    #[test]
    fn test_sanitize_phone_input() {
        assert_eq!(sanitize_phone_input("98765-4321").as_deref(), Some("987654321"));
        assert_eq!(sanitize_phone_input("abc").as_deref(), Some(""));
        assert_eq!(sanitize_phone_input("9876543210").as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_over_long_phone_input_is_refused() {
        assert_eq!(sanitize_phone_input("919876543210"), None);
        assert_eq!(sanitize_phone_input("+91 98765-43210"), None);
        assert_eq!(sanitize_phone_input("98765 43210"), None);
    }
}
