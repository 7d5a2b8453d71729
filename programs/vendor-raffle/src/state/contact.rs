use anchor_lang::prelude::*;

use crate::error::RaffleError;

pub const MAX_NAME_LEN: usize = 64;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

// 4 + 64 name, 4 + 100 email, 4 + 20 phone
pub const CONTACT_SIZE: usize = 4 + MAX_NAME_LEN + 4 + MAX_EMAIL_LEN + 4 + MAX_PHONE_LEN;

/// A person's display name, trimmed and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Name(String);

impl Name {
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        require!(
            name.len() >= MIN_NAME_LEN && name.len() <= MAX_NAME_LEN,
            RaffleError::InvalidName
        );
        require!(
            name.chars()
                .all(|c| c.is_alphabetic() || matches!(c, ' ' | '\'' | '-' | '.')),
            RaffleError::InvalidName
        );
        require!(
            name.chars().any(|c| c.is_alphabetic()),
            RaffleError::InvalidName
        );
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lower-cased email address with a plausible `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self> {
        let email = raw.trim().to_ascii_lowercase();
        require!(
            !email.is_empty() && email.len() <= MAX_EMAIL_LEN,
            RaffleError::InvalidEmail
        );
        require!(
            !email.chars().any(char::is_whitespace),
            RaffleError::InvalidEmail
        );

        let (local, domain) = email.split_once('@').ok_or(RaffleError::InvalidEmail)?;
        require!(
            !local.is_empty() && !domain.contains('@'),
            RaffleError::InvalidEmail
        );
        require!(domain.contains('.'), RaffleError::InvalidEmail);
        require!(
            domain.split('.').all(|label| !label.is_empty()),
            RaffleError::InvalidEmail
        );

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone number as typed by the user; only digits, spaces, dashes and a leading `+`.
#[derive(Debug, Clone, PartialEq)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self> {
        let phone = raw.trim();
        require!(phone.len() <= MAX_PHONE_LEN, RaffleError::InvalidPhone);

        let body = phone.strip_prefix('+').unwrap_or(phone);
        require!(
            body.chars()
                .all(|c| c.is_ascii_digit() || c == ' ' || c == '-'),
            RaffleError::InvalidPhone
        );

        let digits = body.chars().filter(char::is_ascii_digit).count();
        require!(
            (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits),
            RaffleError::InvalidPhone
        );

        Ok(Self(phone.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw contact fields as submitted with an instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ContactInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
}

/// Validated contact details stored on vendor and buyer accounts.
/// An empty `email` means the person left no address.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: Name, email: Option<Email>, phone: Phone) -> Self {
        Self {
            name: name.0,
            email: email.map(|e| e.0).unwrap_or_default(),
            phone: phone.0,
        }
    }

    pub fn email(&self) -> Option<&str> {
        (!self.email.is_empty()).then_some(self.email.as_str())
    }
}

impl ContactInput {
    /// Validates every field. Blank emails are treated as absent.
    pub fn validate(&self) -> Result<Contact> {
        let name = Name::parse(&self.name)?;
        let email = match self.email.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(Email::parse(raw)?),
            _ => None,
        };
        let phone = Phone::parse(&self.phone)?;
        Ok(Contact::new(name, email, phone))
    }

    /// Same as [`validate`](Self::validate) but an email address is mandatory.
    pub fn validate_with_email(&self) -> Result<Contact> {
        let contact = self.validate()?;
        require!(contact.email().is_some(), RaffleError::VendorEmailRequired);
        Ok(contact)
    }
}
