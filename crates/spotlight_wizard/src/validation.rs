//! Field validation for the contact and registration forms.
//!
//! Validators never stop at the first problem: every failing field gets an
//! entry so the form can mark all of them at once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::types::ContactInfo;

/// Number of digits in a mainland mobile number.
pub const PHONE_DIGITS: usize = 11;

/// Default minimum description length, in characters.
pub const DEFAULT_MIN_DESCRIPTION_CHARS: usize = 10;

/// Themes of the first Spotlight campaign.
pub const DEFAULT_THEMES: [&str; 6] = ["重力", "盲盒", "永无止境的闯关", "缝合", "重启人生", "萌宠"];

/// A form field that can carry an error.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    /// Contact phone number.
    Phone,
    /// WeChat id.
    Wechat,
    /// The game picked for registration.
    Game,
    /// The campaign theme.
    Theme,
    /// How the game expresses the theme.
    Description,
}

/// Field-level validation errors, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field. The first message for a field is kept.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Returns the message for a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns true if the field has an error.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns true when there are no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Adds all errors from `other`, keeping existing messages.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.insert(field, message);
        }
    }

    /// Converts to `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

/// Campaign rules applied to the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRules {
    /// Themes a game may be registered under, in display order.
    #[serde(default = "default_themes")]
    themes: Vec<String>,

    /// Minimum description length in characters.
    #[serde(default = "default_min_description_chars")]
    min_description_chars: usize,
}

fn default_themes() -> Vec<String> {
    DEFAULT_THEMES.iter().map(|t| t.to_string()).collect()
}

fn default_min_description_chars() -> usize {
    DEFAULT_MIN_DESCRIPTION_CHARS
}

impl Default for RegistrationRules {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            min_description_chars: default_min_description_chars(),
        }
    }
}

impl RegistrationRules {
    /// Creates rules with the given theme set and description minimum.
    #[instrument(skip(themes))]
    pub fn new<I, T>(themes: I, min_description_chars: usize) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            themes: themes.into_iter().map(Into::into).collect(),
            min_description_chars,
        }
    }

    /// Themes in display order.
    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    /// Minimum description length in characters.
    pub fn min_description_chars(&self) -> usize {
        self.min_description_chars
    }

    /// Returns true if the theme is offered by the campaign.
    pub fn offers_theme(&self, theme: &str) -> bool {
        self.themes.iter().any(|t| t == theme)
    }
}

/// Returns true for an 11-digit mainland mobile number (`1[3-9]` prefix).
pub fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == PHONE_DIGITS
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
}

/// Validates contact details.
#[instrument(skip(contact))]
pub fn validate_contact_info(contact: &ContactInfo) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if contact.phone().is_empty() {
        errors.insert(Field::Phone, "phone required");
    } else if !is_valid_phone(contact.phone()) {
        errors.insert(Field::Phone, "invalid phone format");
    }

    if contact.wechat().is_empty() {
        errors.insert(Field::Wechat, "wechat required");
    }

    debug!(error_count = errors.len(), "Validated contact info");
    errors
}

/// Validates the theme and description of a registration.
#[instrument(skip(description, rules))]
pub fn validate_registration(theme: &str, description: &str, rules: &RegistrationRules) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if theme.is_empty() {
        errors.insert(Field::Theme, "theme required");
    } else if !rules.offers_theme(theme) {
        errors.insert(Field::Theme, "theme not offered by this campaign");
    }

    if description.is_empty() {
        errors.insert(Field::Description, "description required");
    } else if description.chars().count() < rules.min_description_chars() {
        errors.insert(
            Field::Description,
            format!(
                "description must be at least {} characters",
                rules.min_description_chars()
            ),
        );
    }

    debug!(error_count = errors.len(), "Validated registration fields");
    errors
}
