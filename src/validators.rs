//! Lexical checks for country-specific bank identifiers.
//!
//! Each identifier family has a predicate that can be used on its own, and
//! [`FORMAT_RULES`] binds those predicates to flags. Rules run in declaration
//! order and the first failure aborts the command before any network call.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::field_registry::*;
use crate::request_error::RequestError;

static CANADA_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+1-[0-9]{10}$").unwrap());
static AUSTRALIA_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+61-[0-9]{9}$").unwrap());
static IFSC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap());
static NRIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[STFG][0-9]{7}[A-Z]$").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static COUNTRY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());
static CURRENCY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());
static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

pub const ENTITY_TYPES: &[&str] = &["COMPANY", "PERSONAL"];
pub const TRANSFER_METHODS: &[&str] = &["LOCAL", "SWIFT"];

pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

pub fn is_exact_digits(value: &str, count: usize) -> bool {
    is_digits(value) && value.len() == count
}

pub fn is_digit_range(value: &str, min: usize, max: usize) -> bool {
    is_digits(value) && (min..=max).contains(&value.len())
}

pub fn is_length_between(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

pub fn is_canada_phone(value: &str) -> bool {
    CANADA_PHONE.is_match(value)
}

pub fn is_australia_phone(value: &str) -> bool {
    AUSTRALIA_PHONE.is_match(value)
}

pub fn is_ifsc(value: &str) -> bool {
    IFSC.is_match(value)
}

pub fn is_nric(value: &str) -> bool {
    NRIC.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// The shape a flag value must have.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Normalization only, no lexical constraint.
    Any,
    Digits(usize),
    DigitRange(usize, usize),
    DigitsEither(usize, usize),
    Length(usize, usize),
    LengthEither(usize, usize),
    MaxLength(usize),
    Email,
    Pattern(&'static Lazy<Regex>, &'static str),
    OneOf(&'static [&'static str]),
}

impl Shape {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Shape::Any => true,
            Shape::Digits(count) => is_exact_digits(value, *count),
            Shape::DigitRange(min, max) => is_digit_range(value, *min, *max),
            Shape::DigitsEither(a, b) => is_exact_digits(value, *a) || is_exact_digits(value, *b),
            Shape::Length(min, max) => is_length_between(value, *min, *max),
            Shape::LengthEither(a, b) => {
                let length = value.chars().count();
                length == *a || length == *b
            }
            Shape::MaxLength(max) => value.chars().count() <= *max,
            Shape::Email => is_email(value),
            Shape::Pattern(regex, _) => regex.is_match(value),
            Shape::OneOf(allowed) => allowed.contains(&value),
        }
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Shape::Any => "any value".to_string(),
            Shape::Digits(count) => format!("exactly {} digits", count),
            Shape::DigitRange(min, max) => format!("{}-{} digits", min, max),
            Shape::DigitsEither(a, b) => format!("{} or {} digits", a, b),
            Shape::Length(min, max) => format!("{}-{} characters", min, max),
            Shape::LengthEither(a, b) => format!("{} or {} characters", a, b),
            Shape::MaxLength(max) => format!("at most {} characters", max),
            Shape::Email => "a valid email address (name@domain.tld)".to_string(),
            Shape::Pattern(_, shape) => shape.to_string(),
            Shape::OneOf(allowed) => format!("one of {}", allowed.join(", ")),
        }
    }
}

/// Binds a flag to its normalization and shape.
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub flag: &'static str,
    pub uppercase: bool,
    pub shape: Shape,
}

const fn rule(flag: &'static str, shape: Shape) -> FormatRule {
    FormatRule {
        flag,
        uppercase: false,
        shape,
    }
}

const fn upper(flag: &'static str, shape: Shape) -> FormatRule {
    FormatRule {
        flag,
        uppercase: true,
        shape,
    }
}

pub static FORMAT_RULES: &[FormatRule] = &[
    upper(FLAG_ENTITY_TYPE, Shape::OneOf(ENTITY_TYPES)),
    upper(FLAG_TRANSFER_METHOD, Shape::OneOf(TRANSFER_METHODS)),
    upper(FLAG_BANK_COUNTRY, Shape::Pattern(&COUNTRY_CODE, "a 2-letter country code")),
    upper(FLAG_ACCOUNT_CURRENCY, Shape::Pattern(&CURRENCY_CODE, "a 3-letter currency code")),
    upper(FLAG_ADDRESS_COUNTRY, Shape::Pattern(&COUNTRY_CODE, "a 2-letter country code")),
    upper(FLAG_SOURCE_CURRENCY, Shape::Pattern(&CURRENCY_CODE, "a 3-letter currency code")),
    upper(FLAG_TRANSFER_CURRENCY, Shape::Pattern(&CURRENCY_CODE, "a 3-letter currency code")),
    rule(FLAG_TRANSFER_AMOUNT, Shape::Pattern(&AMOUNT, "a positive decimal amount")),
    rule(FLAG_SOURCE_AMOUNT, Shape::Pattern(&AMOUNT, "a positive decimal amount")),
    rule(FLAG_TRANSFER_DATE, Shape::Pattern(&DATE, "a date in the format YYYY-MM-DD")),
    rule(FLAG_DATE_OF_BIRTH, Shape::Pattern(&DATE, "a date in the format YYYY-MM-DD")),
    upper(FLAG_SWIFT_CODE, Shape::Any),
    upper(FLAG_IBAN, Shape::Any),
    rule(FLAG_ROUTING_NUMBER, Shape::Digits(9)),
    rule(FLAG_SORT_CODE, Shape::Digits(6)),
    rule(FLAG_BSB, Shape::Digits(6)),
    upper(FLAG_IFSC, Shape::Pattern(&IFSC, "4 letters, a 0, then 6 letters or digits (e.g. HDFC0001234)")),
    rule(FLAG_EMAIL, Shape::Email),
    rule(FLAG_PHONE, Shape::Pattern(&CANADA_PHONE, "in the format +1-dddddddddd")),
    rule(FLAG_INSTITUTION_NUMBER, Shape::Digits(3)),
    rule(FLAG_TRANSIT_NUMBER, Shape::Digits(5)),
    rule(FLAG_ZENGIN_BANK_CODE, Shape::Digits(4)),
    rule(FLAG_ZENGIN_BRANCH_CODE, Shape::Digits(3)),
    rule(FLAG_CNAPS, Shape::Digits(12)),
    rule(FLAG_KOREA_BANK_CODE, Shape::Digits(3)),
    upper(FLAG_NRIC, Shape::Pattern(&NRIC, "S, T, F or G followed by 7 digits and a letter (e.g. S1234567A)")),
    upper(FLAG_UEN, Shape::Length(8, 13)),
    rule(FLAG_PAYNOW_VPA, Shape::MaxLength(21)),
    rule(FLAG_SG_BANK_CODE, Shape::Digits(7)),
    rule(FLAG_CLEARING_NUMBER, Shape::DigitRange(4, 5)),
    rule(FLAG_HK_BANK_CODE, Shape::Digits(3)),
    rule(FLAG_FPS_ID, Shape::DigitRange(7, 9)),
    upper(FLAG_HKID, Shape::Any),
    rule(FLAG_PAYID_PHONE, Shape::Pattern(&AUSTRALIA_PHONE, "in the format +61-ddddddddd")),
    rule(FLAG_PAYID_EMAIL, Shape::Email),
    rule(FLAG_PAYID_ABN, Shape::DigitsEither(9, 11)),
    rule(FLAG_CLABE, Shape::Digits(18)),
    rule(FLAG_CPF, Shape::Digits(11)),
    rule(FLAG_CNPJ, Shape::Digits(14)),
    upper(FLAG_LEGAL_REP_ID, Shape::LengthEither(15, 18)),
];

pub fn rule_for(flag: &str) -> Option<&'static FormatRule> {
    FORMAT_RULES.iter().find(|r| r.flag == flag)
}

/// Trim a raw flag value and upper-case it when its identifier is
/// case-insensitive.
pub fn normalize(flag: &str, raw: &str) -> String {
    let trimmed = raw.trim();
    match rule_for(flag) {
        Some(rule) if rule.uppercase => trimmed.to_uppercase(),
        _ => trimmed.to_string(),
    }
}

/// Check one flag value against its rule, if it has one.
pub fn validate_flag(flag: &str, value: &str) -> Result<(), RequestError> {
    match rule_for(flag) {
        Some(rule) if !rule.shape.matches(value) => {
            Err(RequestError::format(flag, rule.shape.describe()))
        }
        _ => Ok(()),
    }
}

/// Check every supplied flag, stopping at the first rule that fails.
pub fn validate_formats(values: &FlagValues) -> Result<(), RequestError> {
    for rule in FORMAT_RULES {
        if let Some(value) = values.get(rule.flag) {
            trace!("Checking --{} against {}", rule.flag, rule.shape.describe());
            if !rule.shape.matches(value) {
                return Err(RequestError::format(rule.flag, rule.shape.describe()));
            }
        }
    }
    Ok(())
}
