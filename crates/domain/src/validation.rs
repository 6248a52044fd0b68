// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Form validators.
//!
//! Every function here is pure: it inspects raw form input and either
//! returns the parsed value or a `DomainError` whose `Display` text is the
//! message shown to the user. Nothing here talks to the API.

use crate::error::DomainError;
use crate::types::{DrinkSize, DrinkType};
use regex::Regex;
use std::sync::LazyLock;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Validates that an email address has a `local@domain.tld` shape.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is empty or malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let matches: bool = EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email));
    if matches {
        Ok(())
    } else {
        Err(DomainError::InvalidEmail(email.to_string()))
    }
}

/// Validates that a password is at least `MIN_PASSWORD_LENGTH` characters.
///
/// # Errors
///
/// Returns `DomainError::PasswordTooShort` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::PasswordTooShort {
            min_length: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Validates that the password confirmation matches.
///
/// # Errors
///
/// Returns `DomainError::PasswordMismatch` if the two values differ.
pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), DomainError> {
    if password != confirmation {
        return Err(DomainError::PasswordMismatch);
    }
    Ok(())
}

/// Validates that a display name is not blank.
///
/// # Errors
///
/// Returns `DomainError::MissingDisplayName` if the name is empty or whitespace.
pub fn validate_display_name(display_name: &str) -> Result<(), DomainError> {
    if display_name.trim().is_empty() {
        return Err(DomainError::MissingDisplayName);
    }
    Ok(())
}

/// Parses a pickup time.
///
/// Accepts RFC 3339 (`2026-10-15T09:30:00Z`, `2026-10-15T09:30:00+02:00`)
/// and the offset-less `YYYY-MM-DDTHH:MM[:SS]` form, which is read as UTC.
///
/// # Errors
///
/// Returns `DomainError::InvalidPickupTime` if no accepted format matches.
pub fn parse_pickup_time(raw: &str) -> Result<OffsetDateTime, DomainError> {
    let raw: &str = raw.trim();
    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(instant);
    }

    let with_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let without_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    PrimitiveDateTime::parse(raw, with_seconds)
        .or_else(|_| PrimitiveDateTime::parse(raw, without_seconds))
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| DomainError::InvalidPickupTime {
            value: raw.to_string(),
        })
}

/// Validates that a pickup time is strictly later than `now`.
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or is not in the future.
pub fn validate_pickup_time(raw: &str, now: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let pickup: OffsetDateTime = parse_pickup_time(raw)?;
    if pickup <= now {
        return Err(DomainError::PickupTimeNotInFuture);
    }
    Ok(pickup)
}

/// Validates that a drink type is on the menu.
///
/// # Errors
///
/// Returns `DomainError::InvalidDrinkType` for anything else.
pub fn validate_drink_type(raw: &str) -> Result<DrinkType, DomainError> {
    raw.parse::<DrinkType>()
}

/// Validates that a drink size is one of the fixed sizes.
///
/// # Errors
///
/// Returns `DomainError::InvalidDrinkSize` for anything else.
pub fn validate_drink_size(raw: &str) -> Result<DrinkSize, DomainError> {
    raw.parse::<DrinkSize>()
}

/// Validates a numeric drink price.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` unless the price is finite and `> 0`.
pub fn validate_price_amount(price: f64) -> Result<f64, DomainError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(DomainError::InvalidPrice(price.to_string()))
    }
}

/// Parses and validates a drink price entered as text.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` unless the text parses to a finite
/// number greater than zero.
pub fn validate_price(raw: &str) -> Result<f64, DomainError> {
    let price: f64 = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::InvalidPrice(raw.to_string()))?;
    validate_price_amount(price).map_err(|_| DomainError::InvalidPrice(raw.to_string()))
}

/// Validates a numeric tip.
///
/// # Errors
///
/// Returns `DomainError::InvalidTip` unless the tip is finite and `>= 0`.
pub fn validate_tip_amount(tip: f64) -> Result<f64, DomainError> {
    if tip.is_finite() && tip >= 0.0 {
        Ok(tip)
    } else {
        Err(DomainError::InvalidTip(tip.to_string()))
    }
}

/// Parses and validates an optional tip entered as text.
///
/// An absent or blank tip is accepted as `None`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTip` if the text is present but does not
/// parse to a finite number greater than or equal to zero.
pub fn validate_tip(raw: Option<&str>) -> Result<Option<f64>, DomainError> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(None);
    };
    let tip: f64 = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::InvalidTip(raw.to_string()))?;
    validate_tip_amount(tip)
        .map(Some)
        .map_err(|_| DomainError::InvalidTip(raw.to_string()))
}
