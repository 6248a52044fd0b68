// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw form input and its validation into API requests.
//!
//! Forms hold text exactly as the user typed it. `validate` runs the domain
//! validators and produces the request to send, or the first problem found.

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{CreateOrderRequest, DrinkRequest, LoginRequest, RegisterRequest};
use brewbox_domain::{
    DomainError, Role, validate_display_name, validate_drink_size, validate_drink_type,
    validate_email, validate_password, validate_password_confirmation, validate_pickup_time,
    validate_price, validate_tip, validate_tip_amount,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Account registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password, typed again.
    pub confirm_password: String,
    /// Requested role name.
    pub role: String,
    /// Display name, when the form asks for one.
    pub display_name: Option<String>,
}

impl RegistrationForm {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for the first invalid field.
    pub fn validate(&self) -> Result<RegisterRequest, ApiError> {
        let email: &str = self.email.trim();
        validate_email(email).map_err(translate_domain_error)?;
        validate_password(&self.password).map_err(translate_domain_error)?;
        validate_password_confirmation(&self.password, &self.confirm_password)
            .map_err(translate_domain_error)?;
        if let Some(name) = &self.display_name {
            validate_display_name(name).map_err(translate_domain_error)?;
        }
        let role: Role = self.role.parse::<Role>().map_err(translate_domain_error)?;

        Ok(RegisterRequest {
            email: email.to_string(),
            password: self.password.clone(),
            role,
            display_name: self.display_name.as_ref().map(|n| n.trim().to_string()),
        })
    }
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginForm {
    /// Validates that both fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if either field is blank.
    pub fn validate(&self) -> Result<LoginRequest, ApiError> {
        let email: &str = self.email.trim();
        if email.is_empty() {
            return Err(translate_domain_error(DomainError::MissingField("Email")));
        }
        if self.password.is_empty() {
            return Err(translate_domain_error(DomainError::MissingField("Password")));
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// One drink line as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkInput {
    /// Drink type name.
    pub drink_type: String,
    /// Size name.
    pub size: String,
    /// Price text.
    pub price: String,
}

impl DrinkInput {
    /// Creates a drink line.
    #[must_use]
    pub fn new(drink_type: &str, size: &str, price: &str) -> Self {
        Self {
            drink_type: drink_type.to_string(),
            size: size.to_string(),
            price: price.to_string(),
        }
    }

    fn validate(&self) -> Result<DrinkRequest, DomainError> {
        Ok(DrinkRequest {
            drink_type: validate_drink_type(&self.drink_type)?,
            size: validate_drink_size(&self.size)?,
            price: validate_price(&self.price)?,
        })
    }
}

/// How the tip was entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TipInput {
    /// No tip.
    #[default]
    None,
    /// A fixed amount.
    Amount(String),
    /// A percentage of the drink total.
    Percent(String),
}

/// Order placement form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    /// Requested pickup time.
    pub pickup_time: String,
    /// Drink lines, in entry order.
    pub drinks: Vec<DrinkInput>,
    /// Tip.
    pub tip: TipInput,
}

impl OrderForm {
    /// Validates the form against the clock reading `now`.
    ///
    /// The pickup time is sent in RFC 3339. A zero tip is left out of the
    /// request. A percentage tip is rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for the first invalid field.
    pub fn validate(&self, now: OffsetDateTime) -> Result<CreateOrderRequest, ApiError> {
        self.validate_domain(now).map_err(translate_domain_error)
    }

    fn validate_domain(&self, now: OffsetDateTime) -> Result<CreateOrderRequest, DomainError> {
        let pickup: OffsetDateTime = validate_pickup_time(&self.pickup_time, now)?;
        let pickup_time: String =
            pickup
                .format(&Rfc3339)
                .map_err(|_| DomainError::InvalidPickupTime {
                    value: self.pickup_time.clone(),
                })?;

        if self.drinks.is_empty() {
            return Err(DomainError::NoDrinks);
        }
        let drinks: Vec<DrinkRequest> = self
            .drinks
            .iter()
            .map(DrinkInput::validate)
            .collect::<Result<_, _>>()?;
        let drink_total: f64 = drinks.iter().map(|drink| drink.price).sum();

        let tip: Option<f64> = match &self.tip {
            TipInput::None => None,
            TipInput::Amount(raw) => validate_tip(Some(raw.as_str()))?,
            TipInput::Percent(raw) => validate_tip(Some(raw.as_str()))?
                .map(|percent| round_to_cents(drink_total * percent / 100.0))
                .map(validate_tip_amount)
                .transpose()?,
        }
        .filter(|tip| *tip > 0.0);

        Ok(CreateOrderRequest {
            pickup_time,
            tip,
            drinks,
        })
    }
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-10-15 09:00:00 UTC);

    fn order_form(tip: TipInput) -> OrderForm {
        OrderForm {
            pickup_time: String::from("2026-10-15T09:30"),
            drinks: vec![
                DrinkInput::new("Latte", "Medium", "4.50"),
                DrinkInput::new("Espresso", "Small", "2.50"),
            ],
            tip,
        }
    }

    fn field_of(err: &ApiError) -> &str {
        match err {
            ApiError::InvalidInput { field, .. } => field,
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_order_form() {
        let request: CreateOrderRequest = order_form(TipInput::None).validate(NOW).unwrap();
        assert_eq!(request.pickup_time, "2026-10-15T09:30:00Z");
        assert_eq!(request.drinks.len(), 2);
        assert_eq!(request.tip, None);
        assert_eq!(request.drink_total(), 7.0);
    }

    #[test]
    fn test_percentage_tip_is_rounded() {
        let request: CreateOrderRequest = order_form(TipInput::Percent(String::from("15")))
            .validate(NOW)
            .unwrap();
        assert_eq!(request.tip, Some(1.05));
    }

    #[test]
    fn test_zero_tip_is_omitted() {
        let request: CreateOrderRequest = order_form(TipInput::Amount(String::from("0")))
            .validate(NOW)
            .unwrap();
        assert_eq!(request.tip, None);

        let request: CreateOrderRequest = order_form(TipInput::Percent(String::from("0")))
            .validate(NOW)
            .unwrap();
        assert_eq!(request.tip, None);
    }

    #[test]
    fn test_negative_tip_is_rejected() {
        let err: ApiError = order_form(TipInput::Amount(String::from("-1")))
            .validate(NOW)
            .unwrap_err();
        assert_eq!(field_of(&err), "tip");
        assert_eq!(err.to_string(), "Tip must be a non-negative number.");

        let err: ApiError = order_form(TipInput::Percent(String::from("-5")))
            .validate(NOW)
            .unwrap_err();
        assert_eq!(field_of(&err), "tip");
    }

    #[test]
    fn test_past_pickup_is_rejected() {
        let mut form: OrderForm = order_form(TipInput::None);
        form.pickup_time = String::from("2026-10-15T08:59");

        let err: ApiError = form.validate(NOW).unwrap_err();
        assert_eq!(field_of(&err), "pickup_time");
        assert_eq!(err.to_string(), "Pickup time must be in the future.");
    }

    #[test]
    fn test_order_needs_a_drink() {
        let mut form: OrderForm = order_form(TipInput::None);
        form.drinks.clear();

        let err: ApiError = form.validate(NOW).unwrap_err();
        assert_eq!(field_of(&err), "drinks");
    }

    #[test]
    fn test_bad_drink_line_is_reported() {
        let mut form: OrderForm = order_form(TipInput::None);
        form.drinks.push(DrinkInput::new("Latte", "Venti", "4.00"));
        assert_eq!(field_of(&form.validate(NOW).unwrap_err()), "drink_size");

        let mut form: OrderForm = order_form(TipInput::None);
        form.drinks.push(DrinkInput::new("Latte", "Large", "0"));
        assert_eq!(field_of(&form.validate(NOW).unwrap_err()), "price");

        let mut form: OrderForm = order_form(TipInput::None);
        form.drinks.push(DrinkInput::new("Chai", "Large", "3"));
        assert_eq!(field_of(&form.validate(NOW).unwrap_err()), "drink_type");
    }

    #[test]
    fn test_registration_form() {
        let form: RegistrationForm = RegistrationForm {
            email: String::from(" bea@example.com "),
            password: String::from("secret1"),
            confirm_password: String::from("secret1"),
            role: String::from("barista"),
            display_name: Some(String::from("Bea")),
        };
        let request: RegisterRequest = form.validate().unwrap();
        assert_eq!(request.email, "bea@example.com");
        assert_eq!(request.role, Role::Barista);

        let mismatch: RegistrationForm = RegistrationForm {
            confirm_password: String::from("secret2"),
            ..form.clone()
        };
        assert_eq!(field_of(&mismatch.validate().unwrap_err()), "confirm_password");

        let bad_role: RegistrationForm = RegistrationForm {
            role: String::from("Manager"),
            ..form.clone()
        };
        assert_eq!(field_of(&bad_role.validate().unwrap_err()), "role");

        let blank_name: RegistrationForm = RegistrationForm {
            display_name: Some(String::from(" ")),
            ..form
        };
        assert_eq!(field_of(&blank_name.validate().unwrap_err()), "display_name");
    }

    #[test]
    fn test_login_form_requires_both_fields() {
        let form: LoginForm = LoginForm {
            email: String::new(),
            password: String::from("x"),
        };
        let err: ApiError = form.validate().unwrap_err();
        assert_eq!(field_of(&err), "email");
        assert_eq!(err.to_string(), "Email is required");

        let form: LoginForm = LoginForm {
            email: String::from("a@b.co"),
            password: String::new(),
        };
        assert_eq!(field_of(&form.validate().unwrap_err()), "password");
    }
}
