//! Pure operations over shopping lists: input validation, the spending limit
//! check, and the text used to email a list.

use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rust_decimal::Decimal;

use super::errors::{ValidationError, ValidationResult};
use super::models::{Item, MAX_PRICE, PRICE_SCALE, ShoppingList};

/// Characters left unescaped, matching what browsers leave alone in a URI
/// component.
const MAILTO_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const RECIPIENT_ENCODE_SET: &AsciiSet = &MAILTO_ENCODE_SET.remove(b'@').remove(b'+');

const EMAIL_SUBJECT: &str = "Shopping list";

/// Formats an amount the way it is shown to the user, e.g. `£2.00`.
pub fn format_price(price: Decimal) -> String {
    format!("£{:.2}", price.round_dp(2))
}

/// Parses a price typed by the user. A leading `£` is accepted.
///
/// Prices must be whole pence and no higher than [`MAX_PRICE`].
pub fn parse_price(input: &str) -> ValidationResult<Decimal> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('£').unwrap_or(trimmed).trim();
    if digits.is_empty() {
        return Err(ValidationError::MissingPrice);
    }

    let price = Decimal::from_str(digits)
        .map_err(|_| ValidationError::InvalidPrice(trimmed.to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::NegativePrice(price));
    }
    if price > MAX_PRICE {
        return Err(ValidationError::PriceTooHigh(price, MAX_PRICE));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::TooPrecise(price));
    }
    Ok(price)
}

/// Builds an item from raw name and price input.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the name is blank or the price is not a
/// non-negative number.
pub fn validate_item(name: &str, price: &str) -> ValidationResult<Item> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let price = parse_price(price)?;
    Ok(Item::new(name, price))
}

/// Advisory threshold compared against the list total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendingLimit(Decimal);

impl SpendingLimit {
    pub const DEFAULT: SpendingLimit = SpendingLimit(Decimal::TEN);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_exceeded_by(&self, list: &ShoppingList) -> bool {
        list.total() > self.0
    }
}

impl Default for SpendingLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for SpendingLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_price(self.0))
    }
}

/// One line per item, `name - £price`, in list order.
pub fn build_email_body(list: &ShoppingList) -> String {
    list.iter()
        .map(|item| format!("{} - {}", item.name, format_price(item.price)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds a `mailto:` link carrying the list as its body.
///
/// Returns `None` for an empty list; there is nothing to send.
pub fn build_mailto_link(list: &ShoppingList, recipient: Option<&str>) -> Option<String> {
    if list.is_empty() {
        return None;
    }

    let recipient = recipient
        .map(|address| utf8_percent_encode(address.trim(), RECIPIENT_ENCODE_SET).to_string())
        .unwrap_or_default();
    let subject = utf8_percent_encode(EMAIL_SUBJECT, MAILTO_ENCODE_SET);
    let body = build_email_body(list);
    let body = utf8_percent_encode(&body, MAILTO_ENCODE_SET);

    Some(format!("mailto:{recipient}?subject={subject}&body={body}"))
}
