use rust_decimal::Decimal;

/// Why an item could not be added to the list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("item name is empty")]
    MissingName,
    #[error("item price is empty")]
    MissingPrice,
    #[error("item price `{0}` is not a number")]
    InvalidPrice(String),
    #[error("item price {0} is negative")]
    NegativePrice(Decimal),
    #[error("item price {0} is above the {1} maximum")]
    PriceTooHigh(Decimal, Decimal),
    #[error("item price {0} has more than two decimal places")]
    TooPrecise(Decimal),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// A blocking message shown to the user after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The add was rejected; the list is unchanged.
    InvalidItem,
    /// The add was committed and pushed the total over the spending limit.
    LimitExceeded,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::InvalidItem => "Please enter an item name and price",
            Notification::LimitExceeded => {
                "You have gone over your spending limit! Consider removing some items"
            }
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&ValidationError> for Notification {
    fn from(_: &ValidationError) -> Self {
        Notification::InvalidItem
    }
}
