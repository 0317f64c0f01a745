use regex::Regex;
use rust_decimal::Decimal;
use storefront_shared::{MIN_PRODUCT_PRICE, USERNAME_PATTERN};
use validator::ValidationError;

/// Validate username format beyond the plain length check: alphanumeric
/// with `_`/`-`, and not a reserved name.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let username_regex = Regex::new(USERNAME_PATTERN).expect("username pattern is valid");

    if !username_regex.is_match(username) {
        return Err(ValidationError::new("invalid_username_format"));
    }

    let reserved_usernames = [
        "admin", "administrator", "root", "system", "api", "support", "help",
        "info", "noreply", "postmaster", "webmaster", "abuse", "security",
        "null", "undefined", "anonymous", "guest",
    ];

    if reserved_usernames.contains(&username.to_lowercase().as_str()) {
        return Err(ValidationError::new("reserved_username"));
    }

    Ok(())
}

/// Product prices must be strictly positive. The check constraint also
/// guards this, but catching it here gives the caller a 400 instead of a
/// round trip to the engine.
pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price < MIN_PRODUCT_PRICE {
        return Err(ValidationError::new("price_not_positive"));
    }

    Ok(())
}
