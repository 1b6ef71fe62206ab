use std::sync::OnceLock;

use regex::Regex;

use crate::domain::DomainError;

fn credential_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_@]+$").ok())
        .as_ref()
}

/// Letters, digits, `_` and `@` only; anything else is rejected before a lookup.
pub fn is_well_formed(value: &str) -> bool {
    credential_pattern().is_some_and(|pattern| pattern.is_match(value))
}

pub fn check_credentials(username: &str, password: &str) -> Result<(), DomainError> {
    if is_well_formed(username) && is_well_formed(password) {
        Ok(())
    } else {
        Err(DomainError::unauthorized("invalid username or password"))
    }
}
