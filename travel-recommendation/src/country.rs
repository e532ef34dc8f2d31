use celes::Country;

use crate::error::UnknownCountryError;

/// Resolves free-form country input to a canonical country name.
///
/// Accepts full names, common aliases, and ISO 3166 alpha-2/alpha-3 codes,
/// case-insensitively. Resolution is a lookup against a bundled country
/// table; nothing here talks to the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryResolver;

impl CountryResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, input: &str) -> Result<String, UnknownCountryError> {
        let needle = input.trim();
        if needle.len() < 2 {
            return Err(UnknownCountryError::new(input));
        }
        needle
            .parse::<Country>()
            .map(|country| country.long_name.to_string())
            .map_err(|_| UnknownCountryError::new(input))
    }
}
