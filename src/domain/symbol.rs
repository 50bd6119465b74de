use std::fmt;

use crate::error::InputError;

/// A ticker typed by the user, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptySymbol);
        }
        Ok(Symbol(trimmed.to_string()))
    }

    /// Form sent to the backend. Matching is case-insensitive and the stored
    /// tickers are lowercase.
    pub fn query_value(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn display(&self) -> String {
        self.0.to_uppercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let symbol = Symbol::parse("  eth \t").unwrap();
        assert_eq!(symbol.as_str(), "eth");
        assert_eq!(symbol.display(), "ETH");
        assert_eq!(symbol.to_string(), "ETH");
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(Symbol::parse(""), Err(InputError::EmptySymbol));
        assert_eq!(Symbol::parse("   \n"), Err(InputError::EmptySymbol));
    }

    #[test]
    fn query_value_is_lowercase() {
        assert_eq!(Symbol::parse("BtC").unwrap().query_value(), "btc");
    }
}
