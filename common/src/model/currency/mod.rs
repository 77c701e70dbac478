//! Currency codes supported for accounts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// ISO 4217 currency of an account
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
    CAD,
    AUD,
    PLN,
    UAH,
}

impl Currency {
    /// All supported currencies
    pub const ALL: [Currency; 9] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CHF,
        Currency::CAD,
        Currency::AUD,
        Currency::PLN,
        Currency::UAH,
    ];

    /// Three-letter currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::PLN => "PLN",
            Currency::UAH => "UAH",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::ValidationError(format!("Unsupported currency: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(" Eur ".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn test_codes_round_trip_through_display() {
        for currency in Currency::ALL {
            assert_eq!(currency.to_string().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Currency::GBP).unwrap(), "\"GBP\"");
        let parsed: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(parsed, Currency::JPY);
    }
}
