//! Saved payout addresses.

use std::fmt;

/// Currencies a middleman can save an address for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Ltc,
    Eth,
}

impl Currency {
    /// Key stored in the `crypto_address.currency` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltc => "LTC",
            Self::Eth => "ETH",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "LTC" => Some(Self::Ltc),
            "ETH" => Some(Self::Eth),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
