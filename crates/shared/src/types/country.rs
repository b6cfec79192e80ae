//! Countries and location codes for the supported markets.

use serde::{Deserialize, Serialize};

/// Markets a listing can be priced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Country {
    /// Hong Kong market.
    Hongkong,
    /// Dubai market.
    Dubai,
}

impl Country {
    /// All supported countries, in display order.
    pub const ALL: [Self; 2] = [Self::Hongkong, Self::Dubai];

    /// Returns the warehouse location code for this country.
    #[must_use]
    pub const fn location_code(self) -> LocationCode {
        match self {
            Self::Hongkong => LocationCode::Hk,
            Self::Dubai => LocationCode::D,
        }
    }

    /// Returns the ISO 4217 currency code of the local currency.
    #[must_use]
    pub const fn currency(self) -> &'static str {
        match self {
            Self::Hongkong => "HKD",
            Self::Dubai => "AED",
        }
    }

    /// Returns the display name used by the admin backend.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hongkong => "Hongkong",
            Self::Dubai => "Dubai",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Country {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hongkong" => Ok(Self::Hongkong),
            "Dubai" => Ok(Self::Dubai),
            other => Err(UnknownCountry(other.to_string())),
        }
    }
}

/// Error returned when parsing an unsupported country name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown country: {0}")]
pub struct UnknownCountry(pub String);

/// Warehouse location codes used on variant rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LocationCode {
    /// Hong Kong warehouse ("HK").
    #[serde(rename = "HK")]
    Hk,
    /// Dubai warehouse ("D").
    #[serde(rename = "D")]
    D,
}

impl LocationCode {
    /// Returns the wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hk => "HK",
            Self::D => "D",
        }
    }
}

impl std::fmt::Display for LocationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
