//! Linked price-field derivation for country pricing.

pub mod triangle;

#[cfg(test)]
mod props;

pub use triangle::{solve, PriceField, PriceTriplet, PRICE_DECIMALS, RATE_DECIMALS};
