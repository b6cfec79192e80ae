//! Core pricing rules engine for Listra.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, selection rules, and reconciliation logic live here.
//!
//! # Modules
//!
//! - `currency` - Linked price-field derivation (amount / rate / local)
//! - `variant` - Product variant rows and multi-variant group synchronization
//! - `cost` - Cost modules, applicability filtering, and selection state
//! - `margin` - Margin category selection and dependency rules
//! - `calculation` - Selection validation, the calculation request/response
//!   contract, and result reconciliation

pub mod calculation;
pub mod cost;
pub mod currency;
pub mod margin;
pub mod variant;
