//! Multi-variant group synchronization.
//!
//! Every row of a multi-variant listing shares one set of group-level
//! fields. Row 0 is the master: edits to a group-level field are accepted
//! only on the master and propagate to every other row immediately, and the
//! whole group is force-rederived from the master right before submission.
//! A partially-synced group must never reach persistence.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use listra_shared::types::{Country, GroupCode, LocationCode, SellerId};

use crate::currency::PriceField;
use crate::variant::types::ProductVariantRow;

/// The fixed set of fields kept identical across all rows of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFields {
    /// Seller the listing belongs to.
    pub seller_id: Option<SellerId>,
    /// Current warehouse location of the stock.
    pub current_location: Option<LocationCode>,
    /// Payment terms label.
    pub payment_terms: Option<String>,
    /// Accepted payment methods.
    pub payment_methods: Vec<String>,
    /// Whether the price is negotiable (false = fixed).
    pub negotiable: bool,
    /// Whether the listing is a flash deal.
    pub flash_deal: bool,
    /// Shipping time label (e.g., "3-5 days").
    pub shipping_time: Option<String>,
    /// Listing start time.
    pub start_time: Option<DateTime<Utc>>,
    /// Listing end time.
    pub end_time: Option<DateTime<Utc>>,
}

/// An edit to one group-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupFieldEdit {
    /// Change the seller.
    Seller(Option<SellerId>),
    /// Change the current warehouse location.
    CurrentLocation(Option<LocationCode>),
    /// Change the payment terms.
    PaymentTerms(Option<String>),
    /// Replace the accepted payment methods.
    PaymentMethods(Vec<String>),
    /// Toggle the negotiable flag.
    Negotiable(bool),
    /// Toggle the flash-deal flag.
    FlashDeal(bool),
    /// Change the shipping time.
    ShippingTime(Option<String>),
    /// Change the listing start time.
    StartTime(Option<DateTime<Utc>>),
    /// Change the listing end time.
    EndTime(Option<DateTime<Utc>>),
}

impl GroupFields {
    fn apply(&mut self, edit: &GroupFieldEdit) {
        match edit {
            GroupFieldEdit::Seller(value) => self.seller_id = *value,
            GroupFieldEdit::CurrentLocation(value) => self.current_location = *value,
            GroupFieldEdit::PaymentTerms(value) => self.payment_terms = value.clone(),
            GroupFieldEdit::PaymentMethods(value) => self.payment_methods = value.clone(),
            GroupFieldEdit::Negotiable(value) => self.negotiable = *value,
            GroupFieldEdit::FlashDeal(value) => self.flash_deal = *value,
            GroupFieldEdit::ShippingTime(value) => self.shipping_time = value.clone(),
            GroupFieldEdit::StartTime(value) => self.start_time = *value,
            GroupFieldEdit::EndTime(value) => self.end_time = *value,
        }
    }
}

/// Group synchronization errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupSyncError {
    /// Group-level fields are read-only on non-master rows.
    #[error("Group-level fields can only be edited on the master row (got row {row_index})")]
    NotMaster {
        /// Index of the rejected row.
        row_index: usize,
    },

    /// Row index outside the group.
    #[error("Row index {row_index} is out of range")]
    RowOutOfRange {
        /// The offending index.
        row_index: usize,
    },

    /// A group must contain at least one row.
    #[error("A variant group must contain at least one row")]
    EmptyGroup,
}

/// A set of variant rows sharing one group code. Row 0 is the master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    code: GroupCode,
    rows: Vec<ProductVariantRow>,
}

impl VariantGroup {
    /// Creates a group from its master row.
    #[must_use]
    pub fn new(code: GroupCode, master: ProductVariantRow) -> Self {
        Self {
            code,
            rows: vec![master],
        }
    }

    /// Re-seeds a group from persisted rows (editing an existing listing).
    ///
    /// The rows are taken as-is; call [`Self::normalize`] to close any
    /// drift the persisted data may carry.
    pub fn from_rows(
        code: GroupCode,
        rows: Vec<ProductVariantRow>,
    ) -> Result<Self, GroupSyncError> {
        if rows.is_empty() {
            return Err(GroupSyncError::EmptyGroup);
        }
        Ok(Self { code, rows })
    }

    /// Returns the group code.
    #[must_use]
    pub fn code(&self) -> &GroupCode {
        &self.code
    }

    /// Returns all rows, master first.
    #[must_use]
    pub fn rows(&self) -> &[ProductVariantRow] {
        &self.rows
    }

    /// Returns the master row.
    #[must_use]
    pub fn master(&self) -> &ProductVariantRow {
        &self.rows[0]
    }

    /// True if the group has more than one variant row.
    #[must_use]
    pub fn is_multi_variant(&self) -> bool {
        self.rows.len() > 1
    }

    /// Applies a group-level field edit.
    ///
    /// Accepted only on the master row (index 0); the new value propagates
    /// to every row. Non-master rows reject the edit.
    pub fn apply_group_edit(
        &mut self,
        row_index: usize,
        edit: &GroupFieldEdit,
    ) -> Result<(), GroupSyncError> {
        if row_index >= self.rows.len() {
            return Err(GroupSyncError::RowOutOfRange { row_index });
        }
        if row_index != 0 {
            return Err(GroupSyncError::NotMaster { row_index });
        }
        for row in &mut self.rows {
            row.group_fields.apply(edit);
        }
        Ok(())
    }

    /// Appends a row, which inherits the master's current group fields.
    pub fn push_row(&mut self, mut row: ProductVariantRow) {
        row.group_fields = self.master().group_fields.clone();
        self.rows.push(row);
    }

    /// Edits one price slot on one row. Price data is per-row, so this is
    /// allowed on any row.
    pub fn edit_price(
        &mut self,
        row_index: usize,
        country: Country,
        field: PriceField,
        value: Option<Decimal>,
    ) -> Result<(), GroupSyncError> {
        let row = self
            .rows
            .get_mut(row_index)
            .ok_or(GroupSyncError::RowOutOfRange { row_index })?;
        row.edit_price(country, field, value);
        Ok(())
    }

    /// Force-rederives every non-master row's group fields from the master.
    ///
    /// Runs immediately before the group is submitted, regardless of any
    /// intermediate propagation outcome.
    pub fn normalize(&mut self) {
        let master_fields = self.master().group_fields.clone();
        for row in self.rows.iter_mut().skip(1) {
            row.group_fields = master_fields.clone();
        }
    }

    /// Consumes the group, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<ProductVariantRow> {
        self.rows
    }
}
