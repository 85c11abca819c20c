//! # Pending Sale
//!
//! The in-memory, not-yet-submitted line-item list.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pending Sale Operations                              │
//! │                                                                         │
//! │  add(P1, 2)      ──► [P1×2]                     (append)                │
//! │  add(P2, 1)      ──► [P1×2, P2×1]               (append)                │
//! │  add(P1, 3)      ──► [P1×5, P2×1]               (merge, order kept)     │
//! │  adjust(P2, -1)  ──► [P1×5, P2×1]               (rejected: would be 0)  │
//! │  remove(P1)      ──► [P2×1]                                             │
//! │  to_submission() ──► { items: [P2×1] }          (prices stripped)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `product_id`
//! - Every quantity is >= 1
//! - Order is the order of first add

use serde::Serialize;

use crate::catalog::Catalog;
use crate::dto::SaleSubmission;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;
use crate::validation::validate_quantity;

// =============================================================================
// Edit Outcome
// =============================================================================

/// What a mutation did to the pending sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    /// A new line was added at the end.
    Appended { quantity: i64 },
    /// An existing line's quantity was increased.
    Merged { quantity: i64 },
    /// A line's quantity was replaced.
    Adjusted { quantity: i64 },
    /// A line was removed.
    Removed,
    /// Nothing changed.
    Unchanged(Rejection),
}

impl EditOutcome {
    /// True when the pending sale was modified.
    pub fn changed(&self) -> bool {
        !matches!(self, EditOutcome::Unchanged(_))
    }
}

/// Why a mutation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Product is not in the active catalog.
    UnknownProduct,
    /// Quantity below 1 (or it would overflow).
    InvalidQuantity,
    /// The resulting quantity would drop below 1.
    BelowMinimum,
    /// No line for this product.
    NotInSale,
    /// A submission is in flight; edits are locked.
    Submitting,
}

// =============================================================================
// Pending Sale
// =============================================================================

/// The line items of a sale being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSale {
    items: Vec<LineItem>,
}

impl PendingSale {
    pub fn new() -> Self {
        PendingSale::default()
    }

    /// Adds `quantity` units of a product (merge-on-add).
    ///
    /// The caller is responsible for checking the product against the
    /// catalog; this only enforces the line-item invariants.
    pub fn add(&mut self, product_id: &str, quantity: i64) -> EditOutcome {
        if validate_quantity(quantity).is_err() {
            return EditOutcome::Unchanged(Rejection::InvalidQuantity);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            return match item.quantity.checked_add(quantity) {
                Some(new_qty) => {
                    item.quantity = new_qty;
                    EditOutcome::Merged { quantity: new_qty }
                }
                None => EditOutcome::Unchanged(Rejection::InvalidQuantity),
            };
        }

        self.items.push(LineItem::new(product_id, quantity));
        EditOutcome::Appended { quantity }
    }

    /// Removes the line for a product regardless of its quantity.
    pub fn remove(&mut self, product_id: &str) -> EditOutcome {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            EditOutcome::Unchanged(Rejection::NotInSale)
        } else {
            EditOutcome::Removed
        }
    }

    /// Changes a line's quantity by `delta`, never below 1.
    ///
    /// Reaching zero is not a way to remove a line; use [`remove`](Self::remove).
    pub fn adjust(&mut self, product_id: &str, delta: i64) -> EditOutcome {
        let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            return EditOutcome::Unchanged(Rejection::NotInSale);
        };

        match item.quantity.checked_add(delta) {
            Some(new_qty) if new_qty >= 1 => {
                item.quantity = new_qty;
                EditOutcome::Adjusted { quantity: new_qty }
            }
            Some(_) => EditOutcome::Unchanged(Rejection::BelowMinimum),
            None => EditOutcome::Unchanged(Rejection::InvalidQuantity),
        }
    }

    /// Estimated total against a catalog snapshot.
    ///
    /// Lines whose product no longer resolves contribute zero; see
    /// [`stale_items`](Self::stale_items) to surface them.
    pub fn total(&self, catalog: &Catalog) -> Money {
        self.items
            .iter()
            .filter_map(|item| {
                catalog
                    .price_of(&item.product_id)
                    .map(|price| price.multiply_quantity(item.quantity))
            })
            .sum()
    }

    /// Product IDs of lines that do not resolve in the catalog.
    pub fn stale_items<'a>(&'a self, catalog: &Catalog) -> Vec<&'a str> {
        self.items
            .iter()
            .filter(|item| !catalog.contains(&item.product_id))
            .map(|item| item.product_id.as_str())
            .collect()
    }

    /// Builds the API payload. Fails on an empty sale.
    pub fn to_submission(&self, client_id: Option<String>) -> Result<SaleSubmission, ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptySale);
        }

        Ok(SaleSubmission {
            client_id,
            items: self.items.clone(),
        })
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Quantity of a product, if it has a line.
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map(|i| i.quantity)
    }

    /// Total units across all lines, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
