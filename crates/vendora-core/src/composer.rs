//! # Sale Composer
//!
//! Lets an operator build a multi-line sale against a catalog snapshot,
//! keeps quantities consistent, computes a confirmation total and hands
//! out the payload for the Sales API.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Composer Lifecycle                                   │
//! │                                                                         │
//! │  open(catalog)                                                          │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌──────────┐  begin_submission  ┌────────────┐  complete_submission    │
//! │  │ Editing  │───────────────────►│ Submitting │──────────────► reset    │
//! │  │          │◄───────────────────│ (locked)   │                 │       │
//! │  └──────────┘  fail_submission   └────────────┘                 │       │
//! │      ▲  add / remove / adjust          │                        │       │
//! │      │                                 │ reset (operator cancel)│       │
//! │      └─────────────────────────────────┴────────────────────────┘       │
//! │                                                                         │
//! │  Every reset bumps the generation: a ticket issued before the reset     │
//! │  is settled as Discarded and cannot touch the new state.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use vendora_core::composer::SaleComposer;
//! use vendora_core::catalog::Catalog;
//!
//! let mut composer = SaleComposer::new(Catalog::default());
//! assert!(composer.to_submission(None).is_err()); // empty sale
//! ```

use serde::Serialize;

use crate::catalog::Catalog;
use crate::dto::SaleSubmission;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pending::{EditOutcome, PendingSale, Rejection};
use crate::types::Product;

/// Quantity staged for the next add.
pub const DEFAULT_QUANTITY: i64 = 1;

// =============================================================================
// Status & Staging
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposerStatus {
    #[default]
    Editing,
    /// A submission is awaiting the Sales API; edits are locked.
    Submitting,
}

/// The inputs used to stage the next add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingInput {
    pub selected_product: Option<String>,
    pub quantity: i64,
}

impl Default for StagingInput {
    fn default() -> Self {
        StagingInput {
            selected_product: None,
            quantity: DEFAULT_QUANTITY,
        }
    }
}

// =============================================================================
// Submission Ticket
// =============================================================================

/// Proof that a submission was started, tied to one composer generation.
#[derive(Debug)]
pub struct SubmissionTicket {
    generation: u64,
    submission: SaleSubmission,
}

impl SubmissionTicket {
    /// The payload to send to the Sales API.
    pub fn submission(&self) -> &SaleSubmission {
        &self.submission
    }
}

/// How a submission result was applied to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result affected the current pending sale.
    Applied,
    /// The operator reset the composer in the meantime; result ignored.
    Discarded,
}

// =============================================================================
// Summary
// =============================================================================

/// One displayable line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub product_id: String,
    /// `None` when the product no longer resolves in the catalog.
    pub name: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<Money>,
    pub line_total: Money,
}

/// Everything a view needs to render the composer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerSummary {
    pub lines: Vec<LineSummary>,
    pub total: Money,
    pub total_quantity: i64,
    pub stale_items: Vec<String>,
    pub staging: StagingInput,
    pub status: ComposerStatus,
}

// =============================================================================
// Sale Composer
// =============================================================================

/// The state of one "new sale" dialog.
#[derive(Debug, Clone, Default)]
pub struct SaleComposer {
    catalog: Catalog,
    pending: PendingSale,
    staging: StagingInput,
    status: ComposerStatus,
    generation: u64,
}

impl SaleComposer {
    /// Opens an empty composer over a catalog snapshot.
    pub fn new(catalog: Catalog) -> Self {
        SaleComposer {
            catalog,
            ..SaleComposer::default()
        }
    }

    /// Opens an empty composer from a raw product list (inactive ones are dropped).
    pub fn open(products: impl IntoIterator<Item = Product>) -> Self {
        SaleComposer::new(Catalog::from_products(products))
    }

    /// Swaps in a fresh catalog snapshot and starts over.
    ///
    /// Unlike building a new composer, the generation keeps counting, so a
    /// ticket issued against the previous snapshot stays invalid.
    pub fn reopen(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.reset();
    }

    // -------------------------------------------------------------------------
    // Staging
    // -------------------------------------------------------------------------

    /// Selects the product for the next staged add.
    pub fn stage_product(&mut self, product_id: Option<&str>) {
        if self.is_submitting() {
            return;
        }
        self.staging.selected_product = product_id.map(str::to_string);
    }

    /// Sets the quantity for the next staged add.
    pub fn stage_quantity(&mut self, quantity: i64) {
        if self.is_submitting() {
            return;
        }
        self.staging.quantity = quantity;
    }

    /// Adds the staged product with the staged quantity.
    pub fn add_staged(&mut self) -> EditOutcome {
        match self.staging.selected_product.clone() {
            Some(product_id) => self.add_item(&product_id, self.staging.quantity),
            None => EditOutcome::Unchanged(Rejection::UnknownProduct),
        }
    }

    // -------------------------------------------------------------------------
    // Line Items
    // -------------------------------------------------------------------------

    /// Adds a product, merging into an existing line.
    ///
    /// ## Behavior
    /// - Submitting: ignored
    /// - Product not in the active catalog: ignored
    /// - Quantity below 1: ignored
    /// - Otherwise merge or append, then staging returns to defaults
    pub fn add_item(&mut self, product_id: &str, quantity: i64) -> EditOutcome {
        if self.is_submitting() {
            return EditOutcome::Unchanged(Rejection::Submitting);
        }

        if !self.catalog.contains(product_id) {
            return EditOutcome::Unchanged(Rejection::UnknownProduct);
        }

        let outcome = self.pending.add(product_id, quantity);
        if outcome.changed() {
            self.staging = StagingInput::default();
        }
        outcome
    }

    /// Removes a product's line; absent is a no-op.
    pub fn remove_item(&mut self, product_id: &str) -> EditOutcome {
        if self.is_submitting() {
            return EditOutcome::Unchanged(Rejection::Submitting);
        }
        self.pending.remove(product_id)
    }

    /// Changes a line's quantity by `delta`; rejected below 1.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> EditOutcome {
        if self.is_submitting() {
            return EditOutcome::Unchanged(Rejection::Submitting);
        }
        self.pending.adjust(product_id, delta)
    }

    // -------------------------------------------------------------------------
    // Derived Values
    // -------------------------------------------------------------------------

    /// Confirmation total; stale lines count as zero.
    pub fn total(&self) -> Money {
        self.pending.total(&self.catalog)
    }

    /// Lines whose product no longer resolves.
    pub fn stale_items(&self) -> Vec<&str> {
        self.pending.stale_items(&self.catalog)
    }

    /// Payload for the Sales API without changing state.
    pub fn to_submission(&self, client_id: Option<String>) -> Result<SaleSubmission, ValidationError> {
        self.pending.to_submission(client_id)
    }

    pub fn summary(&self) -> ComposerSummary {
        let lines = self
            .pending
            .items()
            .iter()
            .map(|item| {
                let product = self.catalog.get(&item.product_id);
                let unit_price = product.map(|p| p.price);
                LineSummary {
                    product_id: item.product_id.clone(),
                    name: product.map(|p| p.name.clone()),
                    quantity: item.quantity,
                    unit_price,
                    line_total: unit_price
                        .map(|price| price.multiply_quantity(item.quantity))
                        .unwrap_or_default(),
                }
            })
            .collect();

        ComposerSummary {
            lines,
            total: self.total(),
            total_quantity: self.pending.total_quantity(),
            stale_items: self.stale_items().into_iter().map(str::to_string).collect(),
            staging: self.staging.clone(),
            status: self.status,
        }
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Locks the composer and returns the payload to send.
    ///
    /// ## Errors
    /// - [`CoreError::SubmissionInProgress`] if a ticket is already out
    /// - [`ValidationError::EmptySale`] if there are no lines (state untouched)
    pub fn begin_submission(&mut self, client_id: Option<String>) -> CoreResult<SubmissionTicket> {
        if self.is_submitting() {
            return Err(CoreError::SubmissionInProgress);
        }

        let submission = self.pending.to_submission(client_id)?;
        self.status = ComposerStatus::Submitting;

        Ok(SubmissionTicket {
            generation: self.generation,
            submission,
        })
    }

    /// The API accepted the sale: start over.
    pub fn complete_submission(&mut self, ticket: &SubmissionTicket) -> Settlement {
        if !self.owns(ticket) {
            return Settlement::Discarded;
        }
        self.reset();
        Settlement::Applied
    }

    /// The API rejected the sale: unlock and keep the lines for another try.
    pub fn fail_submission(&mut self, ticket: &SubmissionTicket) -> Settlement {
        if !self.owns(ticket) {
            return Settlement::Discarded;
        }
        self.status = ComposerStatus::Editing;
        Settlement::Applied
    }

    /// Clears lines and staging, unlocks, and invalidates outstanding tickets.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.staging = StagingInput::default();
        self.status = ComposerStatus::Editing;
        self.generation = self.generation.wrapping_add(1);
    }

    fn owns(&self, ticket: &SubmissionTicket) -> bool {
        ticket.generation == self.generation && self.is_submitting()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pending(&self) -> &PendingSale {
        &self.pending
    }

    pub fn staging(&self) -> &StagingInput {
        &self.staging
    }

    pub fn status(&self) -> ComposerStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == ComposerStatus::Submitting
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
