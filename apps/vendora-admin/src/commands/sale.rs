//! # Sale Commands
//!
//! Drive the composer and the Sales API.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  open    │────►│ Editing  │────►│Submitting│────►│ Created  │       │
//! │  │ (catalog)│     │          │     │ (locked) │     │  Sale    │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │  ▲              │                │             │
//! │                   add_item│         API error             │             │
//! │                   remove  │──────────────┘                │             │
//! │                   adjust  │                               ▼             │
//! │                        │  └──────────────────────── composer reset      │
//! │                        ▼                                                │
//! │                   cancel_sale ───► reset (late API results discarded)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vendora_api::{ApiClient, ProductCatalogProvider, SalesApi};
use vendora_core::{Catalog, ComposerSummary, EditOutcome, Sale, SaleComposer, Settlement};

use crate::error::AppResult;
use crate::state::ComposerState;

/// Result of an edit: what happened, and the composer afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub outcome: EditOutcome,
    pub summary: ComposerSummary,
}

fn edit<F>(state: &ComposerState, command: &str, product_id: &str, f: F) -> AppResult<EditResponse>
where
    F: FnOnce(&mut SaleComposer) -> EditOutcome,
{
    let response = state.with_composer_mut(|c| {
        let outcome = f(c);
        EditResponse {
            outcome,
            summary: c.summary(),
        }
    })?;

    match response.outcome {
        EditOutcome::Unchanged(reason) => {
            debug!(command, product_id, ?reason, "Edit ignored")
        }
        outcome => debug!(command, product_id, ?outcome, "Edit applied"),
    }

    Ok(response)
}

/// A created sale and whether it still concerned the composer.
///
/// `Discarded` means the operator canceled while the request was in
/// flight: the sale exists server-side but is no longer the one on screen.
#[derive(Debug, Clone)]
pub struct SubmitResponse {
    pub sale: Sale,
    pub settlement: Settlement,
}

// =============================================================================
// Composer Commands
// =============================================================================

/// Loads the catalog and opens an empty sale.
///
/// Reopening while a submission is in flight cancels it the same way
/// [`cancel_sale`] does.
pub async fn open_sale(
    provider: &dyn ProductCatalogProvider,
    state: &ComposerState,
) -> AppResult<ComposerSummary> {
    debug!("open_sale command");

    // Fetched before locking: the lock is never held across .await
    let products = provider.list_products().await?;
    let catalog = Catalog::from_products(products);
    info!(products = catalog.len(), "Sale opened");

    state.open(catalog);
    state.with_composer(SaleComposer::summary)
}

/// Current lines, total and staging inputs.
pub fn get_sale(state: &ComposerState) -> AppResult<ComposerSummary> {
    debug!("get_sale command");
    state.with_composer(SaleComposer::summary)
}

/// Adds `quantity` of a product (merging into an existing line).
pub fn add_item(state: &ComposerState, product_id: &str, quantity: i64) -> AppResult<EditResponse> {
    edit(state, "add_item", product_id, |c| c.add_item(product_id, quantity))
}

/// Selects the product for the next staged add.
pub fn select_product(state: &ComposerState, product_id: Option<&str>) -> AppResult<ComposerSummary> {
    debug!(?product_id, "select_product command");
    state.with_composer_mut(|c| {
        c.stage_product(product_id);
        c.summary()
    })
}

/// Sets the quantity for the next staged add.
pub fn set_quantity(state: &ComposerState, quantity: i64) -> AppResult<ComposerSummary> {
    debug!(quantity, "set_quantity command");
    state.with_composer_mut(|c| {
        c.stage_quantity(quantity);
        c.summary()
    })
}

/// Adds the staged selection.
pub fn add_staged(state: &ComposerState) -> AppResult<EditResponse> {
    edit(state, "add_staged", "", SaleComposer::add_staged)
}

pub fn remove_item(state: &ComposerState, product_id: &str) -> AppResult<EditResponse> {
    edit(state, "remove_item", product_id, |c| c.remove_item(product_id))
}

/// Changes a line's quantity by `delta` (never below 1).
pub fn adjust_quantity(state: &ComposerState, product_id: &str, delta: i64) -> AppResult<EditResponse> {
    edit(state, "adjust_quantity", product_id, |c| {
        c.adjust_quantity(product_id, delta)
    })
}

/// Discards the pending sale. An in-flight submission result will be ignored.
pub fn cancel_sale(state: &ComposerState) -> AppResult<ComposerSummary> {
    debug!("cancel_sale command");
    state.with_composer_mut(|c| {
        if c.is_submitting() {
            info!("Sale canceled while a submission was in flight");
        }
        c.reset();
        c.summary()
    })
}

/// Submits the pending sale.
///
/// ## Flow
/// ```text
/// lock ─► begin_submission ─► unlock          (fails fast if empty / in flight)
///            │
///            ▼
///      POST /sales  (no lock held; the operator may cancel meanwhile)
///            │
///   ┌────────┴────────┐
///   ▼                 ▼
/// Ok(sale)         Err(e)
/// complete(ticket) fail(ticket)   ◄── both ignored if the composer was reset
/// ```
pub async fn submit_sale(
    sales: &dyn SalesApi,
    state: &ComposerState,
    client_id: Option<String>,
) -> AppResult<SubmitResponse> {
    let attempt = Uuid::new_v4();
    debug!(%attempt, ?client_id, "submit_sale command");

    let ticket = state.with_composer_mut(|c| c.begin_submission(client_id))??;
    info!(%attempt, items = ticket.submission().items.len(), "Submitting sale");

    match sales.create_sale(ticket.submission()).await {
        Ok(sale) => {
            let settlement = state.with_composer_mut(|c| c.complete_submission(&ticket))?;
            match settlement {
                Settlement::Applied => {
                    info!(%attempt, sale_id = %sale.id, total = %sale.total, "Sale created")
                }
                Settlement::Discarded => warn!(
                    %attempt,
                    sale_id = %sale.id,
                    "Sale created after the composer was reset; result not applied"
                ),
            }
            Ok(SubmitResponse { sale, settlement })
        }
        Err(e) => {
            let settlement = state.with_composer_mut(|c| c.fail_submission(&ticket))?;
            warn!(%attempt, error = %e, ?settlement, "Sale submission failed");
            Err(e.into())
        }
    }
}

// =============================================================================
// History Commands
// =============================================================================

/// Sales history, newest first.
pub async fn list_sales(api: &ApiClient) -> AppResult<Vec<Sale>> {
    debug!("list_sales command");
    let mut sales = api.sales().list().await?;
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(sales)
}

pub async fn get_recorded_sale(api: &ApiClient, sale_id: &str) -> AppResult<Sale> {
    debug!(sale_id, "get_recorded_sale command");
    Ok(api.sales().get(sale_id).await?)
}

/// Cancels a sale that was already created.
pub async fn void_sale(api: &ApiClient, sale_id: &str) -> AppResult<()> {
    debug!(sale_id, "void_sale command");
    api.sales().cancel(sale_id).await?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
