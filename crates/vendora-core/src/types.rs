//! # Domain Types
//!
//! Entities returned by the remote REST API, as the admin client sees them.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│    Product      │   │     Client      │       │
//! │  │  id, name       │   │  id, name       │   │  id, name       │       │
//! │  │  is_active      │   │  price (Money)  │   │  email, phone   │       │
//! │  └─────────────────┘   │  is_active      │   │  address, zip   │       │
//! │                        └────────┬────────┘   └────────┬────────┘       │
//! │                                 │ product_id          │ client_id      │
//! │  ┌─────────────────┐   ┌────────▼────────┐   ┌────────▼────────┐       │
//! │  │      User       │──►│    SaleItem     │◄──│      Sale       │       │
//! │  │  id, name       │   │  quantity       │   │  total          │       │
//! │  │  email          │   │  unit_price     │   │  canceled       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every type serializes with camelCase field names to match the API.
//! All durable state is owned by the API; these are read-side snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Product
// =============================================================================

/// Embedded category relation some endpoints return for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryRef {
    pub name: String,
}

/// A product available for sale.
///
/// The composer only ever reads products; `is_active == false` means the
/// product was soft-deleted and cannot be added to a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown to the operator.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price. The API is the source of truth at submission time.
    #[ts(type = "number")]
    pub price: Money,

    pub category_id: String,

    /// Flattened category name (some endpoints).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    /// Nested category relation (other endpoints).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the category name from whichever shape the API sent.
    pub fn category_label(&self) -> Option<&str> {
        self.category_name
            .as_deref()
            .or_else(|| self.category.as_ref().map(|c| c.name.as_str()))
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer a sale can be attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub zip_code: String,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// User
// =============================================================================

/// An operator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// The signed-in operator, decoded from the bearer token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionUser {
    pub name: String,
    pub email: Option<String>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product + quantity pair.
///
/// Used both inside a pending sale and as the item shape of a
/// [`SaleSubmission`](crate::dto::SaleSubmission): the wire shape is
/// `{ "productId": "...", "quantity": 2 }` with no price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    /// Always >= 1 inside a pending sale.
    pub quantity: i64,
}

impl LineItem {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        LineItem {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A line of a persisted sale, with the unit price resolved server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    #[ts(type = "number")]
    pub unit_price: Money,
}

impl SaleItem {
    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A sale as persisted by the Sales API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[ts(type = "number")]
    pub total: Money,
    /// Set when the sale is cancelled (`DELETE /sales/{id}`).
    pub canceled: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Sum of the server-priced lines.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(SaleItem::line_total).sum()
    }

    /// Total number of units sold, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }
}

fn default_active() -> bool {
    true
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_from_api_json() {
        let json = r#"{
            "id": "P1",
            "name": "Coffee",
            "price": 10.5,
            "categoryId": "C1",
            "category": { "name": "Drinks" },
            "isActive": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.amount(), dec!(10.5));
        assert_eq!(product.category_label(), Some("Drinks"));
        assert!(product.description.is_none());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_category_label_prefers_flat_name() {
        let json = r#"{
            "id": "P1", "name": "Tea", "price": 3, "categoryId": "C1",
            "categoryName": "Hot", "category": { "name": "Drinks" }, "isActive": false
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category_label(), Some("Hot"));
    }

    #[test]
    fn test_sale_from_api_json() {
        let json = r#"{
            "id": "S1",
            "userId": "U1",
            "clientId": null,
            "total": 25,
            "canceled": false,
            "createdAt": "2024-05-01T10:00:00.000Z",
            "items": [
                { "id": "I1", "productId": "P1", "quantity": 2, "unitPrice": 10 },
                { "id": "I2", "productId": "P2", "quantity": 1, "unitPrice": 5 }
            ]
        }"#;

        let sale: Sale = serde_json::from_str(json).unwrap();
        assert!(sale.client_id.is_none());
        assert!(!sale.canceled);
        assert_eq!(sale.items_total(), sale.total);
        assert_eq!(sale.total_quantity(), 3);
    }

    #[test]
    fn test_line_item_wire_shape() {
        let json = serde_json::to_value(LineItem::new("P2", 1)).unwrap();
        assert_eq!(json, serde_json::json!({ "productId": "P2", "quantity": 1 }));
    }

    #[test]
    fn test_category_defaults_active() {
        let category: Category = serde_json::from_str(r#"{"id":"C1","name":"Drinks"}"#).unwrap();
        assert!(category.is_active);
    }

    #[test]
    fn test_sale_total_quantity_saturates() {
        let item = |id: &str, quantity: i64| SaleItem {
            id: id.to_string(),
            product_id: "P1".to_string(),
            quantity,
            unit_price: Money::from_cents(100),
        };
        let sale = Sale {
            id: "S1".to_string(),
            user_id: "U1".to_string(),
            client_id: None,
            total: Money::zero(),
            canceled: false,
            created_at: chrono::Utc::now(),
            items: vec![item("I1", i64::MAX), item("I2", 5)],
        };
        assert_eq!(sale.total_quantity(), i64::MAX);
    }
}
