//! # Catalog Snapshot
//!
//! The read-only product list a sale composer works against.
//!
//! A snapshot is taken when the composer is opened: only active products
//! are kept, in the order the provider returned them. It is never mutated
//! afterwards; a product deactivated mid-session simply stays in (or out
//! of) the snapshot until the composer is reopened.

use crate::money::Money;
use crate::types::Product;

/// Active products available for selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a snapshot, dropping inactive products.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Catalog {
            products: products.into_iter().filter(|p| p.is_active).collect(),
        }
    }

    /// Looks up a selectable product by ID.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Returns the unit price of a selectable product.
    pub fn price_of(&self, product_id: &str) -> Option<Money> {
        self.get(product_id).map(|p| p.price)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.get(product_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn test_inactive_products_are_dropped() {
        let catalog = Catalog::from_products(vec![
            product("P1", 1000, true),
            product("P2", 500, false),
            product("P3", 250, true),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("P1"));
        assert!(!catalog.contains("P2"));
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P3"]);
    }

    #[test]
    fn test_price_lookup() {
        let catalog = Catalog::from_products(vec![product("P1", 1099, true)]);
        assert_eq!(catalog.price_of("P1"), Some(Money::from_cents(1099)));
        assert_eq!(catalog.price_of("missing"), None);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.get("P1").is_none());
    }
}
