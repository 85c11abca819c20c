//! Plain-text views for the console.

use std::fmt::Write;

use vendora_core::{
    Client, ComposerStatus, ComposerSummary, EditOutcome, Product, Rejection, Sale, SessionUser,
};

use crate::state::DisplayConfig;

/// Operator-facing reason for an ignored edit.
pub fn rejection_message(rejection: Rejection) -> &'static str {
    match rejection {
        Rejection::UnknownProduct => "Product is not in the active catalog",
        Rejection::InvalidQuantity => "Quantity must be at least 1",
        Rejection::BelowMinimum => "Quantity cannot go below 1 (use `rm` to drop the line)",
        Rejection::NotInSale => "Product is not in this sale",
        Rejection::Submitting => "A submission is in progress; edits are locked",
    }
}

/// The composer after an edit, prefixed with the reason when nothing changed.
pub fn edit(outcome: EditOutcome, summary: &ComposerSummary, display: &DisplayConfig) -> String {
    match outcome {
        EditOutcome::Unchanged(rejection) => format!(
            "{}\n{}",
            rejection_message(rejection),
            composer(summary, display)
        ),
        _ => composer(summary, display),
    }
}

/// Table of the pending sale.
///
/// ```text
///   P1      Product P1              5 x $10.00     $50.00
///   P2      Product P2              1 x $5.00       $5.00
///   ──────────────────────────────────────────────────────
///   6 item(s)                              Total  $55.00
/// ```
pub fn composer(summary: &ComposerSummary, display: &DisplayConfig) -> String {
    let mut out = String::new();

    if summary.lines.is_empty() {
        out.push_str("  (no items)\n");
    }
    for line in &summary.lines {
        let name = line.name.as_deref().unwrap_or("(unavailable)");
        let unit = line
            .unit_price
            .map(|p| display.format_money(p))
            .unwrap_or_else(|| "?".to_string());
        let _ = writeln!(
            out,
            "  {:<8}{:<22}{:>4} x {:<10}{:>10}",
            line.product_id,
            name,
            line.quantity,
            unit,
            display.format_money(line.line_total)
        );
    }

    let _ = writeln!(out, "  {}", "─".repeat(56));
    let _ = write!(
        out,
        "  {:<39}Total {:>10}",
        format!("{} item(s)", summary.total_quantity),
        display.format_money(summary.total)
    );

    if !summary.stale_items.is_empty() {
        let _ = write!(
            out,
            "\n  Not in the current catalog: {}",
            summary.stale_items.join(", ")
        );
    }
    if let Some(product_id) = &summary.staging.selected_product {
        let _ = write!(
            out,
            "\n  Next add: {} x {}",
            product_id, summary.staging.quantity
        );
    }
    if summary.status == ComposerStatus::Submitting {
        out.push_str("\n  Submitting...");
    }

    out
}

pub fn products(products: &[Product], display: &DisplayConfig) -> String {
    if products.is_empty() {
        return "  (no products)".to_string();
    }
    products
        .iter()
        .map(|p| {
            let mut row = format!(
                "  {:<8}{:<22}{:>10}  {}",
                p.id,
                p.name,
                display.format_money(p.price),
                p.category_label().unwrap_or("")
            );
            if !p.is_active {
                row.push_str("  [inactive]");
            }
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn clients(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "  (no clients)".to_string();
    }
    clients
        .iter()
        .map(|c| format!("  {:<8}{:<24}{}", c.id, c.name, c.email))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sales(sales: &[Sale], display: &DisplayConfig) -> String {
    if sales.is_empty() {
        return "  (no sales)".to_string();
    }
    sales
        .iter()
        .map(|s| {
            let mut row = format!(
                "  {:<10}{}  {:>4} item(s)  {:>10}",
                s.id,
                s.created_at.format("%Y-%m-%d %H:%M"),
                s.total_quantity(),
                display.format_money(s.total)
            );
            if s.canceled {
                row.push_str("  [canceled]");
            }
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One recorded sale with its priced items.
pub fn sale(sale: &Sale, display: &DisplayConfig) -> String {
    let mut out = format!(
        "  Sale {}  {}{}\n",
        sale.id,
        sale.created_at.format("%Y-%m-%d %H:%M"),
        if sale.canceled { "  [canceled]" } else { "" }
    );
    if let Some(client_id) = &sale.client_id {
        let _ = writeln!(out, "  Client {}", client_id);
    }
    for item in &sale.items {
        let _ = writeln!(
            out,
            "  {:<8}{:>4} x {:<10}{:>10}",
            item.product_id,
            item.quantity,
            display.format_money(item.unit_price),
            display.format_money(item.line_total())
        );
    }
    let _ = write!(out, "  Total {}", display.format_money(sale.total));
    out
}

pub fn user(user: &SessionUser) -> String {
    match &user.email {
        Some(email) => format!("{} <{}>", user.name, email),
        None => user.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendora_core::{Catalog, SaleComposer};

    use crate::commands::test_support::product;

    fn composer_with(items: &[(&str, i64)]) -> SaleComposer {
        let mut composer = SaleComposer::new(Catalog::from_products(vec![
            product("P1", 1000, true),
            product("P2", 500, true),
        ]));
        for (id, qty) in items {
            composer.add_item(id, *qty);
        }
        composer
    }

    #[test]
    fn test_composer_table() {
        let summary = composer_with(&[("P1", 5), ("P2", 1)]).summary();
        let text = composer(&summary, &DisplayConfig::default());

        assert!(text.contains("Product P1"));
        assert!(text.contains("5 x $10.00"));
        assert!(text.contains("$50.00"));
        assert!(text.contains("6 item(s)"));
        assert!(text.ends_with("$55.00"));
    }

    #[test]
    fn test_stale_lines_are_flagged() {
        let mut summary = composer_with(&[("P1", 1), ("P2", 2)]).summary();
        summary.lines[1].name = None;
        summary.lines[1].unit_price = None;
        summary.stale_items = vec!["P2".to_string()];

        let text = composer(&summary, &DisplayConfig::default());
        assert!(text.contains("(unavailable)"));
        assert!(text.contains("Not in the current catalog: P2"));
    }

    #[test]
    fn test_rejected_edit_explains_itself() {
        let summary = composer_with(&[]).summary();
        let text = edit(
            EditOutcome::Unchanged(Rejection::UnknownProduct),
            &summary,
            &DisplayConfig::default(),
        );
        assert!(text.starts_with("Product is not in the active catalog"));
        assert!(text.contains("(no items)"));
    }

    #[test]
    fn test_staged_selection_is_shown() {
        let mut c = composer_with(&[]);
        c.stage_product(Some("P2"));
        c.stage_quantity(3);
        let text = composer(&c.summary(), &DisplayConfig::default());
        assert!(text.contains("Next add: P2 x 3"));
    }

    #[test]
    fn test_products_mark_inactive() {
        let text = products(
            &[product("P1", 1000, true), product("P3", 700, false)],
            &DisplayConfig::default(),
        );
        let rows: Vec<&str> = text.lines().collect();
        assert!(!rows[0].contains("[inactive]"));
        assert!(rows[1].contains("[inactive]"));
        assert!(rows[1].contains("$7.00"));
    }
}
