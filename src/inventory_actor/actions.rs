use chrono::{DateTime, Utc};

/// Custom actions for catalog items.
///
/// These cover every stock mutation the storefront performs; nothing else
/// writes the stock field.
#[derive(Debug, Clone)]
pub enum InventoryAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Decrements stock for an add-to-cart reservation. Clamps at zero so a
    /// client never observes negative stock.
    Purchase(u32),
    /// Returns previously reserved units to the shelf, uncapped.
    Restore(u32),
    /// Admin restock; increments stock and stamps `last_restocked`.
    Restock { quantity: u32, at: DateTime<Utc> },
}

/// Every action resolves to the stock level after it ran.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryActionResult {
    StockLevel(u32),
}
