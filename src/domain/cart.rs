use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FoodItem;

/// One line of a user's cart. Name, price, image and stock are denormalized
/// from the catalog item at add time; the line does not track later catalog
/// edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub stock_at_add: u32,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartLine {
    pub fn from_item(item: &FoodItem, quantity: u32, at: DateTime<Utc>) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            stock_at_add: item.stock,
            quantity,
            added_at: at,
            updated_at: at,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Sum of all line totals, before any delivery fee.
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line(price: f64, quantity: u32) -> CartLine {
        let now = Utc::now();
        CartLine {
            item_id: "item_1".to_string(),
            name: "Bananas".to_string(),
            price,
            image: "/banana.webp".to_string(),
            stock_at_add: 60,
            quantity,
            added_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_cart_total_sums_lines() {
        let lines = vec![line(0.69, 3), line(4.99, 2)];
        assert!((cart_total(&lines) - (0.69 * 3.0 + 4.99 * 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        assert_eq!(cart_total(&[]), 0.0);
    }
}
