use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog item. Stock is only mutated through inventory actions
/// (purchase, restore, restock) and admin edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub image: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_restocked: Option<DateTime<Utc>>,
}

/// Payload for creating a new catalog item (admin "add food" flow and seeding).
#[derive(Debug, Clone, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub image: String,
    pub description: String,
}

/// Payload for admin edits of an existing catalog item.
#[derive(Debug, Clone, Default)]
pub struct FoodItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<Option<String>>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub image: Option<String>,
    pub description: Option<String>,
}
