//! Starter catalog loaded on an empty inventory.

use tracing::{info, instrument};

use crate::clients::InventoryClient;
use crate::domain::FoodItemCreate;
use crate::inventory_actor::InventoryError;

const SAMPLE_CATALOG: &str = r#"[
  { "name": "Whole Milk", "category": "Milk", "price": 3.99, "stock": 50, "image": "/whole_milk.webp", "description": "Fresh whole milk, 1 gallon" },
  { "name": "Almond Milk", "category": "Milk", "price": 4.49, "stock": 30, "image": "/almond_milk.webp", "description": "Organic almond milk, unsweetened" },
  { "name": "Brown Eggs", "category": "Eggs", "price": 2.99, "stock": 40, "image": "/brown_eggs.webp", "description": "12-pack brown eggs, free-range" },
  { "name": "Sourdough Bread", "category": "Bread", "price": 4.99, "stock": 25, "image": "/sourdough_bread.webp", "description": "Fresh baked sourdough loaf" },
  { "name": "Ground Beef", "category": "Meat", "price": 7.99, "stock": 20, "image": "/ground_beef.webp", "description": "80/20 ground beef, 1 lb" },
  { "name": "Chicken Breast", "category": "Meat", "price": 5.99, "stock": 30, "image": "/chicken_breast.webp", "description": "Skinless, boneless chicken breast" },
  { "name": "Carrots", "category": "Vegetables", "price": 1.99, "stock": 50, "image": "/carrots.webp", "description": "Fresh organic carrots, 1 lb" },
  { "name": "Broccoli", "category": "Vegetables", "price": 2.49, "stock": 40, "image": "/broccoli.webp", "description": "Organic green broccoli, 1 bunch" },
  { "name": "Bananas", "category": "Fruits", "price": 0.69, "stock": 60, "image": "/banana.webp", "description": "Fresh ripe bananas, per lb" },
  { "name": "Apples", "category": "Fruits", "price": 1.29, "stock": 50, "image": "/apples.webp", "description": "Red apples, per lb" },
  { "name": "Salmon Fillet", "category": "Seafood", "price": 12.99, "stock": 15, "image": "/salmon_fillet.webp", "description": "Atlantic salmon fillet, 1 lb" },
  { "name": "Potato Chips", "category": "Snacks", "price": 3.49, "stock": 40, "image": "/potato_chips.webp", "description": "Classic salted potato chips" },
  { "name": "Dark Chocolate Bar", "category": "Snacks", "price": 2.49, "stock": 35, "image": "/dark_chocolate_bar.webp", "description": "Dark chocolate bar, 70% cocoa" },
  { "name": "Orange Juice", "category": "Drinks", "price": 4.99, "stock": 30, "image": "/orange_juice.webp", "description": "100% fresh orange juice, 1L" },
  { "name": "Soda", "category": "Drinks", "price": 1.49, "stock": 50, "image": "/coca_cola.webp", "description": "Carbonated soda, 12 oz can" },
  { "name": "Frozen Cheese Pizza", "category": "Frozen", "price": 6.99, "stock": 20, "image": "/frozen_cheese_pizza.webp", "description": "Cheese frozen pizza, 12-inch" },
  { "name": "Frozen Vegetables Mix", "category": "Frozen", "price": 3.99, "stock": 30, "image": "/veggies_mix.webp", "description": "Mixed frozen vegetables, 16 oz" },
  { "name": "Instant Oatmeal Variety", "category": "Cereal", "price": 4.29, "stock": 40, "image": "/oatmeal_varietypack.webp", "description": "Healthy oatmeal cereal, 14 oz" },
  { "name": "Corn Flakes", "category": "Cereal", "price": 3.99, "stock": 35, "image": "/corn_flake.webp", "description": "Classic corn flakes cereal, 18 oz" }
]"#;

/// Seed the catalog when the inventory is empty. A non-empty inventory is
/// left untouched so restarts never duplicate items.
#[instrument(skip(inventory_client))]
pub async fn seed_catalog(inventory_client: &InventoryClient) -> Result<usize, InventoryError> {
    let existing = inventory_client.list_items().await?;
    if !existing.is_empty() {
        info!(items = existing.len(), "Catalog already seeded, skipping");
        return Ok(0);
    }

    let catalog: Vec<FoodItemCreate> = serde_json::from_str(SAMPLE_CATALOG)
        .map_err(|e| InventoryError::InvalidItem(format!("Seed catalog parse error: {}", e)))?;
    let count = catalog.len();
    for item in catalog {
        inventory_client.create_item(item).await?;
    }

    info!(items = count, "Catalog seeded");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::FoodItem;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_sample_catalog_parses() {
        let catalog: Vec<FoodItemCreate> = serde_json::from_str(SAMPLE_CATALOG).unwrap();
        assert_eq!(catalog.len(), 19);
        assert!(catalog.iter().all(|item| item.price > 0.0));
        assert!(catalog.iter().all(|item| item.subcategory.is_none()));
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("item_{}", id)
        };
        let (actor, resource_client) = ResourceActor::<FoodItem>::new(32, next_id);
        tokio::spawn(actor.run());
        let client = InventoryClient::new(resource_client);

        assert_eq!(seed_catalog(&client).await.unwrap(), 19);
        assert_eq!(seed_catalog(&client).await.unwrap(), 0);
        assert_eq!(client.list_items().await.unwrap().len(), 19);
    }
}
