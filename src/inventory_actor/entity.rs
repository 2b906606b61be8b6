use crate::actor_framework::Entity;
use crate::domain::{FoodItem, FoodItemCreate, FoodItemPatch};

use super::actions::{InventoryAction, InventoryActionResult};

impl Entity for FoodItem {
    type Id = String;
    type CreatePayload = FoodItemCreate;
    type Patch = FoodItemPatch;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: FoodItemCreate) -> Result<Self, String> {
        if payload.price <= 0.0 {
            return Err(format!("Invalid price: {}", payload.price));
        }
        Ok(Self {
            id,
            name: payload.name,
            category: payload.category,
            subcategory: payload.subcategory,
            price: payload.price,
            stock: payload.stock,
            image: payload.image,
            description: payload.description,
            last_restocked: None,
        })
    }

    fn on_update(&mut self, patch: FoodItemPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            if price <= 0.0 {
                return Err(format!("Invalid price: {}", price));
            }
            self.price = price;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(subcategory) = patch.subcategory {
            self.subcategory = subcategory;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        Ok(())
    }

    /// Stock arithmetic for the storefront.
    ///
    /// `Purchase` clamps at zero rather than failing: the cart aggregate is
    /// the enforcement boundary for oversell, and concurrent sessions may
    /// race a stale read.
    fn handle_action(&mut self, action: InventoryAction) -> Result<InventoryActionResult, String> {
        match action {
            InventoryAction::CheckStock => Ok(InventoryActionResult::StockLevel(self.stock)),
            InventoryAction::Purchase(quantity) => {
                self.stock = self.stock.saturating_sub(quantity);
                Ok(InventoryActionResult::StockLevel(self.stock))
            }
            InventoryAction::Restore(quantity) => {
                self.stock += quantity;
                Ok(InventoryActionResult::StockLevel(self.stock))
            }
            InventoryAction::Restock { quantity, at } => {
                self.stock += quantity;
                self.last_restocked = Some(at);
                Ok(InventoryActionResult::StockLevel(self.stock))
            }
        }
    }
}
