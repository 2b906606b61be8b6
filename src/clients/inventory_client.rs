use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{FoodItem, FoodItemCreate, FoodItemPatch};
use crate::impl_basic_client;
use crate::inventory_actor::{InventoryAction, InventoryActionResult, InventoryError};

/// Default threshold for the admin low-stock view.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Client for the inventory actor: catalog reads and every stock mutation.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<FoodItem>,
}

impl_basic_client!(InventoryClient, FoodItem, InventoryError, item);

impl InventoryClient {
    #[instrument(skip(self, payload))]
    pub async fn create_item(&self, payload: FoodItemCreate) -> Result<String, InventoryError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(InventoryError::from)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_item(
        &self,
        id: String,
        patch: FoodItemPatch,
    ) -> Result<FoodItem, InventoryError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(InventoryError::from)
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<FoodItem>, InventoryError> {
        debug!("Sending request");
        self.inner.list().await.map_err(InventoryError::from)
    }

    /// Catalog browse filter; "All" returns the whole catalog.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: String) -> Result<Vec<FoodItem>, InventoryError> {
        let mut items = self.list_items().await?;
        if category != "All" {
            items.retain(|item| item.category == category);
        }
        Ok(items)
    }

    /// Admin view of items at or below the threshold.
    #[instrument(skip(self))]
    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<FoodItem>, InventoryError> {
        let mut items = self.list_items().await?;
        items.retain(|item| item.stock <= threshold);
        Ok(items)
    }

    async fn stock_action(
        &self,
        id: String,
        action: InventoryAction,
    ) -> Result<u32, InventoryError> {
        match self.inner.perform_action(id, action).await {
            Ok(InventoryActionResult::StockLevel(level)) => Ok(level),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, InventoryError> {
        debug!("Sending request");
        self.stock_action(id, InventoryAction::CheckStock).await
    }

    /// Reserve units for a cart add; clamps at zero. Returns the new level.
    #[instrument(skip(self))]
    pub async fn purchase_stock(&self, id: String, quantity: u32) -> Result<u32, InventoryError> {
        debug!("Sending request");
        self.stock_action(id, InventoryAction::Purchase(quantity)).await
    }

    /// Return previously reserved units to the shelf.
    #[instrument(skip(self))]
    pub async fn restore_stock(&self, id: String, quantity: u32) -> Result<u32, InventoryError> {
        debug!("Sending request");
        self.stock_action(id, InventoryAction::Restore(quantity)).await
    }

    /// Admin restock; stamps `last_restocked`.
    #[instrument(skip(self))]
    pub async fn restock(
        &self,
        id: String,
        quantity: u32,
        at: DateTime<Utc>,
    ) -> Result<u32, InventoryError> {
        debug!("Sending request");
        self.stock_action(id, InventoryAction::Restock { quantity, at })
            .await
    }

    /// Live catalog snapshots; the receiver unsubscribes on drop.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<watch::Receiver<Vec<FoodItem>>, InventoryError> {
        debug!("Sending request");
        self.inner.subscribe().await.map_err(InventoryError::from)
    }
}
