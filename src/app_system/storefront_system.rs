use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::cart_actor::CartService;
use crate::clients::{CartClient, InventoryClient, OrderClient, ReviewClient, UserClient};
use crate::domain::{system_clock, Clock, FoodItem, User};
use crate::order_actor::OrderService;
use crate::review_actor::ReviewService;

const CHANNEL_BUFFER: usize = 32;

/// The assembled storefront: every actor spawned and wired together.
///
/// Responsible for startup order (inventory and users first, then the
/// services that depend on their clients) and for graceful shutdown.
pub struct StorefrontSystem {
    pub inventory_client: InventoryClient,
    pub user_client: UserClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub review_client: ReviewClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    /// Wiring with an injected clock, used by tests that move time.
    pub fn with_clock(clock: Clock) -> Self {
        // 1. Inventory
        let item_counter = Arc::new(AtomicU64::new(1));
        let next_item_id = move || {
            let id = item_counter.fetch_add(1, Ordering::SeqCst);
            format!("item_{}", id)
        };
        let (inventory_actor, inventory_resource_client) =
            ResourceActor::<FoodItem>::new(CHANNEL_BUFFER, next_item_id);
        let inventory_client = InventoryClient::new(inventory_resource_client);
        let inventory_handle = tokio::spawn(inventory_actor.run());

        // 2. Users
        let user_counter = Arc::new(AtomicU64::new(1));
        let next_user_id = move || {
            let id = user_counter.fetch_add(1, Ordering::SeqCst);
            format!("user_{}", id)
        };
        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new(CHANNEL_BUFFER, next_user_id);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 3. Carts, reserving through the inventory client
        let (cart_service, cart_client) =
            CartService::new(CHANNEL_BUFFER, inventory_client.clone(), clock.clone());
        let cart_handle = tokio::spawn(cart_service.run());

        // 4. Orders, orchestrating carts and users
        let (order_service, order_client) = OrderService::new(
            CHANNEL_BUFFER,
            cart_client.clone(),
            user_client.clone(),
            clock.clone(),
        );
        let order_handle = tokio::spawn(order_service.run());

        // 5. Reviews
        let (review_service, review_client) = ReviewService::new(CHANNEL_BUFFER, clock);
        let review_handle = tokio::spawn(review_service.run());

        Self {
            inventory_client,
            user_client,
            cart_client,
            order_client,
            review_client,
            handles: vec![
                inventory_handle,
                user_handle,
                cart_handle,
                order_handle,
                review_handle,
            ],
        }
    }

    /// Shut the system down in reverse dependency order. The bespoke
    /// services get an explicit shutdown message; the resource actors stop
    /// when their last client is dropped.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        self.order_client.shutdown().await?;
        self.review_client.shutdown().await?;
        self.cart_client.shutdown().await?;

        drop(self.order_client);
        drop(self.review_client);
        drop(self.cart_client);
        drop(self.inventory_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}

impl Default for StorefrontSystem {
    fn default() -> Self {
        Self::new()
    }
}
