use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ServiceResponse;
use crate::clients::{CartClient, InventoryClient};
use crate::domain::{CartLine, Clock, FoodItem};

use super::error::CartError;

#[derive(Debug)]
pub enum CartRequest {
    AddToCart {
        user_id: String,
        item: FoodItem,
        quantity: u32,
        respond_to: ServiceResponse<Vec<CartLine>, CartError>,
    },
    RemoveFromCart {
        user_id: String,
        item_id: String,
        respond_to: ServiceResponse<Vec<CartLine>, CartError>,
    },
    DecreaseQuantity {
        user_id: String,
        item_id: String,
        respond_to: ServiceResponse<Vec<CartLine>, CartError>,
    },
    ClearCart {
        user_id: String,
        respond_to: ServiceResponse<(), CartError>,
    },
    GetCart {
        user_id: String,
        respond_to: ServiceResponse<Vec<CartLine>, CartError>,
    },
    TakeCart {
        user_id: String,
        respond_to: ServiceResponse<Vec<CartLine>, CartError>,
    },
    Shutdown,
}

/// Owns every user's cart. Each mutation reserves or releases stock through
/// the inventory service before the cart state changes, so a cart line always
/// corresponds to units already taken off the shelf.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    inventory_client: InventoryClient,
    carts: HashMap<String, Vec<CartLine>>,
    clock: Clock,
}

impl CartService {
    pub fn new(
        buffer_size: usize,
        inventory_client: InventoryClient,
        clock: Clock,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            inventory_client,
            carts: HashMap::new(),
            clock,
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddToCart {
                    user_id,
                    item,
                    quantity,
                    respond_to,
                } => {
                    let result = self.handle_add_to_cart(user_id, item, quantity).await;
                    let _ = respond_to.send(result);
                }
                CartRequest::RemoveFromCart {
                    user_id,
                    item_id,
                    respond_to,
                } => {
                    let result = self.handle_remove_from_cart(&user_id, &item_id).await;
                    let _ = respond_to.send(result);
                }
                CartRequest::DecreaseQuantity {
                    user_id,
                    item_id,
                    respond_to,
                } => {
                    let result = self.handle_decrease_quantity(&user_id, &item_id).await;
                    let _ = respond_to.send(result);
                }
                CartRequest::ClearCart {
                    user_id,
                    respond_to,
                } => {
                    let result = self.handle_clear_cart(&user_id).await;
                    let _ = respond_to.send(result);
                }
                CartRequest::GetCart {
                    user_id,
                    respond_to,
                } => {
                    let cart = self.carts.get(&user_id).cloned().unwrap_or_default();
                    let _ = respond_to.send(Ok(cart));
                }
                CartRequest::TakeCart {
                    user_id,
                    respond_to,
                } => {
                    // Checkout path: empties the cart but keeps the stock
                    // reservation with the order.
                    let cart = self.carts.remove(&user_id).unwrap_or_default();
                    info!(user_id = %user_id, lines = cart.len(), "Cart taken for checkout");
                    let _ = respond_to.send(Ok(cart));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    /// Reserves stock, then merges the line into the user's cart. The
    /// aggregate is the enforcement boundary for quantity bounds; the
    /// stock check and the purchase are still two reads, so a concurrent
    /// session can race between them (last-write-wins, documented).
    #[instrument(fields(user_id = %user_id, item_id = %item.id, quantity = %quantity), skip(self, item))]
    async fn handle_add_to_cart(
        &mut self,
        user_id: String,
        item: FoodItem,
        quantity: u32,
    ) -> Result<Vec<CartLine>, CartError> {
        debug!("Processing add_to_cart request");

        if quantity == 0 {
            error!("Rejected zero quantity");
            return Err(CartError::InvalidQuantity(quantity));
        }

        let available = self.inventory_client.check_stock(item.id.clone()).await?;
        if quantity > available {
            error!(requested = quantity, available, "Insufficient stock");
            return Err(CartError::InsufficientStock {
                requested: quantity,
                available,
            });
        }

        let remaining = self
            .inventory_client
            .purchase_stock(item.id.clone(), quantity)
            .await?;

        let now = (self.clock)();
        let cart = self.carts.entry(user_id).or_default();
        match cart.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => {
                line.quantity += quantity;
                line.updated_at = now;
            }
            None => cart.push(CartLine::from_item(&item, quantity, now)),
        }

        info!(remaining_stock = remaining, "Item added to cart");
        Ok(cart.clone())
    }

    #[instrument(fields(user_id = %user_id, item_id = %item_id), skip(self))]
    async fn handle_remove_from_cart(
        &mut self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Vec<CartLine>, CartError> {
        debug!("Processing remove_from_cart request");

        let cart = self.carts.entry(user_id.to_string()).or_default();
        let position = cart
            .iter()
            .position(|line| line.item_id == item_id)
            .ok_or_else(|| CartError::LineNotFound(item_id.to_string()))?;
        let quantity = cart[position].quantity;

        self.inventory_client
            .restore_stock(item_id.to_string(), quantity)
            .await?;

        let cart = self.carts.entry(user_id.to_string()).or_default();
        cart.retain(|line| line.item_id != item_id);
        info!(restored = quantity, "Line removed from cart");
        Ok(cart.clone())
    }

    #[instrument(fields(user_id = %user_id, item_id = %item_id), skip(self))]
    async fn handle_decrease_quantity(
        &mut self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Vec<CartLine>, CartError> {
        debug!("Processing decrease_quantity request");

        let cart = self.carts.entry(user_id.to_string()).or_default();
        if !cart.iter().any(|line| line.item_id == item_id) {
            return Err(CartError::LineNotFound(item_id.to_string()));
        }

        self.inventory_client
            .restore_stock(item_id.to_string(), 1)
            .await?;

        let now = (self.clock)();
        let cart = self.carts.entry(user_id.to_string()).or_default();
        for line in cart.iter_mut() {
            if line.item_id == item_id {
                line.quantity -= 1;
                line.updated_at = now;
            }
        }
        cart.retain(|line| line.quantity > 0);
        Ok(cart.clone())
    }

    /// Restores stock line by line; a failed restore aborts and leaves the
    /// unrestored lines in the cart.
    #[instrument(fields(user_id = %user_id), skip(self))]
    async fn handle_clear_cart(&mut self, user_id: &str) -> Result<(), CartError> {
        debug!("Processing clear_cart request");

        let lines = self.carts.get(user_id).cloned().unwrap_or_default();
        for line in lines {
            if let Err(e) = self
                .inventory_client
                .restore_stock(line.item_id.clone(), line.quantity)
                .await
            {
                warn!(item_id = %line.item_id, error = %e, "Stock restore failed, aborting clear");
                return Err(e.into());
            }
            if let Some(cart) = self.carts.get_mut(user_id) {
                cart.retain(|l| l.item_id != line.item_id);
            }
        }

        self.carts.remove(user_id);
        info!("Cart cleared");
        Ok(())
    }
}
