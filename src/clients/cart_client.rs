use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::cart_actor::{CartError, CartRequest};
use crate::client_method;
use crate::domain::{CartLine, FoodItem};

/// Client for the cart aggregate actor.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

client_method!(CartClient => fn add_to_cart(user_id: String, item: FoodItem, quantity: u32) -> Vec<CartLine> as CartRequest::AddToCart, Error = CartError);
client_method!(CartClient => fn remove_from_cart(user_id: String, item_id: String) -> Vec<CartLine> as CartRequest::RemoveFromCart, Error = CartError);
client_method!(CartClient => fn decrease_quantity(user_id: String, item_id: String) -> Vec<CartLine> as CartRequest::DecreaseQuantity, Error = CartError);
client_method!(CartClient => fn clear_cart(user_id: String) -> () as CartRequest::ClearCart, Error = CartError);
client_method!(CartClient => fn get_cart(user_id: String) -> Vec<CartLine> as CartRequest::GetCart, Error = CartError);
client_method!(CartClient => fn take_cart(user_id: String) -> Vec<CartLine> as CartRequest::TakeCart, Error = CartError);
