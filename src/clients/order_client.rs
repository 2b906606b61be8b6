use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{Order, OrderDraft, OrderHistoryEntry, OrderStatus};
use crate::order_actor::{OrderError, OrderRequest, SalesReport};

/// Client for the order lifecycle actor.
#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderRequest>,
}

impl OrderClient {
    pub fn new(sender: mpsc::Sender<OrderRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(OrderRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

client_method!(OrderClient => fn submit_order(user_id: String, draft: OrderDraft) -> Order as OrderRequest::SubmitOrder, Error = OrderError);
client_method!(OrderClient => fn get_order(id: String) -> Option<Order> as OrderRequest::GetOrder, Error = OrderError);
client_method!(OrderClient => fn order_history(user_id: String) -> Vec<OrderHistoryEntry> as OrderRequest::OrderHistory, Error = OrderError);
client_method!(OrderClient => fn cancel_order(user_id: String, order_id: String) -> () as OrderRequest::CancelOrder, Error = OrderError);
client_method!(OrderClient => fn confirm_pickup(order_id: String, stop_number: String, car_info: Option<String>) -> Order as OrderRequest::ConfirmPickup, Error = OrderError);
client_method!(OrderClient => fn update_status(order_id: String, status: OrderStatus) -> () as OrderRequest::UpdateStatus, Error = OrderError);
client_method!(OrderClient => fn pickup_queue() -> Vec<Order> as OrderRequest::PickupQueue, Error = OrderError);
client_method!(OrderClient => fn sales_report(window_days: i64) -> SalesReport as OrderRequest::SalesReport, Error = OrderError);
client_method!(OrderClient => fn subscribe() -> watch::Receiver<Vec<Order>> as OrderRequest::Subscribe, Error = OrderError);
