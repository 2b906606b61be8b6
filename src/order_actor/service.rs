use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ServiceResponse;
use crate::clients::{CartClient, OrderClient, UserClient};
use crate::domain::{
    can_cancel, cart_total, derive_status, Clock, DeliveryMethod, Order, OrderDraft,
    OrderHistoryEntry, OrderStatus, PickupDetails, MASKED_BILLING,
};

use super::error::OrderError;
use super::report::{build_sales_report, SalesReport};

#[derive(Debug)]
pub enum OrderRequest {
    SubmitOrder {
        user_id: String,
        draft: OrderDraft,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    GetOrder {
        id: String,
        respond_to: ServiceResponse<Option<Order>, OrderError>,
    },
    OrderHistory {
        user_id: String,
        respond_to: ServiceResponse<Vec<OrderHistoryEntry>, OrderError>,
    },
    CancelOrder {
        user_id: String,
        order_id: String,
        respond_to: ServiceResponse<(), OrderError>,
    },
    ConfirmPickup {
        order_id: String,
        stop_number: String,
        car_info: Option<String>,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    UpdateStatus {
        order_id: String,
        status: OrderStatus,
        respond_to: ServiceResponse<(), OrderError>,
    },
    PickupQueue {
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    },
    SalesReport {
        window_days: i64,
        respond_to: ServiceResponse<SalesReport, OrderError>,
    },
    Subscribe {
        respond_to: ServiceResponse<watch::Receiver<Vec<Order>>, OrderError>,
    },
    Shutdown,
}

/// Root orchestrator for checkout and the order lifecycle. Owns the order
/// collection; delegates user validation and cart snapshots to the injected
/// sub-actor clients.
pub struct OrderService {
    receiver: mpsc::Receiver<OrderRequest>,
    cart_client: CartClient,
    user_client: UserClient,
    orders: HashMap<String, Order>,
    next_id: u64,
    snapshots: watch::Sender<Vec<Order>>,
    clock: Clock,
}

impl OrderService {
    pub fn new(
        buffer_size: usize,
        cart_client: CartClient,
        user_client: UserClient,
        clock: Clock,
    ) -> (Self, OrderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, _) = watch::channel(Vec::new());
        let service = Self {
            receiver,
            cart_client,
            user_client,
            orders: HashMap::new(),
            next_id: 1,
            snapshots,
            clock,
        };
        let client = OrderClient::new(sender);
        (service, client)
    }

    fn publish(&self) {
        let _ = self.snapshots.send(self.orders.values().cloned().collect());
    }

    #[instrument(name = "order_service", skip(self))]
    pub async fn run(mut self) {
        info!("OrderService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderRequest::SubmitOrder {
                    user_id,
                    draft,
                    respond_to,
                } => {
                    let result = self.handle_submit_order(user_id, draft).await;
                    let _ = respond_to.send(result);
                }
                OrderRequest::GetOrder { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.orders.get(&id).cloned()));
                }
                OrderRequest::OrderHistory {
                    user_id,
                    respond_to,
                } => {
                    let _ = respond_to.send(Ok(self.handle_order_history(&user_id)));
                }
                OrderRequest::CancelOrder {
                    user_id,
                    order_id,
                    respond_to,
                } => {
                    let result = self.handle_cancel_order(&user_id, &order_id);
                    let _ = respond_to.send(result);
                }
                OrderRequest::ConfirmPickup {
                    order_id,
                    stop_number,
                    car_info,
                    respond_to,
                } => {
                    let result = self.handle_confirm_pickup(&order_id, stop_number, car_info);
                    let _ = respond_to.send(result);
                }
                OrderRequest::UpdateStatus {
                    order_id,
                    status,
                    respond_to,
                } => {
                    let result = self.handle_update_status(&order_id, status);
                    let _ = respond_to.send(result);
                }
                OrderRequest::PickupQueue { respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_pickup_queue()));
                }
                OrderRequest::SalesReport {
                    window_days,
                    respond_to,
                } => {
                    let orders: Vec<Order> = self.orders.values().cloned().collect();
                    let report = build_sales_report(&orders, window_days, (self.clock)());
                    let _ = respond_to.send(Ok(report));
                }
                OrderRequest::Subscribe { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshots.subscribe()));
                }
                OrderRequest::Shutdown => {
                    info!("OrderService shutting down");
                    break;
                }
            }
        }

        info!("OrderService stopped");
    }

    /// Checkout orchestration:
    /// 1. validate the draft fields (nothing written on failure)
    /// 2. validate the user
    /// 3. snapshot the cart (empty cart rejected)
    /// 4. write the order with the method's initial status
    /// 5. empty the cart without releasing the reservation
    ///
    /// A cart-clear failure after the order write is logged and accepted;
    /// the duplicate-looking cart is a known inconsistency rather than a
    /// rollback trigger.
    #[instrument(fields(user_id = %user_id), skip(self, draft))]
    async fn handle_submit_order(
        &mut self,
        user_id: String,
        draft: OrderDraft,
    ) -> Result<Order, OrderError> {
        info!("Processing submit_order request");

        draft.validate().map_err(|msg| {
            error!(error = %msg, "Checkout validation failed");
            OrderError::ValidationError(msg)
        })?;

        match self.user_client.get_user(user_id.clone()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(user_id));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!(
                    "User validation failed: {}",
                    e
                )));
            }
        }

        let lines = self.cart_client.get_cart(user_id.clone()).await?;
        if lines.is_empty() {
            error!("Rejected checkout of an empty cart");
            return Err(OrderError::EmptyCart);
        }

        let total = cart_total(&lines) + draft.logistics.fee();
        let status = OrderStatus::initial_for(draft.logistics.method());
        let id = format!("order_{}", self.next_id);
        self.next_id += 1;

        let order = Order {
            id: id.clone(),
            user_id: user_id.clone(),
            lines,
            total,
            name: draft.name,
            address: draft.address,
            email: draft.email,
            billing: MASKED_BILLING.to_string(),
            logistics: draft.logistics,
            status,
            pickup_details: None,
            created_at: (self.clock)(),
        };
        self.orders.insert(id.clone(), order.clone());
        self.publish();
        info!(order_id = %id, total = %total, status = %status, "Order created");

        if let Err(e) = self.cart_client.take_cart(user_id).await {
            warn!(order_id = %id, error = %e, "Cart clear failed after order write");
        }

        Ok(order)
    }

    fn handle_order_history(&self, user_id: &str) -> Vec<OrderHistoryEntry> {
        let now = (self.clock)();
        let mut entries: Vec<OrderHistoryEntry> = self
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .map(|order| OrderHistoryEntry {
                simulated_status: derive_status(order, now),
                can_cancel: can_cancel(order, now),
                order: order.clone(),
            })
            .collect();
        entries.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
        entries
    }

    #[instrument(fields(user_id = %user_id, order_id = %order_id), skip(self))]
    fn handle_cancel_order(&mut self, user_id: &str, order_id: &str) -> Result<(), OrderError> {
        debug!("Processing cancel_order request");

        let now = (self.clock)();
        let order = self
            .orders
            .get_mut(order_id)
            .filter(|order| order.user_id == user_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        if !can_cancel(order, now) {
            error!("Cancel rejected");
            return Err(OrderError::CancelNotAllowed(
                "cancel window expired or the order already progressed".to_string(),
            ));
        }

        // Cancellation does not restore reserved stock; the units stay
        // committed to the order record.
        order.status = OrderStatus::Cancelled;
        self.publish();
        info!("Order cancelled");
        Ok(())
    }

    /// Re-reads the order before writing so a repeat confirmation is a
    /// no-op instead of overwriting `pickup_details`.
    #[instrument(fields(order_id = %order_id), skip(self, stop_number, car_info))]
    fn handle_confirm_pickup(
        &mut self,
        order_id: &str,
        stop_number: String,
        car_info: Option<String>,
    ) -> Result<Order, OrderError> {
        debug!("Processing confirm_pickup request");

        if stop_number.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "Stop number is required".to_string(),
            ));
        }

        let now = (self.clock)();
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        match order.status {
            OrderStatus::PickedUp => {
                info!("Order already picked up");
                Ok(order.clone())
            }
            OrderStatus::Cancelled => Err(OrderError::AlreadyCancelled(order_id.to_string())),
            _ => {
                order.status = OrderStatus::PickedUp;
                order.pickup_details = Some(PickupDetails {
                    stop_number,
                    car_info,
                    confirmed_at: now,
                });
                let confirmed = order.clone();
                self.publish();
                info!("Pickup confirmed");
                Ok(confirmed)
            }
        }
    }

    /// Back-office override: unconditional status write, used to mark queue
    /// entries picked up or cancelled.
    #[instrument(fields(order_id = %order_id, status = %status), skip(self))]
    fn handle_update_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        debug!("Processing update_status request");

        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        order.status = status;
        self.publish();
        info!("Order status updated");
        Ok(())
    }

    fn handle_pickup_queue(&self) -> Vec<Order> {
        let mut queue: Vec<Order> = self
            .orders
            .values()
            .filter(|order| {
                order.logistics.method() == DeliveryMethod::Pickup && !order.status.is_terminal()
            })
            .cloned()
            .collect();
        queue.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        queue
    }
}
