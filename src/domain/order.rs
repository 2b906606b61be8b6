use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::CartLine;

/// Billing is stored only as a masked token; raw card data never reaches the
/// order record.
pub const MASKED_BILLING: &str = "xxxx xxxx xxxx xxxx";

/// A user may cancel within this window, and only while the order still
/// carries its initial status.
pub const CANCEL_WINDOW_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMethod {
    Standard,
    Express,
    Pickup,
}

/// Delivery selection, one variant per method so each carries exactly the
/// fields it requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Logistics {
    Standard {
        instructions: Option<String>,
    },
    Express {
        instructions: Option<String>,
    },
    Pickup {
        location: String,
        pickup_time: String,
        instructions: Option<String>,
    },
}

impl Logistics {
    pub fn method(&self) -> DeliveryMethod {
        match self {
            Logistics::Standard { .. } => DeliveryMethod::Standard,
            Logistics::Express { .. } => DeliveryMethod::Express,
            Logistics::Pickup { .. } => DeliveryMethod::Pickup,
        }
    }

    pub fn fee(&self) -> f64 {
        match self {
            Logistics::Standard { .. } => 5.0,
            Logistics::Express { .. } => 10.0,
            Logistics::Pickup { .. } => 0.0,
        }
    }
}

/// Order status. Initial and terminal variants are persisted on the order;
/// the rest only ever appear as the display-only simulated status computed
/// by [`derive_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    // Persisted initial statuses, one per delivery method
    InProcess,
    PreparingForPickup,
    OutForExpressDelivery,
    // Derived-only timeline statuses
    ShoppingForYourOrder,
    ReadyForPickup,
    EnRoute,
    ProcessingOrder,
    OutForDelivery,
    Delivered,
    // Terminal persisted statuses
    PickedUp,
    Cancelled,
}

impl OrderStatus {
    /// The persisted status an order starts with, chosen by delivery method.
    pub fn initial_for(method: DeliveryMethod) -> Self {
        match method {
            DeliveryMethod::Standard => OrderStatus::InProcess,
            DeliveryMethod::Express => OrderStatus::OutForExpressDelivery,
            DeliveryMethod::Pickup => OrderStatus::PreparingForPickup,
        }
    }

    /// Terminal statuses are never overwritten by derivation or repeat
    /// pickup confirmation.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::PickedUp | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::InProcess => "In Process",
            OrderStatus::PreparingForPickup => "Preparing for Pickup",
            OrderStatus::OutForExpressDelivery => "Out for Express Delivery",
            OrderStatus::ShoppingForYourOrder => "Shopping for Your Order",
            OrderStatus::ReadyForPickup => "Ready for Pickup",
            OrderStatus::EnRoute => "En Route",
            OrderStatus::ProcessingOrder => "Processing Order",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::PickedUp => "Picked Up",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// Set once by the pickup-confirmation flow, never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupDetails {
    pub stop_number: String,
    pub car_info: Option<String>,
    pub confirmed_at: DateTime<Utc>,
}

/// An immutable order record. Lines are a snapshot of the cart at submission
/// time, not a live reference; after creation only `status` and
/// `pickup_details` are ever patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub name: String,
    pub address: String,
    pub email: String,
    pub billing: String,
    pub logistics: Logistics,
    pub status: OrderStatus,
    pub pickup_details: Option<PickupDetails>,
    pub created_at: DateTime<Utc>,
}

/// Checkout form contents. Validated before any state change; carries no
/// raw card data.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub name: String,
    pub address: String,
    pub email: String,
    pub logistics: Logistics,
}

impl OrderDraft {
    /// Checkout field validation. Returns the first problem found, in the
    /// order the form presents the fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.address.trim().is_empty() {
            return Err("Address is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if let Logistics::Pickup {
            location,
            pickup_time,
            ..
        } = &self.logistics
        {
            if location.trim().is_empty() {
                return Err("Pickup location is required".to_string());
            }
            if pickup_time.trim().is_empty() {
                return Err("Please select a valid pickup date and time".to_string());
            }
        }
        Ok(())
    }
}

/// Display-only simulated status: a pure function of the persisted status,
/// the delivery method, and the minutes elapsed since `created_at`. A
/// terminal persisted status always wins, regardless of method.
pub fn derive_status(order: &Order, now: DateTime<Utc>) -> OrderStatus {
    if order.status.is_terminal() {
        return order.status;
    }

    let mins_elapsed = (now - order.created_at).num_minutes();

    match order.logistics.method() {
        DeliveryMethod::Pickup => {
            if mins_elapsed >= 60 {
                OrderStatus::ReadyForPickup
            } else if mins_elapsed >= 30 {
                OrderStatus::ShoppingForYourOrder
            } else {
                OrderStatus::PreparingForPickup
            }
        }
        DeliveryMethod::Express => {
            if mins_elapsed >= 90 {
                OrderStatus::Delivered
            } else if mins_elapsed >= 30 {
                OrderStatus::EnRoute
            } else {
                OrderStatus::OutForExpressDelivery
            }
        }
        DeliveryMethod::Standard => {
            if mins_elapsed >= 480 {
                OrderStatus::Delivered
            } else if mins_elapsed >= 240 {
                OrderStatus::OutForDelivery
            } else {
                OrderStatus::ProcessingOrder
            }
        }
    }
}

/// Cancellation guard: within the window and still carrying the initial
/// status for its method.
pub fn can_cancel(order: &Order, now: DateTime<Utc>) -> bool {
    let mins_elapsed = (now - order.created_at).num_minutes();
    mins_elapsed <= CANCEL_WINDOW_MINUTES
        && order.status == OrderStatus::initial_for(order.logistics.method())
}

/// An order paired with its simulated status and cancel-window flag, as the
/// order-history view consumes it.
#[derive(Debug, Clone)]
pub struct OrderHistoryEntry {
    pub order: Order,
    pub simulated_status: OrderStatus,
    pub can_cancel: bool,
}
