mod domain;
mod clients;

mod app_system;
mod seed;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod cart_actor;
mod inventory_actor;
mod order_actor;
mod review_actor;
mod user_actor;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, Session, StorefrontSystem};
use crate::clients::LOW_STOCK_THRESHOLD;
use crate::domain::{Logistics, OrderDraft, UserCreate};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting grocery storefront");

    // Start every actor and wire them together
    let system = StorefrontSystem::new();

    // Load the starter catalog on first boot
    let span = tracing::info_span!("catalog_seeding");
    async {
        info!("Seeding catalog");
        seed::seed_catalog(&system.inventory_client)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    // Create a shopper and an admin
    let span = tracing::info_span!("user_creation");
    let (shopper_id, admin_id) = async {
        info!("Creating users");
        let shopper_id = system
            .user_client
            .create_user(UserCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;
        let admin_id = system
            .user_client
            .create_user(UserCreate {
                name: "Sam".to_string(),
                email: "sam@example.com".to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;
        system
            .user_client
            .grant_admin(admin_id.clone())
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((shopper_id, admin_id))
    }
    .instrument(span)
    .await?;

    info!(shopper_id = %shopper_id, admin_id = %admin_id, "Users created");

    // Shop: browse a category, fill the cart, check out with express delivery
    let span = tracing::info_span!("shopping_trip");
    let order_result = async {
        let fruits = system
            .inventory_client
            .list_by_category("Fruits".to_string())
            .await
            .map_err(|e| e.to_string())?;
        info!(items = fruits.len(), "Browsing the Fruits aisle");

        for item in fruits.iter().take(2).cloned() {
            system
                .cart_client
                .add_to_cart(shopper_id.clone(), item, 2)
                .await
                .map_err(|e| e.to_string())?;
        }

        system
            .order_client
            .submit_order(
                shopper_id.clone(),
                OrderDraft {
                    name: "Alice".to_string(),
                    address: "12 Baker St".to_string(),
                    email: "alice@example.com".to_string(),
                    logistics: Logistics::Express { instructions: None },
                },
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order) => {
            info!(order_id = %order.id, total = %order.total, status = %order.status, "Order placed")
        }
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    // Back office: low stock and the sales report, behind the admin gate
    let span = tracing::info_span!("back_office");
    async {
        let admin = Session::authenticate(&system.user_client, admin_id)
            .await
            .map_err(|e| e.to_string())?;
        admin.require_admin().map_err(|e| e.to_string())?;

        let low = system
            .inventory_client
            .low_stock(LOW_STOCK_THRESHOLD)
            .await
            .map_err(|e| e.to_string())?;
        info!(items = low.len(), "Low-stock items");

        for item in low {
            let level = system
                .inventory_client
                .restock(item.id.clone(), 25, chrono::Utc::now())
                .await
                .map_err(|e| e.to_string())?;
            info!(item_id = %item.id, stock = level, "Restocked");
        }

        let report = system
            .order_client
            .sales_report(7)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            orders = report.order_count,
            revenue = %report.total_revenue,
            "Weekly sales report"
        );
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Storefront run complete");
    Ok(())
}
