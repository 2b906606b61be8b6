#[cfg(test)]
mod tests {
    use crate::app_system::StorefrontSystem;
    use crate::clients::{CartClient, OrderClient, UserClient};
    use crate::domain::{FoodItemCreate, Logistics, OrderDraft, OrderStatus};
    use crate::mock_framework::{create_mock_client, expect_get};
    use crate::order_actor::{OrderError, OrderService};
    use crate::seed::seed_catalog;
    use chrono::{Duration, Utc};
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    fn express_draft() -> OrderDraft {
        OrderDraft {
            name: "Alice".to_string(),
            address: "12 Baker St".to_string(),
            email: "alice@example.com".to_string(),
            logistics: Logistics::Express { instructions: None },
        }
    }

    async fn create_shopper(system: &StorefrontSystem) -> String {
        system
            .user_client
            .create_user(crate::domain::UserCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_cart_round_trip_restores_baseline_stock() {
        let system = StorefrontSystem::new();

        let item_id = system
            .inventory_client
            .create_item(FoodItemCreate {
                name: "Apples".to_string(),
                category: "Fruits".to_string(),
                subcategory: None,
                price: 1.29,
                stock: 10,
                image: "/apples.webp".to_string(),
                description: "Red apples, per lb".to_string(),
            })
            .await
            .unwrap();
        let item = system
            .inventory_client
            .get_item(item_id.clone())
            .await
            .unwrap()
            .unwrap();

        system
            .cart_client
            .add_to_cart("shopper".to_string(), item, 3)
            .await
            .unwrap();
        assert_eq!(
            system.inventory_client.check_stock(item_id.clone()).await.unwrap(),
            7
        );

        system
            .cart_client
            .remove_from_cart("shopper".to_string(), item_id.clone())
            .await
            .unwrap();
        assert_eq!(
            system.inventory_client.check_stock(item_id).await.unwrap(),
            10
        );

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_express_checkout_end_to_end() {
        let system = StorefrontSystem::new();
        seed_catalog(&system.inventory_client).await.unwrap();
        let user_id = create_shopper(&system).await;

        let item_id = system
            .inventory_client
            .create_item(FoodItemCreate {
                name: "Party Platter".to_string(),
                category: "Deli".to_string(),
                subcategory: None,
                price: 10.0,
                stock: 20,
                image: "/party_platter.webp".to_string(),
                description: "Assorted deli platter".to_string(),
            })
            .await
            .unwrap();
        let item = system
            .inventory_client
            .get_item(item_id.clone())
            .await
            .unwrap()
            .unwrap();

        system
            .cart_client
            .add_to_cart(user_id.clone(), item, 4)
            .await
            .unwrap();

        let order = system
            .order_client
            .submit_order(user_id.clone(), express_draft())
            .await
            .unwrap();

        // 40.00 cart plus the 10.00 express fee
        assert!((order.total - 50.0).abs() < 1e-9);
        assert_eq!(order.status, OrderStatus::OutForExpressDelivery);
        assert_eq!(order.billing, "xxxx xxxx xxxx xxxx");

        // cart emptied, reservation kept with the order
        assert!(system
            .cart_client
            .get_cart(user_id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            system.inventory_client.check_stock(item_id).await.unwrap(),
            16
        );

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() {
        let system = StorefrontSystem::new();
        let user_id = create_shopper(&system).await;

        let err = system
            .order_client
            .submit_order(user_id, express_draft())
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::EmptyCart);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_window_closes_after_five_minutes() {
        let now = Arc::new(Mutex::new(Utc::now()));
        let clock_source = now.clone();
        let clock: crate::domain::Clock =
            Arc::new(move || *clock_source.lock().unwrap());

        let system = StorefrontSystem::with_clock(clock);
        seed_catalog(&system.inventory_client).await.unwrap();
        let user_id = create_shopper(&system).await;

        let items = system.inventory_client.list_items().await.unwrap();
        let item = items[0].clone();
        system
            .cart_client
            .add_to_cart(user_id.clone(), item, 1)
            .await
            .unwrap();
        let order = system
            .order_client
            .submit_order(user_id.clone(), express_draft())
            .await
            .unwrap();

        // six minutes later, the window has closed
        {
            let mut current = now.lock().unwrap();
            *current = *current + Duration::minutes(6);
        }
        let err = system
            .order_client
            .cancel_order(user_id.clone(), order.id.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::CancelNotAllowed(_)));

        let history = system.order_client.order_history(user_id).await.unwrap();
        assert!(!history[0].can_cancel);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_repeat_pickup_confirmation_is_a_noop() {
        let system = StorefrontSystem::new();
        seed_catalog(&system.inventory_client).await.unwrap();
        let user_id = create_shopper(&system).await;

        let items = system.inventory_client.list_items().await.unwrap();
        let item = items[0].clone();
        system
            .cart_client
            .add_to_cart(user_id.clone(), item, 1)
            .await
            .unwrap();
        let order = system
            .order_client
            .submit_order(
                user_id.clone(),
                OrderDraft {
                    name: "Alice".to_string(),
                    address: "12 Baker St".to_string(),
                    email: "alice@example.com".to_string(),
                    logistics: Logistics::Pickup {
                        location: "Store #4".to_string(),
                        pickup_time: "2026-09-01T10:00".to_string(),
                        instructions: None,
                    },
                },
            )
            .await
            .unwrap();

        // pickup queue sees the open order
        let queue = system.order_client.pickup_queue().await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, order.id);

        let first = system
            .order_client
            .confirm_pickup(order.id.clone(), "7".to_string(), Some("Blue sedan".to_string()))
            .await
            .unwrap();
        assert_eq!(first.status, OrderStatus::PickedUp);
        let confirmed_at = first.pickup_details.as_ref().unwrap().confirmed_at;

        // second confirmation must not overwrite the details
        let second = system
            .order_client
            .confirm_pickup(order.id.clone(), "99".to_string(), None)
            .await
            .unwrap();
        assert_eq!(second.pickup_details.as_ref().unwrap().stop_number, "7");
        assert_eq!(
            second.pickup_details.as_ref().unwrap().confirmed_at,
            confirmed_at
        );

        // terminal orders leave the queue
        assert!(system.order_client.pickup_queue().await.unwrap().is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_sales_report_excludes_cancelled_orders() {
        let system = StorefrontSystem::new();
        seed_catalog(&system.inventory_client).await.unwrap();
        let user_id = create_shopper(&system).await;

        let items = system.inventory_client.list_items().await.unwrap();
        let item = items.iter().find(|i| i.name == "Soda").unwrap().clone();

        system
            .cart_client
            .add_to_cart(user_id.clone(), item.clone(), 2)
            .await
            .unwrap();
        let kept = system
            .order_client
            .submit_order(user_id.clone(), express_draft())
            .await
            .unwrap();

        system
            .cart_client
            .add_to_cart(user_id.clone(), item, 1)
            .await
            .unwrap();
        let cancelled = system
            .order_client
            .submit_order(user_id.clone(), express_draft())
            .await
            .unwrap();
        system
            .order_client
            .cancel_order(user_id, cancelled.id)
            .await
            .unwrap();

        let report = system.order_client.sales_report(7).await.unwrap();
        assert_eq!(report.order_count, 1);
        assert!((report.total_revenue - kept.total).abs() < 1e-9);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_order_validates_user_first() {
        // Mocked user directory; the cart channel is never serviced, which
        // proves checkout stops before touching the cart when the user is
        // unknown.
        let (user_inner, mut user_rx) = create_mock_client::<crate::domain::User>(10);
        let user_client = UserClient::new(user_inner);
        let (cart_sender, _cart_rx) = mpsc::channel(10);
        let cart_client = CartClient::new(cart_sender);

        let (service, order_client): (OrderService, OrderClient) = OrderService::new(
            10,
            cart_client,
            user_client,
            crate::domain::system_clock(),
        );
        tokio::spawn(service.run());

        let order_task = tokio::spawn(async move {
            order_client
                .submit_order("user_1".to_string(), express_draft())
                .await
        });

        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, "user_1");
        responder.send(Ok(None)).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(
            result.unwrap_err(),
            OrderError::InvalidUser("user_1".to_string())
        );
    }

    #[tokio::test]
    async fn test_inventory_subscription_sees_cart_reservations() {
        let system = StorefrontSystem::new();
        seed_catalog(&system.inventory_client).await.unwrap();

        let mut snapshots = system.inventory_client.subscribe().await.unwrap();
        let items = system.inventory_client.list_items().await.unwrap();
        let item = items[0].clone();
        let item_id = item.id.clone();
        let before = item.stock;

        system
            .cart_client
            .add_to_cart("shopper".to_string(), item, 2)
            .await
            .unwrap();

        snapshots.changed().await.unwrap();
        let snapshot = snapshots.borrow().clone();
        let seen = snapshot.iter().find(|i| i.id == item_id).unwrap();
        assert_eq!(seen.stock, before - 2);

        system.shutdown().await.unwrap();
    }
}
