// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use brewbox_domain::{Order, OrderId, OrderStatus, Role};
use time::OffsetDateTime;
use time::macros::datetime;

use super::helpers::{
    StubApi, TEST_TOKEN, anonymous_client, create_test_order, logged_in_client,
};
use crate::{ApiError, BrewBoxClient, DrinkInput, OrderAction, OrderForm, OrderScope, TipInput};

const NOW: OffsetDateTime = datetime!(2026-10-15 09:00:00 UTC);

fn order_form() -> OrderForm {
    OrderForm {
        pickup_time: String::from("2026-10-15T09:45:00Z"),
        drinks: vec![DrinkInput::new("Americano", "Large", "3.75")],
        tip: TipInput::Amount(String::from("0.50")),
    }
}

// ============================================================================
// create_order
// ============================================================================

#[tokio::test]
async fn test_customer_places_order() {
    let api: Arc<StubApi> = Arc::new(StubApi::default());
    let client: BrewBoxClient = logged_in_client(api.clone(), "Customer");

    let order: Order = client.create_order(&order_form(), NOW).await.unwrap();

    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.tip, Some(0.5));
    assert_eq!(api.calls(), vec![String::from("POST /orders")]);
    assert_eq!(api.tokens.lock().unwrap().clone(), vec![TEST_TOKEN.to_string()]);
    assert_eq!(client.local_orders().await, vec![order]);
}

#[tokio::test]
async fn test_barista_only_session_cannot_place_orders() {
    let api: Arc<StubApi> = Arc::new(StubApi::default());
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");

    let err: ApiError = client.create_order(&order_form(), NOW).await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Forbidden { ref required_role, .. } if required_role == "Customer"
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_order_without_session_is_unauthorized() {
    let api: Arc<StubApi> = Arc::new(StubApi::default());
    let client: BrewBoxClient = anonymous_client(api.clone());

    let err: ApiError = client.create_order(&order_form(), NOW).await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_order_is_not_sent() {
    let api: Arc<StubApi> = Arc::new(StubApi::default());
    let client: BrewBoxClient = logged_in_client(api.clone(), "Customer");
    let mut form: OrderForm = order_form();
    form.pickup_time = String::from("2026-10-15T08:00:00Z");

    let err: ApiError = client.create_order(&form, NOW).await.unwrap_err();

    assert_eq!(err.to_string(), "Pickup time must be in the future.");
    assert!(api.calls().is_empty());
}

// ============================================================================
// transitions
// ============================================================================

#[tokio::test]
async fn test_claim_fetches_unknown_order_first() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Placed)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");

    let order: Order = client.claim(&OrderId::new("1")).await.unwrap();

    assert_eq!(order.status, OrderStatus::Claimed);
    assert_eq!(
        api.calls(),
        vec![
            String::from("GET /orders/1"),
            String::from("PUT /orders/1/status")
        ]
    );
    assert_eq!(
        api.orders.lock().unwrap()[0].status,
        OrderStatus::Claimed
    );
}

#[tokio::test]
async fn test_known_order_is_not_refetched() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Claimed)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");
    client.list_orders(OrderScope::Current).await.unwrap();

    client.start(&OrderId::new("1")).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            String::from("GET /orders/current"),
            String::from("PUT /orders/1/status")
        ]
    );
}

#[tokio::test]
async fn test_full_barista_lifecycle() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Placed)]);
    let client: BrewBoxClient = logged_in_client(api, "Barista,Customer");
    let id: OrderId = OrderId::new("1");

    client.claim(&id).await.unwrap();
    client.start(&id).await.unwrap();
    client.mark_ready(&id).await.unwrap();
    let order: Order = client.collect(&id).await.unwrap();

    assert_eq!(order.status, OrderStatus::Collected);
}

#[tokio::test]
async fn test_illegal_transition_is_not_sent() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Ready)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");

    let err: ApiError = client.claim(&OrderId::new("1")).await.unwrap_err();

    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
    assert_eq!(api.calls(), vec![String::from("GET /orders/1")]);
    assert_eq!(client.local_orders().await[0].status, OrderStatus::Ready);
}

#[tokio::test]
async fn test_rejected_transitions_leave_local_copy_unchanged() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Claimed)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista,Customer");
    client.get_order(&OrderId::new("1")).await.unwrap();

    for (target, role) in [
        (OrderStatus::Ready, Role::Barista),
        (OrderStatus::Claimed, Role::Barista),
        (OrderStatus::Placed, Role::Barista),
        (OrderStatus::Paid, Role::Barista),
        (OrderStatus::Collected, Role::Customer),
        (OrderStatus::Cancelled, Role::Customer),
    ] {
        let result: Result<Order, ApiError> =
            client.transition(&OrderId::new("1"), target, role).await;
        assert!(
            matches!(result, Err(ApiError::DomainRuleViolation { .. })),
            "{role} -> {target}: {result:?}"
        );
        assert_eq!(client.local_orders().await[0].status, OrderStatus::Claimed);
    }

    assert_eq!(api.calls(), vec![String::from("GET /orders/1")]);
    assert_eq!(api.orders.lock().unwrap()[0].status, OrderStatus::Claimed);
}

#[tokio::test]
async fn test_customer_cannot_act_as_barista() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Placed)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Customer");

    let err: ApiError = client.claim(&OrderId::new("1")).await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden { .. }));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_barista_cannot_collect() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Ready)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");

    let err: Result<Order, ApiError> = client
        .transition(&OrderId::new("1"), OrderStatus::Collected, Role::Barista)
        .await;

    assert!(matches!(err, Err(ApiError::DomainRuleViolation { .. })));
}

#[tokio::test]
async fn test_ready_to_paid_sets_paid_flag() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Ready)]);
    let client: BrewBoxClient = logged_in_client(api, "Barista");

    let order: Order = client
        .transition(&OrderId::new("1"), OrderStatus::Paid, Role::Barista)
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Paid);
    assert!(order.paid);
}

#[tokio::test]
async fn test_set_paid_keeps_status() {
    let api: Arc<StubApi> =
        StubApi::with_orders(vec![create_test_order("1", OrderStatus::InProgress)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");

    let order: Order = client
        .perform(&OrderId::new("1"), OrderAction::MarkPaid)
        .await
        .unwrap();

    assert!(order.paid);
    assert_eq!(order.status, OrderStatus::InProgress);
    assert!(api.calls().contains(&String::from("PUT /orders/1/payment")));
    assert!(api.orders.lock().unwrap()[0].paid);
}

#[tokio::test]
async fn test_customer_cannot_set_paid() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Ready)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Customer");

    let err: ApiError = client.set_paid(&OrderId::new("1")).await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden { ref action, .. } if action == "set_paid"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_server_rejection_leaves_local_copy_unchanged() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Placed)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");
    client.get_order(&OrderId::new("1")).await.unwrap();
    api.fail_next(ApiError::Rejected {
        message: String::from("Order already claimed"),
    });

    let err: ApiError = client.claim(&OrderId::new("1")).await.unwrap_err();

    assert_eq!(err.to_string(), "Order already claimed");
    assert_eq!(client.local_orders().await[0].status, OrderStatus::Placed);
    assert!(client.is_authenticated());
}

// ============================================================================
// session failures
// ============================================================================

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![create_test_order("1", OrderStatus::Placed)]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Barista");
    api.fail_next(ApiError::Unauthorized);

    let err: ApiError = client.list_orders(OrderScope::All).await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_transport_failure_keeps_session() {
    let api: Arc<StubApi> = Arc::new(StubApi::default());
    let client: BrewBoxClient = logged_in_client(api.clone(), "Customer");
    api.fail_next(ApiError::transport("Failed to fetch orders", "connection refused"));

    let err: ApiError = client.list_orders(OrderScope::All).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch orders: connection refused");
    assert!(client.is_authenticated());
}

// ============================================================================
// listing
// ============================================================================

#[tokio::test]
async fn test_visible_orders_scope_follows_role() {
    let api: Arc<StubApi> = Arc::new(StubApi::default());

    let barista: BrewBoxClient = logged_in_client(api.clone(), "Barista");
    barista.visible_orders().await.unwrap();
    let customer: BrewBoxClient = logged_in_client(api.clone(), "Customer");
    customer.visible_orders().await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            String::from("GET /orders/current"),
            String::from("GET /orders/active")
        ]
    );
}

#[tokio::test]
async fn test_list_orders_merges_into_local_book() {
    let api: Arc<StubApi> = StubApi::with_orders(vec![
        create_test_order("1", OrderStatus::Placed),
        create_test_order("2", OrderStatus::Ready),
    ]);
    let client: BrewBoxClient = logged_in_client(api.clone(), "Customer");

    client.list_orders(OrderScope::Customer).await.unwrap();
    api.set_status("2", OrderStatus::Collected);
    client.get_order(&OrderId::new("2")).await.unwrap();

    let local: Vec<Order> = client.local_orders().await;
    assert_eq!(local.len(), 2);
    assert_eq!(local[1].status, OrderStatus::Collected);
}

#[tokio::test]
async fn test_client_capabilities_use_session_roles() {
    let api: Arc<StubApi> = Arc::new(StubApi::default());
    let client: BrewBoxClient = logged_in_client(api, "Customer");

    let actions: Vec<OrderAction> = client
        .capabilities(&create_test_order("1", OrderStatus::Ready))
        .unwrap()
        .allowed_actions();

    assert_eq!(actions, vec![OrderAction::Collect]);
}
