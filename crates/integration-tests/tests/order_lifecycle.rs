//! Orders from cart to delivery or cancellation.

#![allow(clippy::unwrap_used)]

use quickcart_core::{OrderId, OrderStatus, Price, TrackingId};
use quickcart_integration_tests::secret;
use quickcart_storefront::orders::{Cancellation, OrderError};
use quickcart_storefront::prompt::AutoConfirm;
use quickcart_storefront::storage::MemoryStore;
use quickcart_storefront::{Storefront, StorefrontError};

fn shopping_app() -> Storefront<MemoryStore> {
    let mut app = Storefront::with_seed(MemoryStore::new(), 42).unwrap();
    app.sign_up("erin", &secret("pw")).unwrap();
    app
}

#[test]
fn test_order_runs_to_delivery() {
    let mut app = shopping_app();
    let page = app.page_mut().unwrap();
    page.add_to_cart("Lamp", Price::from_whole(10));
    page.add_to_cart("Lamp", Price::from_whole(10));
    page.add_to_cart("Rug", Price::from_whole(5));
    assert_eq!(page.grand_total(), Price::from_whole(25));

    page.set_shipping_address("12 Elm Row");
    let id = page.place_order().unwrap();

    let order = &page.orders()[0];
    assert_eq!(order.id, id);
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.total(), Price::from_whole(25));
    assert!(order.tracking_id.as_u32() < TrackingId::UPPER_BOUND);
    assert!(page.cart().is_empty());

    let mut seen = Vec::new();
    while let Ok(status) = page.advance_order(id) {
        seen.push(status);
    }
    assert_eq!(
        seen,
        [
            OrderStatus::Processing,
            OrderStatus::Dispatched,
            OrderStatus::Delivered
        ]
    );

    let err = page.advance_order(id).unwrap_err();
    assert_eq!(err.alert_message(), "Order ID: 1 is already Delivered.");
}

#[test]
fn test_skipping_a_status_is_rejected() {
    let mut app = shopping_app();
    let page = app.page_mut().unwrap();
    page.add_to_cart("Lamp", Price::from_whole(10));
    page.set_shipping_address("12 Elm Row");
    let id = page.place_order().unwrap();

    let err = page
        .update_order_status(id, OrderStatus::Dispatched)
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Order(OrderError::InvalidTransition { .. })
    ));
    assert_eq!(page.orders()[0].status, OrderStatus::Placed);
}

#[test]
fn test_cancel_only_while_processing() {
    let mut app = shopping_app();
    let page = app.page_mut().unwrap();
    page.add_to_cart("Lamp", Price::from_whole(10));
    page.set_shipping_address("12 Elm Row");
    let id = page.place_order().unwrap();

    let err = page.cancel_order(id, &mut AutoConfirm::YES).unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Order(OrderError::NotCancellable { .. })
    ));

    page.advance_order(id).unwrap();
    let outcome = page.cancel_order(id, &mut AutoConfirm::YES).unwrap();
    assert!(matches!(outcome, Cancellation::Cancelled(order) if order.id == id));
    assert!(page.orders().is_empty());
}

#[test]
fn test_order_ids_not_reused_after_cancel() {
    let mut app = shopping_app();
    let page = app.page_mut().unwrap();

    let mut place = |name: &str| {
        page.add_to_cart(name, Price::from_whole(1));
        page.set_shipping_address("12 Elm Row");
        page.place_order().unwrap()
    };
    let first = place("Lamp");
    let second = place("Rug");
    assert_eq!(first, OrderId::new(1));
    assert_eq!(second, OrderId::new(2));

    page.advance_order(second).unwrap();
    page.cancel_order(second, &mut AutoConfirm::YES).unwrap();

    page.add_to_cart("Vase", Price::from_whole(3));
    page.set_shipping_address("12 Elm Row");
    let third = page.place_order().unwrap();
    assert_eq!(third, OrderId::new(3));

    let ids: Vec<OrderId> = page.orders().iter().map(|o| o.id).collect();
    assert_eq!(ids, [OrderId::new(1), OrderId::new(3)]);
}

#[test]
fn test_declined_prompts_change_nothing() {
    let mut app = shopping_app();
    let page = app.page_mut().unwrap();
    page.add_to_cart("Lamp", Price::from_whole(10));

    let mut asked = Vec::new();
    let mut record = |message: &str| {
        asked.push(message.to_string());
        false
    };
    assert!(!page.remove_from_cart("Lamp", &mut record));
    assert_eq!(page.cart().len(), 1);

    page.set_shipping_address("12 Elm Row");
    let id = page.place_order().unwrap();
    page.advance_order(id).unwrap();
    assert_eq!(
        page.cancel_order(id, &mut record).unwrap(),
        Cancellation::Declined
    );
    assert_eq!(page.orders().len(), 1);

    assert_eq!(
        asked,
        [
            "Are you sure you want to remove Lamp from the cart?",
            "Are you sure you want to cancel order ID: 1?",
        ]
    );
}
