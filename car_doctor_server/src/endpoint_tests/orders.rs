//! Endpoint tests for the order routes, and in particular for the session gate in front of the
//! order listing: missing cookie, tampered and expired tokens, the ownership check, and the
//! authenticated happy path.

use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
    HttpResponse,
};
use car_doctor_engine::{
    db_types::{NewOrder, Order},
    OrderApi,
};
use cds_common::UsdCents;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use log::debug;
use serde_json::json;

use super::helpers::{claims_for, get_request, issue_token};
use crate::{
    endpoint_tests::mocks::MockOrderStore,
    routes::{MyOrdersRoute, NewOrderRoute},
};

#[actix_web::test]
async fn fetch_orders_without_cookie() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/orders", configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"message":"unauthorized"}"#);
}

#[actix_web::test]
async fn fetch_orders_with_matching_filter() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("a@x.com");
    let (status, body) = get_request(&token, "/orders?email=a@x.com", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ORDERS_JSON);
}

#[actix_web::test]
async fn absent_filter_defaults_to_own_orders() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("a@x.com");
    let (status, body) = get_request(&token, "/orders", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ORDERS_JSON);
}

#[actix_web::test]
async fn fetch_another_users_orders_is_forbidden() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("a@x.com");
    let (status, body) = get_request(&token, "/orders?email=b@x.com", configure).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"message":"forbidden access"}"#);
}

#[actix_web::test]
async fn fetch_orders_with_tampered_signature() {
    let _ = env_logger::try_init().ok();
    let mut token = valid_token("a@x.com");
    let sig_range = token.len() - 10..token.len() - 5;
    token.replace_range(sig_range, "AAAAA");
    debug!("Calling /orders with tampered token {token}");
    let (status, body) = get_request(&token, "/orders", configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"message":"unauthorized"}"#);
}

#[actix_web::test]
async fn fetch_orders_with_expired_token() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(claims_for("a@x.com"), Utc::now() - Duration::hours(1));
    let (status, body) = get_request(&token, "/orders", configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"message":"unauthorized"}"#);
}

#[actix_web::test]
async fn create_order() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrderStore::new();
    orders.expect_insert_order().returning(|new_order: NewOrder| {
        Ok(Order {
            id: 7,
            email: new_order.email,
            service_title: new_order.service_title,
            price: new_order.price,
            booking_date: new_order.booking_date,
            created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        })
    });
    let app = App::new()
        .app_data(web::Data::new(OrderApi::new(orders)))
        .service(NewOrderRoute::<MockOrderStore>::new());
    let app = test::init_service(app).await;
    // Order creation sits outside the session gate, so no cookie is needed.
    let req = TestRequest::post()
        .uri("/orders")
        .set_json(json!({ "email": "a@x.com", "service_title": "Brake check", "price": 4500 }))
        .to_request();
    let res = match test::try_call_service(&app, req).await {
        Ok(res) => res.into_parts().1,
        Err(e) => HttpResponse::from_error(e),
    };
    assert_eq!(res.status(), StatusCode::OK);
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    assert_eq!(
        body,
        r#"{"id":7,"email":"a@x.com","service_title":"Brake check","price":4500,"booking_date":null,"created_at":"2024-02-29T13:30:00Z"}"#
    );
}

fn valid_token(email: &str) -> String {
    issue_token(claims_for(email), Utc::now() + Duration::hours(1))
}

fn configure(cfg: &mut ServiceConfig) {
    let mut orders = MockOrderStore::new();
    orders.expect_fetch_orders_for_email().returning(|email: &str| {
        // The gate must never let any filter other than the authenticated email through
        assert_eq!(email, "a@x.com");
        Ok(orders_response())
    });
    cfg.service(MyOrdersRoute::<MockOrderStore>::new()).app_data(web::Data::new(OrderApi::new(orders)));
}

// Mock response to `fetch_orders_for_email` calls
fn orders_response() -> Vec<Order> {
    vec![
        Order {
            id: 1,
            email: "a@x.com".to_string(),
            service_title: "Full engine repair".to_string(),
            price: UsdCents::from(25_000),
            booking_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        },
        Order {
            id: 2,
            email: "a@x.com".to_string(),
            service_title: "Engine oil change".to_string(),
            price: UsdCents::from(2_000),
            booking_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap(),
        },
    ]
}

const ORDERS_JSON: &str = r#"[{"id":1,"email":"a@x.com","service_title":"Full engine repair","price":25000,"booking_date":"2024-03-01","created_at":"2024-02-29T13:30:00Z"},{"id":2,"email":"a@x.com","service_title":"Engine oil change","price":2000,"booking_date":null,"created_at":"2024-03-15T18:30:00Z"}]"#;
