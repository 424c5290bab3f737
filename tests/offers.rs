use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{test, App};
use serde_json::Value;

use dashboard_server::clock::{Clock, ClockSnapshot, Greeting};
use dashboard_server::database::Database;
use dashboard_server::offer::{OfferBody, OfferCategory};
use dashboard_server::seed::{seed, OFFER_COUNT};
use dashboard_server::view::page::Page;

fn database() -> Data<Database> {
    Data::new(Database::new(seed(42), Duration::from_secs(3)).unwrap())
}

#[actix_web::test]
async fn offers_page_with_default_limit() {
    let app = test::init_service(
        App::new()
            .app_data(database())
            .configure(dashboard_server::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/offers").to_request();
    let page: Page<OfferBody> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(page.total, OFFER_COUNT as usize);
    assert_eq!(page.items.len(), 25);
    assert_eq!(page.total_pages, 2);
    assert!(page
        .items
        .windows(2)
        .all(|pair| pair[0].end_date >= pair[1].end_date));
}

#[actix_web::test]
async fn offers_filter_by_category_and_sort_by_value() {
    let app = test::init_service(
        App::new()
            .app_data(database())
            .configure(dashboard_server::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/offers?category=dining&sort_by=value&sort_order=asc&limit=100")
        .to_request();
    let page: Page<OfferBody> = test::call_and_read_body_json(&app, req).await;

    assert!(page.items.iter().all(|o| o.category == OfferCategory::Dining));
    assert!(page.items.windows(2).all(|pair| pair[0].value <= pair[1].value));
}

#[actix_web::test]
async fn offers_accept_the_largest_limit() {
    let app = test::init_service(
        App::new()
            .app_data(database())
            .configure(dashboard_server::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/offers?limit={}", usize::MAX))
        .to_request();
    let page: Page<OfferBody> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(page.total, OFFER_COUNT as usize);
    assert_eq!(page.items.len(), OFFER_COUNT as usize);
    assert_eq!(page.total_pages, 1);
}

#[actix_web::test]
async fn offer_by_id() {
    let app = test::init_service(
        App::new()
            .app_data(database())
            .configure(dashboard_server::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/offers/OFR-1").to_request();
    let offer: OfferBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(offer.id.to_string(), "OFR-1");

    let req = test::TestRequest::get().uri("/offers/OFR-999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_meta"]["kind"], "offer");
}

#[actix_web::test]
async fn clock_reports_snapshot() {
    let app = test::init_service(
        App::new()
            .app_data(database())
            .app_data(Data::new(Clock::new()))
            .configure(dashboard_server::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/dashboard/clock").to_request();
    let snapshot: ClockSnapshot = test::call_and_read_body_json(&app, req).await;

    assert!(matches!(
        snapshot.greeting,
        Greeting::Morning | Greeting::Afternoon | Greeting::Evening
    ));
    assert!(snapshot.time.ends_with("AM") || snapshot.time.ends_with("PM"));
}
