use crate::e2e::helpers;

use chrono::{Datelike, Duration, NaiveTime, Utc};
use helpers::TestContext;
use hyper::StatusCode;
use planwisr_backend::domain::invoice::InvoiceStatus;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use test_context::test_context;

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_sum_hours_by_day_for_current_month(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Tracked").await.unwrap();
    let today = Utc::now().date_naive();
    let morning = today.and_time(NaiveTime::MIN).and_utc() + Duration::hours(1);

    ctx.fixtures
        .create_entry(user.id, project.id, morning, 3600)
        .await
        .unwrap();
    ctx.fixtures
        .create_entry(user.id, project.id, morning + Duration::hours(2), 1800)
        .await
        .unwrap();
    // Last year never shows up
    ctx.fixtures
        .create_entry(user.id, project.id, morning - Duration::days(400), 7200)
        .await
        .unwrap();

    let response = ctx
        .client
        .get_with_auth("/api/analytics/hours-by-day", &ctx.token_for(&user.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body["month"],
        format!("{:04}-{:02}", today.year(), today.month())
    );
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], today.to_string());
    assert_eq!(days[0]["hours"], 1.5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_minutes_by_project_including_deleted(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let kept = ctx.fixtures.create_project(user.id, "Kept").await.unwrap();
    let gone = ctx.fixtures.create_project(user.id, "Gone").await.unwrap();
    let start = Utc::now() - Duration::hours(5);
    ctx.fixtures.create_entry(user.id, kept.id, start, 5400).await.unwrap();
    ctx.fixtures.create_entry(user.id, gone.id, start, 90).await.unwrap();
    let token = ctx.token_for(&user.id);

    ctx.client
        .delete_with_auth(&format!("/api/projects/{}", gone.id), &token)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx
        .client
        .get_with_auth("/api/analytics/minutes-by-project", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let projects = response.body.as_ref().unwrap()["projects"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["title"], "Kept");
    assert_eq!(projects[0]["minutes"], 90.0);
    assert_eq!(projects[1]["title"], "Deleted project");
    assert_eq!(projects[1]["minutes"], 1.5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_summarize_invoices(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let other = ctx.fixtures.create_user("other@example.com").await.unwrap();
    let today = Utc::now().date_naive();
    let future = today + Duration::days(30);
    let past = today - Duration::days(3);

    let rows = [
        ("INV-209901-0001", future, InvoiceStatus::Paid, "100.00"),
        ("INV-209901-0002", future, InvoiceStatus::Sent, "50.00"),
        ("INV-209901-0003", future, InvoiceStatus::Draft, "25.00"),
        ("INV-209901-0004", past, InvoiceStatus::Sent, "40.00"),
        ("INV-209901-0005", past, InvoiceStatus::Overdue, "10.00"),
    ];
    for (invoice_id, due, status, total) in rows {
        ctx.fixtures
            .create_invoice(user.id, invoice_id, due, status, Decimal::from_str(total).unwrap())
            .await
            .unwrap();
    }
    ctx.fixtures
        .create_invoice(
            other.id,
            "INV-209901-0006",
            future,
            InvoiceStatus::Paid,
            Decimal::from_str("999.00").unwrap(),
        )
        .await
        .unwrap();

    let response = ctx
        .client
        .get_with_auth("/api/analytics/invoices", &ctx.token_for(&user.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["totalInvoices"], 5);
    assert_eq!(decimal(&body["totalAmount"]), Decimal::from(225));
    assert_eq!(decimal(&body["earnings"]), Decimal::from(100));
    assert_eq!(decimal(&body["pending"]), Decimal::from(75));
    assert_eq!(body["overdueCount"], 2);
    assert_eq!(decimal(&body["overdueAmount"]), Decimal::from(50));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_zeroes_without_data(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx
        .client
        .get_with_auth("/api/analytics/invoices", &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["totalInvoices"], 0);
    assert_eq!(decimal(&body["totalAmount"]), Decimal::ZERO);

    let response = ctx
        .client
        .get_with_auth("/api/analytics/hours-by-day", &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert!(response.body.as_ref().unwrap()["days"]
        .as_array()
        .unwrap()
        .is_empty());
}
