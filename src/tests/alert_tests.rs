//! tests/alert_tests.rs
//! Pruebas de `AlertService` sobre SQLite en memoria.

use actix_rt::test;
use std::time::Duration;

use super::support::memory_alert_service;
use crate::{models::alert_model::CreateAlertRequest, services::alert_service::ReceiptStore};

#[test]
async fn create_alert_generates_id_when_missing() {
    let alerts = memory_alert_service().await;

    let created = alerts
        .create_alert(CreateAlertRequest::default())
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    let stored = alerts.get_alert(&created.id).await.unwrap();
    assert!(stored.contact_receipts.is_empty());
    assert!(stored.title.is_none());
}

#[test]
async fn duplicate_alert_id_is_rejected() {
    let alerts = memory_alert_service().await;
    let req = CreateAlertRequest {
        id: Some("A1".to_string()),
        title: None,
    };

    alerts.create_alert(req.clone()).await.unwrap();
    let err = alerts.create_alert(req).await.unwrap_err();
    assert!(err.to_string().contains("already exists"), "{}", err);
}

#[test]
async fn receipt_update_is_a_field_merge() {
    let alerts = memory_alert_service().await;
    let created = alerts
        .create_alert(CreateAlertRequest {
            id: Some("A1".to_string()),
            title: Some("Sismo".to_string()),
        })
        .await
        .unwrap();

    alerts.set_contact_receipt("A1", "C1", true).await.unwrap();
    alerts.set_contact_receipt("A1", "C2", false).await.unwrap();
    alerts.set_contact_receipt("A1", "C2", true).await.unwrap();

    let alert = alerts.get_alert("A1").await.unwrap();
    assert_eq!(alert.contact_receipts.get("C1"), Some(&true));
    assert_eq!(alert.contact_receipts.get("C2"), Some(&true));
    assert_eq!(alert.title.as_deref(), Some("Sismo"));
    assert_eq!(alert.created_at, created.created_at);
}

#[test]
async fn receipt_write_refreshes_updated_at() {
    let alerts = memory_alert_service().await;
    alerts
        .create_alert(CreateAlertRequest {
            id: Some("A1".to_string()),
            title: None,
        })
        .await
        .unwrap();
    let before = alerts.get_alert("A1").await.unwrap().updated_at;

    tokio::time::sleep(Duration::from_millis(5)).await;
    alerts.set_contact_receipt("A1", "C1", false).await.unwrap();

    let after = alerts.get_alert("A1").await.unwrap();
    assert!(after.updated_at > before, "{} <= {}", after.updated_at, before);
    assert!(after.created_at < after.updated_at);
}

#[test]
async fn receipt_for_missing_alert_fails_without_creating_it() {
    let alerts = memory_alert_service().await;

    let err = alerts
        .set_contact_receipt("nope", "C1", true)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("not found"));
    assert!(alerts.get_alert("nope").await.is_err());
}

#[test]
async fn receipts_are_scoped_per_alert() {
    let alerts = memory_alert_service().await;
    for id in ["A1", "A2"] {
        alerts
            .create_alert(CreateAlertRequest {
                id: Some(id.to_string()),
                title: None,
            })
            .await
            .unwrap();
    }

    alerts.set_contact_receipt("A1", "C1", false).await.unwrap();

    let other = alerts.get_alert("A2").await.unwrap();
    assert!(other.contact_receipts.is_empty());
}
