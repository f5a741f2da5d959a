//! End-to-end tests driving the HTTP API over real flat-file storage.
//!
//! Each test gets its own temporary data directory; "restart" means building
//! a fresh service stack over the same directory.

use std::sync::Arc;

use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use rentledger::domain::PortionService;
use rentledger::inbound::http::{self, state::HttpState};
use rentledger::outbound::{FsAttachmentStore, JsonDocumentStore};

fn state_in(dir: &TempDir) -> HttpState {
    let store = Arc::new(JsonDocumentStore::new(dir.path().join("database.json")));
    let attachments =
        Arc::new(FsAttachmentStore::new(&dir.path().join("uploads")).expect("uploads dirs"));
    let service = Arc::new(PortionService::new(store, attachments.clone()));
    HttpState::new(service.clone(), service, attachments)
}

fn app_for(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(http::api))
        .service(web::scope("/uploads").configure(http::uploads))
}

fn portion_payload(name: &str) -> Value {
    json!({
        "floor": "1",
        "portion_no": "A",
        "type": "1BHK",
        "name": name,
        "tenant_type": "Family",
        "members": "Alice, Bob",
        "contact_number": "919999999999"
    })
}

async fn create_portion(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    name: &str,
) -> u64 {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/portions")
        .set_json(portion_payload(name))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = actix_test::read_body_json(response).await;
    body.get("id").and_then(Value::as_u64).expect("portion id")
}

#[actix_web::test]
async fn records_survive_a_restart() {
    let dir = TempDir::new().expect("tempdir");

    {
        let app = actix_test::init_service(app_for(state_in(&dir))).await;
        let id = create_portion(&app, "Alice").await;

        let bill = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/portions/{id}/bills/March%202024"))
            .set_json(json!({ "rent": 1000, "water": "100.50", "electricity": 200 }))
            .to_request();
        assert_eq!(actix_test::call_service(&app, bill).await.status(), 200);
    }

    // The document on disk is the pretty-printed contract.
    let raw = std::fs::read_to_string(dir.path().join("database.json")).expect("document");
    assert!(raw.contains("  \"portions\": ["));
    assert!(raw.contains("\"type\": \"1BHK\""));
    assert!(raw.contains("\"march 2024\""));

    let app = actix_test::init_service(app_for(state_in(&dir))).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/portions/1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), 200);
    let portion: Value = actix_test::read_body_json(response).await;
    assert_eq!(portion.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(
        portion
            .get("bills")
            .and_then(|b| b.get("march 2024"))
            .and_then(|b| b.get("total"))
            .and_then(Value::as_str),
        Some("1300.50")
    );
}

#[actix_web::test]
async fn id_allocation_continues_from_the_persisted_document() {
    let dir = TempDir::new().expect("tempdir");

    {
        let app = actix_test::init_service(app_for(state_in(&dir))).await;
        assert_eq!(create_portion(&app, "Alice").await, 1);
        assert_eq!(create_portion(&app, "Bob").await, 2);
    }

    let app = actix_test::init_service(app_for(state_in(&dir))).await;
    assert_eq!(create_portion(&app, "Carol").await, 3);
}

#[actix_web::test]
async fn uploads_are_stored_served_and_deleted_with_the_portion() {
    let dir = TempDir::new().expect("tempdir");
    let app = actix_test::init_service(app_for(state_in(&dir))).await;
    let id = create_portion(&app, "Alice").await;

    let upload = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/portions/{id}/photos/front%20door.png"))
        .set_payload(&b"png bytes"[..])
        .to_request();
    let response = actix_test::call_service(&app, upload).await;
    assert_eq!(response.status(), 201);
    let body: Value = actix_test::read_body_json(response).await;
    let stored = body
        .get("filename")
        .and_then(Value::as_str)
        .expect("stored name")
        .to_owned();
    assert!(stored.starts_with("1_"));
    assert!(stored.ends_with("_front_door.png"));

    let on_disk = dir.path().join("uploads").join("gallery").join(&stored);
    assert_eq!(std::fs::read(&on_disk).expect("stored file"), b"png bytes");

    let serve = actix_test::TestRequest::get()
        .uri(&format!("/uploads/gallery/{stored}"))
        .to_request();
    let response = actix_test::call_service(&app, serve).await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    let served = actix_test::read_body(response).await;
    assert_eq!(&served[..], b"png bytes");

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/portions/{id}"))
        .to_request();
    assert_eq!(actix_test::call_service(&app, delete).await.status(), 204);
    assert!(!on_disk.exists());
}

#[actix_web::test]
async fn notices_read_the_persisted_bills() {
    let dir = TempDir::new().expect("tempdir");
    let app = actix_test::init_service(app_for(state_in(&dir))).await;
    let id = create_portion(&app, "Alice").await;
    create_portion(&app, "Bob").await;

    let bill = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/portions/{id}/bills/march%202024"))
        .set_json(json!({ "rent": 1000, "water": 100, "electricity": 200, "extra": 50 }))
        .to_request();
    assert_eq!(actix_test::call_service(&app, bill).await.status(), 200);

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/notices?period=march%202024")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), 200);
    let body: Value = actix_test::read_body_json(response).await;
    // Addressed to the first portion's primary contact.
    assert_eq!(
        body.get("to").and_then(Value::as_str),
        Some("919999999999")
    );
    let message = body.get("message").and_then(Value::as_str).expect("message");
    assert!(message.starts_with("Rental Bills for March 2024:"));
    assert!(message.contains("Alice:\n"));
    assert!(message.contains("Bob:\n  No bill generated for this month yet."));
    assert!(message.contains("Total: \u{20b9}1350"));
}

#[actix_web::test]
async fn a_corrupt_document_surfaces_as_a_storage_failure() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("database.json"), b"{ not json").expect("corrupt file");

    let app = actix_test::init_service(app_for(state_in(&dir))).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/portions")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), 500);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("storage_failure")
    );
}
