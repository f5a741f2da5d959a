//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::{App, web};
use serde_json::{Value, json};

use crate::domain::ports::{FixtureAttachmentStore, InMemoryDocumentStore};
use crate::domain::{Document, Portion, PortionService};
use crate::inbound::http::state::HttpState;

pub(crate) fn portion_fixture(id: u64, name: &str) -> Portion {
    Portion {
        id,
        floor: "1".to_owned(),
        portion_no: "A".to_owned(),
        portion_type: "1BHK".to_owned(),
        name: name.to_owned(),
        tenant_type: "Family".to_owned(),
        members: Vec::new(),
        contact_number: "919999999999".to_owned(),
        contact_number_2: String::new(),
        id_proofs: Vec::new(),
        photos: Vec::new(),
        bills: std::collections::BTreeMap::new(),
    }
}

/// State over an in-memory store seeded with the given document.
pub(crate) fn seeded_state(document: Document) -> HttpState {
    let service = Arc::new(PortionService::new(
        Arc::new(InMemoryDocumentStore::with_document(document)),
        Arc::new(FixtureAttachmentStore),
    ));
    HttpState::new(service.clone(), service, Arc::new(FixtureAttachmentStore))
}

pub(crate) fn test_app_with(
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
        .service(web::scope("/api/v1").configure(super::api))
        .service(web::scope("/uploads").configure(super::uploads))
}

/// App over an empty in-memory document.
pub(crate) fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with(seeded_state(Document::default()))
}

/// Create a valid portion through the API and return its id.
pub(crate) async fn created_portion_id(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> u64 {
    let request = actix_web::test::TestRequest::post()
        .uri("/api/v1/portions")
        .set_json(json!({
            "floor": "1",
            "portion_no": "A",
            "type": "1BHK",
            "name": "Alice",
            "tenant_type": "Family",
            "members": "Alice, Bob",
            "contact_number": "919999999999"
        }))
        .to_request();
    let response = actix_web::test::call_service(app, request).await;
    assert!(response.status().is_success());
    let body: Value = actix_web::test::read_body_json(response).await;
    body.get("id").and_then(Value::as_u64).expect("portion id")
}
