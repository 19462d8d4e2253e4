//! End-to-end HTTP tests against the in-memory store.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use shelter::Trace;
use shelter::domain::ports::AnimalStore;
use shelter::domain::{AdoptionCoordinator, Animal, AnimalId, AnimalName};
use shelter::inbound::http::api_scope;
use shelter::inbound::http::state::HttpState;
use shelter::outbound::memory::InMemoryAnimalStore;

async fn seeded_state() -> web::Data<HttpState> {
    let store = InMemoryAnimalStore::new();
    store
        .insert_many(&[
            Animal::new(
                AnimalId::new("cat-1").expect("valid id"),
                AnimalName::new("Tom").expect("valid name"),
            ),
            Animal::new(
                AnimalId::new("dog-1").expect("valid id"),
                AnimalName::new("Rex").expect("valid name"),
            ),
        ])
        .await
        .expect("seed animals");
    let coordinator = Arc::new(AdoptionCoordinator::new(Arc::new(store)));
    web::Data::new(HttpState::new(coordinator.clone(), coordinator))
}

fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).wrap(Trace).service(api_scope())
}

/// Call the service and decode the JSON body alongside the status.
macro_rules! call_json {
    ($app:expr, $request:expr) => {{
        let res = test::call_service($app, $request.to_request()).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }};
}

fn names(listing: &Value) -> Vec<String> {
    let mut names: Vec<String> = listing["animals"]
        .as_array()
        .map(|animals| {
            animals
                .iter()
                .filter_map(|animal| animal["name"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[actix_web::test]
async fn adoption_lifecycle_over_http() {
    let app = test::init_service(build_app(seeded_state().await)).await;

    let (status, listing) = call_json!(&app, test::TestRequest::get().uri("/api/v1/animals"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&listing), ["Rex", "Tom"]);

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post().uri("/api/v1/animals/cat-1/adoption")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Adoption successful."}));

    let (_, body) = call_json!(
        &app,
        test::TestRequest::post().uri("/api/v1/animals/cat-1/adoption")
    );
    assert_eq!(
        body,
        json!({"success": false, "message": "Animal is not available for adoption."})
    );

    let (_, listing) = call_json!(&app, test::TestRequest::get().uri("/api/v1/animals"));
    assert_eq!(names(&listing), ["Rex"]);

    let (_, body) = call_json!(
        &app,
        test::TestRequest::delete().uri("/api/v1/animals/cat-1/adoption")
    );
    assert_eq!(body, json!({"success": true, "message": "Adoption canceled."}));

    let (_, listing) = call_json!(&app, test::TestRequest::get().uri("/api/v1/animals"));
    assert_eq!(names(&listing), ["Rex", "Tom"]);
}

#[actix_web::test]
async fn unknown_animal_is_reported_in_the_body() {
    let app = test::init_service(build_app(seeded_state().await)).await;

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post().uri("/api/v1/animals/ghost/adoption")
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": false, "message": "No animal with id ghost was found."})
    );
}

#[actix_web::test]
async fn unusual_ids_are_not_found_rather_than_rejected() {
    let app = test::init_service(build_app(seeded_state().await)).await;
    let overlong = "x".repeat(65);

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post().uri(&format!("/api/v1/animals/{overlong}/adoption"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": format!("No animal with id {overlong} was found."),
        })
    );

    let (status, body) = call_json!(
        &app,
        test::TestRequest::delete().uri("/api/v1/animals/%20cat-1/adoption")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": false, "message": "No animal with id  cat-1 was found."})
    );
}
