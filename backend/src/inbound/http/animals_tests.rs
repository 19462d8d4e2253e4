//! Handler tests driven through mocked driving ports.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{
    AdoptionCommand, AvailableAnimalsQuery, FixtureAdoptionCommand, FixtureAvailableAnimalsQuery,
    MockAdoptionCommand, MockAvailableAnimalsQuery,
};
use crate::domain::{
    AdoptionAction, AdoptionFailure, AdoptionOutcome, Animal, AnimalId, AnimalName, Error,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;

async fn call(
    adoption: Arc<dyn AdoptionCommand>,
    query: Arc<dyn AvailableAnimalsQuery>,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let state = HttpState::new(adoption, query);
    let app =
        test::init_service(App::new().app_data(web::Data::new(state)).service(api_scope())).await;
    let res = test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, json)
}

fn animal(id: &str, name: &str) -> Animal {
    Animal::new(
        AnimalId::new(id).expect("valid id"),
        AnimalName::new(name).expect("valid name"),
    )
}

#[actix_web::test]
async fn listing_serialises_available_animals() {
    let mut query = MockAvailableAnimalsQuery::new();
    query
        .expect_available_animals()
        .withf(|signal| signal.deadline().is_some())
        .times(1)
        .return_once(|_| Ok(vec![animal("a1", "Mochi"), animal("b2", "Pip")]));

    let (status, body) = call(
        Arc::new(FixtureAdoptionCommand),
        Arc::new(query),
        test::TestRequest::get().uri("/api/v1/animals"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "animals": [
                { "id": "a1", "name": "Mochi", "available": true },
                { "id": "b2", "name": "Pip", "available": true }
            ]
        })
    );
}

#[actix_web::test]
async fn empty_shelter_lists_nothing() {
    let (status, body) = call(
        Arc::new(FixtureAdoptionCommand),
        Arc::new(FixtureAvailableAnimalsQuery),
        test::TestRequest::get().uri("/api/v1/animals"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "animals": [] }));
}

#[actix_web::test]
async fn listing_failures_surface_as_service_unavailable() {
    let mut query = MockAvailableAnimalsQuery::new();
    query
        .expect_available_animals()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("animal store unavailable: refused")));

    let (status, body) = call(
        Arc::new(FixtureAdoptionCommand),
        Arc::new(query),
        test::TestRequest::get().uri("/api/v1/animals"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[rstest]
#[case(
    AdoptionOutcome::Success(AdoptionAction::Adopt),
    json!({ "success": true, "message": "Adoption successful." })
)]
#[case(
    AdoptionOutcome::Failure(AdoptionFailure::AlreadyUnavailable),
    json!({ "success": false, "message": "Animal is not available for adoption." })
)]
#[case(
    AdoptionOutcome::Failure(AdoptionFailure::NotFound(AnimalId::new("a1").expect("valid id"))),
    json!({ "success": false, "message": "No animal with id a1 was found." })
)]
#[case(
    AdoptionOutcome::Failure(AdoptionFailure::UpdateConflict(
        AnimalId::new("a1").expect("valid id"),
    )),
    json!({ "success": false, "message": "Update operation for animal with id a1 failed." })
)]
#[actix_web::test]
async fn adoption_outcomes_are_always_ok_responses(
    #[case] outcome: AdoptionOutcome,
    #[case] expected: Value,
) {
    let mut command = MockAdoptionCommand::new();
    command
        .expect_request_adoption()
        .withf(|request| {
            request.animal_id.as_str() == "a1" && request.cancellation.deadline().is_some()
        })
        .times(1)
        .return_once(move |_| outcome);

    let (status, body) = call(
        Arc::new(command),
        Arc::new(FixtureAvailableAnimalsQuery),
        test::TestRequest::post().uri("/api/v1/animals/a1/adoption"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[actix_web::test]
async fn delete_routes_to_cancellation() {
    let mut command = MockAdoptionCommand::new();
    command.expect_request_adoption().never();
    command
        .expect_cancel_adoption()
        .withf(|request| request.animal_id.as_str() == "a1")
        .times(1)
        .return_once(|_| AdoptionOutcome::Success(AdoptionAction::Cancel));

    let (status, body) = call(
        Arc::new(command),
        Arc::new(FixtureAvailableAnimalsQuery),
        test::TestRequest::delete().uri("/api/v1/animals/a1/adoption"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Adoption canceled." })
    );
}

#[actix_web::test]
async fn long_ids_reach_the_command_unchanged() {
    let long_id = "x".repeat(65);
    let expected = long_id.clone();
    let mut command = MockAdoptionCommand::new();
    command
        .expect_request_adoption()
        .withf(move |request| request.animal_id.as_str() == expected)
        .times(1)
        .returning(|request| {
            AdoptionOutcome::Failure(AdoptionFailure::NotFound(request.animal_id))
        });

    let (status, body) = call(
        Arc::new(command),
        Arc::new(FixtureAvailableAnimalsQuery),
        test::TestRequest::post().uri(&format!("/api/v1/animals/{long_id}/adoption")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        format!("No animal with id {long_id} was found.")
    );
}
