//! Integration tests for the planner
//!
//! The real Gemini client talks to a loopback stub; everything above it is
//! the production wiring.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{PARIS, StubServer, gemini_error, gemini_reply};
use ezora::config::PlannerConfig;
use ezora::itinerary::{ItineraryGenerator, TravelStyle, TripField};
use ezora::llm::GeminiClient;
use ezora::planner::{CompletionOutcome, PlannerController, PlannerError, PlannerPhase};
use ezora::prompts::PromptLoader;

fn controller_for(server: &StubServer) -> PlannerController {
    let client = GeminiClient::new(
        "gemini-test",
        "test-key",
        server.base_url(),
        8192,
        Duration::from_secs(5),
    )
    .expect("client builds");
    let generator = ItineraryGenerator::new(
        Arc::new(client),
        PromptLoader::embedded_only(),
        PlannerConfig::default(),
        8192,
    );
    let mut controller = PlannerController::new(Arc::new(generator));
    controller.open();
    controller
}

fn fill_paris(controller: &mut PlannerController) {
    controller.set_origin_city("New York").unwrap();
    controller.set_destination("Paris, France").unwrap();
    controller.set_days(5).unwrap();
    controller.set_travelers(2).unwrap();
    controller.set_budget("2000 USD").unwrap();
    controller.set_style(TravelStyle::Moderate).unwrap();
    controller.set_interests("museums").unwrap();
}

#[tokio::test]
async fn test_paris_trip_end_to_end() {
    let server = StubServer::start(vec![(200, gemini_reply(PARIS))]).await;
    let mut controller = controller_for(&server);
    fill_paris(&mut controller);

    let submission = controller.submit().expect("complete request submits");
    assert_eq!(controller.phase(), PlannerPhase::Pending);

    let completion = submission.run().await;
    assert_eq!(controller.complete(completion), CompletionOutcome::Presented);
    assert_eq!(controller.phase(), PlannerPhase::Presenting);
    assert_eq!(controller.active_day(), Some(1));
    assert!(!controller.result().unwrap().days.is_empty());

    let requests = server.requests();
    assert_eq!(requests.len(), 1, "exactly one outbound call");
    let request = &requests[0];
    assert!(request.request_line.starts_with("POST /v1beta/models/gemini-test:generateContent"));
    assert_eq!(request.header("x-goog-api-key"), Some("test-key"));

    let body = request.json();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    for value in ["New York", "Paris, France", "5 days", "2 people", "2000 USD", "Moderate", "museums"] {
        assert!(prompt.contains(value), "prompt is missing {}", value);
    }
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        serde_json::json!(["tripTitle", "summary", "budget", "transport", "accommodation", "days", "practicalTips"])
    );
    assert!(
        body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("EzoraAI")
    );
}

#[tokio::test]
async fn test_day_selection_after_generation() {
    let server = StubServer::start(vec![(200, gemini_reply(PARIS))]).await;
    let mut controller = controller_for(&server);
    fill_paris(&mut controller);

    let completion = controller.submit().unwrap().run().await;
    controller.complete(completion);

    let days = controller.result().unwrap().day_numbers();
    for day in days {
        controller.select_day(day).unwrap();
        assert_eq!(controller.active_day_plan().unwrap().day_number, day);
    }
    assert_eq!(controller.select_day(42), Err(PlannerError::UnknownDay(42)));
}

#[tokio::test]
async fn test_server_error_returns_to_form_with_message() {
    let server = StubServer::start(vec![gemini_error(500, "Internal error")]).await;
    let mut controller = controller_for(&server);
    fill_paris(&mut controller);
    let before = controller.request().clone();

    let completion = controller.submit().unwrap().run().await;
    assert_eq!(controller.complete(completion), CompletionOutcome::Failed);

    assert_eq!(controller.phase(), PlannerPhase::Collecting);
    assert_eq!(controller.request(), &before);
    assert!(controller.last_error().unwrap().contains("Failed to generate itinerary"));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let server = StubServer::start(vec![
        gemini_error(429, "Resource exhausted"),
        (200, gemini_reply(PARIS)),
    ])
    .await;
    let mut controller = controller_for(&server);
    fill_paris(&mut controller);

    let completion = controller.submit().unwrap().run().await;
    assert_eq!(controller.complete(completion), CompletionOutcome::Failed);
    assert!(controller.last_error().unwrap().contains("busy"));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_prose_response_is_rejected() {
    let server = StubServer::start(vec![(200, gemini_reply("Day 1: arrive in Paris and relax."))]).await;
    let mut controller = controller_for(&server);
    fill_paris(&mut controller);

    let completion = controller.submit().unwrap().run().await;
    assert_eq!(controller.complete(completion), CompletionOutcome::Failed);
    assert_eq!(controller.phase(), PlannerPhase::Collecting);
    assert_eq!(controller.request().destination, "Paris, France");
}

#[tokio::test]
async fn test_incomplete_request_never_reaches_the_service() {
    let server = StubServer::start(vec![(200, gemini_reply(PARIS))]).await;
    let mut controller = controller_for(&server);
    controller.set_destination("Paris, France").unwrap();

    let err = controller.submit().err().unwrap();
    assert_eq!(
        err,
        PlannerError::IncompleteRequest {
            missing: vec![TripField::OriginCity, TripField::Budget],
        }
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_reset_after_presenting_restores_defaults() {
    let server = StubServer::start(vec![(200, gemini_reply(PARIS))]).await;
    let mut controller = controller_for(&server);
    fill_paris(&mut controller);
    controller.set_style(TravelStyle::Luxury).unwrap();

    let completion = controller.submit().unwrap().run().await;
    controller.complete(completion);
    controller.reset();

    let request = controller.request();
    assert_eq!(controller.phase(), PlannerPhase::Collecting);
    assert!(controller.result().is_none());
    assert_eq!(request.days, 5);
    assert_eq!(request.travelers, 2);
    assert_eq!(request.style, TravelStyle::Moderate);
    assert!(request.origin_city.is_empty());
    assert!(request.destination.is_empty());
    assert!(request.budget_text.is_empty());
    assert!(request.interests.is_empty());
}

#[tokio::test]
async fn test_spawned_submission_after_reset_is_stale() {
    let server = StubServer::start(vec![(200, gemini_reply(PARIS))]).await;
    let mut controller = controller_for(&server);
    fill_paris(&mut controller);

    let handle = tokio::spawn(controller.submit().unwrap().run());
    controller.reset();

    let completion = handle.await.unwrap();
    assert_eq!(controller.complete(completion), CompletionOutcome::Stale);
    assert_eq!(controller.phase(), PlannerPhase::Collecting);
}
