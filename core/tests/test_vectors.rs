//! Verify build/parse methods and rendering against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Each vector describes the expected request, a simulated response, and the
//! expected parse result or error. The same vectors are pushed through
//! `ViewCoordinator` to check what the user would see.

use posts_core::{
    CoordinatorConfig, Effect, FetchError, HttpMethod, HttpResponse, Post, PostsClient, View,
    ViewCoordinator,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> PostsClient {
    PostsClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_error_kind(name: &str, err: &FetchError, expected: &str) {
    match expected {
        "Status" => assert!(matches!(err, FetchError::Status { .. }), "{name}: expected Status, got {err:?}"),
        "Decode" => assert!(matches!(err, FetchError::Decode(_)), "{name}: expected Decode, got {err:?}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn fetch_token(effect: Effect) -> posts_core::RequestToken {
    match effect {
        Effect::Fetch { token, .. } => token,
        other => panic!("expected fetch, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_list_posts();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let result = c.parse_list_posts(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: Vec<Post> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }

        // Verify rendering
        let mut coordinator = ViewCoordinator::new(client(), CoordinatorConfig::default());
        let token = fetch_token(coordinator.mount().unwrap());
        coordinator.resolve(token, Ok(simulated(case)));
        let labels: Vec<String> = coordinator
            .render()
            .entries()
            .iter()
            .map(|e| e.label.to_string())
            .collect();
        let expected_labels: Vec<String> = serde_json::from_value(case["expected_labels"].clone()).unwrap();
        assert_eq!(labels, expected_labels, "{name}: labels");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_get_post(id);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let result = c.parse_get_post(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: Post = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }

        // Verify rendering: failures keep the loading view.
        let mut coordinator = ViewCoordinator::new(client(), CoordinatorConfig::default());
        let token = fetch_token(coordinator.select(id).pop().unwrap());
        coordinator.resolve(token, Ok(simulated(case)));
        let view = coordinator.render();
        match case.get("expected_view") {
            Some(text) => assert_eq!(
                view,
                View::Detail {
                    id,
                    text: text.as_str().unwrap().to_string()
                },
                "{name}: view"
            ),
            None => assert_eq!(view, View::Loading { id }, "{name}: view"),
        }
    }
}
