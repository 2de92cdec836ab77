//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or error kinds. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use todo_core::{
    ApiError, CreateTodo, Created, HttpMethod, HttpRequest, HttpResponse, Todo, TodoClient,
    TodoId, UpdateTitle,
};

const BASE_URL: &str = "http://localhost:8080";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn input_id(case: &Value) -> TodoId {
    serde_json::from_value(case["input_id"].clone()).unwrap()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Compare a parse result with the case's `expected_result` or `expected_error`.
fn check_result<T>(name: &str, case: &Value, result: Result<T, ApiError>, check_ok: impl FnOnce(T)) {
    match case.get("expected_error") {
        Some(kind) => {
            let err = match result {
                Ok(_) => panic!("{name}: expected an error"),
                Err(err) => err,
            };
            let matched = match kind.as_str().unwrap() {
                "NotFound" => matches!(err, ApiError::NotFound),
                "Server" => matches!(err, ApiError::Server { .. }),
                "Data" => matches!(err, ApiError::Data(_)),
                "Auth" => err.is_auth(),
                other => panic!("{name}: unknown expected_error: {other}"),
            };
            assert!(matched, "{name}: got {err:?}");
        }
        None => match result {
            Ok(value) => check_ok(value),
            Err(err) => panic!("{name}: unexpected error {err:?}"),
        },
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_todos();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_todos(simulated(&case));
        check_result(name, &case, result, |todos| {
            let expected: Vec<Todo> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todos, expected, "{name}: parsed result");
        });
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();

        let input = CreateTodo::new(case["input_title"].as_str().unwrap()).unwrap();
        let req = c.build_create_todo(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_todo(simulated(&case));
        check_result(name, &case, result, |created| {
            let expected: Created = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(created, expected, "{name}: parsed result");
        });
    }
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

#[test]
fn toggle_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/toggle.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_toggle_todo(&input_id(&case));
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_toggle_todo(simulated(&case));
        check_result(name, &case, result, |todo| {
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todo, expected, "{name}: parsed result");
        });
    }
}

// ---------------------------------------------------------------------------
// Update title
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();

        let input = UpdateTitle::new(case["input_title"].as_str().unwrap()).unwrap();
        let req = c.build_update_title(&input_id(&case), &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_title(simulated(&case));
        check_result(name, &case, result, |todo| {
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todo, expected, "{name}: parsed result");
        });
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_todo(&input_id(&case));
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_todo(simulated(&case));
        check_result(name, &case, result, |()| {});
    }
}
