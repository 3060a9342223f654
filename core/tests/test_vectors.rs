//! Verify build/interpret against JSON test vectors stored in `test-vectors/`.
//!
//! Each build vector seeds the session, builds a request and compares it
//! field by field. Each interpret vector feeds a simulated response and
//! checks both the outcome and the resulting session.

use crmsport_core::{ApiError, CrmClient, Endpoint, HttpMethod, HttpResponse, SilentObserver};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> CrmClient {
    CrmClient::new(Endpoint::new("localhost", 3000)).with_observer(SilentObserver)
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

#[test]
fn build_test_vectors() {
    let raw = include_str!("../../test-vectors/build.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut c = client();

        // Seed the session the way a previous response would.
        let seed = HttpResponse {
            status: 200,
            headers: pairs(&case["session"]),
            body: String::new(),
        };
        c.interpret(&seed).unwrap();

        let params = pairs(&case["params"]);
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let action = case["action"].as_str().unwrap();
        let req = c.build(action, &params).unwrap();

        let expected = &case["expected_request"];
        let method: HttpMethod = serde_json::from_value(expected["method"].clone()).unwrap();
        assert_eq!(req.method(), method, "{name}: method");
        assert_eq!(
            req.url(),
            format!("{BASE_URL}{}", expected["url"].as_str().unwrap()),
            "{name}: url"
        );
        assert_eq!(req.headers(), pairs(&expected["headers"]).as_slice(), "{name}: headers");
        assert_eq!(req.body(), expected["body"].as_str(), "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Interpret
// ---------------------------------------------------------------------------

#[test]
fn interpret_test_vectors() {
    let raw = include_str!("../../test-vectors/interpret.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut c = client();

        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: pairs(&sim["headers"]),
            body: sim["body"].as_str().unwrap().to_string(),
        };

        let expected = &case["expected_result"];
        let expected_status = expected["status"].as_u64().unwrap() as u16;
        match (c.interpret(&response), expected["ok"].as_bool().unwrap()) {
            (Ok(parsed), true) => {
                assert_eq!(parsed.status, Some(expected_status), "{name}: status");
                assert_eq!(parsed.body, expected["body"], "{name}: body");
            }
            (Err(ApiError::ServerRejection { status, body }), false) => {
                assert_eq!(status, expected_status, "{name}: status");
                assert_eq!(body, expected["body"], "{name}: body");
            }
            (other, ok) => panic!("{name}: expected ok={ok}, got {other:?}"),
        }

        let expected_session = pairs(&case["expected_session"]);
        for (header, value) in &expected_session {
            assert_eq!(c.session().get(header), Some(value.as_str()), "{name}: session {header}");
        }
        if expected_session.is_empty() {
            assert!(c.session().is_empty(), "{name}: session should stay empty");
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_action_is_rejected_by_build() {
    let err = client().build("users_delete", &[]).unwrap_err();
    assert!(matches!(err, ApiError::UnknownAction(ref n) if n == "users_delete"));
}
