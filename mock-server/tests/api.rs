use axum::http::{self, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use mock_server::{app, Team, User, DEMO_EMAIL, DEMO_PASSWORD};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn sign_in_request() -> Request<String> {
    form_request(
        "/users/sign_in/",
        &format!("email={}&password={DEMO_PASSWORD}", DEMO_EMAIL.replace('@', "%40")),
    )
}

fn header(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
        .to_string()
}

fn authed_get(uri: &str, token: &str, client: &str, uid: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("access-token", token)
        .header("client", client)
        .header("uid", uid)
        .body(String::new())
        .unwrap()
}

// --- sign in ---

#[tokio::test]
async fn sign_in_issues_tokens() {
    let resp = app().oneshot(sign_in_request()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!header(&resp, "access-token").is_empty());
    assert!(!header(&resp, "client").is_empty());
    assert_eq!(header(&resp, "uid"), DEMO_EMAIL);

    let body: serde_json::Value = body_json(resp).await;
    let user: User = serde_json::from_value(body["data"].clone()).unwrap();
    assert_eq!(user.email, DEMO_EMAIL);
}

#[tokio::test]
async fn sign_in_wrong_password_returns_401() {
    let resp = app()
        .oneshot(form_request(
            "/users/sign_in/",
            "email=coach%40crmsport.ru&password=nope",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get("access-token").is_none());
}

#[tokio::test]
async fn sign_in_missing_field_is_rejected() {
    let resp = app()
        .oneshot(form_request("/users/sign_in/", "email=coach%40crmsport.ru"))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- lists ---

#[tokio::test]
async fn users_without_tokens_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/users").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn teams_with_unknown_token_returns_401() {
    let resp = app()
        .oneshot(authed_get("/teams", "forged", "forged", DEMO_EMAIL))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- full session ---

#[tokio::test]
async fn session_rotates_access_token() {
    use tower::Service;

    let mut app = app().into_service();

    // sign in
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(sign_in_request())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first = header(&resp, "access-token");
    let client = header(&resp, "client");
    let uid = header(&resp, "uid");

    // users with the issued token
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed_get("/users", &first, &client, &uid))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let second = header(&resp, "access-token");
    assert_ne!(first, second);
    assert_eq!(header(&resp, "client"), client);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 2);

    // the first token is no longer valid
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed_get("/teams", &first, &client, &uid))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // the rotated one is
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed_get("/teams", &second, &client, &uid))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let teams: Vec<Team> = body_json(resp).await;
    assert_eq!(teams[0].name, "Juniors");
}
