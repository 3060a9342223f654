use std::{
    collections::HashMap,
    io,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Variable read by both the mock and the client for the API port.
pub const PORT_VAR: &str = "port";
pub const DEFAULT_PORT: u16 = 3000;

pub const DEMO_EMAIL: &str = "coach@crmsport.ru";
pub const DEMO_PASSWORD: &str = "secret";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

/// Token triple issued by sign-in. The access token rotates on every
/// authenticated request.
#[derive(Clone, Debug)]
struct Session {
    access_token: String,
    client: String,
}

#[derive(Debug)]
pub struct Store {
    users: Vec<User>,
    teams: Vec<Team>,
    passwords: HashMap<String, String>,
    /// uid -> session
    sessions: HashMap<String, Session>,
}

impl Default for Store {
    fn default() -> Self {
        let users = vec![
            User {
                id: 1,
                email: DEMO_EMAIL.to_string(),
                name: "Head Coach".to_string(),
            },
            User {
                id: 2,
                email: "manager@crmsport.ru".to_string(),
                name: "Team Manager".to_string(),
            },
        ];
        let teams = vec![
            Team {
                id: 1,
                name: "Juniors".to_string(),
            },
            Team {
                id: 2,
                name: "Seniors".to_string(),
            },
        ];
        let passwords = HashMap::from([(DEMO_EMAIL.to_string(), DEMO_PASSWORD.to_string())]);
        Self {
            users,
            teams,
            passwords,
            sessions: HashMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/users/sign_in/", post(sign_in))
        .route("/users", get(list_users))
        .route("/teams", get(list_teams))
        .with_state(db)
}

/// Local address for the mock. A blank `port` value counts as unset.
pub fn listen_addr(port: Option<&str>) -> io::Result<SocketAddr> {
    let port = match port.map(str::trim).filter(|p| !p.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("invalid port `{raw}`"))
        })?,
        None => DEFAULT_PORT,
    };
    Ok(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"errors": ["You need to sign in or sign up before continuing."]})),
    )
        .into_response()
}

fn token_headers(uid: &str, session: &Session) -> [(&'static str, String); 3] {
    [
        ("access-token", session.access_token.clone()),
        ("client", session.client.clone()),
        ("uid", uid.to_string()),
    ]
}

async fn sign_in(State(db): State<Db>, Form(input): Form<SignIn>) -> Response {
    let mut store = db.write().await;
    if store.passwords.get(&input.email) != Some(&input.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"errors": ["Invalid login credentials. Please try again."]})),
        )
            .into_response();
    }
    let Some(user) = store.users.iter().find(|u| u.email == input.email).cloned() else {
        return unauthorized();
    };

    let session = Session {
        access_token: new_token(),
        client: new_token(),
    };
    store.sessions.insert(user.email.clone(), session.clone());
    (
        StatusCode::OK,
        token_headers(&user.email, &session),
        Json(json!({ "data": user })),
    )
        .into_response()
}

/// Validates the token headers and rotates the access token. Returns the
/// headers to send back.
async fn authenticate(db: &Db, headers: &HeaderMap) -> Option<[(&'static str, String); 3]> {
    let value = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let (token, client, uid) = (value("access-token")?, value("client")?, value("uid")?);

    let mut store = db.write().await;
    let session = store.sessions.get_mut(uid)?;
    if session.access_token != token || session.client != client {
        return None;
    }
    session.access_token = new_token();
    Some(token_headers(uid, session))
}

async fn list_users(State(db): State<Db>, headers: HeaderMap) -> Response {
    let Some(tokens) = authenticate(&db, &headers).await else {
        return unauthorized();
    };
    let users = db.read().await.users.clone();
    (StatusCode::OK, tokens, Json(users)).into_response()
}

async fn list_teams(State(db): State<Db>, headers: HeaderMap) -> Response {
    let Some(tokens) = authenticate(&db, &headers).await else {
        return unauthorized();
    };
    let teams = db.read().await.teams.clone();
    (StatusCode::OK, tokens, Json(teams)).into_response()
}
