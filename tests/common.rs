#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method, Request, Response};
use axum::Router;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use copypasta::config::{extract_config, ConfigV1};
use copypasta::routes::create_router;
use copypasta::session::Session;
use copypasta::state::AppState;
use copypasta::store::memory_store::MemoryStore;
use figment::{
    providers::{Format, Yaml},
    Figment,
};

pub const CLIENT_ID: &str = "web-client.apps.googleusercontent.com";
pub const CLIENT_SECRET: &str = "web-client-secret";
pub const EXPECTED_AUDIENCE: &str = "ios-client.apps.googleusercontent.com";
pub const SESSION_SECRET: &str = "integration-session-secret";

pub fn build_config(provider_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
bind_address: "127.0.0.1:8089"
application_name: "Copy Pasta Test"
template_path: "{template}"
logging:
  level: "warn"
  format: "json"
identity:
  client_id: "{CLIENT_ID}"
  client_secret: "{CLIENT_SECRET}"
  expected_audience: "{EXPECTED_AUDIENCE}"
  token_url: "{provider_url}/token"
  revoke_url: "{provider_url}/revoke"
  tokeninfo_url: "{provider_url}/tokeninfo"
session:
  secret: "{SESSION_SECRET}"
store:
  type: memory
"#,
        template = concat!(env!("CARGO_MANIFEST_DIR"), "/template/index.html"),
    );

    extract_config(&Figment::new().merge(Yaml::string(&yaml)))
        .expect("Failed to parse integration test config")
}

/// Builds the router around an in-memory store. The state is returned so tests can
/// inspect the store and decode sessions.
pub fn build_app(config: ConfigV1) -> (Router, AppState) {
    let state = AppState::build(Arc::new(config), Arc::new(MemoryStore::new()))
        .expect("failed to build application state");
    (create_router(state.clone()), state)
}

pub fn request(method: Method, uri: &str, cookie: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let mut request = builder.body(body).expect("failed to build request");

    request.extensions_mut().insert(ConnectInfo(SocketAddr::new(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        0,
    )));

    request
}

pub fn form_request(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut request = request(Method::POST, uri, cookie, Body::from(form.to_string()));
    request.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    request
}

/// The `name=value` pair of the Set-Cookie header, ready to be sent back.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Decodes the session carried by a `name=value` cookie pair.
pub fn decode_session(state: &AppState, cookie: &str) -> Session {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
    state.sessions.load(&headers)
}

/// Encodes `session` into a `name=value` cookie pair.
pub fn encode_session(state: &AppState, session: &Session) -> String {
    let set_cookie = state.sessions.save(session).expect("session should encode");
    set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}

/// An unsigned ID token whose payload carries `sub`.
pub fn id_token_for(sub: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","kid":"test"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"iss":"accounts.google.com","aud":"{}","sub":"{}"}}"#,
        CLIENT_ID, sub
    ));
    format!("{}.{}.c2lnbmF0dXJl", header, payload)
}

pub fn token_response(access_token: &str, id_token: &str) -> String {
    serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600,
        "id_token": id_token,
    })
    .to_string()
}
