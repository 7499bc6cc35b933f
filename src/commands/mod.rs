//! Server Bindings
//!
//! Thin `fetch` wrappers for the endpoints the ballots talk to, organized by domain.

mod ranking;
mod csrf;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use crate::error::{SyncError, SyncResult};

// Re-export all public items
pub use ranking::*;
pub use csrf::*;

/// Header the server reads the anti-forgery token from
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// application/x-www-form-urlencoded keeps `*-._` and alphanumerics
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'*').remove(b'-').remove(b'.').remove(b'_');

/// Encode pairs as a form body (`a=1&b=two+words`)
pub fn form_body<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k.as_ref()), encode_component(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, FORM_ENCODE_SET).to_string().replace("%20", "+")
}

/// What the ballot needs to know about a settled request
#[derive(Debug, Clone, PartialEq)]
pub struct PostResponse {
    pub status: u16,
    pub redirected: bool,
    pub url: String,
}

impl PostResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// POST a form-encoded body without navigating
async fn post_form(url: &str, body: &str, csrf_token: &str) -> SyncResult<PostResponse> {
    let headers = Headers::new().map_err(SyncError::network)?;
    headers
        .set("Content-Type", "application/x-www-form-urlencoded")
        .map_err(SyncError::network)?;
    headers.set(CSRF_HEADER, csrf_token).map_err(SyncError::network)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_headers(&headers);
    init.set_body(&body.into());

    let response = send(url, &init).await?;
    Ok(PostResponse {
        status: response.status(),
        redirected: response.redirected(),
        url: response.url(),
    })
}

/// GET a JSON document
async fn get_json<T: DeserializeOwned>(url: &str) -> SyncResult<T> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_credentials(RequestCredentials::SameOrigin);

    let response = send(url, &init).await?;
    if !response.ok() {
        return Err(SyncError::Status(response.status()));
    }
    let json = JsFuture::from(response.json().map_err(SyncError::network)?)
        .await
        .map_err(|e| SyncError::Decode(format!("{:?}", e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| SyncError::Decode(e.to_string()))
}

async fn send(url: &str, init: &RequestInit) -> SyncResult<Response> {
    let window = web_sys::window().ok_or_else(|| SyncError::Dom("no window".to_string()))?;
    let request = Request::new_with_str_and_init(url, init).map_err(SyncError::network)?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(SyncError::network)?;
    value.dyn_into::<Response>().map_err(SyncError::network)
}
