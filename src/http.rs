//! HTTP Client
//!
//! `HttpClient` keeps request logic testable off the browser;
//! `FetchClient` is the `fetch`-backed implementation used on the page.

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use crate::error::UiError;

/// Header the server checks against the `csrftoken` cookie
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// A single POST to the community server
#[derive(Debug, Clone, PartialEq)]
pub struct PostRequest {
    pub url: String,
    pub csrf_token: Option<String>,
    /// Serialized JSON body, sent with `Content-Type: application/json`
    pub json_body: Option<String>,
}

impl PostRequest {
    pub fn new(url: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self {
            url: url.into(),
            csrf_token,
            json_body: None,
        }
    }

    pub fn with_json(mut self, body: String) -> Self {
        self.json_body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, UiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Send the request once. `Err` only for transport failures; HTTP error
    /// statuses come back as a response.
    async fn post(&self, request: &PostRequest) -> Result<HttpResponse, UiError>;
}

/// `window.fetch` client, same-origin credentials so the session cookie rides along
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

fn js_err(e: JsValue) -> UiError {
    UiError::Transport(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl HttpClient for FetchClient {
    async fn post(&self, request: &PostRequest) -> Result<HttpResponse, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Transport("no window".to_string()))?;

        let headers = Headers::new().map_err(js_err)?;
        if let Some(token) = &request.csrf_token {
            headers.set(CSRF_HEADER, token).map_err(js_err)?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_credentials(RequestCredentials::SameOrigin);
        if let Some(body) = &request.json_body {
            headers.set("Content-Type", "application/json").map_err(js_err)?;
            init.set_body(&JsValue::from_str(body));
        }
        init.set_headers(&headers);

        let req = Request::new_with_str_and_init(&request.url, &init).map_err(js_err)?;
        let value = JsFuture::from(window.fetch_with_request(&req)).await.map_err(js_err)?;
        let resp: Response = value.dyn_into().map_err(js_err)?;

        let text = JsFuture::from(resp.text().map_err(js_err)?).await.map_err(js_err)?;
        Ok(HttpResponse {
            status: resp.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}
