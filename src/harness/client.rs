use reqwest::{header, Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::harness::dto::SessionHandle;
use crate::harness::error::{HarnessError, Result};

/// Paths of the endpoints the helpers talk to.
pub mod endpoints {
    pub const REGISTER: &str = "/api/register";
    pub const LOGIN: &str = "/api/login";
    pub const LOGOUT: &str = "/api/logout";
    pub const DISHES: &str = "/api/dishes";

    pub fn dish_by_id(id: i64) -> String {
        format!("/api/dishes/{}", id)
    }
}

/// A cookie set by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCookie {
    pub name: String,
    pub value: String,
}

/// A fully read response: status, cookies and decoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Raw `Set-Cookie` header values, attributes included.
    pub set_cookie: Vec<String>,
    pub cookies: Vec<ResponseCookie>,
    /// `Value::Null` when the body is empty or not JSON.
    pub body: Value,
}

impl ApiResponse {
    async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let set_cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();
        let cookies = response
            .cookies()
            .map(|c| ResponseCookie {
                name: c.name().to_string(),
                value: c.value().to_string(),
            })
            .collect();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok(Self {
            status,
            set_cookie,
            cookies,
            body,
        })
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// String `error` field of a failure body.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    pub(crate) fn expect_status(self, operation: &'static str, expected: StatusCode) -> Result<Self> {
        if self.status != expected {
            return Err(HarnessError::UnexpectedStatus {
                operation,
                expected: expected.to_string(),
                actual: self.status,
                body: self.body.to_string(),
            });
        }
        Ok(self)
    }

    pub(crate) fn decode<T: DeserializeOwned>(&self, what: &'static str) -> Result<T> {
        serde_json::from_value(self.body.clone())
            .map_err(|source| HarnessError::Decode { what, source })
    }
}

/// HTTP side of the test helpers. Cheap to clone; carries no session state,
/// every authenticated call takes the caller's [`SessionHandle`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `base_url` may carry a path prefix (`http://host/app`); endpoint paths
    /// are resolved under it.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| HarnessError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(HarnessError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a base URL".into(),
            });
        }
        if !base_url.path().ends_with('/') {
            let prefix = format!("{}/", base_url.path());
            base_url.set_path(&prefix);
        }
        // Sessions travel only as explicit handles, and a 302 from logout
        // must be observed rather than followed.
        let http = reqwest::Client::builder()
            .cookie_store(false)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("dish-harness/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HarnessError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&SessionHandle>,
    ) -> Result<reqwest::RequestBuilder> {
        let mut request = self.http.request(method, self.url(path)?);
        if let Some(session) = session {
            request = request.header(header::COOKIE, session.as_str());
        }
        Ok(request)
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse> {
        let response = ApiResponse::read(request.send().await?).await?;
        debug!(%method, path, status = %response.status, "api call");
        Ok(response)
    }

    /// Issues one request and reads the whole response. Never fails on status.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        session: Option<&SessionHandle>,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let mut request = self.request(method.clone(), path, session)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(&method, path, request).await
    }

    /// Sends `body` byte for byte, with `content_type` when given. For
    /// checking how the server treats bodies that are not valid JSON.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        session: Option<&SessionHandle>,
        content_type: Option<&str>,
        body: impl Into<reqwest::Body>,
    ) -> Result<ApiResponse> {
        let mut request = self.request(method.clone(), path, session)?.body(body);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        self.dispatch(&method, path, request).await
    }

    pub async fn get(&self, path: &str, session: Option<&SessionHandle>) -> Result<ApiResponse> {
        self.send::<Value>(Method::GET, path, session, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        session: Option<&SessionHandle>,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        self.send(Method::POST, path, session, body).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        session: Option<&SessionHandle>,
        body: &B,
    ) -> Result<ApiResponse> {
        self.send(Method::PUT, path, session, Some(body)).await
    }

    pub async fn delete(&self, path: &str, session: Option<&SessionHandle>) -> Result<ApiResponse> {
        self.send::<Value>(Method::DELETE, path, session, None).await
    }
}
