use bytes::Bytes;
use http::{header, StatusCode};
pub use http::HeaderMap;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::error::{Error, Result};

pub(crate) static USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Client is a thin wrapper around `reqwest::Client` which posts to absolute
/// endpoint URLs. Token and data calls live on different hosts, so there is
/// no base url to prepend.
#[derive(Debug, Clone)]
pub(crate) struct Client {
    inner: reqwest::Client,
}

#[derive(Clone)]
pub(crate) enum Body {
    Json(serde_json::Value),
    Bytes(Bytes),
}

impl Client {
    /// Creates a new client.
    pub(crate) fn new() -> Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-cache"),
        );

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .build()
            .map_err(Error::HttpClientSetup)?;

        Ok(Self { inner: http_client })
    }

    /// Executes a single POST. Nothing is retried: a transport failure is
    /// returned as is and any status code is handed back to the caller.
    async fn execute<H>(&self, url: &Url, body: Body, headers: H) -> Result<Response>
    where
        H: Into<Option<HeaderMap>>,
    {
        let mut req = self.inner.post(url.clone());
        if let Some(headers) = headers.into() {
            req = req.headers(headers);
        }
        req = match body {
            Body::Json(value) => req.json(&value),
            Body::Bytes(bytes) => req.body(bytes),
        };

        let res = req.send().await.map_err(Error::Http)?;
        Ok(Response::new(res, url.path().to_string()))
    }

    pub(crate) async fn post<P>(&self, url: &Url, payload: P) -> Result<Response>
    where
        P: Serialize,
    {
        self.execute(
            url,
            Body::Json(serde_json::to_value(payload).map_err(Error::Serialize)?),
            None,
        )
        .await
    }

    pub(crate) async fn post_bytes<P, H>(
        &self,
        url: &Url,
        payload: P,
        headers: H,
    ) -> Result<Response>
    where
        P: Into<Bytes>,
        H: Into<Option<HeaderMap>>,
    {
        self.execute(url, Body::Bytes(payload.into()), headers).await
    }
}

#[derive(Debug)]
pub(crate) struct Response {
    inner: reqwest::Response,
    path: String,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response, path: String) -> Self {
        Self { inner, path }
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn headers(&self) -> &header::HeaderMap {
        self.inner.headers()
    }

    pub(crate) async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json::<T>().await.map_err(Error::Deserialize)
    }

    pub(crate) async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Error::Http)
    }
}
