use reqwest::header::{self, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

use crate::{
    account_users::{model::*, request, response},
    auth::AccessToken,
    error::{Error, Result},
    http::{self, HeaderMap},
};

/// Provides methods to retrieve account users.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: http::Client,
    data_url: Url,
}

impl Client {
    pub(crate) fn new(http_client: http::Client, data_url: Url) -> Self {
        Self {
            http_client,
            data_url,
        }
    }

    /// Get the SOAP endpoint URL.
    pub fn data_url(&self) -> &Url {
        &self.data_url
    }

    /// Retrieve all account users visible to the token.
    #[instrument(skip(self, token), fields(data_url = %self.data_url))]
    pub async fn list(&self, token: &AccessToken) -> Result<Vec<AccountUser>> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/xml"));
        headers.insert("SOAPAction", HeaderValue::from_static(request::SOAP_ACTION));

        let res = self
            .http_client
            .post_bytes(
                &self.data_url,
                request::retrieve_envelope(token.as_str()),
                headers,
            )
            .await?;

        let status = res.status();
        debug!(
            %status,
            path = res.path(),
            content_type = ?res.headers().get(header::CONTENT_TYPE),
            "received retrieve response"
        );
        let body = res.text().await?;

        if !status.is_success() {
            return Err(response::decode_fault(&body).unwrap_or(Error::Api {
                status: status.as_u16(),
                body,
            }));
        }

        response::decode(&body)
    }

    /// Retrieve all account users and flatten them into rows.
    pub async fn rows(&self, token: &AccessToken) -> Result<Vec<UserRow>> {
        let users = self.list(token).await?;
        Ok(users.iter().map(UserRow::from).collect())
    }
}
