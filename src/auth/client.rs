use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    auth::model::*,
    error::{Error, Result},
    http,
};

/// Requests access tokens from the token endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: http::Client,
    token_url: Url,
    credentials: Credentials,
}

impl Client {
    pub(crate) fn new(http_client: http::Client, token_url: Url, credentials: Credentials) -> Self {
        Self {
            http_client,
            token_url,
            credentials,
        }
    }

    /// Get the token endpoint URL.
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Request a new access token.
    ///
    /// Anything but a `200 OK` is reported as [`Error::Auth`] so callers never
    /// continue with an undefined token.
    #[instrument(
        skip(self),
        fields(token_url = %self.token_url, client_id = %self.credentials.client_id)
    )]
    pub async fn request_token(&self) -> Result<AccessToken> {
        let res = self
            .http_client
            .post(&self.token_url, &self.credentials)
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            let message = res.text().await.unwrap_or_default();
            return Err(Error::Auth {
                status: status.as_u16(),
                message,
            });
        }

        let token: AccessToken = res.json().await?;
        if token.access_token.is_empty() {
            return Err(Error::MissingAccessToken);
        }

        debug!(expires_in = ?token.expires_in, "obtained access token");
        Ok(token)
    }
}
