//! The top-level client that ties authentication, retrieval and export
//! together.
use std::{env, path::Path};
use tracing::{info, instrument};
use url::Url;

use crate::{
    account_users,
    auth::{self, Credentials},
    error::{Error, Result},
    export, http,
};

/// Default REST endpoint for requesting access tokens.
pub static DEFAULT_TOKEN_URL: &str = "https://auth.exacttargetapis.com/v1/requestToken";
/// Default SOAP endpoint.
pub static DEFAULT_DATA_URL: &str = "https://webservice.s4.exacttarget.com/Service.asmx";

pub static ENV_CLIENT_ID: &str = "SFMC_CLIENT_ID";
pub static ENV_CLIENT_SECRET: &str = "SFMC_CLIENT_SECRET";
pub static ENV_TOKEN_URL: &str = "SFMC_TOKEN_URL";
pub static ENV_DATA_URL: &str = "SFMC_DATA_URL";

/// The client is the entrypoint of the whole crate.
///
/// You can create it using [`Client::builder`] or [`Client::new`].
///
/// # Examples
/// ```no_run
/// use sfmc_users::{Client, Error};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     // Create a new client and read the credentials from the environment
///     // variables SFMC_CLIENT_ID and SFMC_CLIENT_SECRET.
///     let client = Client::new()?;
///
///     // Set all available options. Unset options fall back to environment
///     // variables.
///     let client = Client::builder()
///         .with_client_id("my-client-id")
///         .with_client_secret("my-client-secret")
///         .build()?;
///
///     client.export("users.csv").await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    auth: auth::Client,
    account_users: account_users::Client,
}

impl Client {
    /// Creates a new client. If you want to configure it, use [`Client::builder`].
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client using a builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Token endpoint operations.
    pub fn auth(&self) -> &auth::Client {
        &self.auth
    }

    /// Account user operations.
    pub fn account_users(&self) -> &account_users::Client {
        &self.account_users
    }

    /// Authenticate, retrieve all account users and write them as CSV to
    /// `path`. Returns the number of users written.
    ///
    /// The file is only created once the users have been retrieved, so a
    /// failed login or retrieve leaves no output behind.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn export<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let token = self.auth.request_token().await?;
        let rows = self.account_users.rows(&token).await?;
        export::write_csv_file(path.as_ref(), &rows)?;
        info!(users = rows.len(), "export finished");
        Ok(rows.len())
    }
}

/// This builder is used to create a new client.
pub struct Builder {
    env_fallback: bool,
    client_id: Option<String>,
    client_secret: Option<String>,
    token_url: Option<String>,
    data_url: Option<String>,
}

impl Builder {
    /// Create a new builder.
    fn new() -> Self {
        Self {
            env_fallback: true,
            client_id: None,
            client_secret: None,
            token_url: None,
            data_url: None,
        }
    }

    /// Don't fall back to environment variables.
    pub fn no_env(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    /// Set the client ID. If this is not set, it will be read from the
    /// environment variable `SFMC_CLIENT_ID`.
    pub fn with_client_id<S: Into<String>>(mut self, client_id: S) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the client secret. If this is not set, it will be read from the
    /// environment variable `SFMC_CLIENT_SECRET`.
    pub fn with_client_secret<S: Into<String>>(mut self, client_secret: S) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the token endpoint. Falls back to `SFMC_TOKEN_URL`, then to
    /// [`DEFAULT_TOKEN_URL`].
    pub fn with_token_url<S: Into<String>>(mut self, token_url: S) -> Self {
        self.token_url = Some(token_url.into());
        self
    }

    /// Set the SOAP endpoint of your stack. Falls back to `SFMC_DATA_URL`,
    /// then to [`DEFAULT_DATA_URL`].
    pub fn with_data_url<S: Into<String>>(mut self, data_url: S) -> Self {
        self.data_url = Some(data_url.into());
        self
    }

    fn resolve(&self, value: &Option<String>, var: &str) -> String {
        let mut value = value.clone().unwrap_or_default();
        if value.is_empty() && self.env_fallback {
            value = env::var(var).unwrap_or_default();
        }
        value
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let client_id = self.resolve(&self.client_id, ENV_CLIENT_ID);
        if client_id.is_empty() {
            return Err(Error::MissingClientId);
        }

        let client_secret = self.resolve(&self.client_secret, ENV_CLIENT_SECRET);
        if client_secret.is_empty() {
            return Err(Error::MissingClientSecret);
        }

        let mut token_url = self.resolve(&self.token_url, ENV_TOKEN_URL);
        if token_url.is_empty() {
            token_url = DEFAULT_TOKEN_URL.to_string();
        }
        let token_url = Url::parse(&token_url).map_err(Error::InvalidUrl)?;

        let mut data_url = self.resolve(&self.data_url, ENV_DATA_URL);
        if data_url.is_empty() {
            data_url = DEFAULT_DATA_URL.to_string();
        }
        let data_url = Url::parse(&data_url).map_err(Error::InvalidUrl)?;

        let http_client = http::Client::new()?;
        let credentials = Credentials::new(client_id, client_secret);

        Ok(Client {
            auth: auth::Client::new(http_client.clone(), token_url, credentials),
            account_users: account_users::Client::new(http_client, data_url),
        })
    }
}
