use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Client credentials of an installed package.
#[derive(Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Create credentials from a client ID and a client secret.
    pub fn new<I, S>(client_id: I, client_secret: S) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A short-lived bearer token.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub access_token: String,
    /// Lifetime of the token in seconds, if the endpoint reports it.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// The token endpoint answers `"accessToken": null` on some failures, which we
/// want to treat like a missing token.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

impl AccessToken {
    /// Get the token string.
    pub fn as_str(&self) -> &str {
        &self.access_token
    }
}
