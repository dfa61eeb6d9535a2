//! Error type definitions.

use thiserror::Error;

/// A `Result` alias where the `Err` case is `sfmc_users::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the export client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Missing client ID")]
    MissingClientId,
    #[error("Missing client secret")]
    MissingClientSecret,
    #[error("Invalid URL: {0}")]
    InvalidUrl(url::ParseError),
    #[error("Failed to setup HTTP client: {0}")]
    HttpClientSetup(reqwest::Error),
    #[error("Http error: {0}")]
    Http(reqwest::Error),
    #[error("Authentication failed with status {status}: {message}")]
    Auth { status: u16, message: String },
    #[error("Token response did not contain an access token")]
    MissingAccessToken,
    #[error("Failed to deserialize response: {0}")]
    Deserialize(reqwest::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Unexpected response structure: {0}")]
    Parse(String),
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },
    #[error("Received {status} from the API: {body}")]
    Api { status: u16, body: String },
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
