//! Export Salesforce Marketing Cloud account users to CSV.
//!
//! If you're just getting started, take a look at the [`Client`].
//! It authenticates with your installed package's client credentials,
//! retrieves all `AccountUser` objects over the SOAP API and writes them to
//! a CSV file.
//!
//! # Examples
//! ```no_run
//! use sfmc_users::{Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder()
//!         .with_client_id("my-client-id")
//!         .with_client_secret("my-client-secret")
//!         .build()?;
//!
//!     // Or step by step
//!     let token = client.auth().request_token().await?;
//!     for user in client.account_users().list(&token).await? {
//!         println!("{:?}: {}", user.name, user.joined_roles());
//!     }
//!
//!     let written = client.export("ExactTargetUserList.csv").await?;
//!     println!("wrote {} users", written);
//!
//!     Ok(())
//! }
//! ```
pub mod client;
pub mod error;
mod http;

pub mod account_users;
pub mod auth;
pub mod export;
pub mod xml;

pub use client::Client;
pub use error::Error;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

#[cfg(all(feature = "default-tls", feature = "native-tls"))]
compile_error!("Feature \"default-tls\" and \"native-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "native-tls", feature = "rustls-tls"))]
compile_error!("Feature \"native-tls\" and \"rustls-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "rustls-tls", feature = "default-tls"))]
compile_error!("Feature \"rustls-tls\" and \"default-tls\" cannot be enabled at the same time");
