//! Retrieve account users over the SOAP API and flatten them into rows.
//!
//! You're probably looking for the [`Client`], or for
//! [`crate::Client::export`] which runs the whole pipeline.
mod client;
mod model;
pub mod request;
pub mod response;

pub use client::Client;
pub use model::*;
