//! Obtain an access token from the REST token endpoint.
//!
//! The token is requested once per run with the installed package's client
//! credentials and then attached to the SOAP calls in a `fueloauth` header.
mod client;
mod model;

pub use client::Client;
pub use model::*;
