//! URL utility library: validation, parsing, form encoding/decoding, and
//! curl-backed fetching with optional proxy support and redirect following.
//!
//! The facade is [`client::UrlClient`]; it composes transport options
//! (timeouts, proxy, headers, cookies) into a single request and normalizes
//! the outcome into small result records.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod logging;
pub mod transport;
pub mod url_model;
