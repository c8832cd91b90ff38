//! User store outbound adapters.
//!
//! This module provides an HTTP implementation of the `UserDirectory` port.

mod http_client;

pub use http_client::HttpUserDirectory;
