//! Async client for a cloud database provisioning API.
//!
//! Client-credentials tokens are cached and refreshed once per expiry window, transport failures
//! are retried with jittered backoff, and non-2xx responses surface as structured API errors.

#![deny(clippy::all, missing_docs)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod id;
pub mod obs;
pub mod services;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials,
		client::Client,
		config::{ClientConfig, ClientConfigBuilder},
		http::{ReqwestTransport, RetryPolicy},
	};

	/// Client identifier used by the reqwest-backed test helpers.
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by the reqwest-backed test helpers.
	pub const TEST_CLIENT_SECRET: &str = "test-secret";

	/// Returns a config builder pointed at `base_url` with retry waits shrunk for tests.
	pub fn test_config_builder(base_url: &str) -> ClientConfigBuilder {
		let base_url = Url::parse(base_url).expect("Mock server URL should parse successfully.");

		ClientConfig::builder(base_url).retry(RetryPolicy::new(
			3,
			StdDuration::from_millis(1),
			StdDuration::from_millis(5),
		))
	}

	/// Builds a reqwest-backed [`Client`] against a mock server base URL.
	pub fn build_reqwest_test_client(base_url: &str) -> Client<ReqwestTransport> {
		let config =
			test_config_builder(base_url).build().expect("Test client config should be valid.");

		Client::new(config, Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET))
			.expect("Reqwest test client should build successfully.")
	}

	/// Canonical token endpoint body returned by mock servers.
	pub fn token_body(access_token: &str, expires_in: i64) -> String {
		format!(
			"{{\"token_type\":\"Bearer\",\"access_token\":\"{access_token}\",\"expires_in\":{expires_in}}}"
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
