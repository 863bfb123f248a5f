//! DocCheck identity provider for OAuth 2.0.
//!
//! The crate pairs a strategy-driven OAuth 2.0 client ([`flows::Client`]) with the DocCheck
//! strategy ([`provider::DocCheck`]): provider-constrained authorize URLs, in-band error
//! classification, and typed resource owner profiles.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		provider::{ClientAuthMethod, DocCheck, DocCheckClient, ProviderConfig},
	};

	/// Client id shared by the integration fixtures.
	pub const TEST_CLIENT_ID: &str = "mock_client_id";
	/// Client secret shared by the integration fixtures.
	pub const TEST_CLIENT_SECRET: &str = "mock_secret";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a provider config pointing at `base_url` with the shared fixture credentials.
	pub fn test_provider_config(
		base_url: &str,
		client_auth_method: ClientAuthMethod,
	) -> ProviderConfig {
		ProviderConfig::builder(TEST_CLIENT_ID)
			.client_secret(TEST_CLIENT_SECRET)
			.client_auth_method(client_auth_method)
			.redirect_uri(
				Url::parse("https://app.example.com/callback")
					.expect("Redirect URI fixture should parse successfully."),
			)
			.base_url(base_url)
			.build()
			.expect("Provider config fixture should build successfully.")
	}

	/// Constructs a [`DocCheckClient`] against `base_url` using the reqwest transport used
	/// across integration tests.
	pub fn build_reqwest_test_client(
		base_url: &str,
		client_auth_method: ClientAuthMethod,
	) -> DocCheckClient {
		let config = test_provider_config(base_url, client_auth_method);
		let strategy =
			DocCheck::new(&config).expect("DocCheck strategy fixture should build successfully.");

		DocCheckClient::with_http_client(
			config,
			strategy,
			test_reqwest_http_client(),
			ReqwestTransportErrorMapper,
		)
		.expect("DocCheck test client should build successfully.")
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
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
