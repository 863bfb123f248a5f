//! Fixed DocCheck endpoint paths.

// self
use crate::{_prelude::*, error::ConfigError};

/// Authorization endpoint path.
pub const AUTHORIZATION_PATH: &str = "/code/";
/// Token endpoint path.
pub const TOKEN_PATH: &str = "/service/oauth/access_token";
/// User-info endpoint path (v2 profile payload).
pub const USER_INFO_PATH: &str = "/service/oauth/user_data/v2/";

/// The three fixed DocCheck endpoints derived from a base URL.
///
/// URLs are computed once at construction; the accessors are pure and never look at request
/// parameters or tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocCheckEndpoints {
	authorization: Url,
	token: Url,
	user_info: Url,
}
impl DocCheckEndpoints {
	/// Derives the endpoints by appending the fixed paths to `base_url`.
	///
	/// `base_url` is expected without a trailing slash, as produced by
	/// [`ProviderConfig`](crate::provider::ProviderConfig).
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			authorization: join("authorization", base_url, AUTHORIZATION_PATH)?,
			token: join("token", base_url, TOKEN_PATH)?,
			user_info: join("user-info", base_url, USER_INFO_PATH)?,
		})
	}

	/// Authorization endpoint (`{base}/code/`).
	pub fn authorization(&self) -> &Url {
		&self.authorization
	}

	/// Token endpoint (`{base}/service/oauth/access_token`).
	pub fn token(&self) -> &Url {
		&self.token
	}

	/// User-info endpoint (`{base}/service/oauth/user_data/v2/`).
	pub fn user_info(&self) -> &Url {
		&self.user_info
	}
}

fn join(endpoint: &'static str, base_url: &str, path: &str) -> Result<Url, ConfigError> {
	Url::parse(&format!("{base_url}{path}"))
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoints_append_fixed_paths() {
		let endpoints =
			DocCheckEndpoints::new("https://login.doccheck.com").expect("Endpoints should build.");

		assert_eq!(endpoints.authorization().as_str(), "https://login.doccheck.com/code/");
		assert_eq!(
			endpoints.token().as_str(),
			"https://login.doccheck.com/service/oauth/access_token"
		);
		assert_eq!(
			endpoints.user_info().as_str(),
			"https://login.doccheck.com/service/oauth/user_data/v2/"
		);
	}

	#[test]
	fn base_path_prefix_is_kept() {
		let endpoints = DocCheckEndpoints::new("http://127.0.0.1:8080/doccheck")
			.expect("Endpoints should build.");

		assert_eq!(endpoints.authorization().path(), "/doccheck/code/");
		assert_eq!(endpoints.token().path(), "/doccheck/service/oauth/access_token");
	}
}
