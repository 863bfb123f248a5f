//! DocCheck login strategy.
//!
//! DocCheck deviates from a stock OAuth 2.0 authorization server in a few places that this
//! module absorbs so the generic client stays provider-agnostic:
//!
//! - the authorize endpoint rejects `scope`, `response_type`, and `approval_prompt`, and only
//!   knows a fixed set of login page languages and templates;
//! - the token endpoint may answer HTTP 200 with an `error` body;
//! - the user-info payload HTML-encodes free-text fields and mixes string and numeric ids.

pub mod classifier;
pub mod endpoints;
pub mod owner;
pub mod params;

pub use classifier::*;
pub use endpoints::*;
pub use owner::*;
pub use params::*;

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ConfigError, ProviderError},
	http::ProviderResponse,
	provider::{
		config::ProviderConfig,
		strategy::{ProviderStrategy, RawProfile},
	},
};
#[cfg(feature = "reqwest")]
use crate::{flows::Client, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// Generic client wired to the DocCheck strategy and the reqwest transport.
#[cfg(feature = "reqwest")]
pub type DocCheckClient = Client<DocCheck, ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// [`ProviderStrategy`] for the DocCheck login service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocCheck {
	base_url: String,
	endpoints: DocCheckEndpoints,
}
impl DocCheck {
	/// Derives the DocCheck endpoints from the config's base URL.
	pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			base_url: config.base_url.clone(),
			endpoints: DocCheckEndpoints::new(&config.base_url)?,
		})
	}

	/// Base URL the endpoints were derived from.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Endpoint set in use.
	pub fn endpoints(&self) -> &DocCheckEndpoints {
		&self.endpoints
	}
}
impl ProviderStrategy for DocCheck {
	type ResourceOwner = DocCheckResourceOwner;

	fn base_url(&self) -> &str {
		DocCheck::base_url(self)
	}

	fn base_authorization_url(&self) -> &Url {
		self.endpoints.authorization()
	}

	fn base_access_token_url(&self, _: &BTreeMap<String, String>) -> &Url {
		self.endpoints.token()
	}

	fn resource_owner_details_url(&self, _: &AccessToken) -> &Url {
		self.endpoints.user_info()
	}

	fn authorization_parameters(
		&self,
		params: BTreeMap<String, String>,
	) -> BTreeMap<String, String> {
		filter_authorization_parameters(params)
	}

	fn check_response(
		&self,
		response: &ProviderResponse,
		data: &RawProfile,
	) -> Result<(), ProviderError> {
		classify_response(response, data)
	}

	fn create_resource_owner(&self, profile: RawProfile, _: &AccessToken) -> Self::ResourceOwner {
		DocCheckResourceOwner::new(profile, self.base_url.clone())
	}
}
