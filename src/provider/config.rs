//! Provider configuration (base URL + client credentials) and its validating builder.

// self
use crate::{_prelude::*, error::ConfigError};

/// Production DocCheck login host.
pub const DEFAULT_BASE_URL: &str = "https://login.doccheck.com";

/// Client authentication modes for token endpoint calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// Form POST body parameters for `client_id`/`client_secret`.
	ClientSecretPost,
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
}

/// Immutable provider configuration consumed by strategies and the client.
///
/// Deserialized values are not validated; pass them through [`ProviderConfig::validate`] or
/// build them with [`ProviderConfig::builder`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
	/// Base URL every endpoint is derived from, without a trailing slash.
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret for confidential clients.
	#[serde(default)]
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	#[serde(default)]
	pub redirect_uri: Option<Url>,
	/// Token endpoint client authentication mode.
	#[serde(default)]
	pub client_auth_method: ClientAuthMethod,
}
impl ProviderConfig {
	/// Creates a new builder for the provided client identifier.
	pub fn builder(client_id: impl Into<String>) -> ProviderConfigBuilder {
		ProviderConfigBuilder::new(client_id)
	}

	/// Validates the config and normalizes the base URL, returning the checked value.
	pub fn validate(mut self) -> Result<Self, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}

		self.base_url = normalize_base_url(&self.base_url)?;

		Ok(self)
	}
}
impl Debug for ProviderConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderConfig")
			.field("base_url", &self.base_url)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.field("client_auth_method", &self.client_auth_method)
			.finish()
	}
}

/// Builder for [`ProviderConfig`] values.
#[derive(Debug)]
pub struct ProviderConfigBuilder {
	base_url: String,
	client_id: String,
	client_secret: Option<String>,
	redirect_uri: Option<Url>,
	client_auth_method: ClientAuthMethod,
}
impl ProviderConfigBuilder {
	/// Creates a new builder seeded with the client identifier and the production base URL.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self {
			base_url: default_base_url(),
			client_id: client_id.into(),
			client_secret: None,
			redirect_uri: None,
			client_auth_method: ClientAuthMethod::default(),
		}
	}

	/// Overrides the base URL (staging hosts, mock servers).
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Overrides the token endpoint client authentication mode.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<ProviderConfig, ConfigError> {
		ProviderConfig {
			base_url: self.base_url,
			client_id: self.client_id,
			client_secret: self.client_secret,
			redirect_uri: self.redirect_uri,
			client_auth_method: self.client_auth_method,
		}
		.validate()
	}
}

fn default_base_url() -> String {
	DEFAULT_BASE_URL.to_owned()
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
	let trimmed = raw.trim().trim_end_matches('/');
	let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
		return Err(ConfigError::UnsupportedBaseUrl { url: raw.to_owned() });
	}

	Ok(trimmed.to_owned())
}
