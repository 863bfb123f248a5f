// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	flows::Client,
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ProviderStrategy,
};

const STATE_LEN: usize = 32;

/// Caller inputs for [`Client::authorization_url`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationOptions {
	/// Opaque state; a random 32-character alphanumeric value is generated when unset.
	pub state: Option<String>,
	/// Requested scopes; the strategy defaults apply when unset.
	pub scopes: Option<Vec<String>>,
	/// Redirect URI overriding the configured one.
	pub redirect_uri: Option<Url>,
	/// Additional query parameters (for example `dc_language` or `dc_template`).
	pub params: BTreeMap<String, String>,
}
impl AuthorizationOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses `state` instead of a generated value.
	pub fn state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Requests `scopes` instead of the strategy defaults.
	pub fn scopes<I, T>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<String>,
	{
		self.scopes = Some(scopes.into_iter().map(Into::into).collect());

		self
	}

	/// Overrides the configured redirect URI.
	pub fn redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Adds or replaces an extra query parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}
}

/// Authorization redirect returned by [`Client::authorization_url`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Fully-formed URL the user agent should be sent to.
	pub url: Url,
	/// State that must round-trip via the redirect handler.
	pub state: String,
}
impl AuthorizationRequest {
	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

impl<S, C, M> Client<S, C, M>
where
	S: ?Sized + ProviderStrategy,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the authorization URL plus the state to verify on callback.
	///
	/// Generic parameters are assembled first, caller extras are merged over them, and
	/// `client_id` is always the configured value. The strategy then filters the set before
	/// it is appended to the authorization endpoint.
	pub fn authorization_url(&self, options: AuthorizationOptions) -> AuthorizationRequest {
		const KIND: FlowKind = FlowKind::AuthorizationUrl;

		let span = FlowSpan::new(KIND, "authorization_url");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let _guard = span.clone().entered();

		let AuthorizationOptions { state, scopes, redirect_uri, params: extras } = options;
		let mut params = BTreeMap::new();

		params.insert("state".to_owned(), state.unwrap_or_else(random_state));

		let scopes = scopes.unwrap_or_else(|| self.strategy.default_scopes());

		if !scopes.is_empty() {
			params.insert("scope".to_owned(), scopes.join(self.strategy.scope_separator()));
		}

		params.insert("response_type".to_owned(), "code".to_owned());
		params.insert("approval_prompt".to_owned(), "auto".to_owned());

		if let Some(redirect_uri) = redirect_uri.as_ref().or(self.config.redirect_uri.as_ref()) {
			params.insert("redirect_uri".to_owned(), redirect_uri.to_string());
		}

		params.extend(extras);
		params.insert("client_id".to_owned(), self.config.client_id.clone());

		let state = params.get("state").cloned().unwrap_or_default();
		let params = self.strategy.authorization_parameters(params);
		let mut url = self.strategy.base_authorization_url().clone();

		url.query_pairs_mut().extend_pairs(params.iter());

		span.record_outcome(&Ok::<_, Error>(()));
		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		AuthorizationRequest { url, state }
	}
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn generated_state_is_alphanumeric() {
		let state = random_state();

		assert_eq!(state.len(), STATE_LEN);
		assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(state, random_state());
	}

	#[test]
	fn state_validation_errors_on_mismatch() {
		let request = AuthorizationRequest {
			url: Url::parse("https://login.doccheck.com/code/?state=expected")
				.expect("Authorization URL fixture should parse successfully."),
			state: "expected".into(),
		};

		assert!(request.validate_state("expected").is_ok());

		let err = request.validate_state("other").expect_err("State mismatch should fail.");

		assert!(matches!(err, Error::StateMismatch));
	}

	#[test]
	fn options_builder_collects_extras() {
		let options = AuthorizationOptions::new()
			.state("abc")
			.scopes(["a", "b"])
			.param("dc_language", "de")
			.param("dc_language", "fr");

		assert_eq!(options.state.as_deref(), Some("abc"));
		assert_eq!(options.scopes, Some(vec!["a".to_owned(), "b".to_owned()]));
		assert_eq!(options.params.get("dc_language").map(String::as_str), Some("fr"));
	}
}
