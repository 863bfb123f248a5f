//! Generic OAuth 2.0 client driven by an injected [`ProviderStrategy`].
//!
//! The client owns the provider config, the strategy, and the transport. Each flow lives in
//! its own submodule: `authorize` builds redirect URLs, `token` runs the code and refresh
//! grants, and `owner` fetches the user-info profile.

mod authorize;
mod owner;
mod token;

pub use authorize::*;

// self
use crate::{
	_prelude::*,
	http::ProviderHttpClient,
	error::ConfigError,
	oauth::TransportErrorMapper,
	provider::{ProviderConfig, ProviderStrategy},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// OAuth 2.0 client bound to a single provider strategy.
///
/// Every hook the strategy exposes is consulted on each call, so the same client type serves
/// any provider that implements [`ProviderStrategy`].
pub struct Client<S, C, M>
where
	S: ?Sized + ProviderStrategy,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validated provider configuration (base URL and client credentials).
	pub config: ProviderConfig,
	/// Strategy supplying endpoints, parameter filtering, and response classification.
	pub strategy: Arc<S>,
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
}
impl<S, C, M> Client<S, C, M>
where
	S: ?Sized + ProviderStrategy,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// The strategy must have been derived from `config`; a strategy built from another base
	/// URL is rejected with [`ConfigError::StrategyMismatch`].
	pub fn with_http_client(
		config: ProviderConfig,
		strategy: impl Into<Arc<S>>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self, ConfigError> {
		let strategy = strategy.into();

		if strategy.base_url() != config.base_url {
			return Err(ConfigError::StrategyMismatch {
				config: config.base_url,
				strategy: strategy.base_url().to_owned(),
			});
		}

		Ok(Self {
			config,
			strategy,
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
		})
	}
}
#[cfg(feature = "reqwest")]
impl<S> Client<S, ReqwestHttpClient, ReqwestTransportErrorMapper>
where
	S: ?Sized + ProviderStrategy,
{
	/// Creates a client backed by the crate's reqwest transport, which does not follow
	/// redirects.
	pub fn new(config: ProviderConfig, strategy: impl Into<Arc<S>>) -> Result<Self> {
		let http_client = ReqwestHttpClient::try_new()?;

		Ok(Self::with_http_client(config, strategy, http_client, ReqwestTransportErrorMapper)?)
	}
}
impl<S, C, M> Clone for Client<S, C, M>
where
	S: ?Sized + ProviderStrategy,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			strategy: self.strategy.clone(),
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
		}
	}
}
impl<S, C, M> Debug for Client<S, C, M>
where
	S: ?Sized + ProviderStrategy,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("authorization_url", &self.strategy.base_authorization_url().as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{StatusCode, header::AUTHORIZATION},
	};
	// self
	use super::*;
	use crate::{
		auth::AccessToken,
		error::{ProviderErrorKind, ResponseError, TransportError},
		oauth::Endpoint,
		provider::DocCheck,
	};

	type Captured = Arc<std::sync::Mutex<Vec<HttpRequest>>>;

	#[derive(Debug, ThisError)]
	#[error("Canned transport failure.")]
	struct CannedError;

	#[derive(Clone)]
	struct CannedHttpClient {
		status: StatusCode,
		body: &'static str,
		captured: Captured,
	}
	impl CannedHttpClient {
		fn new(status: StatusCode, body: &'static str) -> Self {
			Self { status, body, captured: Default::default() }
		}
	}
	impl ProviderHttpClient for CannedHttpClient {
		type Handle = CannedHttpClient;
		type TransportError = CannedError;

		fn handle(&self) -> Self::Handle {
			self.clone()
		}
	}
	impl<'c> AsyncHttpClient<'c> for CannedHttpClient {
		type Error = HttpClientError<CannedError>;
		type Future =
			Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

		fn call(&'c self, request: HttpRequest) -> Self::Future {
			if let Ok(mut captured) = self.captured.lock() {
				captured.push(request);
			}

			let mut response = HttpResponse::new(self.body.as_bytes().to_vec());

			*response.status_mut() = self.status;

			Box::pin(async move { Ok(response) })
		}
	}

	struct CannedMapper;
	impl TransportErrorMapper<CannedError> for CannedMapper {
		fn map_transport_error(
			&self,
			endpoint: Endpoint,
			error: HttpClientError<CannedError>,
		) -> Error {
			TransportError::Other { endpoint: endpoint.as_str(), message: error.to_string() }.into()
		}
	}

	fn canned_client(
		status: StatusCode,
		body: &'static str,
	) -> (Client<DocCheck, CannedHttpClient, CannedMapper>, Captured) {
		let config = ProviderConfig::builder("client")
			.client_secret("canned-secret-value")
			.build()
			.expect("Config should build.");
		let strategy = DocCheck::new(&config).expect("Strategy should build.");
		let http_client = CannedHttpClient::new(status, body);
		let captured = http_client.captured.clone();

		let client = Client::with_http_client(config, strategy, http_client, CannedMapper)
			.expect("Client should build.");

		(client, captured)
	}

	#[tokio::test]
	async fn exchange_code_posts_to_token_endpoint() {
		let (client, captured) = canned_client(
			StatusCode::OK,
			r#"{"access_token":"at","token_type":"bearer","expires_in":3600,"refresh_token":"rt"}"#,
		);
		let token = client.exchange_code("auth-code").await.expect("Exchange should succeed.");

		assert_eq!(token.access_token.expose(), "at");
		assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("rt"));
		assert!(token.expires_at.is_some());

		let captured = captured.lock().expect("Capture lock should not be poisoned.");

		assert_eq!(captured.len(), 1);
		assert_eq!(captured[0].uri(), "https://login.doccheck.com/service/oauth/access_token");
	}

	#[tokio::test]
	async fn in_band_error_is_classified_before_parsing() {
		let (client, _) = canned_client(StatusCode::OK, r#"{"error":"bad_request"}"#);
		let err = client.exchange_code("auth-code").await.expect_err("Error body must fail.");

		assert!(matches!(
			err,
			Error::Provider(ref provider) if provider.kind == ProviderErrorKind::OAuth
		));
	}

	#[tokio::test]
	async fn non_object_body_fails_after_classification() {
		let (client, _) = canned_client(StatusCode::OK, "<html>maintenance</html>");
		let err = client.exchange_code("auth-code").await.expect_err("HTML body must fail.");

		assert!(matches!(err, Error::Response(ResponseError::NotJsonObject { status: 200, .. })));

		let (client, _) = canned_client(StatusCode::BAD_GATEWAY, "<html>down</html>");
		let err = client.exchange_code("auth-code").await.expect_err("502 must fail.");

		assert!(matches!(
			err,
			Error::Provider(ref provider)
				if provider.kind == ProviderErrorKind::Client && provider.message == "Bad Gateway"
		));
	}

	#[tokio::test]
	async fn fetch_resource_owner_sends_bearer_token() {
		let (client, captured) = canned_client(StatusCode::OK, r#"{"uniquekey":"730996"}"#);
		let token =
			AccessToken::builder("user-token").build().expect("Access token fixture should build.");
		let owner = client.fetch_resource_owner(&token).await.expect("Fetch should succeed.");

		assert_eq!(owner.id().as_deref(), Ok("730996"));

		let captured = captured.lock().expect("Capture lock should not be poisoned.");

		assert_eq!(
			captured[0].headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Bearer user-token")
		);
	}

	#[test]
	fn strategy_from_another_config_is_rejected() {
		let config = ProviderConfig::builder("client")
			.base_url("https://login.doccheck.com")
			.build()
			.expect("Config should build.");
		let other = ProviderConfig::builder("other")
			.base_url("https://staging.doccheck.example/")
			.build()
			.expect("Other config should build.");
		let strategy = DocCheck::new(&other).expect("Strategy should build.");
		let err = Client::<DocCheck, CannedHttpClient, CannedMapper>::with_http_client(
			config,
			strategy,
			CannedHttpClient::new(StatusCode::OK, "{}"),
			CannedMapper,
		)
		.expect_err("Mismatched strategy must be rejected.");

		assert!(matches!(
			err,
			ConfigError::StrategyMismatch { ref config, ref strategy }
				if config == "https://login.doccheck.com"
					&& strategy == "https://staging.doccheck.example"
		));
	}

	#[test]
	fn debug_omits_secrets() {
		let (client, _) = canned_client(StatusCode::OK, "{}");
		let rendered = format!("{client:?}");

		assert!(rendered.contains("https://login.doccheck.com/code/"));
		assert!(!rendered.contains("canned-secret-value"));
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn reqwest_client_refreshes_against_mock_server() {
		// crates.io
		use httpmock::prelude::*;

		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(POST)
					.path("/service/oauth/access_token")
					.header("content-type", "application/x-www-form-urlencoded")
					.header("accept", "application/json");
				then.status(200)
					.header("content-type", "application/json")
					.body(r#"{"access_token":"new-access","refresh_token":"new-refresh"}"#);
			})
			.await;
		let client = crate::_preludet::build_reqwest_test_client(
			&server.base_url(),
			crate::provider::ClientAuthMethod::ClientSecretPost,
		);
		let token = client.refresh_token("old-refresh").await.expect("Refresh should succeed.");

		mock.assert_async().await;

		assert_eq!(token.access_token.expose(), "new-access");
		assert_eq!(token.expires_at, None);
	}
}
